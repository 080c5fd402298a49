use grid_astar::{AStar, Grid};
use grid_astar_maps::{find_maps, load_map, load_scenarios};
use std::path::Path;

fn workspace() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

/// Checks the path lengths against the optimal lengths stored in the scenario files.
#[test]
fn verify_solution_distance_astar() {
    let maps = find_maps(&workspace().join("maps")).unwrap();
    assert!(!maps.is_empty());
    let mut astar = AStar::new();
    for map_path in maps {
        let relative = map_path.strip_prefix(workspace().join("maps")).unwrap();
        let scen_path = workspace()
            .join("scenarios")
            .join(format!("{}.scen", relative.display()));
        let grid = Grid::from_bool_grid(load_map(&map_path).unwrap());
        let scenarios = load_scenarios(&scen_path).unwrap();
        assert!(!scenarios.is_empty());
        for scenario in scenarios {
            let (start, end) = (scenario.start(), scenario.goal());
            assert_eq!(
                (scenario.width as usize, scenario.height as usize),
                grid.dimensions()
            );
            println!("Start: {start}; End: {end}; Distance: {}", scenario.distance);
            let path = astar.find_path(&grid, start, end).unwrap();
            println!("My distance: {}", path.length());
            assert_eq!(path.length() as f64, scenario.distance);
            assert!(path.is_contiguous(&grid));
        }
    }
}
