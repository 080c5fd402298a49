use clap::Parser;
use grid_astar::generate::{self, GenerateConfig, DEFAULT_MIN_DISTANCE};
use grid_astar::render::TerminalRenderer;
use grid_astar::{
    heuristic, AStar, GenerateError, Grid, NoopObserver, SearchConfig, SearchError,
    SearchObserver, SearchOutcome,
};
use grid_astar_maps::MapError;
use grid_util::point::Point;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;

/// Finds a shortest path between two cells of a grid with A*.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid width, ignored when a map is loaded
    #[arg(long, default_value_t = generate::DEFAULT_WIDTH)]
    width: usize,

    /// Grid height, ignored when a map is loaded
    #[arg(long, default_value_t = generate::DEFAULT_HEIGHT)]
    height: usize,

    /// Probability of a cell being blocked
    #[arg(long, default_value_t = 0.2)]
    density: f64,

    /// Seed for obstacles and endpoints, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Load the grid from a Moving AI .map file
    #[arg(long)]
    map: Option<PathBuf>,

    /// Start cell as x,y, random when omitted
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// End cell as x,y, random when omitted
    #[arg(long, value_parser = parse_point)]
    end: Option<Point>,

    /// Smallest Manhattan distance between random endpoints
    #[arg(long, default_value_t = DEFAULT_MIN_DISTANCE)]
    min_distance: u32,

    /// Give up after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Skip the search when the endpoints lie in different components
    #[arg(long)]
    precheck: bool,

    /// Draw the frontier while searching
    #[arg(long)]
    visualize: bool,

    /// Pause between frames in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Draw every n-th expansion
    #[arg(long, default_value_t = 1)]
    stride: usize,

    /// Print every step of the path with its costs
    #[arg(long)]
    backtrack: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("could not load map: {0}")]
    Map(#[from] MapError),
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but found '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{}': {}", v, e))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

/// Keeps the given endpoints and draws only the missing ones.
fn choose_endpoints<R: Rng>(
    grid: &Grid,
    start: Option<Point>,
    end: Option<Point>,
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<(Point, Point), GenerateError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        (Some(start), None) => Ok((
            start,
            generate::random_endpoint_for(grid, start, config, rng)?,
        )),
        (None, Some(end)) => Ok((
            generate::random_endpoint_for(grid, end, config, rng)?,
            end,
        )),
        (None, None) => generate::random_endpoints(grid, config, rng),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let config = GenerateConfig {
        width: args.width,
        height: args.height,
        obstacle_density: args.density,
        min_distance: args.min_distance,
        ..GenerateConfig::default()
    };

    let grid = match &args.map {
        Some(path) => Grid::from_bool_grid(grid_astar_maps::load_map(path)?),
        None => generate::random_grid(&config, &mut rng)?,
    };
    let (start, end) = choose_endpoints(&grid, args.start, args.end, &config, &mut rng)?;

    println!("Commencing A* on a {}x{} grid", grid.width(), grid.height());
    println!("start: {}", start);
    println!("end: {}", end);
    println!("Distance between start and end: {}", heuristic(&start, &end));
    info!("Endpoints share a component: {}", grid.reachable(&start, &end));

    let mut astar = AStar::with_config(SearchConfig {
        max_expansions: args.max_expansions,
        component_precheck: args.precheck,
    });
    let mut observer: Box<dyn SearchObserver + '_> = if args.visualize {
        let mut renderer = TerminalRenderer::new(&grid, io::stdout());
        renderer.stride = args.stride;
        renderer.delay = Duration::from_millis(args.delay_ms);
        renderer.clear = args.delay_ms > 0;
        Box::new(renderer)
    } else {
        Box::new(NoopObserver)
    };
    let outcome = astar.search(&grid, start, end, observer.as_mut())?;

    match outcome {
        SearchOutcome::Found(path) => {
            println!(
                "Found path of length {} after expanding {} cells",
                path.length(),
                astar.expanded()
            );
            if args.backtrack {
                for (i, step) in path.steps().iter().rev().enumerate() {
                    println!(
                        "#{} {}: f: {}, g: {}, h: {}",
                        i, step.point, step.f, step.g, step.h
                    );
                }
            } else {
                path.report();
            }
        }
        SearchOutcome::Exhausted { expanded } => {
            println!(
                "No path from {} to {} after expanding {} cells",
                start, end, expanded
            );
        }
        SearchOutcome::Aborted { expanded } => {
            println!("Gave up after expanding {} cells", expanded);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
