//! Loads grids and scenarios in the [Moving AI](https://movingai.com/benchmarks/formats.html)
//! formats. A `.map` file is a short header followed by one text row per `y`, a `.map.scen` file
//! lists start/goal pairs with their expected optimal path length.
use csv::ReaderBuilder;
use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use grid_util::BoolGrid;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario error: {0}")]
    Csv(#[from] csv::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("malformed map header on line {line}: {reason}")]
    Header { line: usize, reason: String },

    #[error("map row {row} has {found} cells, expected {expected}")]
    Row {
        row: usize,
        found: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Tiles that can be walked on. Everything else is an obstacle.
const PASSABLE: [u8; 3] = [b'.', b'G', b'S'];

/// One line of a scenario file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Scenario {
    pub bucket: u32,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    /// Expected optimal path length.
    pub distance: f64,
}

impl Scenario {
    pub fn start(&self) -> Point {
        Point::new(self.x1 as i32, self.y1 as i32)
    }

    pub fn goal(&self) -> Point {
        Point::new(self.x2 as i32, self.y2 as i32)
    }
}

fn header_value(lines: &[&str], line: usize, key: &str) -> Result<usize> {
    let text = lines.get(line).ok_or_else(|| MapError::Header {
        line,
        reason: format!("missing '{}'", key),
    })?;
    match text.trim().split_once(' ') {
        Some((k, v)) if k == key => v.trim().parse::<usize>().map_err(|e| MapError::Header {
            line,
            reason: format!("invalid {}: {}", key, e),
        }),
        _ => Err(MapError::Header {
            line,
            reason: format!("expected '{} <value>', found '{}'", key, text),
        }),
    }
}

/// Parses the text of a `.map` file into a [BoolGrid] in which [true] marks a blocked cell.
pub fn parse_map(text: &str) -> Result<BoolGrid> {
    let lines: Vec<&str> = text.lines().collect();
    let h = header_value(&lines, 1, "height")?;
    let w = header_value(&lines, 2, "width")?;
    if lines.get(3).map(|l| l.trim()) != Some("map") {
        return Err(MapError::Header {
            line: 3,
            reason: "expected 'map'".to_owned(),
        });
    }

    let offset = 4;
    let mut bool_grid: BoolGrid = BoolGrid::new(w, h, false);
    for y in 0..h {
        let row: &[u8] = lines
            .get(offset + y)
            .map(|l| l.trim_end().as_bytes())
            .unwrap_or_default();
        if row.len() != w {
            return Err(MapError::Row {
                row: y,
                found: row.len(),
                expected: w,
            });
        }
        for (x, tile) in row.iter().enumerate() {
            bool_grid.set(x as i32, y as i32, !PASSABLE.contains(tile));
        }
    }
    Ok(bool_grid)
}

/// Parses the text of a `.map.scen` file. The first line holds the version and is skipped.
pub fn parse_scenarios(text: &str) -> Result<Vec<Scenario>> {
    let remaining_data = text.lines().skip(1).collect::<Vec<_>>().join("\n");
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(remaining_data.as_bytes());
    let scenarios = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<Scenario>, csv::Error>>()?;
    Ok(scenarios)
}

pub fn load_map(path: &Path) -> Result<BoolGrid> {
    debug!("Loading map {}", path.display());
    parse_map(&fs::read_to_string(path)?)
}

pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    debug!("Loading scenarios {}", path.display());
    parse_scenarios(&fs::read_to_string(path)?)
}

/// All `.map` files below `root`, sorted.
pub fn find_maps(root: &Path) -> Result<Vec<PathBuf>> {
    let mut maps = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "map") {
            maps.push(entry.into_path());
        }
    }
    maps.sort();
    Ok(maps)
}
