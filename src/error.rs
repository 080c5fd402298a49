use grid_util::point::Point;
use thiserror::Error;

/// Why an endpoint was rejected before the search started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Blocked,
}

impl std::fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointFault::OutOfBounds => write!(f, "out of bounds"),
            EndpointFault::Blocked => write!(f, "blocked"),
        }
    }
}

/// Errors surfaced by the search engine and its building blocks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Extraction was attempted on an empty frontier.
    #[error("attempted to extract from an empty frontier")]
    EmptyFrontier,

    /// The frontier ran dry without reaching the goal.
    #[error("no path found after expanding {expanded} cells")]
    NoPathFound { expanded: usize },

    /// Start or goal can not be used as an endpoint.
    #[error("invalid endpoint {point}: {fault}")]
    InvalidEndpoint { point: Point, fault: EndpointFault },

    /// The configured expansion budget ran out before the search finished.
    #[error("expansion budget exhausted after {expanded} cells")]
    BudgetExhausted { expanded: usize },

    /// A cell left the frontier without a cost record of the current run.
    #[error("cell {cell} was expanded without a cost record")]
    MissingCost { cell: usize },
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors of the random grid and endpoint generators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("obstacle density {0} is not within [0, 1]")]
    InvalidDensity(f64),

    #[error("grid of {width}x{height} cells has no room for endpoints")]
    EmptyGrid { width: usize, height: usize },

    #[error("no open endpoints at least {min_distance} apart found in {attempts} attempts")]
    NoEndpoints { min_distance: u32, attempts: usize },
}
