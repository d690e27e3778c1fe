use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter in configuration: {0}")]
    MissingParameter(String),
    #[error("Unknown type of flux scheme configured: {0}")]
    UnknownFluxScheme(String),
    #[error("Unknown type of source function configured: {0}")]
    UnknownSourceFunction(String),
    #[error("Unknown type of initial conditions configured: {0}")]
    UnknownInitialConditions(String),
    #[error("Expected a pair of numbers but found: {0}")]
    IllegalDVec2(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: String, value: f64 },
    #[error("Could not parse configuration: {0}")]
    Yaml(#[from] yaml_rust::ScanError),
    #[error("Empty configuration document")]
    EmptyDocument,
}

#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("Face {face} references cell {cell}, but the mesh only has {num_cells} cells")]
    CellOutOfRange {
        face: usize,
        cell: usize,
        num_cells: usize,
    },
    #[error("Face {face} connects cell {cell} with itself")]
    SelfConnection { face: usize, cell: usize },
    #[error("Face {face} and face {other} describe the same interface between cells {left} and {right}")]
    DuplicateFace {
        face: usize,
        other: usize,
        left: usize,
        right: usize,
    },
    #[error("Normal of face {face} is not a unit vector (length {length})")]
    NonUnitNormal { face: usize, length: f64 },
    #[error("Face {face} has invalid length {length}")]
    InvalidLength { face: usize, length: f64 },
    #[error("Cells {left} and {right} of face {face} have coinciding centroids")]
    CoincidingCentroids {
        face: usize,
        left: usize,
        right: usize,
    },
    #[error("Normal of face {face} does not point from cell {left} towards cell {right}")]
    InvertedNormal {
        face: usize,
        left: usize,
        right: usize,
    },
    #[error("Expected reconstructed states for {expected} faces, but got {found}")]
    FaceStateCount { expected: usize, found: usize },
    #[error("A periodic grid needs at least 3 cells along each axis, got {nx} x {ny}")]
    GridTooSmall { nx: usize, ny: usize },
}

/// Where a non-physical state was encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateLocation {
    Cell(usize),
    Face(usize),
}

impl std::fmt::Display for StateLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateLocation::Cell(idx) => write!(f, "cell {idx}"),
            StateLocation::Face(idx) => write!(f, "face {idx}"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FluxError {
    #[error("Non-physical state in {location}: density = {density}, pressure = {pressure}")]
    NonPhysicalState {
        location: StateLocation,
        density: f64,
        pressure: f64,
    },
    #[error("Non-finite gradients in cell {cell}")]
    NonFiniteGradients { cell: usize },
    #[error("Non-finite flux computed for face {face}")]
    NonFiniteFlux { face: usize },
}
