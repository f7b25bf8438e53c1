use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("meter size {requested} is out of range (0, {max}]")]
    MeterSize { requested: f32, max: f32 },

    #[error("unknown texture filter '{0}', expected 'linear' or 'nearest'")]
    FilterMode(String),

    #[error("unknown asset scope '{0}', expected 'i' or 'e'")]
    AssetScope(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("invalid motion type '{0}', expected 'd', 's' or 'k'")]
    InvalidMotionType(String),

    #[error("unknown regular polygon '{0}'")]
    UnknownShape(String),

    #[error("at least one vertex is required")]
    EmptyInput,

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("a polygon takes at most {max} vertices, got {count}")]
    TooManyVertices { count: usize, max: usize },

    #[error("combine needs at least one body")]
    EmptyCombine,

    #[error("no live actor with id {0}")]
    UnknownActor(u64),

    #[error("failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },
}
