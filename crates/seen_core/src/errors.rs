use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeenError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("log2_bits {got} outside {min}..={max}")]
    CapacityOutOfRange { got: u32, min: u32, max: u32 },

    #[error("at least one seed is required")]
    NoSeeds,

    #[error("seed {0} listed more than once")]
    DuplicateSeed(u64),
}

pub type Result<T> = std::result::Result<T, SeenError>;
