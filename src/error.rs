
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreezeError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Grammar error in statement: {statement}")]
    Grammar { statement: String },
    #[error("Arity error: {0}")]
    Arity(String),
    #[error("Argument type error: expected {expected}, got '{token}'")]
    ArgumentType {
        token: String,
        expected: &'static str,
    },
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, BreezeError>;

// Helper conversions
impl From<std::io::Error> for BreezeError {
    fn from(e: std::io::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}
impl From<serde_json::Error> for BreezeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}
