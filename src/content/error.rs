use crate::llm::GenerationError;

/// Model output that could not be turned into the requested shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Not parseable as JSON, even after repairs
    #[error("output is not valid JSON: {0}")]
    Parse(String),

    /// Valid JSON, wrong shape
    #[error("output has the wrong shape: {0}")]
    Shape(String),
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Parse(err.to_string())
    }
}

/// Why a generator produced no result
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The completion service failed; not retried
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Every attempt produced unusable output
    #[error("no usable output after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: FormatError },
}
