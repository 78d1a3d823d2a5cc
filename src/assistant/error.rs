use thiserror::Error;

use crate::llm::GenerationError;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant reply failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Assistant returned an empty reply")]
    EmptyReply,
}
