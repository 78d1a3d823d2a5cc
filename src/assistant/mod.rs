//! Tutoring chat with per-session conversation history

mod conversation;
mod error;
mod prompt;
mod session;

pub use conversation::Conversation;
pub use error::AssistantError;
pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use session::{SessionHandle, SessionId, SessionStore, DEFAULT_SESSION};

use crate::llm::{GenerateRequest, GenerationConfig, Message, TextCompletionClient};

pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Educational chat assistant
///
/// A turn is staged against a copy of the history and only committed once
/// the model has produced a non-empty reply, so a failed turn leaves the
/// conversation exactly as it was.
pub struct EducationalAssistant {
    client: TextCompletionClient,
    sessions: SessionStore,
}

impl EducationalAssistant {
    pub fn new(client: TextCompletionClient, system_prompt: impl Into<String>) -> Self {
        Self {
            client,
            sessions: SessionStore::new(system_prompt),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Run one turn and return the assistant's reply
    ///
    /// A session that ends up without turns is not kept.
    pub async fn send(
        &self,
        session: SessionId,
        text: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, AssistantError> {
        let result = self.run_turn(session, text, temperature, max_tokens).await;
        if result.is_err() {
            self.sessions.release(session);
        }
        result
    }

    async fn run_turn(
        &self,
        session: SessionId,
        text: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, AssistantError> {
        let handle = self.sessions.session(session);
        // Held until the turn is committed or abandoned
        let mut conversation = handle.lock().await;

        let request = GenerateRequest {
            messages: conversation.staged(text),
            config: GenerationConfig::new(max_tokens)
                .with_temperature(temperature)
                .with_top_p(1.0),
        };
        tracing::debug!(
            session = %session,
            context = request.messages.len(),
            "sending assistant turn"
        );

        let reply = self.client.complete(request).await?;
        if reply.trim().is_empty() {
            tracing::warn!(session = %session, "assistant reply was empty");
            return Err(AssistantError::EmptyReply);
        }

        conversation.commit(text, &reply);
        tracing::info!(session = %session, history = conversation.len(), "assistant turn committed");
        Ok(reply)
    }

    /// Reset a session to its system message and close it
    ///
    /// Waits for any in-flight turn of the same session.
    pub async fn clear(&self, session: SessionId) {
        if let Some(handle) = self.sessions.existing(session) {
            handle.lock().await.clear();
            tracing::info!(session = %session, "conversation cleared");
        }
        self.sessions.release(session);
    }

    /// Snapshot of a session's history; unused sessions report only the system message
    pub async fn history(&self, session: SessionId) -> Vec<Message> {
        let messages = match self.sessions.existing(session) {
            Some(handle) => handle.lock().await.messages().to_vec(),
            None => return vec![Message::system(self.sessions.system_prompt())],
        };
        self.sessions.release(session);
        messages
    }
}
