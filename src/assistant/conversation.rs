//! Ordered conversation history

use crate::llm::{Message, MessageRole};

/// Message history that always starts with its system message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Full history, system message first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Only the system message is present
    pub fn is_empty(&self) -> bool {
        self.messages.len() <= 1
    }

    pub fn system_message(&self) -> &Message {
        &self.messages[0]
    }

    /// Context for the next turn: the history plus `user_text`
    ///
    /// The stored history is not modified; call `commit` once the reply is in.
    pub fn staged(&self, user_text: &str) -> Vec<Message> {
        let mut context = Vec::with_capacity(self.messages.len() + 1);
        context.extend(self.messages.iter().cloned());
        context.push(Message::user(user_text));
        context
    }

    /// Record a completed turn
    pub fn commit(&mut self, user_text: &str, reply: &str) {
        self.messages.push(Message::user(user_text));
        self.messages.push(Message::assistant(reply));
    }

    /// Drop every turn, keeping the system message
    pub fn clear(&mut self) {
        self.messages.truncate(1);
        debug_assert_eq!(self.messages[0].role, MessageRole::System);
    }
}
