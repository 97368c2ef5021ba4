//! Per-user conversation state.
//!
//! A [`Session`] holds the index questions are answered against and the turns
//! exchanged so far. It is owned by the caller and passed into the pipeline
//! explicitly.

use crate::chat::Role;
use crate::error::{Result, VidaskError};
use crate::indexer::BuiltIndex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One message of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Current index and conversation history.
#[derive(Debug, Default)]
pub struct Session {
    index: Option<Arc<BuiltIndex>>,
    history: Vec<ConversationTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index to answer against.
    pub fn index(&self) -> Result<&Arc<BuiltIndex>> {
        self.index.as_ref().ok_or(VidaskError::IndexNotBuilt)
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Replace the current index wholesale.
    pub fn set_index(&mut self, index: Arc<BuiltIndex>) {
        self.index = Some(index);
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Record a question and its outcome.
    ///
    /// A failed answer is stored as `"Error: <message>"` so the conversation
    /// stays usable. Returns the text recorded for the assistant.
    pub fn record_exchange(
        &mut self,
        question: &str,
        outcome: std::result::Result<&str, &VidaskError>,
    ) -> String {
        let reply = match outcome {
            Ok(answer) => answer.to_string(),
            Err(e) => format!("Error: {}", e),
        };

        self.history.push(ConversationTurn {
            role: Role::User,
            content: question.to_string(),
        });
        self.history.push(ConversationTurn {
            role: Role::Assistant,
            content: reply.clone(),
        });

        reply
    }

    /// Forget the index and the history.
    pub fn clear(&mut self) {
        self.index = None;
        self.history.clear();
    }
}
