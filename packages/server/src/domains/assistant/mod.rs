//! Assistant domain - DeSci research Q&A backed by the language model.

use anyhow::Result;
use std::sync::Arc;

use crate::kernel::{BaseAI, ChatMessage, ChatRole};

const SYSTEM_PROMPT: &str = "You are a helpful research assistant specializing in decentralized science (DeSci) and blockchain applications in scientific research.

Your knowledge includes:
- How blockchain technology is transforming scientific research
- Decentralized funding mechanisms for science
- Open access publishing and data sharing
- Scientific reproducibility and verification using blockchain
- DeSci projects and initiatives
- Hetu Protocol and its applications in DeSci

Provide accurate, informative, and helpful responses. If you don't know something, admit it rather than making up information.";

pub const NO_ANSWER: &str = "I apologize, but I could not generate a response.";

/// Earlier turns beyond this are dropped, oldest first.
pub const MAX_HISTORY_MESSAGES: usize = 20;

#[derive(Clone)]
pub struct ResearchAssistant {
    ai: Arc<dyn BaseAI>,
}

impl ResearchAssistant {
    pub fn new(ai: Arc<dyn BaseAI>) -> Self {
        Self { ai }
    }

    /// Answer `question` in the context of the earlier conversation.
    ///
    /// Client-supplied system messages are ignored; the instruction preamble
    /// is always ours.
    pub async fn ask(&self, question: &str, history: &[ChatMessage]) -> Result<String> {
        let mut messages = trim_history(history);
        messages.push(ChatMessage::user(question));

        let answer = self.ai.complete(SYSTEM_PROMPT, &messages).await?;
        let answer = answer.trim();

        tracing::debug!(
            history = messages.len() - 1,
            answer_length = answer.len(),
            "Research assistant answered"
        );

        if answer.is_empty() {
            Ok(NO_ANSWER.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

fn trim_history(history: &[ChatMessage]) -> Vec<ChatMessage> {
    let turns: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| matches!(m.role, ChatRole::User | ChatRole::Assistant))
        .collect();
    let skip = turns.len().saturating_sub(MAX_HISTORY_MESSAGES);
    turns.into_iter().skip(skip).cloned().collect()
}
