//! Append-only conversation memory, scoped to one agent for one run

use accesspipe_llm::ChatTurn;

/// Ordered turn history supplied back to the model on each call.
/// Exclusively owned by one `PipelineAgent`; never shared across
/// agents or across pipeline runs.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    turns: Vec<ChatTurn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
