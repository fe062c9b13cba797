use tracing::debug;

use crate::models::{Message, Turn};

/// Folds adjacent messages with the same speaker and addressee into turns.
///
/// Every message lands in exactly one turn and order is preserved. Only
/// neighbours merge: a speaker returning later to the same addressee starts a
/// new turn.
#[must_use]
pub fn segment(messages: &[Message]) -> Vec<Turn> {
    let mut turns = Vec::<Turn>::new();
    for message in messages {
        if let Some(current) = turns.last_mut().filter(|turn| turn.accepts(message)) {
            current.absorb(message);
            continue;
        }
        turns.push(Turn::from_message(message));
    }
    debug!(
        messages = messages.len(),
        turns = turns.len(),
        "segmented conversation"
    );
    turns
}
