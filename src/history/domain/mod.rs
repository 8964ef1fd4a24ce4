//! History domain types.

mod index;
mod tokens;
mod turn;

pub use index::{DayIndexEntry, HIGHLIGHT_CHARS, MAX_HIGHLIGHTS, MAX_TOPICS};
pub use tokens::{tokenize, top_topics};
pub use turn::{Turn, TurnRole};
