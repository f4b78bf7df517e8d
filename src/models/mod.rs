pub mod entry;
pub mod visited;

pub use entry::*;
pub use visited::*;

/// Titles starting with this token are replies to an earlier message
pub const REPLY_PREFIX: &str = "Re:";
