pub mod cache;
pub mod state;

pub use cache::SourceCache;
pub use state::{default_state_path, JsonFileState, MemoryState, SessionState};
