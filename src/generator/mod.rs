pub mod random;
pub mod sentences;
pub mod sourcing;
pub mod themes;

pub use random::{pick_many, pick_random};
pub use sentences::{extract_sentences, pick_random_sentence};
pub use sourcing::generate;
pub use themes::load_theme;
