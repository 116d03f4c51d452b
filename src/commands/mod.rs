pub mod completions;
pub mod rank;

pub use completions::generate_completions;
pub use rank::rank_command;
