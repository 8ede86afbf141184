//! CLI command handlers, one per file.

mod completions;
mod open;
mod push_token;
mod resolve;
mod state;

pub use completions::run_completions;
pub use open::run_open;
pub use push_token::run_push_token;
pub use resolve::run_resolve;
pub use state::run_state;
