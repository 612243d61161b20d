//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tokens`]: Token listing of the latest analysis, with lexer warnings
//! - [`tree`]: Syntax tree outline, or the parse error
//! - [`transcript`]: Report lines of every analysis so far
//! - [`input`]: The line being edited
//! - [`status`]: Status bar with keybindings and the active profile
//! - `utils`: Pane borders and the shared scrolled list
//!
//! Each pane module exports a primary `render_*()` function. Panes are
//! stateless apart from the scroll offset the caller passes in.

mod utils;

pub mod input;
pub mod status;
pub mod tokens;
pub mod transcript;
pub mod tree;

// Re-export render functions for convenience
pub use input::render_input_line;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use transcript::render_transcript_pane;
pub use tree::render_tree_pane;
