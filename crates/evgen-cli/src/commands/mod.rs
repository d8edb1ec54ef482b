//! CLI subcommand implementations.

pub mod export;
pub mod preview;
pub mod reorder;
pub mod util;
