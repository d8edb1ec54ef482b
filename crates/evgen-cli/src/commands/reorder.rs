//! Move command: reorders events in the schedule text.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::util::position_to_index;

/// Moves the event at 1-based position `from` to position `to`.
///
/// The result is written back to `in_place` when given, otherwise to `writer`.
pub fn run<W: Write>(
    writer: &mut W,
    text: &str,
    from: usize,
    to: usize,
    in_place: Option<&Path>,
) -> Result<()> {
    let moved = evgen_core::move_event(
        text,
        position_to_index(from, "from")?,
        position_to_index(to, "to")?,
    )?;

    match in_place {
        Some(path) => std::fs::write(path, &moved)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => write!(writer, "{moved}")?,
    }

    Ok(())
}
