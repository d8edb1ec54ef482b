//! Moving events around in the source text.
//!
//! The text is cut into blocks: a header, its detail line, and any ignored
//! lines up to the next header. Lines before the first header stay on top.
//! A header that ends the text has no detail line; when its block lands
//! before another one it gets an empty detail line, so it does not take the
//! next header as its own.

use thiserror::Error;

use crate::classify::pair_lines;

/// Errors from [`move_event`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The requested position does not name an event.
    #[error("event index {index} is out of range ({count} events)")]
    OutOfRange { index: usize, count: usize },
}

/// Moves the event at `from` so it ends up at position `to`.
///
/// Indices count events the same way the parser does. The rest of the text
/// is kept line for line.
pub fn move_event(text: &str, from: usize, to: usize) -> Result<String, MoveError> {
    let lines: Vec<&str> = text.lines().collect();
    let starts: Vec<usize> = pair_lines(&lines).iter().map(|pair| pair.header).collect();
    let count = starts.len();

    for index in [from, to] {
        if index >= count {
            return Err(MoveError::OutOfRange { index, count });
        }
    }
    if from == to {
        return Ok(text.to_string());
    }

    let mut blocks: Vec<&[&str]> = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(lines.len());
            &lines[start..end]
        })
        .collect();
    let block = blocks.remove(from);
    blocks.insert(to, block);

    let last = blocks.len() - 1;
    let mut moved: Vec<&str> = lines[..starts[0]].to_vec();
    for (position, block) in blocks.into_iter().enumerate() {
        moved.extend_from_slice(block);
        if block.len() == 1 && position < last {
            moved.push("");
        }
    }

    let mut output = moved.join("\n");
    if text.ends_with('\n') {
        output.push('\n');
    }

    tracing::debug!(from, to, "moved event");
    Ok(output)
}
