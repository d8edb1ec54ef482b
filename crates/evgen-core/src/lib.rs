//! Core parsing logic for evgen.
//!
//! This crate turns a typed schedule into timed events:
//! - Classification: pairing `grade | title | artist | description` header
//!   lines with the detail line that follows
//! - Recognition: reading a detail line as a date/time or a duration
//! - Resolution: placing events without a date on a running clock
//! - Reordering: moving an event's lines within the source text

mod classify;
mod parser;
pub mod recognize;
mod reorder;
mod resolve;
mod types;

pub use classify::{HeaderFields, is_header, split_header};
pub use parser::{parse, parse_at, parse_with};
pub use recognize::{DetailRecognizer, Recognition, RecognizerChain, recognize};
pub use reorder::{MoveError, move_event};
pub use resolve::{resolve_start_times, round_up_to_five_minutes};
pub use types::{
    ParseResult, ParseWarning, ParserConfig, ProvisionalEvent, Severity, ValidationError,
};
