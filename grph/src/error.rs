//! Error taxonomy for the codec.
//!
//! Every failure is terminal for the run: callers print the message and
//! exit. Parse-side variants carry the 1-based physical line of the
//! offending input; binary-side variants name the field being read.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {msg}")]
    Parse { line: u64, msg: &'static str },

    #[error("line {line}: {what} out of range")]
    Overflow { line: u64, what: &'static str },

    #[error("bad header: {0}")]
    BadHeader(&'static str),

    #[error("unexpected end of input reading {0}")]
    UnexpectedEof(&'static str),

    #[error("varint runs past 64 bits")]
    MalformedVarint,

    #[error("corrupt identifier mapping: {0}")]
    CorruptMapping(&'static str),

    #[error("corrupt adjacency section: {0}")]
    CorruptAdjacency(&'static str),

    #[error("corrupt loop section: {0}")]
    CorruptLoops(&'static str),

    #[error("internal error: {0}")]
    Internal(&'static str),
}
