//! Presence-change detection for game server rosters.
//!
//! This crate turns raw observations of a server's player population into
//! join/leave transitions, given only the previously observed state. Two
//! observation shapes are supported:
//!
//! - a full roster snapshot, diffed against the last known player set
//!   ([`diff`]), and
//! - a single server log line, matched against the join/leave phrases
//!   ([`parse_line`]).
//!
//! Pure logic only: no I/O, no async, no hidden state. The caller owns the
//! known player set and threads it through every diff cycle.

mod diff;
mod parse;

pub use diff::{PlayerSet, TransitionBatch, diff};
pub use parse::{LineEvent, parse_line};
