//! Game server presence watcher.
//!
//! Watches a remote multiplayer server's player roster and announces joins
//! and leaves to a chat webhook. Two acquisition strategies feed the same
//! core contract: periodic roster polling diffed against the last known
//! player set, or a server-sent-event log stream matched line by line. One
//! strategy is active per running instance.

pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod session;
pub mod watch;

pub use error::{Error, Result};
