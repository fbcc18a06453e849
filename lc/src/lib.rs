//! LatestCell - a single-value cell that always serves the latest value
//!
//! A [`Latest`] holds exactly one value. Producers overwrite it with
//! [`Latest::put`], consumers read it with [`Latest::get`]. Reads never
//! consume the value, and a read that arrives before the first write waits
//! until that write happens.
//!
//! # Core Concepts
//!
//! - **One Owner**: A background Tokio task owns the value; every access is a
//!   message to that task, so the payload itself is never locked
//! - **Lazy Start**: The task is spawned by the first call to put, get or stop
//! - **Blocking First Read**: Get waits until a value exists
//! - **Shutdown Unblocks**: After stop, pending and new reads return `None`
//!
//! It is not a queue. A value overwritten before anyone reads it is gone.
//!
//! # Modules
//!
//! - [`cell`] - The `Latest` handle
//! - [`config`] - Channel depth configuration
//! - [`error`] - Error type
//! - [`messages`] - Requests exchanged with the coordination task

pub mod cell;
pub mod config;
mod core;
pub mod error;
pub mod messages;

// Re-export commonly used types
pub use cell::Latest;
pub use config::LatestConfig;
pub use error::{LatestError, LatestResult};
pub use messages::CellPhase;
