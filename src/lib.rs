//! Fixed-capacity circular FIFO queue, plus the script replay, config and
//! op-log plumbing used by the `circq` binary.

pub mod config;
pub mod error;
pub mod queue;
pub mod script;
pub mod util;

pub use error::{Operation, QueueError};
pub use queue::BoundedQueue;
