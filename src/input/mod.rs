//! Input module for host touch delivery
//!
//! Reads touch batches from outside the process and serializes them into
//! the single dispatcher queue.

mod reader;

pub use reader::{parse_batch, InputError, InputReader};
