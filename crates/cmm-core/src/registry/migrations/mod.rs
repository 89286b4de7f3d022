//! Registry row operations, split into reads and writes.

mod read;
mod write;
