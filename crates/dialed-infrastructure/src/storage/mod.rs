//! File primitives shared by the stores.

mod atomic_file;

pub use atomic_file::{AtomicFile, AtomicJsonFile, FileLock};
