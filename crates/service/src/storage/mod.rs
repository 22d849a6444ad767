//! Storage abstractions for the record stores
//!
//! Every operation reads the full backing file, mutates in memory and rewrites the
//! full file. There is no locking: two processes (or threads) mutating the same file
//! concurrently will lose updates, because the last full overwrite wins. Writes are
//! plain overwrites, not atomic renames, so an I/O failure mid-write can leave the
//! file truncated.

pub mod json_map_store;
