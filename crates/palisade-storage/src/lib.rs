//! # palisade-storage
//!
//! Storage layer for palisade using RocksDB.
//!
//! This crate provides the embedded key-value store wrapper, atomic write
//! batches, and the entity key encoding shared by every record namespace.

#![warn(clippy::all)]

pub mod errors;
pub mod keys;
pub mod rocksdb_impl;

pub use errors::{Result, StorageError};
pub use keys::*;
pub use rocksdb_impl::{KvBatch, KvStore};
