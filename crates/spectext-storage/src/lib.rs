//! Storage abstraction for the spectext aggregator.
//!
//! This crate provides a [`Storage`] trait for abstracting document lookup and content
//! retrieval from the underlying storage backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between navigation/aggregation logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()` and `exists()` methods
//! - [`FsStorage`] implementation rooted at a project directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use spectext_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("."));
//! if storage.exists("docs/specification/2025-06-18/index.mdx") {
//!     let content = storage.read("docs/specification/2025-06-18/index.mdx")?;
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
