//! Capsule Core
//!
//! Platform-agnostic domain types, the storage contract, and error handling
//! for Capsule.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Memory`, `MemorySummary` and their identifiers
//! - **Core Traits**: `Storage`, the persistence contract used by the server
//! - **Error Handling**: Unified `CapsuleError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use capsule_core::types::MemorySummary;
//!
//! let summary = MemorySummary::excerpt_of("A day at the beach");
//! assert_eq!(summary, "A day at the beach...");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{CapsuleError, Result};
pub use storage::Storage;

pub use types::{
    CreateMemory, Memory, MemoryId, MemorySummary, NewUser, UpdateMemory, User, UserId,
};
