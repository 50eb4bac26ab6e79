//! Domain types for Capsule

mod ids;
mod memory;
mod user;

pub use ids::{MemoryId, UserId};
pub use memory::{CreateMemory, Memory, MemorySummary, UpdateMemory, EXCERPT_LENGTH};
pub use user::{NewUser, User};
