//! Infrastructure Layer
//!
//! Database and in-process store implementations.

pub mod memory;
pub mod sqlite;

pub use memory::MemorySessionRepository;
pub use sqlite::SqliteAuthRepository;
