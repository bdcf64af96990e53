//! ZQLZ Core - Core abstractions and traits for the database IDE
//!
//! This crate provides the fundamental traits and types that all other
//! ZQLZ crates depend on. It defines:
//!
//! - `DataSource` - Trait describing a connected target database
//! - `TargetEntity` - A transfer target, optionally able to toggle referential integrity
//! - `DialectRegistry` - SQL dialect profiles, including insert/replace methods
//! - `ProgressMonitor` - Cancellable progress handle for background work
//! - `ZqlzError` and the crate-wide `Result` alias

mod data_source;
pub mod dialects;
mod error;
mod progress;
mod target;

pub use data_source::*;
pub use dialects::{DIALECT_REGISTRY, DialectProfile, DialectRegistry, InsertReplaceMethod};
pub use error::*;
pub use progress::*;
pub use target::*;
