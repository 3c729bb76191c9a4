//! covset core - bounded coverage record sets
//!
//! This crate provides:
//! - Hash-identified coverage records
//! - A size-bounded, deduplicated record set with FIFO eviction
//! - Non-fatal collision signals for resolved duplicates
//! - JSON and MessagePack encodings of the record list

pub mod codec;
pub mod config;
pub mod error;
pub mod record;
pub mod set;
pub mod signal;

pub use codec::Codec;
pub use config::RecordSetConfig;
pub use error::{Error, ErrorKind, Result};
pub use record::Record;
pub use set::RecordSet;
pub use signal::CollisionSignal;
