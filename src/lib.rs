// src/lib.rs

//! relic — event data model converter
//!
//! Converts one event's worth of collection-based physics event data from a
//! runtime-typed legacy model into a statically-typed native model.
//!
//! # Architecture
//!
//! - Two-phase conversion: the first pass creates every native record and
//!   files source→target identity correspondences in an explicit resolution
//!   state; the second pass rewrites every reference placeholder through
//!   that state, so records may freely reference records that are converted
//!   later.
//! - Deferred materialization: subset views and generic relation
//!   collections are queued during the first pass and only filled /
//!   synthesized once all owning collections exist.
//! - Best-effort per collection: a missing, malformed or rejected
//!   collection is logged and skipped; the rest of the event converts.

pub mod convert;
mod error;
pub mod legacy;
pub mod mapping;
pub mod native;

pub use convert::{ConversionSummary, EventConverter, ResolutionState};
pub use error::{Error, Result};
pub use mapping::{ConverterConfig, NameMapping};
