//! Core type definitions for cardex

mod candidate;
mod digest;
mod error;
mod outcome;

pub use candidate::CandidateFile;
pub use digest::ContentDigest;
pub use error::ExportError;
pub use outcome::{RunOutcome, RunStatus};
