//! Error taxonomy for the Sylver Coinage core.
//!
//! `UnknownPosition` (the tri-valued `?` status) is deliberately *not* a
//! variant here: it's a first-class value returned by the solver, never
//! a `Result::Err`. See [`crate::status::Status::Unknown`].

use thiserror::Error;

/// Errors the core can raise. No operation in this crate panics on bad
/// input or a misbehaving backend; everything funnels through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SylverError {
    /// Seeds were empty, or contained a value less than 1.
    #[error("invalid seeds {seeds:?}: {reason}")]
    InvalidSeeds { seeds: Vec<u64>, reason: String },

    /// The underlying bit array was too small to hold the Frobenius number
    /// and the saturated tail the construction needs to be trustworthy.
    #[error("bit array of length {length} is insufficient; need at least {suggested_length}")]
    LengthError {
        length: usize,
        suggested_length: usize,
    },

    /// A status store I/O failure. The core treats a failed `get_status` as
    /// "absent" and a failed `save` as fire-and-forget (see `log::warn!`
    /// call sites in [`crate::solver`]); this variant exists so a backend
    /// can report *why*, for diagnostics, without the core ever needing to
    /// abort a solve over it.
    #[error("status store error: {0}")]
    BackendError(String),
}
