//! Caller-facing error taxonomy (spec.md §7).
//!
//! `ValidatedMathFailure` and the `AdaptiveInvert` singular-matrix case
//! are deliberately absent here: the former is a debug-only assertion
//! (see [`crate::debug_assert_finite`]) and the latter never fails by
//! contract (`Mat3::adaptive_invert`).

use crate::precision::Real;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    /// Raised by `becomeDynamic` when handed a non-positive or
    /// non-finite mass. The body's state is left unchanged.
    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(Real),

    /// Raised by a [`crate::joint_basis`] axis setter when the supplied
    /// axes are not mutually orthogonal within `BIG_EPSILON`.
    #[error("joint basis axes are not mutually orthogonal (max |dot| = {0})")]
    NonOrthogonalBasis(Real),

    /// Raised when a broad-phase collaborator hands a pair handler a
    /// value it doesn't know how to interpret. The pair handler is
    /// left uninitialized.
    #[error("unexpected value handed to a pair handler: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
