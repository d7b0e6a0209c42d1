//! The floating-point width the whole crate is generic over.
//!
//! Flip the `double_precision` feature to switch every `Real` in the
//! crate from `f32` to `f64`. Nothing downstream needs to change; it's
//! the same knob the teacher crate exposes for particles and bodies
//! alike.

#[cfg(not(feature = "double_precision"))]
pub type Real = f32;

#[cfg(feature = "double_precision")]
pub type Real = f64;

#[cfg(not(feature = "double_precision"))]
pub const PI: Real = std::f32::consts::PI;

#[cfg(feature = "double_precision")]
pub const PI: Real = std::f64::consts::PI;
