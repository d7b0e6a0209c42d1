//! `ValidatedMathFailure` (spec.md §7): a debug-time assertion that a
//! position, orientation, or velocity component never becomes NaN or
//! infinite. In a release build the offending value is still stored
//! and the anomaly is only logged — the core never aborts a tick over
//! it, and the caller remains responsible for the consequences.

/// Asserts (debug only) that `$value.is_finite()` holds, and always
/// logs a warning through the `log` facade when it doesn't.
#[macro_export]
macro_rules! debug_assert_finite {
    ($value:expr, $what:expr) => {{
        let value = $value;
        if !value.is_finite() {
            log::error!(
                target: "rigid_dynamics_core::validate",
                "{} produced a non-finite value: {:?}",
                $what,
                value
            );
            debug_assert!(false, "{} produced a non-finite value: {:?}", $what, value);
        }
    }};
}
