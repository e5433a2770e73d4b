//! Skybox error types.

/// Errors raised when constructing a skybox.
///
/// Construction is the only fallible operation: once a skybox exists, setter
/// calls with out-of-range values are ignored rather than reported (see
/// [`ParamUpdate`](crate::ParamUpdate)).
#[derive(Debug, thiserror::Error)]
pub enum SkyboxError {
    /// A constructor argument was non-positive (or not finite).
    #[error("skybox {name} must be positive and finite, got {value}")]
    InvalidParameter {
        /// Which parameter was rejected: "height", "radius", or "resolution".
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}
