use thiserror::Error;

/// Failures surfaced by the automation primitives.
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    /// A descriptor or select request matched nothing.
    #[error("no match: {0}")]
    NoMatch(String),

    /// A bounded wait elapsed before the element reached the wanted state.
    #[error("timed out after {waited_ms}ms")]
    Timeout { waited_ms: u64 },

    /// The underlying automation primitive failed unexpectedly.
    #[error("backend error: {0}")]
    Backend(String),

    /// Capability not implemented by this surface.
    #[error("not supported: {0}")]
    NotSupported(String),
}

impl SurfaceError {
    /// True for failures that mean "this strategy does not apply here".
    ///
    /// Definitive failures let a strategy chain move to its next entry;
    /// anything else means the surface itself is unusable and must abort
    /// the calling scenario.
    pub fn is_definitive(&self) -> bool {
        matches!(
            self,
            SurfaceError::NoMatch(_) | SurfaceError::Timeout { .. }
        )
    }
}
