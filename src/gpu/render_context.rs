//! Opaque rendering-context handle.

/// Opaque handle to the process-wide GPU rendering session.
///
/// Created standalone (no window surface) with a required minimum OpenGL
/// version. What backs the session (driver objects, framebuffers, the
/// actual GL calls) is out of scope for the manager; it only needs
/// something it can create exactly once and hand out read-only.
#[derive(Debug)]
pub struct RenderingContext {
    version: u32,
}

impl RenderingContext {
    /// Create a standalone context requiring at least `min_version`
    /// (encoded as `major * 100 + minor * 10`, so `330` = OpenGL 3.3).
    #[must_use]
    pub(crate) fn create(min_version: u32) -> Self {
        log::info!("creating standalone rendering context (minimum GL version {min_version})");
        Self {
            version: min_version,
        }
    }

    /// The minimum OpenGL version this context was created with.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }
}
