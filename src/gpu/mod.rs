//! GPU-facing resources owned by the render manager.
//!
//! Everything here is an opaque handle: the manager only needs objects it
//! can create once and hand out for the rest of the process.

/// Shader and texture reuse pools.
pub mod pools;
/// Opaque rendering-context handle.
pub mod render_context;
