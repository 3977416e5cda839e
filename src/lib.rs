// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Single-instance static classes and the process-wide rendering resources
//! they guard.
//!
//! OpenGL's global-state nature means a process gets exactly one rendering
//! context and one set of resource pools. This crate enforces that at the
//! type level: a static class (a namespace-like holder of process-wide
//! state, never instantiated) is materialized at most once per process,
//! however many times its declaration runs.
//!
//! # Key entry points
//!
//! - [`singleton::SingleInstancePolicy`] - the per-family materialization
//!   guard
//! - [`manager::RenderManager`] - the static facade owning the rendering
//!   context plus the shader and texture pools
//! - [`config::GlobalConfig`] - global settings read once at manager
//!   materialization
//!
//! # Architecture
//!
//! Each static-class family owns one policy. The first declaration through
//! a policy materializes the class and runs its one-time initializer
//! synchronously; every later declaration emits a warning on the `log`
//! channel and is aliased to the original. [`manager::RenderManager`] is
//! built on exactly this mechanism: its initializer declares
//! [`config::GlobalConfig`] (through a private, block-scoped policy),
//! creates the rendering context at the configured OpenGL version, and
//! constructs both pools, all before any accessor can observe them.

pub mod config;
pub mod error;
pub mod gpu;
pub mod manager;
pub mod singleton;
