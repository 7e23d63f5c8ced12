//! Configuration structures for bundling operations.
//!
//! The configuration is built once via [`ConfigBuilder`], validated before
//! the pipeline starts, and immutable thereafter.

mod builder;
mod core;
mod platform;
mod source;

// Re-export all public types
pub use builder::ConfigBuilder;
pub use core::Config;
pub use platform::{Platform, WordSize};
pub use source::RuntimeSource;
