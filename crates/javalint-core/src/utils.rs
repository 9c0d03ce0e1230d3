//! Utility functions for rule implementations.

pub mod allowance;
pub mod names;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{directives_near, parse_allow_directive, AllowDirective};
#[doc(inline)]
pub use names::{qualify, simple_name};
