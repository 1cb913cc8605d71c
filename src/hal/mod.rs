//! Display implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`].
//!
//! # Available Implementations
//!
//! - `mock`: Test implementation that records every row write
//! - `console`: Terminal-drawn panel for desktop runs (requires `std` feature)

pub mod mock;

#[cfg(feature = "std")]
pub mod console;

pub use mock::*;

#[cfg(feature = "std")]
pub use console::*;
