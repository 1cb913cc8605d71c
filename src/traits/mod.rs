//! Trait definitions for the panel's external collaborators.
//!
//! # Submodules
//!
//! - `display`: Row-addressed character display
//!
//! The filter never talks to hardware directly. It renders rows and writes
//! them through a [`CharacterDisplay`], so the same logic drives a real LCD,
//! the console simulator, or the test mock.

pub mod display;

pub use display::*;
