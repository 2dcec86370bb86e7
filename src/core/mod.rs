//! Core module - states, events, frame input, and shared error types.
//!
//! This module provides the foundation that all other archer systems build upon.

mod error;
mod events;
mod frame;
mod plugin;
mod states;
mod tween;

pub use error::*;
pub use events::*;
pub use frame::*;
pub use plugin::{ArcherSet, CorePlugin};
pub use states::*;
pub use tween::*;
