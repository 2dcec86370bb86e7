//! Error types for targeting, attacks, and config loading.

use bevy::prelude::Entity;
use thiserror::Error;

/// Errors raised while choosing or resolving a target.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TargetingError {
    /// The candidate list was empty.
    #[error("No candidate targets to select from")]
    NoCandidates,

    /// A listed target no longer has a transform (despawned).
    #[error("Target {0:?} has no transform")]
    StaleTarget(Entity),
}

/// Reasons a fire command is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttackError {
    /// An attack sequence is still holding the movement lock.
    #[error("An attack is already in progress")]
    AlreadyAttacking,

    /// The aim gate reports no aimable target.
    #[error("No active target to fire at")]
    NoActiveTarget,

    /// The requested cast effect is not configured.
    #[error("Cast effect {index} is not configured ({available} available)")]
    UnknownEffect { index: usize, available: usize },
}

/// Errors that can occur when loading the controller config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    Read { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// A value is out of range.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
