//! Common error infrastructure for castle-core.
//!
//! This module provides shared types and traits used across all error types in castle-core.
//! Domain-specific errors (e.g., `MoveError`, `AttackError`) are defined in their
//! respective modules alongside the actions or types they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each action has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Silent gameplay failures**: Walking into a wall is an outcome, not an error

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed later or with another command
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Caller precondition violations or corrupted game state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or pick another command.
    ///
    /// Examples: moving during an encounter, using a spent key
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: weapon with inverted damage range, unknown room reference
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: player standing in a room that is not on the map
    Internal,

    /// Fatal error - the caller broke a precondition or the state is corrupted.
    ///
    /// Examples: using an item from an empty inventory
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug in the engine or its caller.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all castle-core errors.
///
/// This trait provides a uniform interface for error classification across
/// all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, log filtering, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
