//! # Error Types
//!
//! Domain-specific error types for cloudledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cloudledger-core errors (this file)                                   │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → UI layer message                  │
//! │                                                                         │
//! │  The UI layer owns all user-facing presentation. The core only         │
//! │  guarantees that every failure is a typed variant with enough          │
//! │  context (name, available, requested, ...) to build a message.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, bill number, ...)
//! 3. Errors are enum variants, never String
//! 4. Every failure surfaces BEFORE any state mutation

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. The ledger is guaranteed
/// unchanged whenever one is returned: validation runs to completion before
/// any stock decrement or bill append happens.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - A bill line references a product id that was never added
    /// - The product was deleted before the bill was submitted
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Insufficient stock to complete a bill under the rejecting policy.
    ///
    /// ## User Workflow
    /// ```text
    /// Submit bill (qty: 15)
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Notebook", available: 10, requested: 15 }
    ///      │
    ///      ▼
    /// UI shows: "Only 10 Notebook in stock"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A caller-supplied bill number collides with an existing bill.
    /// The caller must regenerate; the bill history is unchanged.
    #[error("Duplicate bill number: {0}")]
    DuplicateBillNumber(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
