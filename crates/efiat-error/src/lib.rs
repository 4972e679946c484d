//! # eFiat Error
//!
//! Unified error type for the eFiat dApp client. Every crate in the workspace
//! reports failures through [`EfiatError`] so the browser host can decide in one
//! place whether an error is shown to the user, logged, or fatal.
//!
//! ## Error Categories
//!
//! - Startup errors: [`EfiatError::Fetch`], [`EfiatError::Config`],
//!   [`EfiatError::ViewBinding`]
//! - Contract errors: [`EfiatError::Address`], [`EfiatError::Abi`],
//!   [`EfiatError::RemoteCall`]
//! - User input errors: [`EfiatError::Validation`],
//!   [`EfiatError::InsufficientBalance`]
//!
//! ## Example
//!
//! ```
//! use efiat_error::{EfiatError, Result};
//!
//! fn require_amount(raw: &str) -> Result<&str> {
//!     if raw.trim().is_empty() {
//!         return Err(EfiatError::Validation("enter deposit amount value!".to_string()));
//!     }
//!     Ok(raw)
//! }
//!
//! assert!(require_amount("").unwrap_err().is_user_facing());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for eFiat operations.
#[derive(Error, Debug)]
pub enum EfiatError {
    // ============ Startup Errors ============
    /// A contract descriptor could not be fetched or is malformed
    #[error("Failed to load descriptor '{location}': {reason}")]
    Fetch {
        /// Location the descriptor was fetched from
        location: String,
        /// Reason for the failure
        reason: String,
    },

    /// Invalid application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more DOM elements the page must provide are missing
    #[error("Missing page elements: {0}")]
    ViewBinding(String),

    // ============ Contract Errors ============
    /// The contract has no usable deployment address
    #[error("No deployment address for {contract}: {reason}")]
    Address {
        /// Contract the proxy was built for
        contract: String,
        /// Reason the address is unusable
        reason: String,
    },

    /// ABI lookup, encoding or decoding failed
    #[error("ABI error: {0}")]
    Abi(String),

    /// A call through the wallet provider was rejected
    #[error("Remote call failed: {method} - {reason}")]
    RemoteCall {
        /// Method or RPC name that failed
        method: String,
        /// Error reason reported by the wallet or node
        reason: String,
    },

    // ============ User Input Errors ============
    /// Missing or invalid user input
    #[error("{0}")]
    Validation(String),

    /// Requested amount exceeds the available balance
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Available balance (in base units)
        have: String,
        /// Requested amount (in base units)
        need: String,
    },

    // ============ Parsing Errors ============
    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(String),

    // ============ Generic ============
    /// Unknown/other error
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type using EfiatError
pub type Result<T> = std::result::Result<T, EfiatError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Adds context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;

    /// Adds context using a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: std::error::Error> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| EfiatError::Other(format!("{}: {}", ctx.into(), e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| EfiatError::Other(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| EfiatError::Other(ctx.into()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.ok_or_else(|| EfiatError::Other(f()))
    }
}

// ============ From implementations for common error types ============

impl From<serde_json::Error> for EfiatError {
    fn from(err: serde_json::Error) -> Self {
        EfiatError::Json(err.to_string())
    }
}

impl From<std::num::ParseIntError> for EfiatError {
    fn from(err: std::num::ParseIntError) -> Self {
        EfiatError::Validation(err.to_string())
    }
}

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum ErrorCode {
    /// Unknown error
    Unknown = 0,
    /// Descriptor fetch error
    Fetch = 1001,
    /// Configuration error
    Config = 1002,
    /// Missing page element
    ViewBinding = 1003,
    /// Missing or invalid deployment address
    Address = 2001,
    /// ABI error
    Abi = 2002,
    /// Remote call rejected
    RemoteCall = 3001,
    /// Invalid user input
    Validation = 4001,
    /// Insufficient balance
    InsufficientBalance = 4002,
    /// JSON error
    Json = 5001,
}

impl EfiatError {
    /// Returns the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            EfiatError::Fetch { .. } => ErrorCode::Fetch,
            EfiatError::Config(_) => ErrorCode::Config,
            EfiatError::ViewBinding(_) => ErrorCode::ViewBinding,
            EfiatError::Address { .. } => ErrorCode::Address,
            EfiatError::Abi(_) => ErrorCode::Abi,
            EfiatError::RemoteCall { .. } => ErrorCode::RemoteCall,
            EfiatError::Validation(_) => ErrorCode::Validation,
            EfiatError::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
            EfiatError::Json(_) => ErrorCode::Json,
            EfiatError::Other(_) => ErrorCode::Unknown,
        }
    }

    /// Returns true if this error is reported to the user through an alert
    /// rather than only logged
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EfiatError::Validation(_) | EfiatError::InsufficientBalance { .. }
        )
    }

    /// Returns true if this error halts application startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EfiatError::Fetch { .. }
                | EfiatError::Address { .. }
                | EfiatError::Config(_)
                | EfiatError::ViewBinding(_)
        )
    }

    /// Shorthand for a rejected remote call
    pub fn remote(method: impl Into<String>, reason: impl ToString) -> Self {
        EfiatError::RemoteCall {
            method: method.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a descriptor fetch failure
    pub fn fetch(location: impl Into<String>, reason: impl ToString) -> Self {
        EfiatError::Fetch {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
