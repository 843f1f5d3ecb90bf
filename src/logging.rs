//! Structured log record for decoded responses.
//!
//! # Properties
//!
//! - Borrows from the `TpmError` it describes
//! - No heap allocation in accessors or in `write_to`
//! - One line per record, stable field order
//!
//! The crate does not pick a logging framework. Callers hand the record to
//! whatever sink they use, either through `write_to` or by reading fields.
//!
//! ```rust
//! use tpm2_rc::{decode, ResponseCode};
//!
//! let err = decode(ResponseCode::new(0x98E)).unwrap();
//! let mut line = String::new();
//! err.internal_log().write_to(&mut line).unwrap();
//!
//! assert_eq!(
//!     line,
//!     "[TPM-SESSION] code=0xe slot=1 description='the authorization HMAC check failed and DA counter incremented'"
//! );
//! ```

use crate::codes::SlotIndex;
use crate::models::{ResponseKind, TpmError};
use std::fmt;

/// Structured log entry with borrowed data from a `TpmError`.
///
/// The lifetime ties the record to the error that produced it.
#[derive(Debug, Clone, Copy)]
pub struct ResponseLog<'a> {
    error: &'a TpmError,
}

impl<'a> ResponseLog<'a> {
    /// Get the response kind.
    #[inline]
    pub fn kind(&self) -> ResponseKind {
        self.error.kind()
    }

    /// Get the numeric code (raw response for vendor and legacy kinds).
    #[inline]
    pub fn code(&self) -> u32 {
        self.error.code()
    }

    /// Get the slot index for scoped kinds.
    #[inline]
    pub fn slot(&self) -> Option<SlotIndex> {
        self.error.slot()
    }

    /// Get the table description, `None` for kinds without a table.
    ///
    /// Table misses yield the `"unknown error code"` fallback.
    #[inline]
    pub fn description(&self) -> Option<&'static str> {
        if self.kind().has_table() {
            Some(self.error.describe())
        } else {
            None
        }
    }

    /// Get the error this record borrows from.
    #[inline]
    pub fn error(&self) -> &'a TpmError {
        self.error
    }

    /// Write the record to a formatter without allocating.
    ///
    /// Format: `[<TAG>] code=0x<hex>[ slot=<n>][ description='<text>']`
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "[{}] code=0x{:x}", self.kind().log_tag(), self.code())?;

        if let Some(slot) = self.slot() {
            write!(f, " slot={}", slot)?;
        }

        if let Some(description) = self.description() {
            write!(f, " description='{}'", description)?;
        }

        Ok(())
    }
}

impl fmt::Display for ResponseLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl TpmError {
    /// Create a structured log record borrowing from this error.
    #[inline]
    pub fn internal_log(&self) -> ResponseLog<'_> {
        ResponseLog { error: self }
    }

    /// Callback-style access to the log record.
    ///
    /// ```rust
    /// # use tpm2_rc::{TpmError, WarningCode};
    /// let err = TpmError::Warning(WarningCode::TESTING);
    /// let tag = err.with_internal_log(|log| log.kind().log_tag());
    /// assert_eq!(tag, "TPM-WARN");
    /// ```
    #[inline]
    pub fn with_internal_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ResponseLog<'_>) -> R,
    {
        let log = self.internal_log();
        f(&log)
    }
}
