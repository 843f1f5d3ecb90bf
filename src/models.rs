//! Decoded response taxonomy.
//!
//! # Architecture
//!
//! Every non-zero response code decodes to exactly one [`TpmError`] variant.
//! Success is never an error value: it is `None` from [`crate::decode`] or
//! `Ok(())` from [`crate::decode_response`], so callers can propagate
//! failures with `?` and treat absence as success.
//!
//! | Variant     | Carries                          | Table              |
//! |-------------|----------------------------------|--------------------|
//! | `Legacy`    | full raw code                    | none               |
//! | `General`   | `Fmt0Code`                       | format 0           |
//! | `Vendor`    | full raw code                    | none               |
//! | `Warning`   | `WarningCode`                    | warning            |
//! | `Parameter` | `Fmt1Code` + parameter index     | format 1           |
//! | `Handle`    | `Fmt1Code` + handle index        | format 1           |
//! | `Session`   | `Fmt1Code` + session index       | format 1           |
//!
//! # Classification vs. Policy
//!
//! The taxonomy distinguishes shapes, not outcomes. A warning is not
//! automatically retryable; callers decide from the specific code (for
//! example [`WarningCode::YIELDED`] or [`WarningCode::RETRY`]).
//!
//! # Copy Semantics
//!
//! `TpmError` is `Copy`: it is a handful of bytes with no owned data, and
//! decoding the same input twice yields equal values.

use crate::codes::{Fmt0Code, Fmt1Code, ResponseCode, SlotIndex, UNKNOWN_CODE, WarningCode};
use std::fmt;

// ============================================================================
// Response Kind
// ============================================================================

/// Discriminant of a decoded response, for programmatic inspection.
///
/// Declaration order is the order used by journal summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResponseKind {
    /// Bits 7-8 clear: TPM 1.2 numbering, not decoded further.
    Legacy,
    /// Format 0 error not tied to a command field.
    General,
    /// Vendor-defined code, not decoded.
    Vendor,
    /// Format 0 warning.
    Warning,
    /// Format 1 error on a command parameter.
    Parameter,
    /// Format 1 error on a command handle.
    Handle,
    /// Format 1 error on an authorization session.
    Session,
}

impl ResponseKind {
    /// All kinds in declaration order.
    pub const ALL: [ResponseKind; 7] = [
        Self::Legacy,
        Self::General,
        Self::Vendor,
        Self::Warning,
        Self::Parameter,
        Self::Handle,
        Self::Session,
    ];

    /// Human-readable name.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Legacy => "Legacy",
            Self::General => "General",
            Self::Vendor => "Vendor",
            Self::Warning => "Warning",
            Self::Parameter => "Parameter",
            Self::Handle => "Handle",
            Self::Session => "Session",
        }
    }

    /// Short tag for structured log lines.
    #[inline]
    pub const fn log_tag(&self) -> &'static str {
        match self {
            Self::Legacy => "TPM-LEGACY",
            Self::General => "TPM-FMT0",
            Self::Vendor => "TPM-VENDOR",
            Self::Warning => "TPM-WARN",
            Self::Parameter => "TPM-PARAM",
            Self::Handle => "TPM-HANDLE",
            Self::Session => "TPM-SESSION",
        }
    }

    /// Check if this kind names a command field (format 1).
    #[inline]
    pub const fn is_scoped(&self) -> bool {
        matches!(self, Self::Parameter | Self::Handle | Self::Session)
    }

    /// Check if this kind has a message table.
    #[inline]
    pub const fn has_table(&self) -> bool {
        !matches!(self, Self::Legacy | Self::Vendor)
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// TPM Error
// ============================================================================

/// A decoded, non-success TPM response.
///
/// # Example
///
/// ```rust
/// use tpm2_rc::{decode, Fmt1Code, ResponseCode, ResponseKind, SlotIndex, TpmError};
///
/// // TPM_RC_VALUE + TPM_RC_P + TPM_RC_1
/// let err = decode(ResponseCode::new(0x1C4)).unwrap();
///
/// assert_eq!(
///     err,
///     TpmError::Parameter { code: Fmt1Code::VALUE, parameter: SlotIndex::new(1) }
/// );
/// assert_eq!(err.kind(), ResponseKind::Parameter);
/// assert_eq!(
///     err.to_string(),
///     "parameter 1, error code 0x4 : value is out of range or is not correct for the context"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "errors should be handled or logged"]
pub enum TpmError {
    /// Non-zero code with bits 7-8 clear (TPM 1.2 numbering).
    Legacy(ResponseCode),
    /// Format 0 error.
    General(Fmt0Code),
    /// Vendor-specific code. Holds the complete, undecoded response.
    Vendor(ResponseCode),
    /// Format 0 warning, typically transient.
    Warning(WarningCode),
    /// Error related to a command parameter.
    Parameter {
        /// Format 1 error code.
        code: Fmt1Code,
        /// Parameter number (bits 8-11).
        parameter: SlotIndex,
    },
    /// Error related to a command handle.
    Handle {
        /// Format 1 error code.
        code: Fmt1Code,
        /// Handle number (bits 8-10).
        handle: SlotIndex,
    },
    /// Error related to an authorization session.
    Session {
        /// Format 1 error code.
        code: Fmt1Code,
        /// Session number (bits 8-10).
        session: SlotIndex,
    },
}

impl TpmError {
    /// Get the response kind.
    #[inline]
    pub const fn kind(&self) -> ResponseKind {
        match self {
            Self::Legacy(_) => ResponseKind::Legacy,
            Self::General(_) => ResponseKind::General,
            Self::Vendor(_) => ResponseKind::Vendor,
            Self::Warning(_) => ResponseKind::Warning,
            Self::Parameter { .. } => ResponseKind::Parameter,
            Self::Handle { .. } => ResponseKind::Handle,
            Self::Session { .. } => ResponseKind::Session,
        }
    }

    /// Get the numeric code.
    ///
    /// For table-backed kinds this is the narrow code. For `Vendor` and
    /// `Legacy` it is the full raw response.
    #[inline]
    pub const fn code(&self) -> u32 {
        match self {
            Self::Legacy(rc) | Self::Vendor(rc) => rc.value(),
            Self::General(code) => code.value() as u32,
            Self::Warning(code) => code.value() as u32,
            Self::Parameter { code, .. } | Self::Handle { code, .. } | Self::Session { code, .. } => {
                code.value() as u32
            }
        }
    }

    /// Get the parameter, handle or session index of a scoped error.
    #[inline]
    pub const fn slot(&self) -> Option<SlotIndex> {
        match self {
            Self::Parameter { parameter: slot, .. }
            | Self::Handle { handle: slot, .. }
            | Self::Session { session: slot, .. } => Some(*slot),
            _ => None,
        }
    }

    /// Look up the description in this variant's table.
    ///
    /// Returns `None` on a table miss, and always for `Vendor` and `Legacy`.
    #[inline]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Legacy(_) | Self::Vendor(_) => None,
            Self::General(code) => code.message(),
            Self::Warning(code) => code.message(),
            Self::Parameter { code, .. } | Self::Handle { code, .. } | Self::Session { code, .. } => {
                code.message()
            }
        }
    }

    /// Description with the `"unknown error code"` fallback.
    #[inline]
    pub const fn describe(&self) -> &'static str {
        match self.message() {
            Some(message) => message,
            None => UNKNOWN_CODE,
        }
    }

    /// Check if this is a format 0 warning.
    #[inline]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    /// Check if this error names a command field.
    #[inline]
    pub const fn is_scoped(&self) -> bool {
        self.kind().is_scoped()
    }
}

impl fmt::Display for TpmError {
    /// Stable single-line rendering for logs.
    ///
    /// Codes are lower-case hex without padding, slot numbers are decimal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy(rc) => write!(f, "response status {}", rc),
            Self::Vendor(rc) => write!(f, "vendor error code {}", rc),
            Self::General(code) => write!(f, "error code {} : {}", code, self.describe()),
            Self::Warning(code) => write!(f, "warning code {} : {}", code, self.describe()),
            Self::Parameter { code, parameter } => write!(
                f,
                "parameter {}, error code {} : {}",
                parameter,
                code,
                self.describe()
            ),
            Self::Handle { code, handle } => write!(
                f,
                "handle {}, error code {} : {}",
                handle,
                code,
                self.describe()
            ),
            Self::Session { code, session } => write!(
                f,
                "session {}, error code {} : {}",
                session,
                code,
                self.describe()
            ),
        }
    }
}

impl std::error::Error for TpmError {}

// ============================================================================
// Tests
// ============================================================================
