//! # tpm2_rc
//!
//! Bit-exact classification of TPM 2.0 response codes into typed errors.
//!
//! ## What It Does
//!
//! Every TPM command returns a 32-bit response code. Zero is success; any
//! other value packs a format selector, severity flags, an error number and
//! sometimes the index of the offending parameter, handle or session into
//! fixed bit fields. This crate takes that word apart exactly as the
//! "Response Code Evaluation" chart of TPM 2.0 Part 1 prescribes and hands
//! back a [`TpmError`] with a stable, human-readable rendering.
//!
//! ## Design Philosophy
//!
//! 1. **Bit positions are named constants**, see [`definitions::layout`]
//! 2. **Decoding is total**: every `u32` maps to exactly one outcome
//! 3. **Unknown codes are values**, rendered as `"unknown error code"`
//! 4. **Classification only**: retry and recovery policy stay with the caller
//! 5. **Tables are compile-time data**: no initialization, no locking
//!
//! ## Quick Start
//!
//! ```rust
//! use tpm2_rc::{decode_response, Fmt1Code, Result, TpmError, WarningCode};
//!
//! fn check(rc: u32) -> Result<()> {
//!     decode_response(rc)?;
//!     Ok(())
//! }
//!
//! match check(0x1C4) {
//!     Err(TpmError::Parameter { code: Fmt1Code::VALUE, parameter }) => {
//!         assert_eq!(parameter.value(), 1);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//!
//! // Callers decide retry policy from the specific warning code
//! let retry = matches!(
//!     check(0x908),
//!     Err(TpmError::Warning(WarningCode::YIELDED | WarningCode::RETRY))
//! );
//! assert!(retry);
//! ```
//!
//! ## Logging
//!
//! ```rust
//! use tpm2_rc::{decode, ResponseCode};
//!
//! let err = decode(ResponseCode::new(0x921)).unwrap();
//!
//! // Human-readable
//! assert_eq!(
//!     err.to_string(),
//!     "warning code 0x21 : authorizations for objects subject to DA protection \
//!      are not allowed at this time because the TPM is in DA lockout mode"
//! );
//!
//! // Structured
//! err.with_internal_log(|log| {
//!     assert_eq!(log.kind().log_tag(), "TPM-WARN");
//!     assert_eq!(log.code(), 0x21);
//! });
//! ```
//!
//! ## Features
//!
//! - `journal` (default): [`ring_buffer::ResponseJournal`], a bounded history
//!   of recently decoded failures

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::result;

pub mod codes;
mod convenience;
pub mod decoder;
pub mod definitions;
pub mod logging;
pub mod models;
#[cfg(feature = "journal")]
pub mod ring_buffer;

pub use codes::*;
pub use decoder::*;
pub use definitions::*;
pub use logging::*;
pub use models::*;
#[cfg(feature = "journal")]
pub use ring_buffer::*;

/// Type alias for Results using the decoded TPM error.
pub type Result<T> = result::Result<T, TpmError>;
