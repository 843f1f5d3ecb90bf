//! Response code decoder.
//!
//! Implements the "Response Code Evaluation" chart from TPM 2.0 Part 1 as an
//! ordered decision tree. Later checks assume earlier ones failed: the vendor
//! bit is only consulted once bit 7 is known to be clear, and the session bit
//! only once bit 6 is known to be clear.
//!
//! The decoder is total and `const`. Every `u32` maps to exactly one outcome,
//! and nothing here allocates, panics, or touches shared state.

use crate::Result;
use crate::codes::{Fmt0Code, Fmt1Code, ResponseCode, SlotIndex, WarningCode};
use crate::definitions::layout::*;
use crate::models::TpmError;

/// Decode a raw response code.
///
/// Returns `None` for success (`0x000`), otherwise the decoded error.
///
/// ```rust
/// use tpm2_rc::{decode, ResponseCode, TpmError, WarningCode};
///
/// assert_eq!(decode(ResponseCode::SUCCESS), None);
/// assert_eq!(
///     decode(ResponseCode::new(0x908)),
///     Some(TpmError::Warning(WarningCode::YIELDED))
/// );
/// ```
pub const fn decode(code: ResponseCode) -> Option<TpmError> {
    let rc = code.value();

    if rc == RC_SUCCESS {
        return None;
    }

    // Bits 7:8 clear is a TPM 1.2 code
    if rc & RC_FORMAT_SELECTOR == 0 {
        return Some(TpmError::Legacy(code));
    }

    if rc & RC_FMT1 == 0 {
        if rc & RC_VENDOR != 0 {
            return Some(TpmError::Vendor(code));
        }
        let narrow = (rc & FMT0_CODE_MASK) as u8;
        if rc & RC_WARNING != 0 {
            return Some(TpmError::Warning(WarningCode::new(narrow)));
        }
        return Some(TpmError::General(Fmt0Code::new(narrow)));
    }

    let narrow = Fmt1Code::new((rc & FMT1_CODE_MASK) as u8);

    // Parameter index is 4 bits wide, handle and session indexes only 3
    if rc & RC_PARAMETER != 0 {
        let parameter = SlotIndex::new(((rc & PARAMETER_INDEX_MASK) >> INDEX_SHIFT) as u8);
        return Some(TpmError::Parameter { code: narrow, parameter });
    }

    let index = SlotIndex::new(((rc & HANDLE_INDEX_MASK) >> INDEX_SHIFT) as u8);
    if rc & RC_SESSION == 0 {
        Some(TpmError::Handle { code: narrow, handle: index })
    } else {
        Some(TpmError::Session { code: narrow, session: index })
    }
}

/// Decode a raw response code into the crate `Result`.
///
/// This is the form the command layer uses to propagate failures with `?`.
///
/// ```rust
/// use tpm2_rc::{decode_response, Result};
///
/// fn unseal(rc: u32) -> Result<()> {
///     decode_response(rc)?;
///     Ok(())
/// }
///
/// assert!(unseal(0).is_ok());
/// assert_eq!(
///     unseal(0x98E).unwrap_err().to_string(),
///     "session 1, error code 0xe : the authorization HMAC check failed and DA counter incremented"
/// );
/// ```
#[inline]
pub fn decode_response(code: impl Into<ResponseCode>) -> Result<()> {
    match decode(code.into()) {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

// ============================================================================
// Tests
// ============================================================================
