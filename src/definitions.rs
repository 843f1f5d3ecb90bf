//! Pre-defined response codes and their descriptions.
//!
//! # Source
//!
//! Bit positions follow the "Response Code Evaluation" chart of TPM 2.0
//! Part 1. Code values and descriptions follow the `TPM_RC` tables of
//! TPM 2.0 Part 2. Descriptions are kept verbatim, quirks included, since
//! callers match on them in logs.
//!
//! # Layout
//!
//! ```text
//!  11  10   9   8   7   6   5   4   3   2   1   0
//! +---+---+---+---+---+---+---+---+---+---+---+---+
//! | S | T | r | V | F |            code           |   F = 0 (format 0)
//! +---+---+---+---+---+---+---+---+---+---+---+---+
//! |   index       | F | P |         code          |   F = 1 (format 1)
//! +---+---+---+---+---+---+---+---+---+---+---+---+
//! ```
//!
//! - `V` (bit 8) with `F` clear marks a TPM 2.0 format 0 code. Bits 7-8 both
//!   clear means a TPM 1.2 code.
//! - `T` (bit 10): vendor defined.
//! - `S` (bit 11): warning in format 0, session in format 1 (when `P` clear).
//! - `P` (bit 6): the index names a parameter (bits 8-11) rather than a
//!   handle or session (bits 8-10).
//!
//! # Governance
//!
//! Tables are defined through `define_response_codes!`, which builds both the
//! named constants and the table rows from one list. Duplicate codes fail
//! const evaluation.

use crate::convenience::define_response_codes;

/// Bit masks for the response code decision tree.
///
/// Checked against the layout diagram above in the `tests` module.
pub mod layout {
    /// The success code.
    pub const RC_SUCCESS: u32 = 0x000;

    /// Bit 7: format 1 (scoped) response.
    pub const RC_FMT1: u32 = 0x080;
    /// Bit 8: TPM 2.0 numbering (format 0).
    pub const RC_VER1: u32 = 0x100;
    /// Bits 7-8: both clear means a TPM 1.2 code.
    pub const RC_FORMAT_SELECTOR: u32 = RC_FMT1 | RC_VER1;

    /// Bit 10, format 0: vendor defined.
    pub const RC_VENDOR: u32 = 0x400;
    /// Bit 11, format 0: warning severity.
    pub const RC_WARNING: u32 = 0x800;
    /// Bits 0-6, format 0: error or warning code.
    pub const FMT0_CODE_MASK: u32 = 0x07F;

    /// Bit 6, format 1: index names a parameter.
    pub const RC_PARAMETER: u32 = 0x040;
    /// Bit 11, format 1 without `RC_PARAMETER`: index names a session.
    pub const RC_SESSION: u32 = 0x800;
    /// Bits 0-5, format 1: error code.
    pub const FMT1_CODE_MASK: u32 = 0x03F;
    /// Bits 8-11, format 1: parameter number.
    pub const PARAMETER_INDEX_MASK: u32 = 0xF00;
    /// Bits 8-10, format 1: handle or session number.
    pub const HANDLE_INDEX_MASK: u32 = 0x700;
    /// Shift that brings any index field down to bit 0.
    pub const INDEX_SHIFT: u32 = 8;
}

// -----------------------------------------------------------------------------
// FORMAT 0 - General errors, not tied to a command field
// -----------------------------------------------------------------------------
define_response_codes! {
    Fmt0Code, FORMAT0_MESSAGES => {
        INITIALIZE        = (0x00, "TPM not initialized by TPM2_Startup or already initialized"),
        FAILURE           = (0x01, "commands not being accepted because of a TPM failure"),
        SEQUENCE          = (0x03, "improper use of a sequence handle"),
        PRIVATE           = (0x0B, "not currently used"),
        HMAC              = (0x19, "not currently used"),
        DISABLED          = (0x20, "the command is disabled"),
        EXCLUSIVE         = (0x21, "command failed because audit sequence required exclusivity"),
        AUTH_TYPE         = (0x24, "authorization handle is not correct for command"),
        AUTH_MISSING      = (0x25, "5 command requires an authorization session for handle and it is not present"),
        POLICY            = (0x26, "policy failure in math operation or an invalid authPolicy value"),
        PCR               = (0x27, "PCR check fail"),
        PCR_CHANGED       = (0x28, "PCR have changed since checked"),
        UPGRADE           = (0x2D, "TPM is in field upgrade mode unless called via TPM2_FieldUpgradeData(), then it is not in field upgrade mode"),
        TOO_MANY_CONTEXTS = (0x2E, "context ID counter is at maximum"),
        AUTH_UNAVAILABLE  = (0x2F, "authValue or authPolicy is not available for selected entity"),
        REBOOT            = (0x30, "a _TPM_Init and Startup(CLEAR) is required before the TPM can resume operation"),
        UNBALANCED        = (0x31, "the protection algorithms (hash and symmetric) are not reasonably balanced; the digest size of the hash must be larger than the key size of the symmetric algorithm"),
        COMMAND_SIZE      = (0x42, "command commandSize value is inconsistent with contents of the command buffer; either the size is not the same as the octets loaded by the hardware interface layer or the value is not large enough to hold a command header"),
        COMMAND_CODE      = (0x43, "command code not supported"),
        AUTH_SIZE         = (0x44, "the value of authorizationSize is out of range or the number of octets in the Authorization Area is greater than required"),
        AUTH_CONTEXT      = (0x45, "use of an authorization session with a context command or another command that cannot have an authorization session"),
        NV_RANGE          = (0x46, "NV offset+size is out of range"),
        NV_SIZE           = (0x47, "Requested allocation size is larger than allowed"),
        NV_LOCKED         = (0x48, "NV access locked"),
        NV_AUTHORIZATION  = (0x49, "NV access authorization fails in command actions"),
        NV_UNINITIALIZED  = (0x4A, "an NV Index is used before being initialized or the state saved by TPM2_Shutdown(STATE) could not be restored"),
        NV_SPACE          = (0x4B, "insufficient space for NV allocation"),
        NV_DEFINED        = (0x4C, "NV Index or persistent object already defined"),
        BAD_CONTEXT       = (0x50, "context in TPM2_ContextLoad() is not valid"),
        CP_HASH           = (0x51, "cpHash value already set or not correct for use"),
        PARENT            = (0x52, "handle for parent is not a valid parent"),
        NEEDS_TEST        = (0x53, "some function needs testing"),
        NO_RESULT         = (0x54, "returned when an internal function cannot process a request due to an unspecified problem; this code is usually related to invalid parameters that are not properly filtered by the input unmarshaling code"),
        SENSITIVE         = (0x55, "the sensitive area did not unmarshal correctly after decryption"),
    }
}

// -----------------------------------------------------------------------------
// FORMAT 1 - Errors scoped to a parameter, handle or session
// -----------------------------------------------------------------------------
define_response_codes! {
    Fmt1Code, FORMAT1_MESSAGES => {
        ASYMMETRIC    = (0x01, "asymmetric algorithm not supported or not correct"),
        ATTRIBUTES    = (0x02, "inconsistent attributes"),
        HASH          = (0x03, "hash algorithm not supported or not appropriate"),
        VALUE         = (0x04, "value is out of range or is not correct for the context"),
        HIERARCHY     = (0x05, "hierarchy is not enabled or is not correct for the use"),
        KEY_SIZE      = (0x07, "key size is not supported"),
        MGF           = (0x08, "mask generation function not supported"),
        MODE          = (0x09, "mode of operation not supported"),
        TYPE          = (0x0A, "the type of the value is not appropriate for the use"),
        HANDLE        = (0x0B, "the handle is not correct for the use"),
        KDF           = (0x0C, "unsupported key derivation function or function not appropriate for use"),
        RANGE         = (0x0D, "value was out of allowed range"),
        AUTH_FAIL     = (0x0E, "the authorization HMAC check failed and DA counter incremented"),
        NONCE         = (0x0F, "invalid nonce size or nonce value mismatch"),
        PP            = (0x10, "authorization requires assertion of PP"),
        SCHEME        = (0x12, "unsupported or incompatible scheme"),
        SIZE          = (0x15, "structure is the wrong size"),
        SYMMETRIC     = (0x16, "unsupported symmetric algorithm or key size, or not appropriate for instance"),
        TAG           = (0x17, "incorrect structure tag"),
        SELECTOR      = (0x18, "union selector is incorrect"),
        INSUFFICIENT  = (0x1A, "the TPM was unable to unmarshal a value because there were not enough octets in the input buffer"),
        SIGNATURE     = (0x1B, "the signature is not valid"),
        KEY           = (0x1C, "key fields are not compatible with the selected use"),
        POLICY_FAIL   = (0x1D, "a policy check failed"),
        INTEGRITY     = (0x1F, "integrity check failed"),
        TICKET        = (0x20, "invalid ticket"),
        RESERVED_BITS = (0x21, "reserved bits not set to zero as required"),
        BAD_AUTH      = (0x22, "authorization failure without DA implications"),
        EXPIRED       = (0x23, "the policy has expired"),
        POLICY_CC     = (0x24, "the commandCode in the policy is not the commandCode of the command or the command code in a policy command references a command that is not implemented"),
        BINDING       = (0x25, "public and sensitive portions of an object are not cryptographically bound"),
        CURVE         = (0x26, "curve not supported"),
        ECC_POINT     = (0x27, "point is not on the required curve"),
    }
}

// -----------------------------------------------------------------------------
// WARNING - Transient conditions, some retryable
// -----------------------------------------------------------------------------
define_response_codes! {
    WarningCode, WARNING_MESSAGES => {
        CONTEXT_GAP     = (0x01, "gap for context ID is too large"),
        OBJECT_MEMORY   = (0x02, "out of memory for object contexts"),
        SESSION_MEMORY  = (0x03, "out of memory for session contexts"),
        MEMORY          = (0x04, "out of shared object/session memory or need space for internal operations"),
        SESSION_HANDLES = (0x05, "out of session handles"),
        OBJECT_HANDLES  = (0x06, "out of object handles"),
        LOCALITY        = (0x07, "bad locality"),
        YIELDED         = (0x08, "the TPM has suspended operation on the command; forward progress was made and the command may be retried"),
        CANCELED        = (0x09, "the command was canceled"),
        TESTING         = (0x0A, "TPM is performing self-tests"),
        REFERENCE_H0    = (0x10, "the 1st handle in the handle area references a transient object or session that is not loaded"),
        REFERENCE_H1    = (0x11, "the 2nd handle in the handle area references a transient object or session that is not loaded"),
        REFERENCE_H2    = (0x12, "the 3rd handle in the handle area references a transient object or session that is not loaded"),
        REFERENCE_H3    = (0x13, "the 4th handle in the handle area references a transient object or session that is not loaded"),
        REFERENCE_H4    = (0x14, "the 5th handle in the handle area references a transient object or session that is not loaded"),
        REFERENCE_H5    = (0x15, "the 6th handle in the handle area references a transient object or session that is not loaded"),
        REFERENCE_H6    = (0x16, "the 7th handle in the handle area references a transient object or session that is not loaded"),
        REFERENCE_S0    = (0x18, "the 1st authorization session handle references a session that is not loaded"),
        REFERENCE_S1    = (0x19, "the 2nd authorization session handle references a session that is not loaded"),
        REFERENCE_S2    = (0x1A, "the 3rd authorization session handle references a session that is not loaded"),
        REFERENCE_S3    = (0x1B, "the 4th authorization session handle references a session that is not loaded"),
        REFERENCE_S4    = (0x1C, "the 5th authorization session handle references a session that is not loaded"),
        REFERENCE_S5    = (0x1D, "the 6th authorization session handle references a session that is not loaded"),
        REFERENCE_S6    = (0x1E, "the 7th authorization session handle references a session that is not loaded"),
        NV_RATE         = (0x20, "the TPM is rate-limiting accesses to prevent wearout of NV"),
        LOCKOUT         = (0x21, "authorizations for objects subject to DA protection are not allowed at this time because the TPM is in DA lockout mode"),
        RETRY           = (0x22, "the TPM was not able to start the command"),
        NV_UNAVAILABLE  = (0x23, "the command may require writing of NV and NV is not current accessible"),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::layout::*;
    use super::*;
    use crate::codes::{Fmt0Code, Fmt1Code, WarningCode};

    #[test]
    fn table_sizes() {
        assert_eq!(FORMAT0_MESSAGES.len(), 34);
        assert_eq!(FORMAT1_MESSAGES.len(), 33);
        assert_eq!(WARNING_MESSAGES.len(), 28);
    }

    #[test]
    fn masks_match_bit_positions() {
        assert_eq!(RC_PARAMETER, 1 << 6);
        assert_eq!(RC_FMT1, 1 << 7);
        assert_eq!(RC_VER1, 1 << 8);
        assert_eq!(RC_VENDOR, 1 << 10);
        assert_eq!(RC_WARNING, 1 << 11);
        assert_eq!(RC_SESSION, 1 << 11);
        assert_eq!(RC_FORMAT_SELECTOR, 0x180);
        assert_eq!(FMT0_CODE_MASK, (1 << 7) - 1);
        assert_eq!(FMT1_CODE_MASK, (1 << 6) - 1);
        assert_eq!(PARAMETER_INDEX_MASK >> INDEX_SHIFT, 0xF);
        assert_eq!(HANDLE_INDEX_MASK >> INDEX_SHIFT, 0x7);
    }

    #[test]
    fn masks_do_not_overlap_within_a_format() {
        assert_eq!(FMT0_CODE_MASK & (RC_FMT1 | RC_VER1 | RC_VENDOR | RC_WARNING), 0);
        assert_eq!(FMT1_CODE_MASK & (RC_PARAMETER | RC_FMT1 | PARAMETER_INDEX_MASK), 0);
        assert_eq!(HANDLE_INDEX_MASK & RC_SESSION, 0);
        assert_eq!(PARAMETER_INDEX_MASK & RC_SESSION, RC_SESSION);
    }

    #[test]
    fn format0_codes_fit_seven_bits() {
        for (code, _) in FORMAT0_MESSAGES.iter() {
            assert_eq!(u32::from(code) & !FMT0_CODE_MASK, 0);
        }
        for (code, _) in WARNING_MESSAGES.iter() {
            assert_eq!(u32::from(code) & !FMT0_CODE_MASK, 0);
        }
    }

    #[test]
    fn format1_codes_fit_six_bits() {
        for (code, _) in FORMAT1_MESSAGES.iter() {
            assert_eq!(u32::from(code) & !FMT1_CODE_MASK, 0);
        }
    }

    #[test]
    fn named_constants_resolve_to_their_rows() {
        assert_eq!(Fmt0Code::INITIALIZE.value(), 0x00);
        assert_eq!(Fmt0Code::SENSITIVE.value(), 0x55);
        assert_eq!(Fmt0Code::NV_LOCKED.describe(), "NV access locked");
        assert_eq!(Fmt1Code::ECC_POINT.value(), 0x27);
        assert_eq!(Fmt1Code::AUTH_FAIL.describe(), "the authorization HMAC check failed and DA counter incremented");
        assert_eq!(WarningCode::NV_UNAVAILABLE.value(), 0x23);
        assert_eq!(WarningCode::REFERENCE_S6.value(), 0x1E);
        assert_eq!(WarningCode::LOCKOUT.describe(), "authorizations for objects subject to DA protection are not allowed at this time because the TPM is in DA lockout mode");
    }

    #[test]
    fn descriptions_are_kept_verbatim() {
        assert_eq!(
            Fmt0Code::AUTH_MISSING.describe(),
            "5 command requires an authorization session for handle and it is not present"
        );
        assert_eq!(Fmt0Code::PRIVATE.describe(), Fmt0Code::HMAC.describe());
        assert_eq!(
            WarningCode::NV_UNAVAILABLE.describe(),
            "the command may require writing of NV and NV is not current accessible"
        );
    }

    #[test]
    fn documented_gaps_are_unknown() {
        // 0x02, 0x04-0x0A are unassigned in format 0; 0x06, 0x11 in format 1;
        // 0x17 sits between the handle and session references.
        assert!(!FORMAT0_MESSAGES.contains(0x02));
        assert!(!FORMAT0_MESSAGES.contains(0x0A));
        assert!(!FORMAT1_MESSAGES.contains(0x06));
        assert!(!FORMAT1_MESSAGES.contains(0x11));
        assert!(!WARNING_MESSAGES.contains(0x17));
        assert!(!WARNING_MESSAGES.contains(0x00));
    }
}
