//! Code namespace - the narrow numeric codes carried by decoded responses.
//!
//! A TPM response code is a single `u32` whose meaning is spread over fixed
//! bit fields. Once the decoder has picked the response format, only a few
//! low-order bits remain meaningful, and the same small integer means
//! different things depending on which table it indexes:
//!
//! - **Format 0** (`Fmt0Code`): general errors, 7 bits
//! - **Format 1** (`Fmt1Code`): parameter, handle and session errors, 6 bits
//! - **Warning** (`WarningCode`): transient conditions, 7 bits
//!
//! Each code type is a distinct newtype, so a warning code cannot be looked
//! up in the format 0 table by accident. The raw word stays wrapped in
//! `ResponseCode` until the decoder takes it apart.
//!
//! # Message Tables
//!
//! Descriptions live in `MessageTable` values built by a `const fn` at
//! compile time. A table rejects duplicate codes and codes wider than 7 bits
//! during const evaluation, so a bad table fails the build rather than
//! misclassifying hardware failures at runtime.
//!
//! ```rust
//! use tpm2_rc::{Fmt0Code, FORMAT0_MESSAGES, UNKNOWN_CODE};
//!
//! assert_eq!(
//!     Fmt0Code::COMMAND_CODE.message(),
//!     Some("command code not supported")
//! );
//! assert_eq!(FORMAT0_MESSAGES.describe(0x7E), UNKNOWN_CODE);
//! ```

use crate::definitions::{FORMAT0_MESSAGES, FORMAT1_MESSAGES, WARNING_MESSAGES};
use std::fmt;

/// Fallback description for codes absent from their table.
pub const UNKNOWN_CODE: &str = "unknown error code";

/// Number of slots in a dense message table (7-bit code space).
pub const TABLE_SLOTS: usize = 128;

// ============================================================================
// Raw Response Code
// ============================================================================

/// A raw 32-bit response code as returned by the TPM.
///
/// No invariants: every `u32` is a valid response code. Meaning is assigned
/// entirely by bit position, see [`crate::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResponseCode(u32);

impl ResponseCode {
    /// The only code that signals success.
    pub const SUCCESS: Self = Self(crate::definitions::layout::RC_SUCCESS);

    /// Wrap a raw response word.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check if this is the success code.
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == crate::definitions::layout::RC_SUCCESS
    }
}

impl From<u32> for ResponseCode {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<ResponseCode> for u32 {
    #[inline]
    fn from(code: ResponseCode) -> Self {
        code.0
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

// ============================================================================
// Message Table
// ============================================================================

/// Immutable mapping from a narrow code to its fixed description.
///
/// Stored as a dense array indexed by code. Codes are at most 7 bits wide,
/// so every lookup is a bounds-checked index with no hashing.
///
/// # Const Construction
///
/// ```rust
/// use tpm2_rc::MessageTable;
///
/// static TABLE: MessageTable = MessageTable::new(&[
///     (0x01, "first"),
///     (0x05, "fifth"),
/// ]);
///
/// assert_eq!(TABLE.lookup(0x05), Some("fifth"));
/// assert_eq!(TABLE.lookup(0x02), None);
/// assert_eq!(TABLE.len(), 2);
/// ```
///
/// Duplicate or out-of-range codes fail const evaluation:
///
/// ```rust,compile_fail
/// use tpm2_rc::MessageTable;
///
/// static BAD: MessageTable = MessageTable::new(&[(0x01, "a"), (0x01, "b")]);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct MessageTable {
    entries: [Option<&'static str>; TABLE_SLOTS],
    len: usize,
}

impl MessageTable {
    /// Build a table from `(code, description)` rows.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `static`) if a code is
    /// `>= 128` or appears more than once.
    pub const fn new(rows: &[(u8, &'static str)]) -> Self {
        let mut entries = [None; TABLE_SLOTS];
        let mut i = 0;
        while i < rows.len() {
            let (code, message) = rows[i];
            assert!((code as usize) < TABLE_SLOTS, "Message table code must fit in 7 bits");
            assert!(entries[code as usize].is_none(), "Duplicate code in message table");
            entries[code as usize] = Some(message);
            i += 1;
        }
        Self {
            entries,
            len: rows.len(),
        }
    }

    /// Look up the description for `code`.
    ///
    /// Returns `None` when the code has no entry. Codes wider than the
    /// table are a miss, not a panic.
    #[inline]
    pub const fn lookup(&self, code: u8) -> Option<&'static str> {
        if (code as usize) < TABLE_SLOTS {
            self.entries[code as usize]
        } else {
            None
        }
    }

    /// Look up the description, falling back to [`UNKNOWN_CODE`].
    #[inline]
    pub const fn describe(&self, code: u8) -> &'static str {
        match self.lookup(code) {
            Some(message) => message,
            None => UNKNOWN_CODE,
        }
    }

    /// Check if the table has an entry for `code`.
    #[inline]
    pub const fn contains(&self, code: u8) -> bool {
        self.lookup(code).is_some()
    }

    /// Number of populated entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the table has no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate `(code, description)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &'static str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(code, entry)| entry.map(|message| (code as u8, message)))
    }
}

// ============================================================================
// Narrow Code Types
// ============================================================================

/// Format 0 (general) error code, bits 0-6 of the response.
///
/// Named constants for every documented code are defined in
/// [`crate::definitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fmt0Code(u8);

/// Format 1 (parameter, handle, session) error code, bits 0-5 of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fmt1Code(u8);

/// Warning code, bits 0-6 of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WarningCode(u8);

impl Fmt0Code {
    /// Wrap a raw format 0 code.
    #[inline]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Description from the format 0 table, if documented.
    #[inline]
    pub const fn message(self) -> Option<&'static str> {
        FORMAT0_MESSAGES.lookup(self.0)
    }

    /// Description with the [`UNKNOWN_CODE`] fallback.
    #[inline]
    pub const fn describe(self) -> &'static str {
        FORMAT0_MESSAGES.describe(self.0)
    }
}

impl Fmt1Code {
    /// Wrap a raw format 1 code.
    #[inline]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Description from the format 1 table, if documented.
    #[inline]
    pub const fn message(self) -> Option<&'static str> {
        FORMAT1_MESSAGES.lookup(self.0)
    }

    /// Description with the [`UNKNOWN_CODE`] fallback.
    #[inline]
    pub const fn describe(self) -> &'static str {
        FORMAT1_MESSAGES.describe(self.0)
    }
}

impl WarningCode {
    /// Wrap a raw warning code.
    #[inline]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Description from the warning table, if documented.
    #[inline]
    pub const fn message(self) -> Option<&'static str> {
        WARNING_MESSAGES.lookup(self.0)
    }

    /// Description with the [`UNKNOWN_CODE`] fallback.
    #[inline]
    pub const fn describe(self) -> &'static str {
        WARNING_MESSAGES.describe(self.0)
    }
}

impl fmt::Display for Fmt0Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::Display for Fmt1Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

// ============================================================================
// Slot Index
// ============================================================================

/// Which parameter, handle or session of a command a format 1 error refers to.
///
/// One-based in TPM numbering. Parameters use a 4-bit window (0-15),
/// handles and sessions a 3-bit window (0-7). Zero is representable because
/// reserved bit patterns still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// First parameter, handle or session.
    pub const N1: Self = Self(1);
    /// Slot 2.
    pub const N2: Self = Self(2);
    /// Slot 3.
    pub const N3: Self = Self(3);
    /// Slot 4.
    pub const N4: Self = Self(4);
    /// Slot 5.
    pub const N5: Self = Self(5);
    /// Slot 6.
    pub const N6: Self = Self(6);
    /// Slot 7.
    pub const N7: Self = Self(7);
    /// Slot 8.
    pub const N8: Self = Self(8);
    /// Slot 9.
    pub const N9: Self = Self(9);
    /// Slot 10.
    pub const N10: Self = Self(10);
    /// Slot 11.
    pub const N11: Self = Self(11);
    /// Slot 12.
    pub const N12: Self = Self(12);
    /// Slot 13.
    pub const N13: Self = Self(13);
    /// Slot 14.
    pub const N14: Self = Self(14);
    /// Slot 15.
    pub const N15: Self = Self(15);

    /// Largest index a handle or session error can carry.
    pub const MAX_HANDLE: Self = Self::N7;
    /// Largest index a parameter error can carry.
    pub const MAX_PARAMETER: Self = Self::N15;

    /// Wrap a raw slot number.
    #[inline]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    static SPARSE: MessageTable = MessageTable::new(&[(0x00, "zero"), (0x7F, "last")]);

    #[test]
    fn table_lookup_hits_and_misses() {
        assert_eq!(SPARSE.lookup(0x00), Some("zero"));
        assert_eq!(SPARSE.lookup(0x7F), Some("last"));
        assert_eq!(SPARSE.lookup(0x01), None);
        assert!(SPARSE.contains(0x7F));
        assert!(!SPARSE.contains(0x40));
    }

    #[test]
    fn table_lookup_beyond_code_space_is_a_miss() {
        assert_eq!(SPARSE.lookup(0x80), None);
        assert_eq!(SPARSE.lookup(u8::MAX), None);
        assert_eq!(SPARSE.describe(0xFF), UNKNOWN_CODE);
    }

    #[test]
    fn table_describe_falls_back() {
        assert_eq!(SPARSE.describe(0x00), "zero");
        assert_eq!(SPARSE.describe(0x10), "unknown error code");
    }

    #[test]
    fn table_iterates_in_code_order() {
        let table = MessageTable::new(&[(0x30, "c"), (0x02, "a"), (0x11, "b")]);
        let rows: Vec<_> = table.iter().collect();
        assert_eq!(rows, vec![(0x02, "a"), (0x11, "b"), (0x30, "c")]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn empty_table() {
        let table = MessageTable::new(&[]);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table.describe(0), UNKNOWN_CODE);
    }

    #[test]
    #[should_panic(expected = "Duplicate code")]
    fn runtime_construction_rejects_duplicates() {
        let _ = MessageTable::new(&[(0x01, "a"), (0x01, "b")]);
    }

    #[test]
    #[should_panic(expected = "7 bits")]
    fn runtime_construction_rejects_wide_codes() {
        let _ = MessageTable::new(&[(0x80, "too wide")]);
    }

    #[test]
    fn codes_render_as_lowercase_hex() {
        assert_eq!(Fmt0Code::new(0x4A).to_string(), "0x4a");
        assert_eq!(Fmt1Code::new(0x0E).to_string(), "0xe");
        assert_eq!(WarningCode::new(0x00).to_string(), "0x0");
        assert_eq!(ResponseCode::new(0x9A2).to_string(), "0x9a2");
    }

    #[test]
    fn slot_renders_as_decimal() {
        assert_eq!(SlotIndex::new(12).to_string(), "12");
    }

    #[test]
    fn named_slots_cover_the_parameter_window() {
        let named = [
            SlotIndex::N1, SlotIndex::N2, SlotIndex::N3, SlotIndex::N4, SlotIndex::N5,
            SlotIndex::N6, SlotIndex::N7, SlotIndex::N8, SlotIndex::N9, SlotIndex::N10,
            SlotIndex::N11, SlotIndex::N12, SlotIndex::N13, SlotIndex::N14, SlotIndex::N15,
        ];
        for (i, slot) in named.iter().enumerate() {
            assert_eq!(slot.value() as usize, i + 1);
        }
        assert_eq!(SlotIndex::MAX_HANDLE.value(), 7);
        assert_eq!(SlotIndex::MAX_PARAMETER.value(), 0x0F);
    }

    #[test]
    fn response_code_conversions() {
        let rc = ResponseCode::from(0x101);
        assert_eq!(rc.value(), 0x101);
        assert_eq!(u32::from(rc), 0x101);
        assert!(ResponseCode::SUCCESS.is_success());
        assert!(ResponseCode::default().is_success());
        assert!(!rc.is_success());
    }

    #[test]
    fn same_value_means_different_things_per_table() {
        assert_eq!(Fmt0Code::new(0x01).describe(), FORMAT0_MESSAGES.describe(0x01));
        assert_eq!(Fmt1Code::new(0x01).describe(), FORMAT1_MESSAGES.describe(0x01));
        assert_ne!(Fmt0Code::new(0x01).describe(), Fmt1Code::new(0x01).describe());
        assert_ne!(Fmt1Code::new(0x01).describe(), WarningCode::new(0x01).describe());
    }
}
