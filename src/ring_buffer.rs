// src/ring_buffer.rs
//! Bounded journal of recently decoded TPM failures.
//!
//! Keeps the last N failures in a fixed-size ring with FIFO eviction, so a
//! TPM stuck in lockout or a retry storm cannot grow memory without bound.
//!
//! # Design Principles
//!
//! - **Bounded memory**: fixed capacity, oldest entries evicted first
//! - **Per-entry size caps**: command labels are truncated on a UTF-8 boundary
//! - **RwLock-based**: concurrent readers, exclusive writers
//! - **Shared on clone**: clones observe the same journal
//!
//! # Example
//!
//! ```rust
//! use tpm2_rc::ring_buffer::ResponseJournal;
//! use tpm2_rc::ResponseKind;
//!
//! let journal = ResponseJournal::new(128, 64);
//!
//! // The command layer records every response it gets back
//! assert!(journal.record_response(0x000u32, "TPM2_GetRandom").is_ok());
//! assert!(journal.record_response(0x921u32, "TPM2_Unseal").is_err());
//!
//! let recent = journal.get_recent(10);
//! assert_eq!(recent.len(), 1);
//! assert_eq!(recent[0].command.as_ref(), "TPM2_Unseal");
//! assert_eq!(recent[0].error.kind(), ResponseKind::Warning);
//! ```

use crate::codes::ResponseCode;
use crate::decoder::decode;
use crate::models::{ResponseKind, TpmError};
use crate::Result;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

/// Truncation marker appended to shortened command labels.
const TRUNCATION_INDICATOR: &str = "...[TRUNC]";

/// A single journal entry.
///
/// Strings are `Arc<str>` so reading entries out of the journal only bumps
/// reference counts.
#[derive(Clone, Debug)]
pub struct JournalEntry {
    /// Unix timestamp (seconds) when the failure was recorded
    pub timestamp: u64,
    /// The decoded failure
    pub error: TpmError,
    /// Rendered message, as produced by `Display`
    pub rendered: Arc<str>,
    /// Command or operation label supplied by the caller, possibly truncated
    pub command: Arc<str>,
}

/// Fixed-size ring buffer with exact allocation (no growth).
struct RingBuffer {
    entries: Box<[Option<JournalEntry>]>,
    tail: usize,
    head: usize,
    len: usize,
}

impl RingBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            entries: std::iter::repeat_with(|| None)
                .take(capacity)
                .collect::<Box<[Option<JournalEntry>]>>(),
            tail: 0,
            head: 0,
            len: 0,
        }
    }

    fn push(&mut self, entry: JournalEntry) -> Option<JournalEntry> {
        let evicted = self.entries[self.tail].replace(entry);
        self.tail = (self.tail + 1) % self.entries.len();

        if self.len < self.entries.len() {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % self.entries.len();
        }

        evicted
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    // Oldest to newest
    fn iter(&self) -> impl DoubleEndedIterator<Item = &JournalEntry> {
        let head = self.head;
        let cap = self.entries.len();

        (0..self.len).filter_map(move |i| self.entries[(head + i) % cap].as_ref())
    }

    fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

/// Bounded, thread-safe journal of decoded failures.
pub struct ResponseJournal {
    buffer: Arc<RwLock<RingBuffer>>,
    max_entries: usize,
    max_label_bytes: usize,
    eviction_count: Arc<AtomicU64>,
}

impl ResponseJournal {
    /// Create a new journal.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Capacity before FIFO eviction (at least 1)
    /// * `max_label_bytes` - Maximum bytes kept from each command label
    pub fn new(max_entries: usize, max_label_bytes: usize) -> Self {
        let bounded_entries = max_entries.max(1);
        Self {
            buffer: Arc::new(RwLock::new(RingBuffer::new(bounded_entries))),
            max_entries: bounded_entries,
            max_label_bytes,
            eviction_count: Arc::new(AtomicU64::new(0)),
        }
    }

    #[inline]
    fn read_buffer(&self) -> RwLockReadGuard<'_, RingBuffer> {
        match self.buffer.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[inline]
    fn write_buffer(&self) -> RwLockWriteGuard<'_, RingBuffer> {
        match self.buffer.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Record a decoded failure, evicting the oldest entry if full.
    pub fn record(&self, err: &TpmError, command: &str) {
        let entry = JournalEntry {
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_secs()),
            error: *err,
            rendered: Arc::from(err.to_string()),
            command: Arc::from(truncate_to_bytes(command, self.max_label_bytes).as_ref()),
        };

        let mut buffer = self.write_buffer();
        if buffer.push(entry).is_some() {
            self.eviction_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Decode a raw response, recording it if it is a failure.
    ///
    /// Success records nothing and returns `Ok(())`.
    pub fn record_response(&self, code: impl Into<ResponseCode>, command: &str) -> Result<()> {
        match decode(code.into()) {
            None => Ok(()),
            Some(err) => {
                self.record(&err, command);
                Err(err)
            }
        }
    }

    /// Get the N most recent entries, newest first.
    pub fn get_recent(&self, count: usize) -> Vec<JournalEntry> {
        let buffer = self.read_buffer();
        buffer.iter().rev().take(count).cloned().collect()
    }

    /// Get all entries, newest first.
    pub fn get_all(&self) -> Vec<JournalEntry> {
        let buffer = self.read_buffer();
        buffer.iter().rev().cloned().collect()
    }

    /// Get entries matching a predicate, oldest first.
    ///
    /// ```rust
    /// # use tpm2_rc::ring_buffer::ResponseJournal;
    /// # let journal = ResponseJournal::new(16, 64);
    /// # let _ = journal.record_response(0x98Eu32, "TPM2_PolicySecret");
    /// let auth_failures = journal.get_filtered(|entry| entry.error.kind().is_scoped());
    /// assert_eq!(auth_failures.len(), 1);
    /// ```
    pub fn get_filtered<F>(&self, predicate: F) -> Vec<JournalEntry>
    where
        F: Fn(&JournalEntry) -> bool,
    {
        let buffer = self.read_buffer();
        buffer.iter().filter(|e| predicate(e)).cloned().collect()
    }

    /// Count entries per response kind.
    ///
    /// Only kinds present in the journal are listed, in `ResponseKind` order.
    pub fn kind_counts(&self) -> SmallVec<[(ResponseKind, usize); 8]> {
        let mut counts = [0usize; ResponseKind::ALL.len()];
        {
            let buffer = self.read_buffer();
            for entry in buffer.iter() {
                counts[entry.error.kind() as usize] += 1;
            }
        }

        ResponseKind::ALL
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(kind, n)| (*kind, n))
            .collect()
    }

    /// Get current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.read_buffer().len()
    }

    /// Check if the journal is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get total number of evictions since creation.
    #[inline]
    pub fn eviction_count(&self) -> u64 {
        self.eviction_count.load(Ordering::Relaxed)
    }

    /// Clear all entries. The eviction counter is kept.
    pub fn clear(&self) {
        self.write_buffer().clear();
    }

    /// Get journal capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Check if the journal is at capacity.
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_entries
    }
}

impl Clone for ResponseJournal {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            max_entries: self.max_entries,
            max_label_bytes: self.max_label_bytes,
            eviction_count: Arc::clone(&self.eviction_count),
        }
    }
}

/// Truncate string to maximum byte length, respecting UTF-8 boundaries.
///
/// Returns Cow to avoid allocation when no truncation is needed.
fn truncate_to_bytes(s: &str, max_bytes: usize) -> Cow<'_, str> {
    if max_bytes == 0 {
        return Cow::Borrowed("");
    }
    if s.len() <= max_bytes {
        return Cow::Borrowed(s);
    }

    if max_bytes <= TRUNCATION_INDICATOR.len() {
        return Cow::Borrowed(&TRUNCATION_INDICATOR[..max_bytes]);
    }
    let max_content = max_bytes - TRUNCATION_INDICATOR.len();

    let mut idx = max_content;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut out = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    out.push_str(&s[..idx]);
    out.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{Fmt0Code, WarningCode};

    #[test]
    fn journal_evicts_oldest() {
        let journal = ResponseJournal::new(3, 64);

        for i in 0..5 {
            let err = TpmError::General(Fmt0Code::new(i));
            journal.record(&err, "TPM2_Create");
        }

        assert_eq!(journal.len(), 3);
        assert_eq!(journal.eviction_count(), 2);

        let entries = journal.get_all();
        assert_eq!(entries[0].error, TpmError::General(Fmt0Code::new(4)));
        assert_eq!(entries[2].error, TpmError::General(Fmt0Code::new(2)));
    }

    #[test]
    fn success_is_not_recorded() {
        let journal = ResponseJournal::new(8, 64);
        assert!(journal.record_response(0u32, "TPM2_Startup").is_ok());
        assert!(journal.is_empty());
    }

    #[test]
    fn failure_is_recorded_and_returned() {
        let journal = ResponseJournal::new(8, 64);
        let err = journal.record_response(0x98Eu32, "TPM2_Unseal").unwrap_err();

        let entry = &journal.get_recent(1)[0];
        assert_eq!(entry.error, err);
        assert_eq!(entry.rendered.as_ref(), err.to_string());
        assert_eq!(entry.command.as_ref(), "TPM2_Unseal");
    }

    #[test]
    fn labels_are_truncated() {
        let journal = ResponseJournal::new(4, 24);
        journal.record(&TpmError::Warning(WarningCode::RETRY), &"A".repeat(500));

        let entry = &journal.get_recent(1)[0];
        assert!(entry.command.len() <= 24);
        assert!(entry.command.ends_with("[TRUNC]"));
    }

    #[test]
    fn truncation_respects_utf8_boundaries() {
        let label = "é".repeat(20);
        let truncated = truncate_to_bytes(&label, 15);
        assert!(truncated.len() <= 15);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
        assert_eq!(truncate_to_bytes("short", 15), "short");
        assert_eq!(truncate_to_bytes("anything", 0), "");
        assert_eq!(truncate_to_bytes("anything at all", 4), "...[");
    }

    #[test]
    fn kind_counts_in_declaration_order() {
        let journal = ResponseJournal::new(16, 64);
        for raw in [0x98Eu32, 0x921, 0x1C4, 0x922, 0x500] {
            let _ = journal.record_response(raw, "cmd");
        }

        let counts = journal.kind_counts();
        assert_eq!(
            counts.as_slice(),
            &[
                (ResponseKind::Vendor, 1),
                (ResponseKind::Warning, 2),
                (ResponseKind::Parameter, 1),
                (ResponseKind::Session, 1),
            ]
        );
        assert!(!counts.spilled());
    }

    #[test]
    fn filtering_and_recent() {
        let journal = ResponseJournal::new(100, 64);
        for i in 0..10u32 {
            let raw = if i % 2 == 0 { 0x908 } else { 0x18B };
            let _ = journal.record_response(raw, "cmd");
        }

        let warnings = journal.get_filtered(|e| e.error.is_warning());
        assert_eq!(warnings.len(), 5);
        assert_eq!(journal.get_recent(3).len(), 3);
        assert_eq!(journal.get_recent(3)[0].error.kind(), ResponseKind::Handle);
    }

    #[test]
    fn clone_shares_state() {
        let journal1 = ResponseJournal::new(100, 64);
        let journal2 = journal1.clone();

        let _ = journal1.record_response(0x101u32, "TPM2_SelfTest");

        assert_eq!(journal1.len(), 1);
        assert_eq!(journal2.len(), 1);
    }

    #[test]
    fn clear_and_capacity() {
        let journal = ResponseJournal::new(0, 64);
        assert_eq!(journal.capacity(), 1);

        let _ = journal.record_response(0x101u32, "a");
        assert!(journal.is_full());
        let _ = journal.record_response(0x101u32, "b");
        assert_eq!(journal.eviction_count(), 1);

        journal.clear();
        assert!(journal.is_empty());
        assert_eq!(journal.eviction_count(), 1);
    }
}
