#![no_main]

use libfuzzer_sys::fuzz_target;
use tpm2_rc::ring_buffer::ResponseJournal;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 32);
    let label_cap = usize::from(data[1]);
    let journal = ResponseJournal::new(capacity, label_cap);

    for chunk in data[2..].chunks(8) {
        let mut raw = [0u8; 4];
        let split = chunk.len().min(4);
        raw[..split].copy_from_slice(&chunk[..split]);
        let label = String::from_utf8_lossy(&chunk[split..]);

        let _ = journal.record_response(u32::from_le_bytes(raw), &label);
    }

    assert!(journal.len() <= journal.capacity());
    for entry in journal.get_all() {
        assert!(entry.command.len() <= label_cap);
    }
});
