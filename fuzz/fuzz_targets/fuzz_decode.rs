#![no_main]

use libfuzzer_sys::fuzz_target;
use tpm2_rc::{decode, ResponseCode};

fuzz_target!(|data: &[u8]| {
    let Some(bytes) = data.get(..4) else {
        return;
    };
    let raw = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

    match decode(ResponseCode::new(raw)) {
        None => assert_eq!(raw, 0),
        Some(err) => {
            let rendered = err.to_string();
            assert!(!rendered.is_empty());
            assert_eq!(err.slot().is_some(), err.is_scoped());

            let mut line = String::new();
            err.internal_log()
                .write_to(&mut line)
                .expect("writing to a String cannot fail");
            assert!(line.starts_with("[TPM-"));
        }
    }
});
