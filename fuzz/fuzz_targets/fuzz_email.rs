#![no_main]

use gatehouse_core::email::{is_valid_address, EmailField};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Validation is total: no panic on any input
        let _ = is_valid_address(s);

        let mut field = EmailField::new();
        field.set(s);
        if field.is_valid() {
            // A valid field always has a non-empty trimmed address
            assert!(!field.trimmed().is_empty());
            assert!(is_valid_address(field.trimmed()));
        }
    }
});
