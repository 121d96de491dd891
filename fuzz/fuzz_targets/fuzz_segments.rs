#![no_main]

use gatehouse_core::{CodeField, SegmentedInput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the cell count, the rest is an op stream
    if data.is_empty() {
        return;
    }
    let length = (data[0] % 10) as usize + 1;
    let mut code = CodeField::new(length);
    let mut input = SegmentedInput::new(length);

    let mut bytes = data[1..].iter().copied();
    while let Some(op) = bytes.next() {
        match op % 5 {
            0 => {
                if let Some(b) = bytes.next() {
                    input.insert(b as char, &mut code);
                }
            }
            1 => input.backspace(&mut code),
            2 => input.move_left(),
            3 => input.move_right(),
            _ => {
                let n = bytes.next().unwrap_or(0) as usize % 16;
                let text: String = bytes.by_ref().take(n).map(|b| b as char).collect();
                input.paste(&text, &mut code);
            }
        }

        // The protocol never breaks its invariants, whatever the stream:
        // digit-only value, bounded length, focus within the cells.
        assert!(code.value().len() <= length);
        assert!(code.value().bytes().all(|b| b.is_ascii_digit()));
        assert!(input.focus() < length);
        assert_eq!(code.is_valid(), code.value().len() == length);
    }
});
