#![no_main]
use cobstream::{Cobs, CobsConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, Vec<u8>)| {
    let (max, terminator, payload) = input;
    let Ok(cobs) = Cobs::new(
        CobsConfig::new()
            .with_max_section_length(max)
            .with_terminator(terminator),
    ) else {
        return;
    };
    let frame = cobs.encode(&payload);
    assert!(frame.len() <= cobs.max_encoded_len(payload.len()));
    assert!(!frame[..frame.len() - 1].contains(&terminator));
    assert_eq!(cobs.decode(&frame).unwrap(), payload);
});
