#![no_main]
use cobstream::{decode, Cobs, FrameReader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode(data);
    let mut reader = FrameReader::new(data, Cobs::default());
    let _ = reader.process_valid(|_| Ok(()), |_| {});
    assert_eq!(reader.position(), data.len());
});
