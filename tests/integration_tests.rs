// tests/integration_tests.rs

use cobstream::*;
use std::cell::Cell;

mod harness;
use harness::TestHarness;

const SIZES: [usize; 8] = [0, 1, 7, 253, 254, 255, 1024, 4096];

#[test]
fn test_write_read_cycle_file() {
    let mut harness = TestHarness::new();
    let payloads = harness.gen_mixed_payloads(&SIZES, 0.1);

    {
        let mut writer = harness.writer(Cobs::default());
        writer.write_all_frames(&payloads).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.frames_written(), payloads.len() as u64);
    }

    let data = harness.read_all();
    assert_eq!(data.iter().filter(|&&b| b == 0).count(), payloads.len());

    let mut reader = FrameReader::new(&data, Cobs::default());
    let mut decoded = Vec::new();
    reader
        .process_all(|p| {
            decoded.push(p.to_vec());
            Ok(())
        })
        .unwrap();
    assert_eq!(decoded, payloads);
}

#[test]
fn test_custom_config_cycle() {
    let mut harness = TestHarness::new();
    let payloads = harness.gen_mixed_payloads(&SIZES, 0.3);
    let cobs = Cobs::new(
        CobsConfig::new()
            .with_max_section_length(32)
            .with_terminator(0xC0),
    )
    .unwrap();

    {
        let mut writer = harness.writer(cobs);
        writer.write_all_frames(&payloads).unwrap();
        writer.flush().unwrap();
    }

    let data = harness.read_all();
    assert_eq!(data.iter().filter(|&&b| b == 0xC0).count(), payloads.len());

    let mut reader = FrameReader::new(&data, cobs);
    let mut frames = reader.frames();
    for expected in &payloads {
        assert_eq!(frames.next().unwrap(), Some(expected.as_slice()));
    }
    assert_eq!(frames.next().unwrap(), None);
}

#[test]
fn test_corrupted_frame_is_skipped() {
    // Purpose: Damaging one frame on disk must cost exactly that frame; the reader
    // resynchronises on the next terminator and recovers the rest.
    let mut harness = TestHarness::new();
    let payloads = harness.gen_mixed_payloads(&[16, 16, 16], 0.0);

    {
        let mut writer = harness.writer(Cobs::default());
        writer.write_all_frames(&payloads).unwrap();
        writer.flush().unwrap();
    }

    // Each frame is 1 overhead + 16 data + 1 terminator; point the second frame's overhead past its end.
    harness.corrupt_byte(18, 0x40);

    let data = harness.read_all();
    let mut reader = FrameReader::new(&data, Cobs::default());
    let mut recovered = Vec::new();
    let mut errors = Vec::new();
    let skipped = reader
        .process_valid(
            |p| {
                recovered.push(p.to_vec());
                Ok(())
            },
            |e| errors.push(e),
        )
        .unwrap();

    assert_eq!(skipped, 1);
    assert_eq!(recovered, vec![payloads[0].clone(), payloads[2].clone()]);
    assert!(matches!(errors[0], Error::TruncatedSection { offset: 0, .. }));
}

#[test]
fn test_truncated_file_reports_missing_terminator() {
    let mut harness = TestHarness::new();
    let payloads = harness.gen_mixed_payloads(&[10, 10], 0.2);

    {
        let mut writer = harness.writer(Cobs::default());
        writer.write_all_frames(&payloads).unwrap();
        writer.flush().unwrap();
    }
    harness.truncate_last_bytes(1);

    let data = harness.read_all();
    let mut reader = FrameReader::new(&data, Cobs::default());
    assert_eq!(reader.read_frame().unwrap(), Some(payloads[0].as_slice()));
    let start = reader.position();
    match reader.read_frame() {
        Err(Error::MissingTerminator { offset }) => assert_eq!(start + offset, data.len()),
        other => panic!("expected MissingTerminator, got {other:?}"),
    }
    assert_eq!(reader.read_frame().unwrap(), None);
}

#[test]
fn test_bounded_and_observed_pipeline() {
    let written = Cell::new(0usize);
    let read = Cell::new(0usize);

    let encoder = Cobs::default()
        .bounded_payload(64)
        .observe_payloads(|p| written.set(written.get() + p.len()));
    let mut writer = FrameWriter::new(Vec::new(), encoder);
    writer.write_frame(&[1; 64]).unwrap();
    assert!(matches!(
        writer.write_frame(&[1; 65]),
        Err(Error::PayloadTooLarge { len: 65, limit: 64 })
    ));
    writer.write_frame(b"tail\x00").unwrap();
    let data = writer.into_inner();

    let decoder = Cobs::default()
        .bounded_frame(Cobs::default().max_encoded_len(64))
        .observe_decoded(|p| read.set(read.get() + p.len()));
    let mut reader = FrameReader::new(&data, decoder);
    let mut count = 0;
    reader
        .process_all(|_| {
            count += 1;
            Ok(())
        })
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(written.get(), 64 + 65 + 5);
    assert_eq!(read.get(), 64 + 5);
}

#[test]
fn test_codec_is_shareable_across_threads() {
    let cobs = Cobs::new(CobsConfig::new().with_max_section_length(9)).unwrap();
    let handles: Vec<_> = (0..4u8)
        .map(|t| {
            std::thread::spawn(move || {
                let payload: Vec<u8> = (0..500u32).map(|i| (i as u8).wrapping_mul(t)).collect();
                let frame = cobs.encode(&payload);
                assert_eq!(cobs.decode(&frame).unwrap(), payload);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
