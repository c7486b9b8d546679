#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let encoded = bfh::encode(data);
    assert_eq!(
        encoded.len(),
        bfh::encoded_len(data.len(), bfh::Format::Normal),
        "Encoded length mismatch"
    );
    assert!(bfh::is_well_formatted(&encoded), "Encode output not well formatted");
    assert!(bfh::is_acceptable(&encoded), "Encode output not acceptable");

    let decoded = bfh::decode(&encoded).expect("Encode output must decode");
    assert_eq!(data, &decoded[..], "Roundtrip failed");

    // Strict form only exists for whole groups of 5 bytes
    match bfh::encode_strict(data) {
        Ok(strict) => {
            assert!(data.len() % 5 == 0);
            assert!(bfh::is_strict(&strict), "Strict output not strict");
            assert_eq!(&encoded[2..], strict, "Strict body differs from normal body");

            let decoded = bfh::decode_strict(&strict).expect("Strict output must decode");
            assert_eq!(data, &decoded[..], "Strict roundtrip failed");
        }
        Err(_) => assert!(data.len() % 5 != 0),
    }
});
