#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let text = input.text;

    // None of these may panic, whatever the input
    let decoded = bfh::decode(text);
    let decoded_strict = bfh::decode_strict(text);
    let well_formatted = bfh::is_well_formatted(text);
    let acceptable = bfh::is_acceptable(text);
    let strict = bfh::is_strict(text);

    if well_formatted {
        assert!(acceptable, "Well formatted but not acceptable: {text:?}");
    }

    if acceptable {
        let decoded = decoded.expect("Acceptable input must decode");
        // Zero padding bits means re-encoding reproduces the symbols
        let reencoded = bfh::encode(&decoded);
        assert_eq!(
            reencoded.replace('-', ""),
            text.replace('-', ""),
            "Acceptable input does not re-encode to itself"
        );
    }

    if strict {
        assert!(decoded_strict.is_ok(), "Strict input must decode: {text:?}");
    }
});
