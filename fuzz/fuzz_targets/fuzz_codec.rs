//! Fuzz target for the base codec.
//!
//! Every byte classifies to exactly one symbol, and every base survives a
//! code round trip.

#![no_main]

use findkmer::base::{decode, encode, Base, Symbol};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for &byte in data {
        match encode(byte) {
            Symbol::Base(base) => {
                assert_eq!(base.to_byte(), byte);
                assert_eq!(Base::from_code(base.code()).unwrap(), base);
                assert_eq!(decode(base.code()).unwrap(), byte);
            }
            Symbol::IdentifierStart => assert_eq!(byte, b'>'),
            Symbol::Ambiguous => assert!(!matches!(byte, b'A' | b'C' | b'G' | b'T' | b'>')),
        }
        assert_eq!(decode(byte).is_ok(), byte < 4);
    }
});
