#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate transfer_encoding;

use transfer_encoding::{decode_to_vec, encode_to_vec, ContentEncoding};

fuzz_target!(|data: &[u8]| {
    let encoded = encode_to_vec(data, ContentEncoding::Uuencode);
    let decoded = decode_to_vec(&encoded, ContentEncoding::Uuencode);
    assert_eq!(data, decoded.as_slice());
});
