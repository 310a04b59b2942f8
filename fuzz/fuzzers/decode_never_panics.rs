#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate transfer_encoding;

use transfer_encoding::{decode_to_vec, ContentEncoding};

// Arbitrary (not necessarily well-formed) input fed straight to each
// decoder. Nothing here asserts a particular output — only that decoding
// garbage never panics or overruns the buffer decode_to_vec allocated.
fuzz_target!(|data: &[u8]| {
    let _ = decode_to_vec(data, ContentEncoding::Base64);
    let _ = decode_to_vec(data, ContentEncoding::QuotedPrintable);
    let _ = decode_to_vec(data, ContentEncoding::Uuencode);
});
