//! Allocating, whole-buffer convenience wrappers around [`crate::EncodingState`],
//! for callers who have the entire payload in memory and don't want to
//! drive `step`/`flush` themselves. Gated behind the `std` feature (on by
//! default), the same way the teacher's `encode_config`/`decode_config`
//! sit on top of its lower-level slice-based primitives.

use crate::{ContentEncoding, EncodingState};

/// Encodes all of `input` with `encoding` in one call, returning a freshly
/// allocated `Vec<u8>`.
pub fn encode_to_vec(input: &[u8], encoding: ContentEncoding) -> Vec<u8> {
    let mut state = EncodingState::init_encode(encoding);
    let mut out = vec![0u8; state.outlen(input.len()) + state.outlen(0)];

    let written = state.step(input, &mut out);
    let written = written + state.flush(&[], &mut out[written..]);
    out.truncate(written);
    out
}

/// Decodes all of `input` from `encoding` in one call, returning a freshly
/// allocated `Vec<u8>`.
pub fn decode_to_vec(input: &[u8], encoding: ContentEncoding) -> Vec<u8> {
    let mut state = EncodingState::init_decode(encoding);
    let mut out = vec![0u8; state.outlen(input.len())];

    let written = state.step(input, &mut out);
    let written = written + state.flush(&[], &mut out[written..]);
    out.truncate(written);
    out
}

/// Like [`encode_to_vec`], but returns a `String`.
///
/// Only meaningful for `encoding`s whose output is guaranteed ASCII
/// (`Base64`, `QuotedPrintable`, `Uuencode`); the identity encodings pass
/// arbitrary bytes through unchanged and may not be valid UTF-8, so calling
/// this with `SevenBit`/`EightBit`/`Binary` on non-ASCII input panics.
pub fn encode_to_string(input: &[u8], encoding: ContentEncoding) -> String {
    String::from_utf8(encode_to_vec(input, encoding))
        .expect("encoder output was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_to_vec_matches_manual_step_flush() {
        let input = b"hello, world";
        let via_convenience = encode_to_vec(input, ContentEncoding::Base64);

        let mut state = EncodingState::init_encode(ContentEncoding::Base64);
        let mut out = vec![0u8; state.outlen(input.len()) + state.outlen(0)];
        let n1 = state.step(input, &mut out);
        let n2 = state.flush(&[], &mut out[n1..]);
        out.truncate(n1 + n2);

        assert_eq!(via_convenience, out);
    }

    #[test]
    fn round_trip_through_convenience_layer() {
        for enc in [
            ContentEncoding::Base64,
            ContentEncoding::QuotedPrintable,
            ContentEncoding::Uuencode,
        ] {
            let input = b"Round trip me, please.\nSecond line.\t\x01\xffend";
            let encoded = encode_to_vec(input, enc);
            let decoded = decode_to_vec(&encoded, enc);
            assert_eq!(decoded, input, "{:?} convenience round trip failed", enc);
        }
    }

    #[test]
    fn encode_to_string_matches_encode_to_vec_as_utf8() {
        let input = b"the quick brown fox";
        for enc in [
            ContentEncoding::Base64,
            ContentEncoding::QuotedPrintable,
            ContentEncoding::Uuencode,
        ] {
            let as_vec = encode_to_vec(input, enc);
            let as_string = encode_to_string(input, enc);
            assert_eq!(as_string.into_bytes(), as_vec);
        }
    }

    #[test]
    fn identity_encodings_pass_through_convenience_layer() {
        let input = b"\x00raw bytes\xff";
        for enc in [
            ContentEncoding::SevenBit,
            ContentEncoding::EightBit,
            ContentEncoding::Binary,
        ] {
            assert_eq!(encode_to_vec(input, enc), input);
            assert_eq!(decode_to_vec(input, enc), input);
        }
    }
}
