//! Incremental encoders and decoders for the MIME content-transfer
//! encodings: Base64, quoted-printable, and uuencode, plus verbatim
//! passthrough for `7bit`/`8bit`/`binary`.
//!
//! Each codec is a pair of state machines, one per direction, that consume
//! input a chunk at a time via [`EncodingState::step`] and finalize any
//! buffered state via [`EncodingState::flush`]. Chunk boundaries never
//! change the encoded or decoded meaning of the stream; callers may feed
//! data one byte at a time or all at once and get identical results.
//!
//! ```rust
//! use transfer_encoding::{ContentEncoding, EncodingState};
//!
//! let mut state = EncodingState::init_encode(ContentEncoding::Base64);
//! let mut out = vec![0u8; state.outlen(3) + state.outlen(0)];
//!
//! let n1 = state.step(b"Ma", &mut out);
//! let n2 = state.flush(b"n", &mut out[n1..]);
//! out.truncate(n1 + n2);
//! assert_eq!(out, b"TWFu\n");
//! ```

pub mod content_encoding;

mod base64;
mod quoted_printable;
mod tables;
mod uuencode;

#[cfg(feature = "std")]
mod convenience;

pub use content_encoding::ContentEncoding;

#[cfg(feature = "std")]
pub use convenience::{decode_to_vec, encode_to_string, encode_to_vec};

/// Which direction an [`EncodingState`] was initialized for. Immutable for
/// the lifetime of the state; changing direction requires constructing a
/// new `EncodingState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// The one stateful entity in this crate. Carries the selected codec, its
/// direction, and the cross-call carry state the `step`/`flush` primitives
/// need: `state` and `save` hold a codec-specific packed accumulator,
/// `uubuf` is the in-progress uuencode line buffer.
///
/// Not safe for sharing across threads without synchronization: every
/// operation mutates `self`. Independent streams need independent
/// `EncodingState` values, which share no data and may be driven on
/// separate threads without coordination.
#[derive(Clone, Copy, Debug)]
pub struct EncodingState {
    encoding: ContentEncoding,
    direction: Direction,
    state: i32,
    save: u32,
    uubuf: [u8; 60],
}

/// Error returned by [`EncodingState::for_name`] when a
/// `Content-Transfer-Encoding` value names no known encoding.
///
/// This is the crate's one fallible constructor.
/// [`content_encoding::from_str`] (the MIME-facing name table) intentionally
/// never fails and defaults to 7bit, matching the reference parser; this
/// type exists for callers who would rather have a typed rejection than a
/// silent default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEncoding(String);

impl std::fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized content-transfer-encoding: {:?}", self.0)
    }
}

impl std::error::Error for UnknownEncoding {}

impl EncodingState {
    /// Initializes a state for encoding with `encoding`.
    pub fn init_encode(encoding: ContentEncoding) -> EncodingState {
        let mut state = EncodingState {
            encoding,
            direction: Direction::Encode,
            state: 0,
            save: 0,
            uubuf: [0u8; 60],
        };
        state.reset();
        state
    }

    /// Initializes a state for decoding from `encoding`.
    pub fn init_decode(encoding: ContentEncoding) -> EncodingState {
        let mut state = EncodingState {
            encoding,
            direction: Direction::Decode,
            state: 0,
            save: 0,
            uubuf: [0u8; 60],
        };
        state.reset();
        state
    }

    /// Like `init_encode`/`init_decode`, but looks the encoding up by its
    /// `Content-Transfer-Encoding` header spelling and rejects names that
    /// don't map to a known encoding (see [`UnknownEncoding`]), rather than
    /// silently treating them as 7bit the way [`content_encoding::from_str`]
    /// does.
    pub fn for_name(name: &str, direction: Direction) -> Result<EncodingState, UnknownEncoding> {
        let trimmed = name.trim_start();
        let recognized = trimmed.eq_ignore_ascii_case("7bit")
            || trimmed.eq_ignore_ascii_case("7-bit")
            || trimmed.eq_ignore_ascii_case("8bit")
            || trimmed.eq_ignore_ascii_case("8-bit")
            || trimmed.eq_ignore_ascii_case("binary")
            || trimmed.eq_ignore_ascii_case("base64")
            || trimmed.eq_ignore_ascii_case("quoted-printable")
            || trimmed.eq_ignore_ascii_case("uuencode")
            || trimmed.eq_ignore_ascii_case("x-uuencode")
            || trimmed.eq_ignore_ascii_case("x-uue");

        if !recognized {
            return Err(UnknownEncoding(name.to_string()));
        }

        let encoding = content_encoding::from_str(name);
        Ok(match direction {
            Direction::Encode => EncodingState::init_encode(encoding),
            Direction::Decode => EncodingState::init_decode(encoding),
        })
    }

    /// Which codec this state drives.
    pub fn encoding(&self) -> ContentEncoding {
        self.encoding
    }

    /// Which direction this state was initialized for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Reinitializes the per-codec carry state, as if freshly constructed.
    /// After `reset`, `save` is 0 and `state` is 0, except for
    /// quoted-printable encode, where `state` is `-1` ("no pending
    /// character"). Two consecutive calls to `reset` are equivalent to one.
    pub fn reset(&mut self) {
        self.state = match (self.direction, self.encoding) {
            (Direction::Encode, ContentEncoding::QuotedPrintable) => -1,
            _ => 0,
        };
        self.save = 0;
        self.uubuf = [0u8; 60];
    }

    /// Upper bound on the number of bytes the next `step` or `flush` call
    /// may write, given `inlen` fresh input bytes. Never smaller than the
    /// true output for any reachable state.
    pub fn outlen(&self, inlen: usize) -> usize {
        use ContentEncoding::*;
        match (self.encoding, self.direction) {
            (Base64, Direction::Encode) => base64::encode_outlen(inlen),
            (Base64, Direction::Decode) => base64::decode_outlen(inlen),
            (QuotedPrintable, Direction::Encode) => quoted_printable::encode_outlen(inlen),
            (QuotedPrintable, Direction::Decode) => quoted_printable::decode_outlen(inlen),
            (Uuencode, Direction::Encode) => uuencode::encode_outlen(inlen),
            (Uuencode, Direction::Decode) => uuencode::decode_outlen(inlen),
            (SevenBit, _) | (EightBit, _) | (Binary, _) => inlen,
        }
    }

    /// Encodes or decodes (depending on direction) one chunk of the stream.
    /// `output` must be at least `self.outlen(input.len())` bytes. Returns
    /// the number of bytes written to `output`.
    pub fn step(&mut self, input: &[u8], output: &mut [u8]) -> usize {
        use ContentEncoding::*;
        if self.encoding.is_identity() {
            return copy_identity(input, output);
        }
        match (self.encoding, self.direction) {
            (Base64, Direction::Encode) => {
                base64::encode_step(input, output, &mut self.state, &mut self.save)
            }
            (Base64, Direction::Decode) => {
                base64::decode_step(input, output, &mut self.state, &mut self.save)
            }
            (QuotedPrintable, Direction::Encode) => {
                quoted_printable::encode_step(input, output, &mut self.state, &mut self.save)
            }
            (QuotedPrintable, Direction::Decode) => {
                quoted_printable::decode_step(input, output, &mut self.state, &mut self.save)
            }
            (Uuencode, Direction::Encode) => uuencode::encode_step(
                input,
                output,
                &mut self.uubuf,
                &mut self.state,
                &mut self.save,
            ),
            (Uuencode, Direction::Decode) => {
                uuencode::decode_step(input, output, &mut self.state, &mut self.save)
            }
            (SevenBit, _) | (EightBit, _) | (Binary, _) => unreachable!(),
        }
    }

    /// Finalizes the stream, draining any residual carried state. For
    /// encoders this flushes padding and terminators (see each codec's
    /// `encode_close`); decoders have no trailing state worth flushing
    /// beyond what `step` already handles, so `flush` on a decoder just
    /// forwards to `step`.
    pub fn flush(&mut self, input: &[u8], output: &mut [u8]) -> usize {
        use ContentEncoding::*;
        if self.encoding.is_identity() {
            return copy_identity(input, output);
        }
        match (self.encoding, self.direction) {
            (Base64, Direction::Encode) => {
                base64::encode_close(input, output, &mut self.state, &mut self.save)
            }
            (QuotedPrintable, Direction::Encode) => {
                quoted_printable::encode_close(input, output, &mut self.state, &mut self.save)
            }
            (Uuencode, Direction::Encode) => uuencode::encode_close(
                input,
                output,
                &mut self.uubuf,
                &mut self.state,
                &mut self.save,
            ),
            (_, Direction::Decode) => self.step(input, output),
            (SevenBit, _) | (EightBit, _) | (Binary, _) => unreachable!(),
        }
    }
}

#[inline]
fn copy_identity(input: &[u8], output: &mut [u8]) -> usize {
    output[..input.len()].copy_from_slice(input);
    input.len()
}
