//! Streaming uuencode encode/decode primitives (§4.4).
//!
//! Encode carry state: `save` holds up to 2 input bytes (big-endian packed,
//! matching the reference's `guint32` accumulator), `state`'s low byte is
//! that carry count (0/1/2), and its next byte is the number of decoded
//! bytes already placed into the in-progress 45-byte line (a multiple of
//! 3). `uubuf` holds the line's encoded characters until a full line (or
//! `encode_close`) is ready to emit them.
//!
//! Decode carry state: `state`'s low byte is quartet progress (0..3), its
//! next byte is the remaining decoded-byte budget for the current line,
//! and the `END` bit latches once a zero-length line is seen.

use crate::tables::{uu_char, UU_RANK};

const LINE_BYTES: usize = 45;
const LINE_CHARS: usize = 60; // LINE_BYTES / 3 * 4

const END_FLAG: i32 = 0x1_0000;

#[inline]
fn enc_carry_count(state: i32) -> usize {
    (state & 0xff) as usize
}

#[inline]
fn enc_line_progress(state: i32) -> usize {
    ((state >> 8) & 0xff) as usize
}

#[inline]
fn enc_pack(carry_count: usize, line_progress: usize) -> i32 {
    ((line_progress as i32 & 0xff) << 8) | (carry_count as i32 & 0xff)
}

#[inline]
fn dec_quartet_progress(state: i32) -> usize {
    (state & 0xff) as usize
}

#[inline]
fn dec_line_budget(state: i32) -> usize {
    ((state >> 8) & 0xff) as usize
}

#[inline]
fn dec_at_end(state: i32) -> bool {
    state & END_FLAG != 0
}

#[inline]
fn dec_pack(quartet_progress: usize, line_budget: usize, at_end: bool) -> i32 {
    let mut s = ((line_budget as i32 & 0xff) << 8) | (quartet_progress as i32 & 0xff);
    if at_end {
        s |= END_FLAG;
    }
    s
}

/// Upper bound on bytes `encode_step`/`encode_close` may write for `inlen`
/// fresh input bytes.
pub(crate) fn encode_outlen(inlen: usize) -> usize {
    (inlen / LINE_BYTES + 1) * 62 + 2
}

/// Upper bound on bytes `decode_step` may write; decoding never expands.
pub(crate) fn decode_outlen(inlen: usize) -> usize {
    inlen + 3
}

/// Encodes three input bytes into four uuencode characters, writing into
/// `uubuf` at decoded-byte offset `line_progress`.
#[inline]
fn encode_triplet(uubuf: &mut [u8; 60], line_progress: usize, b0: u8, b1: u8, b2: u8) {
    let idx = (line_progress / 3) * 4;
    uubuf[idx] = uu_char((b0 >> 2) & 0x3f);
    uubuf[idx + 1] = uu_char(((b0 << 4) | (b1 >> 4)) & 0x3f);
    uubuf[idx + 2] = uu_char(((b1 << 2) | (b2 >> 6)) & 0x3f);
    uubuf[idx + 3] = uu_char(b2 & 0x3f);
}

/// Encodes a chunk of data, buffering partial lines in `uubuf` until 45
/// decoded bytes (or `encode_close`) are available to emit a full line.
pub(crate) fn encode_step(
    input: &[u8],
    output: &mut [u8],
    uubuf: &mut [u8; 60],
    state: &mut i32,
    save: &mut u32,
) -> usize {
    if input.is_empty() {
        return 0;
    }

    let mut carry_count = enc_carry_count(*state);
    let mut line_progress = enc_line_progress(*state);
    let mut saved = *save;
    let mut out_idx = 0usize;
    let mut in_idx = 0usize;

    // Assemble whatever carried bytes plus fresh input into triplets,
    // writing each completed triplet into `uubuf`. When a line fills up
    // (45 bytes), flush the line header + `uubuf` + newline to `output`.
    loop {
        while line_progress < LINE_BYTES {
            let available = carry_count + (input.len() - in_idx);
            if available < 3 {
                break;
            }

            let (b0, b1, b2);
            match carry_count {
                0 => {
                    b0 = input[in_idx];
                    b1 = input[in_idx + 1];
                    b2 = input[in_idx + 2];
                    in_idx += 3;
                }
                1 => {
                    b0 = (saved & 0xff) as u8;
                    b1 = input[in_idx];
                    b2 = input[in_idx + 1];
                    in_idx += 2;
                }
                _ => {
                    b0 = ((saved >> 8) & 0xff) as u8;
                    b1 = (saved & 0xff) as u8;
                    b2 = input[in_idx];
                    in_idx += 1;
                }
            }
            carry_count = 0;
            saved = 0;

            encode_triplet(uubuf, line_progress, b0, b1, b2);
            line_progress += 3;
        }

        if line_progress >= LINE_BYTES {
            output[out_idx] = uu_char(LINE_BYTES as u8);
            out_idx += 1;
            output[out_idx..out_idx + LINE_CHARS].copy_from_slice(&uubuf[..LINE_CHARS]);
            out_idx += LINE_CHARS;
            output[out_idx] = b'\n';
            out_idx += 1;
            line_progress = 0;

            // more input might complete another full line
            if input.len() - in_idx >= 3 {
                continue;
            }
        }

        break;
    }

    // Carry 0, 1, or 2 leftover bytes for the next call. `carry_count` here
    // may itself still be nonzero: if the inner loop broke on its very
    // first check (old carry plus this call's input never reached 3
    // bytes), no triplet was formed and the pre-existing carried byte(s)
    // must be folded in alongside whatever's left of `input`, not replaced
    // by it. `available < 3` at every break point guarantees the combined
    // total never exceeds 2.
    let leftover = input.len() - in_idx;
    match carry_count + leftover {
        0 => {}
        1 => {
            let b = if carry_count == 1 {
                (saved & 0xff) as u8
            } else {
                input[in_idx]
            };
            saved = b as u32;
            carry_count = 1;
        }
        _ => {
            let (b0, b1) = match carry_count {
                0 => (input[in_idx], input[in_idx + 1]),
                1 => ((saved & 0xff) as u8, input[in_idx]),
                _ => (((saved >> 8) & 0xff) as u8, (saved & 0xff) as u8),
            };
            saved = ((b0 as u32) << 8) | b1 as u32;
            carry_count = 2;
        }
    }

    *save = saved;
    *state = enc_pack(carry_count, line_progress);
    out_idx
}

/// Flushes any residual bytes (padding with zero bytes to a full triplet,
/// while recording the true decoded length), emits the final partial line
/// if any, then the zero-length terminator line.
pub(crate) fn encode_close(
    input: &[u8],
    output: &mut [u8],
    uubuf: &mut [u8; 60],
    state: &mut i32,
    save: &mut u32,
) -> usize {
    let mut out_idx = 0usize;
    if !input.is_empty() {
        out_idx += encode_step(input, &mut output[out_idx..], uubuf, state, save);
    }

    let carry_count = enc_carry_count(*state);
    let mut line_progress = enc_line_progress(*state);
    let saved = *save;

    if carry_count > 0 {
        // carry_count == 1: the single carried byte sits in saved's low
        // byte (see encode_step's single-byte carry assignment). Pad the
        // rest of the triplet with zero bytes; the length byte below
        // records the true (unpadded) decoded count.
        let (b0, b1) = if carry_count == 1 {
            ((saved & 0xff) as u8, 0u8)
        } else {
            (((saved >> 8) & 0xff) as u8, (saved & 0xff) as u8)
        };
        encode_triplet(uubuf, line_progress, b0, b1, 0);
        line_progress += carry_count;
    }

    if line_progress > 0 {
        let cplen = ((line_progress + 2) / 3) * 4;
        output[out_idx] = uu_char(line_progress as u8);
        out_idx += 1;
        output[out_idx..out_idx + cplen].copy_from_slice(&uubuf[..cplen]);
        out_idx += cplen;
        output[out_idx] = b'\n';
        out_idx += 1;
    }

    output[out_idx] = uu_char(0);
    output[out_idx + 1] = b'\n';
    out_idx += 2;

    *state = 0;
    *save = 0;
    out_idx
}

/// Decodes uuencoded lines. Skips `\n` delimiters; the first non-newline
/// byte of a line is its length byte. A zero length latches end-of-stream
/// and halts further decoding (subsequent calls return 0 without
/// consuming input). Lines that run past their declared length have the
/// excess silently dropped.
pub(crate) fn decode_step(input: &[u8], output: &mut [u8], state: &mut i32, save: &mut u32) -> usize {
    if dec_at_end(*state) {
        return 0;
    }

    let mut quartet_progress = dec_quartet_progress(*state);
    let mut line_budget = dec_line_budget(*state);
    let mut saved = *save;
    let mut out_idx = 0usize;
    let mut at_end = false;
    let mut last_was_eoln = line_budget == 0;

    let mut i = 0usize;
    while i < input.len() {
        let c = input[i];
        if c == b'\n' {
            last_was_eoln = true;
            i += 1;
            continue;
        }

        if line_budget == 0 || last_was_eoln {
            line_budget = UU_RANK[c as usize] as usize;
            last_was_eoln = false;
            if line_budget == 0 {
                at_end = true;
                break;
            }
            i += 1;
            continue;
        }

        saved = (saved << 8) | c as u32;
        quartet_progress += 1;
        i += 1;

        if quartet_progress == 4 {
            let b0 = ((saved >> 24) & 0xff) as u8;
            let b1 = ((saved >> 16) & 0xff) as u8;
            let b2 = ((saved >> 8) & 0xff) as u8;
            let b3 = (saved & 0xff) as u8;

            if line_budget >= 3 {
                output[out_idx] = (UU_RANK[b0 as usize] << 2) | (UU_RANK[b1 as usize] >> 4);
                output[out_idx + 1] = (UU_RANK[b1 as usize] << 4) | (UU_RANK[b2 as usize] >> 2);
                output[out_idx + 2] = (UU_RANK[b2 as usize] << 6) | UU_RANK[b3 as usize];
                out_idx += 3;
                line_budget -= 3;
            } else {
                output[out_idx] = (UU_RANK[b0 as usize] << 2) | (UU_RANK[b1 as usize] >> 4);
                out_idx += 1;
                line_budget -= 1;

                if line_budget >= 1 {
                    output[out_idx] = (UU_RANK[b1 as usize] << 4) | (UU_RANK[b2 as usize] >> 2);
                    out_idx += 1;
                    line_budget -= 1;
                }
            }

            quartet_progress = 0;
            saved = 0;
        }
    }

    *save = saved;
    *state = dec_pack(quartet_progress, line_budget, at_end);
    out_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_all(input: &[u8]) -> Vec<u8> {
        let mut state = 0i32;
        let mut save = 0u32;
        let mut uubuf = [0u8; 60];
        let mut out = vec![0u8; encode_outlen(input.len()) + 64];
        let n1 = encode_step(input, &mut out, &mut uubuf, &mut state, &mut save);
        let n2 = encode_close(&[], &mut out[n1..], &mut uubuf, &mut state, &mut save);
        out.truncate(n1 + n2);
        out
    }

    fn decode_all(input: &[u8]) -> Vec<u8> {
        let mut state = 0i32;
        let mut save = 0u32;
        let mut out = vec![0u8; decode_outlen(input.len())];
        let n = decode_step(input, &mut out, &mut state, &mut save);
        out.truncate(n);
        out
    }

    #[test]
    fn encode_cat() {
        // length byte for 3 decoded bytes is '#' (3 + 0x20)
        assert_eq!(encode_all(b"Cat"), b"#0V%T\n`\n");
    }

    #[test]
    fn decode_cat() {
        assert_eq!(decode_all(b"#0V%T\n`\n"), b"Cat");
    }

    #[test]
    fn encode_full_line_then_terminator() {
        let input: Vec<u8> = (0u8..45).collect();
        let out = encode_all(&input);
        let mut lines = out.split(|&b| b == b'\n');
        let first = lines.next().unwrap();
        assert_eq!(first.len(), 61); // length byte + 60 data chars
        assert_eq!(first[0], uu_char(45));
        assert_eq!(lines.next().unwrap(), b"`");
    }

    #[test]
    fn decode_after_end_returns_zero() {
        let mut state = dec_pack(0, 0, true);
        let mut save = 0u32;
        let mut out = [0u8; 8];
        assert_eq!(decode_step(b"#0V%T\n", &mut out, &mut state, &mut save), 0);
    }

    #[test]
    fn decode_tolerates_line_running_past_declared_length() {
        // declare a length of 1 but supply a full quartet (4 chars); only
        // the first decoded byte should be kept
        let mut out = [0u8; 8];
        let mut state = 0i32;
        let mut save = 0u32;
        let n = decode_step(b"!0V%T\n`\n", &mut out, &mut state, &mut save);
        assert_eq!(&out[..n], &b"C"[..]);
    }

    #[test]
    fn round_trip_arbitrary_bytes() {
        let input: Vec<u8> = (0u8..=255).cycle().take(500).collect();
        let encoded = encode_all(&input);
        let decoded = decode_all(&encoded);
        assert_eq!(decoded, input);
    }

    #[test]
    fn encode_byte_at_a_time_carries_pending_bytes_across_short_calls() {
        // each call's input alone is shorter than a triplet, so every
        // call must fold the byte(s) already carried from prior calls in
        // with the new one rather than discarding them
        let mut state = 0i32;
        let mut save = 0u32;
        let mut uubuf = [0u8; 60];
        let mut out = vec![0u8; encode_outlen(3) + 64];
        let mut written = 0;
        for &b in b"Cat" {
            written += encode_step(&[b], &mut out[written..], &mut uubuf, &mut state, &mut save);
        }
        written += encode_close(&[], &mut out[written..], &mut uubuf, &mut state, &mut save);
        out.truncate(written);

        assert_eq!(out, b"#0V%T\n`\n");
    }

    #[test]
    fn chunking_is_invariant_for_encode() {
        let input: Vec<u8> = (0u8..=255).cycle().take(300).collect();
        let whole = encode_all(&input);

        let mut state = 0i32;
        let mut save = 0u32;
        let mut uubuf = [0u8; 60];
        let mut out = vec![0u8; encode_outlen(input.len()) + 64];
        let mut written = 0;
        for chunk in input.chunks(11) {
            written += encode_step(chunk, &mut out[written..], &mut uubuf, &mut state, &mut save);
        }
        written += encode_close(&[], &mut out[written..], &mut uubuf, &mut state, &mut save);
        out.truncate(written);

        assert_eq!(whole, out);
    }
}
