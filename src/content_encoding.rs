//! The Content-Transfer-Encoding name table (§4.5 of the design doc): a
//! trivial, case-insensitive, leading-whitespace-tolerant string-to-tag
//! mapping. Not a MIME grammar parser — it accepts exactly the token the
//! reference accepts and nothing more.

use std::fmt;

/// Which codec (if any) a `Content-Transfer-Encoding` header names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentEncoding {
    /// Passthrough; lines are assumed short enough for 7bit transport.
    SevenBit,
    /// Passthrough; no line-length assumption.
    EightBit,
    /// Passthrough; arbitrary binary data.
    Binary,
    Base64,
    QuotedPrintable,
    Uuencode,
}

impl ContentEncoding {
    /// `true` for the three passthrough encodings, which `step`/`flush`
    /// implement as a verbatim copy.
    pub(crate) fn is_identity(self) -> bool {
        matches!(
            self,
            ContentEncoding::SevenBit | ContentEncoding::EightBit | ContentEncoding::Binary
        )
    }

    /// The canonical spelling used when round-tripping back to a header
    /// value. Note uuencode's canonical spelling is `x-uuencode`, not the
    /// plain `uuencode` some senders write.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentEncoding::SevenBit => "7bit",
            ContentEncoding::EightBit => "8bit",
            ContentEncoding::Binary => "binary",
            ContentEncoding::Base64 => "base64",
            ContentEncoding::QuotedPrintable => "quoted-printable",
            ContentEncoding::Uuencode => "x-uuencode",
        }
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_lwsp(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r' || b == b'\n'
}

/// Case-insensitively matches `str`'s leading bytes against `value`,
/// requiring that the match be followed by either the end of the string or
/// linear whitespace (so e.g. `"base64x"` does not match `"base64"`).
fn is(bytes: &[u8], value: &str) -> bool {
    let value = value.as_bytes();
    if bytes.len() < value.len() {
        return false;
    }
    if !bytes[..value.len()].eq_ignore_ascii_case(value) {
        return false;
    }
    match bytes.get(value.len()) {
        None => true,
        Some(&b) => is_lwsp(b),
    }
}

/// Parses a `Content-Transfer-Encoding` header value into its tag. Unknown
/// or unrecognized values fall back to [`ContentEncoding::SevenBit`], per
/// the reference's `GMIME_CONTENT_ENCODING_DEFAULT`; this function never
/// fails. Leading whitespace is skipped first.
///
/// For a stricter constructor that rejects unrecognized names instead of
/// defaulting, see [`crate::EncodingState::for_name`].
pub fn from_str(s: &str) -> ContentEncoding {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && is_lwsp(bytes[i]) {
        i += 1;
    }
    let rest = &bytes[i..];

    if is(rest, "7bit") || is(rest, "7-bit") {
        ContentEncoding::SevenBit
    } else if is(rest, "8bit") || is(rest, "8-bit") {
        ContentEncoding::EightBit
    } else if is(rest, "binary") {
        ContentEncoding::Binary
    } else if is(rest, "base64") {
        ContentEncoding::Base64
    } else if is(rest, "quoted-printable") {
        ContentEncoding::QuotedPrintable
    } else if is(rest, "uuencode") || is(rest, "x-uuencode") || is(rest, "x-uue") {
        ContentEncoding::Uuencode
    } else {
        ContentEncoding::SevenBit
    }
}
