//! Character classes used by the scanner.

/// ASCII whitespace: space, tab, line feed, vertical tab, form feed and
/// carriage return.
#[inline]
pub fn is_white_space(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Check if a byte is a decimal digit.
#[inline]
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Identifiers start with an ASCII letter.
#[inline]
pub fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

/// Check if a byte can continue an identifier.
#[inline]
pub fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}
