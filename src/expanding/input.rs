//! The write operand union.

use bytes::Bytes;

/// Anything an [`Expanding`](super::Expanding) resource can append.
///
/// Every variant is normalized once by [`WriteInput::into_bytes`]. Numeric
/// values keep their low 8 bits (two's complement), so `-65535` becomes
/// `0x01` and `256` becomes `0x00`.
///
/// # Example
///
/// ```
/// use bytepump::WriteInput;
///
/// assert_eq!(&WriteInput::from("hi").into_bytes()[..], b"hi");
/// assert_eq!(&WriteInput::from(-65535).into_bytes()[..], &[0x01]);
/// assert_eq!(&WriteInput::from(vec![72i64, 361]).into_bytes()[..], b"Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteInput {
    /// Raw bytes, appended as-is.
    Bytes(Bytes),
    /// A list of byte values, each truncated to 8 bits.
    Values(Vec<i64>),
    /// Text, appended as UTF-8.
    Text(String),
    /// A single byte value, truncated to 8 bits.
    Byte(i64),
}

impl WriteInput {
    /// Normalizes the operand to its byte representation.
    pub fn into_bytes(self) -> Bytes {
        match self {
            WriteInput::Bytes(bytes) => bytes,
            WriteInput::Values(values) => values.into_iter().map(truncate).collect(),
            WriteInput::Text(text) => Bytes::from(text),
            WriteInput::Byte(value) => Bytes::copy_from_slice(&[truncate(value)]),
        }
    }
}

fn truncate(value: i64) -> u8 {
    value as u8
}

impl From<Bytes> for WriteInput {
    fn from(bytes: Bytes) -> Self {
        WriteInput::Bytes(bytes)
    }
}

impl From<Vec<u8>> for WriteInput {
    fn from(bytes: Vec<u8>) -> Self {
        WriteInput::Bytes(bytes.into())
    }
}

impl From<&[u8]> for WriteInput {
    fn from(bytes: &[u8]) -> Self {
        WriteInput::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl<const N: usize> From<&[u8; N]> for WriteInput {
    fn from(bytes: &[u8; N]) -> Self {
        WriteInput::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Vec<i64>> for WriteInput {
    fn from(values: Vec<i64>) -> Self {
        WriteInput::Values(values)
    }
}

impl From<&[i64]> for WriteInput {
    fn from(values: &[i64]) -> Self {
        WriteInput::Values(values.to_vec())
    }
}

impl From<String> for WriteInput {
    fn from(text: String) -> Self {
        WriteInput::Text(text)
    }
}

impl From<&str> for WriteInput {
    fn from(text: &str) -> Self {
        WriteInput::Text(text.to_owned())
    }
}

impl From<u8> for WriteInput {
    fn from(value: u8) -> Self {
        WriteInput::Byte(value.into())
    }
}

impl From<i32> for WriteInput {
    fn from(value: i32) -> Self {
        WriteInput::Byte(value.into())
    }
}

impl From<i64> for WriteInput {
    fn from(value: i64) -> Self {
        WriteInput::Byte(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_pass_through() {
        let input = WriteInput::from(&b"\x00\xff"[..]);
        assert_eq!(&input.into_bytes()[..], &[0x00, 0xff]);
    }

    #[test]
    fn test_text_is_utf8() {
        assert_eq!(&WriteInput::from("é").into_bytes()[..], &[0xc3, 0xa9]);
    }

    #[test]
    fn test_numeric_truncation() {
        assert_eq!(&WriteInput::from(-65535).into_bytes()[..], &[0x01]);
        assert_eq!(&WriteInput::from(-1).into_bytes()[..], &[0xff]);
        assert_eq!(&WriteInput::from(256).into_bytes()[..], &[0x00]);
        assert_eq!(&WriteInput::from(0x1_2345i64).into_bytes()[..], &[0x45]);
        assert_eq!(&WriteInput::from(7u8).into_bytes()[..], &[0x07]);
    }

    #[test]
    fn test_values_truncate_each() {
        let input = WriteInput::from(&[65i64, -191, 512][..]);
        assert_eq!(&input.into_bytes()[..], &[65, 65, 0]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(WriteInput::from("").into_bytes().is_empty());
        assert!(WriteInput::from(Vec::<i64>::new()).into_bytes().is_empty());
    }
}
