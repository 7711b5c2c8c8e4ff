//! Control codes of the message format

/// Ends the displayed message
pub const END_OF_MESSAGE: u8 = 0x02;

/// Bytes that appear literally in the script; everything else is escaped
pub fn is_printable(byte: u8) -> bool {
    matches!(byte, b' '..=b'}') && byte != b'\\'
}

/// Number of parameter bytes that follow a control code
pub fn parameter_len(code: u8) -> usize {
    match code {
        0x05 | 0x06 | 0x0C | 0x0E | 0x11 | 0x13 | 0x14 | 0x1E => 1,
        0x07 | 0x12 => 2,
        0x15 => 3,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_set() {
        assert!(is_printable(b' '));
        assert!(is_printable(b'A'));
        assert!(is_printable(b'}'));
        assert!(!is_printable(b'\\'));
        assert!(!is_printable(b'~'));
        assert!(!is_printable(0x7F));
        assert!(!is_printable(0x1F));
        assert!(!is_printable(0x80));
    }

    #[test]
    fn test_parameter_lengths() {
        assert_eq!(parameter_len(END_OF_MESSAGE), 0);
        assert_eq!(parameter_len(0x01), 0);
        assert_eq!(parameter_len(0x13), 1);
        assert_eq!(parameter_len(0x12), 2);
        assert_eq!(parameter_len(0x15), 3);
        assert_eq!(parameter_len(0xFF), 0);
    }
}
