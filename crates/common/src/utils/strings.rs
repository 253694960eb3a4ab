use eyre::{bail, eyre, Result};

/// Decodes a hex string into a vector of bytes. A leading `0x` and any whitespace are ignored.
///
/// ```
/// use regvm_common::utils::strings::decode_hex;
///
/// let result = decode_hex("0x0100 05\n0e").expect("should decode hex");
/// assert_eq!(result, vec![0x01, 0x00, 0x05, 0x0e]);
///
/// assert!(decode_hex("0e0").is_err());
/// assert!(decode_hex("0g").is_err());
/// ```
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    // normalize
    let s = s.trim();
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let s = s.chars().filter(|c| !c.is_whitespace()).collect::<String>();

    if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
        bail!("invalid hex string: unexpected character '{}'", c);
    }
    if s.len() % 2 != 0 {
        bail!("invalid hex string: odd number of digits ({})", s.len());
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| eyre!("invalid hex string: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("01000A").expect("should decode"), vec![0x01, 0x00, 0x0a]);
        assert_eq!(decode_hex("0X0e").expect("should decode"), vec![0x0e]);
        assert_eq!(decode_hex("  0x\t").expect("should decode"), Vec::<u8>::new());
        assert_eq!(decode_hex("").expect("should decode"), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_rejects_bad_input() {
        assert!(decode_hex("0x1").is_err());
        assert!(decode_hex("0x+1").is_err());
        assert!(decode_hex("xx").is_err());
        assert!(decode_hex("0é").is_err());
    }
}
