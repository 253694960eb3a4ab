use fancy_regex::Regex;
use lazy_static::lazy_static;

lazy_static! {
    /// The following regex is used to validate raw bytecode targets. Whitespace between digits is
    /// allowed, so a listing split over several lines still matches.
    pub static ref BYTECODE_REGEX: Regex =
        Regex::new(r"^(?:0[xX])?[0-9a-fA-F\s]*$").expect("failed to compile regex");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytecode_regex() {
        assert!(BYTECODE_REGEX.is_match("0x0100050e").unwrap_or(false));
        assert!(BYTECODE_REGEX.is_match("01 00 05\n0e").unwrap_or(false));
        assert!(BYTECODE_REGEX.is_match("0E").unwrap_or(false));
        assert!(!BYTECODE_REGEX.is_match("./program.hex").unwrap_or(false));
        assert!(!BYTECODE_REGEX.is_match("0xzz").unwrap_or(false));
    }
}
