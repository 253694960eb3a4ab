use crate::{constants::BYTECODE_REGEX, utils::strings::decode_hex, Error};
use std::fs;
use tracing::{debug, error};

/// Given a target, determines whether it is raw bytecode or a file path, and returns the bytecode
/// for the target.
///
/// ```
/// use regvm_common::bytecode::get_bytecode_from_target;
///
/// let bytecode = get_bytecode_from_target("0x0f000e").expect("failed to resolve target");
/// assert_eq!(bytecode, vec![0x0f, 0x00, 0x0e]);
/// ```
pub fn get_bytecode_from_target(target: &str) -> Result<Vec<u8>, Error> {
    if BYTECODE_REGEX.is_match(target).unwrap_or(false) {
        debug!("target is raw bytecode");
        return Ok(decode_hex(target)?);
    }

    // target is a file path, so we need to read the bytecode from the file
    let contents = fs::read_to_string(target).map_err(|e| {
        error!("failed to open file '{}' .", &target);
        Error::FilesystemError(e)
    })?;

    if BYTECODE_REGEX.is_match(&contents).unwrap_or(false) {
        debug!("read bytecode from file '{}'", &target);
        Ok(decode_hex(&contents)?)
    } else {
        error!("file '{}' doesn't contain valid bytecode.", &target);
        Err(Error::ParseError(format!("file '{}' doesn't contain valid bytecode.", &target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, contents).expect("failed to write temp file");
        path
    }

    #[test]
    fn test_get_bytecode_when_target_is_bytecode() {
        let bytecode = get_bytecode_from_target("0x01000501010703000001030200010F000E")
            .expect("failed to get bytecode from target");

        assert_eq!(bytecode.len(), 17);
        assert_eq!(bytecode[0], 0x01);
        assert_eq!(bytecode[16], 0x0e);
    }

    #[test]
    fn test_get_bytecode_when_target_is_odd_length() {
        assert!(get_bytecode_from_target("0x0e0").is_err());
    }

    #[test]
    fn test_get_bytecode_when_target_is_file_path() {
        let path = temp_file("regvm_test_bytecode.hex", "0x0100050f00\n0e\n");

        let bytecode = get_bytecode_from_target(path.to_str().expect("invalid path"))
            .expect("failed to get bytecode from target");
        assert_eq!(bytecode, vec![0x01, 0x00, 0x05, 0x0f, 0x00, 0x0e]);

        fs::remove_file(path).expect("failed to remove temp file");
    }

    #[test]
    fn test_get_bytecode_when_file_is_not_bytecode() {
        let path = temp_file("regvm_test_not_bytecode.txt", "hello world");

        let result = get_bytecode_from_target(path.to_str().expect("invalid path"));
        assert!(matches!(result, Err(Error::ParseError(_))));

        fs::remove_file(path).expect("failed to remove temp file");
    }

    #[test]
    fn test_get_bytecode_when_file_is_missing() {
        let result = get_bytecode_from_target("./this/file/does/not/exist.hex");
        assert!(matches!(result, Err(Error::FilesystemError(_))));
    }
}
