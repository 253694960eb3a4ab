use std::env;

use eyre::{eyre, Result};

/// build a standardized output path for the given parameters. follows the following cases:
/// - if `output` is the default directory name (`output`), return `{cwd}/output/{filename}`
/// - otherwise, return `{output}/{filename}`
pub(crate) fn build_output_path(output: &str, filename: &str) -> Result<String> {
    // if output is the default value, build a path under the working directory
    if output == "output" {
        let cwd = env::current_dir()?
            .into_os_string()
            .into_string()
            .map_err(|_| eyre!("Unable to get current working directory"))?;

        return Ok(format!("{}/output/{}", cwd, filename));
    }

    // output is specified, return the path
    Ok(format!("{}/{}", output.trim_end_matches('/'), filename))
}

/// prefix `filename` with the user supplied `name`, if any
pub(crate) fn build_filename(name: &str, filename: &str) -> String {
    if name.is_empty() {
        filename.to_string()
    } else {
        format!("{}-{}", name, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_default() {
        let path = build_output_path("output", "disassembled.asm");
        assert!(path.expect("failed to build output path").ends_with("/output/disassembled.asm"));
    }

    #[test]
    fn test_output_specified() {
        let path = build_output_path("/some_dir/", "result.json");
        assert_eq!(path.expect("failed to build output path"), "/some_dir/result.json");
    }

    #[test]
    fn test_filename() {
        assert_eq!(build_filename("", "result.json"), "result.json");
        assert_eq!(build_filename("countdown", "result.json"), "countdown-result.json");
    }
}
