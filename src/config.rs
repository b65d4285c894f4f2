//! Launch descriptors as JSON.
//!
//! Descriptors come from a file or from stdin and are parsed with serde_json.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::LaunchError;
use crate::launch::Launch;

/// Parse a descriptor from `reader`.
pub fn read_launch<R: Read>(mut reader: R) -> Result<Launch, LaunchError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(LaunchError::Read)?;
    let launch: Launch = serde_json::from_slice(&buf)?;
    debug!(args = launch.args.len(), "read launch descriptor");
    Ok(launch)
}

/// Parse the descriptor stored at `path`.
pub fn load_launch(path: &Path) -> Result<Launch, LaunchError> {
    let file = File::open(path).map_err(LaunchError::Read)?;
    read_launch(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::Stdio;
    use std::io::Write;

    #[test]
    fn reads_from_any_reader() {
        let json = br#"{"args": ["tool.exe", "a b"], "stdout": "inherit"}"#;
        let launch = read_launch(&json[..]).unwrap();
        assert_eq!(launch.args, vec!["tool.exe", "a b"]);
        assert_eq!(launch.stdout, Stdio::Inherit);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = read_launch(&b"{\"args\": "[..]).unwrap_err();
        assert!(matches!(err, LaunchError::Parse(_)));
    }

    #[test]
    fn rejects_missing_args() {
        let err = read_launch(&b"{}"[..]).unwrap_err();
        assert!(matches!(err, LaunchError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"args": ["agent"], "creation_flags": 16}"#)
            .unwrap();
        let launch = load_launch(file.path()).unwrap();
        assert_eq!(launch.args, vec!["agent"]);
        assert_eq!(launch.creation_flags, 16);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_launch(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LaunchError::Read(_)));
    }
}
