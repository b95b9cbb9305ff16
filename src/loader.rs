// Program image loader: parses .ls8 text images into bytes

use crate::config::MEMORY_SIZE;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for image loading
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid Number: {token}")]
    InvalidNumber { line: usize, token: String },
    #[error("Program of {len} bytes does not fit in {capacity} bytes of memory")]
    ProgramTooLarge { len: usize, capacity: usize },
}

/// Parse an image: one base-2 byte per line, `#` starts a comment, blank
/// lines are skipped.
pub fn parse_image(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut bytes = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let token = line.split('#').next().unwrap_or_default().trim();
        let value = u8::from_str_radix(token, 2).map_err(|_| LoadError::InvalidNumber {
            line: index + 1,
            token: token.to_string(),
        })?;
        bytes.push(value);
    }

    if bytes.len() > MEMORY_SIZE {
        return Err(LoadError::ProgramTooLarge {
            len: bytes.len(),
            capacity: MEMORY_SIZE,
        });
    }

    crate::debug_loader!("Parsed {} bytes", bytes.len());
    Ok(bytes)
}

/// Read and parse the image at `path`
pub fn load_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    crate::debug_loader!("Loading {}", path.display());
    parse_image(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::{InstructionExecutor, MachineStatus, VMState};

    fn run_image(source: &str) -> (MachineStatus, Vec<u8>) {
        let program = parse_image(source).unwrap();
        let mut state = VMState::with_program(&program).unwrap();
        let mut out: Vec<u8> = Vec::new();
        let status = InstructionExecutor::new().run(&mut state, &mut out);
        (status, out)
    }

    #[test]
    fn test_parse_print8() {
        let bytes = parse_image(include_str!("../programs/print8.ls8")).unwrap();
        assert_eq!(bytes, vec![0b1000_0010, 0, 8, 0b0100_0111, 0, 0b0000_0001]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let source = "\n# header comment\n   # indented comment\n\n  00000001   # HLT\n\t10\n";
        assert_eq!(parse_image(source).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_image("00000001\n102\n").unwrap_err();
        match &err {
            LoadError::InvalidNumber { line, token } => {
                assert_eq!(*line, 2);
                assert_eq!(token, "102");
            }
            other => panic!("Unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "Invalid Number: 102");
    }

    #[test]
    fn test_value_wider_than_a_byte() {
        assert!(matches!(
            parse_image("100000000"),
            Err(LoadError::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn test_program_too_large() {
        let source = "00000000\n".repeat(MEMORY_SIZE + 1);
        assert!(matches!(
            parse_image(&source),
            Err(LoadError::ProgramTooLarge { len, capacity: MEMORY_SIZE }) if len == MEMORY_SIZE + 1
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("programs/does-not-exist.ls8")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("programs/mult.ls8");
        assert_eq!(load_file(&path).unwrap().len(), 12);
    }

    #[test]
    fn test_run_sample_programs() {
        assert_eq!(
            run_image(include_str!("../programs/print8.ls8")),
            (MachineStatus::Halted, vec![8])
        );
        assert_eq!(
            run_image(include_str!("../programs/mult.ls8")),
            (MachineStatus::Halted, vec![72])
        );
        assert_eq!(
            run_image(include_str!("../programs/stack.ls8")),
            (MachineStatus::Halted, vec![2, 4, 1])
        );
        assert_eq!(
            run_image(include_str!("../programs/call.ls8")),
            (MachineStatus::Halted, vec![20, 30, 36, 60])
        );
    }
}
