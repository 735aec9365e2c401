use thiserror::Error;

use crate::constants::ACCEPTED_EXTENSION;

/// Why a submission was turned away before reaching the decoder.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Unsupported file format: {0:?}. Please select only GLB files.")]
    UnsupportedFormat(String),
    #[error("A load is already in progress.")]
    LoadInFlight,
}

/// A named file that passed the gate, read fully into memory.
/// Consumed exactly once by the decode task.
pub struct SubmittedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Case-insensitive check against the accepted scene extension.
pub fn extension_accepted(name: &str) -> bool {
    name.to_ascii_lowercase()
        .ends_with(&format!(".{ACCEPTED_EXTENSION}"))
}

/// Gate a submission by file name, keeping the reason on rejection.
pub fn validate_submission(name: &str) -> Result<(), IntakeError> {
    if extension_accepted(name) {
        Ok(())
    } else {
        Err(IntakeError::UnsupportedFormat(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_glb_in_any_case() {
        assert!(extension_accepted("model.glb"));
        assert!(extension_accepted("MODEL.GLB"));
        assert!(extension_accepted("Scene.Glb"));
        assert!(extension_accepted("some dir/with spaces/asset.glb"));
    }

    #[test]
    fn test_rejects_other_names() {
        assert!(!extension_accepted("model.gltf"));
        assert!(!extension_accepted("model.glb.txt"));
        assert!(!extension_accepted("model"));
        assert!(!extension_accepted("glb"));
        assert!(!extension_accepted(""));
        assert!(!extension_accepted("archive.zip"));
    }

    #[test]
    fn test_validate_keeps_rejected_name() {
        assert!(validate_submission("model.glb").is_ok());
        match validate_submission("photo.png") {
            Err(IntakeError::UnsupportedFormat(name)) => assert_eq!(name, "photo.png"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }
}
