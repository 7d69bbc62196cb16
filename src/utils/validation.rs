use crate::utils::error::{ArchiveError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Returns the path when it was supplied and is non-empty, otherwise `missing`.
pub fn require_directory<'a>(
    path: Option<&'a Path>,
    missing: ArchiveError,
) -> Result<&'a Path> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Err(missing),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(ArchiveError::InvalidConfigValue {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if raw.as_encoded_bytes().contains(&0) {
        return Err(ArchiveError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
