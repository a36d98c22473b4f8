pub mod encoder;
pub mod inference;
pub mod tree;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::ArtifactError;

/// Reads and deserializes one JSON artifact.
pub(crate) fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }

    if path.is_dir() {
        return Err(ArtifactError::NotAFile(path.to_path_buf()));
    }

    let data = std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice::<T>(&data).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
