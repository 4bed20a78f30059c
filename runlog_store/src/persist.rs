use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::PersistError;

/// A whole-document JSON file, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistError + '_ {
        move |source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Load the document, creating and persisting an empty one when the file
    /// does not exist yet. A zero-length file also reads as empty.
    pub fn load_or_create<T>(&self) -> Result<T, PersistError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(Self::io_error(parent))?;
        }

        if !self.path.exists() {
            debug!("Data file does not exist, creating {}", self.path.display());
            let document = T::default();
            self.save(&document)?;
            return Ok(document);
        }

        let content = fs::read_to_string(&self.path).map_err(Self::io_error(&self.path))?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&content).map_err(|source| PersistError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Encode the full document, write it next to the target and rename it
    /// into place.
    pub fn save<T: Serialize>(&self, document: &T) -> Result<(), PersistError> {
        let json = serde_json::to_vec_pretty(document).map_err(|source| PersistError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, &json).map_err(Self::io_error(&tmp_path))?;
        fs::rename(&tmp_path, &self.path).map_err(Self::io_error(&self.path))?;

        debug!("Saved {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Default, PartialEq, Serialize, serde::Deserialize)]
    struct Doc {
        #[serde(default)]
        items: BTreeMap<i64, String>,
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn missing_file_is_created_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("doc.json");
        let file = JsonFile::new(path.clone());

        let doc: Doc = file.load_or_create().expect("load should create the file");
        assert_eq!(doc, Doc::default());
        assert!(path.exists());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn empty_file_reads_as_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.json");
        fs::write(&path, "").expect("write empty file");

        let doc: Doc = JsonFile::new(path).load_or_create().expect("empty file is valid");
        assert!(doc.items.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn save_replaces_file_and_leaves_no_temp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.json");
        let file = JsonFile::new(path.clone());

        let mut doc = Doc::default();
        doc.items.insert(7, "seven".to_string());
        file.save(&doc).expect("save");

        let loaded: Doc = file.load_or_create().expect("reload");
        assert_eq!(loaded, doc);
        assert!(!dir.path().join("doc.json.tmp").exists());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.json");
        fs::write(&path, "{not json").expect("write garbage");

        let result: Result<Doc, _> = JsonFile::new(path).load_or_create();
        assert!(matches!(result, Err(PersistError::Decode { .. })));
    }
}
