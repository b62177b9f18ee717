//! Document enumeration.

use std::fs;
use std::path::PathBuf;

use crate::error::{Result, TextSimError};

/// Source of raw documents.
///
/// A document's identity is its position in the returned sequence, so
/// implementations must enumerate deterministically. `limit` caps how many
/// documents are returned, applied in enumeration order; `None` means no
/// cap.
pub trait DocumentLoader {
    fn load_documents(&self, limit: Option<usize>) -> Result<Vec<String>>;
}

/// Loads every regular file directly under a directory as one UTF-8
/// document, in path order.
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl DocumentLoader for DirLoader {
    fn load_documents(&self, limit: Option<usize>) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| TextSimError::resource(&self.root, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TextSimError::resource(&self.root, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        // enumeration order of the filesystem is arbitrary; sort for a
        // stable document order
        files.sort();
        if let Some(limit) = limit {
            files.truncate(limit);
        }

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let text = fs::read_to_string(&path).map_err(|e| TextSimError::malformed(&path, e))?;
            documents.push(text);
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use super::*;

    fn write_file(dir: &std::path::Path, name: &str, content: &[u8]) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(content).unwrap();
    }

    #[test]
    fn documents_come_back_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.txt", b"second");
        write_file(dir.path(), "a.txt", b"first");
        write_file(dir.path(), "c.txt", b"third");

        let docs = DirLoader::new(dir.path()).load_documents(None).unwrap();
        assert_eq!(docs, vec!["first", "second", "third"]);
    }

    #[test]
    fn limit_caps_enumeration() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            write_file(dir.path(), &format!("{i}.txt"), format!("doc {i}").as_bytes());
        }
        let loader = DirLoader::new(dir.path());
        assert_eq!(loader.load_documents(Some(1)).unwrap(), vec!["doc 0"]);
        assert_eq!(loader.load_documents(Some(0)).unwrap().len(), 0);
        assert_eq!(loader.load_documents(Some(99)).unwrap().len(), 5);
    }

    #[test]
    fn empty_directory_yields_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let docs = DirLoader::new(dir.path()).load_documents(None).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn missing_directory_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirLoader::new(dir.path().join("absent"));
        let err = loader.load_documents(None).unwrap_err();
        assert!(matches!(err, TextSimError::ResourceUnavailable { .. }));
    }

    #[test]
    fn non_utf8_file_is_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "bad.txt", &[0xff, 0xfe, 0x80]);
        let err = DirLoader::new(dir.path()).load_documents(None).unwrap_err();
        assert!(matches!(err, TextSimError::MalformedInput { .. }));
    }
}
