use crate::error::{KwicError, KwicResult};
use crate::index::concordance::{KwicIndex, Postings};
use crate::index::types::{IndexMeta, WindowWidth, INDEX_VERSION};
use crate::index::writer::{HEADER_LEN, MAGIC};
use memmap2::Mmap;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Owned counterpart of the writer's payload; field order must match
#[derive(Deserialize)]
struct Payload {
    meta: IndexMeta,
    postings: Postings,
}

fn corrupt(reason: impl Into<String>) -> KwicError {
    KwicError::Deserialization(reason.into())
}

/// Reconstruct an index from bytes produced by [`save`](crate::index::writer::save)
pub fn load(bytes: &[u8]) -> KwicResult<KwicIndex> {
    if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err(corrupt("not a KWIC index file"));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[MAGIC.len()..HEADER_LEN]);
    let version = u32::from_le_bytes(version);
    if version != INDEX_VERSION {
        return Err(corrupt(format!(
            "unsupported index version {} (expected {})",
            version, INDEX_VERSION
        )));
    }

    let payload: Payload = bincode::deserialize(&bytes[HEADER_LEN..])?;

    let width = WindowWidth::new(payload.meta.width.get())
        .map_err(|e| corrupt(e.to_string()))?;

    // A window of the wrong length would be mis-sliced at render time
    for (term, occurrences) in &payload.postings {
        if let Some(bad) = occurrences.iter().find(|o| o.window.len() != width.get()) {
            return Err(corrupt(format!(
                "window for {:?} has {} tokens, expected {}",
                term,
                bad.window.len(),
                width.get()
            )));
        }
    }

    Ok(KwicIndex::from_parts(payload.meta, payload.postings))
}

/// A loaded index together with where it came from
pub struct IndexReader {
    path: PathBuf,
    file_size: u64,
    index: KwicIndex,
}

impl IndexReader {
    /// Memory-map an index file and decode it
    pub fn open(path: &Path) -> KwicResult<Self> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        if file_size == 0 {
            return Err(corrupt("index file is empty"));
        }

        let mmap = unsafe { Mmap::map(&file)? };
        let index = load(&mmap)?;

        info!(
            path = %path.display(),
            terms = index.term_count(),
            width = index.width().get(),
            "index loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            file_size,
            index,
        })
    }

    pub fn index(&self) -> &KwicIndex {
        &self.index
    }

    pub fn into_index(self) -> KwicIndex {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Occurrence;
    use crate::index::writer::{save, IndexWriter};

    fn sample() -> KwicIndex {
        let mut index = KwicIndex::new(WindowWidth::new(3).unwrap(), '_');
        index.insert("b", Occurrence::new("", vec!["a".into(), "b".into(), "c".into()]));
        index.insert("b", Occurrence::new("__X", vec!["_".into(), "b".into(), "d".into()]));
        index.insert("c_d", Occurrence::new("", vec!["b".into(), "c_d".into(), "_".into()]));
        index
    }

    #[test]
    fn test_round_trip_bytes() {
        let index = sample();
        let loaded = load(&save(&index).unwrap()).unwrap();
        assert_eq!(loaded, index);
        assert_eq!(loaded.occurrences("b")[1].line_id, "__X");
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("index.bin");
        IndexWriter::new(&path).write(&sample()).unwrap();

        let reader = IndexReader::open(&path).unwrap();
        assert_eq!(reader.index(), &sample());
        assert!(reader.file_size() > 0);
    }

    #[test]
    fn test_bad_magic() {
        let err = load(b"NOPE\x01\x00\x00\x00").unwrap_err();
        assert!(matches!(err, KwicError::Deserialization(_)));
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = save(&sample()).unwrap();
        let err = load(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, KwicError::Deserialization(_)));
    }

    #[test]
    fn test_wrong_version() {
        let mut bytes = save(&sample()).unwrap();
        bytes[4] = 99;
        assert!(matches!(load(&bytes), Err(KwicError::Deserialization(_))));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.bin");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            IndexReader::open(&path),
            Err(KwicError::Deserialization(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = IndexReader::open(Path::new("/nonexistent/kwic/index.bin")).err().unwrap();
        assert!(matches!(err, KwicError::Io(_)));
    }
}
