use crate::error::{KwicError, KwicResult};
use crate::index::concordance::{KwicIndex, Postings};
use crate::index::types::{IndexMeta, INDEX_VERSION};
use serde::Serialize;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// File magic preceding the version and payload
pub const MAGIC: &[u8; 4] = b"KWIC";

/// Size of magic + little-endian version
pub const HEADER_LEN: usize = 8;

/// Borrowed view of the index in the field order the reader expects
#[derive(Serialize)]
struct PayloadRef<'a> {
    meta: &'a IndexMeta,
    postings: &'a Postings,
}

fn write_index<W: Write>(writer: &mut W, index: &KwicIndex) -> KwicResult<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(&INDEX_VERSION.to_le_bytes())?;

    let payload = PayloadRef {
        meta: index.meta(),
        postings: index.postings(),
    };
    bincode::serialize_into(writer, &payload).map_err(|e| KwicError::Io(io::Error::other(e)))
}

/// Serialize an index to bytes
pub fn save(index: &KwicIndex) -> KwicResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_index(&mut buf, index)?;
    Ok(buf)
}

/// Writes an index file atomically: a temp file in the target directory is
/// filled, flushed, then renamed over the destination.
pub struct IndexWriter {
    path: PathBuf,
}

impl IndexWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn write(&self, index: &KwicIndex) -> KwicResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            write_index(&mut writer, index)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path).map_err(|e| e.error)?;

        info!(
            path = %self.path.display(),
            terms = index.term_count(),
            occurrences = index.occurrence_count(),
            "index saved"
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
