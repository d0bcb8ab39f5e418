use crate::error::KwicResult;
use crate::index::concordance::KwicIndex;
use crate::index::types::IndexConfig;
use crate::index::vocabulary::{TermSet, Vocabulary};
use crate::index::window::WindowExtractor;
use crate::index::writer::IndexWriter;
use crate::utils::progress::{chunk_bar, spinner};
use crate::utils::{split_line_id, SimpleTokenizer, Tokenizer};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Lines read from a corpus, plus the number of files that could not be read
pub struct Corpus {
    pub lines: Vec<String>,
    pub files_read: usize,
    pub unreadable: usize,
}

/// Read every line of a corpus file, or of every file under a directory.
/// Directory entries are visited in file-name order so builds are repeatable.
pub fn read_corpus(path: &Path) -> Result<Corpus> {
    let mut corpus = Corpus {
        lines: Vec::new(),
        files_read: 0,
        unreadable: 0,
    };

    if path.is_dir() {
        let walker = WalkBuilder::new(path)
            .hidden(true)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let files: Vec<PathBuf> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.into_path())
            .collect();

        for file in files {
            match fs::read(&file) {
                Ok(bytes) => {
                    info!(file = %file.display(), "reading corpus file");
                    split_lines(&String::from_utf8_lossy(&bytes), &mut corpus.lines);
                    corpus.files_read += 1;
                }
                Err(err) => {
                    warn!(file = %file.display(), error = %err, "skipping unreadable corpus file");
                    corpus.unreadable += 1;
                }
            }
        }
    } else {
        info!(file = %path.display(), "reading corpus file");
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read corpus {}", path.display()))?;
        split_lines(&String::from_utf8_lossy(&bytes), &mut corpus.lines);
        corpus.files_read = 1;
    }

    info!(lines = corpus.lines.len(), corpus = %path.display(), "corpus loaded");
    Ok(corpus)
}

/// Split text on '\n', trimming a trailing '\r' from each line
fn split_lines(text: &str, out: &mut Vec<String>) {
    let mut start = 0;
    for pos in memchr::memchr_iter(b'\n', text.as_bytes()) {
        out.push(text[start..pos].trim_end_matches('\r').to_string());
        start = pos + 1;
    }
    if start < text.len() {
        out.push(text[start..].trim_end_matches('\r').to_string());
    }
}

/// Index one raw line: peel off its id, tokenize the rest, scan for matches
fn index_raw_line<V, T>(
    index: &mut KwicIndex,
    extractor: &WindowExtractor<'_, V>,
    tokenizer: &T,
    line: &str,
    line_id_prefix: &str,
) -> usize
where
    V: Vocabulary + ?Sized,
    T: Tokenizer + ?Sized,
{
    let (line_id, text) = split_line_id(line, line_id_prefix);
    let tokens = tokenizer.tokenize(text);
    index.add_line_with(extractor, &tokens, line_id)
}

/// Index a contiguous run of lines into a fresh partial index
fn index_chunk<V, T>(lines: &[String], vocabulary: &V, tokenizer: &T, config: &IndexConfig) -> KwicIndex
where
    V: Vocabulary + ?Sized,
    T: Tokenizer + ?Sized,
{
    let extractor = WindowExtractor::new(vocabulary, config.width, config.separator);
    let mut index = KwicIndex::new(config.width, config.separator);
    for line in lines {
        index_raw_line(&mut index, &extractor, tokenizer, line, &config.line_id_prefix);
    }
    index
}

/// Build an index over raw corpus lines.
///
/// With `config.parallel` the lines are sharded into chunks of
/// `config.chunk_size`, each chunk indexed independently, and the partial
/// indexes merged back in chunk order, so every term's occurrences come out
/// in the same order a sequential scan would produce.
pub fn build_index<V, T>(
    lines: &[String],
    vocabulary: &V,
    tokenizer: &T,
    config: &IndexConfig,
    silent: bool,
) -> KwicResult<KwicIndex>
where
    V: Vocabulary + Sync + ?Sized,
    T: Tokenizer + Sync + ?Sized,
{
    let chunk_size = config.chunk_size.max(1);
    let num_chunks = lines.len().div_ceil(chunk_size);

    let mut index = if config.parallel && num_chunks > 1 {
        debug!(num_chunks, chunk_size, "indexing in parallel");
        let progress = (!silent).then(|| chunk_bar(num_chunks as u64, "Indexing lines..."));

        let partials: Vec<KwicIndex> = lines
            .par_chunks(chunk_size)
            .map(|chunk| {
                let partial = index_chunk(chunk, vocabulary, tokenizer, config);
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
                partial
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let mut merged = KwicIndex::new(config.width, config.separator);
        for (chunk_idx, partial) in partials.into_iter().enumerate() {
            debug!(chunk = chunk_idx, terms = partial.term_count(), "merging partial index");
            merged.merge(partial)?;
        }
        merged
    } else {
        index_chunk(lines, vocabulary, tokenizer, config)
    };

    index.meta_mut().created_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    info!(
        lines = index.meta().line_count,
        terms = index.term_count(),
        occurrences = index.occurrence_count(),
        "index built"
    );
    Ok(index)
}

/// Build an index from a corpus path and vocabulary file, then save it
pub fn build_index_from_paths(
    corpus_path: &Path,
    vocabulary_path: &Path,
    output_path: &Path,
    config: &IndexConfig,
    silent: bool,
) -> Result<KwicIndex> {
    if !silent {
        println!("Indexing: {}", corpus_path.display());
    }

    let vocabulary = TermSet::load(vocabulary_path, config.separator)
        .with_context(|| format!("Failed to load vocabulary {}", vocabulary_path.display()))?;

    let reading = (!silent).then(|| spinner("Reading corpus..."));
    let corpus = read_corpus(corpus_path)?;
    if let Some(sp) = reading {
        sp.finish_with_message(format!(
            "Read {} lines from {} files",
            corpus.lines.len(),
            corpus.files_read
        ));
    }

    let tokenizer = SimpleTokenizer::new();
    let index = build_index(&corpus.lines, &vocabulary, &tokenizer, config, silent)?;

    let saving = (!silent).then(|| spinner("Saving index..."));
    IndexWriter::new(output_path)
        .write(&index)
        .with_context(|| format!("Failed to save index to {}", output_path.display()))?;
    if let Some(sp) = saving {
        sp.finish_with_message("Index complete");
    }

    if !silent {
        println!(
            "Indexed {} occurrences of {} terms (vocabulary: {} terms)",
            index.occurrence_count(),
            index.term_count(),
            vocabulary.len()
        );
        println!("Index stored at: {}", output_path.display());
        if corpus.unreadable > 0 {
            eprintln!("({} files could not be read)", corpus.unreadable);
        }
    }

    Ok(index)
}
