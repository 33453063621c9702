//! # Vocabulary IO
//!
//! A vocabulary is stored as pretty-printed JSON:
//! ```json
//! {
//!   "version": "char-tokenizer.v1",
//!   "boundary": "[\\s\\p{P}\\p{Sm}\\p{Sc}\\p{Sk}]",
//!   "entries": [
//!     { "id": 0, "symbol": "<PAD>" },
//!     { "id": 1, "symbol": "<UNK>" },
//!     { "id": 2, "symbol": "a" }
//!   ]
//! }
//! ```
//! Writers emit entries in ascending id order; readers rebuild the mapping
//! from the `id` fields and ignore entry order.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    base::{PAD_ID, PAD_SYMBOL, UNK_ID, UNK_SYMBOL},
    boundary::Boundary,
    error::{Result, TokenizerError},
    vocab::Vocabulary,
};

pub const FORMAT_VERSION: &str = "char-tokenizer.v1";

#[derive(Debug, Serialize, Deserialize)]
struct VocabularyFile {
    version: String,
    boundary: String,
    entries: Vec<Record>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    id: i64,
    symbol: String,
}

fn malformed(msg: impl Into<String>) -> TokenizerError {
    TokenizerError::MalformedVocabulary(msg.into())
}

impl VocabularyFile {
    fn from_vocabulary(vocab: &Vocabulary) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            boundary: vocab.boundary().pattern().to_string(),
            entries: vocab
                .entries()
                .map(|(id, symbol)| Record {
                    id: id.into(),
                    symbol: symbol.to_string(),
                })
                .collect(),
        }
    }

    fn into_vocabulary(self) -> Result<Vocabulary> {
        if self.version != FORMAT_VERSION {
            return Err(malformed(format!(
                "unsupported version {:?}, expected {FORMAT_VERSION:?}",
                self.version
            )));
        }

        let boundary = Boundary::new(&self.boundary)
            .map_err(|e| malformed(format!("bad boundary pattern: {e}")))?;

        let mut by_id: BTreeMap<i64, String> = BTreeMap::new();
        for Record { id, symbol } in self.entries {
            if id < 0 {
                return Err(malformed(format!("negative id {id}")));
            }
            if by_id.insert(id, symbol).is_some() {
                return Err(malformed(format!("duplicate id {id}")));
            }
        }

        // Keys are sorted and distinct, so they are 0..n exactly when the last is n - 1.
        if let Some((&last, _)) = by_id.last_key_value()
            && last != by_id.len() as i64 - 1
        {
            return Err(malformed("ids are not contiguous from 0"));
        }

        for (id, literal) in [(PAD_ID, PAD_SYMBOL), (UNK_ID, UNK_SYMBOL)] {
            match by_id.get(&i64::from(id)) {
                Some(symbol) if symbol == literal => {}
                Some(symbol) => {
                    return Err(malformed(format!(
                        "id {id} must be {literal}, found {symbol:?}"
                    )));
                }
                None => return Err(malformed(format!("missing reserved entry {literal}"))),
            }
        }

        let chars = by_id
            .into_iter()
            .skip(2)
            .map(|(id, symbol)| {
                let mut it = symbol.chars();
                match (it.next(), it.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(malformed(format!(
                        "id {id} symbol {symbol:?} is not a single character"
                    ))),
                }
            })
            .collect::<Result<Vec<char>>>()?;

        Vocabulary::try_from_chars(chars, boundary)
    }
}

/// Write a [`Vocabulary`] to a [`Write`] writer.
pub fn write_vocabulary<W: Write>(vocab: &Vocabulary, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &VocabularyFile::from_vocabulary(vocab))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read a [`Vocabulary`] from a [`Read`] reader.
pub fn read_vocabulary<R: Read>(reader: R) -> Result<Vocabulary> {
    let file: VocabularyFile = serde_json::from_reader(reader)?;
    file.into_vocabulary()
}

fn temp_prefix(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(".{name}.")
}

/// Save a [`Vocabulary`] to `path`.
///
/// Missing parent directories are created. The file is written to a uniquely
/// named temporary file beside the target and renamed into place; on failure
/// the temporary file is removed and `path` is left untouched.
pub fn save_vocabulary_path<P: AsRef<Path>>(vocab: &Vocabulary, path: P) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(&temp_prefix(path))
        .suffix(".tmp")
        .tempfile_in(parent)?;
    write_vocabulary(vocab, &mut BufWriter::new(tmp.as_file_mut()))?;
    tmp.persist(path).map_err(|e| TokenizerError::Io(e.error))?;

    log::info!("saved vocabulary of {} entries to {}", vocab.len(), path.display());
    Ok(())
}

/// Load a [`Vocabulary`] from `path`.
pub fn load_vocabulary_path<P: AsRef<Path>>(path: P) -> Result<Vocabulary> {
    let path = path.as_ref();
    let vocab = read_vocabulary(BufReader::new(File::open(path)?))?;
    log::info!("loaded vocabulary of {} entries from {}", vocab.len(), path.display());
    Ok(vocab)
}

impl Vocabulary {
    /// Serialize every entry, in ascending id order, to `writer`.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_vocabulary(self, writer)
    }

    /// Deserialize a vocabulary written by [`Vocabulary::save`].
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        read_vocabulary(reader)
    }

    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_vocabulary_path(self, path)
    }

    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_vocabulary_path(path)
    }

    /// The canonical serialized form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.save(&mut buf)?;
        Ok(buf)
    }
}
