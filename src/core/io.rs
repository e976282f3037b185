//! Line-oriented persistence for the token→id mapping.
//!
//! # Format
//!
//! One token per line in ascending id order, `\n`-separated, with no
//! trailing newline after the last token. Special tokens are written like
//! any other entry. Because the separator never trails, a file ending in
//! `\n` encodes an empty token as its last entry.
//!
//! # Loading policy
//!
//! The persisted file is authoritative for learned tokens. Loading resets
//! the mapping, reinserts the configured specials at their reserved ids,
//! then appends each line at the next id. Lines equal to a configured
//! special literal are skipped so specials are never duplicated and always
//! occupy their conventional low ids. Duplicate lines keep their first
//! occurrence, preserving the dense-id bijection. The frequency counter is
//! left untouched; a later accumulate rebuilds from counts as usual.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use log::debug;

use super::vocab::{VocabError, Vocabulary};

impl Vocabulary {
    /// Write the mapping to `writer` in the line-oriented format.
    ///
    /// # Errors
    ///
    /// [`VocabError::NotBuilt`] when the mapping is empty, or
    /// [`VocabError::Io`] on write failure.
    pub fn dump_to<W: Write>(&self, writer: &mut W) -> Result<(), VocabError> {
        if !self.is_built() {
            return Err(VocabError::NotBuilt);
        }
        let mut first = true;
        for token in self.reverse_index() {
            if !first {
                writer.write_all(b"\n")?;
            }
            writer.write_all(token.as_bytes())?;
            first = false;
        }
        Ok(())
    }

    /// Render the mapping as a string in the line-oriented format.
    pub fn dumps(&self) -> Result<String, VocabError> {
        if !self.is_built() {
            return Err(VocabError::NotBuilt);
        }
        Ok(self.reverse_index().join("\n"))
    }

    /// Write the mapping to a UTF-8 text file at `path`.
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> Result<(), VocabError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.dump_to(&mut writer)?;
        writer.flush()?;
        debug!("dumped {} tokens to {}", self.len(), path.as_ref().display());
        Ok(())
    }

    /// Replace the mapping with tokens read from `reader`.
    ///
    /// The input is split on every `\n`, so a trailing newline encodes an
    /// empty final token and survives a dump/load round trip. Only a
    /// completely empty input yields no tokens beyond the specials.
    pub fn load_from<R: BufRead>(&mut self, mut reader: R) -> Result<(), VocabError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut mapping = self.seeded_mapping();
        if !text.is_empty() {
            for token in text.split('\n') {
                if token == self.config.padding_token || token == self.config.oov_token {
                    continue;
                }
                let next_id = mapping.len() as u32;
                mapping.entry(token.to_string()).or_insert(next_id);
            }
        }

        self.token_to_id = mapping;
        self.reverse = OnceLock::new();
        Ok(())
    }

    /// Replace the mapping with tokens parsed from `text`.
    pub fn loads(&mut self, text: &str) -> Result<(), VocabError> {
        self.load_from(text.as_bytes())
    }

    /// Replace the mapping with tokens read from the UTF-8 text file at
    /// `path`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), VocabError> {
        let file = File::open(path.as_ref())?;
        self.load_from(BufReader::new(file))?;
        debug!(
            "loaded {} tokens from {}",
            self.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}
