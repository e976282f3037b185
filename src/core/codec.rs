//! Conversion between token sentences and id sentences.
//!
//! Encoding substitutes the out-of-vocabulary id for unknown tokens and
//! can right-pad each sentence to a fixed length with the padding id.
//! Decoding walks the lazily built reverse index and can drop padding
//! ids from the output. Batch-parallel variants run one sentence per
//! rayon task.

use rayon::prelude::*;

use super::vocab::{VocabError, Vocabulary};

impl Vocabulary {
    /// Convert token sentences into id sentences.
    ///
    /// Unknown tokens map to the out-of-vocabulary id. When padding is
    /// enabled and `pad_to` is given, every sentence is right-padded with
    /// the padding id up to `pad_to`; longer sentences are left untouched,
    /// never truncated. `pad_to` is ignored when padding is disabled.
    ///
    /// # Errors
    ///
    /// [`VocabError::NotBuilt`] when the mapping is empty;
    /// [`VocabError::MissingSpecialToken`] if a required special is
    /// absent from a non-empty mapping (an internal-invariant violation).
    pub fn to_ids<S, T>(&self, sentences: S, pad_to: Option<usize>) -> Result<Vec<Vec<u32>>, VocabError>
    where
        S: IntoIterator<Item = T>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let oov_id = self.require_oov_id()?;
        let pad = self.resolve_padding(pad_to)?;

        let mut out = Vec::new();
        for sentence in sentences {
            out.push(self.encode_sentence(sentence, oov_id, pad));
        }
        Ok(out)
    }

    /// Batch-parallel [`Vocabulary::to_ids`] over owned sentences.
    pub fn to_ids_parallel(
        &self,
        sentences: &[Vec<String>],
        pad_to: Option<usize>,
    ) -> Result<Vec<Vec<u32>>, VocabError> {
        let oov_id = self.require_oov_id()?;
        let pad = self.resolve_padding(pad_to)?;

        Ok(sentences
            .par_iter()
            .map(|sentence| self.encode_sentence(sentence.iter().map(String::as_str), oov_id, pad))
            .collect())
    }

    /// Convert id sentences back into token sentences.
    ///
    /// When `remove_paddings` is true and padding is enabled, padding ids
    /// are dropped from the output, shortening the sentence.
    ///
    /// # Errors
    ///
    /// [`VocabError::NotBuilt`] when the mapping is empty;
    /// [`VocabError::OutOfRangeId`] for any id with no token.
    pub fn to_tokens(
        &self,
        id_sentences: &[Vec<u32>],
        remove_paddings: bool,
    ) -> Result<Vec<Vec<String>>, VocabError> {
        if !self.is_built() {
            return Err(VocabError::NotBuilt);
        }
        let padding_id = self.removable_padding_id(remove_paddings);

        id_sentences
            .iter()
            .map(|ids| self.decode_sentence(ids, padding_id))
            .collect()
    }

    /// Batch-parallel [`Vocabulary::to_tokens`].
    pub fn to_tokens_parallel(
        &self,
        id_sentences: &[Vec<u32>],
        remove_paddings: bool,
    ) -> Result<Vec<Vec<String>>, VocabError> {
        if !self.is_built() {
            return Err(VocabError::NotBuilt);
        }
        let padding_id = self.removable_padding_id(remove_paddings);
        // Materialize the reverse index before fanning out.
        self.reverse_index();

        id_sentences
            .par_iter()
            .map(|ids| self.decode_sentence(ids, padding_id))
            .collect()
    }

    fn require_oov_id(&self) -> Result<u32, VocabError> {
        if !self.is_built() {
            return Err(VocabError::NotBuilt);
        }
        self.oov_id()
            .ok_or_else(|| VocabError::MissingSpecialToken(self.config.oov_token.clone()))
    }

    /// The `(padding id, target length)` pair when padding applies.
    fn resolve_padding(&self, pad_to: Option<usize>) -> Result<Option<(u32, usize)>, VocabError> {
        let Some(target) = pad_to else {
            return Ok(None);
        };
        if !self.config.padding {
            return Ok(None);
        }
        let pad_id = self
            .padding_id()
            .ok_or_else(|| VocabError::MissingSpecialToken(self.config.padding_token.clone()))?;
        Ok(Some((pad_id, target)))
    }

    fn removable_padding_id(&self, remove_paddings: bool) -> Option<u32> {
        if remove_paddings && self.config.padding {
            self.padding_id()
        } else {
            None
        }
    }

    fn encode_sentence<T>(&self, tokens: T, oov_id: u32, pad: Option<(u32, usize)>) -> Vec<u32>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let mut ids: Vec<u32> = tokens
            .into_iter()
            .map(|token| self.id_for(token.as_ref()).unwrap_or(oov_id))
            .collect();
        if let Some((pad_id, target)) = pad {
            if ids.len() < target {
                ids.resize(target, pad_id);
            }
        }
        ids
    }

    fn decode_sentence(&self, ids: &[u32], padding_id: Option<u32>) -> Result<Vec<String>, VocabError> {
        let index = self.reverse_index();
        let mut tokens = Vec::with_capacity(ids.len());
        for &id in ids {
            if padding_id == Some(id) {
                continue;
            }
            let token = index
                .get(id as usize)
                .ok_or(VocabError::OutOfRangeId(id))?;
            tokens.push(token.clone());
        }
        Ok(tokens)
    }
}
