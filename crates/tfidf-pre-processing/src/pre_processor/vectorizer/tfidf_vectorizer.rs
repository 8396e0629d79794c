use std::path::Path;

use ndarray::Array2;
use tracing::{Level, debug};

use super::{
    params::{DfCounting, VectorizerParams},
    tokenizer,
    vocabulary::VocabularyIndex,
};
use crate::{
    error::{Result, VectorizerError},
    persist,
};

/// TF-IDF vectorizer over a caller-supplied, fixed vocabulary.
///
/// Columns of every produced matrix follow the sorted vocabulary. `fit` learns
/// one IDF weight per term from a training corpus; `transform` scores each
/// document as binary term presence times that weight, without row
/// normalization.
#[cfg_attr(feature = "bincode", derive(bincode::Encode))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UncheckedTfidfVectorizer")
)]
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    params: VectorizerParams,
    vocab: VocabularyIndex,
    /// Corpus count per vocabulary position, reset by every `fit`
    document_frequency: Vec<usize>,
    /// `None` until a successful `fit`
    idf: Option<Vec<f64>>,
}

/// Decoded fields before the alignment between vocabulary, counts and
/// weights has been checked.
#[cfg(any(feature = "serde", feature = "bincode"))]
#[cfg_attr(feature = "bincode", derive(bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
struct UncheckedTfidfVectorizer {
    params: VectorizerParams,
    vocab: VocabularyIndex,
    document_frequency: Vec<usize>,
    idf: Option<Vec<f64>>,
}

#[cfg(any(feature = "serde", feature = "bincode"))]
impl TryFrom<UncheckedTfidfVectorizer> for TfidfVectorizer {
    type Error = VectorizerError;

    fn try_from(raw: UncheckedTfidfVectorizer) -> Result<Self> {
        if !raw.vocab.is_consistent() {
            return Err(VectorizerError::Corrupt(
                "vocabulary terms and positions disagree",
            ));
        }
        if raw.document_frequency.len() != raw.vocab.len() {
            return Err(VectorizerError::Corrupt(
                "document frequency length differs from vocabulary size",
            ));
        }
        if raw
            .idf
            .as_ref()
            .is_some_and(|idf| idf.len() != raw.vocab.len())
        {
            return Err(VectorizerError::Corrupt(
                "IDF weight count differs from vocabulary size",
            ));
        }
        Ok(Self {
            params: raw.params,
            vocab: raw.vocab,
            document_frequency: raw.document_frequency,
            idf: raw.idf,
        })
    }
}

#[cfg(feature = "bincode")]
impl<Context> bincode::Decode<Context> for TfidfVectorizer {
    fn decode<D: bincode::de::Decoder<Context = Context>>(
        decoder: &mut D,
    ) -> std::result::Result<Self, bincode::error::DecodeError> {
        let raw = <UncheckedTfidfVectorizer as bincode::Decode<Context>>::decode(decoder)?;
        Self::try_from(raw).map_err(|err| match err {
            VectorizerError::Corrupt(reason) => bincode::error::DecodeError::Other(reason),
            _ => bincode::error::DecodeError::Other("corrupt vectorizer state"),
        })
    }
}

impl TfidfVectorizer {
    pub fn new<I, T>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_params(vocabulary, VectorizerParams::default())
    }

    pub fn with_params<I, T>(vocabulary: I, params: VectorizerParams) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let vocab = VocabularyIndex::new(vocabulary);
        let document_frequency = vec![0; vocab.len()];
        Self {
            params,
            vocab,
            document_frequency,
            idf: None,
        }
    }

    /// Learn IDF weights from `texts`, replacing anything learned before.
    ///
    /// An empty corpus fails with [`VectorizerError::EmptyCorpus`] and leaves
    /// the vectorizer unfitted.
    pub fn fit<T: AsRef<str>>(&mut self, texts: &[T]) -> Result<()> {
        debug!(num_texts = texts.len(), "Fitting TfidfVectorizer");

        self.document_frequency.fill(0);
        if texts.is_empty() {
            self.idf = None;
            return Err(VectorizerError::EmptyCorpus);
        }

        for text in texts {
            let text = text.as_ref();
            match self.params.df_counting() {
                DfCounting::Occurrences => {
                    for token in tokenizer::tokenize(text) {
                        if let Some(idx) = self.vocab.position(token) {
                            self.document_frequency[idx] += 1;
                        }
                    }
                }
                DfCounting::Presence => {
                    for token in tokenizer::token_set(text) {
                        if let Some(idx) = self.vocab.position(token) {
                            self.document_frequency[idx] += 1;
                        }
                    }
                }
            }
        }

        if tracing::enabled!(Level::DEBUG) {
            let unseen = self
                .vocab
                .iter()
                .filter(|(idx, _)| self.document_frequency[*idx] == 0)
                .map(|(_, term)| term)
                .collect::<Vec<_>>();
            if !unseen.is_empty() {
                debug!(unseen_terms = ?unseen, "Vocabulary terms absent from corpus");
            }
        }

        let n_docs = texts.len();
        let policy = self.params.idf_policy();
        self.idf = Some(
            self.document_frequency
                .iter()
                .map(|&count| policy.weight(n_docs, count))
                .collect(),
        );
        debug!(
            vocab_size = self.vocab.len(),
            idf_policy = %policy,
            "IDF calculation complete"
        );
        Ok(())
    }

    /// Score `texts` against the fitted weights.
    ///
    /// Presence is binary: a term seen any number of times in a document
    /// scores its IDF weight once. The result always has shape `(texts.len(), num_features())`. Documents
    /// without any vocabulary term give an all-zero row.
    pub fn transform<T: AsRef<str>>(&self, texts: &[T]) -> Result<Array2<f64>> {
        debug!(
            num_texts = texts.len(),
            "Transforming texts using TfidfVectorizer"
        );
        let idf = self.idf.as_deref().ok_or(VectorizerError::NotFitted)?;

        // Absent terms stay +0.0 even when their weight is negative
        let mut matrix = Array2::zeros((texts.len(), self.num_features()));
        for (row, text) in texts.iter().enumerate() {
            for token in tokenizer::token_set(text.as_ref()) {
                if let Some(col) = self.vocab.position(token) {
                    matrix[[row, col]] = idf[col];
                }
            }
        }

        debug!(
            shape = ?matrix.shape(),
            "Text transformation complete"
        );
        Ok(matrix)
    }

    pub fn fit_transform<T: AsRef<str>>(&mut self, texts: &[T]) -> Result<Array2<f64>> {
        self.fit(texts)?;
        self.transform(texts)
    }

    /// Fit on `texts`, transform them, and write the matrix with one label per
    /// row to a `.csv` file.
    pub fn fit_transform_and_persist<T, L>(
        &mut self,
        texts: &[T],
        labels: &[L],
        path: impl AsRef<Path>,
    ) -> Result<()>
    where
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let matrix = self.fit_transform(texts)?;
        persist::save_matrix_to_csv(&matrix, labels, path)?;
        Ok(())
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    /// Sorted vocabulary; index `i` names column `i`.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        self.vocab.terms()
    }

    #[must_use]
    pub fn position(&self, term: &str) -> Option<usize> {
        self.vocab.position(term)
    }

    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.idf.is_some()
    }

    /// Fitted IDF weights aligned with [`Self::vocabulary`].
    #[must_use]
    pub fn idf(&self) -> Option<&[f64]> {
        self.idf.as_deref()
    }

    /// Count recorded for `term` by the last `fit`.
    #[must_use]
    pub fn document_frequency(&self, term: &str) -> Option<usize> {
        self.vocab
            .position(term)
            .map(|idx| self.document_frequency[idx])
    }

    #[must_use]
    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    #[cfg(feature = "bincode")]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::encode_to_vec(self, bincode::config::standard())?)
    }

    /// Decode a vectorizer written by [`Self::to_bytes`], rejecting state
    /// whose weights or counts do not line up with its vocabulary.
    #[cfg(feature = "bincode")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (raw, _): (UncheckedTfidfVectorizer, usize) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Self::try_from(raw)
    }
}
