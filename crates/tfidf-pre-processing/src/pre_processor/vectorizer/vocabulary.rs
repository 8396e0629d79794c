use ahash::HashMap;
use tracing::debug;

/// Sorted, deduplicated set of terms.
///
/// A term's position in the sorted sequence is its column in every feature
/// matrix produced against this vocabulary, so two indexes built from the same
/// terms in a different order share the same layout.
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyIndex {
    terms: Vec<String>,
    /// Term to column lookup, always consistent with `terms`
    positions: HashMap<String, usize>,
}

impl VocabularyIndex {
    pub fn new<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut sorted_terms = terms.into_iter().map(Into::into).collect::<Vec<String>>();
        let supplied = sorted_terms.len();
        sorted_terms.sort();
        sorted_terms.dedup();

        let positions = sorted_terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect::<HashMap<String, usize>>();

        debug!(
            supplied_terms = supplied,
            vocab_size = sorted_terms.len(),
            "Vocabulary index built"
        );

        Self {
            terms: sorted_terms,
            positions,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn term(&self, position: usize) -> Option<&str> {
        self.terms.get(position).map(String::as_str)
    }

    #[must_use]
    pub fn position(&self, term: &str) -> Option<usize> {
        self.positions.get(term).copied()
    }

    /// Terms strictly ascending and the lookup mapping each one to its own
    /// position. Always true for an index built with [`Self::new`].
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.terms.windows(2).all(|pair| pair[0] < pair[1])
            && self.positions.len() == self.terms.len()
            && self
                .terms
                .iter()
                .enumerate()
                .all(|(idx, term)| self.positions.get(term) == Some(&idx))
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (idx, term.as_str()))
    }
}
