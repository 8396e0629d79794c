use std::fmt;

/// How a term's corpus count turns into an IDF weight.
///
/// `N` is the number of fitted documents and `c` the term's count, with a
/// zero count treated as `c = 1`.
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdfPolicy {
    /// `ln(N / c)`
    #[default]
    Unsmoothed,
    /// `1 + ln(N / c)`
    Smoothed,
}

impl IdfPolicy {
    #[inline]
    #[must_use]
    pub fn weight(self, n_docs: usize, count: usize) -> f64 {
        // Unseen terms are maximally rare rather than infinitely weighted
        let ratio = n_docs as f64 / count.max(1) as f64;
        match self {
            Self::Unsmoothed => ratio.ln(),
            Self::Smoothed => 1.0 + ratio.ln(),
        }
    }
}

impl fmt::Display for IdfPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsmoothed => write!(f, "ln(N/c)"),
            Self::Smoothed => write!(f, "1 + ln(N/c)"),
        }
    }
}

/// What increments a term's count while fitting.
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DfCounting {
    /// Every matching token occurrence in every document.
    #[default]
    Occurrences,
    /// At most once per document.
    Presence,
}

#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VectorizerParams {
    idf_policy: IdfPolicy,
    df_counting: DfCounting,
}

impl VectorizerParams {
    #[must_use]
    pub fn new(idf_policy: IdfPolicy, df_counting: DfCounting) -> Self {
        Self {
            idf_policy,
            df_counting,
        }
    }

    #[must_use]
    pub fn with_idf_policy(mut self, idf_policy: IdfPolicy) -> Self {
        self.idf_policy = idf_policy;
        self
    }

    #[must_use]
    pub fn with_df_counting(mut self, df_counting: DfCounting) -> Self {
        self.df_counting = df_counting;
        self
    }

    #[must_use]
    pub fn idf_policy(&self) -> IdfPolicy {
        self.idf_policy
    }

    #[must_use]
    pub fn df_counting(&self) -> DfCounting {
        self.df_counting
    }
}

impl From<(IdfPolicy, DfCounting)> for VectorizerParams {
    fn from(value: (IdfPolicy, DfCounting)) -> Self {
        Self::new(value.0, value.1)
    }
}
