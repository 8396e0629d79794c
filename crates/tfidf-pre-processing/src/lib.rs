//! TF-IDF featurization over a fixed vocabulary.
//!
//! ```rust
//! use tfidf_pre_processing::pre_processor::TfidfVectorizer;
//!
//! let mut vectorizer = TfidfVectorizer::new(["apples", "bananas", "oranges"]);
//! vectorizer.fit(&["apples bananas", "oranges apples", "grapes"])?;
//!
//! let matrix = vectorizer.transform(&["apples grapes"])?;
//! assert_eq!(matrix.shape(), &[1, 3]);
//! # Ok::<(), tfidf_pre_processing::VectorizerError>(())
//! ```

mod error;
pub mod persist;
pub mod pre_processor;

pub use error::{PersistError, Result, VectorizerError};
