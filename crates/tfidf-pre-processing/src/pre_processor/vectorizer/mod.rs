mod params;
mod tfidf_vectorizer;
pub mod tokenizer;
mod vocabulary;

pub use params::{DfCounting, IdfPolicy, VectorizerParams};
pub use tfidf_vectorizer::TfidfVectorizer;
pub use vocabulary::VocabularyIndex;
