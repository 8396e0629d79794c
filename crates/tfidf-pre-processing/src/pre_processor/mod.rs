mod vectorizer;

pub use vectorizer::{
    DfCounting, IdfPolicy, TfidfVectorizer, VectorizerParams, VocabularyIndex, tokenizer,
};
