use std::{
    io,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use ndarray::Array2;
use tfidf_pre_processing::{
    persist,
    pre_processor::{DfCounting, IdfPolicy, TfidfVectorizer, VectorizerParams},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tfidf-cli")]
#[command(about = "Turn text documents into TF-IDF feature vectors", long_about = None)]
struct Cli {
    /// Vocabulary file, one term per line
    #[arg(long, value_name = "PATH", required_unless_present = "terms")]
    vocabulary: Option<PathBuf>,

    /// Vocabulary terms (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "vocabulary")]
    terms: Vec<String>,

    /// Training corpus, one document per line
    #[arg(short, long, value_name = "PATH")]
    corpus: PathBuf,

    /// Documents to transform (defaults to the training corpus)
    #[arg(long, value_name = "PATH")]
    transform: Option<PathBuf>,

    /// Read document files as JSON arrays instead of lines
    #[arg(long)]
    json: bool,

    /// Row labels, one per line (defaults to the row index)
    #[arg(short, long, value_name = "PATH")]
    labels: Option<PathBuf>,

    /// Destination `.csv` file (prints to stdout when omitted)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Use 1 + ln(N/c) instead of ln(N/c)
    #[arg(long)]
    smooth_idf: bool,

    /// Count a term at most once per training document
    #[arg(long)]
    presence_df: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn params(&self) -> VectorizerParams {
        let idf_policy = if self.smooth_idf {
            IdfPolicy::Smoothed
        } else {
            IdfPolicy::Unsmoothed
        };
        let df_counting = if self.presence_df {
            DfCounting::Presence
        } else {
            DfCounting::Occurrences
        };
        VectorizerParams::new(idf_policy, df_counting)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let start = Instant::now();
    let vocabulary = load_vocabulary(&cli)?;
    let corpus = read_documents(&cli.corpus, cli.json)?;

    let mut vectorizer = TfidfVectorizer::with_params(vocabulary, cli.params());
    vectorizer
        .fit(&corpus)
        .with_context(|| format!("Failed to fit on {}", cli.corpus.display()))?;

    let documents = match &cli.transform {
        Some(path) => read_documents(path, cli.json)?,
        None => corpus,
    };
    let matrix = vectorizer
        .transform(&documents)
        .context("Failed to transform documents")?;
    let labels = load_labels(cli.labels.as_deref(), matrix.nrows())?;

    write_output(&matrix, &labels, cli.output.as_deref())?;
    info!(
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        elapsed = ?start.elapsed(),
        "Feature matrix written"
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_vocabulary(cli: &Cli) -> Result<Vec<String>> {
    if let Some(path) = &cli.vocabulary {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;
        return Ok(non_empty_lines(&contents));
    }
    Ok(cli.terms.clone())
}

fn read_documents(path: &Path, json: bool) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read documents: {}", path.display()))?;
    let documents = if json {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON array in {}", path.display()))?
    } else {
        contents.lines().map(String::from).collect::<Vec<_>>()
    };
    debug!(path = %path.display(), num_texts = documents.len(), "Documents loaded");
    Ok(documents)
}

fn load_labels(path: Option<&Path>, rows: usize) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok((0..rows).map(|idx| idx.to_string()).collect());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read labels file: {}", path.display()))?;
    let labels = contents.lines().map(String::from).collect::<Vec<_>>();
    if labels.len() != rows {
        bail!(
            "{} has {} labels but {} documents were transformed",
            path.display(),
            labels.len(),
            rows
        );
    }
    Ok(labels)
}

fn write_output(matrix: &Array2<f64>, labels: &[String], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => persist::save_matrix_to_csv(matrix, labels, path)
            .with_context(|| format!("Failed to save features to {}", path.display())),
        None => persist::write_matrix_csv(io::stdout().lock(), matrix, labels)
            .context("Failed to write features to stdout"),
    }
}

fn non_empty_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_params_from_flags() {
        let cli = Cli::parse_from([
            "tfidf-cli",
            "--terms",
            "a,b",
            "--corpus",
            "corpus.txt",
            "--smooth-idf",
        ]);
        assert_eq!(cli.terms, vec!["a", "b"]);
        assert_eq!(cli.params().idf_policy(), IdfPolicy::Smoothed);
        assert_eq!(cli.params().df_counting(), DfCounting::Occurrences);
    }

    #[test]
    fn test_vocabulary_required() {
        assert!(Cli::try_parse_from(["tfidf-cli", "--corpus", "corpus.txt"]).is_err());
    }

    #[test]
    fn test_non_empty_lines() {
        assert_eq!(non_empty_lines("apples\n\n  bananas \n"), vec!["apples", "bananas"]);
    }

    #[test]
    fn test_default_labels_are_row_indices() {
        assert_eq!(load_labels(None, 3).expect("labels"), vec!["0", "1", "2"]);
    }
}
