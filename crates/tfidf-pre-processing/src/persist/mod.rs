//! CSV export of feature matrices.

use std::{fs::File, io, path::Path};

use ndarray::Array2;
use tracing::debug;

use crate::error::PersistError;

/// Decimal places written for every feature value.
pub const FEATURE_PRECISION: usize = 6;

/// File name ends in the literal, case-sensitive `.csv`.
fn has_csv_extension(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(b".csv"))
}

fn check_label_count<L>(matrix: &Array2<f64>, labels: &[L]) -> Result<(), PersistError> {
    if labels.len() != matrix.nrows() {
        return Err(PersistError::LabelCountMismatch {
            rows: matrix.nrows(),
            labels: labels.len(),
        });
    }
    Ok(())
}

/// Pull the underlying I/O failure out of a csv error, if there is one.
fn split_io_error(err: csv::Error) -> Result<io::Error, csv::Error> {
    if let csv::ErrorKind::Io(source) = err.kind() {
        let kind = source.kind();
        return Ok(io::Error::new(kind, err));
    }
    Err(err)
}

/// Write `matrix` to `path`, one record per row: the row's feature values in
/// fixed-point notation followed by that row's label. No header is written.
pub fn save_matrix_to_csv<L: AsRef<str>>(
    matrix: &Array2<f64>,
    labels: &[L],
    path: impl AsRef<Path>,
) -> Result<(), PersistError> {
    let path = path.as_ref();
    if !has_csv_extension(path) {
        return Err(PersistError::InvalidExtension(path.to_path_buf()));
    }
    check_label_count(matrix, labels)?;

    let file = File::create(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(csv::Writer::from_writer(file), matrix, labels).map_err(|err| {
        match split_io_error(err) {
            Ok(source) => PersistError::Io {
                path: path.to_path_buf(),
                source,
            },
            Err(err) => PersistError::Csv(err),
        }
    })?;

    debug!(
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        path = %path.display(),
        "Feature matrix saved"
    );
    Ok(())
}

/// Same layout as [`save_matrix_to_csv`], written to any sink.
pub fn write_matrix_csv<W: io::Write, L: AsRef<str>>(
    writer: W,
    matrix: &Array2<f64>,
    labels: &[L],
) -> Result<(), PersistError> {
    check_label_count(matrix, labels)?;
    write_records(csv::Writer::from_writer(writer), matrix, labels).map_err(|err| {
        match split_io_error(err) {
            Ok(source) => PersistError::Write(source),
            Err(err) => PersistError::Csv(err),
        }
    })
}

fn write_records<W: io::Write, L: AsRef<str>>(
    mut writer: csv::Writer<W>,
    matrix: &Array2<f64>,
    labels: &[L],
) -> csv::Result<()> {
    for (row, label) in matrix.outer_iter().zip(labels) {
        let record = row
            .iter()
            .map(|value| format!("{:.*}", FEATURE_PRECISION, value))
            .chain(std::iter::once(label.as_ref().to_owned()));
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}
