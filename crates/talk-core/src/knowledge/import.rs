//! CSV importer for external question sets.

use super::QaBook;
use crate::error::ImportError;
use crate::shared::normalize_question;
use std::path::{Path, PathBuf};

/// Required header column holding the question text.
pub const QUESTION_COLUMN: &str = "question";

/// Optional header columns holding answers, read in this order.
pub const ANSWER_COLUMNS: [&str; 4] = ["answer1", "answer2", "answer3", "answer4"];

/// Summary of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub path: PathBuf,
    /// Number of usable questions now active.
    pub rows: usize,
    /// True when `rows` is under the suggested minimum.
    pub below_minimum: bool,
}

/// Reads a question book from a CSV file with a header row.
///
/// Rows with an empty question or without any non-empty answer are skipped.
/// Repeated answers within a row are kept once.
/// A question repeated later in the file replaces the earlier answers.
pub fn read_csv_book(path: &Path) -> Result<QaBook, ImportError> {
    if !path.exists() {
        return Err(ImportError::NotFound(path.to_path_buf()));
    }
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(ImportError::UnsupportedFileType(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
    };
    let question_idx = column(QUESTION_COLUMN).ok_or(ImportError::MissingQuestionColumn)?;
    let answer_idxs: Vec<usize> = ANSWER_COLUMNS.iter().filter_map(|c| column(*c)).collect();

    let mut book = QaBook::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let question = normalize_question(record.get(question_idx).unwrap_or_default());
        let mut answers: Vec<String> = Vec::new();
        for answer in answer_idxs.iter().filter_map(|&i| record.get(i)).map(str::trim) {
            if !answer.is_empty() && !answers.iter().any(|a| a == answer) {
                answers.push(answer.to_string());
            }
        }
        if question.is_empty() || answers.is_empty() {
            skipped += 1;
            continue;
        }
        book.insert(question, answers);
    }

    tracing::debug!(
        target: "terminaltalk::import",
        path = %path.display(),
        rows = book.len(),
        skipped,
        "CSV parsed"
    );

    if book.is_empty() {
        return Err(ImportError::NoUsableRows(path.to_path_buf()));
    }
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_rows_and_skips_unusable_ones() {
        let file = csv_file(
            "question,answer1,answer2\n\
             What is Rust? , A language ,\n\
             ,orphan answer,\n\
             no answers here,,\n\
             what is cargo?,The build tool, The package manager \n",
        );
        let book = read_csv_book(file.path()).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.get("what is rust?").unwrap(), &["A language".to_string()]);
        assert_eq!(
            book.get("what is cargo?").unwrap(),
            &["The build tool".to_string(), "The package manager".to_string()]
        );
    }

    #[test]
    fn repeated_answers_in_a_row_are_kept_once() {
        let file = csv_file("question,answer1,answer2,answer3\nq one,x, x ,y\n");
        let book = read_csv_book(file.path()).unwrap();
        assert_eq!(book.get("q one").unwrap(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn missing_question_column_is_rejected() {
        let file = csv_file("prompt,answer1\nhello,hi\n");
        assert!(matches!(
            read_csv_book(file.path()),
            Err(ImportError::MissingQuestionColumn)
        ));
    }

    #[test]
    fn zero_usable_rows_is_rejected() {
        let file = csv_file("question,answer1\nhello,\n,hi\n");
        assert!(matches!(
            read_csv_book(file.path()),
            Err(ImportError::NoUsableRows(_))
        ));
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        assert!(matches!(read_csv_book(&path), Err(ImportError::NotFound(_))));
    }

    #[test]
    fn non_csv_extension_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"question,answer1\nhello,hi\n").unwrap();
        assert!(matches!(
            read_csv_book(file.path()),
            Err(ImportError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn question_column_may_carry_a_bom() {
        let file = csv_file("\u{feff}question,answer1\nHello,hi\n");
        let book = read_csv_book(file.path()).unwrap();
        assert!(book.contains("hello"));
    }
}
