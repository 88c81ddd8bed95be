//! One-shot commands: import, add, remove, list and direct questions.
//!
//! Failures are reported on the output and never abort the process.

use crate::output::say;
use std::io::{self, Write};
use std::path::Path;
use talk_core::{AddOutcome, Assistant, ImportError, KnowledgeError, RemoveOutcome};

/// Imports a CSV file; on failure the current questions stay active.
pub fn import<W: Write>(assistant: &mut Assistant, path: &Path, out: &mut W) -> io::Result<bool> {
    match assistant.import(path) {
        Ok(report) => {
            if report.below_minimum {
                say(
                    out,
                    format!(
                        "WARNING: CSV has only {} Q&A pairs (min 10 suggested).",
                        report.rows
                    ),
                )?;
            }
            say(
                out,
                format!(
                    "Imported {} questions from CSV file: {}",
                    report.rows,
                    report.path.display()
                ),
            )?;
            Ok(true)
        }
        Err(e) => {
            let msg = match &e {
                ImportError::NotFound(p) => format!("ERROR: File path not found: {}", p.display()),
                ImportError::UnsupportedFileType(_) => {
                    "ERROR: Unsupported file type. Only .csv allowed.".to_string()
                }
                ImportError::Io(source) if source.kind() == io::ErrorKind::PermissionDenied => {
                    "ERROR: Insufficient access rights to read file.".to_string()
                }
                other => format!("ERROR: {}", other),
            };
            say(out, msg)?;
            say(out, "Import aborted. Using internal questions.")?;
            Ok(false)
        }
    }
}

pub fn add<W: Write>(
    assistant: &mut Assistant,
    question: &str,
    answers: &[String],
    out: &mut W,
) -> io::Result<()> {
    match assistant.add(question, answers) {
        Ok(AddOutcome::Created { question, .. }) => {
            say(out, format!("Created new question: {}", question))
        }
        Ok(AddOutcome::Extended { question, added }) => say(
            out,
            format!("Added {} answer(s) to existing question: {}", added, question),
        ),
        Ok(AddOutcome::Unchanged { question }) => say(
            out,
            format!("No new answers added (all duplicates) for question: {}", question),
        ),
        Err(e) => report_error(out, &e),
    }
}

pub fn remove<W: Write>(
    assistant: &mut Assistant,
    question: &str,
    answers: &[String],
    out: &mut W,
) -> io::Result<()> {
    match assistant.remove(question, answers) {
        Ok(RemoveOutcome::RemovedQuestion { question }) => {
            say(out, format!("Removed entire question: {}", question))
        }
        Ok(RemoveOutcome::RemovedAnswers {
            question, removed, ..
        }) => say(
            out,
            format!("Removed {} answer(s) from question: {}", removed, question),
        ),
        Ok(RemoveOutcome::RemovedLastAnswers { question, .. }) => say(
            out,
            format!("All answers removed; deleting question: {}", question),
        ),
        Ok(RemoveOutcome::NoMatchingAnswers { question }) => say(
            out,
            format!("No matching answers found to remove for question: {}", question),
        ),
        Err(e) => report_error(out, &e),
    }
}

pub fn list_questions<W: Write>(assistant: &Assistant, out: &mut W) -> io::Result<()> {
    let questions: Vec<&str> = assistant.list_questions().collect();
    say(out, format!("Listing {} questions:", questions.len()))?;
    writeln!(out)?;
    for q in questions {
        writeln!(out, "- {}", q)?;
    }
    Ok(())
}

pub fn ask<W: Write>(assistant: &mut Assistant, question: &str, out: &mut W) -> io::Result<()> {
    let answer = assistant.resolve(question);
    say(out, answer)
}

fn report_error<W: Write>(out: &mut W, err: &KnowledgeError) -> io::Result<()> {
    tracing::warn!(target: "terminaltalk::cli", error = %err, "Question update failed");
    match err {
        KnowledgeError::NotFound { question } => {
            say(out, format!("Question not found: {}", question))
        }
        other => say(out, format!("ERROR: {}", other)),
    }
}
