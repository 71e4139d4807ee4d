//! Seam to the external document-export engine.
//!
//! This crate does not render notebooks itself. `DocumentExporter` is the
//! boundary, and the production implementation shells out to
//! `jupyter-nbconvert`, streaming the notebook through stdin. Tests swap in
//! a stub implementation.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::NotebookError;
use crate::notebook::Notebook;

/// Formats the export engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Python,
    Html,
    Markdown,
    Rst,
    Latex,
    Pdf,
    Slides,
}

impl OutputFormat {
    /// The `--to` identifier nbconvert expects. `python` maps to its script
    /// exporter; everything else passes through unchanged.
    fn nbconvert_target(self) -> &'static str {
        match self {
            OutputFormat::Python => "script",
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Rst => "rst",
            OutputFormat::Latex => "latex",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Slides => "slides",
        }
    }
}

/// Rendering switches honored by targets that distinguish inputs from
/// outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub exclude_input: bool,
    pub exclude_output: bool,
}

/// The external rendering collaborator.
pub trait DocumentExporter {
    fn render(
        &self,
        notebook: &Notebook,
        format: OutputFormat,
        options: &ExportOptions,
    ) -> Result<String, NotebookError>;
}

/// Renders via the `jupyter-nbconvert` command line, reading the converted
/// document from its stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct NbconvertExporter;

impl DocumentExporter for NbconvertExporter {
    fn render(
        &self,
        notebook: &Notebook,
        format: OutputFormat,
        options: &ExportOptions,
    ) -> Result<String, NotebookError> {
        let mut command = Command::new("jupyter-nbconvert");
        command
            .arg("--to")
            .arg(format.nbconvert_target())
            .arg("--stdin")
            .arg("--stdout");
        if options.exclude_input {
            command.arg("--TemplateExporter.exclude_input=True");
        }
        if options.exclude_output {
            command.arg("--TemplateExporter.exclude_output=True");
        }
        log::debug!("invoking {command:?}");

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let notebook_json = notebook.to_json()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(notebook_json.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(NotebookError::Render {
                format: format.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // pdf output is binary; a lossy read is acceptable for a passthrough
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
