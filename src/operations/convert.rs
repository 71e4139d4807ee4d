//! Conversions between notebooks and other document formats.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::NotebookError;
use crate::export::{DocumentExporter, ExportOptions, OutputFormat};
use crate::notebook::{Cell, CellType, Notebook};
use crate::operations::parse_cell_type;

/// Render a notebook to `target_format` through the export engine.
///
/// The format string is validated before the engine is invoked, so an
/// unsupported target never reaches the renderer.
pub fn convert_to_format(
    notebook_json: &str,
    exporter: &dyn DocumentExporter,
    target_format: &str,
    options: &ExportOptions,
) -> Result<String, NotebookError> {
    let notebook = Notebook::parse(notebook_json)?;
    let format = OutputFormat::from_str(target_format)
        .map_err(|_| NotebookError::UnsupportedFormat(target_format.to_string()))?;
    exporter.render(&notebook, format, options)
}

/// Wrap a text file's content as the single cell of a new notebook with
/// default Python kernel metadata.
pub fn file_to_notebook(path: &Path, cell_type: &str) -> Result<String, NotebookError> {
    let cell_type = parse_cell_type(cell_type)?;
    let content = fs::read_to_string(path)?;

    let mut notebook = Notebook::with_python_kernel();
    notebook.cells.push(Cell::new(cell_type, &content, None));
    notebook.to_json()
}

/// Convert a notebook and, when `output_path` is given, persist the
/// rendered text there. Write failures are surfaced, never swallowed.
pub fn notebook_to_executable(
    notebook_json: &str,
    exporter: &dyn DocumentExporter,
    target_format: &str,
    output_path: Option<&Path>,
) -> Result<String, NotebookError> {
    let rendered = convert_to_format(
        notebook_json,
        exporter,
        target_format,
        &ExportOptions::default(),
    )?;
    if let Some(path) = output_path {
        fs::write(path, &rendered)?;
    }
    Ok(rendered)
}

/// Build a notebook from markdown text, one markdown cell per header
/// section.
///
/// A section is a header line (one or more `#` followed by whitespace) plus
/// everything up to the next header. Content before the first header
/// becomes a leading cell when non-empty; input without any header becomes
/// a single cell. The split is deterministic.
pub fn markdown_to_notebook(markdown: &str) -> Result<String, NotebookError> {
    let mut notebook = Notebook::with_python_kernel();
    for section in split_markdown_sections(markdown) {
        notebook
            .cells
            .push(Cell::new(CellType::Markdown, &section, None));
    }
    notebook.to_json()
}

/// Validate a notebook JSON string and write it to
/// `notebook_<unix-timestamp>.ipynb` under `directory`, returning the
/// written path.
pub fn save_notebook(notebook_json: &str, directory: &Path) -> Result<PathBuf, NotebookError> {
    let notebook = Notebook::parse(notebook_json)?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let path = directory.join(format!("notebook_{timestamp}.ipynb"));
    fs::write(&path, notebook.to_json()?)?;
    Ok(path)
}

fn is_markdown_header(line: &str) -> bool {
    let rest = line.trim_start_matches('#');
    rest.len() < line.len() && rest.starts_with(|c: char| c.is_whitespace())
}

fn split_markdown_sections(markdown: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();

    for line in markdown.split_inclusive('\n') {
        if is_markdown_header(line) {
            if !current.trim().is_empty() {
                sections.push(std::mem::take(&mut current));
            } else {
                // whitespace-only lead-in gets no cell of its own
                current.clear();
            }
        }
        current.push_str(line);
    }

    if !current.trim().is_empty() || sections.is_empty() {
        sections.push(current);
    }
    sections
}
