//! Typed representation of the ipynb document format.
//!
//! The model is deliberately open: every entity keeps a flattened map of
//! keys it does not recognize, so a notebook written by another Jupyter
//! tool round-trips without losing anything outside the fields this crate
//! understands. Absent optional fields are omitted on serialization to
//! match the sparsity of canonical ipynb files.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::NotebookError;

/// The closed set of cell kinds defined by the notebook format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

impl CellType {
    /// The wire-format string for this cell type.
    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Code => "code",
            CellType::Markdown => "markdown",
            CellType::Raw => "raw",
        }
    }
}

/// Cell source as it appears on disk: a single string or a vector of line
/// strings. Lines produced by this crate keep their trailing newline,
/// matching what Jupyter itself writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Text(String),
    Lines(Vec<String>),
}

impl Default for Source {
    fn default() -> Self {
        Source::Lines(Vec::new())
    }
}

impl Source {
    /// Normalize a flat string into newline-retaining lines.
    pub fn from_text(text: &str) -> Self {
        Source::Lines(split_lines(text))
    }

    /// The source as one flat string, whichever shape it was stored in.
    pub fn to_text(&self) -> String {
        match self {
            Source::Text(text) => text.clone(),
            Source::Lines(lines) => lines.concat(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Source::Text(text) => text.is_empty(),
            Source::Lines(lines) => lines.iter().all(|line| line.is_empty()),
        }
    }
}

/// Split a string into lines that retain their trailing newline, so that
/// concatenating the lines reproduces the input exactly.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// One recorded output of a code cell execution. Which optional fields are
/// populated depends on `output_type`; no cross-field validation is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellOutput {
    pub output_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evalue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One unit of notebook content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<CellOutput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// Build a cell of the given type from flat text. Code cells start with
    /// an empty output list and no execution count.
    pub fn new(cell_type: CellType, text: &str, metadata: Option<Map<String, Value>>) -> Self {
        let mut cell = Cell {
            cell_type,
            metadata: metadata.unwrap_or_default(),
            source: Source::from_text(text),
            outputs: None,
            execution_count: None,
            extra: Map::new(),
        };
        if cell_type == CellType::Code {
            cell.outputs = Some(Vec::new());
        }
        cell
    }

    /// Replace the source, clearing any now-stale execution count.
    pub fn set_source(&mut self, text: &str) {
        self.source = Source::from_text(text);
        self.execution_count = None;
    }

    /// Change the cell type. Leaving `code` drops outputs and the execution
    /// count; becoming `code` gains an empty output list.
    pub fn set_cell_type(&mut self, cell_type: CellType) {
        self.cell_type = cell_type;
        if cell_type == CellType::Code {
            if self.outputs.is_none() {
                self.outputs = Some(Vec::new());
            }
        } else {
            self.outputs = None;
            self.execution_count = None;
        }
    }

    pub fn source_text(&self) -> String {
        self.source.to_text()
    }
}

/// Notebook-level metadata: a handful of recognized optional fields plus
/// whatever else the producing tool stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NotebookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernelspec: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_nbformat() -> i64 {
    4
}

fn default_nbformat_minor() -> i64 {
    5
}

/// A complete notebook document: an ordered cell sequence plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: NotebookMetadata,
    #[serde(default = "default_nbformat")]
    pub nbformat: i64,
    #[serde(default = "default_nbformat_minor")]
    pub nbformat_minor: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Notebook {
    fn default() -> Self {
        Notebook {
            cells: Vec::new(),
            metadata: NotebookMetadata::default(),
            nbformat: default_nbformat(),
            nbformat_minor: default_nbformat_minor(),
            extra: Map::new(),
        }
    }
}

impl Notebook {
    /// Deserialize an ipynb JSON string.
    pub fn parse(notebook_json: &str) -> Result<Self, NotebookError> {
        Ok(serde_json::from_str(notebook_json)?)
    }

    /// Serialize back to ipynb JSON, two-space indented like Jupyter's own
    /// output, omitting absent optional fields.
    pub fn to_json(&self) -> Result<String, NotebookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A fresh notebook carrying the default Python 3 kernel metadata that
    /// Jupyter writes for newly created documents.
    pub fn with_python_kernel() -> Self {
        let mut notebook = Notebook::default();
        notebook.metadata.kernelspec = Some(json!({
            "display_name": "Python 3",
            "language": "python",
            "name": "python3"
        }));
        notebook.metadata.language_info = Some(json!({
            "codemirror_mode": {
                "name": "ipython",
                "version": 3
            },
            "file_extension": ".py",
            "mimetype": "text/x-python",
            "name": "python",
            "nbconvert_exporter": "python",
            "pygments_lexer": "ipython3",
            "version": "3.8.0"
        }));
        notebook
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Validate a signed cell index against `[0, cell_count)`.
    pub fn checked_index(&self, index: i64) -> Result<usize, NotebookError> {
        let count = self.cells.len();
        usize::try_from(index)
            .ok()
            .filter(|index| *index < count)
            .ok_or(NotebookError::CellIndexOutOfRange { index, count })
    }

    /// Validate a signed insertion position against `[0, cell_count]`.
    pub fn checked_position(&self, position: i64) -> Result<usize, NotebookError> {
        let count = self.cells.len();
        usize::try_from(position)
            .ok()
            .filter(|position| *position <= count)
            .ok_or(NotebookError::PositionOutOfRange { position, count })
    }

    /// Bounds-checked cell access.
    pub fn cell(&self, index: i64) -> Result<&Cell, NotebookError> {
        let index = self.checked_index(index)?;
        Ok(&self.cells[index])
    }
}
