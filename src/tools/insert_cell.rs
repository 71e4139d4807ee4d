use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::notebook::CellType;
use crate::operations::cells;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Insert a new cell at a position, shifting later cells right
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "insert_cell")]
pub struct InsertCell {
    /// The notebook to extend, as ipynb-formatted JSON
    pub notebook_json: String,

    /// Zero-based position for the new cell; a position equal to the cell
    /// count appends
    pub position: i64,

    /// The content of the new cell
    pub content: String,

    /// The type of the new cell. Defaults to `code`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<CellType>,

    /// Optional metadata for the new cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl WithExamples for InsertCell {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Adding a title cell at the very top",
            item: Self {
                notebook_json: "{\"cells\": [{\"cell_type\": \"code\", \"source\": \"x = 1\"}]}"
                    .into(),
                position: 0,
                content: "# Analysis".into(),
                cell_type: Some(CellType::Markdown),
                metadata: None,
            },
        }])
    }
}

impl Tool<NotebookTools> for InsertCell {
    fn execute(self, _state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            position,
            content,
            cell_type,
            metadata,
        } = self;
        let cell_type = cell_type.unwrap_or(CellType::Code);
        Ok(cells::insert_cell(
            &notebook_json,
            position,
            &content,
            cell_type.as_str(),
            metadata,
        )?)
    }
}
