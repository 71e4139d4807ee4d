use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::notebook::CellType;
use crate::operations::cells;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Append a new cell to the end of a notebook
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "create_cell")]
pub struct CreateCell {
    /// The notebook to extend, as ipynb-formatted JSON
    pub notebook_json: String,

    /// The content of the new cell
    pub content: String,

    /// The type of the new cell. Defaults to `code`; code cells start with
    /// empty outputs and no execution count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<CellType>,

    /// Optional metadata for the new cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl WithExamples for CreateCell {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Appending a plotting cell to an empty notebook",
            item: Self {
                notebook_json: "{\"cells\": []}".into(),
                content: "import matplotlib.pyplot as plt\nplt.plot(xs, ys)".into(),
                cell_type: Some(CellType::Code),
                metadata: None,
            },
        }])
    }
}

impl Tool<NotebookTools> for CreateCell {
    fn execute(self, _state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            content,
            cell_type,
            metadata,
        } = self;
        let cell_type = cell_type.unwrap_or(CellType::Code);
        Ok(cells::create_cell(
            &notebook_json,
            &content,
            cell_type.as_str(),
            metadata,
        )?)
    }
}
