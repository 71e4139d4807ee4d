use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::operations::cells;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Merge a consecutive range of cells into one
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "merge_cells")]
pub struct MergeCells {
    /// The notebook to modify, as ipynb-formatted JSON
    pub notebook_json: String,

    /// Zero-based index of the first cell to merge (inclusive)
    pub start_index: i64,

    /// Zero-based index of the last cell to merge (inclusive)
    pub end_index: i64,
}

impl WithExamples for MergeCells {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Collapsing three setup cells into one",
            item: Self {
                notebook_json: "{\"cells\": [...]}".into(),
                start_index: 0,
                end_index: 2,
            },
        }])
    }
}

impl Tool<NotebookTools> for MergeCells {
    fn execute(self, _state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            start_index,
            end_index,
        } = self;
        Ok(cells::merge_cells(&notebook_json, start_index, end_index)?)
    }
}
