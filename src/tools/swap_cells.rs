use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::operations::cells;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Exchange the positions of two cells
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "swap_cells")]
pub struct SwapCells {
    /// The notebook to modify, as ipynb-formatted JSON
    pub notebook_json: String,

    /// Zero-based index of the first cell
    pub first_index: i64,

    /// Zero-based index of the second cell
    pub second_index: i64,
}

impl WithExamples for SwapCells {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Moving an imports cell above the cell that uses it",
            item: Self {
                notebook_json: "{\"cells\": [...]}".into(),
                first_index: 0,
                second_index: 1,
            },
        }])
    }
}

impl Tool<NotebookTools> for SwapCells {
    fn execute(self, _state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            first_index,
            second_index,
        } = self;
        Ok(cells::swap_cells(&notebook_json, first_index, second_index)?)
    }
}
