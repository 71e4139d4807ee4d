use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::operations::cells;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Collect the source of every code cell, returned as a JSON array of
/// strings in notebook order
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "extract_code")]
pub struct ExtractCode {
    /// The notebook to read, as ipynb-formatted JSON
    pub notebook_json: String,
}

impl WithExamples for ExtractCode {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Pulling the code out of a mixed notebook",
            item: Self {
                notebook_json: "{\"cells\": [{\"cell_type\": \"code\", \"source\": \"a = 1\"}]}"
                    .into(),
            },
        }])
    }
}

impl Tool<NotebookTools> for ExtractCode {
    fn execute(self, _state: &mut NotebookTools) -> Result<String> {
        let code = cells::extract_code(&self.notebook_json)?;
        Ok(serde_json::to_string_pretty(&code)?)
    }
}
