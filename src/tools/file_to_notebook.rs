use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::notebook::CellType;
use crate::operations::convert;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Wrap a text file as a single-cell notebook with default Python kernel
/// metadata
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "file_to_notebook")]
pub struct FileToNotebook {
    /// Path to the file to wrap. Relative paths resolve against the session
    /// context set with set_context.
    pub file_path: String,

    /// The type of the single cell. Defaults to `code`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<CellType>,
}

impl WithExamples for FileToNotebook {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Turning a script into a notebook to iterate on",
            item: Self {
                file_path: "scripts/train.py".into(),
                cell_type: Some(CellType::Code),
            },
        }])
    }
}

impl Tool<NotebookTools> for FileToNotebook {
    fn execute(self, state: &mut NotebookTools) -> Result<String> {
        let Self {
            file_path,
            cell_type,
        } = self;
        let path = state.resolve_path(&file_path, None)?;
        let cell_type = cell_type.unwrap_or(CellType::Code);
        Ok(convert::file_to_notebook(&path, cell_type.as_str())?)
    }
}
