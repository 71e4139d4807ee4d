use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::operations::convert;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Save a notebook to a timestamped .ipynb file
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "save_notebook")]
pub struct SaveNotebook {
    /// The notebook to save, as ipynb-formatted JSON
    pub notebook_json: String,

    /// Directory to save into. Defaults to the session context directory;
    /// relative paths resolve against it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl WithExamples for SaveNotebook {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Saving a finished notebook into the working directory",
            item: Self {
                notebook_json: "{\"cells\": [...]}".into(),
                directory: None,
            },
        }])
    }
}

impl Tool<NotebookTools> for SaveNotebook {
    fn execute(self, state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            directory,
        } = self;

        let directory = match directory {
            Some(directory) => state.resolve_path(&directory, None)?,
            None => state.get_context(None)?.ok_or_else(|| {
                anyhow::anyhow!("no directory given and no working context set; call set_context first")
            })?,
        };

        let path = convert::save_notebook(&notebook_json, &directory)?;
        Ok(format!("Saved notebook to {}", path.display()))
    }
}
