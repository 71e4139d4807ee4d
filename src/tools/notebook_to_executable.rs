use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::operations::convert;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Convert a notebook to an executable format, optionally writing the
/// result to a file
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "notebook_to_executable")]
pub struct NotebookToExecutable {
    /// The notebook to convert, as ipynb-formatted JSON
    pub notebook_json: String,

    /// Target format. Defaults to `python`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_format: Option<String>,

    /// Where to write the converted document. When omitted, the result is
    /// only returned. Relative paths resolve against the session context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl WithExamples for NotebookToExecutable {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Exporting an analysis notebook as a runnable script",
            item: Self {
                notebook_json: "{\"cells\": [...]}".into(),
                target_format: None,
                output_path: Some("analysis.py".into()),
            },
        }])
    }
}

impl Tool<NotebookTools> for NotebookToExecutable {
    fn execute(self, state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            target_format,
            output_path,
        } = self;

        let output_path = output_path
            .map(|path| state.resolve_path(&path, None))
            .transpose()?;
        let target_format = target_format.as_deref().unwrap_or("python");

        Ok(convert::notebook_to_executable(
            &notebook_json,
            state.exporter(),
            target_format,
            output_path.as_deref(),
        )?)
    }
}
