use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::operations::convert;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Build a notebook from markdown text, one cell per header section
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "markdown_to_notebook")]
pub struct MarkdownToNotebook {
    /// The markdown content to convert. Each header line starts a new
    /// markdown cell; content before the first header becomes a leading
    /// cell.
    pub markdown: String,
}

impl WithExamples for MarkdownToNotebook {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Turning an outline into notebook sections",
            item: Self {
                markdown: "# Data loading\nRead the CSV.\n# Cleaning\nDrop null rows.".into(),
            },
        }])
    }
}

impl Tool<NotebookTools> for MarkdownToNotebook {
    fn execute(self, _state: &mut NotebookTools) -> Result<String> {
        Ok(convert::markdown_to_notebook(&self.markdown)?)
    }
}
