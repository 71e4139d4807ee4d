use std::path::PathBuf;

use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Set the working directory that relative file paths resolve against
#[derive(Serialize, Deserialize, Debug, schemars::JsonSchema)]
#[serde(rename = "set_context")]
pub struct SetContext {
    /// Directory path to set as context. Subsequent file paths may be given
    /// relative to this directory.
    pub path: String,
}

impl WithExamples for SetContext {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Working inside a data science project",
            item: Self {
                path: "~/projects/churn-analysis".into(),
            },
        }])
    }
}

impl Tool<NotebookTools> for SetContext {
    fn execute(self, state: &mut NotebookTools) -> Result<String> {
        let Self { path } = self;
        let path = PathBuf::from(&*shellexpand::tilde(&path));
        let response = format!("Set context to {}", path.display());
        state.set_context(None, path)?;
        Ok(response)
    }
}
