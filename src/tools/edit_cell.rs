use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::notebook::{CellType, Notebook};
use crate::operations::cells;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Replace the source of a notebook cell, optionally changing its type
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "edit_cell")]
pub struct EditCell {
    /// The notebook to edit, as ipynb-formatted JSON
    pub notebook_json: String,

    /// Zero-based index of the cell to edit
    pub cell_index: i64,

    /// The new source for the cell
    pub new_content: String,

    /// Optional new type for the cell. Switching a code cell to markdown or
    /// raw discards its outputs and execution count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<CellType>,
}

impl WithExamples for EditCell {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Fixing the import at the top of the first cell",
            item: Self {
                notebook_json: "{\"cells\": [{\"cell_type\": \"code\", \"source\": \"import nunpy\"}]}".into(),
                cell_index: 0,
                new_content: "import numpy as np".into(),
                cell_type: None,
            },
        }])
    }
}

impl Tool<NotebookTools> for EditCell {
    fn execute(self, _state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            cell_index,
            new_content,
            cell_type,
        } = self;

        let previous = Notebook::parse(&notebook_json)?
            .cell(cell_index)?
            .source_text();
        let updated = cells::edit_cell(
            &notebook_json,
            cell_index,
            &new_content,
            cell_type.map(CellType::as_str),
        )?;

        if log::log_enabled!(log::Level::Debug) {
            let patch = diffy::create_patch(&previous, &new_content);
            log::debug!("edit_cell {cell_index}:\n{patch}");
        }

        Ok(updated)
    }
}
