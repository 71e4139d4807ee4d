//! The tool surface: one file per tool, dispatched by name.

mod convert_notebook;
mod create_cell;
mod edit_cell;
mod extract_code;
mod file_to_notebook;
mod insert_cell;
mod markdown_to_notebook;
mod merge_cells;
mod notebook_to_executable;
mod save_notebook;
mod set_context;
mod swap_cells;

pub use convert_notebook::ConvertNotebook;
pub use create_cell::CreateCell;
pub use edit_cell::EditCell;
pub use extract_code::ExtractCode;
pub use file_to_notebook::FileToNotebook;
pub use insert_cell::InsertCell;
pub use markdown_to_notebook::MarkdownToNotebook;
pub use merge_cells::MergeCells;
pub use notebook_to_executable::NotebookToExecutable;
pub use save_notebook::SaveNotebook;
pub use set_context::SetContext;
pub use swap_cells::SwapCells;

use crate::state::NotebookTools;
use crate::traits::{AsToolSchema, Tool};
use crate::types::ToolSchema;
use anyhow::Result;
use serde::Deserialize;

/// Everything this server can do, keyed by tool name as it appears in a
/// `tools/call` request.
#[derive(Debug, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum Tools {
    SetContext(SetContext),
    EditCell(EditCell),
    CreateCell(CreateCell),
    InsertCell(InsertCell),
    MergeCells(MergeCells),
    SwapCells(SwapCells),
    ExtractCode(ExtractCode),
    ConvertNotebook(ConvertNotebook),
    FileToNotebook(FileToNotebook),
    NotebookToExecutable(NotebookToExecutable),
    MarkdownToNotebook(MarkdownToNotebook),
    SaveNotebook(SaveNotebook),
}

impl Tools {
    pub fn execute(self, state: &mut NotebookTools) -> Result<String> {
        match self {
            Tools::SetContext(tool) => tool.execute(state),
            Tools::EditCell(tool) => tool.execute(state),
            Tools::CreateCell(tool) => tool.execute(state),
            Tools::InsertCell(tool) => tool.execute(state),
            Tools::MergeCells(tool) => tool.execute(state),
            Tools::SwapCells(tool) => tool.execute(state),
            Tools::ExtractCode(tool) => tool.execute(state),
            Tools::ConvertNotebook(tool) => tool.execute(state),
            Tools::FileToNotebook(tool) => tool.execute(state),
            Tools::NotebookToExecutable(tool) => tool.execute(state),
            Tools::MarkdownToNotebook(tool) => tool.execute(state),
            Tools::SaveNotebook(tool) => tool.execute(state),
        }
    }

    pub fn schema() -> Vec<ToolSchema> {
        vec![
            SetContext::as_tool_schema(),
            EditCell::as_tool_schema(),
            CreateCell::as_tool_schema(),
            InsertCell::as_tool_schema(),
            MergeCells::as_tool_schema(),
            SwapCells::as_tool_schema(),
            ExtractCode::as_tool_schema(),
            ConvertNotebook::as_tool_schema(),
            FileToNotebook::as_tool_schema(),
            NotebookToExecutable::as_tool_schema(),
            MarkdownToNotebook::as_tool_schema(),
            SaveNotebook::as_tool_schema(),
        ]
    }
}
