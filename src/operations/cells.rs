//! Cell-level CRUD operations on serialized notebooks.

use serde_json::{Map, Value};

use crate::error::NotebookError;
use crate::notebook::{Cell, CellType, Notebook};
use crate::operations::parse_cell_type;

/// Replace the source of the cell at `cell_index`, optionally changing its
/// type. Switching away from `code` clears outputs and the execution count.
pub fn edit_cell(
    notebook_json: &str,
    cell_index: i64,
    new_content: &str,
    cell_type: Option<&str>,
) -> Result<String, NotebookError> {
    let mut notebook = Notebook::parse(notebook_json)?;
    let index = notebook.checked_index(cell_index)?;
    let cell_type = cell_type.map(parse_cell_type).transpose()?;

    let cell = &mut notebook.cells[index];
    cell.set_source(new_content);
    if let Some(cell_type) = cell_type {
        cell.set_cell_type(cell_type);
    }

    notebook.to_json()
}

/// Append a new cell with the given content and optional metadata.
pub fn create_cell(
    notebook_json: &str,
    content: &str,
    cell_type: &str,
    metadata: Option<Map<String, Value>>,
) -> Result<String, NotebookError> {
    let mut notebook = Notebook::parse(notebook_json)?;
    let cell_type = parse_cell_type(cell_type)?;
    notebook.cells.push(Cell::new(cell_type, content, metadata));
    notebook.to_json()
}

/// Insert a new cell at `position`, shifting subsequent cells right.
/// `position == cell_count` appends.
pub fn insert_cell(
    notebook_json: &str,
    position: i64,
    content: &str,
    cell_type: &str,
    metadata: Option<Map<String, Value>>,
) -> Result<String, NotebookError> {
    let mut notebook = Notebook::parse(notebook_json)?;
    let cell_type = parse_cell_type(cell_type)?;
    let position = notebook.checked_position(position)?;
    notebook
        .cells
        .insert(position, Cell::new(cell_type, content, metadata));
    notebook.to_json()
}

/// Replace cells `start_index..=end_index` with a single cell.
///
/// The merged cell takes the type and metadata of the first merged cell,
/// and its source is each merged cell's text joined with one newline
/// between non-empty sources. A merged code cell starts with empty outputs
/// and no execution count, like a freshly created one.
pub fn merge_cells(
    notebook_json: &str,
    start_index: i64,
    end_index: i64,
) -> Result<String, NotebookError> {
    let mut notebook = Notebook::parse(notebook_json)?;
    let start = notebook.checked_index(start_index)?;
    let end = notebook.checked_index(end_index)?;
    if end < start {
        return Err(NotebookError::InvalidMergeRange {
            start: start_index,
            end: end_index,
        });
    }

    let merged_type = notebook.cells[start].cell_type;
    let merged_metadata = notebook.cells[start].metadata.clone();

    let mut text = String::new();
    for cell in &notebook.cells[start..=end] {
        let cell_text = cell.source_text();
        if cell_text.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&cell_text);
    }

    let merged = Cell::new(merged_type, &text, Some(merged_metadata));
    notebook.cells.drain(start..=end);
    notebook.cells.insert(start, merged);
    notebook.to_json()
}

/// Exchange the cells at the two indices. Equal indices are a no-op.
pub fn swap_cells(
    notebook_json: &str,
    first_index: i64,
    second_index: i64,
) -> Result<String, NotebookError> {
    let mut notebook = Notebook::parse(notebook_json)?;
    let first = notebook.checked_index(first_index)?;
    let second = notebook.checked_index(second_index)?;
    notebook.cells.swap(first, second);
    notebook.to_json()
}

/// The joined source text of every code cell, in notebook order. Markdown
/// and raw cells are excluded; a notebook without code cells yields an
/// empty vector.
pub fn extract_code(notebook_json: &str) -> Result<Vec<String>, NotebookError> {
    let notebook = Notebook::parse(notebook_json)?;
    Ok(notebook
        .cells
        .iter()
        .filter(|cell| cell.cell_type == CellType::Code)
        .map(Cell::source_text)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code_cell(source: &str) -> Value {
        json!({
            "cell_type": "code",
            "metadata": {},
            "source": source,
            "outputs": [],
            "execution_count": null
        })
    }

    fn markdown_cell(source: &str) -> Value {
        json!({"cell_type": "markdown", "metadata": {}, "source": source})
    }

    fn fixture(cells: Vec<Value>) -> String {
        json!({"cells": cells, "metadata": {}, "nbformat": 4, "nbformat_minor": 5}).to_string()
    }

    #[test]
    fn edit_replaces_source() {
        let notebook = fixture(vec![code_cell("x = 1")]);
        let edited = edit_cell(&notebook, 0, "x = 2", None).unwrap();
        let parsed = Notebook::parse(&edited).unwrap();
        assert_eq!(parsed.cells[0].source_text(), "x = 2");
    }

    #[test]
    fn edit_then_edit_back_restores_content() {
        let notebook = fixture(vec![code_cell("original")]);
        let edited = edit_cell(&notebook, 0, "changed", None).unwrap();
        let restored = edit_cell(&edited, 0, "original", None).unwrap();

        let before = Notebook::parse(&notebook).unwrap();
        let after = Notebook::parse(&restored).unwrap();
        assert_eq!(before.cells[0].source_text(), after.cells[0].source_text());
    }

    #[test]
    fn edit_to_markdown_clears_execution_state() {
        let mut cell = code_cell("x = 1");
        cell["execution_count"] = json!(5);
        cell["outputs"] = json!([{"output_type": "stream", "name": "stdout", "text": "hi"}]);
        let notebook = fixture(vec![cell]);

        let edited = edit_cell(&notebook, 0, "# now prose", Some("markdown")).unwrap();
        let value: Value = serde_json::from_str(&edited).unwrap();
        assert_eq!(value["cells"][0]["cell_type"], json!("markdown"));
        assert!(value["cells"][0].get("outputs").is_none());
        assert!(value["cells"][0].get("execution_count").is_none());
    }

    #[test]
    fn edit_rejects_out_of_range_indices() {
        let notebook = fixture(vec![code_cell("x = 1"), code_cell("y = 2")]);
        for index in [-1, 2, 3] {
            assert!(matches!(
                edit_cell(&notebook, index, "z", None),
                Err(NotebookError::CellIndexOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn edit_rejects_unknown_cell_type() {
        let notebook = fixture(vec![code_cell("x = 1")]);
        assert!(matches!(
            edit_cell(&notebook, 0, "x", Some("heading")),
            Err(NotebookError::InvalidCellType(_))
        ));
    }

    #[test]
    fn create_appends_code_cell_with_defaults() {
        let notebook = fixture(vec![markdown_cell("# Intro")]);
        let created = create_cell(&notebook, "import os", "code", None).unwrap();
        let value: Value = serde_json::from_str(&created).unwrap();

        let cells = value["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1]["outputs"], json!([]));
        assert!(cells[1].get("execution_count").is_none());
        assert_eq!(cells[1]["source"], json!(["import os"]));
    }

    #[test]
    fn create_markdown_cell_has_no_outputs() {
        let created = create_cell(&fixture(vec![]), "notes", "markdown", None).unwrap();
        let value: Value = serde_json::from_str(&created).unwrap();
        assert!(value["cells"][0].get("outputs").is_none());
    }

    #[test]
    fn create_carries_provided_metadata() {
        let mut metadata = Map::new();
        metadata.insert("tags".into(), json!(["setup"]));
        let created = create_cell(&fixture(vec![]), "x = 1", "code", Some(metadata)).unwrap();
        let value: Value = serde_json::from_str(&created).unwrap();
        assert_eq!(value["cells"][0]["metadata"]["tags"], json!(["setup"]));
    }

    #[test]
    fn create_rejects_unknown_cell_type() {
        assert!(matches!(
            create_cell(&fixture(vec![]), "x", "heading", None),
            Err(NotebookError::InvalidCellType(_))
        ));
    }

    #[test]
    fn insert_shifts_subsequent_cells_right() {
        let notebook = fixture(vec![code_cell("a = 1"), code_cell("c = 3")]);
        let inserted = insert_cell(&notebook, 1, "b = 2", "code", None).unwrap();
        let parsed = Notebook::parse(&inserted).unwrap();
        let sources: Vec<String> = parsed.cells.iter().map(Cell::source_text).collect();
        assert_eq!(sources, ["a = 1", "b = 2", "c = 3"]);
    }

    #[test]
    fn insert_at_cell_count_appends() {
        let notebook = fixture(vec![code_cell("a = 1")]);
        let inserted = insert_cell(&notebook, 1, "b = 2", "code", None).unwrap();
        let parsed = Notebook::parse(&inserted).unwrap();
        assert_eq!(parsed.cells[1].source_text(), "b = 2");
    }

    #[test]
    fn insert_rejects_out_of_range_positions() {
        let notebook = fixture(vec![code_cell("a = 1")]);
        for position in [-1, 2, 3] {
            assert!(matches!(
                insert_cell(&notebook, position, "x", "code", None),
                Err(NotebookError::PositionOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn merge_joins_sources_with_newlines() {
        let notebook = fixture(vec![
            markdown_cell("# Intro"),
            code_cell("a = 1"),
            code_cell("b = 2"),
            code_cell("c = 3"),
            markdown_cell("# Outro"),
        ]);
        let merged = merge_cells(&notebook, 1, 3).unwrap();
        let parsed = Notebook::parse(&merged).unwrap();

        assert_eq!(parsed.cell_count(), 3);
        assert_eq!(parsed.cells[1].cell_type, CellType::Code);
        assert_eq!(parsed.cells[1].source_text(), "a = 1\nb = 2\nc = 3");
        // merged code cells are reset like freshly created ones
        assert_eq!(parsed.cells[1].outputs, Some(vec![]));
        assert!(parsed.cells[1].execution_count.is_none());
    }

    #[test]
    fn merge_skips_empty_sources_when_joining() {
        let notebook = fixture(vec![code_cell("a = 1"), code_cell(""), code_cell("b = 2")]);
        let merged = merge_cells(&notebook, 0, 2).unwrap();
        let parsed = Notebook::parse(&merged).unwrap();
        assert_eq!(parsed.cells[0].source_text(), "a = 1\nb = 2");
    }

    #[test]
    fn merge_takes_type_of_first_cell() {
        let notebook = fixture(vec![markdown_cell("# Title"), code_cell("x = 1")]);
        let merged = merge_cells(&notebook, 0, 1).unwrap();
        let parsed = Notebook::parse(&merged).unwrap();
        assert_eq!(parsed.cells[0].cell_type, CellType::Markdown);
        assert!(parsed.cells[0].outputs.is_none());
    }

    #[test]
    fn merge_of_single_cell_is_allowed() {
        let notebook = fixture(vec![code_cell("x = 1"), code_cell("y = 2")]);
        let merged = merge_cells(&notebook, 1, 1).unwrap();
        assert_eq!(Notebook::parse(&merged).unwrap().cell_count(), 2);
    }

    #[test]
    fn merge_rejects_bad_ranges() {
        let notebook = fixture(vec![code_cell("a"), code_cell("b"), code_cell("c")]);
        assert!(matches!(
            merge_cells(&notebook, 2, 1),
            Err(NotebookError::InvalidMergeRange { .. })
        ));
        assert!(matches!(
            merge_cells(&notebook, -1, 1),
            Err(NotebookError::CellIndexOutOfRange { .. })
        ));
        assert!(matches!(
            merge_cells(&notebook, 0, 3),
            Err(NotebookError::CellIndexOutOfRange { .. })
        ));
        assert!(matches!(
            merge_cells(&fixture(vec![]), 0, 0),
            Err(NotebookError::CellIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn swap_twice_restores_order() {
        let notebook = fixture(vec![code_cell("a"), code_cell("b"), code_cell("c")]);
        let swapped = swap_cells(&notebook, 0, 2).unwrap();
        let restored = swap_cells(&swapped, 0, 2).unwrap();

        let original: Value = serde_json::from_str(&notebook).unwrap();
        let round_tripped: Value = serde_json::from_str(&restored).unwrap();
        assert_eq!(
            round_tripped["cells"]
                .as_array()
                .unwrap()
                .iter()
                .map(|cell| cell["source"].clone())
                .collect::<Vec<_>>(),
            original["cells"]
                .as_array()
                .unwrap()
                .iter()
                .map(|cell| cell["source"].clone())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn swap_of_equal_indices_is_a_no_op() {
        let notebook = fixture(vec![code_cell("a"), code_cell("b")]);
        let swapped = swap_cells(&notebook, 1, 1).unwrap();
        let parsed = Notebook::parse(&swapped).unwrap();
        assert_eq!(parsed.cells[1].source_text(), "b");
    }

    #[test]
    fn swap_rejects_out_of_range_indices() {
        let notebook = fixture(vec![code_cell("a")]);
        assert!(matches!(
            swap_cells(&notebook, 0, 1),
            Err(NotebookError::CellIndexOutOfRange { .. })
        ));
        assert!(matches!(
            swap_cells(&notebook, -1, 0),
            Err(NotebookError::CellIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn extract_code_returns_only_code_sources() {
        let notebook = fixture(vec![
            markdown_cell("# Intro"),
            code_cell("a=1"),
            code_cell("b=2"),
            markdown_cell("# Outro"),
        ]);
        assert_eq!(extract_code(&notebook).unwrap(), ["a=1", "b=2"]);
    }

    #[test]
    fn extract_code_without_code_cells_is_empty() {
        let notebook = fixture(vec![markdown_cell("# Only prose")]);
        assert!(extract_code(&notebook).unwrap().is_empty());
    }

    #[test]
    fn extract_code_joins_line_vector_sources() {
        let cell = json!({
            "cell_type": "code",
            "metadata": {},
            "source": ["import math\n", "math.pi"],
            "outputs": []
        });
        let notebook = fixture(vec![cell]);
        assert_eq!(extract_code(&notebook).unwrap(), ["import math\nmath.pi"]);
    }
}
