use anyhow::Result;
use serde_json::{json, Value};

use notebook_edit_mcp::error::NotebookError;
use notebook_edit_mcp::export::{DocumentExporter, ExportOptions, OutputFormat};
use notebook_edit_mcp::notebook::Notebook;
use notebook_edit_mcp::state::NotebookTools;
use notebook_edit_mcp::tools::Tools;

struct StubExporter;

impl DocumentExporter for StubExporter {
    fn render(
        &self,
        notebook: &Notebook,
        format: OutputFormat,
        _options: &ExportOptions,
    ) -> Result<String, NotebookError> {
        Ok(format!("{} cells as {format}", notebook.cell_count()))
    }
}

fn state() -> NotebookTools {
    NotebookTools::new(None)
        .unwrap()
        .with_exporter(Box::new(StubExporter))
}

fn dispatch(state: &mut NotebookTools, name: &str, arguments: Value) -> Result<String> {
    let tool: Tools = serde_json::from_value(json!({"name": name, "arguments": arguments}))?;
    tool.execute(state)
}

fn sample_notebook() -> String {
    json!({
        "cells": [
            {"cell_type": "markdown", "metadata": {}, "source": "# Report"},
            {"cell_type": "code", "metadata": {}, "source": "x = 41", "outputs": []}
        ],
        "metadata": {},
        "nbformat": 4,
        "nbformat_minor": 5
    })
    .to_string()
}

#[test]
fn every_tool_is_listed_with_a_schema() {
    let schemas = Tools::schema();
    let names: Vec<&str> = schemas.iter().map(|schema| schema.name.as_str()).collect();

    assert_eq!(
        names,
        [
            "set_context",
            "edit_cell",
            "create_cell",
            "insert_cell",
            "merge_cells",
            "swap_cells",
            "extract_code",
            "convert_notebook",
            "file_to_notebook",
            "notebook_to_executable",
            "markdown_to_notebook",
            "save_notebook",
        ]
    );

    for schema in &schemas {
        let description = schema.description.as_deref().unwrap_or_default();
        assert!(!description.is_empty(), "{} lacks a description", schema.name);
        assert_eq!(schema.input_schema["type"], json!("object"));
    }
}

#[test]
fn edit_cell_dispatches_and_returns_the_document() {
    let mut state = state();
    let response = dispatch(
        &mut state,
        "edit_cell",
        json!({
            "notebook_json": sample_notebook(),
            "cell_index": 1,
            "new_content": "x = 42"
        }),
    )
    .unwrap();

    let notebook = Notebook::parse(&response).unwrap();
    assert_eq!(notebook.cells[1].source_text(), "x = 42");
}

#[test]
fn out_of_range_errors_surface_through_dispatch() {
    let mut state = state();
    let error = dispatch(
        &mut state,
        "edit_cell",
        json!({
            "notebook_json": sample_notebook(),
            "cell_index": 9,
            "new_content": "x = 42"
        }),
    )
    .unwrap_err();
    assert!(error.to_string().contains("out of range"));
}

#[test]
fn create_cell_defaults_to_code() {
    let mut state = state();
    let response = dispatch(
        &mut state,
        "create_cell",
        json!({"notebook_json": sample_notebook(), "content": "y = 2"}),
    )
    .unwrap();

    let value: Value = serde_json::from_str(&response).unwrap();
    let cells = value["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[2]["cell_type"], json!("code"));
    assert_eq!(cells[2]["outputs"], json!([]));
}

#[test]
fn invalid_enum_arguments_are_rejected_at_dispatch() {
    let mut state = state();
    assert!(dispatch(
        &mut state,
        "create_cell",
        json!({"notebook_json": sample_notebook(), "content": "y", "cell_type": "heading"}),
    )
    .is_err());
}

#[test]
fn unknown_tool_names_fail_to_deserialize() {
    let parsed: Result<Tools, _> =
        serde_json::from_value(json!({"name": "run_notebook", "arguments": {}}));
    assert!(parsed.is_err());
}

#[test]
fn extract_code_returns_a_json_array() {
    let mut state = state();
    let response = dispatch(
        &mut state,
        "extract_code",
        json!({"notebook_json": sample_notebook()}),
    )
    .unwrap();
    let extracted: Vec<String> = serde_json::from_str(&response).unwrap();
    assert_eq!(extracted, ["x = 41"]);
}

#[test]
fn convert_notebook_uses_the_injected_exporter() {
    let mut state = state();
    let response = dispatch(
        &mut state,
        "convert_notebook",
        json!({"notebook_json": sample_notebook(), "target_format": "html"}),
    )
    .unwrap();
    assert_eq!(response, "2 cells as html");
}

#[test]
fn convert_notebook_rejects_unsupported_formats() {
    let mut state = state();
    let error = dispatch(
        &mut state,
        "convert_notebook",
        json!({"notebook_json": sample_notebook(), "target_format": "docx"}),
    )
    .unwrap_err();
    assert!(error.to_string().contains("unsupported export format"));
}

#[test]
fn save_notebook_writes_into_the_session_context() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = state();

    dispatch(
        &mut state,
        "set_context",
        json!({"path": dir.path().to_string_lossy()}),
    )
    .unwrap();
    let response = dispatch(
        &mut state,
        "save_notebook",
        json!({"notebook_json": sample_notebook()}),
    )
    .unwrap();
    assert!(response.starts_with("Saved notebook to "));

    let saved: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(saved.len(), 1);
    let name = saved[0].as_ref().unwrap().file_name();
    let name = name.to_string_lossy();
    assert!(name.starts_with("notebook_") && name.ends_with(".ipynb"));
}

#[test]
fn save_notebook_without_context_or_directory_fails() {
    let mut state = state();
    assert!(dispatch(
        &mut state,
        "save_notebook",
        json!({"notebook_json": sample_notebook()}),
    )
    .is_err());
}

#[test]
fn markdown_to_notebook_round_trips_through_dispatch() {
    let mut state = state();
    let response = dispatch(
        &mut state,
        "markdown_to_notebook",
        json!({"markdown": "# Title\nBody\n## Sub\nMore"}),
    )
    .unwrap();
    let notebook = Notebook::parse(&response).unwrap();
    assert_eq!(notebook.cell_count(), 2);
}

#[test]
fn file_to_notebook_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("script.py"), "print('hello')").unwrap();

    let mut state = state();
    dispatch(
        &mut state,
        "set_context",
        json!({"path": dir.path().to_string_lossy()}),
    )
    .unwrap();
    let response = dispatch(&mut state, "file_to_notebook", json!({"file_path": "script.py"}))
        .unwrap();

    let notebook = Notebook::parse(&response).unwrap();
    assert_eq!(notebook.cells[0].source_text(), "print('hello')");
}

#[test]
fn notebook_to_executable_writes_through_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.py");
    let mut state = state();

    let response = dispatch(
        &mut state,
        "notebook_to_executable",
        json!({
            "notebook_json": sample_notebook(),
            "output_path": output.to_string_lossy()
        }),
    )
    .unwrap();

    assert_eq!(response, "2 cells as python");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), response);
}
