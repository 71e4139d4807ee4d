use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::export::ExportOptions;
use crate::operations::convert;
use crate::state::NotebookTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;

/// Render a notebook to another format: python, html, markdown, rst,
/// latex, pdf, or slides
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "convert_notebook")]
pub struct ConvertNotebook {
    /// The notebook to render, as ipynb-formatted JSON
    pub notebook_json: String,

    /// Target format: one of `python`, `html`, `markdown`, `rst`, `latex`,
    /// `pdf`, or `slides`
    pub target_format: String,

    /// Leave code cell inputs out of the rendered document, where the
    /// target format supports it
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclude_input: bool,

    /// Leave execution outputs out of the rendered document, where the
    /// target format supports it
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclude_output: bool,
}

impl WithExamples for ConvertNotebook {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Rendering a report as HTML without the code",
            item: Self {
                notebook_json: "{\"cells\": [...]}".into(),
                target_format: "html".into(),
                exclude_input: true,
                exclude_output: false,
            },
        }])
    }
}

impl Tool<NotebookTools> for ConvertNotebook {
    fn execute(self, state: &mut NotebookTools) -> Result<String> {
        let Self {
            notebook_json,
            target_format,
            exclude_input,
            exclude_output,
        } = self;
        let options = ExportOptions {
            exclude_input,
            exclude_output,
        };
        Ok(convert::convert_to_format(
            &notebook_json,
            state.exporter(),
            &target_format,
            &options,
        )?)
    }
}
