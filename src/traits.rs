use crate::types::{Example, ToolSchema};
use schemars::{
    generate::SchemaSettings,
    transform::{RecursiveTransform, Transform},
    JsonSchema, Schema,
};
use serde::Serialize;
use serde_json::Value;

/// A callable tool operating on shared server state.
pub trait Tool<State>: Sized {
    fn execute(self, state: &mut State) -> anyhow::Result<String>;
}

/// Worked examples attached to a tool's schema to show the model how the
/// tool is meant to be called.
pub trait WithExamples: Sized + Serialize {
    fn examples() -> Option<Vec<Example<Self>>> {
        None
    }
}

/// Strip the `null` alternative that schemars emits for `Option` fields;
/// optional arguments are expressed by omission, not by explicit null.
fn remove_null(schema: &mut Schema) {
    if let Some(a @ Value::Array(_)) = schema.get_mut("type") {
        let arr = a.as_array_mut().unwrap();
        arr.retain(|v| matches!(v, Value::String(s) if s != "null"));
        if arr.len() == 1 {
            *a = arr.pop().unwrap();
        }
    }

    if let Some(a @ Value::Array(_)) = schema.get_mut("enum") {
        let arr = a.as_array_mut().unwrap();
        arr.retain(|v| matches!(v, Value::String(s) if s != "null"));
    }
}

pub trait AsToolSchema {
    fn as_tool_schema() -> ToolSchema;
}

impl<T> AsToolSchema for T
where
    T: JsonSchema + WithExamples,
{
    fn as_tool_schema() -> ToolSchema {
        let settings = SchemaSettings::draft2020_12().with(|s| {
            s.meta_schema = None;
            s.inline_subschemas = true;
        });

        let generator = settings.into_generator();
        let mut schema = generator.into_root_schema_for::<Self>();

        RecursiveTransform(remove_null).transform(&mut schema);

        // the serde rename is the tool name, the doc comment its description
        let name = schema
            .remove("title")
            .unwrap()
            .as_str()
            .unwrap()
            .to_string();
        let description = schema
            .remove("description")
            .unwrap()
            .as_str()
            .unwrap()
            .to_string();
        schema.remove("$schema");

        if let Some(examples) = Self::examples() {
            schema.insert(
                "examples".to_string(),
                serde_json::to_value(examples).unwrap(),
            );
        }

        ToolSchema {
            name,
            description: Some(description),
            input_schema: schema.into(),
        }
    }
}
