//! The Video Resolution Selector node.
//!
//! This module declares everything the host needs to list and render the node
//! (identifier, display name, category, input widgets, outputs) and runs the
//! node against the host's JSON arguments.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use std::sync::Arc;

use crate::errors::{Result, SelectorError};
use crate::table;
use crate::types::{AspectRatio, Mode, Quality, Resolution, ResolutionRequest};

pub const NODE_ID: &str = "VideoResolutionSelector";
pub const DISPLAY_NAME: &str = "Video Resolution Selector 🎬";
pub const CATEGORY: &str = "ImpactFrames💥🎞️/utils";
pub const FUNCTION: &str = "get_resolution";

const QUALITY_TOOLTIP: &str =
    "Select quality level - HQ: High Quality, MQ: Medium Quality, LQ: Low Quality";

pub const DESCRIPTION: &str = "\
Automatically selects the appropriate width and height based on video generation mode,
aspect ratio, and quality settings. Compatible with KJNodes image resize nodes.

Modes:
- I2V480p: Image to Video 480p
- I2V720p: Image to Video 720p
- T2V1.3B: Text to Video 1.3B model
- T2V14B: Text to Video 14B model

Aspect Ratios:
- Horizontal: Wider than tall (landscape)
- Vertical: Taller than wide (portrait)
- Squarish: Roughly square aspect ratio

Quality:
- HQ: Highest available resolution for the mode
- MQ: Medium quality/resolution
- LQ: Lower quality/resolution
";

/// A closed-choice input widget
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InputField {
    pub name: &'static str,
    pub choices: Vec<&'static str>,
    pub default: &'static str,
    pub tooltip: &'static str,
}

/// A typed output socket
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutputField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Static description of a node as the host lists it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub description: &'static str,
    pub inputs: Vec<InputField>,
    pub outputs: Vec<OutputField>,
}

impl NodeDescriptor {
    /// Render in the host's object-info shape
    pub fn object_info(&self) -> Value {
        let mut required = Map::new();
        for input in &self.inputs {
            let options = json!({ "default": input.default, "tooltip": input.tooltip });
            let widget = json!([input.choices, options]);
            required.insert(input.name.to_string(), widget);
        }

        let input_order: Vec<&str> = self.inputs.iter().map(|i| i.name).collect();
        let output_types: Vec<&str> = self.outputs.iter().map(|o| o.kind).collect();
        let output_names: Vec<&str> = self.outputs.iter().map(|o| o.name).collect();
        let output_is_list = vec![false; self.outputs.len()];

        json!({
            "input": { "required": required },
            "input_order": { "required": input_order },
            "output": output_types,
            "output_name": output_names,
            "output_is_list": output_is_list,
            "name": self.id,
            "display_name": self.display_name,
            "description": self.description,
            "category": self.category,
            "function": self.function,
            "output_node": false,
        })
    }

    /// JSON Schema object describing the accepted arguments
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for input in &self.inputs {
            let property = json!({
                "type": "string",
                "enum": input.choices,
                "default": input.default,
                "description": input.tooltip,
            });
            properties.insert(input.name.to_string(), property);
        }
        let required: Vec<&str> = self.inputs.iter().map(|i| i.name).collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(required));
        schema
    }

    pub fn input(&self, name: &str) -> Option<&InputField> {
        self.inputs.iter().find(|input| input.name == name)
    }
}

/// Build the descriptor for the resolution selector
pub fn descriptor() -> NodeDescriptor {
    NodeDescriptor {
        id: NODE_ID,
        display_name: DISPLAY_NAME,
        category: CATEGORY,
        function: FUNCTION,
        description: DESCRIPTION,
        inputs: vec![
            InputField {
                name: "mode",
                choices: Mode::ALL.iter().map(Mode::as_str).collect(),
                default: Mode::default().as_str(),
                tooltip: "Select the video generation mode",
            },
            InputField {
                name: "aspect_ratio",
                choices: AspectRatio::ALL.iter().map(AspectRatio::as_str).collect(),
                default: AspectRatio::default().as_str(),
                tooltip: "Select the aspect ratio orientation",
            },
            InputField {
                name: "quality",
                choices: Quality::ALL.iter().map(Quality::as_str).collect(),
                default: Quality::default().as_str(),
                tooltip: QUALITY_TOOLTIP,
            },
        ],
        outputs: vec![
            OutputField {
                name: "width",
                kind: "INT",
            },
            OutputField {
                name: "height",
                kind: "INT",
            },
        ],
    }
}

/// JSON Schema of the node's output pair
pub fn output_schema() -> Result<Map<String, Value>> {
    let schema = schemars::schema_for!(Resolution);
    let message = "output schema is not an object".to_string();
    match serde_json::to_value(&schema)? {
        Value::Object(map) => Ok(map),
        _ => Err(SelectorError::Serialization(Arc::new(message))),
    }
}

fn string_arg(args: &Map<String, Value>, name: &str) -> Result<Option<String>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => {
            let message = format!("expected a string, got {other}");
            Err(SelectorError::parameter(name, message))
        }
    }
}

/// Parse host arguments into a request
///
/// Absent fields take their declared default. Values are not checked against
/// the choices here; that is the resolver's job.
pub fn parse_args(args: &Value) -> Result<ResolutionRequest> {
    let empty = Map::new();
    let args = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            let message = format!("expected an object, got {other}");
            return Err(SelectorError::parameter("arguments", message));
        }
    };

    let mut request = ResolutionRequest::default();
    if let Some(mode) = string_arg(args, "mode")? {
        request.mode = mode;
    }
    if let Some(aspect_ratio) = string_arg(args, "aspect_ratio")? {
        request.aspect_ratio = aspect_ratio;
    }
    if let Some(quality) = string_arg(args, "quality")? {
        request.quality = quality;
    }
    Ok(request)
}

/// Run the node
#[instrument(level = "debug", skip(args))]
pub fn execute(args: &Value) -> Result<Resolution> {
    let request = parse_args(args)?;
    debug!("{} called with {:?}", NODE_ID, request);
    Ok(table::resolve_request(&request))
}

/// Outputs in declared order, as the host consumes them
pub fn outputs(resolution: Resolution) -> Vec<Value> {
    vec![json!(resolution.width), json!(resolution.height)]
}
