//! Integration tests for node registration and dispatch.

use serde_json::json;

use video_resolution_selector::node::{self, CATEGORY, DISPLAY_NAME, NODE_ID};
use video_resolution_selector::registry::registry;
use video_resolution_selector::server::SelectorService;
use video_resolution_selector::table::{resolve_with_source, ResolutionSource};
use video_resolution_selector::{AspectRatio, Mode, Quality, SelectorError};

#[test]
fn test_registration_contract() {
    assert_eq!(NODE_ID, "VideoResolutionSelector");
    assert_eq!(registry().display_name(NODE_ID), Some(DISPLAY_NAME));

    let info = registry().object_info();
    assert_eq!(info[NODE_ID]["category"], CATEGORY);
    assert_eq!(info[NODE_ID]["function"], "get_resolution");
    assert_eq!(info[NODE_ID]["output_node"], false);
}

#[test]
fn test_declared_choices_cover_enumerations() {
    let descriptor = node::descriptor();
    let choices = |name: &str| descriptor.input(name).unwrap().choices.clone();

    assert_eq!(choices("mode").len(), Mode::ALL.len());
    assert_eq!(choices("aspect_ratio").len(), AspectRatio::ALL.len());
    assert_eq!(choices("quality").len(), Quality::ALL.len());
}

#[test]
fn test_every_declared_combination_resolves_from_table() {
    let descriptor = node::descriptor();
    let modes = &descriptor.input("mode").unwrap().choices;
    let aspects = &descriptor.input("aspect_ratio").unwrap().choices;
    let qualities = &descriptor.input("quality").unwrap().choices;

    for mode in modes {
        for aspect_ratio in aspects {
            for quality in qualities {
                let args = json!({"mode": mode, "aspect_ratio": aspect_ratio, "quality": quality});
                let outputs = registry().invoke(NODE_ID, &args).unwrap();
                let (resolution, source) = resolve_with_source(mode, aspect_ratio, quality);
                assert_eq!(source, ResolutionSource::Table);
                assert_eq!(outputs, node::outputs(resolution));
            }
        }
    }
}

#[test]
fn test_invoke_fallback_never_fails() {
    let args = json!({"mode": "bogus", "aspect_ratio": "Horizontal", "quality": "HQ"});
    let outputs = registry().invoke(NODE_ID, &args).unwrap();
    assert_eq!(outputs, vec![json!(832), json!(480)]);
}

#[test]
fn test_invoke_rejects_malformed_arguments() {
    let err = registry().invoke(NODE_ID, &json!("I2V720p")).unwrap_err();
    assert!(matches!(err, SelectorError::ParameterValidation { .. }));
    assert!(err.is_invalid_input());
}

#[test]
fn test_service_exposes_node_as_tool() {
    let service = SelectorService::default();
    let tools = service.tools();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, NODE_ID);
    assert_eq!(tools[0].description.as_deref(), Some(node::DESCRIPTION));

    let args = json!({"mode": "I2V720p", "aspect_ratio": "Horizontal", "quality": "HQ"});
    let args = args.as_object().cloned();
    let result = service.run_tool(NODE_ID, args).unwrap();
    let structured = result.structured_content.unwrap();
    assert_eq!(structured, json!({"width": 1280, "height": 720}));
}
