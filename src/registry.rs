//! Host registration.
//!
//! Each node is registered once, at load time, under a stable identifier
//! together with its display name. The host lists nodes through
//! [`NodeRegistry::object_info`] and runs them through [`NodeRegistry::invoke`].

use lazy_static::lazy_static;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::errors::{Result, SelectorError};
use crate::node::{self, NodeDescriptor};

/// Executes a node against host arguments, returning outputs in declared order
pub type NodeFn = fn(&Value) -> Result<Vec<Value>>;

/// A node as seen by the host
#[derive(Clone)]
pub struct RegisteredNode {
    pub descriptor: NodeDescriptor,
    /// JSON Schema of the outputs as a named object, when one is declared
    pub output_schema: Option<Map<String, Value>>,
    pub run: NodeFn,
}

impl std::fmt::Debug for RegisteredNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredNode")
            .field("descriptor", &self.descriptor)
            .field("output_schema", &self.output_schema)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct NodeRegistry {
    class_mappings: BTreeMap<&'static str, RegisteredNode>,
    display_name_mappings: BTreeMap<&'static str, &'static str>,
}

fn run_resolution_selector(args: &Value) -> Result<Vec<Value>> {
    node::execute(args).map(node::outputs)
}

lazy_static! {
    static ref REGISTRY: NodeRegistry = {
        let mut registry = NodeRegistry::default();
        let output_schema = match node::output_schema() {
            Ok(schema) => Some(schema),
            Err(e) => {
                warn!("No output schema for {}: {}", node::NODE_ID, e);
                None
            }
        };
        registry.register(node::descriptor(), output_schema, run_resolution_selector);
        registry
    };
}

/// The process-wide registry holding every node this crate provides
pub fn registry() -> &'static NodeRegistry {
    &REGISTRY
}

impl NodeRegistry {
    pub fn register(
        &mut self,
        descriptor: NodeDescriptor,
        output_schema: Option<Map<String, Value>>,
        run: NodeFn,
    ) {
        let (id, display_name) = (descriptor.id, descriptor.display_name);
        info!("Registering node {} ({})", id, display_name);
        let node = RegisteredNode {
            descriptor,
            output_schema,
            run,
        };
        self.display_name_mappings.insert(id, display_name);
        self.class_mappings.insert(id, node);
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.class_mappings.keys().copied()
    }

    pub fn get(&self, id: &str) -> Result<&RegisteredNode> {
        self.class_mappings
            .get(id)
            .ok_or_else(|| SelectorError::UnknownNode(Arc::new(id.to_string())))
    }

    pub fn display_name(&self, id: &str) -> Option<&'static str> {
        self.display_name_mappings.get(id).copied()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &NodeDescriptor> + '_ {
        self.class_mappings.values().map(|node| &node.descriptor)
    }

    /// Object info for every node, keyed by identifier
    pub fn object_info(&self) -> Value {
        let info: Map<String, Value> = self
            .descriptors()
            .map(|descriptor| (descriptor.id.to_string(), descriptor.object_info()))
            .collect();
        Value::Object(info)
    }

    #[instrument(level = "debug", skip(self, args))]
    pub fn invoke(&self, id: &str, args: &Value) -> Result<Vec<Value>> {
        let node = self.get(id)?;
        let outputs = (node.run)(args)?;
        debug!("{} produced {:?}", id, outputs);
        Ok(outputs)
    }
}
