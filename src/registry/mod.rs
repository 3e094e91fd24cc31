// src/registry/mod.rs
// Operation catalog: registration, lookup, listing and dispatch

pub mod schema;
pub mod validate;

pub use schema::{Constraints, ParamKind, ParameterSpec};
pub use validate::{Args, validate};

use crate::error::{CalcError, Result};
use crate::response::Response;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Handler signature shared by every operation
pub type Handler = fn(&Args) -> Result<Response>;

/// Static description of one invocable operation
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Filled in by the builder from the contributing group
    pub group: &'static str,
    pub params: Vec<ParameterSpec>,
    pub handler: Handler,
}

impl OperationDescriptor {
    pub fn new(
        name: &'static str,
        title: &'static str,
        description: &'static str,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            title,
            description,
            group: "",
            params: Vec::new(),
            handler,
        }
    }

    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub fn input_schema(&self) -> Map<String, Value> {
        schema::input_schema(&self.params)
    }

    pub fn info(&self) -> OperationInfo {
        OperationInfo {
            name: self.name,
            title: self.title,
            description: self.description,
            group: self.group,
            input_schema: Value::Object(self.input_schema()),
        }
    }
}

/// Introspection record returned by [`Registry::list`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub group: &'static str,
    pub input_schema: Value,
}

/// Groups and operations excluded at build time
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub disabled_groups: HashSet<String>,
    pub disabled_operations: HashSet<String>,
}

impl CatalogFilter {
    fn excludes(&self, group: &str, name: &str) -> bool {
        self.disabled_groups.contains(group) || self.disabled_operations.contains(name)
    }
}

/// Assembles a [`Registry`] from domain groups
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    operations: Vec<OperationDescriptor>,
    index: HashMap<&'static str, usize>,
    seen: HashSet<&'static str>,
    filter: CatalogFilter,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: CatalogFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Add one operation. Duplicate names are rejected.
    pub fn register(mut self, op: OperationDescriptor) -> Result<Self> {
        if !self.seen.insert(op.name) {
            return Err(CalcError::DuplicateOperation(op.name.to_string()));
        }
        if self.filter.excludes(op.group, op.name) {
            debug!(operation = op.name, group = op.group, "Operation disabled");
            return Ok(self);
        }
        self.index.insert(op.name, self.operations.len());
        self.operations.push(op);
        Ok(self)
    }

    /// Add every operation of a domain group, tagging each with the group name
    pub fn group(
        mut self,
        group: &'static str,
        operations: Vec<OperationDescriptor>,
    ) -> Result<Self> {
        for mut op in operations {
            op.group = group;
            self = self.register(op)?;
        }
        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            operations: self.operations,
            index: self.index,
        }
    }
}

/// Immutable table of all operations, safe for concurrent reads
#[derive(Debug)]
pub struct Registry {
    operations: Vec<OperationDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Every built-in group, nothing disabled
    pub fn standard() -> Result<Self> {
        Self::filtered(CatalogFilter::default())
    }

    /// Every built-in group minus what the filter excludes
    pub fn filtered(filter: CatalogFilter) -> Result<Self> {
        let mut builder = Self::builder().with_filter(filter);
        for (group, operations) in crate::ops::all_groups() {
            builder = builder.group(group, operations)?;
        }
        Ok(builder.build())
    }

    pub fn lookup(&self, name: &str) -> Result<&OperationDescriptor> {
        self.index
            .get(name)
            .map(|&i| &self.operations[i])
            .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))
    }

    /// Catalog in registration order
    pub fn list(&self) -> Vec<OperationInfo> {
        self.operations.iter().map(|op| op.info()).collect()
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Validate arguments and run the named handler.
    ///
    /// Unknown names and validation failures come back as `Err`; domain
    /// errors raised by the handler come back as an error [`Response`].
    pub fn invoke(&self, name: &str, raw: &Map<String, Value>) -> Result<Response> {
        let op = self.lookup(name)?;
        let args = validate(&op.params, raw)?;

        let response = match (op.handler)(&args) {
            Ok(response) => response,
            Err(CalcError::Domain(e)) => Response::from(e),
            Err(e) => return Err(e),
        };

        debug!(
            operation = name,
            is_error = response.is_error(),
            "Operation invoked"
        );
        Ok(response)
    }
}
