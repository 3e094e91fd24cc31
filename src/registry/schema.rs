// src/registry/schema.rs
// Declarative parameter specs and their JSON-Schema rendering

use serde_json::{Map, Value, json};

/// Shape of a single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    Number,
    Integer,
    Boolean,
    /// A string restricted to a closed set of names
    Enum(&'static [&'static str]),
    Array(Box<ParamKind>),
}

impl ParamKind {
    pub fn array_of(element: ParamKind) -> Self {
        ParamKind::Array(Box::new(element))
    }

    /// Human-readable name used in validation messages
    pub fn label(&self) -> String {
        match self {
            ParamKind::Number => "number".to_string(),
            ParamKind::Integer => "integer".to_string(),
            ParamKind::Boolean => "boolean".to_string(),
            ParamKind::Enum(allowed) => format!("one of [{}]", allowed.join(", ")),
            ParamKind::Array(inner) => format!("array of {}", inner.label()),
        }
    }

    fn json_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        match self {
            ParamKind::Number => {
                schema.insert("type".into(), json!("number"));
            }
            ParamKind::Integer => {
                schema.insert("type".into(), json!("integer"));
            }
            ParamKind::Boolean => {
                schema.insert("type".into(), json!("boolean"));
            }
            ParamKind::Enum(allowed) => {
                schema.insert("type".into(), json!("string"));
                schema.insert("enum".into(), json!(allowed));
            }
            ParamKind::Array(inner) => {
                schema.insert("type".into(), json!("array"));
                schema.insert("items".into(), Value::Object(inner.json_schema()));
            }
        }
        schema
    }
}

/// Optional numeric and size constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Strictly greater than zero
    pub positive: bool,
    /// Minimum array length
    pub min_items: Option<usize>,
}

/// One named parameter of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub constraints: Constraints,
    pub default: Option<Value>,
}

impl ParameterSpec {
    pub fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            constraints: Constraints::default(),
            default: None,
        }
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Number, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Integer, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Boolean, description)
    }

    pub fn choice(
        name: &'static str,
        allowed: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self::new(name, ParamKind::Enum(allowed), description)
    }

    pub fn numbers(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::array_of(ParamKind::Number), description)
    }

    pub fn integers(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::array_of(ParamKind::Integer), description)
    }

    pub fn matrix(name: &'static str, description: &'static str) -> Self {
        Self::new(
            name,
            ParamKind::array_of(ParamKind::array_of(ParamKind::Number)),
            description,
        )
    }

    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    pub fn positive(mut self) -> Self {
        self.constraints.positive = true;
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.constraints.min_items = Some(n);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// A parameter the caller must supply
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub fn json_schema(&self) -> Value {
        let mut schema = self.kind.json_schema();
        schema.insert("description".into(), json!(self.description));
        if let Some(min) = self.constraints.min {
            schema.insert("minimum".into(), json!(min));
        }
        if let Some(max) = self.constraints.max {
            schema.insert("maximum".into(), json!(max));
        }
        if self.constraints.positive {
            schema.insert("exclusiveMinimum".into(), json!(0));
        }
        if let Some(n) = self.constraints.min_items {
            schema.insert("minItems".into(), json!(n));
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        Value::Object(schema)
    }
}

/// Render an ordered parameter list as a JSON-Schema object
pub fn input_schema(params: &[ParameterSpec]) -> Map<String, Value> {
    let properties: Map<String, Value> = params
        .iter()
        .map(|p| (p.name.to_string(), p.json_schema()))
        .collect();
    let required: Vec<&str> = params
        .iter()
        .filter(|p| p.is_required())
        .map(|p| p.name)
        .collect();

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    schema
}
