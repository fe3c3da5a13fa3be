use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One visual element of a composed dashboard.
///
/// Created by the editing surface with plugin defaults merged into `props`;
/// the render, export and trigger passes only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WidgetDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub locked: bool,
}

impl WidgetDefinition {
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn prop_f64(&self, key: &str, default: f64) -> f64 {
        self.props.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn prop_i64(&self, key: &str) -> Option<i64> {
        self.props.get(key).and_then(Value::as_i64)
    }

    pub fn prop_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.props
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
    }

    pub fn prop_bool(&self, key: &str, default: bool) -> bool {
        self.props.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Entity binding, if any. Checks the widget field first, then the
    /// legacy `props.entity_id` location. Blank values count as unbound.
    pub fn trimmed_entity(&self) -> Option<&str> {
        let field = self.entity_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        field.or_else(|| {
            self.props
                .get("entity_id")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
    }
}
