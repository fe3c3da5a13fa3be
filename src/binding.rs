use crate::widget::WidgetDefinition;
use serde_json::Value;

/// Replace every character outside `[A-Za-z0-9_]` with `_`. Replacements are
/// one-to-one; consecutive replaced characters are never collapsed.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Numeric transform applied to an entity-bound value. Kept structured so
/// generation logic stays testable; rendered to lambda text only at the
/// serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueTransform {
    /// Use the live value as-is.
    Identity,
    /// Divide the live value by the given divisor, producing a float.
    Scale(f64),
    /// Cast the live value to the given numeric type.
    Cast(CastKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    Int,
}

impl ValueTransform {
    /// Render the generated expression reading the sanitized identifier.
    pub fn lambda(self, identifier: &str) -> String {
        match self {
            ValueTransform::Identity => {
                format!("!lambda \"return id({identifier}).state;\"")
            }
            ValueTransform::Scale(divisor) => {
                format!("!lambda \"return id({identifier}).state / {divisor:?};\"")
            }
            ValueTransform::Cast(CastKind::Int) => {
                format!("!lambda \"return (int)id({identifier}).state;\"")
            }
        }
    }
}

/// Shared binding builder used by every entity-bindable plugin: a widget
/// without an entity binding exports the literal value, a bound widget
/// exports the generated expression instead.
pub fn bound_numeric(
    widget: &WidgetDefinition,
    literal: Value,
    transform: ValueTransform,
) -> Value {
    match widget.trimmed_entity() {
        Some(entity) => Value::String(transform.lambda(&sanitize_identifier(entity))),
        None => literal,
    }
}
