use std::fmt;

/// Recoverable condition reported by the render, export and trigger passes.
/// A diagnostic never aborts processing of the remaining widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownWidgetType { widget_id: String, widget_type: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownWidgetType { widget_id, widget_type } => {
                write!(f, "widget '{widget_id}' has unknown type '{widget_type}'")
            }
        }
    }
}

impl Diagnostic {
    pub fn unknown_widget_type(widget_id: &str, widget_type: &str) -> Self {
        Diagnostic::UnknownWidgetType {
            widget_id: widget_id.to_string(),
            widget_type: widget_type.to_string(),
        }
    }
}
