use crate::device::{self, DeviceModel};
use crate::diagnostics::Diagnostic;
use crate::registry::PluginRegistry;
use crate::widget::WidgetDefinition;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// One lowered configuration fragment: a single element kind mapped to its
/// attributes. Serializes as `{ kind: attrs }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFragment {
    pub kind: String,
    pub attrs: Map<String, Value>,
}

impl ExportFragment {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), attrs: Map::new() }
    }

    /// Build a fragment from a `json!({...})` attribute literal.
    pub fn with_attrs(kind: impl Into<String>, attrs: Value) -> Self {
        Self {
            kind: kind.into(),
            attrs: match attrs {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.attrs.insert(key.to_string(), value);
    }

    pub fn to_value(&self) -> Value {
        let mut outer = Map::new();
        outer.insert(self.kind.clone(), Value::Object(self.attrs.clone()));
        Value::Object(outer)
    }
}

impl Serialize for ExportFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.kind, &self.attrs)?;
        map.end()
    }
}

/// Generic mutable attribute bag for plugins that assemble their fragment
/// incrementally instead of constructing it literally. Starts out as a plain
/// `obj` carrying the shared common attributes.
#[derive(Debug, Clone)]
pub struct ObjectDescriptor {
    pub kind: String,
    pub attrs: Map<String, Value>,
}

impl ObjectDescriptor {
    pub fn set(&mut self, key: &str, value: Value) {
        self.attrs.insert(key.to_string(), value);
    }

    /// Normalize to the common fragment shape so the engine's merge step is
    /// uniform regardless of construction style.
    pub fn into_fragment(self) -> ExportFragment {
        ExportFragment { kind: self.kind, attrs: self.attrs }
    }
}

/// Per-widget export context handed to each plugin: the precomputed common
/// attributes plus the device-constrained color and opacity converters.
pub struct ExportContext {
    pub common: Map<String, Value>,
    device: DeviceModel,
}

impl ExportContext {
    pub fn new(widget: &WidgetDefinition, device: DeviceModel) -> Self {
        let mut common = Map::new();
        common.insert("id".into(), Value::String(widget.id.clone()));
        common.insert("x".into(), Value::from(widget.x));
        common.insert("y".into(), Value::from(widget.y));
        common.insert("width".into(), Value::from(widget.width));
        common.insert("height".into(), Value::from(widget.height));
        if widget.prop_bool("hidden", false) {
            common.insert("hidden".into(), Value::Bool(true));
        }
        Self { common, device }
    }

    pub fn device(&self) -> DeviceModel {
        self.device
    }

    pub fn convert_color(&self, name: &str) -> Value {
        Value::String(device::convert_color(name))
    }

    pub fn format_opacity(&self, opa: Option<i64>) -> Value {
        Value::String(device::format_opacity(opa))
    }

    pub fn object_descriptor(&self) -> ObjectDescriptor {
        ObjectDescriptor { kind: "obj".into(), attrs: self.common.clone() }
    }
}

/// Lower a font spec to the generated font resource id.
pub fn lvgl_font(family: &str, weight: i64, size: i64, italic: bool) -> String {
    let family = if family.is_empty() { "Roboto" } else { family };
    let f = family.to_ascii_lowercase().replace(char::is_whitespace, "_");
    let i = if italic { "_italic" } else { "" };
    format!("font_{f}_{weight}_{size}{i}")
}

#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub fragments: Vec<ExportFragment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lowers a widget list into ordered configuration fragments.
pub struct ExportEngine<'a> {
    registry: &'a PluginRegistry,
    device: DeviceModel,
}

impl<'a> ExportEngine<'a> {
    pub fn new(registry: &'a PluginRegistry, device: DeviceModel) -> Self {
        Self { registry, device }
    }

    /// Iterate widgets in document order, producing one fragment per widget.
    /// Common attributes are merged into each plugin fragment with plugin
    /// attributes winning on conflict. Unknown widget types are skipped with
    /// a diagnostic; a single malformed widget never aborts the document.
    pub fn export_all(&self, widgets: &[WidgetDefinition]) -> ExportOutcome {
        let mut outcome = ExportOutcome::default();
        for widget in widgets {
            if widget.hidden {
                continue;
            }
            let plugin = match self.registry.get(&widget.widget_type) {
                Ok(plugin) => plugin,
                Err(_) => {
                    tracing::warn!(
                        widget = %widget.id,
                        widget_type = %widget.widget_type,
                        "skipping widget with unknown type during export"
                    );
                    outcome
                        .diagnostics
                        .push(Diagnostic::unknown_widget_type(&widget.id, &widget.widget_type));
                    continue;
                }
            };
            let ctx = ExportContext::new(widget, self.device);
            let mut fragment = plugin.export_lvgl(widget, &ctx);
            for (key, value) in &ctx.common {
                if !fragment.attrs.contains_key(key) {
                    fragment.attrs.insert(key.clone(), value.clone());
                }
            }
            prune_empty(&mut fragment.attrs);
            outcome.fragments.push(fragment);
        }
        outcome
    }
}

/// Drop attributes the target serializer would have to skip anyway: nulls and
/// empty strings, recursively.
fn prune_empty(attrs: &mut Map<String, Value>) {
    attrs.retain(|_, value| {
        match value {
            Value::Null => return false,
            Value::String(s) if s.is_empty() => return false,
            Value::Object(inner) => {
                prune_empty(inner);
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::Object(inner) = item {
                        prune_empty(inner);
                    }
                }
            }
            _ => {}
        }
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget(id: &str, widget_type: &str) -> WidgetDefinition {
        WidgetDefinition {
            id: id.into(),
            widget_type: widget_type.into(),
            x: 5,
            y: 6,
            width: 70,
            height: 30,
            props: Map::new(),
            entity_id: None,
            rotation: None,
            hidden: false,
            locked: false,
        }
    }

    #[test]
    fn fragment_serializes_as_single_key_map() {
        let fragment = ExportFragment::with_attrs("led", json!({ "brightness": 0.5 }));
        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({ "led": { "brightness": 0.5 } })
        );
    }

    #[test]
    fn context_precomputes_common_attributes() {
        let w = widget("w7", "lvgl_led");
        let ctx = ExportContext::new(&w, DeviceModel::MultiColor);
        assert_eq!(ctx.common["id"], json!("w7"));
        assert_eq!(ctx.common["x"], json!(5));
        assert_eq!(ctx.common["width"], json!(70));
        assert!(!ctx.common.contains_key("hidden"));
    }

    #[test]
    fn object_descriptor_carries_common_and_normalizes() {
        let w = widget("w8", "lvgl_textarea");
        let ctx = ExportContext::new(&w, DeviceModel::Monochrome);
        let mut descriptor = ctx.object_descriptor();
        descriptor.kind = "textarea".into();
        descriptor.set("text", json!("hello"));
        let fragment = descriptor.into_fragment();
        assert_eq!(fragment.kind, "textarea");
        assert_eq!(fragment.attrs["id"], json!("w8"));
        assert_eq!(fragment.attrs["text"], json!("hello"));
    }

    #[test]
    fn prune_drops_nulls_and_empty_strings_recursively() {
        let mut attrs = match json!({
            "keep": 1,
            "gone": null,
            "blank": "",
            "nested": { "also_gone": null, "kept": "x" },
            "list": [{ "empty": "" }, 3]
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        prune_empty(&mut attrs);
        assert_eq!(
            Value::Object(attrs),
            json!({
                "keep": 1,
                "nested": { "kept": "x" },
                "list": [{}, 3]
            })
        );
    }

    #[test]
    fn font_id_lowering() {
        assert_eq!(lvgl_font("Roboto", 400, 20, false), "font_roboto_400_20");
        assert_eq!(lvgl_font("Open Sans", 700, 16, true), "font_open_sans_700_16_italic");
        assert_eq!(lvgl_font("", 400, 20, false), "font_roboto_400_20");
    }
}
