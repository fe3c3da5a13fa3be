use crate::export::{ExportContext, ExportFragment};
use crate::render::RenderContext;
use crate::surface::Surface;
use crate::triggers::NumericSensorSource;
use crate::widget::WidgetDefinition;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("widget plugin '{0}' is already registered")]
    DuplicatePluginId(String),
    #[error("unknown widget type '{0}'")]
    UnknownWidgetType(String),
}

/// Contract implemented by every widget type.
///
/// `render` must fully clear any prior surface content it owns before drawing
/// and must never mutate the widget; `export_lvgl` returns one configuration
/// fragment. Trigger registration is an optional capability queried through
/// [`WidgetPlugin::numeric_sensor_source`].
pub trait WidgetPlugin: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn category(&self) -> &'static str;

    /// Default props merged into every new instance. Returned by value so the
    /// defaults are never shared by reference across widget instances.
    fn defaults(&self) -> Map<String, Value>;

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext);

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment;

    /// Plugins whose instances can register live-data refresh triggers expose
    /// the hook here; everyone else reports no capability.
    fn numeric_sensor_source(&self) -> Option<&dyn NumericSensorSource> {
        None
    }
}

/// Convert a `json!({...})` literal into a props map.
pub(crate) fn props_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

const DEFAULT_POSITION: i64 = 40;
const DEFAULT_WIDTH: i64 = 120;
const DEFAULT_HEIGHT: i64 = 40;

/// Single source of truth for available widget types, keyed by plugin id.
#[derive(Default, Clone)]
pub struct PluginRegistry {
    map: HashMap<String, Arc<dyn WidgetPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Arc<dyn WidgetPlugin>) -> Result<(), RegistryError> {
        let id = plugin.id();
        if self.map.contains_key(id) {
            return Err(RegistryError::DuplicatePluginId(id.to_string()));
        }
        tracing::debug!("registered widget plugin '{id}'");
        self.map.insert(id.to_string(), plugin);
        Ok(())
    }

    pub fn get(&self, widget_type: &str) -> Result<&dyn WidgetPlugin, RegistryError> {
        self.map
            .get(widget_type)
            .map(Arc::as_ref)
            .ok_or_else(|| RegistryError::UnknownWidgetType(widget_type.to_string()))
    }

    pub fn contains(&self, widget_type: &str) -> bool {
        self.map.contains_key(widget_type)
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.map.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Build a new widget of the given type: plugin defaults shallow-merged
    /// with `overrides`, overrides winning on conflict. A `width`/`height`
    /// entry in the defaults sets the initial widget size instead of landing
    /// in props.
    pub fn create_instance(
        &self,
        widget_type: &str,
        overrides: Map<String, Value>,
    ) -> Result<WidgetDefinition, RegistryError> {
        let plugin = self.get(widget_type)?;
        let mut props = plugin.defaults();
        let width = props
            .remove("width")
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_WIDTH);
        let height = props
            .remove("height")
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_HEIGHT);
        for (key, value) in overrides {
            props.insert(key, value);
        }
        let seq = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Ok(WidgetDefinition {
            id: format!("{widget_type}_{seq}"),
            widget_type: widget_type.to_string(),
            x: DEFAULT_POSITION,
            y: DEFAULT_POSITION,
            width,
            height,
            props,
            entity_id: None,
            rotation: None,
            hidden: false,
            locked: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StubPlugin {
        id: &'static str,
    }

    impl WidgetPlugin for StubPlugin {
        fn id(&self) -> &'static str {
            self.id
        }

        fn name(&self) -> &'static str {
            "Stub"
        }

        fn category(&self) -> &'static str {
            "Test"
        }

        fn defaults(&self) -> Map<String, Value> {
            props_object(json!({ "color": "red", "value": 10, "width": 60 }))
        }

        fn render(
            &self,
            surface: &mut dyn Surface,
            _widget: &WidgetDefinition,
            _ctx: &RenderContext,
        ) {
            surface.clear();
        }

        fn export_lvgl(&self, _widget: &WidgetDefinition, _ctx: &ExportContext) -> ExportFragment {
            ExportFragment::new("obj")
        }
    }

    fn registry_with_stub() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(StubPlugin { id: "stub" })).unwrap();
        registry
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = registry_with_stub();
        let err = registry.register(Arc::new(StubPlugin { id: "stub" })).unwrap_err();
        assert_eq!(err, RegistryError::DuplicatePluginId("stub".into()));
    }

    #[test]
    fn unknown_type_lookup_fails() {
        let registry = registry_with_stub();
        assert_eq!(
            registry.get("missing").err(),
            Some(RegistryError::UnknownWidgetType("missing".into()))
        );
    }

    #[test]
    fn create_instance_merges_defaults_and_overrides() {
        let registry = registry_with_stub();
        let overrides = props_object(json!({ "value": 99 }));
        let widget = registry.create_instance("stub", overrides).unwrap();
        assert_eq!(widget.props["color"], json!("red"));
        assert_eq!(widget.props["value"], json!(99));
        // width default is lifted into the widget geometry, not props
        assert_eq!(widget.width, 60);
        assert_eq!(widget.height, 40);
        assert!(!widget.props.contains_key("width"));
    }

    #[test]
    fn instances_never_share_the_defaults_object() {
        let registry = registry_with_stub();
        let mut first = registry.create_instance("stub", Map::new()).unwrap();
        first.props.insert("color".into(), json!("mutated"));
        let second = registry.create_instance("stub", Map::new()).unwrap();
        assert_eq!(second.props["color"], json!("red"));
        assert_ne!(first.id, second.id);
    }
}
