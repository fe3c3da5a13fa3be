use crate::diagnostics::Diagnostic;
use crate::registry::PluginRegistry;
use crate::widget::WidgetDefinition;
use std::collections::{BTreeMap, BTreeSet};

/// Entity id to the set of refresh actions fired when that entity changes.
/// Actions are deduplicated by value; insertion order is irrelevant.
pub type TriggerMap = BTreeMap<String, BTreeSet<String>>;

/// The refresh action emitted for one widget.
pub fn refresh_action(widget_id: &str) -> String {
    format!("- lvgl.widget.refresh: {widget_id}")
}

/// Single aggregator owned by the trigger collector. Hooks feed it
/// `(entity, action)` pairs; deduplication happens centrally, never in
/// per-plugin private maps.
#[derive(Debug, Default)]
pub struct TriggerSink {
    exporting_to_target: bool,
    map: TriggerMap,
}

impl TriggerSink {
    pub fn new(exporting_to_target: bool) -> Self {
        Self { exporting_to_target, map: TriggerMap::new() }
    }

    /// Whether this export run targets the LVGL runtime. Hooks only register
    /// refresh actions when it does.
    pub fn exporting_to_target(&self) -> bool {
        self.exporting_to_target
    }

    pub fn register(&mut self, entity_id: &str, action: String) {
        self.map.entry(entity_id.to_string()).or_default().insert(action);
    }

    pub fn into_map(self) -> TriggerMap {
        self.map
    }
}

/// Optional plugin capability: register refresh triggers for entity-bound
/// instances. The hook body is the same shape for every entity-bindable
/// plugin, so the canonical behavior is the provided method; plugins with
/// special entity handling override it.
pub trait NumericSensorSource {
    fn register_refresh_triggers(&self, widget: &WidgetDefinition, sink: &mut TriggerSink) {
        let Some(entity) = widget.trimmed_entity() else {
            return;
        };
        if sink.exporting_to_target() {
            let action = refresh_action(&widget.id);
            sink.register(entity, action);
        }
    }
}

#[derive(Debug, Default)]
pub struct TriggerOutcome {
    pub triggers: TriggerMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Second pass over the widget tree: aggregates every plugin's trigger
/// registrations into one deduplicated map.
pub struct TriggerCollector<'a> {
    registry: &'a PluginRegistry,
}

impl<'a> TriggerCollector<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self { registry }
    }

    pub fn collect(
        &self,
        widgets: &[WidgetDefinition],
        exporting_to_target: bool,
    ) -> TriggerOutcome {
        let mut sink = TriggerSink::new(exporting_to_target);
        let mut diagnostics = Vec::new();
        for widget in widgets {
            let plugin = match self.registry.get(&widget.widget_type) {
                Ok(plugin) => plugin,
                Err(_) => {
                    tracing::warn!(
                        widget = %widget.id,
                        widget_type = %widget.widget_type,
                        "skipping widget with unknown type during trigger collection"
                    );
                    diagnostics
                        .push(Diagnostic::unknown_widget_type(&widget.id, &widget.widget_type));
                    continue;
                }
            };
            if let Some(source) = plugin.numeric_sensor_source() {
                source.register_refresh_triggers(widget, &mut sink);
            }
        }
        TriggerOutcome { triggers: sink.into_map(), diagnostics }
    }
}
