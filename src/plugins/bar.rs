use crate::binding::{bound_numeric, ValueTransform};
use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::Surface;
use crate::triggers::NumericSensorSource;
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Horizontal progress bar.
pub struct BarPlugin;

fn fill_fraction(widget: &WidgetDefinition, fallback: f64) -> f64 {
    let min = widget.prop_f64("min", 0.0);
    let max = widget.prop_f64("max", 100.0);
    let value = widget.prop_f64("value", fallback);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    ((value - min) / range).clamp(0.0, 1.0)
}

impl WidgetPlugin for BarPlugin {
    fn id(&self) -> &'static str {
        "lvgl_bar"
    }

    fn name(&self) -> &'static str {
        "Bar"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "value": 50,
            "min": 0,
            "max": 100,
            "color": "blue",
            "bg_color": "gray",
            "start_value": 0,
            "mode": "normal"
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let fg = ctx.color_style(widget.prop_str("color", "black"));
        let bg = ctx.color_style(widget.prop_str("bg_color", "gray"));
        let pct = fill_fraction(widget, 50.0) as f32;

        surface.clear();
        surface.fill_rect(0.0, 0.0, w, h, bg);
        surface.fill_rect(0.0, 0.0, w * pct, h, fg);
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let mode = widget.prop_str("mode", "normal").to_string();
        let mut fragment = ExportFragment::with_attrs(
            "bar",
            json!({
                "min_value": widget.prop_f64("min", 0.0),
                "max_value": widget.prop_f64("max", 100.0),
                "bg_color": ctx.convert_color(widget.prop_str("bg_color", "gray")),
                "indicator": { "bg_color": ctx.convert_color(widget.prop_str("color", "blue")) },
                "mode": mode,
            }),
        );
        fragment.set(
            "value",
            bound_numeric(widget, json!(widget.prop_f64("value", 0.0)), ValueTransform::Identity),
        );
        if widget.prop_str("mode", "normal") == "range" {
            fragment.set("start_value", json!(widget.prop_f64("start_value", 0.0)));
        }
        fragment
    }

    fn numeric_sensor_source(&self) -> Option<&dyn NumericSensorSource> {
        Some(self)
    }
}

impl NumericSensorSource for BarPlugin {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceModel;

    fn bar_widget(props: Value, entity: Option<&str>) -> WidgetDefinition {
        WidgetDefinition {
            id: "bar_1".into(),
            widget_type: "lvgl_bar".into(),
            x: 0,
            y: 0,
            width: 120,
            height: 20,
            props: props_object(props),
            entity_id: entity.map(str::to_string),
            rotation: None,
            hidden: false,
            locked: false,
        }
    }

    #[test]
    fn literal_value_and_nested_indicator_color() {
        let widget = bar_widget(json!({ "value": 75, "color": "blue" }), None);
        let ctx = ExportContext::new(&widget, DeviceModel::MultiColor);
        let fragment = BarPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(fragment.attrs["value"], json!(75.0));
        assert_eq!(fragment.attrs["indicator"], json!({ "bg_color": "0x0000FF" }));
        assert!(!fragment.attrs.contains_key("start_value"));
    }

    #[test]
    fn bound_value_uses_identity_lambda() {
        let widget = bar_widget(json!({}), Some("sensor.humidity"));
        let ctx = ExportContext::new(&widget, DeviceModel::Monochrome);
        let fragment = BarPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(
            fragment.attrs["value"],
            json!("!lambda \"return id(sensor_humidity).state;\"")
        );
    }

    #[test]
    fn range_mode_exports_start_value() {
        let widget = bar_widget(json!({ "mode": "range", "start_value": 10 }), None);
        let ctx = ExportContext::new(&widget, DeviceModel::Monochrome);
        let fragment = BarPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(fragment.attrs["start_value"], json!(10.0));
        assert_eq!(fragment.attrs["mode"], json!("range"));
    }

    #[test]
    fn fill_fraction_tolerates_zero_range() {
        let widget = bar_widget(json!({ "min": 5, "max": 5, "value": 5 }), None);
        assert_eq!(fill_fraction(&widget, 50.0), 0.0);
    }
}
