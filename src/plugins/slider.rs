use crate::binding::{bound_numeric, ValueTransform};
use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::{Rgb, Surface};
use crate::triggers::NumericSensorSource;
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Slider with an optional entity binding. Bound sliders mirror the live
/// value and write changes back through a service call chosen by the entity
/// domain.
pub struct SliderPlugin;

/// Service invoked when a bound slider changes, per entity domain.
fn on_value_service(entity: &str) -> Value {
    let (service, value_key, value_lambda) = if entity.starts_with("light.") {
        ("light.turn_on", "brightness_pct", "!lambda 'return x;'")
    } else if entity.starts_with("fan.") {
        ("fan.set_percentage", "percentage", "!lambda 'return x;'")
    } else if entity.starts_with("cover.") {
        ("cover.set_cover_position", "position", "!lambda 'return x;'")
    } else if entity.starts_with("media_player.") {
        ("media_player.volume_set", "volume_level", "!lambda 'return x / 100.0;'")
    } else if entity.starts_with("climate.") {
        ("climate.set_temperature", "temperature", "!lambda 'return x;'")
    } else {
        ("number.set_value", "value", "!lambda 'return x;'")
    };

    let mut data = Map::new();
    data.insert("entity_id".into(), Value::String(entity.to_string()));
    data.insert(value_key.into(), Value::String(value_lambda.to_string()));
    json!([{ "homeassistant.service": { "service": service, "data": data } }])
}

impl WidgetPlugin for SliderPlugin {
    fn id(&self) -> &'static str {
        "lvgl_slider"
    }

    fn name(&self) -> &'static str {
        "Slider"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "value": 30,
            "min": 0,
            "max": 100,
            "color": "blue",
            "bg_color": "gray",
            "border_width": 2,
            "mode": "normal",
            "vertical": false
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let fg = ctx.color_style(widget.prop_str("color", "black"));
        let bg = ctx.color_style(widget.prop_str("bg_color", "gray"));
        let vertical = widget.prop_bool("vertical", false);

        let min = widget.prop_f64("min", 0.0);
        let max = widget.prop_f64("max", 100.0);
        let value = widget.prop_f64("value", 30.0);
        let range = if max - min == 0.0 { 1.0 } else { max - min };
        let pct = (((value - min) / range).clamp(0.0, 1.0)) as f32;

        surface.clear();
        if vertical {
            let track_w = w * 0.3;
            let track_x = (w - track_w) / 2.0;
            surface.fill_rect(track_x, 0.0, track_w, h, bg);
            surface.fill_rect(track_x, h * (1.0 - pct), track_w, h * pct, fg);
            let knob = w * 0.4;
            surface.fill_circle(w / 2.0, h * (1.0 - pct), knob, fg);
            surface.fill_circle(w / 2.0, h * (1.0 - pct), knob - 2.0, Rgb::WHITE);
            surface.fill_circle(w / 2.0, h * (1.0 - pct), knob - 4.0, fg);
        } else {
            let track_h = h * 0.3;
            let track_y = (h - track_h) / 2.0;
            surface.fill_rect(0.0, track_y, w, track_h, bg);
            surface.fill_rect(0.0, track_y, w * pct, track_h, fg);
            let knob = h * 0.4;
            surface.fill_circle(w * pct, h / 2.0, knob, fg);
            surface.fill_circle(w * pct, h / 2.0, knob - 2.0, Rgb::WHITE);
            surface.fill_circle(w * pct, h / 2.0, knob - 4.0, fg);
        }
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let color = widget.prop_str("color", "blue");
        let mut fragment = ExportFragment::with_attrs(
            "slider",
            json!({
                "min_value": widget.prop_f64("min", 0.0),
                "max_value": widget.prop_f64("max", 100.0),
                "border_width": widget.prop_f64("border_width", 2.0),
                "bg_color": ctx.convert_color(widget.prop_str("bg_color", "gray")),
                "indicator": { "bg_color": ctx.convert_color(color) },
                "knob": {
                    "bg_color": ctx.convert_color(color),
                    "border_width": 2,
                    "border_color": "0xFFFFFF"
                },
                "mode": widget.prop_str("mode", "normal"),
            }),
        );
        fragment.set(
            "value",
            bound_numeric(widget, json!(widget.prop_f64("value", 30.0)), ValueTransform::Identity),
        );
        if let Some(entity) = widget.trimmed_entity() {
            fragment.set("on_value", on_value_service(entity));
        }
        fragment
    }

    fn numeric_sensor_source(&self) -> Option<&dyn NumericSensorSource> {
        Some(self)
    }
}

impl NumericSensorSource for SliderPlugin {}
