use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::{Rgb, Surface};
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Checkbox with a trailing label. A bound checkbox toggles its entity when
/// clicked on the device.
pub struct CheckboxPlugin;

fn toggle_service(entity: &str) -> Value {
    json!([{
        "homeassistant.service": {
            "service": "homeassistant.toggle",
            "data": { "entity_id": entity }
        }
    }])
}

impl WidgetPlugin for CheckboxPlugin {
    fn id(&self) -> &'static str {
        "lvgl_checkbox"
    }

    fn name(&self) -> &'static str {
        "Checkbox"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "text": "Checkbox",
            "checked": false,
            "color": "blue",
            "opa": 255
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (_, h) = surface.size();
        let color = ctx.color_style(widget.prop_str("color", "black"));
        let checked = widget.prop_bool("checked", false);
        let box_size = h.min(24.0);
        let box_y = (h - box_size) / 2.0;

        surface.clear();
        if checked {
            surface.fill_rect(0.0, box_y, box_size, box_size, color);
            // Tick mark
            surface.line(
                box_size * 0.2,
                box_y + box_size * 0.55,
                box_size * 0.45,
                box_y + box_size * 0.8,
                2.0,
                Rgb::WHITE,
            );
            surface.line(
                box_size * 0.45,
                box_y + box_size * 0.8,
                box_size * 0.8,
                box_y + box_size * 0.25,
                2.0,
                Rgb::WHITE,
            );
        } else {
            surface.stroke_rect(0.0, box_y, box_size, box_size, 2.0, color);
        }

        let text = widget.prop_str("text", "Checkbox");
        surface.text(box_size + 8.0, h / 2.0 - 7.0, text, 14.0, ctx.color_style("black"));
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let mut fragment = ExportFragment::with_attrs(
            "checkbox",
            json!({
                "text": format!("\"{}\"", widget.prop_str("text", "Checkbox")),
                "state": { "checked": widget.prop_bool("checked", false) },
                "indicator": { "bg_color": ctx.convert_color(widget.prop_str("color", "blue")) },
                "opa": ctx.format_opacity(widget.prop_i64("opa")),
            }),
        );
        if let Some(entity) = widget.trimmed_entity() {
            fragment.set("on_value", toggle_service(entity));
        }
        fragment
    }
}
