use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::Surface;
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Toggle switch. Like the checkbox, a bound switch toggles its entity when
/// flipped on the device.
pub struct SwitchPlugin;

fn toggle_service(entity: &str) -> Value {
    json!([{
        "homeassistant.service": {
            "service": "homeassistant.toggle",
            "data": { "entity_id": entity }
        }
    }])
}

impl WidgetPlugin for SwitchPlugin {
    fn id(&self) -> &'static str {
        "lvgl_switch"
    }

    fn name(&self) -> &'static str {
        "Switch"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "checked": false,
            "bg_color": "gray",
            "color": "blue",
            "knob_color": "white",
            "opa": 255
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let checked = widget.prop_bool("checked", false);
        let track = if checked {
            ctx.color_style(widget.prop_str("color", "blue"))
        } else {
            ctx.color_style(widget.prop_str("bg_color", "gray"))
        };
        let knob = ctx.color_style(widget.prop_str("knob_color", "white"));
        let radius = h / 2.0;

        surface.clear();
        // Pill-shaped track from two circles and a rect
        surface.fill_circle(radius, radius, radius, track);
        surface.fill_circle(w - radius, radius, radius, track);
        surface.fill_rect(radius, 0.0, w - h, h, track);

        let knob_x = if checked { w - radius } else { radius };
        surface.fill_circle(knob_x, radius, radius - 3.0, knob);
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let mut fragment = ExportFragment::with_attrs(
            "switch",
            json!({
                "state": { "checked": widget.prop_bool("checked", false) },
                "bg_color": ctx.convert_color(widget.prop_str("bg_color", "gray")),
                "indicator": { "bg_color": ctx.convert_color(widget.prop_str("color", "blue")) },
                "knob": { "bg_color": ctx.convert_color(widget.prop_str("knob_color", "white")) },
                "opa": ctx.format_opacity(widget.prop_i64("opa")),
            }),
        );
        if let Some(entity) = widget.trimmed_entity() {
            fragment.set("on_value", toggle_service(entity));
        }
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceModel;

    fn switch_widget(props: Value, entity: Option<&str>) -> WidgetDefinition {
        WidgetDefinition {
            id: "switch_1".into(),
            widget_type: "lvgl_switch".into(),
            x: 0,
            y: 0,
            width: 60,
            height: 30,
            props: props_object(props),
            entity_id: entity.map(str::to_string),
            rotation: None,
            hidden: false,
            locked: false,
        }
    }

    #[test]
    fn exports_track_indicator_and_knob_colors() {
        let widget = switch_widget(json!({ "checked": true }), None);
        let ctx = ExportContext::new(&widget, DeviceModel::MultiColor);
        let fragment = SwitchPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(fragment.kind, "switch");
        assert_eq!(fragment.attrs["state"], json!({ "checked": true }));
        assert_eq!(fragment.attrs["bg_color"], json!("0xA0A0A0"));
        assert_eq!(fragment.attrs["indicator"], json!({ "bg_color": "0x0000FF" }));
        assert_eq!(fragment.attrs["knob"], json!({ "bg_color": "0xFFFFFF" }));
    }

    #[test]
    fn bound_switch_toggles_its_entity() {
        let widget = switch_widget(json!({}), Some("light.porch"));
        let ctx = ExportContext::new(&widget, DeviceModel::Monochrome);
        let fragment = SwitchPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(
            fragment.attrs["on_value"][0]["homeassistant.service"]["data"]["entity_id"],
            json!("light.porch")
        );
    }
}
