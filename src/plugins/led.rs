use crate::binding::{bound_numeric, ValueTransform};
use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::{Rgb, Surface};
use crate::triggers::NumericSensorSource;
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Round indicator LED. Brightness can bind to a numeric entity, in which
/// case the exported value divides the live state by 255.
pub struct LedPlugin;

impl WidgetPlugin for LedPlugin {
    fn id(&self) -> &'static str {
        "lvgl_led"
    }

    fn name(&self) -> &'static str {
        "LED"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "color": "red",
            "brightness": 255,
            "opa": 255
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let color = ctx.color_style(widget.prop_str("color", "red"));
        let brightness = widget.prop_f64("brightness", 255.0);
        // A dim LED washes out toward the white background.
        let lit = color.blend(Rgb::WHITE, 1.0 - (brightness / 255.0).clamp(0.0, 1.0) as f32);

        let radius = (w.min(h) - 4.0) / 2.0;
        let (cx, cy) = (w / 2.0, h / 2.0);
        surface.clear();
        surface.fill_circle(cx, cy, radius + 2.0, Rgb::new(51, 51, 51));
        surface.fill_circle(cx, cy, radius, lit);
        // Specular highlight, top-left quadrant
        surface.fill_circle(cx - radius * 0.4, cy - radius * 0.4, radius * 0.2, Rgb::WHITE);
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let brightness = widget.prop_f64("brightness", 255.0);
        let mut fragment = ExportFragment::new("led");
        fragment.set("color", ctx.convert_color(widget.prop_str("color", "red")));
        fragment.set(
            "brightness",
            bound_numeric(widget, json!(brightness / 255.0), ValueTransform::Scale(255.0)),
        );
        fragment.set("opa", ctx.format_opacity(widget.prop_i64("opa")));
        fragment
    }

    fn numeric_sensor_source(&self) -> Option<&dyn NumericSensorSource> {
        Some(self)
    }
}

impl NumericSensorSource for LedPlugin {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceModel;
    use serde_json::json;

    fn led_widget(brightness: i64, entity: Option<&str>) -> WidgetDefinition {
        WidgetDefinition {
            id: "led_1".into(),
            widget_type: "lvgl_led".into(),
            x: 0,
            y: 0,
            width: 50,
            height: 50,
            props: props_object(json!({ "brightness": brightness, "color": "red", "opa": 255 })),
            entity_id: entity.map(str::to_string),
            rotation: None,
            hidden: false,
            locked: false,
        }
    }

    #[test]
    fn literal_brightness_divides_by_255_unrounded() {
        let widget = led_widget(128, None);
        let ctx = ExportContext::new(&widget, DeviceModel::MultiColor);
        let fragment = LedPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(fragment.kind, "led");
        assert_eq!(fragment.attrs["brightness"], json!(128.0 / 255.0));
        assert_eq!(fragment.attrs["color"], json!("0xFF0000"));
        assert_eq!(fragment.attrs["opa"], json!("cover"));
    }

    #[test]
    fn bound_brightness_emits_scaled_lambda() {
        let widget = led_widget(128, Some("sensor.led1"));
        let ctx = ExportContext::new(&widget, DeviceModel::MultiColor);
        let fragment = LedPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(
            fragment.attrs["brightness"],
            json!("!lambda \"return id(sensor_led1).state / 255.0;\"")
        );
    }

    #[test]
    fn missing_props_fall_back_to_defaults() {
        let mut widget = led_widget(0, None);
        widget.props = Map::new();
        let ctx = ExportContext::new(&widget, DeviceModel::Monochrome);
        let fragment = LedPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(fragment.attrs["brightness"], json!(1.0));
        assert_eq!(fragment.attrs["color"], json!("0xFF0000"));
    }
}
