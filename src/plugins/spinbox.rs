use crate::binding::{bound_numeric, CastKind, ValueTransform};
use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::{Rgb, Surface};
use crate::triggers::NumericSensorSource;
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Zero-padded numeric spinbox. Bound values are cast to an integer digit
/// count on the device.
pub struct SpinboxPlugin;

impl WidgetPlugin for SpinboxPlugin {
    fn id(&self) -> &'static str {
        "lvgl_spinbox"
    }

    fn name(&self) -> &'static str {
        "Spinbox"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "value": 0,
            "digit_count": 4,
            "step": 1
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let value = widget.prop_i64("value").unwrap_or(0);
        let digits = widget.prop_i64("digit_count").unwrap_or(4).clamp(1, 12) as usize;
        let text = format!("{value:0digits$}");

        surface.clear();
        surface.fill_rect(0.0, 0.0, w, h, Rgb::WHITE);
        surface.stroke_rect(0.0, 0.0, w, h, 1.0, Rgb::new(153, 153, 153));
        let size = 20.0;
        surface.text(
            w / 2.0 - text.len() as f32 * size * 0.3,
            h / 2.0 - size / 2.0,
            &text,
            size,
            ctx.color_style("black"),
        );
        // Edit cursor under the last digit
        surface.fill_rect(w * 0.7, h - 8.0, 10.0, 2.0, Rgb::new(0, 0, 255));
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, _ctx: &ExportContext) -> ExportFragment {
        let mut fragment = ExportFragment::new("spinbox");
        fragment.set(
            "value",
            bound_numeric(
                widget,
                json!(widget.prop_i64("value").unwrap_or(0)),
                ValueTransform::Cast(CastKind::Int),
            ),
        );
        fragment.set("digits", json!(widget.prop_i64("digit_count").unwrap_or(4)));
        fragment
    }

    fn numeric_sensor_source(&self) -> Option<&dyn NumericSensorSource> {
        Some(self)
    }
}

impl NumericSensorSource for SpinboxPlugin {}
