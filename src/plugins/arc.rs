use crate::binding::{bound_numeric, ValueTransform};
use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::{Rgb, Surface};
use crate::triggers::NumericSensorSource;
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Gauge-style arc spanning 270 degrees, with an optional centered title.
pub struct ArcPlugin;

const ARC_START_DEG: f32 = -135.0;
const ARC_SPAN_DEG: f32 = 270.0;

fn polar(cx: f32, cy: f32, radius: f32, deg: f32) -> (f32, f32) {
    let rad = (deg - 90.0).to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

fn draw_arc(
    surface: &mut dyn Surface,
    cx: f32,
    cy: f32,
    radius: f32,
    from_deg: f32,
    to_deg: f32,
    stroke: f32,
    color: Rgb,
) {
    // Polyline approximation, 6 degrees per segment.
    let steps = (((to_deg - from_deg) / 6.0).ceil() as usize).max(1);
    let step = (to_deg - from_deg) / steps as f32;
    let mut prev = polar(cx, cy, radius, from_deg);
    for i in 1..=steps {
        let next = polar(cx, cy, radius, from_deg + step * i as f32);
        surface.line(prev.0, prev.1, next.0, next.1, stroke, color);
        prev = next;
    }
}

impl WidgetPlugin for ArcPlugin {
    fn id(&self) -> &'static str {
        "lvgl_arc"
    }

    fn name(&self) -> &'static str {
        "Arc"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "value": 50,
            "min": 0,
            "max": 100,
            "thickness": 10,
            "color": "blue",
            "title": "",
            "start_angle": 135,
            "end_angle": 45,
            "mode": "normal"
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let color = ctx.color_style(widget.prop_str("color", "black"));
        let thickness = widget.prop_f64("thickness", 10.0) as f32;
        let (cx, cy) = (w / 2.0, h / 2.0);
        let radius = w.min(h) / 2.0 - thickness / 2.0;

        let min = widget.prop_f64("min", 0.0);
        let max = widget.prop_f64("max", 100.0);
        let value = widget.prop_f64("value", 50.0).clamp(min, max);
        let pct = if max > min { ((value - min) / (max - min)) as f32 } else { 0.0 };

        surface.clear();
        draw_arc(
            surface,
            cx,
            cy,
            radius,
            ARC_START_DEG,
            ARC_START_DEG + ARC_SPAN_DEG,
            thickness,
            Rgb::new(238, 238, 238),
        );
        if pct > 0.01 {
            draw_arc(
                surface,
                cx,
                cy,
                radius,
                ARC_START_DEG,
                ARC_START_DEG + pct * ARC_SPAN_DEG,
                thickness,
                color,
            );
        }
        let title = widget.prop_str("title", "");
        if !title.is_empty() {
            surface.text(cx - title.len() as f32 * 3.5, cy - 7.0, title, 14.0, color);
        }
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let color = widget.prop_str("color", "blue");
        let title = widget.prop_str("title", "");
        let mut fragment = ExportFragment::with_attrs(
            "arc",
            json!({
                "min_value": widget.prop_f64("min", 0.0),
                "max_value": widget.prop_f64("max", 100.0),
                "arc_width": widget.prop_f64("thickness", 10.0),
                "arc_color": ctx.convert_color(color),
                "indicator": { "arc_color": ctx.convert_color(color) },
                "start_angle": widget.prop_f64("start_angle", 135.0),
                "end_angle": widget.prop_f64("end_angle", 45.0),
                "mode": widget.prop_str("mode", "normal"),
                "widgets": [{
                    "label": {
                        "align": "center",
                        "text": format!("\"{title}\""),
                        "text_color": ctx.convert_color(color),
                    }
                }]
            }),
        );
        fragment.set(
            "value",
            bound_numeric(widget, json!(widget.prop_f64("value", 0.0)), ValueTransform::Identity),
        );
        fragment
    }

    fn numeric_sensor_source(&self) -> Option<&dyn NumericSensorSource> {
        Some(self)
    }
}

impl NumericSensorSource for ArcPlugin {}
