use crate::binding::sanitize_identifier;
use crate::export::{lvgl_font, ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::Surface;
use crate::triggers::{refresh_action, NumericSensorSource, TriggerSink};
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Text label. Binding to an entity replaces the literal text with a lambda
/// formatting the live state; text-valued entities use the state string
/// directly, numeric ones are formatted to one decimal.
pub struct LabelPlugin;

fn is_text_entity(entity: &str) -> bool {
    entity.starts_with("text_sensor.") || entity.starts_with("weather.")
}

fn label_text(widget: &WidgetDefinition) -> String {
    match widget.trimmed_entity() {
        Some(entity) if is_text_entity(entity) => {
            format!(
                "!lambda \"return id({}).state.c_str();\"",
                sanitize_identifier(entity)
            )
        }
        Some(entity) => {
            format!(
                "!lambda \"return str_sprintf(\\\"%.1f\\\", id({}).state).c_str();\"",
                sanitize_identifier(entity)
            )
        }
        None => format!("\"{}\"", widget.prop_str("text", "Label")),
    }
}

fn horizontal_align(text_align: &str) -> &'static str {
    if text_align.contains("LEFT") {
        "LEFT"
    } else if text_align.contains("RIGHT") {
        "RIGHT"
    } else {
        "CENTER"
    }
}

impl WidgetPlugin for LabelPlugin {
    fn id(&self) -> &'static str {
        "lvgl_label"
    }

    fn name(&self) -> &'static str {
        "Label"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "text": "Label",
            "font_size": 20,
            "font_family": "Roboto",
            "color": "black",
            "font_weight": 400,
            "italic": false,
            "text_align": "CENTER",
            "bg_color": "transparent",
            "opa": 255,
            "border_width": 0,
            "border_color": "black",
            "border_radius": 0,
            "entity_id": ""
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let color = ctx.color_style(widget.prop_str("color", "black"));
        let font_size = widget.prop_f64("font_size", 20.0) as f32;

        // Bound labels show a `{suffix}` placeholder; the preview has no
        // live entity states.
        let text = match widget.trimmed_entity() {
            Some(entity) => {
                let suffix = entity.rsplit('.').next().unwrap_or(entity);
                format!("{{{suffix}}}")
            }
            None => widget.prop_str("text", "Label").to_string(),
        };

        surface.clear();
        let bg = widget.prop_str("bg_color", "transparent");
        if bg != "transparent" {
            surface.fill_rect(0.0, 0.0, w, h, ctx.color_style(bg));
        }

        let align = widget.prop_str("text_align", "CENTER");
        let text_w = text.len() as f32 * font_size * 0.5;
        let x = match horizontal_align(align) {
            "LEFT" => 0.0,
            "RIGHT" => (w - text_w).max(0.0),
            _ => ((w - text_w) / 2.0).max(0.0),
        };
        surface.text(x, (h - font_size) / 2.0, &text, font_size, color);

        let border_width = widget.prop_f64("border_width", 0.0) as f32;
        if border_width > 0.0 {
            let border = ctx.color_style(widget.prop_str("border_color", "black"));
            surface.stroke_rect(0.0, 0.0, w, h, border_width, border);
        }
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let border_width = widget.prop_f64("border_width", 0.0) as i64;
        let bg_color = widget.prop_str("bg_color", "transparent");
        let mut fragment = ExportFragment::with_attrs(
            "label",
            json!({
                "text": label_text(widget),
                "text_font": lvgl_font(
                    widget.prop_str("font_family", "Roboto"),
                    widget.prop_i64("font_weight").unwrap_or(400),
                    widget.prop_i64("font_size").unwrap_or(20),
                    widget.prop_bool("italic", false),
                ),
                "text_color": ctx.convert_color(widget.prop_str("color", "black")),
                "text_align": horizontal_align(widget.prop_str("text_align", "CENTER")),
                "opa": ctx.format_opacity(widget.prop_i64("opa")),
                "border_width": border_width,
                "border_color": ctx.convert_color(widget.prop_str("border_color", "black")),
                "border_side": if border_width > 0 { "full" } else { "none" },
                "radius": widget.prop_i64("border_radius").unwrap_or(0),
            }),
        );
        if bg_color != "transparent" {
            fragment.set("bg_color", ctx.convert_color(bg_color));
        }
        fragment
    }

    fn numeric_sensor_source(&self) -> Option<&dyn NumericSensorSource> {
        Some(self)
    }
}

impl NumericSensorSource for LabelPlugin {
    fn register_refresh_triggers(&self, widget: &WidgetDefinition, sink: &mut TriggerSink) {
        let Some(entity) = widget.trimmed_entity() else {
            return;
        };
        // Text-valued entities keep their domain as-is; bare ids are
        // shorthand for the sensor domain.
        let entity = if entity.contains('.') {
            entity.to_string()
        } else {
            format!("sensor.{entity}")
        };
        if sink.exporting_to_target() {
            let action = refresh_action(&widget.id);
            sink.register(&entity, action);
        }
    }
}
