use crate::export::{ExportContext, ExportFragment};
use crate::registry::{props_object, WidgetPlugin};
use crate::render::RenderContext;
use crate::surface::{Rgb, Surface};
use crate::widget::WidgetDefinition;
use serde_json::{json, Map, Value};

/// Multi-line text input. Shows its placeholder while empty.
pub struct TextareaPlugin;

impl WidgetPlugin for TextareaPlugin {
    fn id(&self) -> &'static str {
        "lvgl_textarea"
    }

    fn name(&self) -> &'static str {
        "Textarea"
    }

    fn category(&self) -> &'static str {
        "LVGL"
    }

    fn defaults(&self) -> Map<String, Value> {
        props_object(json!({
            "text": "",
            "placeholder": "Enter text...",
            "max_length": 128
        }))
    }

    fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition, ctx: &RenderContext) {
        let (w, h) = surface.size();
        let text = widget.prop_str("text", "");
        let placeholder = text.is_empty();
        let shown = if placeholder {
            widget.prop_str("placeholder", "Enter text...")
        } else {
            text
        };
        let color = if placeholder {
            Rgb::new(153, 153, 153)
        } else {
            ctx.color_style("black")
        };

        surface.clear();
        surface.fill_rect(0.0, 0.0, w, h, Rgb::WHITE);
        surface.stroke_rect(0.0, 0.0, w, h, 1.0, Rgb::new(153, 153, 153));
        surface.text(6.0, 6.0, shown, 14.0, color);
    }

    fn export_lvgl(&self, widget: &WidgetDefinition, ctx: &ExportContext) -> ExportFragment {
        let mut obj = ctx.object_descriptor();
        obj.kind = "textarea".into();
        obj.set(
            "placeholder_text",
            json!(widget.prop_str("placeholder", "Enter text...")),
        );
        obj.set("text", json!(widget.prop_str("text", "")));
        obj.set("max_length", json!(widget.prop_i64("max_length").unwrap_or(128)));
        obj.set("one_line", json!(widget.prop_bool("one_line", false)));
        obj.set("password_mode", json!(widget.prop_bool("password_mode", false)));
        obj.into_fragment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceModel;

    fn textarea_widget(props: Value) -> WidgetDefinition {
        WidgetDefinition {
            id: "text_1".into(),
            widget_type: "lvgl_textarea".into(),
            x: 10,
            y: 20,
            width: 140,
            height: 60,
            props: props_object(props),
            entity_id: None,
            rotation: None,
            hidden: false,
            locked: false,
        }
    }

    #[test]
    fn descriptor_export_carries_common_attributes() {
        let widget = textarea_widget(json!({ "placeholder": "Name", "max_length": 32 }));
        let ctx = ExportContext::new(&widget, DeviceModel::Monochrome);
        let fragment = TextareaPlugin.export_lvgl(&widget, &ctx);
        assert_eq!(fragment.kind, "textarea");
        assert_eq!(fragment.attrs["id"], json!("text_1"));
        assert_eq!(fragment.attrs["x"], json!(10));
        assert_eq!(fragment.attrs["placeholder_text"], json!("Name"));
        assert_eq!(fragment.attrs["max_length"], json!(32));
        assert_eq!(fragment.attrs["one_line"], json!(false));
    }
}
