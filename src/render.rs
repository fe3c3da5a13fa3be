use crate::device::{self, DeviceModel};
use crate::diagnostics::Diagnostic;
use crate::registry::PluginRegistry;
use crate::surface::{Rgb, Surface};
use crate::widget::WidgetDefinition;

/// Context shared with widget plugins at render time. Color names resolve
/// against the active device palette, unknown names falling back to black.
pub struct RenderContext {
    device: DeviceModel,
}

impl RenderContext {
    pub fn new(device: DeviceModel) -> Self {
        Self { device }
    }

    pub fn device(&self) -> DeviceModel {
        self.device
    }

    pub fn palette(&self) -> &'static [&'static str] {
        self.device.available_colors()
    }

    pub fn color_style(&self, name: &str) -> Rgb {
        Rgb::from_hex(device::color_style(name))
    }
}

/// Invokes widget render hooks against a preview surface.
///
/// Rendering performs side effects on one shared mutable surface and is not
/// reentrant-safe per surface; callers serialize render calls (trivially
/// satisfied on a single UI thread).
pub struct Renderer<'a> {
    registry: &'a PluginRegistry,
    ctx: RenderContext,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a PluginRegistry, device: DeviceModel) -> Self {
        Self { registry, ctx: RenderContext::new(device) }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Render one widget. An unknown widget type draws a visible placeholder
    /// and reports a diagnostic instead of failing, so one broken widget
    /// never blanks the rest of the preview.
    pub fn render(&self, surface: &mut dyn Surface, widget: &WidgetDefinition) -> Option<Diagnostic> {
        match self.registry.get(&widget.widget_type) {
            Ok(plugin) => {
                plugin.render(surface, widget, &self.ctx);
                None
            }
            Err(_) => {
                tracing::warn!(
                    widget = %widget.id,
                    widget_type = %widget.widget_type,
                    "rendering placeholder for unknown widget type"
                );
                render_placeholder(surface, &widget.widget_type);
                Some(Diagnostic::unknown_widget_type(&widget.id, &widget.widget_type))
            }
        }
    }
}

fn render_placeholder(surface: &mut dyn Surface, widget_type: &str) {
    let (w, h) = surface.size();
    let gray = Rgb::new(160, 160, 160);
    surface.clear();
    surface.stroke_rect(0.0, 0.0, w, h, 2.0, gray);
    surface.line(0.0, 0.0, w, h, 1.0, gray);
    surface.line(0.0, h, w, 0.0, 1.0, gray);
    surface.text(4.0, 4.0, widget_type, 12.0, Rgb::BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::builtin_registry;
    use crate::surface::{DrawCommand, RecordingSurface};
    use serde_json::Map;

    fn unknown_widget() -> WidgetDefinition {
        WidgetDefinition {
            id: "mystery".into(),
            widget_type: "not_registered".into(),
            x: 0,
            y: 0,
            width: 80,
            height: 40,
            props: Map::new(),
            entity_id: None,
            rotation: None,
            hidden: false,
            locked: false,
        }
    }

    #[test]
    fn unknown_type_draws_placeholder_and_reports() {
        let registry = builtin_registry();
        let renderer = Renderer::new(&registry, DeviceModel::Monochrome);
        let mut surface = RecordingSurface::new(80.0, 40.0);

        let diagnostic = renderer.render(&mut surface, &unknown_widget());
        assert_eq!(
            diagnostic,
            Some(Diagnostic::unknown_widget_type("mystery", "not_registered"))
        );
        assert!(surface.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "not_registered"
        )));
    }

    #[test]
    fn known_type_renders_without_diagnostic() {
        let registry = builtin_registry();
        let renderer = Renderer::new(&registry, DeviceModel::MultiColor);
        let widget = registry.create_instance("lvgl_led", Map::new()).unwrap();
        let mut surface = RecordingSurface::new(50.0, 50.0);

        assert_eq!(renderer.render(&mut surface, &widget), None);
        assert!(!surface.commands().is_empty());
    }

    #[test]
    fn repeated_render_is_idempotent() {
        let registry = builtin_registry();
        let renderer = Renderer::new(&registry, DeviceModel::MultiColor);
        for id in registry.ids() {
            let widget = registry.create_instance(&id, Map::new()).unwrap();
            let mut surface = RecordingSurface::new(100.0, 60.0);
            renderer.render(&mut surface, &widget);
            let first: Vec<_> = surface.commands().to_vec();
            renderer.render(&mut surface, &widget);
            assert_eq!(surface.commands(), first.as_slice(), "plugin {id} is not idempotent");
        }
    }
}
