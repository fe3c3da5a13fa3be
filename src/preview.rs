use crate::device::DeviceModel;
use crate::diagnostics::Diagnostic;
use crate::registry::PluginRegistry;
use crate::render::Renderer;
use crate::surface::EguiSurface;
use crate::widget::WidgetDefinition;
use eframe::egui;

/// Read-only egui preview of a widget document. Each widget is rendered into
/// its own sub-surface at its document position; hidden widgets are skipped.
pub struct PreviewPanel<'a> {
    renderer: Renderer<'a>,
}

impl<'a> PreviewPanel<'a> {
    pub fn new(registry: &'a PluginRegistry, device: DeviceModel) -> Self {
        Self { renderer: Renderer::new(registry, device) }
    }

    pub fn ui(&self, ui: &mut egui::Ui, widgets: &[WidgetDefinition]) -> Vec<Diagnostic> {
        let origin = ui.max_rect().min;
        let painter = ui.painter();
        let mut diagnostics = Vec::new();
        for widget in widgets {
            if widget.hidden {
                continue;
            }
            let rect = egui::Rect::from_min_size(
                origin + egui::vec2(widget.x as f32, widget.y as f32),
                egui::vec2(widget.width as f32, widget.height as f32),
            );
            let mut surface = EguiSurface::new(painter, rect);
            if let Some(diagnostic) = self.renderer.render(&mut surface, widget) {
                diagnostics.push(diagnostic);
            }
        }
        diagnostics
    }
}
