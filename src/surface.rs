use eframe::egui;

/// Plain RGB color used by the surface abstraction so core widget logic
/// stays independent of the UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string. Anything malformed parses as black, in line
    /// with the unknown-color fallback.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Rgb::BLACK;
        }
        let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        match (parse(0..2), parse(2..4), parse(4..6)) {
            (Some(r), Some(g), Some(b)) => Rgb::new(r, g, b),
            _ => Rgb::BLACK,
        }
    }

    /// Linear blend toward another color. `t` of 0 keeps `self`.
    pub fn blend(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Drawing surface for one widget, in widget-local coordinates. Implemented
/// once per UI toolkit; the core widget plugins depend only on this trait.
pub trait Surface {
    fn size(&self) -> (f32, f32);
    /// Wipe everything the widget previously drew. Every plugin render starts
    /// with this so repeated renders stay idempotent.
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: f32, color: Rgb);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb);
    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: f32, color: Rgb);
    fn text(&mut self, x: f32, y: f32, text: &str, size: f32, color: Rgb);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { x: f32, y: f32, w: f32, h: f32, color: Rgb },
    StrokeRect { x: f32, y: f32, w: f32, h: f32, stroke: f32, color: Rgb },
    FillCircle { cx: f32, cy: f32, radius: f32, color: Rgb },
    Line { x0: f32, y0: f32, x1: f32, y1: f32, stroke: f32, color: Rgb },
    Text { x: f32, y: f32, text: String, size: f32, color: Rgb },
}

/// Surface that records draw commands instead of painting. Used by headless
/// tests to assert on render output.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: f32, color: Rgb) {
        self.commands.push(DrawCommand::StrokeRect { x, y, w, h, stroke, color });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::FillCircle { cx, cy, radius, color });
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: f32, color: Rgb) {
        self.commands.push(DrawCommand::Line { x0, y0, x1, y1, stroke, color });
    }

    fn text(&mut self, x: f32, y: f32, text: &str, size: f32, color: Rgb) {
        self.commands.push(DrawCommand::Text { x, y, text: text.to_string(), size, color });
    }
}

/// egui implementation, painting into one widget's rect on the preview panel.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }

    fn pos(&self, x: f32, y: f32) -> egui::Pos2 {
        self.rect.min + egui::vec2(x, y)
    }
}

fn to_color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

impl Surface for EguiSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (self.rect.width(), self.rect.height())
    }

    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, egui::Color32::WHITE);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let rect = egui::Rect::from_min_size(self.pos(x, y), egui::vec2(w, h));
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: f32, color: Rgb) {
        let rect = egui::Rect::from_min_size(self.pos(x, y), egui::vec2(w, h));
        self.painter
            .rect_stroke(rect, 0.0, egui::Stroke::new(stroke, to_color32(color)));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        self.painter.circle_filled(self.pos(cx, cy), radius, to_color32(color));
    }

    fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, stroke: f32, color: Rgb) {
        self.painter.line_segment(
            [self.pos(x0, y0), self.pos(x1, y1)],
            egui::Stroke::new(stroke, to_color32(color)),
        );
    }

    fn text(&mut self, x: f32, y: f32, text: &str, size: f32, color: Rgb) {
        self.painter.text(
            self.pos(x, y),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::proportional(size),
            to_color32(color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#ff8000"), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("a0a0a0"), Rgb::new(160, 160, 160));
        assert_eq!(Rgb::from_hex("#nope!!"), Rgb::BLACK);
        assert_eq!(Rgb::from_hex(""), Rgb::BLACK);
    }

    #[test]
    fn clear_discards_recorded_commands() {
        let mut surface = RecordingSurface::new(100.0, 40.0);
        surface.fill_rect(0.0, 0.0, 10.0, 10.0, Rgb::BLACK);
        assert_eq!(surface.commands().len(), 1);
        surface.clear();
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn blend_interpolates_channels() {
        let dimmed = Rgb::new(255, 0, 0).blend(Rgb::WHITE, 0.5);
        assert_eq!(dimmed, Rgb::new(255, 128, 128));
    }
}
