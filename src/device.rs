use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Device capability tier. Always passed explicitly into the render and
/// export entry points; never read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceModel {
    /// True monochrome e-paper panels.
    #[default]
    Monochrome,
    /// Multi-color e-paper panels.
    MultiColor,
}

impl DeviceModel {
    /// Resolve a device model string. Unrecognized models fall back to the
    /// monochrome tier.
    pub fn from_name(name: &str) -> Self {
        match name {
            "reterminal_e1002" | "esp32_s3_photopainter" => DeviceModel::MultiColor,
            _ => DeviceModel::Monochrome,
        }
    }

    /// Fixed color palette supported by this tier.
    pub fn available_colors(self) -> &'static [&'static str] {
        match self {
            DeviceModel::Monochrome => &["black", "white", "gray"],
            DeviceModel::MultiColor => {
                &["black", "white", "gray", "red", "green", "blue", "yellow"]
            }
        }
    }
}

static COLOR_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("black", "#000000"),
        ("white", "#ffffff"),
        ("red", "#ff0000"),
        ("green", "#00ff00"),
        ("blue", "#0000ff"),
        ("yellow", "#ffff00"),
        ("orange", "#ffa500"),
        // Matched to Color(160,160,160) on device
        ("gray", "#a0a0a0"),
    ])
});

/// Case-insensitive color name to hex. Unknown or empty names resolve to
/// black.
pub fn color_style(name: &str) -> &'static str {
    COLOR_TABLE
        .get(name.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or("#000000")
}

/// Lower a color name to the LVGL literal form (`0xRRGGBB`).
pub fn convert_color(name: &str) -> String {
    let hex = color_style(name);
    format!("0x{}", hex[1..].to_ascii_uppercase())
}

/// Lower a 0-255 opacity to the LVGL representation. Missing values mean
/// fully opaque. Out-of-range inputs are not clamped; anything at or past
/// the scale ends maps to the `cover`/`transp` keywords.
pub fn format_opacity(opa: Option<i64>) -> String {
    match opa {
        None => "cover".to_string(),
        Some(v) if v >= 255 => "cover".to_string(),
        Some(v) if v <= 0 => "transp".to_string(),
        Some(v) => format!("{}%", (v as f64 / 255.0 * 100.0).round() as i64),
    }
}
