//! Widget composition for LVGL dashboard exports.
//!
//! An ordered list of [`widget::WidgetDefinition`]s is lowered two ways by
//! plugins registered per widget type: an on-screen preview through the
//! [`surface::Surface`] abstraction, and LVGL configuration fragments plus a
//! deduplicated entity refresh trigger map for the device firmware.

pub mod binding;
pub mod device;
pub mod diagnostics;
pub mod export;
pub mod logging;
pub mod plugins;
pub mod preview;
pub mod registry;
pub mod render;
pub mod surface;
pub mod triggers;
pub mod widget;

pub use device::DeviceModel;
pub use diagnostics::Diagnostic;
pub use export::{ExportEngine, ExportFragment, ExportOutcome};
pub use plugins::builtin_registry;
pub use registry::{PluginRegistry, WidgetPlugin};
pub use render::Renderer;
pub use triggers::{TriggerCollector, TriggerMap};
pub use widget::WidgetDefinition;
