use crate::registry::{PluginRegistry, WidgetPlugin};
use std::sync::Arc;

mod arc;
mod bar;
mod checkbox;
mod label;
mod led;
mod slider;
mod spinbox;
mod switch;
mod textarea;

pub use arc::ArcPlugin;
pub use bar::BarPlugin;
pub use checkbox::CheckboxPlugin;
pub use label::LabelPlugin;
pub use led::LedPlugin;
pub use slider::SliderPlugin;
pub use spinbox::SpinboxPlugin;
pub use switch::SwitchPlugin;
pub use textarea::TextareaPlugin;

/// Registry preloaded with every builtin widget plugin. Plugins are
/// process-lifetime and immutable after registration.
pub fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    let builtins: Vec<Arc<dyn WidgetPlugin>> = vec![
        Arc::new(LedPlugin),
        Arc::new(BarPlugin),
        Arc::new(SliderPlugin),
        Arc::new(ArcPlugin),
        Arc::new(SpinboxPlugin),
        Arc::new(LabelPlugin),
        Arc::new(CheckboxPlugin),
        Arc::new(SwitchPlugin),
        Arc::new(TextareaPlugin),
    ];
    for plugin in builtins {
        registry
            .register(plugin)
            .expect("builtin plugin ids are unique");
    }
    registry
}
