// Tauri commands exposed by the plugin
pub mod method_channel;

pub use method_channel::*;
