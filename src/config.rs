// Plugin configuration, read by Tauri from `plugins.audio-waveforms` in tauri.conf.json

use serde::{Deserialize, Serialize};

/// Channel name the Dart side of audio_waveforms talks to
pub const DEFAULT_CHANNEL: &str = "simform_audio_waveforms_plugin/methods";

pub const DEFAULT_LOG_FILTER: &str = "audio_waveforms_lib=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    /// Name the method channel is registered under
    pub channel: String,
    /// Log every inbound call and its outcome at debug level
    pub trace_calls: bool,
    /// Install a tracing subscriber if the host has not
    pub install_subscriber: bool,
    /// Default filter for the installed subscriber; `RUST_LOG` overrides it
    pub log_filter: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            trace_calls: false,
            install_subscriber: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
