//! Desktop shim for the audio_waveforms plugin.
//!
//! Registers the `simform_audio_waveforms_plugin/methods` channel as a Tauri
//! plugin. `checkPermission` is answered from the OS microphone authorization
//! (AVFoundation on macOS, WinRT on Windows); every other call gets the
//! `audioWaveforms` unimplemented error.

pub mod channel;
pub mod commands;
pub mod config;
pub mod error;
pub mod log;
pub mod permissions;
pub mod plugin;

pub use channel::{MethodCall, MethodCallHandler, MethodChannel, Reply};
pub use config::PluginConfig;
pub use error::{ChannelError, MethodError};
pub use permissions::{AccessCompletion, AuthorizationStatus, CaptureAuthorization};
pub use plugin::{AudioWaveformsPlugin, CHECK_PERMISSION};

use std::sync::Arc;

use colored::Colorize;
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Manager, Runtime};
use tracing::info;

pub const PLUGIN_NAME: &str = "audio-waveforms";

/// Build the method channel for this platform from `config`
pub fn create_channel(config: &PluginConfig) -> MethodChannel {
    let handler = AudioWaveformsPlugin::for_current_platform();
    info!(
        "{} Registering '{}' (permission check {})",
        "AUDIO_WAVEFORMS".bright_cyan(),
        config.channel,
        if handler.supports_permission_check() {
            "supported"
        } else {
            "unsupported"
        }
    );
    MethodChannel::new(config.channel.clone(), Arc::new(handler))
}

/// Initialize the plugin. Register it with `tauri::Builder::plugin`.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<PluginConfig>> {
    Builder::<R, Option<PluginConfig>>::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![commands::method_channel::invoke_method])
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();

            if config.install_subscriber {
                log::init_tracing(&config.log_filter);
            }
            log::set_call_tracing(config.trace_calls);

            app.manage(create_channel(&config));
            Ok(())
        })
        .build()
}
