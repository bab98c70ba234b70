use serde_json::Value;
use tauri::State;

use crate::channel::{MethodCall, MethodChannel};
use crate::error::MethodError;

/// Carries one method-channel call from the webview to the registered handler
#[tauri::command]
pub async fn invoke_method(
    channel: State<'_, MethodChannel>,
    method: String,
    arguments: Option<Value>,
) -> Result<Value, MethodError> {
    channel
        .invoke(MethodCall::new(method, arguments))
        .await
        .map_err(MethodError::from)
}
