// Method call handler for the audio waveforms channel
//
// Only `checkPermission` is bridged to the OS; everything else the mobile
// plugin offers is answered with the unimplemented error.

use std::sync::Arc;

use colored::Colorize;
use tracing::{info, warn};

use crate::call_trace;
use crate::channel::{MethodCall, MethodCallHandler, Reply};
use crate::error::MethodError;
use crate::permissions::{self, AuthorizationStatus, CaptureAuthorization};

/// The one call name this shim implements
pub const CHECK_PERMISSION: &str = "checkPermission";

pub struct AudioWaveformsPlugin {
    authorization: Option<Arc<dyn CaptureAuthorization>>,
}

impl AudioWaveformsPlugin {
    /// Without a backend every call, `checkPermission` included, is unimplemented
    pub fn new(authorization: Option<Arc<dyn CaptureAuthorization>>) -> Self {
        Self { authorization }
    }

    pub fn for_current_platform() -> Self {
        Self::new(permissions::platform_authorization())
    }

    pub fn supports_permission_check(&self) -> bool {
        self.authorization.is_some()
    }
}

impl MethodCallHandler for AudioWaveformsPlugin {
    fn handle_method_call(&self, call: MethodCall, reply: Reply) {
        match (call.method(), self.authorization.as_deref()) {
            (CHECK_PERMISSION, Some(authorization)) => check_permission(authorization, reply),
            (method, _) => {
                call_trace!("'{}' is not implemented on desktop", method);
                reply.error(MethodError::unimplemented(method));
            }
        }
    }
}

fn check_permission(authorization: &dyn CaptureAuthorization, reply: Reply) {
    let status = authorization.authorization_status();
    call_trace!("Microphone authorization status: {}", status);

    match status {
        AuthorizationStatus::Authorized => reply.success(true),
        AuthorizationStatus::Denied | AuthorizationStatus::Restricted => reply.success(false),
        AuthorizationStatus::NotDetermined => {
            info!(
                "{} Microphone access not determined, asking the user",
                "PERMISSION_CHECK".bright_cyan()
            );
            authorization.request_access(Box::new(move |granted| {
                info!(
                    "{} User {} microphone access",
                    "PERMISSION_RESULT".bright_green(),
                    if granted { "granted" } else { "denied" }
                );
                reply.success(granted);
            }));
        }
        AuthorizationStatus::Unknown(raw) => {
            warn!(
                "{} Unrecognized authorization status {}, treating as not granted",
                "PERMISSION_CHECK".yellow(),
                raw
            );
            reply.success(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::MockCaptureAuthorization;
    use serde_json::Value;

    fn plugin_with(mock: MockCaptureAuthorization) -> AudioWaveformsPlugin {
        AudioWaveformsPlugin::new(Some(Arc::new(mock)))
    }

    fn check(plugin: &AudioWaveformsPlugin) -> Result<Value, MethodError> {
        let (reply, mut receiver) = Reply::pair(CHECK_PERMISSION);
        plugin.handle_method_call(MethodCall::new(CHECK_PERMISSION, None), reply);
        receiver.try_recv().expect("reply should be sent synchronously")
    }

    fn status_only(status: AuthorizationStatus) -> MockCaptureAuthorization {
        let mut mock = MockCaptureAuthorization::new();
        mock.expect_authorization_status().times(1).return_const(status);
        mock.expect_request_access().never();
        mock
    }

    #[test]
    fn test_authorized_replies_true() {
        let plugin = plugin_with(status_only(AuthorizationStatus::Authorized));
        assert_eq!(check(&plugin), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_denied_replies_false() {
        let plugin = plugin_with(status_only(AuthorizationStatus::Denied));
        assert_eq!(check(&plugin), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_restricted_replies_false() {
        let plugin = plugin_with(status_only(AuthorizationStatus::Restricted));
        assert_eq!(check(&plugin), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_unknown_status_replies_false() {
        let plugin = plugin_with(status_only(AuthorizationStatus::Unknown(42)));
        assert_eq!(check(&plugin), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_not_determined_prompts_once_and_forwards_grant() {
        let mut mock = MockCaptureAuthorization::new();
        mock.expect_authorization_status()
            .times(1)
            .return_const(AuthorizationStatus::NotDetermined);
        mock.expect_request_access()
            .times(1)
            .returning(|completion| completion(true));

        assert_eq!(check(&plugin_with(mock)), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_not_determined_forwards_refusal() {
        let mut mock = MockCaptureAuthorization::new();
        mock.expect_authorization_status()
            .return_const(AuthorizationStatus::NotDetermined);
        mock.expect_request_access()
            .times(1)
            .returning(|completion| completion(false));

        assert_eq!(check(&plugin_with(mock)), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_unrecognized_call_never_touches_backend() {
        let mut mock = MockCaptureAuthorization::new();
        mock.expect_authorization_status().never();
        mock.expect_request_access().never();
        let plugin = plugin_with(mock);

        let (reply, mut receiver) = Reply::pair("startRecording");
        plugin.handle_method_call(MethodCall::new("startRecording", None), reply);

        let err = receiver.try_recv().unwrap().unwrap_err();
        assert_eq!(err, MethodError::unimplemented("startRecording"));
    }

    #[test]
    fn test_check_permission_without_backend_is_unimplemented() {
        let plugin = AudioWaveformsPlugin::new(None);
        assert!(!plugin.supports_permission_check());

        let err = check(&plugin).unwrap_err();
        assert!(err.is_unimplemented());
        assert_eq!(err.details, Some(Value::String(CHECK_PERMISSION.into())));
    }

    #[test]
    fn test_call_name_is_case_sensitive() {
        let plugin = plugin_with(MockCaptureAuthorization::new());

        let (reply, mut receiver) = Reply::pair("checkpermission");
        plugin.handle_method_call(MethodCall::new("checkpermission", None), reply);

        assert!(receiver.try_recv().unwrap().unwrap_err().is_unimplemented());
    }
}
