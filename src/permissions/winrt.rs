// Windows microphone access via WinRT DeviceAccessInformation

use colored::Colorize;
use tracing::{error, info};
use windows::Devices::Enumeration::{DeviceAccessInformation, DeviceAccessStatus, DeviceClass};

use super::{AccessCompletion, AuthorizationStatus, CaptureAuthorization};

#[derive(Debug, Default)]
pub struct DeviceAccessAuthorization;

impl DeviceAccessAuthorization {
    pub fn new() -> Self {
        Self
    }
}

/// Is any audio capture device currently allowed?
fn current_access_status() -> anyhow::Result<DeviceAccessStatus> {
    let info = DeviceAccessInformation::CreateFromDeviceClass(DeviceClass::AudioCapture)?;
    Ok(info.CurrentStatus()?)
}

fn map_status(status: DeviceAccessStatus) -> AuthorizationStatus {
    if status == DeviceAccessStatus::Allowed {
        AuthorizationStatus::Authorized
    } else if status == DeviceAccessStatus::DeniedByUser {
        AuthorizationStatus::Denied
    } else if status == DeviceAccessStatus::DeniedBySystem {
        AuthorizationStatus::Restricted
    } else {
        AuthorizationStatus::Unknown(status.0 as i64)
    }
}

impl CaptureAuthorization for DeviceAccessAuthorization {
    fn authorization_status(&self) -> AuthorizationStatus {
        match current_access_status() {
            Ok(status) => map_status(status),
            Err(e) => {
                error!(
                    "{} Microphone permission check failed: {}",
                    "PERMISSION_ERROR".bright_red(),
                    e
                );
                AuthorizationStatus::Denied
            }
        }
    }

    fn request_access(&self, completion: AccessCompletion) {
        // Windows has no programmatic consent prompt; report what is allowed now
        info!(
            "{} Windows cannot prompt for microphone access, re-reading status",
            "PERMISSION_REQUEST".bright_cyan()
        );
        completion(self.authorization_status() == AuthorizationStatus::Authorized);
    }
}
