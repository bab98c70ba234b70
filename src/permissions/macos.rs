// macOS TCC (Transparency, Consent, and Control) microphone authorization
// via AVCaptureDevice

use std::sync::Mutex;

use block2::RcBlock;
use colored::Colorize;
use objc2::runtime::Bool;
use objc2_av_foundation::{AVCaptureDevice, AVMediaTypeAudio};
use objc2_foundation::NSString;
use tracing::{error, info};

use super::{AccessCompletion, AuthorizationStatus, CaptureAuthorization};

/// Raw value reported when AVFoundation does not export `AVMediaTypeAudio`
const MEDIA_TYPE_MISSING: i64 = -1;

/// AVFoundation-backed authorization for the audio media type
#[derive(Debug, Default)]
pub struct AvCaptureAuthorization;

impl AvCaptureAuthorization {
    pub fn new() -> Self {
        Self
    }
}

fn audio_media_type() -> Option<&'static NSString> {
    let media_type = unsafe { AVMediaTypeAudio };
    if media_type.is_none() {
        error!(
            "{} AVMediaTypeAudio is not available in this AVFoundation",
            "PERMISSION_ERROR".bright_red()
        );
    }
    media_type
}

impl CaptureAuthorization for AvCaptureAuthorization {
    fn authorization_status(&self) -> AuthorizationStatus {
        let Some(media_type) = audio_media_type() else {
            return AuthorizationStatus::Unknown(MEDIA_TYPE_MISSING);
        };

        let status = unsafe { AVCaptureDevice::authorizationStatusForMediaType(media_type) };
        AuthorizationStatus::from_raw(status.0 as i64)
    }

    fn request_access(&self, completion: AccessCompletion) {
        let Some(media_type) = audio_media_type() else {
            completion(false);
            return;
        };

        info!(
            "{} Requesting microphone access from the user",
            "PERMISSION_REQUEST".bright_cyan()
        );

        // Blocks are `Fn`; the completion may only run once
        let completion = Mutex::new(Some(completion));
        let handler = RcBlock::new(move |granted: Bool| {
            let pending = completion.lock().ok().and_then(|mut slot| slot.take());
            if let Some(done) = pending {
                done(granted.as_bool());
            }
        });

        unsafe {
            AVCaptureDevice::requestAccessForMediaType_completionHandler(media_type, &handler);
        }
    }
}
