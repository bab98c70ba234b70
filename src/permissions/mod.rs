// Microphone (audio capture) authorization
//
// Each desktop platform gets a backend behind `CaptureAuthorization`. The
// bridge in `plugin` only ever reads the state or asks for consent; the OS
// owns the state itself.

use std::fmt;
use std::sync::Arc;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod winrt;

/// Completion for a consent request; runs once, on whatever thread the OS picks
pub type AccessCompletion = Box<dyn FnOnce(bool) + Send + 'static>;

/// Audio capture authorization state as reported by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// Access is blocked by policy (parental controls, MDM, ...)
    Restricted,
    /// The user explicitly denied access
    Denied,
    /// The user granted access
    Authorized,
    /// A state this crate does not know about, with the raw platform value
    Unknown(i64),
}

impl AuthorizationStatus {
    /// Map an `AVAuthorizationStatus` raw value
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Self::NotDetermined,
            1 => Self::Restricted,
            2 => Self::Denied,
            3 => Self::Authorized,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "not-determined"),
            Self::Restricted => write!(f, "restricted"),
            Self::Denied => write!(f, "denied"),
            Self::Authorized => write!(f, "authorized"),
            Self::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// Query and request audio capture authorization
#[cfg_attr(test, mockall::automock)]
pub trait CaptureAuthorization: Send + Sync {
    /// Current authorization state, read without prompting
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for consent. `completion` receives the outcome and must be
    /// called exactly once.
    fn request_access(&self, completion: AccessCompletion);
}

/// The authorization backend for the platform this crate was built for
pub fn platform_authorization() -> Option<Arc<dyn CaptureAuthorization>> {
    #[cfg(target_os = "macos")]
    {
        Some(Arc::new(macos::AvCaptureAuthorization::new()))
    }

    #[cfg(target_os = "windows")]
    {
        Some(Arc::new(winrt::DeviceAccessAuthorization::new()))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        None
    }
}
