// Method channel: named request/reply calls with exactly one reply each
//
// A `Reply` wraps the sending half of a oneshot. Answering consumes it, so a
// handler cannot reply twice, and dropping it unanswered wakes the caller
// with `ChannelError::ReplyDropped` instead of leaving it hanging.

use std::fmt;
use std::sync::Arc;

use colored::Colorize;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::call_trace;
use crate::error::{ChannelError, MethodError, Result};

pub type MethodOutcome = std::result::Result<Value, MethodError>;

/// An inbound call: the method name plus opaque arguments
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    method: String,
    arguments: Option<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Option<Value>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> Option<&Value> {
        self.arguments.as_ref()
    }
}

/// Single-use reply handle for one call
pub struct Reply {
    method: String,
    sender: oneshot::Sender<MethodOutcome>,
}

impl Reply {
    /// Create a reply handle and the receiver its outcome arrives on
    pub fn pair(method: impl Into<String>) -> (Self, oneshot::Receiver<MethodOutcome>) {
        let (sender, receiver) = oneshot::channel();
        let reply = Self {
            method: method.into(),
            sender,
        };
        (reply, receiver)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn success(self, value: impl Into<Value>) {
        self.send(Ok(value.into()));
    }

    pub fn error(self, error: MethodError) {
        self.send(Err(error));
    }

    fn send(self, outcome: MethodOutcome) {
        call_trace!("Replying to '{}' with {:?}", self.method, outcome);

        // Caller gave up; nothing is listening any more
        if self.sender.send(outcome).is_err() {
            debug!(
                "{} Caller for '{}' is gone, reply discarded",
                "CHANNEL_REPLY".yellow(),
                self.method
            );
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reply").field("method", &self.method).finish()
    }
}

/// Receives calls delivered on a method channel
pub trait MethodCallHandler: Send + Sync {
    fn handle_method_call(&self, call: MethodCall, reply: Reply);
}

/// A named channel with one registered handler
#[derive(Clone)]
pub struct MethodChannel {
    name: String,
    handler: Arc<dyn MethodCallHandler>,
}

impl MethodChannel {
    pub fn new(name: impl Into<String>, handler: Arc<dyn MethodCallHandler>) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dispatch a call and wait for its single reply.
    ///
    /// The handler runs on the calling thread; only the wait for the reply
    /// is asynchronous.
    pub async fn invoke(&self, call: MethodCall) -> Result<Value> {
        let method = call.method().to_string();
        call_trace!("[{}] -> {}", self.name, method);

        let (reply, receiver) = Reply::pair(method.clone());
        self.handler.handle_method_call(call, reply);

        match receiver.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(method_error)) => Err(ChannelError::Method(method_error)),
            Err(_) => {
                warn!(
                    "{} Handler on '{}' dropped the reply for '{}'",
                    "CHANNEL_ERROR".bright_red(),
                    self.name,
                    method
                );
                Err(ChannelError::ReplyDropped { method })
            }
        }
    }
}

impl fmt::Debug for MethodChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodChannel").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo;

    impl MethodCallHandler for Echo {
        fn handle_method_call(&self, call: MethodCall, reply: Reply) {
            match call.arguments() {
                Some(args) => reply.success(args.clone()),
                None => reply.error(MethodError::unimplemented(call.method())),
            }
        }
    }

    struct Forgetful(AtomicUsize);

    impl MethodCallHandler for Forgetful {
        fn handle_method_call(&self, _call: MethodCall, reply: Reply) {
            self.0.fetch_add(1, Ordering::SeqCst);
            drop(reply);
        }
    }

    #[tokio::test]
    async fn test_invoke_returns_success_value() {
        let channel = MethodChannel::new("test/methods", Arc::new(Echo));
        let value = channel
            .invoke(MethodCall::new("echo", Some(Value::Bool(true))))
            .await
            .unwrap();

        assert_eq!(value, Value::Bool(true));
    }

    #[tokio::test]
    async fn test_invoke_surfaces_method_error() {
        let channel = MethodChannel::new("test/methods", Arc::new(Echo));
        let err = channel.invoke(MethodCall::new("nope", None)).await.unwrap_err();

        match err {
            ChannelError::Method(e) => assert_eq!(e.details, Some(Value::String("nope".into()))),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dropped_reply_wakes_caller() {
        let handler = Arc::new(Forgetful(AtomicUsize::new(0)));
        let channel = MethodChannel::new("test/methods", handler.clone());

        let err = channel.invoke(MethodCall::new("checkPermission", None)).await.unwrap_err();

        assert!(matches!(err, ChannelError::ReplyDropped { ref method } if method == "checkPermission"));
        assert_eq!(handler.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reply_after_caller_gone_is_noop() {
        let (reply, receiver) = Reply::pair("checkPermission");
        drop(receiver);

        // Must not panic
        reply.success(true);
    }

    #[test]
    fn test_reply_pair_delivers_once() {
        let (reply, mut receiver) = Reply::pair("checkPermission");
        assert_eq!(reply.method(), "checkPermission");

        reply.success(false);
        assert_eq!(receiver.try_recv().unwrap(), Ok(Value::Bool(false)));
    }
}
