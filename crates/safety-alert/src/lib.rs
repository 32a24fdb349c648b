//! Outbound SOS alerts.
//!
//! [`AlertDispatcher`] is the only thing request handlers see; the concrete
//! [`SmsGateway`] behind it is picked at startup.

pub mod console;
pub mod twilio;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tracing::{info, warn};

pub use console::ConsoleGateway;
pub use twilio::{TwilioConfig, TwilioGateway};

/// Text sent for every SOS alert.
pub const SOS_MESSAGE: &str = "🚨 SOS ALERT! Immediate help needed!";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("SMS gateway unreachable: {0}")]
    Transport(String),

    #[error("SMS gateway rejected the message (HTTP {status})")]
    Rejected { status: u16 },

    #[error("SMS gateway misconfigured: {0}")]
    Config(String),
}

/// A provider that can deliver one text message.
pub trait SmsGateway: Send + Sync {
    fn send<'a>(&'a self, to: &'a str, body: &'a str) -> BoxFuture<'a, Result<(), DispatchError>>;
}

#[derive(Clone)]
pub struct AlertDispatcher {
    gateway: Arc<dyn SmsGateway>,
}

impl AlertDispatcher {
    pub fn new(gateway: impl SmsGateway + 'static) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Single delivery attempt; failures go straight back to the caller.
    pub async fn send_sos(&self, number: &str, body: &str) -> Result<(), DispatchError> {
        match self.gateway.send(number, body).await {
            Ok(()) => {
                info!(to = %number, "SOS alert dispatched");
                Ok(())
            }
            Err(e) => {
                warn!(to = %number, "SOS alert failed: {}", e);
                Err(e)
            }
        }
    }
}
