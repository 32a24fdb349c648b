//! Development gateway: logs instead of texting.

use futures_util::future::BoxFuture;

use crate::{DispatchError, SmsGateway};

pub struct ConsoleGateway;

impl SmsGateway for ConsoleGateway {
    fn send<'a>(&'a self, to: &'a str, body: &'a str) -> BoxFuture<'a, Result<(), DispatchError>> {
        Box::pin(async move {
            tracing::info!(to = %to, body = %body, "SMS (console gateway, not delivered)");
            Ok(())
        })
    }
}
