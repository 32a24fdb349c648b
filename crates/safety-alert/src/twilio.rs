use std::time::Duration;

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::{DispatchError, SmsGateway};

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number in E.164 form.
    pub from_number: String,
    pub api_base: String,
}

/// Twilio Programmable Messaging over its REST API.
pub struct TwilioGateway {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioGateway {
    pub fn new(config: TwilioConfig) -> Result<Self, DispatchError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() || config.from_number.is_empty() {
            return Err(DispatchError::Config("account SID, auth token and sender number are required".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DispatchError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

impl SmsGateway for TwilioGateway {
    fn send<'a>(&'a self, to: &'a str, body: &'a str) -> BoxFuture<'a, Result<(), DispatchError>> {
        Box::pin(async move {
            let resp = self
                .client
                .post(self.messages_url())
                .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
                .form(&[("To", to), ("From", self.config.from_number.as_str()), ("Body", body)])
                .send()
                .await
                .map_err(|e| DispatchError::Transport(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(DispatchError::Rejected { status: status.as_u16() });
            }

            debug!(to = %to, "Twilio accepted message");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{Form, Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Outgoing {
        to: String,
        from: String,
        body: String,
    }

    type Captured = Arc<Mutex<Vec<(Option<String>, Outgoing)>>>;

    async fn fake_api(status: StatusCode) -> (String, Captured) {
        let captured: Captured = Arc::default();

        let app = Router::new()
            .route(
                "/2010-04-01/Accounts/{sid}/Messages.json",
                post(move |State(captured): State<Captured>, headers: HeaderMap, Form(msg): Form<Outgoing>| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    captured.lock().unwrap().push((auth, msg));
                    status
                }),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn gateway(api_base: String) -> TwilioGateway {
        TwilioGateway::new(TwilioConfig {
            account_sid: "AC123".into(),
            auth_token: "secret".into(),
            from_number: "+15550000000".into(),
            api_base,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_form_with_basic_auth() {
        let (base, captured) = fake_api(StatusCode::CREATED).await;

        gateway(base).send("+15551234567", "help").await.unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let (auth, msg) = &captured[0];
        assert!(auth.as_deref().unwrap().starts_with("Basic "));
        assert_eq!(msg.to, "+15551234567");
        assert_eq!(msg.from, "+15550000000");
        assert_eq!(msg.body, "help");
    }

    #[tokio::test]
    async fn provider_error_is_rejected() {
        let (base, captured) = fake_api(StatusCode::BAD_REQUEST).await;

        let err = gateway(base).send("+15551234567", "help").await.unwrap_err();

        assert!(matches!(err, DispatchError::Rejected { status: 400 }));
        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_api_is_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments
        let err = gateway("http://127.0.0.1:9".into())
            .send("+15551234567", "help")
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Transport(_)));
    }

    #[test]
    fn missing_credentials_rejected() {
        let result = TwilioGateway::new(TwilioConfig {
            account_sid: String::new(),
            auth_token: "secret".into(),
            from_number: "+15550000000".into(),
            api_base: DEFAULT_API_BASE.into(),
        });
        assert!(matches!(result, Err(DispatchError::Config(_))));
    }
}
