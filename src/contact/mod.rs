// contact/ - Contact form relay
//
// Stateless, single attempt: parse the form payload, render it as an HTML
// email, hand it to the provider once, and report `{ok:true}` or
// `{error:"..."}`. No retry, no queue.

mod error;
#[cfg(target_arch = "wasm32")]
mod resend;

pub use error::{ConfigError, RelayError};
#[cfg(target_arch = "wasm32")]
pub use resend::{ContactRelay, ResendProvider};

use std::env;
use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DEFAULT_FROM: &str = "onboarding@resend.dev";
pub const DEFAULT_ENDPOINT: &str = "https://api.resend.com/emails";

/// Form submission
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Provider-facing email (Resend's `POST /emails` body)
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl OutgoingEmail {
    /// Provider request body
    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(RelayError::Encode)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelayConfig {
    pub api_key: String,
    pub from: String,
    pub to: Vec<String>,
    pub endpoint: String,
}

impl RelayConfig {
    pub fn new(api_key: impl Into<String>, to: Vec<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from: DEFAULT_FROM.to_string(),
            to,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// RESEND_API_KEY, CONTACT_TO (comma separated), optional CONTACT_FROM
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = get("RESEND_API_KEY").ok_or(ConfigError::Missing("RESEND_API_KEY"))?;
        let to_raw = get("CONTACT_TO").ok_or(ConfigError::Missing("CONTACT_TO"))?;

        let to: Vec<String> = to_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if to.is_empty() {
            return Err(ConfigError::NoRecipients("CONTACT_TO"));
        }

        let mut cfg = Self::new(api_key, to);
        if let Some(from) = get("CONTACT_FROM") {
            cfg.from = from;
        }
        Ok(cfg)
    }
}

impl ContactRequest {
    pub fn parse(body: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn to_email(&self, cfg: &RelayConfig) -> OutgoingEmail {
        let html = format!(
            "<p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{}</p>\n",
            escape_html(&self.name),
            escape_html(&self.email),
            escape_html(&self.message),
        );

        OutgoingEmail {
            from: cfg.from.clone(),
            to: cfg.to.clone(),
            subject: self.subject.clone(),
            html,
        }
    }
}

/// Something that can deliver one email
pub trait EmailProvider {
    fn send(&self, email: &OutgoingEmail) -> impl Future<Output = Result<(), RelayError>>;
}

/// What goes back to the form: status plus JSON body
#[derive(Clone, Debug, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self { status: 200, body: json!({ "ok": true }) }
    }

    pub fn error(err: &RelayError) -> Self {
        Self { status: err.status(), body: json!({ "error": err.to_string() }) }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Handle one POST body
pub async fn relay<P: EmailProvider>(provider: &P, cfg: &RelayConfig, body: &str) -> RelayResponse {
    match deliver(provider, cfg, body).await {
        Ok(()) => RelayResponse::ok(),
        Err(e) => {
            log::error!("contact relay failed: {}", e);
            RelayResponse::error(&e)
        }
    }
}

async fn deliver<P: EmailProvider>(provider: &P, cfg: &RelayConfig, body: &str) -> Result<(), RelayError> {
    let req = ContactRequest::parse(body)?;
    provider.send(&req.to_email(cfg)).await
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
