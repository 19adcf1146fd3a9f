// resend.rs - Resend delivery over the host's global fetch
//
// Works in any JS runtime exposing `fetch` (browser, edge worker, Node).

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{Headers, Request, RequestInit, Response};

use super::{EmailProvider, OutgoingEmail, RelayConfig, RelayError, relay};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = fetch)]
    fn global_fetch(input: &Request) -> js_sys::Promise;
}

/// Resend's error body
#[derive(Deserialize)]
struct ProviderFailure {
    message: String,
}

#[derive(Clone)]
pub struct ResendProvider {
    api_key: String,
    endpoint: String,
}

impl ResendProvider {
    pub fn new(cfg: &RelayConfig) -> Self {
        Self { api_key: cfg.api_key.clone(), endpoint: cfg.endpoint.clone() }
    }

    fn request(&self, email: &OutgoingEmail) -> Result<Request, RelayError> {
        let body = email.to_json()?;

        let headers = Headers::new().map_err(js_transport)?;
        headers.set("Authorization", &format!("Bearer {}", self.api_key)).map_err(js_transport)?;
        headers.set("Content-Type", "application/json").map_err(js_transport)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        Request::new_with_str_and_init(&self.endpoint, &init).map_err(js_transport)
    }
}

impl EmailProvider for ResendProvider {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), RelayError> {
        let req = self.request(email)?;

        let res: Response = JsFuture::from(global_fetch(&req))
            .await
            .map_err(js_transport)?
            .dyn_into()
            .map_err(js_transport)?;

        if res.ok() {
            return Ok(());
        }

        let status = res.status();
        let text = match res.text() {
            Ok(p) => JsFuture::from(p).await.ok().and_then(|v| v.as_string()).unwrap_or_default(),
            Err(_) => String::new(),
        };
        let message = serde_json::from_str::<ProviderFailure>(&text)
            .map(|f| f.message)
            .unwrap_or(text);

        Err(RelayError::Rejected { status, message })
    }
}

fn js_transport(e: JsValue) -> RelayError {
    RelayError::Transport(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Serverless entry point: the host passes its secret and recipient,
/// then forwards each POST body to `handle`.
#[wasm_bindgen]
pub struct ContactRelay {
    cfg: RelayConfig,
    provider: ResendProvider,
}

#[wasm_bindgen]
impl ContactRelay {
    #[wasm_bindgen(constructor)]
    pub fn new(api_key: String, to: String) -> Self {
        let recipients = to
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        let cfg = RelayConfig::new(api_key, recipients);
        let provider = ResendProvider::new(&cfg);
        Self { cfg, provider }
    }

    /// Resolves to `{ status, body }` where `body` is the JSON response text
    pub fn handle(&self, body: String) -> js_sys::Promise {
        let cfg = self.cfg.clone();
        let provider = self.provider.clone();

        future_to_promise(async move {
            let res = relay(&provider, &cfg, &body).await;

            let out = js_sys::Object::new();
            js_sys::Reflect::set(&out, &"status".into(), &JsValue::from(res.status))?;
            js_sys::Reflect::set(&out, &"body".into(), &JsValue::from_str(&res.body.to_string()))?;
            Ok(out.into())
        })
    }
}
