use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCache, RequestInit, RequestMode, Response};

use crate::errors::TransportError;
use crate::models::{JobStatus, QueueResponse};

/// Status line and body of a completed fetch.
#[derive(Debug, Clone)]
pub struct FetchReply {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

// Thin REST client for the viewer's status endpoints
pub struct ApiClient;

impl ApiClient {
    /// `GET /queue/{id}` decoded into a [`JobStatus`].  Non-2xx replies and
    /// bodies that are not a queue status are transport errors.
    pub async fn queue_status(url: &str) -> Result<JobStatus, TransportError> {
        let reply = Self::fetch_text(url, "GET", true)
            .await
            .map_err(|e| TransportError::new(url, format!("{:?}", e)))?;

        if !reply.ok {
            return Err(TransportError::new(url, format!("HTTP {}", reply.status)));
        }

        let response: QueueResponse = serde_json::from_str(&reply.body)
            .map_err(|e| TransportError::new(url, format!("bad status body: {}", e)))?;
        Ok(response.into())
    }

    /// `HEAD <href>`: a 2xx reply means the artifact exists.
    pub async fn artifact_exists(url: &str) -> Result<(), TransportError> {
        let reply = Self::fetch_text(url, "HEAD", false)
            .await
            .map_err(|e| TransportError::new(url, format!("{:?}", e)))?;

        if reply.ok {
            Ok(())
        } else {
            Err(TransportError::new(url, format!("HTTP {}", reply.status)))
        }
    }

    // Helper function to make fetch requests
    pub async fn fetch_text(url: &str, method: &str, read_body: bool) -> Result<FetchReply, JsValue> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        // Status answers change between polls; never serve them from cache.
        opts.set_cache(RequestCache::NoStore);

        let headers = Headers::new()?;
        headers.append("Accept", "application/json")?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let body = if read_body && resp.ok() {
            let text = JsFuture::from(resp.text()?).await?;
            text.as_string().unwrap_or_default()
        } else {
            String::new()
        };

        Ok(FetchReply {
            status: resp.status(),
            ok: resp.ok(),
            body,
        })
    }
}
