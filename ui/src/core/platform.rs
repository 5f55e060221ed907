//! Platform detection and resource fetching.

use super::loader::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }
}

pub fn platform_string() -> String {
    match Platform::current() {
        Platform::Web => "web".to_string(),
        Platform::Desktop => std::env::consts::OS.to_string(),
    }
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch_error(source: &str, message: impl ToString) -> LoadError {
    LoadError::Fetch {
        source_name: source.to_string(),
        message: message.to_string(),
    }
}

/// Reads a text resource. Remote sources go over HTTP; anything else is a
/// local path (native) or a URL relative to the page (web).
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_text(source: &str) -> Result<String, LoadError> {
    if is_remote(source) {
        let response = reqwest::get(source)
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|err| fetch_error(source, err))?;
        response.text().await.map_err(|err| fetch_error(source, err))
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|err| fetch_error(source, err))
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_text(source: &str) -> Result<String, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    let window = web_sys::window().ok_or_else(|| fetch_error(source, "window unavailable"))?;
    let response = JsFuture::from(window.fetch_with_str(source))
        .await
        .map_err(|err| fetch_error(source, format!("{err:?}")))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| fetch_error(source, "unexpected fetch result"))?;
    if !response.ok() {
        return Err(fetch_error(source, format!("HTTP {}", response.status())));
    }
    let text = response
        .text()
        .map_err(|err| fetch_error(source, format!("{err:?}")))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|err| fetch_error(source, format!("{err:?}")))?;
    text.as_string()
        .ok_or_else(|| fetch_error(source, "response body is not text"))
}
