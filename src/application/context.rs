use crate::error::{AnchorError, Result};

/// Default route of the "more info" page, relative to the base URL.
pub const DEFAULT_MORE_INFO_PATH: &str = "/transaction/more_info";

/// Request-derived data needed to build absolute URLs.
///
/// `base_url` is scheme, host and any mount prefix, e.g.
/// `https://anchor.example.com/sep24`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    base_url: String,
    more_info_path: String,
}

impl RenderContext {
    pub fn new(base_url: &str, more_info_path: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        let host = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
            .ok_or_else(|| {
                AnchorError::InvalidRenderContext(format!(
                    "base url must start with http:// or https://: {base_url}"
                ))
            })?;
        if host.is_empty() || host.starts_with('/') {
            return Err(AnchorError::InvalidRenderContext(format!(
                "base url has no host: {base_url}"
            )));
        }

        let path = more_info_path.trim();
        if path.contains('?') || path.contains('#') {
            return Err(AnchorError::InvalidRenderContext(format!(
                "more info path must not carry a query or fragment: {path}"
            )));
        }
        let more_info_path = format!("/{}", path.trim_start_matches('/'));

        Ok(Self {
            base_url: base_url.to_string(),
            more_info_path,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn more_info_path(&self) -> &str {
        &self.more_info_path
    }

    /// Joins a root-relative path (which may carry a query) onto the base URL.
    pub fn build_absolute_uri(&self, path_and_query: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            path_and_query.trim_start_matches('/')
        )
    }

    /// `more_info_url` for a transaction id.
    pub fn more_info_url(&self, id: impl std::fmt::Display) -> String {
        self.build_absolute_uri(&format!("{}?id={}", self.more_info_path, id))
    }
}
