use reqwest::Url;
use tracing::warn;

use crate::http::HttpMethod;
use crate::model::Request;

/// Target of an HTTP sampler, split the way JMeter stores it.
///
/// An endpoint without a parseable url is empty; the sampler is still
/// emitted, just with blank target properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Option<HttpMethod>,
    pub protocol: String,
    pub hostname: String,
    pub port: String,
    pub path: String,
}

impl Endpoint {
    pub fn from_request(request: &Request) -> Self {
        let raw = request.url();
        if raw.is_empty() {
            return Self::default();
        }

        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(err) => {
                warn!(request = request.name(), url = raw, error = %err, "Skipping malformed request url");
                return Self::default();
            }
        };

        // Non-GET requests carry the query string in the path.
        let mut path = url.path().to_string();
        if !request.method.is_get() {
            if let Some(query) = url.query().filter(|query| !query.is_empty()) {
                path.push('?');
                path.push_str(&query.replace('&', "&amp;"));
            }
        }

        Self {
            method: Some(request.method.clone()),
            protocol: url.scheme().to_string(),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port().map(|port| port.to_string()).unwrap_or_default(),
            path,
        }
    }

    pub fn method(&self) -> &str {
        self.method.as_ref().map(HttpMethod::as_str).unwrap_or_default()
    }
}
