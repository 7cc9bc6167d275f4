use serde::Deserialize;
use serde_json::Value;

use super::assertions::AssertionsOptions;
use super::body::{BodyOptions, KeyValueOptions};
use super::{Assertions, Body, BuildContext, Config, EntityId, KeyValue, construct, construct_all};
use crate::http::HttpMethod;

const DEFAULT_METHOD: &str = "GET";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestOptions {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
    pub parameters: Option<Vec<KeyValueOptions>>,
    pub headers: Option<Vec<KeyValueOptions>>,
    pub body: Option<BodyOptions>,
    pub assertions: Option<AssertionsOptions>,
}

/// One outbound HTTP call within a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: EntityId,
    pub name: Option<String>,
    pub url: Option<String>,
    pub method: HttpMethod,
    pub parameters: Vec<KeyValue>,
    pub headers: Vec<KeyValue>,
    pub body: Body,
    pub assertions: Assertions,
    /// Response extraction rules. Never populated; there is no extraction
    /// format to read them from yet.
    pub extract: Vec<Value>,
}

impl Request {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}

impl Config for Request {
    type Options = RequestOptions;

    fn init_options(mut options: RequestOptions) -> RequestOptions {
        let has_method = options
            .method
            .as_deref()
            .is_some_and(|method| !method.trim().is_empty());
        if !has_method {
            options.method = Some(DEFAULT_METHOD.to_string());
        }
        if options.body.is_none() {
            options.body = Some(BodyOptions::default());
        }
        if options.assertions.is_none() {
            options.assertions = Some(AssertionsOptions::default());
        }
        options
    }

    fn from_options(options: RequestOptions, ctx: &mut BuildContext) -> Self {
        let id = options.id.unwrap_or_else(|| ctx.next_id());
        let method = options
            .method
            .as_deref()
            .and_then(HttpMethod::parse)
            .unwrap_or_default();

        Self {
            id,
            name: options.name,
            url: options.url,
            method,
            body: construct(options.body, ctx),
            assertions: construct(options.assertions, ctx),
            parameters: construct_all(options.parameters, ctx),
            headers: construct_all(options.headers, ctx),
            extract: Vec::new(),
        }
    }
}

impl Default for Request {
    fn default() -> Self {
        construct(None, &mut BuildContext::new())
    }
}
