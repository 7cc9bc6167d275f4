use serde::Deserialize;

use super::body::KeyValueOptions;
use super::request::RequestOptions;
use super::{BuildContext, Config, EntityId, KeyValue, Request, construct, construct_all};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScenarioOptions {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub parameters: Option<Vec<KeyValueOptions>>,
    pub headers: Option<Vec<KeyValueOptions>>,
    pub requests: Option<Vec<RequestOptions>>,
}

/// A named group of requests, compiled into one thread group.
///
/// Scenario-level url, parameters and headers are kept in the model but are
/// not applied to the requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: EntityId,
    pub name: Option<String>,
    pub url: Option<String>,
    pub parameters: Vec<KeyValue>,
    pub headers: Vec<KeyValue>,
    pub requests: Vec<Request>,
}

impl Scenario {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl Config for Scenario {
    type Options = ScenarioOptions;

    fn init_options(mut options: ScenarioOptions) -> ScenarioOptions {
        if options.requests.as_ref().is_none_or(Vec::is_empty) {
            options.requests = Some(vec![RequestOptions::default()]);
        }
        options
    }

    fn from_options(options: ScenarioOptions, ctx: &mut BuildContext) -> Self {
        let id = options.id.unwrap_or_else(|| ctx.next_id());

        Self {
            id,
            name: options.name,
            url: options.url,
            parameters: construct_all(options.parameters, ctx),
            headers: construct_all(options.headers, ctx),
            requests: construct_all(options.requests, ctx),
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        construct(None, &mut BuildContext::new())
    }
}
