use serde::Deserialize;

use super::{BuildContext, Config, construct_all, non_empty};

/// Encoding of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    KeyValue,
    /// Treated exactly like `Raw` when compiled.
    FormData,
    Raw,
}

impl BodyType {
    pub const ALL: [BodyType; 3] = [BodyType::KeyValue, BodyType::FormData, BodyType::Raw];

    pub fn as_str(self) -> &'static str {
        match self {
            BodyType::KeyValue => "KeyValue",
            BodyType::FormData => "Form Data",
            BodyType::Raw => "Raw",
        }
    }

    /// Unknown labels yield `None`, which compiles through the raw path.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyValueOptions {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// A name/value pair used for parameters, headers and form bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValue {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl KeyValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

impl Config for KeyValue {
    type Options = KeyValueOptions;

    fn from_options(options: KeyValueOptions, _ctx: &mut BuildContext) -> Self {
        Self {
            name: options.name,
            value: options.value,
        }
    }

    fn is_valid(&self) -> bool {
        non_empty(&self.name) || non_empty(&self.value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyOptions {
    #[serde(rename = "type")]
    pub body_type: Option<String>,
    pub raw: Option<String>,
    pub kvs: Option<Vec<KeyValueOptions>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub body_type: Option<BodyType>,
    pub raw: Option<String>,
    pub kvs: Vec<KeyValue>,
}

impl Body {
    pub fn is_kv(&self) -> bool {
        self.body_type == Some(BodyType::KeyValue)
    }

    pub fn raw(&self) -> &str {
        self.raw.as_deref().unwrap_or_default()
    }
}

impl Config for Body {
    type Options = BodyOptions;

    fn from_options(options: BodyOptions, ctx: &mut BuildContext) -> Self {
        Self {
            body_type: options.body_type.as_deref().and_then(BodyType::parse),
            raw: options.raw,
            kvs: construct_all(options.kvs, ctx),
        }
    }

    fn is_valid(&self) -> bool {
        if self.is_kv() {
            self.kvs.iter().any(KeyValue::is_valid)
        } else {
            non_empty(&self.raw)
        }
    }
}
