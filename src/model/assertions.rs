//! Response assertions attached to a request.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{BuildContext, Config, construct, construct_all, non_empty};

/// Kind tag carried by every assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionKind {
    Text,
    Regex,
    ResponseTime,
}

impl AssertionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssertionKind::Text => "Text",
            AssertionKind::Regex => "Regex",
            AssertionKind::ResponseTime => "Response Time",
        }
    }
}

/// Part of the response a regex assertion is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexSubject {
    ResponseCode,
    ResponseHeaders,
    ResponseData,
}

impl RegexSubject {
    pub const ALL: [RegexSubject; 3] = [
        RegexSubject::ResponseCode,
        RegexSubject::ResponseHeaders,
        RegexSubject::ResponseData,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegexSubject::ResponseCode => "Response Code",
            RegexSubject::ResponseHeaders => "Response Headers",
            RegexSubject::ResponseData => "Response Data",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.as_str() == raw)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextOptions {
    pub subject: Option<String>,
    pub condition: Option<String>,
    pub value: Option<String>,
}

/// Plain-text assertion. Configurable, but not compiled into test plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub subject: Option<String>,
    pub condition: Option<String>,
    pub value: Option<String>,
}

impl Text {
    pub fn kind(&self) -> AssertionKind {
        AssertionKind::Text
    }
}

impl Config for Text {
    type Options = TextOptions;

    fn from_options(options: TextOptions, _ctx: &mut BuildContext) -> Self {
        Self {
            subject: options.subject,
            condition: options.condition,
            value: options.value,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegexOptions {
    pub subject: Option<String>,
    pub expression: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regex {
    pub subject: Option<String>,
    pub expression: Option<String>,
    pub description: Option<String>,
}

impl Regex {
    pub fn kind(&self) -> AssertionKind {
        AssertionKind::Regex
    }

    /// The subject as a known variant, if it is one.
    pub fn subject_kind(&self) -> Option<RegexSubject> {
        self.subject.as_deref().and_then(RegexSubject::parse)
    }
}

impl Config for Regex {
    type Options = RegexOptions;

    fn from_options(options: RegexOptions, _ctx: &mut BuildContext) -> Self {
        Self {
            subject: options.subject,
            expression: options.expression,
            description: options.description,
        }
    }

    fn is_valid(&self) -> bool {
        non_empty(&self.subject) && non_empty(&self.expression)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseTimeOptions {
    #[serde(deserialize_with = "deserialize_threshold")]
    pub value: Option<u64>,
}

/// Maximum response duration in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTime {
    pub value: Option<u64>,
}

impl ResponseTime {
    pub fn kind(&self) -> AssertionKind {
        AssertionKind::ResponseTime
    }
}

impl Config for ResponseTime {
    type Options = ResponseTimeOptions;

    fn from_options(options: ResponseTimeOptions, _ctx: &mut BuildContext) -> Self {
        Self {
            value: options.value,
        }
    }

    fn is_valid(&self) -> bool {
        self.value.is_some_and(|value| value > 0)
    }
}

/// Accepts a JSON number or a numeric string; anything else is unset.
/// Fractional milliseconds round up, so any positive threshold stays set.
fn deserialize_threshold<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let threshold = match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(whole_millis)),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok().and_then(whole_millis),
        _ => None,
    };
    Ok(threshold)
}

fn whole_millis(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.ceil() as u64)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssertionsOptions {
    pub text: Option<Vec<TextOptions>>,
    pub regex: Option<Vec<RegexOptions>>,
    pub duration: Option<ResponseTimeOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assertions {
    pub text: Vec<Text>,
    pub regex: Vec<Regex>,
    pub duration: ResponseTime,
}

impl Config for Assertions {
    type Options = AssertionsOptions;

    fn init_options(mut options: AssertionsOptions) -> AssertionsOptions {
        if options.duration.is_none() {
            options.duration = Some(ResponseTimeOptions::default());
        }
        options
    }

    fn from_options(options: AssertionsOptions, ctx: &mut BuildContext) -> Self {
        Self {
            duration: construct(options.duration, ctx),
            text: construct_all(options.text, ctx),
            regex: construct_all(options.regex, ctx),
        }
    }
}
