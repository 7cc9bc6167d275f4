use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAN_VERSION: &str = "1.2";
pub const DEFAULT_PLAN_PROPERTIES: &str = "5.0";
pub const DEFAULT_JMETER_VERSION: &str = "5.2.1";
pub const DEFAULT_BACKEND_LISTENER_CLASS: &str = "io.metersphere.api.jmeter.APIBackendListenerClient";

/// Fixed identity of the generated document and its result collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JmxSettings {
    pub plan_version: String,
    pub plan_properties: String,
    pub jmeter_version: String,
    pub backend_listener_class: String,
}

impl Default for JmxSettings {
    fn default() -> Self {
        Self {
            plan_version: DEFAULT_PLAN_VERSION.to_string(),
            plan_properties: DEFAULT_PLAN_PROPERTIES.to_string(),
            jmeter_version: DEFAULT_JMETER_VERSION.to_string(),
            backend_listener_class: DEFAULT_BACKEND_LISTENER_CLASS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let settings: JmxSettings =
            serde_json::from_str(r#"{"backendListenerClass":"com.example.Collector"}"#).unwrap();
        assert_eq!(settings.backend_listener_class, "com.example.Collector");
        assert_eq!(settings.jmeter_version, DEFAULT_JMETER_VERSION);
        assert_eq!(settings.plan_version, DEFAULT_PLAN_VERSION);
    }
}
