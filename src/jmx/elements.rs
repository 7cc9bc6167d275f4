//! Typed constructors for the JMeter elements a test plan is made of.

use super::element::{
    Element, TestElement, bool_prop, collection_prop, element_prop, int_prop, string_prop,
};
use super::endpoint::Endpoint;
use super::settings::JmxSettings;
use crate::model::KeyValue;

/// Bit flags understood by `Assertion.test_type`.
pub mod assertion_condition {
    pub const MATCH: i64 = 1;
    pub const CONTAINS: i64 = 1 << 1;
    pub const NOT: i64 = 1 << 2;
    pub const EQUALS: i64 = 1 << 3;
    pub const SUBSTRING: i64 = 1 << 4;
    pub const OR: i64 = 1 << 5;
}

/// One entry of an HTTP argument list. Raw bodies are a single entry with
/// an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub value: String,
}

impl From<&KeyValue> for Argument {
    fn from(kv: &KeyValue) -> Self {
        Self {
            name: kv.name().to_string(),
            value: kv.value().to_string(),
        }
    }
}

/// `<jmeterTestPlan>` document root holding the top-level hash tree.
pub fn jmeter_test_plan(settings: &JmxSettings, test_plan: TestElement) -> Element {
    let mut root = Element::new("jmeterTestPlan")
        .with_attr("version", &settings.plan_version)
        .with_attr("properties", &settings.plan_properties)
        .with_attr("jmeter", &settings.jmeter_version);

    let mut tree = Element::new("hashTree");
    test_plan.write_into(&mut tree);
    root.add(tree);
    root
}

pub fn test_plan(name: &str) -> TestElement {
    let mut plan = TestElement::new("TestPlan", "TestPlanGui", "TestPlan", name);
    let mut variables = element_prop("TestPlan.user_defined_variables", "Arguments")
        .with_attr("guiclass", "ArgumentsPanel")
        .with_attr("testclass", "Arguments")
        .with_attr("testname", "User Defined Variables")
        .with_attr("enabled", "true");
    variables.add(collection_prop("Arguments.arguments", Vec::new()));

    plan.prop(string_prop("TestPlan.comments", ""))
        .prop(bool_prop("TestPlan.functional_mode", false))
        .prop(bool_prop("TestPlan.serialize_threadgroups", false))
        .prop(variables)
        .prop(string_prop("TestPlan.user_define_classpath", ""));
    plan
}

pub fn thread_group(name: &str) -> TestElement {
    let mut group = TestElement::new("ThreadGroup", "ThreadGroupGui", "ThreadGroup", name);
    let mut controller = element_prop("ThreadGroup.main_controller", "LoopController")
        .with_attr("guiclass", "LoopControlPanel")
        .with_attr("testclass", "LoopController")
        .with_attr("testname", "Loop Controller")
        .with_attr("enabled", "true");
    controller.add(bool_prop("LoopController.continue_forever", false));
    controller.add(string_prop("LoopController.loops", "1"));

    group
        .prop(string_prop("ThreadGroup.on_sample_error", "continue"))
        .prop(controller)
        .prop(string_prop("ThreadGroup.num_threads", "1"))
        .prop(string_prop("ThreadGroup.ramp_time", "1"))
        .prop(bool_prop("ThreadGroup.scheduler", false))
        .prop(string_prop("ThreadGroup.duration", ""))
        .prop(string_prop("ThreadGroup.delay", ""));
    group
}

/// `HTTPSamplerProxy` under construction.
#[derive(Debug, Clone)]
pub struct HttpSampler {
    inner: TestElement,
}

impl HttpSampler {
    pub fn new(name: &str, endpoint: &Endpoint) -> Self {
        let mut inner =
            TestElement::new("HTTPSamplerProxy", "HttpTestSampleGui", "HTTPSamplerProxy", name);
        inner
            .prop(string_prop("HTTPSampler.domain", endpoint.hostname.as_str()))
            .prop(string_prop("HTTPSampler.port", endpoint.port.as_str()))
            .prop(string_prop("HTTPSampler.protocol", endpoint.protocol.as_str()))
            .prop(string_prop("HTTPSampler.contentEncoding", "UTF-8"))
            .prop(string_prop("HTTPSampler.path", endpoint.path.as_str()))
            .prop(string_prop("HTTPSampler.method", endpoint.method()))
            .prop(bool_prop("HTTPSampler.follow_redirects", true))
            .prop(bool_prop("HTTPSampler.auto_redirects", false))
            .prop(bool_prop("HTTPSampler.use_keepalive", true))
            .prop(bool_prop("HTTPSampler.DO_MULTIPART_POST", false))
            .prop(string_prop("HTTPSampler.embedded_url_re", ""))
            .prop(string_prop("HTTPSampler.connect_timeout", ""))
            .prop(string_prop("HTTPSampler.response_timeout", ""));
        Self { inner }
    }

    pub fn put_request_header(&mut self, header_manager: TestElement) {
        self.inner.put(header_manager);
    }

    /// Query arguments of a GET request.
    pub fn add_request_arguments(&mut self, arguments: &[Argument]) {
        self.inner.prop(http_sampler_arguments(arguments));
    }

    /// Body of a non-GET request; `raw` marks a single unnamed raw entry.
    pub fn add_request_body(&mut self, arguments: &[Argument], raw: bool) {
        self.inner
            .prop(bool_prop("HTTPSampler.postBodyRaw", raw))
            .prop(http_sampler_arguments(arguments));
    }

    pub fn put_response_assertion(&mut self, assertion: TestElement) {
        self.inner.put(assertion);
    }

    pub fn put_duration_assertion(&mut self, name: &str, duration: u64) {
        self.inner.put(duration_assertion(name, duration));
    }

    pub fn into_element(self) -> TestElement {
        self.inner
    }
}

fn http_sampler_arguments(arguments: &[Argument]) -> Element {
    let items = arguments
        .iter()
        .map(|argument| {
            let mut item = element_prop(&argument.name, "HTTPArgument");
            item.add(bool_prop("HTTPArgument.always_encode", false));
            item.add(string_prop("Argument.name", argument.name.as_str()));
            item.add(string_prop("Argument.value", argument.value.as_str()));
            item.add(string_prop("Argument.metadata", "="));
            item.add(bool_prop("HTTPArgument.use_equals", true));
            item
        })
        .collect();

    let mut container = element_prop("HTTPsampler.Arguments", "Arguments")
        .with_attr("guiclass", "HTTPArgumentsPanel")
        .with_attr("testclass", "Arguments")
        .with_attr("enabled", "true");
    container.add(collection_prop("Arguments.arguments", items));
    container
}

pub fn header_manager(name: &str, headers: &[&KeyValue]) -> TestElement {
    let items = headers
        .iter()
        .map(|header| {
            let mut item = element_prop("", "Header");
            item.add(string_prop("Header.name", header.name()));
            item.add(string_prop("Header.value", header.value()));
            item
        })
        .collect();

    let mut manager = TestElement::new("HeaderManager", "HeaderPanel", "HeaderManager", name);
    manager.prop(collection_prop("HeaderManager.headers", items));
    manager
}

pub fn response_code_assertion(name: &str, test_type: i64, value: &str) -> TestElement {
    response_assertion(name, "Assertion.response_code", test_type, value)
}

pub fn response_data_assertion(name: &str, test_type: i64, value: &str) -> TestElement {
    response_assertion(name, "Assertion.response_data", test_type, value)
}

pub fn response_headers_assertion(name: &str, test_type: i64, value: &str) -> TestElement {
    response_assertion(name, "Assertion.response_headers", test_type, value)
}

fn response_assertion(name: &str, test_field: &str, test_type: i64, value: &str) -> TestElement {
    let mut assertion =
        TestElement::new("ResponseAssertion", "AssertionGui", "ResponseAssertion", name);
    let test_string = string_prop(&java_hash_code(value).to_string(), value);

    assertion
        .prop(collection_prop("Asserion.test_strings", vec![test_string]))
        .prop(string_prop("Assertion.custom_message", ""))
        .prop(string_prop("Assertion.test_field", test_field))
        .prop(bool_prop("Assertion.assume_success", false))
        .prop(int_prop("Assertion.test_type", test_type));
    assertion
}

pub fn duration_assertion(name: &str, duration: u64) -> TestElement {
    let mut assertion = TestElement::new(
        "DurationAssertion",
        "DurationAssertionGui",
        "DurationAssertion",
        name,
    );
    assertion.prop(string_prop("DurationAssertion.duration", duration.to_string()));
    assertion
}

pub fn backend_listener(classname: &str) -> TestElement {
    let mut listener = TestElement::new(
        "BackendListener",
        "BackendListenerGui",
        "BackendListener",
        "API Backend Listener",
    );
    let mut arguments = element_prop("arguments", "Arguments")
        .with_attr("guiclass", "ArgumentsPanel")
        .with_attr("testclass", "Arguments")
        .with_attr("enabled", "true");
    arguments.add(collection_prop("Arguments.arguments", Vec::new()));

    listener
        .prop(arguments)
        .prop(string_prop("classname", classname));
    listener
}

/// JMeter keys test strings by `String.hashCode()` of their value.
fn java_hash_code(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop_text<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
        element.prop(name).and_then(Element::text)
    }

    #[test]
    fn java_hash_matches_jvm() {
        assert_eq!(java_hash_code(""), 0);
        assert_eq!(java_hash_code("200"), 49586);
        assert_eq!(java_hash_code("hello"), 99162322);
    }

    #[test]
    fn root_carries_version_attributes() {
        let root = jmeter_test_plan(&JmxSettings::default(), test_plan("plan"));
        assert_eq!(root.attr("version"), Some("1.2"));
        assert_eq!(root.attr("properties"), Some("5.0"));
        assert_eq!(root.attr("jmeter"), Some("5.2.1"));
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].name(), "hashTree");
    }

    #[test]
    fn sampler_carries_endpoint() {
        let endpoint = Endpoint {
            method: Some(crate::http::HttpMethod::Post),
            protocol: "http".into(),
            hostname: "host".into(),
            port: "8080".into(),
            path: "/api".into(),
        };
        let sampler = HttpSampler::new("Login", &endpoint).into_element();
        let element = sampler.element();
        assert_eq!(element.attr("testname"), Some("Login"));
        assert_eq!(prop_text(element, "HTTPSampler.domain"), Some("host"));
        assert_eq!(prop_text(element, "HTTPSampler.port"), Some("8080"));
        assert_eq!(prop_text(element, "HTTPSampler.protocol"), Some("http"));
        assert_eq!(prop_text(element, "HTTPSampler.path"), Some("/api"));
        assert_eq!(prop_text(element, "HTTPSampler.method"), Some("POST"));
    }

    #[test]
    fn raw_body_sets_post_body_raw() {
        let mut sampler = HttpSampler::new("s", &Endpoint::default());
        sampler.add_request_body(
            &[Argument {
                name: String::new(),
                value: "{}".into(),
            }],
            true,
        );
        let sampler = sampler.into_element();
        assert_eq!(prop_text(sampler.element(), "HTTPSampler.postBodyRaw"), Some("true"));

        let values = sampler.element().descendants("stringProp");
        assert!(values
            .iter()
            .any(|p| p.attr("name") == Some("Argument.value") && p.text() == Some("{}")));
    }

    #[test]
    fn assertion_constructors_select_test_field() {
        let cases = [
            (response_code_assertion("c", assertion_condition::MATCH, "200"), "Assertion.response_code"),
            (response_data_assertion("d", assertion_condition::MATCH, "ok"), "Assertion.response_data"),
            (response_headers_assertion("h", assertion_condition::MATCH, "json"), "Assertion.response_headers"),
        ];
        for (assertion, field) in cases {
            let element = assertion.element();
            assert_eq!(prop_text(element, "Assertion.test_field"), Some(field));
            assert_eq!(prop_text(element, "Assertion.test_type"), Some("1"));
        }
    }

    #[test]
    fn header_manager_lists_headers_in_order() {
        let a = KeyValue::new("Accept", "*/*");
        let b = KeyValue::new("X-Id", "7");
        let manager = header_manager("Login Headers", &[&a, &b]);
        let names: Vec<_> = manager
            .element()
            .descendants("stringProp")
            .into_iter()
            .filter(|p| p.attr("name") == Some("Header.name"))
            .filter_map(Element::text)
            .collect();
        assert_eq!(names, vec!["Accept", "X-Id"]);
        assert_eq!(manager.element().attr("testname"), Some("Login Headers"));
    }

    #[test]
    fn backend_listener_has_classname() {
        let listener = backend_listener("com.example.Collector");
        assert_eq!(
            prop_text(listener.element(), "classname"),
            Some("com.example.Collector")
        );
    }
}
