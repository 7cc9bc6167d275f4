//! Compiles a [`Test`] into a JMeter test-plan document.
//!
//! Scenarios become thread groups and requests become HTTP samplers. Invalid
//! headers, parameters, body entries and assertions are dropped rather than
//! reported, so any model yields a well-formed plan.

use tracing::{debug, info};

use super::element::{Element, TestElement};
use super::elements::{
    self, Argument, HttpSampler, assertion_condition, backend_listener, header_manager,
    jmeter_test_plan, test_plan, thread_group,
};
use super::endpoint::Endpoint;
use super::settings::JmxSettings;
use crate::model::{Config, Regex, RegexSubject, Request, Scenario, Test, valid_only};

pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

pub struct JmxGenerator {
    document: Element,
}

impl JmxGenerator {
    pub fn new(test: &Test, settings: &JmxSettings) -> Self {
        let mut plan = test_plan(test.name());
        for scenario in &test.scenario_definition {
            plan.put(compile_scenario(scenario, settings));
        }

        info!(
            test = test.name(),
            scenarios = test.scenario_definition.len(),
            "Compiled test plan"
        );

        Self {
            document: jmeter_test_plan(settings, plan),
        }
    }

    /// The `<jmeterTestPlan>` element tree.
    pub fn document(&self) -> &Element {
        &self.document
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_HEADER);
        xml.push_str(&self.document.to_xml());
        xml
    }
}

fn compile_scenario(scenario: &Scenario, settings: &JmxSettings) -> TestElement {
    let mut group = thread_group(scenario.name());
    for request in &scenario.requests {
        group.put(compile_request(request));
    }
    group.put(backend_listener(&settings.backend_listener_class));

    debug!(
        scenario = scenario.name(),
        requests = scenario.requests.len(),
        "Compiled thread group"
    );
    group
}

fn compile_request(request: &Request) -> TestElement {
    let endpoint = Endpoint::from_request(request);
    let mut sampler = HttpSampler::new(request.name(), &endpoint);

    add_request_header(&mut sampler, request);
    if request.method.is_get() {
        add_request_arguments(&mut sampler, request);
    } else {
        add_request_body(&mut sampler, request);
    }
    add_request_assertion(&mut sampler, request);

    sampler.into_element()
}

fn add_request_header(sampler: &mut HttpSampler, request: &Request) {
    let headers = valid_only(&request.headers);
    if !headers.is_empty() {
        let name = format!("{} Headers", request.name());
        sampler.put_request_header(header_manager(&name, &headers));
    }
}

fn add_request_arguments(sampler: &mut HttpSampler, request: &Request) {
    let arguments: Vec<Argument> = valid_only(&request.parameters)
        .into_iter()
        .map(Argument::from)
        .collect();
    if !arguments.is_empty() {
        sampler.add_request_arguments(&arguments);
    }
}

fn add_request_body(sampler: &mut HttpSampler, request: &Request) {
    let body = &request.body;
    if body.is_kv() {
        let arguments: Vec<Argument> = valid_only(&body.kvs)
            .into_iter()
            .map(Argument::from)
            .collect();
        sampler.add_request_body(&arguments, false);
    } else {
        let raw = Argument {
            name: String::new(),
            value: body.raw().to_string(),
        };
        sampler.add_request_body(&[raw], true);
    }
}

fn add_request_assertion(sampler: &mut HttpSampler, request: &Request) {
    let assertions = &request.assertions;
    for regex in valid_only(&assertions.regex) {
        match regex_assertion(regex) {
            Some(assertion) => sampler.put_response_assertion(assertion),
            None => debug!(
                request = request.name(),
                subject = regex.subject.as_deref(),
                "Skipping regex assertion with unknown subject"
            ),
        }
    }

    let duration = &assertions.duration;
    if let Some(value) = duration.value.filter(|_| duration.is_valid()) {
        sampler.put_duration_assertion(duration.kind().as_str(), value);
    }
}

fn regex_assertion(regex: &Regex) -> Option<TestElement> {
    let name = regex.description.as_deref().unwrap_or_default();
    // Always a full match; the expression itself carries any alternation.
    let test_type = assertion_condition::MATCH;
    let value = regex.expression.as_deref().unwrap_or_default();

    let assertion = match regex.subject_kind()? {
        RegexSubject::ResponseCode => elements::response_code_assertion(name, test_type, value),
        RegexSubject::ResponseData => elements::response_data_assertion(name, test_type, value),
        RegexSubject::ResponseHeaders => {
            elements::response_headers_assertion(name, test_type, value)
        }
    };
    Some(assertion)
}
