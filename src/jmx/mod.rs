//! # JMeter Test Plans
//!
//! Turns the scenario model into a `.jmx` document: URL decomposition for
//! samplers, typed JMeter elements, and the compiler that assembles them.

pub mod element;
pub mod elements;
pub mod endpoint;
pub mod generator;
pub mod settings;

pub use element::{Element, TestElement};
pub use endpoint::Endpoint;
pub use generator::{JmxGenerator, XML_HEADER};
pub use settings::JmxSettings;
