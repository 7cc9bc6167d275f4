//! Compiles API test scenarios into JMeter test plans.
//!
//! A [`Test`](model::Test) is built from loosely-shaped JSON options, then
//! compiled by [`JmxGenerator`](jmx::JmxGenerator) into a `.jmx` document.

pub mod cli;
pub mod error;
pub mod http;
pub mod jmx;
pub mod model;

pub use error::PlanError;
pub use jmx::{JmxGenerator, JmxSettings};
pub use model::{JmxExport, Test};
