pub mod method;

pub use method::HttpMethod;
