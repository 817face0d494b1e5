mod rest;

pub use rest::{RestClient, RestClientConfig, RestClientError, RestResource};
