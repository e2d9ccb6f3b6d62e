//! Template rendering and the request factory.
mod factory;
mod template;


pub use factory::{BuiltRequest, RequestFactory, build_requests, parse_header_block};
pub use template::Template;
