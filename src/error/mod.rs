mod app;
mod config;
mod http;
mod input;
mod request;
mod transport;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use input::InputError;
pub use request::{BuildError, TemplateError, TemplateKind};
pub use transport::TransportError;
pub use validation::ValidationError;
