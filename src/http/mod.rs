//! Rate gate and the reqwest-backed transport.
mod client;
mod rate;


pub use client::HttpTransport;
pub use rate::RateGate;
