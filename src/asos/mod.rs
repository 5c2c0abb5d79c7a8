//! Access to one-minute ASOS observations: request URLs, downloads and row extraction.

pub mod error;
pub mod extractor;
pub mod loader;
pub mod observation;
pub mod request_url;
pub mod source;
pub mod window;
