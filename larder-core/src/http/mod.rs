//! Transport layer for the backend API.
//!
//! Every outgoing request is described by an [`ApiRequest`] and handed to an
//! [`HttpTransport`]. Resource clients never talk to reqwest directly, which
//! keeps them testable against [`MockTransport`].

mod client;
mod request;

pub use client::{
    HttpTransport, MockResponse, MockTransport, ReqwestTransport, ReqwestTransportBuilder,
};
pub use request::{ApiRequest, MultipartForm, RawResponse, RequestBody};

pub use reqwest::Method;
