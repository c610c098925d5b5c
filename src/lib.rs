//! Client SDK for the Wolfram|Alpha web APIs.
//!
//! Four endpoint clients are provided: [`api::FullResultsClient`] for the
//! Full Results API (typed pod documents, assumptions, pod states),
//! [`api::SimpleClient`] for single-image results, and
//! [`api::ShortAnswersClient`] / [`api::SpokenResultsClient`] for one-line
//! text results. Build them through [`api::ClientFactory`] or directly from
//! an [`api::ClientConfig`].

pub mod api;
pub mod error;

pub use error::{Result, WolframError};
