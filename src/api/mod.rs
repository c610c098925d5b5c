pub mod client;
pub mod deserializers;
pub mod full;
pub mod http_client;
pub mod params;
pub mod selector;
pub mod shortanswer;
pub mod simple;
pub mod spoken;
pub mod types;

pub use client::{ClientConfig, ClientFactory};
pub use full::{FullResultsClient, FullResultsRequest};
pub use selector::Selector;
pub use shortanswer::ShortAnswersClient;
pub use simple::{SimpleClient, SimpleRequest};
pub use spoken::SpokenResultsClient;

/// The Wolfram|Alpha web APIs covered by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiType {
    /// Full Results API: free-form queries answered with a document of pods
    Full,
    /// Simple API: one static image of the whole result page
    Simple,
    /// Short Answers API: a single line of plain text
    ShortAnswers,
    /// Spoken Results API: a single conversational sentence
    Spoken,
}

impl ApiType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" | "query" => Some(Self::Full),
            "simple" => Some(Self::Simple),
            "short" | "result" => Some(Self::ShortAnswers),
            "spoken" => Some(Self::Spoken),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Simple => "simple",
            Self::ShortAnswers => "short",
            Self::Spoken => "spoken",
        }
    }

    /// Fixed request path of this endpoint on the API host
    pub fn path(&self) -> &'static str {
        match self {
            Self::Full => "/v2/query",
            Self::Simple => "/v1/simple",
            Self::ShortAnswers => "/v1/result",
            Self::Spoken => "/v1/spoken",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Full => "Full Results API",
            Self::Simple => "Simple API",
            Self::ShortAnswers => "Short Answers API",
            Self::Spoken => "Spoken Results API",
        }
    }
}
