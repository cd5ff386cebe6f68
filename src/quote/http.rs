//! Quote source backed by a JSON web service.
//!
//! Accepted response bodies are a single object or a non-empty array whose
//! first element is used:
//!
//! ```json
//! {"text": "...", "author": "..."}
//! [{"q": "...", "a": "..."}]
//! ```
//!
//! `content` and `quote` are also recognized for the text. Anything else
//! (transport failure, non-success status, unexpected body) is reported as
//! [`QuoteFetchError::Unavailable`].

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

use super::{Quote, QuoteFetchError, QuoteSource};
use crate::common::constants::USER_AGENT;

#[derive(Debug, Deserialize)]
struct QuotePayload {
    #[serde(alias = "content", alias = "quote", alias = "q")]
    text: String,
    #[serde(default, alias = "a")]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteResponse {
    Single(QuotePayload),
    List(Vec<QuotePayload>),
}

/// Parse a response body into a quote.
pub fn parse_quote_payload(body: &str) -> Result<Quote, QuoteFetchError> {
    let response: QuoteResponse = serde_json::from_str(body)
        .map_err(|e| QuoteFetchError::unavailable(format!("malformed payload: {e}")))?;

    let payload = match response {
        QuoteResponse::Single(payload) => payload,
        QuoteResponse::List(list) => list
            .into_iter()
            .next()
            .ok_or_else(|| QuoteFetchError::unavailable("empty quote list"))?,
    };

    let quote = Quote::new(payload.text, payload.author.unwrap_or_default());
    if quote.text().is_empty() {
        return Err(QuoteFetchError::unavailable("quote text is empty"));
    }
    Ok(quote)
}

pub struct HttpQuoteSource {
    client: Client,
    url: String,
}

impl HttpQuoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch_quote(&self) -> Result<Quote, QuoteFetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(QuoteFetchError::unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteFetchError::unavailable(format!("HTTP {status}")));
        }

        let body = response.text().map_err(QuoteFetchError::unavailable)?;
        parse_quote_payload(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let quote =
            parse_quote_payload(r#"{"text": "Simplicity is prerequisite.", "author": "Dijkstra"}"#)
                .unwrap();
        assert_eq!(quote.text(), "Simplicity is prerequisite.");
        assert_eq!(quote.author(), "Dijkstra");
    }

    #[test]
    fn test_parse_array_with_short_keys() {
        let body = r#"[{"q": "Well begun is half done.", "a": "Aristotle", "h": "<p></p>"}]"#;
        let quote = parse_quote_payload(body).unwrap();
        assert_eq!(quote.text(), "Well begun is half done.");
        assert_eq!(quote.author(), "Aristotle");
    }

    #[test]
    fn test_parse_content_key_and_missing_author() {
        let quote = parse_quote_payload(r#"{"content": "Keep going."}"#).unwrap();
        assert_eq!(quote.author(), "Unknown");
    }

    #[test]
    fn test_malformed_payloads_are_unavailable() {
        for body in [
            "",
            "<html>502 Bad Gateway</html>",
            "[]",
            r#"{"author": "Nobody"}"#,
            r#"{"text": "   ", "author": "Blank"}"#,
        ] {
            let error = parse_quote_payload(body).unwrap_err();
            assert!(matches!(error, QuoteFetchError::Unavailable { .. }), "{body}");
        }
    }

    #[test]
    fn test_unreachable_service_is_unavailable() {
        // Port 9 (discard) on localhost is not expected to speak HTTP
        let source =
            HttpQuoteSource::new("http://127.0.0.1:9/quote", Duration::from_millis(500)).unwrap();
        assert!(source.fetch_quote().is_err());
    }
}
