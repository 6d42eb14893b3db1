//! Top-headlines HTTP client.

use super::{HeadlineSource, NewsError};
use crate::config::NewsConfig;
use serde::Deserialize;
use tracing::debug;

/// Response body of the top-headlines endpoint.
#[derive(Debug, Deserialize)]
struct TopHeadlines {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
}

/// Extract the article titles from a response body.
///
/// A missing `articles` list counts as empty and articles without a title
/// are skipped. A body with `"status": "error"` is an [`NewsError::Api`].
pub fn parse_titles(body: &str) -> Result<Vec<String>, NewsError> {
    let parsed: TopHeadlines = serde_json::from_str(body)?;
    if parsed.status.as_deref() == Some("error") {
        return Err(NewsError::Api {
            code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
            message: parsed.message.unwrap_or_default(),
        });
    }
    Ok(parsed.articles.into_iter().filter_map(|a| a.title).collect())
}

/// Blocking client for a NewsAPI-style top-headlines endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    agent: ureq::Agent,
    config: NewsConfig,
}

impl NewsApiClient {
    /// Build a client. Only a configured timeout bounds a request.
    pub fn new(config: NewsConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            config,
        }
    }

    /// Query parameters in request order. The API key is left out when
    /// none is configured.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("category", self.config.category.as_str()),
            ("q", self.config.query.as_str()),
            ("language", self.config.language.as_str()),
        ];
        if let Some(key) = &self.config.api_key {
            pairs.push(("apiKey", key.as_str()));
        }
        pairs
    }
}

impl HeadlineSource for NewsApiClient {
    fn fetch_titles(&self) -> Result<Vec<String>, NewsError> {
        let mut request = self.agent.get(&self.config.endpoint);
        for (name, value) in self.query_pairs() {
            request = request.query(name, value);
        }

        debug!(endpoint = %self.config.endpoint, "news:requesting headlines");
        let response = request.call().map_err(Box::new)?;
        let body = response.into_string()?;
        parse_titles(&body)
    }
}
