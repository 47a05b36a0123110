//! reqwest-based talk page client
//!
//! Direct implementation of the `TalkClient` trait against the MediaWiki
//! action API. Every call hits the network.

use crate::client::TalkClient;
use crate::types::{DiscussionToolsInfoResponse, ThreadItem};
use crate::DEFAULT_HOST;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use std::time::Duration;

/// User agent sent when none is configured
const DEFAULT_USER_AGENT: &str = concat!("talk-topic/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`HttpTalkClient`]
#[derive(Debug, Clone)]
pub struct HttpClientOptions {
    /// Wiki host, e.g. "en.wikipedia.org"
    pub host: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Talk page client using the DiscussionTools page info endpoint
#[derive(Debug, Clone)]
pub struct HttpTalkClient {
    http: reqwest::Client,
    host: String,
}

impl HttpTalkClient {
    /// Create a new client with the given options
    pub fn new(options: HttpClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            host: options.host,
        })
    }

    /// The wiki host this client talks to
    pub fn host(&self) -> &str {
        &self.host
    }

    fn api_url(&self) -> String {
        format!("https://{}/w/api.php", self.host)
    }
}

#[async_trait]
impl TalkClient for HttpTalkClient {
    async fn fetch_topics(&self, page_title: &str) -> Result<Vec<ThreadItem>> {
        debug!("Fetching topics for {} on {}", page_title, self.host);

        let response = self
            .http
            .get(self.api_url())
            .query(&[
                ("action", "discussiontoolspageinfo"),
                ("prop", "threaditemshtml"),
                ("format", "json"),
                ("formatversion", "2"),
                ("page", page_title),
            ])
            .send()
            .await
            .with_context(|| format!("Request for {} failed", page_title))?;

        check_status(page_title, response.status())?;

        let body: DiscussionToolsInfoResponse = response
            .json()
            .await
            .with_context(|| format!("Invalid topic payload for {}", page_title))?;

        let threads = into_topics(page_title, body)?;
        debug!("Fetched {} topics for {}", threads.len(), page_title);
        Ok(threads)
    }
}

fn check_status(page_title: &str, status: StatusCode) -> Result<()> {
    if !status.is_success() {
        anyhow::bail!("Fetching {} failed with status {}", page_title, status);
    }
    Ok(())
}

/// Unwrap the topics of a decoded response, surfacing an API `error` object.
///
/// MediaWiki reports request errors such as a missing page with a 200 status
/// and an `error` member instead of page info.
fn into_topics(page_title: &str, body: DiscussionToolsInfoResponse) -> Result<Vec<ThreadItem>> {
    if let Some(error) = body.error {
        return Err(anyhow::Error::new(error))
            .with_context(|| format!("API rejected request for {}", page_title));
    }
    Ok(body.into_threads())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MwError;
    use pretty_assertions::assert_eq;

    fn decode(json: &str) -> DiscussionToolsInfoResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = HttpClientOptions::default();
        assert_eq!(options.host, DEFAULT_HOST);
        assert!(options.user_agent.starts_with("talk-topic/"));
        assert_eq!(options.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_api_url_uses_host() {
        let client = HttpTalkClient::new(HttpClientOptions {
            host: "de.wikipedia.org".to_string(),
            ..HttpClientOptions::default()
        })
        .unwrap();
        assert_eq!(client.host(), "de.wikipedia.org");
        assert_eq!(client.api_url(), "https://de.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_check_status() {
        assert!(check_status("Talk:Example", StatusCode::OK).is_ok());

        let err = check_status("Talk:Example", StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fetching Talk:Example failed with status 503 Service Unavailable"
        );
    }

    #[test]
    fn test_into_topics_surfaces_api_error() {
        let body = decode(
            r#"{
                "error": {
                    "code": "missingtitle",
                    "info": "The page you specified doesn't exist."
                }
            }"#,
        );

        let err = into_topics("Talk:Nowhere", body).unwrap_err();
        assert_eq!(err.to_string(), "API rejected request for Talk:Nowhere");
        assert_eq!(
            format!("{err:#}"),
            "API rejected request for Talk:Nowhere: missingtitle: The page you specified doesn't exist."
        );
        let source = err.downcast_ref::<MwError>().unwrap();
        assert_eq!(source.code, "missingtitle");
    }

    #[test]
    fn test_into_topics_returns_threads() {
        let body = decode(
            r#"{
                "discussiontoolspageinfo": {
                    "threaditemshtml": [
                        {"type": "heading", "id": "h-First", "headingLevel": 2, "replies": []},
                        {"type": "heading", "id": "h-Second", "headingLevel": 2}
                    ]
                }
            }"#,
        );

        let topics = into_topics("Talk:Example", body).unwrap();
        let ids: Vec<&str> = topics.iter().map(|topic| topic.id.as_str()).collect();
        assert_eq!(ids, vec!["h-First", "h-Second"]);
    }

    #[test]
    fn test_into_topics_without_page_info() {
        let topics = into_topics("Talk:Example", decode("{}")).unwrap();
        assert!(topics.is_empty());
    }
}
