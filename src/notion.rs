use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Settings;
use crate::props::Properties;

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("notion returned {status} for database {database}: {body}")]
    Status {
        database: String,
        status: u16,
        body: String,
    },
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

/// One database row.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Vec<Sort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub timestamp: &'static str,
    pub direction: &'static str,
}

impl Sort {
    pub fn created_ascending() -> Self {
        Sort {
            timestamp: "created_time",
            direction: "ascending",
        }
    }
}

/// Anything that can answer a single database query page.
pub trait QuerySource {
    fn query(&self, database_id: &str, body: &QueryBody) -> Result<QueryResponse>;
}

pub struct NotionClient {
    http: Client,
    api_url: String,
}

impl NotionClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.token))
            .map_err(|_| NotionError::InvalidHeader("Authorization"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static("notion-version"),
            HeaderValue::from_str(&settings.version)
                .map_err(|_| NotionError::InvalidHeader("Notion-Version"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to construct reqwest client")?;

        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }
}

impl QuerySource for NotionClient {
    fn query(&self, database_id: &str, body: &QueryBody) -> Result<QueryResponse> {
        let url = format!("{}/databases/{}/query", self.api_url, database_id);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .with_context(|| format!("notion query failed for database {}", database_id))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(NotionError::Status {
                database: database_id.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        response
            .json::<QueryResponse>()
            .with_context(|| format!("failed to decode query response for database {}", database_id))
    }
}

/// Fetch every page of a database query, following `next_cursor`.
pub fn query_all<S: QuerySource + ?Sized>(
    source: &S,
    database_id: &str,
    sorts: Option<Vec<Sort>>,
) -> Result<Vec<Page>> {
    let mut body = QueryBody {
        sorts,
        start_cursor: None,
    };
    let mut pages = Vec::new();

    loop {
        let response = source.query(database_id, &body)?;
        debug!(
            "database {}: page of {} rows (has_more={})",
            database_id,
            response.results.len(),
            response.has_more
        );
        pages.extend(response.results);

        match response.next_cursor {
            Some(cursor) if response.has_more => body.start_cursor = Some(cursor),
            _ => break,
        }
    }

    info!("database {}: {} rows", database_id, pages.len());
    Ok(pages)
}

// ── Tests ──
