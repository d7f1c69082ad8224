use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::config::Config;

use super::types::*;
use super::ObjectApi;

/// Page size requested on list calls; Nautobot's default MAX_PAGE_SIZE.
const PAGE_SIZE: &str = "1000";

/// Nautobot API client
pub struct NautobotClient {
    base_url: String,
    token: String,
    api_version: Option<String>,
    client: Client,
}

impl NautobotClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(!config.validate_certs)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            api_version: config.api_version.clone(),
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn object_url(&self, path: &str, id: &str) -> String {
        format!("{}{}/", self.api_url(path), id)
    }

    fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    fn accept_header(&self) -> String {
        match &self.api_version {
            Some(version) => format!("application/json; version={}", version),
            None => "application/json".to_string(),
        }
    }

    /// Attach auth and content negotiation headers
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", self.auth_header())
            .header("Accept", self.accept_header())
    }

    /// Turn a non-2xx response into an error carrying Nautobot's body
    async fn check(resp: Response, action: &str) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(anyhow::anyhow!("Nautobot API {} error {}: {}", action, status, body))
    }

    /// Test connectivity to Nautobot
    pub async fn test_connection(&self) -> bool {
        match self
            .authed(self.client.get(self.api_url("/status/")))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Run a GraphQL query and return its `data` member
    pub async fn graphql(&self, query: &str, variables: Option<&Value>) -> Result<Value> {
        tracing::debug!("POST /api/graphql/");
        let resp = self
            .authed(self.client.post(self.api_url("/graphql/")))
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?;

        // GraphQL reports query errors in the body, often with a 400 status
        let status = resp.status();
        let text = resp.text().await?;
        let parsed: GraphQLResponse = serde_json::from_str(&text)
            .map_err(|_| anyhow::anyhow!("Nautobot GraphQL error {}: {}", status, text))?;
        graphql_data(parsed)
    }
}

/// Extract `data`, or fail with the joined GraphQL error messages
pub(crate) fn graphql_data(resp: GraphQLResponse) -> Result<Value> {
    if let Some(errors) = resp.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(anyhow::anyhow!("GraphQL query failed: {}", messages.join("; ")));
    }
    Ok(resp.data.unwrap_or(Value::Null))
}

#[async_trait]
impl ObjectApi for NautobotClient {
    async fn list(&self, path: &str, filter: &Filter) -> Result<Vec<Value>> {
        tracing::debug!("GET {} {:?}", path, filter);
        let mut query: Filter = filter.clone();
        query.push(("limit".to_string(), PAGE_SIZE.to_string()));

        let resp = self
            .authed(self.client.get(self.api_url(path)))
            .query(&query)
            .send()
            .await?;
        let mut page: PaginatedResponse<Value> = Self::check(resp, "list").await?.json().await?;
        let mut results = std::mem::take(&mut page.results);

        // `next` is an absolute URL that already carries the filter
        while let Some(next) = page.next.take() {
            let resp = self.authed(self.client.get(next.as_str())).send().await?;
            page = Self::check(resp, "list").await?.json().await?;
            results.append(&mut page.results);
        }

        Ok(results)
    }

    async fn create(&self, path: &str, body: &Map<String, Value>) -> Result<Value> {
        tracing::debug!("POST {}", path);
        let resp = self
            .authed(self.client.post(self.api_url(path)))
            .json(body)
            .send()
            .await?;
        Ok(Self::check(resp, "create").await?.json().await?)
    }

    async fn update(&self, path: &str, id: &str, body: &Map<String, Value>) -> Result<Value> {
        tracing::debug!("PATCH {}{}/", path, id);
        let resp = self
            .authed(self.client.patch(self.object_url(path, id)))
            .json(body)
            .send()
            .await?;
        Ok(Self::check(resp, "update").await?.json().await?)
    }

    async fn delete(&self, path: &str, id: &str) -> Result<()> {
        tracing::debug!("DELETE {}{}/", path, id);
        let resp = self
            .authed(self.client.delete(self.object_url(path, id)))
            .send()
            .await?;
        Self::check(resp, "delete").await?;
        Ok(())
    }
}
