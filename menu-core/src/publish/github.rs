use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;

use crate::{
    config::Settings,
    error::StageError,
    http,
    model::{CreatedIssue, IssueRequest},
};

use super::IssuePublisher;

const GITHUB_API_URL: &str = "https://api.github.com";

/// Creates issues in one fixed repository.
#[derive(Debug, Clone)]
pub struct GitHubIssues {
    base_url: String,
    token: String,
    owner: String,
    repository: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

impl GitHubIssues {
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> reqwest::Result<Self> {
        Self::new_with_base_url(token, owner, repository, GITHUB_API_URL)
    }

    pub fn new_with_base_url(
        token: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
        base_url: impl Into<String>,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            owner: owner.into(),
            repository: repository.into(),
            http: http::client(http::REQUEST_TIMEOUT)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> reqwest::Result<Self> {
        Self::new(
            settings.github_token.as_str(),
            settings.owner.as_str(),
            settings.repository.as_str(),
        )
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/{}/issues", self.base_url, self.owner, self.repository)
    }

    fn build_request(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

#[async_trait]
impl IssuePublisher for GitHubIssues {
    async fn publish(&self, issue: &IssueRequest) -> Result<CreatedIssue, StageError> {
        tracing::debug!(owner = %self.owner, repository = %self.repository, "creating issue");

        let res = self
            .build_request(self.http.post(self.issues_url()))
            .json(issue)
            .send()
            .await
            .map_err(|e| StageError::Publish {
                status: None,
                message: e.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await;

        if !status.is_success() {
            let message = match body {
                Ok(body) if body.trim().is_empty() => status
                    .canonical_reason()
                    .unwrap_or("empty response body")
                    .to_string(),
                Ok(body) => serde_json::from_str::<GitHubErrorBody>(&body)
                    .map(|b| b.message)
                    .unwrap_or_else(|_| http::truncate_body(&body)),
                Err(e) => format!("failed to read response body: {e}"),
            };
            return Err(StageError::Publish {
                status: Some(status.as_u16()),
                message,
            });
        }

        let created = body
            .map_err(|e| e.to_string())
            .and_then(|body| {
                serde_json::from_str::<CreatedIssue>(&body).map_err(|e| e.to_string())
            })
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "issue created but response body was not understood");
                CreatedIssue::default()
            });

        match &created.html_url {
            Some(url) => tracing::info!(%url, "GitHub issue created"),
            None => tracing::info!("GitHub issue created"),
        }
        Ok(created)
    }
}
