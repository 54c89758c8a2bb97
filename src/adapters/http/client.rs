//! HTTP client for the Generation Service.
//!
//! Every stage is a JSON `POST` under `<base_url>/api/`. Responses are
//! classified into the three [`ServiceError`] shapes: no response at all is
//! `Transport`, a non-2xx status is `Status`, and a 2xx body that does not
//! parse is `Decode`. Nothing is retried here.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::{
    ChangeSubmission, FileContent, RepositoryReference, ServiceConfig, TestSummary,
};
use crate::domain::ports::GenerationService;

use super::models::{
    CodeRequest, CodeResponse, CreatePrRequest, CreatePrResponse, FileContentRequest,
    FileContentResponse, ListFilesRequest, ListFilesResponse, SummariesRequest, SummariesResponse,
};

const FILES_PATH: &str = "/api/files";
const FILE_CONTENT_PATH: &str = "/api/file-content";
const SUMMARIES_PATH: &str = "/api/generate-summaries";
const CODE_PATH: &str = "/api/generate-code";
const CREATE_PR_PATH: &str = "/api/create-pr";

/// [`GenerationService`] over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpGenerationService {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL without trailing slash.
    base_url: String,
}

impl HttpGenerationService {
    /// Build a client from the service section of the configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("casegen/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `body` as JSON to `path` and decode the JSON answer.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> ServiceResult<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("POST {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(format!("reading {url}: {e}")))?;
        debug!(url = %url, bytes = bytes.len(), "service responded");

        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(format!("{url}: {e}")))
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    #[instrument(skip(self, repository), fields(repository = %repository))]
    async fn list_files(&self, repository: &RepositoryReference) -> ServiceResult<Vec<String>> {
        let response: ListFilesResponse = self
            .post_json(
                FILES_PATH,
                &ListFilesRequest {
                    repo_url: repository.as_str(),
                },
            )
            .await?;
        Ok(response.files)
    }

    #[instrument(skip(self, repository), fields(repository = %repository))]
    async fn fetch_content(
        &self,
        repository: &RepositoryReference,
        path: &str,
    ) -> ServiceResult<String> {
        let response: FileContentResponse = self
            .post_json(
                FILE_CONTENT_PATH,
                &FileContentRequest {
                    repo_url: repository.as_str(),
                    file_path: path,
                },
            )
            .await?;
        Ok(response.content)
    }

    #[instrument(skip(self, files), fields(files = files.len()))]
    async fn generate_summaries(&self, files: &[FileContent]) -> ServiceResult<Vec<TestSummary>> {
        let response: SummariesResponse = self
            .post_json(SUMMARIES_PATH, &SummariesRequest::new(files))
            .await?;
        Ok(response.summaries)
    }

    #[instrument(skip(self, summary, files), fields(files = files.len()))]
    async fn generate_code(&self, summary: &str, files: &[FileContent]) -> ServiceResult<String> {
        let response: CodeResponse = self
            .post_json(CODE_PATH, &CodeRequest::new(summary, files))
            .await?;
        Ok(response.code)
    }

    #[instrument(skip(self, submission), fields(file_name = %submission.file_name))]
    async fn submit_change(&self, submission: &ChangeSubmission) -> ServiceResult<String> {
        let response: CreatePrResponse = self
            .post_json(
                CREATE_PR_PATH,
                &CreatePrRequest {
                    repo_url: submission.repository.as_str(),
                    test_case_code: submission.code.as_str(),
                    file_name: &submission.file_name,
                },
            )
            .await?;
        Ok(response.pr_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = HttpGenerationService::new(&ServiceConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.endpoint(FILES_PATH),
            "http://localhost:8080/api/files"
        );
    }
}
