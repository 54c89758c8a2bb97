//! Wire types for the Generation Service JSON API.
//!
//! Field names follow the service's camelCase contract.

use serde::{Deserialize, Serialize};

use crate::domain::models::{FileContent, TestSummary};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesRequest<'a> {
    pub repo_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ListFilesResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContentRequest<'a> {
    pub repo_url: &'a str,
    pub file_path: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct FileContentResponse {
    pub content: String,
}

/// One file of a content batch, as the service expects it.
#[derive(Debug, Serialize)]
pub struct NamedContent<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a FileContent> for NamedContent<'a> {
    fn from(file: &'a FileContent) -> Self {
        Self {
            name: &file.path,
            content: &file.content,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummariesRequest<'a> {
    pub files_content: Vec<NamedContent<'a>>,
}

impl<'a> SummariesRequest<'a> {
    pub fn new(files: &'a [FileContent]) -> Self {
        Self {
            files_content: files.iter().map(NamedContent::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummariesResponse {
    pub summaries: Vec<TestSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest<'a> {
    pub summary: &'a str,
    pub files_content: Vec<NamedContent<'a>>,
}

impl<'a> CodeRequest<'a> {
    pub fn new(summary: &'a str, files: &'a [FileContent]) -> Self {
        Self {
            summary,
            files_content: files.iter().map(NamedContent::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CodeResponse {
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrRequest<'a> {
    pub repo_url: &'a str,
    pub test_case_code: &'a str,
    pub file_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrResponse {
    pub pr_url: String,
}
