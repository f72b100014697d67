use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Token;
use crate::error::{DeployError, Result};

use super::types::{Comment, CommentBody, Issue, NewIssue, RepoRef};

/// GitHub REST API client for the tracking issue and its comments.
#[derive(Clone)]
pub struct GitHubClient {
    /// HTTP client with auth and accept headers preconfigured
    client: reqwest::Client,
    /// Base URL without trailing slash (e.g., "https://api.github.com")
    base_url: String,
    /// Repository the tracking issue lives in
    repo: RepoRef,
}

impl GitHubClient {
    pub fn new(base_url: &str, repo: RepoRef, token: &Token) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| DeployError::Config(format!("Invalid GitHub URL: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("tfcdeploy/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|_| {
                DeployError::Config("GitHub token is not a valid header value".to_string())
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DeployError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            repo,
        })
    }

    /// Open the tracking issue for a deployment.
    pub async fn create_issue(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
        assignees: &[String],
    ) -> Result<Issue> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.base_url, self.repo.owner, self.repo.name
        );
        let request = NewIssue {
            title: title.to_string(),
            body: body.to_string(),
            labels: labels.to_vec(),
            assignees: assignees.to_vec(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        decode(response).await
    }

    /// Post a progress comment on an issue.
    pub async fn create_comment(&self, issue_number: u64, body: &str) -> Result<Comment> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, self.repo.owner, self.repo.name, issue_number
        );

        let response = self
            .client
            .post(&url)
            .json(&CommentBody { body })
            .send()
            .await?;
        decode(response).await
    }

    /// Replace the body of an existing comment.
    pub async fn update_comment(&self, comment_id: u64, body: &str) -> Result<Comment> {
        let url = format!(
            "{}/repos/{}/{}/issues/comments/{}",
            self.base_url, self.repo.owner, self.repo.name, comment_id
        );

        let response = self
            .client
            .patch(&url)
            .json(&CommentBody { body })
            .send()
            .await?;
        decode(response).await
    }
}

/// Decode a response body, treating any non-2xx status as an error.
async fn decode<T>(response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(DeployError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> GitHubClient {
        GitHubClient::new(
            base_url,
            RepoRef::parse("acme/infrastructure").unwrap(),
            &Token::from("ghp-test-token"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_issue_posts_labels_and_assignees() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/acme/infrastructure/issues")
            .match_header("authorization", "Bearer ghp-test-token")
            .match_header("accept", "application/vnd.github+json")
            .match_header(
                "user-agent",
                concat!("tfcdeploy/", env!("CARGO_PKG_VERSION")),
            )
            .match_body(mockito::Matcher::Json(json!({
                "title": "Deploying tag v1.2.3",
                "body": "Deploying tag v1.2.3 to prod.",
                "labels": ["deployment"],
                "assignees": ["octocat"]
            })))
            .with_status(201)
            .with_body(
                json!({
                    "number": 42,
                    "html_url": "https://github.com/acme/infrastructure/issues/42"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let issue = client(&server.url())
            .create_issue(
                "Deploying tag v1.2.3",
                "Deploying tag v1.2.3 to prod.",
                &["deployment".to_string()],
                &["octocat".to_string()],
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(issue.number, 42);
    }

    #[tokio::test]
    async fn test_create_comment_targets_issue_number() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/acme/infrastructure/issues/42/comments")
            .match_body(mockito::Matcher::Json(
                json!({"body": "Variable set on Terraform Cloud."}),
            ))
            .with_status(201)
            .with_body(json!({"id": 9001}).to_string())
            .create_async()
            .await;

        let comment = client(&server.url())
            .create_comment(42, "Variable set on Terraform Cloud.")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(comment.id, 9001);
    }

    #[tokio::test]
    async fn test_update_comment_patches_by_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/repos/acme/infrastructure/issues/comments/9001")
            .match_body(mockito::Matcher::Json(json!({"body": "updated body"})))
            .with_status(200)
            .with_body(json!({"id": 9001}).to_string())
            .create_async()
            .await;

        let comment = client(&server.url())
            .update_comment(9001, "updated body")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(comment.id, 9001);
    }

    #[tokio::test]
    async fn test_api_failure_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/acme/infrastructure/issues")
            .with_status(422)
            .with_body(json!({"message": "Validation Failed"}).to_string())
            .create_async()
            .await;

        let result = client(&server.url())
            .create_issue("title", "body", &[], &[])
            .await;

        match result {
            Err(DeployError::Api { status, message }) => {
                assert_eq!(status, 422);
                assert!(message.contains("Validation Failed"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
