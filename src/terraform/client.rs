use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Token;
use crate::error::{DeployError, Result};

use super::types::{ApiDocument, Run, RunRequest, Variable, Workspace};

/// Media type required by the Terraform Cloud API.
const JSON_API: &str = "application/vnd.api+json";

/// Terraform Cloud API client.
///
/// Covers the four calls a deployment needs: list workspace variables,
/// patch one, resolve a workspace id, and create a run. Each method is a
/// single round trip with no retry.
pub struct TerraformClient {
    /// HTTP client with auth and media-type headers preconfigured
    client: reqwest::Client,
    /// Base URL without trailing slash (e.g., "https://app.terraform.io")
    base_url: String,
}

impl TerraformClient {
    pub fn new(base_url: &str, token: &Token) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| DeployError::Config(format!("Invalid Terraform Cloud URL: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|_| {
                DeployError::Config("Terraform Cloud token is not a valid header value".to_string())
            })?,
        );

        let client = reqwest::Client::builder()
            .user_agent(concat!("tfcdeploy/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| DeployError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL the client was created with, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all variables of a workspace, resolved by organization and
    /// workspace name.
    pub async fn list_variables(
        &self,
        organization: &str,
        workspace: &str,
    ) -> Result<Vec<Variable>> {
        let url = Url::parse_with_params(
            &format!("{}/api/v2/vars", self.base_url),
            &[
                ("filter[organization][name]", organization),
                ("filter[workspace][name]", workspace),
            ],
        )
        .map_err(|e| DeployError::Config(format!("Invalid variables URL: {e}")))?;

        let response = self.client.get(url).send().await?;
        let document: ApiDocument<Vec<Variable>> = decode(response).await?;
        Ok(document.data)
    }

    /// Overwrite a variable's value, preserving all its other attributes.
    ///
    /// Side effect: mutates remote workspace state.
    pub async fn update_variable(&self, variable: &Variable, new_value: &str) -> Result<Variable> {
        let url = format!("{}/api/v2/vars/{}", self.base_url, variable.id);
        let body = variable.patch_payload(new_value);

        // header first: .json() only sets Content-Type when none is present
        let response = self
            .client
            .patch(&url)
            .header(CONTENT_TYPE, JSON_API)
            .json(&body)
            .send()
            .await?;
        let document: ApiDocument<Variable> = decode(response).await?;
        Ok(document.data)
    }

    /// Resolve a workspace by organization and name.
    pub async fn get_workspace(&self, organization: &str, workspace: &str) -> Result<Workspace> {
        let url = format!(
            "{}/api/v2/organizations/{}/workspaces/{}",
            self.base_url, organization, workspace
        );

        let response = self.client.get(&url).send().await?;
        let document: ApiDocument<Workspace> = decode(response).await?;
        Ok(document.data)
    }

    /// Create a provisioning run against a workspace.
    ///
    /// Side effect: triggers real infrastructure provisioning. With
    /// `auto_apply` the run applies without manual approval.
    pub async fn create_run(
        &self,
        workspace_id: &str,
        message: &str,
        auto_apply: bool,
    ) -> Result<Run> {
        let url = format!("{}/api/v2/runs", self.base_url);
        let body = RunRequest::new(workspace_id, message, auto_apply);
        debug!("run request body: {}", serde_json::to_string_pretty(&body)?);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, JSON_API)
            .json(&body)
            .send()
            .await?;
        let document: ApiDocument<Run> = decode(response).await?;
        Ok(document.data)
    }
}

/// Decode a response body, treating any non-2xx status as an error instead
/// of attempting to parse an error payload as data.
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
