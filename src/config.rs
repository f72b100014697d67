use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file structure for tfcdeploy.
///
/// Lets CI pipelines keep the stable parts of a deployment (organization,
/// workspace, labels) in a checked-in file while tokens and the tag arrive
/// via flags or environment variables. Any value given on the command line
/// overrides the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Terraform Cloud connection defaults
    #[serde(default)]
    pub terraform: TerraformConfig,

    /// GitHub connection defaults
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TerraformConfig {
    /// Terraform Cloud API token
    pub token: Option<String>,

    /// Terraform Cloud base URL
    #[serde(default = "default_terraform_base_url")]
    pub base_url: String,

    /// Organization name
    pub organization: Option<String>,

    /// Workspace name
    pub workspace: Option<String>,

    /// Apply runs automatically without manual approval
    #[serde(default)]
    pub auto_apply: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GithubConfig {
    /// GitHub personal access token
    pub token: Option<String>,

    /// GitHub API base URL
    #[serde(default = "default_github_base_url")]
    pub base_url: String,

    /// Repository path (e.g., 'owner/repo')
    pub repo: Option<String>,

    /// Labels applied to the tracking issue
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_terraform_base_url(),
            organization: None,
            workspace: None,
            auto_apply: false,
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_github_base_url(),
            repo: None,
            labels: default_labels(),
        }
    }
}

fn default_terraform_base_url() -> String {
    "https://app.terraform.io".to_string()
}

fn default_github_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_labels() -> Vec<String> {
    vec!["deployment".to_string()]
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./tfcdeploy.toml
    /// 3. ./tfcdeploy.json
    /// 4. ./tfcdeploy.yaml
    /// 5. ./tfcdeploy.yml
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        // Try common configuration file names
        let candidates = [
            "tfcdeploy.toml",
            "tfcdeploy.json",
            "tfcdeploy.yaml",
            "tfcdeploy.yml",
        ];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        // No config file found, return defaults
        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => {
                // Try TOML first, then JSON, then YAML
                toml::from_str(&contents)
                    .or_else(|_| serde_json::from_str(&contents))
                    .or_else(|_| serde_yaml::from_str(&contents))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
        }
    }
}
