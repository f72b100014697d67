use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::auth::Token;
use crate::config::Config;
use crate::deploy::{self, DeployInputs, DeployOutcome};
use crate::github::{GitHubClient, RepoRef};
use crate::output;
use crate::terraform::TerraformClient;

#[derive(Parser)]
#[command(name = "tfcdeploy")]
#[command(author, version, about = "Terraform Cloud deployment runner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a configuration file (defaults to ./tfcdeploy.{toml,json,yaml})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch the workspace tag variable and trigger a provisioning run
    Deploy(DeployArgs),
}

#[derive(Args)]
struct DeployArgs {
    /// GitHub token used for the tracking issue
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Terraform Cloud API token
    #[arg(long, env = "TFC_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Terraform Cloud workspace name
    #[arg(short, long)]
    workspace: Option<String>,

    /// Terraform Cloud organization name
    #[arg(short, long)]
    organization: Option<String>,

    /// Version identifier to deploy
    #[arg(short, long)]
    tag: String,

    /// Message attached to the provisioning run
    #[arg(short, long, default_value = "")]
    message: String,

    /// Commit message of the triggering commit
    #[arg(long, default_value = "")]
    commit_message: String,

    /// Apply the run automatically without manual approval
    #[arg(long)]
    auto_apply: bool,

    /// Repository for the tracking issue (owner/repo)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repo: Option<String>,

    /// CI actor the tracking issue is assigned to
    #[arg(long, env = "GITHUB_ACTOR")]
    actor: Option<String>,

    /// Terraform Cloud base URL
    #[arg(long)]
    terraform_url: Option<String>,

    /// GitHub API base URL
    #[arg(long)]
    github_url: Option<String>,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Deploy(args) => self.execute_deploy(args).await,
        }
    }

    async fn execute_deploy(&self, args: &DeployArgs) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        let github_token = args
            .github_token
            .clone()
            .or_else(|| config.github.token.clone())
            .context("Missing GitHub token (--github-token or GITHUB_TOKEN)")?;
        let token = args
            .token
            .clone()
            .or_else(|| config.terraform.token.clone())
            .context("Missing Terraform Cloud token (--token or TFC_TOKEN)")?;
        let workspace = args
            .workspace
            .clone()
            .or_else(|| config.terraform.workspace.clone())
            .context("Missing workspace (--workspace)")?;
        let organization = args
            .organization
            .clone()
            .or_else(|| config.terraform.organization.clone())
            .context("Missing organization (--organization)")?;
        let repo = args
            .repo
            .clone()
            .or_else(|| config.github.repo.clone())
            .context("Missing repository (--repo or GITHUB_REPOSITORY)")?;
        let actor = args
            .actor
            .clone()
            .context("Missing actor (--actor or GITHUB_ACTOR)")?;

        let terraform_url = args
            .terraform_url
            .clone()
            .unwrap_or_else(|| config.terraform.base_url.clone());
        let github_url = args
            .github_url
            .clone()
            .unwrap_or_else(|| config.github.base_url.clone());

        let terraform = TerraformClient::new(&terraform_url, &Token::from(token))?;
        let github = GitHubClient::new(&github_url, RepoRef::parse(&repo)?, &Token::from(github_token))?;

        let inputs = DeployInputs {
            organization,
            workspace,
            tag: args.tag.clone(),
            message: args.message.clone(),
            commit_message: args.commit_message.clone(),
            auto_apply: args.auto_apply || config.terraform.auto_apply,
            labels: config.github.labels.clone(),
            actor,
        };

        info!(
            "Deploying tag {} to {}/{}",
            inputs.tag, inputs.organization, inputs.workspace
        );

        match deploy::run_deploy(&inputs, &terraform, &github).await? {
            DeployOutcome::RunCreated {
                issue_number,
                run_id,
                run_url,
            } => {
                info!("Run {run_id} linked on issue #{issue_number}");
                eprintln!(
                    "{} run submitted: {}",
                    output::bright_green("✓"),
                    output::dim(&run_url)
                );
            }
            DeployOutcome::NoTagVariable { issue_number } => {
                info!("No tag variable, reported on issue #{issue_number}");
                eprintln!(
                    "{} workspace has no tag variable, see issue #{}",
                    output::cyan_bold("!"),
                    issue_number
                );
            }
        }

        Ok(())
    }
}
