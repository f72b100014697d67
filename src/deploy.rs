use log::{debug, info};

use crate::error::Result;
use crate::github::GitHubClient;
use crate::terraform::{links, TerraformClient, Variable};

/// Everything a single deployment needs, resolved once at startup and
/// threaded explicitly through the flow. No ambient state.
#[derive(Debug, Clone)]
pub struct DeployInputs {
    pub organization: String,
    pub workspace: String,
    /// Version identifier written into the workspace "tag" variable
    pub tag: String,
    /// Message attached to the provisioning run
    pub message: String,
    /// Accepted for parity with the CI event payload, not used for branching
    pub commit_message: String,
    pub auto_apply: bool,
    /// Labels for the tracking issue
    pub labels: Vec<String>,
    /// CI actor the tracking issue is assigned to
    pub actor: String,
}

/// Result of searching the workspace variables for the "tag" variable.
///
/// The two-case enum makes the one branch of the flow explicit: either the
/// deployment proceeds with the found variable, or it short-circuits to an
/// explanatory comment.
#[derive(Debug)]
pub enum TagLookup {
    Found(Variable),
    NotFound,
}

pub fn find_tag_variable(variables: Vec<Variable>) -> TagLookup {
    match variables.into_iter().find(|v| v.attributes.key == "tag") {
        Some(variable) => TagLookup::Found(variable),
        None => TagLookup::NotFound,
    }
}

/// How the deployment ended, for logging and assertions.
#[derive(Debug)]
pub enum DeployOutcome {
    /// The tag variable was patched and a run was submitted.
    RunCreated {
        issue_number: u64,
        run_id: String,
        run_url: String,
    },
    /// The workspace has no "tag" variable; nothing was changed.
    NoTagVariable { issue_number: u64 },
}

/// Run one deployment end to end.
///
/// Sequential by design: every call is awaited before the next is issued,
/// any failure propagates immediately, and nothing already done is rolled
/// back. A failed run submission leaves the variable patched.
pub async fn run_deploy(
    inputs: &DeployInputs,
    terraform: &TerraformClient,
    github: &GitHubClient,
) -> Result<DeployOutcome> {
    if !inputs.commit_message.is_empty() {
        debug!("commit message: {}", inputs.commit_message);
    }

    info!("Opening tracking issue for tag {}", inputs.tag);
    let issue = github
        .create_issue(
            &format!("Deploying tag {}", inputs.tag),
            &format!("Deploying tag {} to {}.", inputs.tag, inputs.workspace),
            &inputs.labels,
            std::slice::from_ref(&inputs.actor),
        )
        .await?;
    debug!("tracking issue: {}", issue.html_url);

    info!(
        "Listing variables for {}/{}",
        inputs.organization, inputs.workspace
    );
    let variables = terraform
        .list_variables(&inputs.organization, &inputs.workspace)
        .await?;

    match find_tag_variable(variables) {
        TagLookup::Found(variable) => {
            info!("Setting variable {} to {}", variable.id, inputs.tag);
            terraform.update_variable(&variable, &inputs.tag).await?;

            let comment = github
                .create_comment(issue.number, "Variable set on Terraform Cloud.")
                .await?;

            let workspace = terraform
                .get_workspace(&inputs.organization, &inputs.workspace)
                .await?;
            debug!("workspace {} resolved to {}", inputs.workspace, workspace.id);

            info!("Creating run on workspace {}", workspace.id);
            let run = terraform
                .create_run(&workspace.id, &inputs.message, inputs.auto_apply)
                .await?;

            let run_url = links::run_url(
                terraform.base_url(),
                &inputs.organization,
                &inputs.workspace,
                &run.id,
            );
            github
                .update_comment(
                    comment.id,
                    &format!("Variable set on Terraform Cloud. [Terraform Cloud Run]({run_url})"),
                )
                .await?;

            Ok(DeployOutcome::RunCreated {
                issue_number: issue.number,
                run_id: run.id,
                run_url,
            })
        }
        TagLookup::NotFound => {
            info!("No tag variable in {}, stopping", inputs.workspace);
            github
                .create_comment(issue.number, "No variable tag found.")
                .await?;

            Ok(DeployOutcome::NoTagVariable {
                issue_number: issue.number,
            })
        }
    }
}
