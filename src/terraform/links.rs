/// Builds a clickable web URL for a Terraform Cloud run.
///
/// The API returns run ids, not run pages; this constructs the direct link
/// to the run in the Terraform Cloud UI so it can be posted on the tracking
/// issue.
///
/// # Arguments
///
/// * `base_url` - Terraform Cloud base URL, no trailing slash (e.g., <https://app.terraform.io>)
/// * `organization` - Organization name
/// * `workspace` - Workspace name
/// * `run_id` - Run id returned by run creation (e.g., "run-CZcmD7eagjhyX0vN")
///
/// # Returns
///
/// Clickable URL to the run (e.g., <https://app.terraform.io/app/acme/workspaces/prod/runs/run-CZcmD7eagjhyX0vN>)
pub fn run_url(base_url: &str, organization: &str, workspace: &str, run_id: &str) -> String {
    format!("{base_url}/app/{organization}/workspaces/{workspace}/runs/{run_id}")
}
