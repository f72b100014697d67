use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON:API envelope wrapping every Terraform Cloud response body.
#[derive(Debug, Deserialize)]
pub struct ApiDocument<T> {
    pub data: T,
}

/// A workspace variable as returned by the Terraform Cloud vars endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub attributes: VariableAttributes,
}

/// Attributes of a workspace variable.
///
/// Only `key` and `value` are read by this tool. Everything else the API
/// reports (category, hcl, sensitive, description, ...) is kept verbatim in
/// `extra` so a patch request can send the attributes back unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableAttributes {
    pub key: String,
    /// `None` for sensitive variables, whose values the API never returns.
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Variable {
    /// Builds the patch payload that overwrites `value` and carries every
    /// other attribute through unchanged.
    pub fn patch_payload(&self, new_value: &str) -> VariablePatch {
        let mut attributes = self.attributes.clone();
        attributes.value = Some(new_value.to_string());

        VariablePatch {
            data: VariablePatchData {
                type_: "vars",
                id: self.id.clone(),
                attributes,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VariablePatch {
    pub data: VariablePatchData,
}

#[derive(Debug, Serialize)]
pub struct VariablePatchData {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub id: String,
    pub attributes: VariableAttributes,
}

/// A workspace resolved by (organization, name). Only the id is needed to
/// submit a run against it.
#[derive(Debug, Deserialize)]
pub struct Workspace {
    pub id: String,
}

/// A provisioning run created on a workspace.
#[derive(Debug, Deserialize)]
pub struct Run {
    pub id: String,
}

/// Request body for the run creation endpoint.
#[derive(Debug, Serialize)]
pub struct RunRequest {
    data: RunRequestData,
}

#[derive(Debug, Serialize)]
struct RunRequestData {
    #[serde(rename = "type")]
    type_: &'static str,
    relationships: RunRelationships,
    attributes: RunAttributes,
}

#[derive(Debug, Serialize)]
struct RunRelationships {
    workspace: RelatedWorkspace,
}

#[derive(Debug, Serialize)]
struct RelatedWorkspace {
    data: WorkspaceRef,
}

#[derive(Debug, Serialize)]
struct WorkspaceRef {
    #[serde(rename = "type")]
    type_: &'static str,
    id: String,
}

#[derive(Debug, Serialize)]
struct RunAttributes {
    #[serde(rename = "auto-apply")]
    auto_apply: bool,
    message: String,
}

impl RunRequest {
    pub fn new(workspace_id: &str, message: &str, auto_apply: bool) -> Self {
        Self {
            data: RunRequestData {
                type_: "runs",
                relationships: RunRelationships {
                    workspace: RelatedWorkspace {
                        data: WorkspaceRef {
                            type_: "workspaces",
                            id: workspace_id.to_string(),
                        },
                    },
                },
                attributes: RunAttributes {
                    auto_apply,
                    message: message.to_string(),
                },
            },
        }
    }
}
