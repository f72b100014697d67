mod client;
pub mod links;
mod types;

pub use client::TerraformClient;
pub use types::{Run, Variable, Workspace};
