use console::style;

/// Styling helpers for terminal output
pub fn dim(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).dim()
}

pub fn cyan_bold(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).cyan().bold()
}

pub fn bright_green(text: impl std::fmt::Display) -> console::StyledObject<String> {
    style(text.to_string()).bright().green()
}

/// Prints the tfcdeploy banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        cyan_bold("🚀 tfcdeploy"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Terraform Cloud deployment runner")
    );
}
