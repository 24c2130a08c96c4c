use colored::Colorize;
use workhub_core::HubError;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hub_err) = err.downcast_ref::<HubError>()
        && let Some(lines) = suggestion(hub_err)
    {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        for line in lines {
            eprintln!("  {line}");
        }
    }

    std::process::exit(1);
}

fn suggestion(err: &HubError) -> Option<Vec<String>> {
    let lines = match err {
        HubError::NotAuthenticated => vec![
            "Sign in first with:".to_string(),
            format!("{} workhub login <username>", "$".dimmed()),
        ],
        HubError::WorkspaceNotFound(_) => vec![
            "List the workspaces you can open with:".to_string(),
            format!("{} workhub workspace list", "$".dimmed()),
        ],
        HubError::FileNotFound(_) => vec![
            "List file ids with:".to_string(),
            format!("{} workhub file list <workspace>", "$".dimmed()),
        ],
        HubError::ContentUnavailable(_) => vec![
            "File content only lives as long as the process that uploaded it.".to_string(),
            "Upload and download within one `workhub shell` session.".to_string(),
        ],
        HubError::PermissionDenied(_) => vec![
            "Check your role and access with:".to_string(),
            format!("{} workhub whoami", "$".dimmed()),
        ],
        _ => return None,
    };
    Some(lines)
}
