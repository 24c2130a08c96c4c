use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use workhub_core::WorkHub;
use workhub_core::services;

use crate::output::{OutputFormat, json::print_json};

pub fn login(
    hub: &mut WorkHub,
    username: &str,
    password: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };
    let user = services::login(hub, username, &password)?;

    if format.is_json() {
        return print_json(&user);
    }

    println!(
        "{} Signed in as {} ({})",
        "✓".green(),
        user.username.bold(),
        user.role
    );
    Ok(())
}

pub fn logout(hub: &mut WorkHub, format: OutputFormat) -> Result<()> {
    let username = hub.current_user().map(|u| u.username.clone());
    services::logout(hub)?;

    if format.is_json() {
        return print_json(&json!({ "signed_out": username }));
    }

    match username {
        Some(name) => println!("{} Signed out {}", "✓".green(), name),
        None => println!("Not signed in"),
    }
    Ok(())
}

pub fn whoami(hub: &WorkHub, format: OutputFormat) -> Result<()> {
    let user = services::require_user(hub)?;

    if format.is_json() {
        return print_json(&user);
    }

    println!("Username:   {}", user.username);
    println!("ID:         {}", user.id);
    println!("Role:       {}", user.role);
    println!("Workspaces: {}", user.workspaces.join(", "));
    Ok(())
}
