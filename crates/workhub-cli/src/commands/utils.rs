use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, Utc};
use std::path::Path;
use workhub_core::{Role, UploadedFile};

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn preview_text(input: &str, max_len: usize) -> String {
    if input.chars().count() <= max_len {
        return input.to_string();
    }

    let mut preview = input.chars().take(max_len).collect::<String>();
    preview.push('…');
    preview
}

/// Parse `USER_ID=ROLE`.
pub fn parse_role_change(input: &str) -> Result<(String, Role)> {
    let (user_id, role) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected USER_ID=ROLE, got '{input}'"))?;
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(anyhow!("Expected USER_ID=ROLE, got '{input}'"));
    }
    let role: Role = role.parse()?;
    Ok((user_id.to_string(), role))
}

/// Read a local file into an upload, guessing its MIME type from the name.
pub fn read_upload(path: &str) -> Result<UploadedFile> {
    let path = Path::new(path);
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("Not a file: {}", path.display()))?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(UploadedFile::new(name, mime_type, bytes))
}
