use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "workhub")]
#[command(version, about = "WorkHub - workspace and file manager")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database path (defaults to ~/.workhub/workhub.db)
    #[arg(long, global = true, env = "WORKHUB_DB_PATH")]
    pub db_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Sign in
    Login {
        username: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "WORKHUB_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Workspace management
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },

    /// File operations inside a workspace
    File {
        #[command(subcommand)]
        command: FileCommands,
    },

    /// Admin panel
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Interactive shell over the view controller
    Shell,
}

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// List workspaces you can open
    List {
        /// Filter by id, title or description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show workspace details and stats
    Show { id: String },

    /// Create a workspace (admin)
    Add(AddWorkspaceArgs),

    /// Edit a workspace (admin)
    Edit(EditWorkspaceArgs),

    /// Delete a workspace and its files (admin)
    Delete { id: String },

    /// List users holding a workspace (admin)
    Access { id: String },
}

#[derive(Args)]
pub struct AddWorkspaceArgs {
    /// Workspace id, lowercased with spaces turned into dashes
    pub id: String,

    #[arg(short, long)]
    pub title: String,

    #[arg(short, long)]
    pub description: String,

    /// Code, Bug, Eye, Settings, Database, FileText or Clipboard
    #[arg(long, default_value = "FileText")]
    pub icon: String,

    /// blue, green, purple, red, indigo, orange, teal or pink
    #[arg(long, default_value = "blue")]
    pub color: String,

    /// User ids to grant access
    #[arg(short, long = "grant", value_delimiter = ',')]
    pub grant: Vec<String>,
}

#[derive(Args)]
pub struct EditWorkspaceArgs {
    pub id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Replace the set of users holding the workspace
    #[arg(short, long = "grant", value_delimiter = ',')]
    pub grant: Option<Vec<String>>,

    /// Change a user's role, as USER_ID=ROLE
    #[arg(long = "role")]
    pub roles: Vec<String>,
}

#[derive(Subcommand)]
pub enum FileCommands {
    /// List files in a workspace
    List {
        workspace: String,

        /// Filter by file name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Upload local files
    Upload {
        workspace: String,

        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Delete a file
    Delete { workspace: String, file_id: String },

    /// Write a file's content to disk
    Download {
        workspace: String,
        file_id: String,

        /// Output path (defaults to the file name)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// User table with presence status
    Users {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Activity log, newest first
    Activity {
        #[arg(short, long)]
        search: Option<String>,

        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
}
