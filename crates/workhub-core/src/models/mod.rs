pub mod activity;
pub mod file;
pub mod user;
pub mod validation;
pub mod workspace;

pub use activity::{
    ActivityAction, ActivityLogEntry, AdminOverview, AdminSummary, PresenceStatus,
    UserActivityRow, format_relative,
};
pub use file::{
    AccessLevel, ContentHandle, FileKind, UploadedFile, WorkspaceFile, WorkspaceStats,
    format_file_size,
};
pub use user::{Role, User};
pub use validation::{ValidationError, join_validation_errors};
pub use workspace::{
    NewWorkspace, WorkspaceColor, WorkspaceConfig, WorkspaceIcon, WorkspaceUpdate,
    normalize_workspace_id,
};
