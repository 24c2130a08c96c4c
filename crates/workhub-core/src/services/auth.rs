//! Session service: login, logout and the guards other services use.

use tracing::{info, warn};

use super::activity;
use crate::error::{HubError, HubResult};
use crate::models::{ActivityAction, User, ValidationError};
use crate::view::View;
use crate::WorkHub;

/// Sign in with a username and password from the credential directory.
///
/// Unknown users and wrong passwords fail the same way.
pub fn login(hub: &mut WorkHub, username: &str, password: &str) -> HubResult<User> {
    let mut missing = Vec::new();
    if username.is_empty() {
        missing.push(ValidationError::required("username"));
    }
    if password.is_empty() {
        missing.push(ValidationError::required("password"));
    }
    if !missing.is_empty() {
        return Err(HubError::Validation(missing));
    }

    if !hub.credentials().verify(username, password) {
        warn!(username, "Login rejected");
        return Err(HubError::InvalidCredentials);
    }

    let user = hub
        .storage
        .users
        .find_by_username(username)?
        .ok_or(HubError::InvalidCredentials)?;

    hub.storage.session.save(&user)?;
    hub.set_session(Some(user.clone()));
    hub.set_view(View::WorkspaceList);
    activity::record(hub, ActivityAction::Login, "", "User logged in")?;

    info!(username = %user.username, role = %user.role, "User signed in");
    Ok(user)
}

/// Clear the in-memory and persisted session. Signing out twice is a no-op.
pub fn logout(hub: &mut WorkHub) -> HubResult<()> {
    if let Some(user) = hub.current_user().cloned() {
        activity::record(hub, ActivityAction::Logout, "", "User logged out")?;
        info!(username = %user.username, "User signed out");
    }

    hub.storage.session.clear()?;
    hub.set_session(None);
    hub.set_view(View::LoggedOut);
    Ok(())
}

/// The signed-in user, or `NotAuthenticated`.
pub fn require_user(hub: &WorkHub) -> HubResult<User> {
    hub.current_user().cloned().ok_or(HubError::NotAuthenticated)
}

/// The signed-in user if they hold the admin role.
pub fn require_admin(hub: &WorkHub) -> HubResult<User> {
    let user = require_user(hub)?;
    if !user.role.is_admin() {
        return Err(HubError::PermissionDenied(format!(
            "{} is not an admin",
            user.username
        )));
    }
    Ok(user)
}

/// Refresh the session snapshot after the roster changed.
pub(crate) fn sync_session(hub: &mut WorkHub, users: &[User]) -> HubResult<()> {
    let Some(current) = hub.current_user() else {
        return Ok(());
    };
    let Some(live) = users.iter().find(|u| u.id == current.id) else {
        return Ok(());
    };
    if live != current {
        let live = live.clone();
        hub.storage.session.save(&live)?;
        info!(username = %live.username, "Session refreshed after permission change");
        hub.set_session(Some(live));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HubConfig;
    use crate::credentials::CredentialDirectory;

    fn hub() -> WorkHub {
        WorkHub::in_memory(HubConfig::default()).unwrap()
    }

    #[test]
    fn test_login_success_persists_session() {
        let mut hub = hub();
        let user = login(&mut hub, "admin", "admin123").unwrap();

        assert_eq!(user.id, "1");
        assert_eq!(hub.view(), &View::WorkspaceList);
        assert_eq!(hub.storage.session.load().unwrap(), Some(user));
    }

    #[test]
    fn test_login_failure_is_generic() {
        let mut hub = hub();
        let wrong_password = login(&mut hub, "viewer", "wrongpass").unwrap_err();
        let unknown_user = login(&mut hub, "ghost", "view123").unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, HubError::InvalidCredentials));
        assert!(hub.current_user().is_none());
        assert_eq!(hub.view(), &View::LoggedOut);
    }

    #[test]
    fn test_login_rejects_blank_fields() {
        let mut hub = hub();
        match login(&mut hub, "", "") {
            Err(HubError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {:?}", other.map(|u| u.username)),
        }
    }

    #[test]
    fn test_custom_credentials_must_match_roster() {
        let directory = CredentialDirectory::new([("admin", "s3cret"), ("ghost", "boo")]);
        let mut hub = hub().with_credentials(directory);

        assert!(matches!(
            login(&mut hub, "admin", "admin123"),
            Err(HubError::InvalidCredentials)
        ));
        assert_eq!(login(&mut hub, "admin", "s3cret").unwrap().username, "admin");
        // known to the directory but not to the roster
        assert!(matches!(
            login(&mut hub, "ghost", "boo"),
            Err(HubError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut hub = hub();
        login(&mut hub, "dev-lead", "dev123").unwrap();
        logout(&mut hub).unwrap();

        assert!(hub.current_user().is_none());
        assert!(hub.storage.session.load().unwrap().is_none());
        assert_eq!(hub.view(), &View::LoggedOut);
        logout(&mut hub).unwrap();
    }

    #[test]
    fn test_require_admin() {
        let mut hub = hub();
        assert!(matches!(require_admin(&hub), Err(HubError::NotAuthenticated)));

        login(&mut hub, "reviewer", "review123").unwrap();
        assert!(matches!(require_admin(&hub), Err(HubError::PermissionDenied(_))));

        login(&mut hub, "admin", "admin123").unwrap();
        assert_eq!(require_admin(&hub).unwrap().username, "admin");
    }
}
