//! Single-admin authentication: bcrypt password checks, signed session
//! tokens and the session cookie.

pub mod cookie;
pub mod session;

use chrono::Utc;
use thiserror::Error;

use crate::config::AdminAccount;
use crate::storage::models::UserRecord;
use crate::storage::{Database, DatabaseError};

pub use session::{Claims, SessionKeys};

/// bcrypt cost used for new password hashes
pub const BCRYPT_COST: u32 = 10;

/// Minimum length for a new password
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid session token")]
    InvalidToken,
    #[error("Session expired")]
    Expired,
    #[error("{0}")]
    Validation(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Token encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check an email/password pair against the stored admin account.
///
/// Every mismatch is reported as `InvalidCredentials` so callers cannot tell
/// a wrong email from a wrong password.
pub fn authenticate(db: &Database, email: &str, password: &str) -> Result<UserRecord, AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let user = db.get_user(email)?.ok_or(AuthError::InvalidCredentials)?;

    match bcrypt::verify(password, &user.password_hash) {
        Ok(true) => Ok(user),
        Ok(false) => Err(AuthError::InvalidCredentials),
        Err(e) => {
            tracing::error!(error = %e, "Password verification error");
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Fields of the change-password form
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Replace the password of `email` after checking the current one.
pub fn change_password(db: &Database, email: &str, change: &PasswordChange) -> Result<(), AuthError> {
    if change.current_password.is_empty()
        || change.new_password.is_empty()
        || change.confirm_password.is_empty()
    {
        return Err(AuthError::Validation("All fields are required".to_string()));
    }
    if change.new_password != change.confirm_password {
        return Err(AuthError::Validation("New passwords do not match".to_string()));
    }
    if change.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "New password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let user = db.get_user(email)?.ok_or(AuthError::UserNotFound)?;
    if !bcrypt::verify(&change.current_password, &user.password_hash)? {
        return Err(AuthError::Validation("Incorrect current password".to_string()));
    }

    let hash = hash_password(&change.new_password, BCRYPT_COST)?;
    if !db.update_password(email, &hash)? {
        return Err(AuthError::UserNotFound);
    }

    tracing::info!(email = %email, "Admin password updated");
    Ok(())
}

/// Create the configured admin account unless it already exists.
/// Returns whether a row was written.
pub fn provision_admin(db: &Database, admin: &AdminAccount) -> Result<bool, AuthError> {
    if db.get_user(&admin.email)?.is_some() {
        return Ok(false);
    }

    let now = Utc::now();
    db.put_user(&UserRecord {
        email: admin.email.clone(),
        name: admin.name.clone(),
        password_hash: admin.password_hash.clone(),
        created_at: now,
        updated_at: now,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    fn db_with_admin(password: &str) -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("data")).unwrap();
        let admin = AdminAccount {
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            password_hash: hash_password(password, TEST_COST).unwrap(),
        };
        assert!(provision_admin(&db, &admin).unwrap());
        (dir, db)
    }

    #[test]
    fn authenticate_accepts_only_the_right_pair() {
        let (_dir, db) = db_with_admin("Admin123!");

        let user = authenticate(&db, "admin@example.com", "Admin123!").unwrap();
        assert_eq!(user.name, "Admin");

        assert!(matches!(
            authenticate(&db, "admin@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&db, "someone@example.com", "Admin123!"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&db, "", ""),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn provisioning_does_not_overwrite() {
        let (_dir, db) = db_with_admin("Admin123!");
        let again = AdminAccount {
            email: "admin@example.com".to_string(),
            name: "Other".to_string(),
            password_hash: hash_password("different", TEST_COST).unwrap(),
        };
        assert!(!provision_admin(&db, &again).unwrap());
        assert!(authenticate(&db, "admin@example.com", "Admin123!").is_ok());
    }

    #[test]
    fn change_password_validates_input() {
        let (_dir, db) = db_with_admin("Admin123!");

        let cases = [
            (("", "newpassword", "newpassword"), "All fields are required"),
            (("Admin123!", "newpassword", "different1"), "New passwords do not match"),
            (("Admin123!", "short", "short"), "at least 8 characters"),
            (("nope", "newpassword", "newpassword"), "Incorrect current password"),
        ];

        for ((current, new, confirm), expected) in cases {
            let change = PasswordChange {
                current_password: current.to_string(),
                new_password: new.to_string(),
                confirm_password: confirm.to_string(),
            };
            let err = change_password(&db, "admin@example.com", &change).unwrap_err();
            assert!(err.to_string().contains(expected), "{err} should contain {expected}");
        }
    }

    #[test]
    fn change_password_replaces_hash() {
        let (_dir, db) = db_with_admin("Admin123!");
        let change = PasswordChange {
            current_password: "Admin123!".to_string(),
            new_password: "correct horse".to_string(),
            confirm_password: "correct horse".to_string(),
        };
        change_password(&db, "admin@example.com", &change).unwrap();

        assert!(authenticate(&db, "admin@example.com", "Admin123!").is_err());
        assert!(authenticate(&db, "admin@example.com", "correct horse").is_ok());
    }
}
