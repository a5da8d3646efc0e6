//! Shared test helpers for router and service tests.

use std::sync::Arc;

use crate::auth::{self, hash_password};
use crate::config::{AdminAccount, AuthConfig, Config, ServerConfig, StorageConfig};
use crate::object_store::LocalStore;
use crate::storage::Database;
use crate::AppState;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_NAME: &str = "Test Admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Session secret shared by every test state
pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret!";

pub fn test_config(temp_dir: &tempfile::TempDir) -> Config {
    let data_dir = temp_dir.path().join("data");
    let files_dir = temp_dir.path().join("files");

    Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            data_dir: data_dir.to_string_lossy().to_string(),
            site_url: "https://example.com".to_string(),
        },
        storage: StorageConfig {
            local_storage_path: files_dir.to_string_lossy().to_string(),
            ..StorageConfig::default()
        },
        auth: AuthConfig {
            session_secret: TEST_SECRET.to_vec(),
            session_secret_configured: true,
            secure_cookies: false,
            admin: None,
        },
        seed_defaults: false,
        test_mode: true,
        max_upload_size: 10 * 1024 * 1024, // 10MB for tests
    }
}

/// Create a test AppState with a temporary database, local object store and
/// a provisioned admin account.
pub fn test_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    test_state_with(temp_dir, |_| {})
}

/// Like [`test_state`], with a hook to adjust the configuration first.
pub fn test_state_with<F>(temp_dir: &tempfile::TempDir, adjust: F) -> Arc<AppState>
where
    F: FnOnce(&mut Config),
{
    let mut config = test_config(temp_dir);
    adjust(&mut config);

    let db = Database::open(&config.server.data_dir).expect("Failed to open test database");
    let object_store = LocalStore::new(&config.storage.local_storage_path)
        .expect("Failed to create test object store");

    let admin = AdminAccount {
        email: ADMIN_EMAIL.to_string(),
        name: ADMIN_NAME.to_string(),
        // Lowest bcrypt cost keeps tests fast
        password_hash: hash_password(ADMIN_PASSWORD, 4).expect("Failed to hash password"),
    };
    auth::provision_admin(&db, &admin).expect("Failed to provision admin");

    Arc::new(AppState::new(config, db, Arc::new(object_store)))
}
