use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Minimum length of an explicitly configured session secret
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    /// Insert the built-in sections at startup (existing rows are kept)
    pub seed_defaults: bool,
    /// Enables dangerous operations like purge. Must never be true in production.
    pub test_mode: bool,
    /// Maximum upload size in bytes
    pub max_upload_size: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub data_dir: String,
    /// Canonical public URL, used by robots.txt and the sitemap
    pub site_url: String,
}

#[derive(Debug, Clone)]
pub enum StorageBackend {
    Local,
    Supabase,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for local storage backend
    pub local_storage_path: String,
    /// Supabase project URL (required when backend is supabase)
    pub supabase_url: Option<String>,
    /// Supabase service role key (required when backend is supabase)
    pub supabase_service_key: Option<String>,
    pub bucket: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for session tokens
    pub session_secret: Vec<u8>,
    /// Whether `SESSION_SECRET` was set; a generated secret invalidates
    /// sessions on every restart.
    pub session_secret_configured: bool,
    pub secure_cookies: bool,
    pub admin: Option<AdminAccount>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &"<redacted>")
            .field("session_secret_configured", &self.session_secret_configured)
            .field("secure_cookies", &self.secure_cookies)
            .field("admin", &self.admin.as_ref().map(|a| &a.email))
            .finish()
    }
}

/// The admin account provisioned at startup
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            data_dir: "./data".to_string(),
            site_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_storage_path: "./uploads".to_string(),
            supabase_url: None,
            supabase_service_key: None,
            bucket: "uploads".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| var(name).map(|v| v == "true" || v == "1").unwrap_or(false);

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            bind_address: var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            data_dir: var("DATA_DIR").unwrap_or(defaults.data_dir),
            site_url: var("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.site_url),
        };

        let backend = match var("STORAGE_BACKEND")
            .unwrap_or_else(|| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "supabase" => StorageBackend::Supabase,
            _ => StorageBackend::Local,
        };

        let storage_defaults = StorageConfig::default();
        let storage = StorageConfig {
            backend,
            local_storage_path: var("LOCAL_STORAGE_PATH")
                .unwrap_or(storage_defaults.local_storage_path),
            supabase_url: var("SUPABASE_URL").map(|url| url.trim_end_matches('/').to_string()),
            supabase_service_key: var("SUPABASE_SERVICE_KEY"),
            bucket: var("STORAGE_BUCKET").unwrap_or(storage_defaults.bucket),
        };

        let (session_secret, session_secret_configured) = match var("SESSION_SECRET") {
            Some(secret) => (secret.into_bytes(), true),
            None => (random_secret()?, false),
        };

        let admin = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD_HASH")) {
            (Some(email), Some(password_hash)) => Some(AdminAccount {
                email,
                name: var("ADMIN_NAME").unwrap_or_else(|| "Admin".to_string()),
                password_hash,
            }),
            _ => None,
        };

        let max_upload_size = var("MAX_UPLOAD_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(10 * 1024 * 1024); // 10MB

        let config = Config {
            server,
            storage,
            auth: AuthConfig {
                session_secret,
                session_secret_configured,
                secure_cookies: flag("SECURE_COOKIES"),
                admin,
            },
            seed_defaults: flag("SEED_DEFAULTS"),
            test_mode: flag("TEST_MODE"),
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.session_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ValidationError(format!(
                "SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        if matches!(self.storage.backend, StorageBackend::Supabase)
            && (self.storage.supabase_url.is_none() || self.storage.supabase_service_key.is_none())
        {
            return Err(ConfigError::ValidationError(
                "SUPABASE_URL and SUPABASE_SERVICE_KEY are required when STORAGE_BACKEND=supabase"
                    .to_string(),
            ));
        }

        if let Some(ref admin) = self.auth.admin {
            if !admin.email.contains('@') {
                return Err(ConfigError::ValidationError(
                    "ADMIN_EMAIL must be an email address".to_string(),
                ));
            }
            if !admin.password_hash.starts_with("$2") {
                return Err(ConfigError::ValidationError(
                    "ADMIN_PASSWORD_HASH must be a bcrypt hash".to_string(),
                ));
            }
        }

        if self.max_upload_size == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_SIZE must be greater than 0".to_string(),
            ));
        }

        if !self.auth.session_secret_configured {
            tracing::warn!("SESSION_SECRET is not set; sessions will not survive a restart");
        }

        Ok(())
    }
}

fn random_secret() -> Result<Vec<u8>, ConfigError> {
    use ring::rand::SecureRandom;

    let mut secret = vec![0u8; MIN_SECRET_LEN];
    ring::rand::SystemRandom::new()
        .fill(&mut secret)
        .map_err(|_| ConfigError::ValidationError("failed to generate session secret".to_string()))?;
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert!(matches!(config.storage.backend, StorageBackend::Local));
        assert_eq!(config.auth.session_secret.len(), MIN_SECRET_LEN);
        assert!(!config.auth.session_secret_configured);
        assert!(config.auth.admin.is_none());
        assert!(!config.test_mode);
        assert_eq!(config.max_upload_size, 10 * 1024 * 1024);
    }

    #[test]
    fn short_secret_is_rejected() {
        assert!(load(&[("SESSION_SECRET", "too-short")]).is_err());
    }

    #[test]
    fn supabase_needs_credentials() {
        assert!(load(&[("STORAGE_BACKEND", "supabase")]).is_err());

        let config = load(&[
            ("STORAGE_BACKEND", "supabase"),
            ("SUPABASE_URL", "https://project.supabase.co/"),
            ("SUPABASE_SERVICE_KEY", "service-key"),
        ])
        .unwrap();
        assert!(matches!(config.storage.backend, StorageBackend::Supabase));
        assert_eq!(
            config.storage.supabase_url.as_deref(),
            Some("https://project.supabase.co")
        );
    }

    #[test]
    fn admin_account_requires_a_bcrypt_hash() {
        assert!(load(&[
            ("ADMIN_EMAIL", "admin@example.com"),
            ("ADMIN_PASSWORD_HASH", "plaintext"),
        ])
        .is_err());

        let config = load(&[
            ("ADMIN_EMAIL", "admin@example.com"),
            (
                "ADMIN_PASSWORD_HASH",
                "$2b$10$abcdefghijklmnopqrstuuABCDEFGHIJKLMNOPQRSTUVWXYZ01234",
            ),
        ])
        .unwrap();
        let admin = config.auth.admin.unwrap();
        assert_eq!(admin.name, "Admin");
    }
}
