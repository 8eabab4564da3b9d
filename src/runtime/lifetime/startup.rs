use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{DlmsError, Result};
use crate::mail::{Mailer, create_mailer};
use crate::models::academics::entities::NewRoleProfile;
use crate::models::users::entities::{UserRole, UserStatus};
use crate::models::users::requests::NewUser;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_token;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@falconacademy.edu.et";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub mailer: Arc<dyn Mailer>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        DlmsError::cache_plugin_not_found(format!("Cache backend '{name}' is not registered"))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// Configured backend, falling back to the in-memory one
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Using {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != "moka" => {
            warn!("{}; falling back to the in-memory cache", e);
            build_cache("moka").await
        }
        Err(e) => Err(e),
    }
}

/// Creates the first admin when the database has no users.
/// The password comes from `ADMIN_PASSWORD` or is generated and logged once.
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(0) => info!("No users found, creating the default admin account"),
        Ok(count) => {
            debug!("Database already has {} user(s), skipping admin seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let generated = generate_token(16);
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD not set, generated admin password: {}", generated);
        warn!("  Sign in as {} and change it", DEFAULT_ADMIN_EMAIL);
        warn!("==========================================================");
        generated
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = NewUser {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        full_name: "System Administrator".to_string(),
        phone: None,
        role: UserRole::Admin,
        status: UserStatus::Active,
    };

    match storage
        .create_user_with_profile(admin, NewRoleProfile::Admin)
        .await
    {
        Ok((user, _)) => info!("Default admin account created (ID: {})", user.id),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// Storage with migrations applied, the admin seed, cache and mailer
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("A rustls crypto provider was already installed");
    }

    crate::cache::register::register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;
    let mailer = create_mailer()?;
    if !AppConfig::get().mail.enabled {
        warn!("Mail delivery disabled, one-time codes are written to the log");
    }

    Ok(StartupContext {
        storage,
        cache,
        mailer,
    })
}
