use crate::cache::{ObjectCache, create_object_cache};
use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认运营账号
/// 如果数据库中没有任何用户，则创建一个默认的 operator 账号
async fn seed_operator(storage: &Arc<dyn Storage>, config: &AppConfig) {
    // 检查是否已有运营账号
    match storage.get_user_by_username("operator").await {
        Ok(Some(_)) => {
            debug!("Operator account already exists, skipping seed");
            return;
        }
        Ok(None) => {
            info!("No operator account found, creating default operator account...");
        }
        Err(e) => {
            warn!("Failed to look up operator account: {}, skipping seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("OPERATOR_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  OPERATOR PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated operator password: {}", pwd);
        warn!("  Please save this password or set OPERATOR_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password, &config.argon2) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash operator password: {}, skipping seed", e);
            return;
        }
    };

    // 创建运营账号
    let operator_request = CreateUserRequest {
        username: "operator".to_string(),
        email: "operator@localhost".to_string(),
        password: password_hash,
        role: UserRole::Operator,
        display_name: Some("Platform Operator".to_string()),
        avatar_url: None,
    };

    match storage.create_user(operator_request).await {
        Ok(user) => {
            info!(
                "Default operator account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create operator account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和种子账号等
pub async fn prepare_server_startup(config: &AppConfig) -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage(config)
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认运营账号（如果需要）
    seed_operator(&storage, config).await;

    // 创建缓存实例（配置的后端失败时回退到内存缓存）
    let cache = create_object_cache(config)
        .await
        .expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
