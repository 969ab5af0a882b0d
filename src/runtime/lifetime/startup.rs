use crate::cache::{ObjectCache, create_cache};
use crate::errors::{Result, TrackerError};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 生成随机密码，保证包含大小写字母和数字
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    use rand::seq::SliceRandom;

    const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
    const DIGITS: &[u8] = b"23456789";
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";

    let mut rng = rand::rng();
    let mut chars: Vec<char> = [UPPER, LOWER, DIGITS]
        .iter()
        .map(|set| set[rng.random_range(0..set.len())] as char)
        .collect();
    while chars.len() < length {
        chars.push(CHARSET[rng.random_range(0..CHARSET.len())] as char);
    }
    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}

/// 初始化默认教师账号
/// 如果数据库中没有任何用户，则创建一个 is_staff 的 admin 账号
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping admin seed",
            count
        );
        return Ok(());
    }
    info!("No users found in database, creating default staff account...");

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let admin_request = CreateUserRequest {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password: hash_password(&password)?,
        is_staff: true,
        first_name: Some("Administrator".to_string()),
        last_name: None,
    };

    let user = storage.create_user(admin_request).await?;
    info!(
        "Default staff account created (ID: {}, username: {})",
        user.id, user.username
    );
    Ok(())
}

/// 准备服务器启动的上下文：存储（含迁移）、默认账号与缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| TrackerError::startup("Failed to install rustls crypto provider"))?;

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_admin(&storage).await {
        warn!("Failed to seed admin account: {}", e);
    }

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
