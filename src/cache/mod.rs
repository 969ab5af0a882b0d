//! 对象缓存
//!
//! 目前只缓存认证中间件查询到的用户（`user:{id}`），值为 JSON 字符串。

pub mod moka;
pub mod redis;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::{Result, TrackerError};

pub use self::moka::MokaCacheWrapper;
pub use self::redis::RedisObjectCache;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端出错，调用方应回退到数据库
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用配置的默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 用户缓存键
pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// 按配置创建缓存后端，redis 不可用时回退到内存缓存
pub async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let config = AppConfig::get();
    let cache_type = config.cache.cache_type.as_str();

    match cache_type {
        "moka" => Ok(Arc::new(MokaCacheWrapper::new())),
        "redis" => match RedisObjectCache::new().await {
            Ok(cache) => Ok(Arc::new(cache)),
            Err(e) => {
                warn!("Failed to create redis cache: {}", e);
                warn!("Falling back to Moka (in-memory) cache backend");
                Ok(Arc::new(MokaCacheWrapper::new()))
            }
        },
        other => Err(TrackerError::cache_connection(format!(
            "Unsupported cache type: {other} (expected moka or redis)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_cache_key() {
        assert_eq!(user_cache_key(12), "user:12");
    }
}
