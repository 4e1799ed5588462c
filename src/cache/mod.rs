//! 对象缓存抽象
//!
//! 通过插件注册机制支持多种缓存后端（moka 内存缓存 / Redis），
//! 后端在编译期通过 `declare_object_cache_plugin!` 宏注册，
//! 运行时根据配置选择并构造实例。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::errors::{LMSystemError, Result};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 键存在但取值失败（如后端连接错误）
    ExistsButNoValue,
}

/// 对象缓存后端接口
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明缓存插件，在程序启动时自动注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        ::paste::paste! {
            #[::ctor::ctor]
            #[allow(non_snake_case)]
            fn [<__register_object_cache_plugin_ $plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|config: $crate::config::AppConfig| {
                        ::std::boxed::Box::pin(async move {
                            let cache = $plugin::new(&config)
                                .map_err($crate::errors::LMSystemError::cache_connection)?;
                            Ok(::std::boxed::Box::new(cache)
                                as ::std::boxed::Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        }
    };
}

/// 根据配置构造缓存实例
///
/// 配置的后端构造失败时（例如 Redis 不可达）回退到内存缓存。
pub async fn create_object_cache(config: &AppConfig) -> Result<Arc<dyn ObjectCache>> {
    let cache_type = config.cache.cache_type.as_str();

    register::debug_object_cache_registry();

    let constructor = register::get_object_cache_plugin(cache_type).ok_or_else(|| {
        LMSystemError::cache_plugin_not_found(format!("Cache plugin not found: {cache_type}"))
    })?;

    match constructor(config.clone()).await {
        Ok(cache) => {
            info!("Object cache initialized with backend: {}", cache_type);
            Ok(Arc::from(cache))
        }
        Err(e) if cache_type != "moka" => {
            error!(
                "Failed to initialize cache backend '{}': {}, falling back to moka",
                cache_type, e
            );
            let fallback = register::get_object_cache_plugin("moka").ok_or_else(|| {
                LMSystemError::cache_plugin_not_found("Cache plugin not found: moka")
            })?;
            let cache = fallback(config.clone()).await?;
            Ok(Arc::from(cache))
        }
        Err(e) => Err(e),
    }
}
