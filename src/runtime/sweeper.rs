//! 过期作业后台扫描任务
//!
//! 周期性地把已过期且不允许迟交的 published 作业批量置为 closed。
//! 关闭语句本身幂等，重复执行或与手动触发并发都是安全的。

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::storage::Storage;

/// 启动后台扫描循环；interval_seconds 为 0 时不启动
pub fn spawn_auto_close_sweeper(storage: Arc<dyn Storage>, config: &AppConfig) {
    let interval_seconds = config.sweep.interval_seconds;
    if interval_seconds == 0 {
        warn!("Auto-close sweeper disabled (sweep.interval_seconds = 0)");
        return;
    }

    info!(
        "Auto-close sweeper started (interval: {}s)",
        interval_seconds
    );

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));
        // 错过的 tick 不补跑
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            match storage.auto_close_expired(chrono::Utc::now()).await {
                Ok(0) => {}
                Ok(closed) => {
                    info!("Auto-close sweeper closed {} expired assignment(s)", closed);
                }
                Err(e) => {
                    error!("Auto-close sweeper failed: {}", e);
                }
            }
        }
    });
}
