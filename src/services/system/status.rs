use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use ts_rs::TS;

use super::SystemService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemStatusResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
    pub server_time: chrono::DateTime<chrono::Utc>,
}

pub async fn get_status(
    _service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let now = chrono::Utc::now();
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (now - start.start_datetime).num_seconds())
        .unwrap_or(0);

    let (system_name, environment) = request
        .app_data::<web::Data<AppConfig>>()
        .map(|config| {
            (
                config.app.system_name.clone(),
                config.app.environment.clone(),
            )
        })
        .unwrap_or_else(|| ("LMSystem".to_string(), "unknown".to_string()));

    let response = SystemStatusResponse {
        system_name,
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment,
        uptime_seconds,
        server_time: now,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "System status")))
}
