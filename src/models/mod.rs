pub mod common;

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod grades;
pub mod submissions;
pub mod users;

pub use common::deletion::Deletion;
pub use common::error_code::ErrorCode;
pub use common::pagination::{
    PaginatedResponse, PaginationInfo, PaginationQuery, normalize_page_size,
};
pub use common::response::{
    ApiError, ApiResponse, error_response, error_response_with_details,
};

// 程序启动时间（用于 /api/system/status 的 uptime）
#[derive(Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
