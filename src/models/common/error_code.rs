use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 对外错误码（线上统一为 SCREAMING_SNAKE_CASE 字符串）
// HTTP 状态码由错误码推导，业务层只关心错误码本身
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/error-code.ts")]
pub enum ErrorCode {
    // 通用
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimitExceeded,
    InternalServerError,

    // 用户 / 认证
    AuthFailed,
    RegisterFailed,
    UserNotFound,
    UserAlreadyExists,
    UserNameInvalid,
    UserEmailInvalid,
    UserPasswordInvalid,
    CanNotDeleteCurrentUser,

    // 课程 / 选课
    CourseNotFound,
    CourseNotPublished,
    AlreadyEnrolled,
    NotEnrolled,
    EnrollmentNotFound,

    // 作业生命周期
    AssignmentNotFound,
    WeightBudgetExceeded,
    InvalidStatusTransition,

    // 提交状态机
    SubmissionNotFound,
    AssignmentClosed,
    SubmissionPastDueDate,
    SubmissionAlreadyExists,
    MissingFeedback,
    InvalidScoreRange,
    InsufficientPermissions,
    StateConflict,
}

impl ErrorCode {
    /// 错误码对应的 HTTP 状态码
    pub fn status(&self) -> StatusCode {
        use ErrorCode::*;
        match self {
            Unauthorized | AuthFailed => StatusCode::UNAUTHORIZED,
            Forbidden | InsufficientPermissions | NotEnrolled | CanNotDeleteCurrentUser => {
                StatusCode::FORBIDDEN
            }
            NotFound | UserNotFound | CourseNotFound | AssignmentNotFound | SubmissionNotFound
            | EnrollmentNotFound => StatusCode::NOT_FOUND,
            RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            StateConflict => StatusCode::CONFLICT,
            InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            // 其余均为请求方可修正的校验 / 状态错误
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// 错误码的线上表示（与 serde 序列化一致）
    pub fn as_str(&self) -> &'static str {
        use ErrorCode::*;
        match self {
            BadRequest => "BAD_REQUEST",
            Unauthorized => "UNAUTHORIZED",
            Forbidden => "FORBIDDEN",
            NotFound => "NOT_FOUND",
            RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            InternalServerError => "INTERNAL_SERVER_ERROR",
            AuthFailed => "AUTH_FAILED",
            RegisterFailed => "REGISTER_FAILED",
            UserNotFound => "USER_NOT_FOUND",
            UserAlreadyExists => "USER_ALREADY_EXISTS",
            UserNameInvalid => "USER_NAME_INVALID",
            UserEmailInvalid => "USER_EMAIL_INVALID",
            UserPasswordInvalid => "USER_PASSWORD_INVALID",
            CanNotDeleteCurrentUser => "CAN_NOT_DELETE_CURRENT_USER",
            CourseNotFound => "COURSE_NOT_FOUND",
            CourseNotPublished => "COURSE_NOT_PUBLISHED",
            AlreadyEnrolled => "ALREADY_ENROLLED",
            NotEnrolled => "NOT_ENROLLED",
            EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
            AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            WeightBudgetExceeded => "WEIGHT_BUDGET_EXCEEDED",
            InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            AssignmentClosed => "ASSIGNMENT_CLOSED",
            SubmissionPastDueDate => "SUBMISSION_PAST_DUE_DATE",
            SubmissionAlreadyExists => "SUBMISSION_ALREADY_EXISTS",
            MissingFeedback => "MISSING_FEEDBACK",
            InvalidScoreRange => "INVALID_SCORE_RANGE",
            InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            StateConflict => "STATE_CONFLICT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ErrorCode::InsufficientPermissions.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::AssignmentNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::AssignmentClosed.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::SubmissionAlreadyExists.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::WeightBudgetExceeded.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::StateConflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::RateLimitExceeded.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_as_str_matches_serde() {
        let json = serde_json::to_string(&ErrorCode::SubmissionPastDueDate).unwrap();
        assert_eq!(json, "\"SUBMISSION_PAST_DUE_DATE\"");
        assert_eq!(
            ErrorCode::SubmissionPastDueDate.as_str(),
            "SUBMISSION_PAST_DUE_DATE"
        );
    }
}
