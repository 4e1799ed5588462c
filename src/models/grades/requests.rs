use serde::Deserialize;
use ts_rs::TS;

/// 成绩单查询参数（GET /api/grades）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeReportParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    // 对外参数名是 courseId
    #[serde(default, alias = "courseId")]
    pub course_id: Option<i64>,
}

fn default_limit() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_id_accepts_camel_case_alias() {
        let params: GradeReportParams = serde_json::from_str(r#"{"courseId": 7}"#).unwrap();
        assert_eq!(params.course_id, Some(7));

        let params: GradeReportParams = serde_json::from_str(r#"{"course_id": 7}"#).unwrap();
        assert_eq!(params.course_id, Some(7));
    }

    #[test]
    fn test_defaults() {
        let params: GradeReportParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
        assert_eq!(params.course_id, None);
    }
}
