//! 加权成绩计算
//!
//! 课程总评 = Σ (score × points_weight)，只统计已评分的提交。
//! 没有任何已评分作业时总评为 None（区别于真实的 0 分）。
//! 权重之和不足 1.0 时不做归一化：权重在课程设计时固定。

/// 参与总评计算的单项：作业权重 + 已评分提交的分数（未评分为 None）
#[derive(Debug, Clone, Copy)]
pub struct GradedItem {
    pub points_weight: f64,
    pub score: Option<f64>,
}

/// 课程加权总评
///
/// 返回 None 表示"尚无成绩数据"；只要有一项已评分（哪怕 0 分）就返回 Some。
pub fn weighted_total(items: &[GradedItem]) -> Option<f64> {
    let mut total = 0.0;
    let mut any_graded = false;
    for item in items {
        if let Some(score) = item.score {
            total += score * item.points_weight;
            any_graded = true;
        }
    }
    any_graded.then_some(total)
}

/// 已评分数量
pub fn graded_count(items: &[GradedItem]) -> i64 {
    items.iter().filter(|i| i.score.is_some()).count() as i64
}

/// 完成度百分比（已评分 / 总作业数，四舍五入）
pub fn completion_percent(graded: i64, total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        ((graded as f64 / total as f64) * 100.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(weight: f64, score: Option<f64>) -> GradedItem {
        GradedItem {
            points_weight: weight,
            score,
        }
    }

    #[test]
    fn test_no_graded_assignments_is_null() {
        let items = [item(0.3, None), item(0.7, None)];
        assert_eq!(weighted_total(&items), None);
        assert_eq!(graded_count(&items), 0);
    }

    #[test]
    fn test_zero_score_is_not_null() {
        // 一项 0 分已评分、其余未评分：总评是非空的 0.0，而不是 None
        let items = [item(0.4, Some(0.0)), item(0.6, None)];
        assert_eq!(weighted_total(&items), Some(0.0));
        assert_eq!(graded_count(&items), 1);
    }

    #[test]
    fn test_weighted_sum() {
        let items = [item(0.3, Some(95.0)), item(0.2, Some(80.0)), item(0.5, None)];
        let total = weighted_total(&items).unwrap();
        assert!((total - (95.0 * 0.3 + 80.0 * 0.2)).abs() < 1e-9);
        assert_eq!(graded_count(&items), 2);
    }

    #[test]
    fn test_no_renormalization() {
        // 三个 20% 权重的作业全部满分，总评 60 分，剩余 40% 不会被摊平
        let items = [
            item(0.2, Some(100.0)),
            item(0.2, Some(100.0)),
            item(0.2, Some(100.0)),
        ];
        let total = weighted_total(&items).unwrap();
        assert!((total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_course_is_null() {
        assert_eq!(weighted_total(&[]), None);
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(3, 5), 60);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(0, 4), 0);
    }
}
