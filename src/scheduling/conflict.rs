//! 课程冲突检查
//!
//! 判断候选课程能否加入（或更新到）课表：同一班组、同一教师、同一教室
//! 在同一天、可能同周的时间段内都不能重叠。

use tracing::warn;

use crate::models::lessons::entities::{ConflictDimension, Lesson, Violation};
use crate::utils::validate::is_valid_time;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// 星期几的英文名（1 = Monday）
pub fn day_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        1..=7 => DAY_NAMES[usize::from(day_of_week - 1)],
        _ => "Unknown day",
    }
}

// 格式非法的课程不参与任何比较
fn is_well_formed(lesson: &Lesson) -> bool {
    (1..=7).contains(&lesson.day_of_week)
        && is_valid_time(&lesson.start_time)
        && is_valid_time(&lesson.end_time)
        && lesson.start_time < lesson.end_time
}

fn warn_malformed(lesson: &Lesson) {
    warn!(
        lesson_id = %lesson.id,
        day_of_week = lesson.day_of_week,
        start_time = %lesson.start_time,
        end_time = %lesson.end_time,
        "Malformed lesson skipped during conflict check"
    );
}

/// 两节课是否会在同一时刻进行
///
/// 同一天、单双周可能同周、时间区间重叠（首尾相接不算重叠）。
/// 只比较时间，不比较资源。两节课都必须格式合法。
pub fn lessons_overlap(a: &Lesson, b: &Lesson) -> bool {
    a.day_of_week == b.day_of_week
        && a.week_type.is_compatible_with(b.week_type)
        && a.start_time < b.end_time
        && b.start_time < a.end_time
}

fn same_room(a: &str, b: &str) -> bool {
    let a = a.trim();
    !a.is_empty() && a == b.trim()
}

fn describe_slot(lesson: &Lesson) -> String {
    format!(
        "{} {}-{} ({})",
        day_name(lesson.day_of_week),
        lesson.start_time,
        lesson.end_time,
        lesson.week_type.describe()
    )
}

fn violation(other: &Lesson, dimension: ConflictDimension, message: String) -> Violation {
    Violation {
        lesson_id: other.id.clone(),
        dimension,
        message,
    }
}

/// 检查候选课程与已有课程之间的全部冲突
///
/// - 与候选课程 `id` 相同的课程会被跳过，更新课程时不会与自身冲突。
/// - 一节已有课程可能同时产生多条冲突（例如同班组且同教师）。
///   顺序为：按 `existing` 的顺序，每节课内按 group、teacher、room。
/// - 未指派教师的课程不产生教师冲突；空教室不产生教室冲突。
/// - 时间或星期格式非法的课程视为不冲突，并记录警告日志。
///
/// 返回空列表表示可以安全写入。
pub fn can_add_lesson(candidate: &Lesson, existing: &[Lesson]) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !is_well_formed(candidate) {
        warn_malformed(candidate);
        return violations;
    }

    for other in existing {
        if other.id == candidate.id {
            continue;
        }
        if !is_well_formed(other) {
            warn_malformed(other);
            continue;
        }
        if !lessons_overlap(candidate, other) {
            continue;
        }

        let slot = describe_slot(other);

        if candidate.group_id == other.group_id {
            violations.push(violation(
                other,
                ConflictDimension::Group,
                format!("Group {} already has a lesson on {slot}", other.group_id),
            ));
        }

        if let Some(teacher_id) = &candidate.teacher_id
            && other.teacher_id.as_ref() == Some(teacher_id)
        {
            violations.push(violation(
                other,
                ConflictDimension::Teacher,
                format!("Teacher {teacher_id} is already teaching on {slot}"),
            ));
        }

        if same_room(&candidate.room, &other.room) {
            violations.push(violation(
                other,
                ConflictDimension::Room,
                format!("Room {} is already occupied on {slot}", other.room.trim()),
            ));
        }
    }

    violations
}
