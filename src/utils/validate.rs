use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::lessons::entities::Lesson;

// 24 小时制、补零的 HH:MM
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time regex"));

// ID 是不透明字符串：不含空白和控制字符即可
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s\p{Cc}]{1,64}$").expect("Invalid identifier regex"));

/// 一周的第一天（周一）
pub const MIN_DAY_OF_WEEK: u8 = 1;

/// 时间是否为固定宽度的 `HH:MM`
///
/// 只有满足该格式时，字符串的字典序才与时间先后一致。
pub fn is_valid_time(time: &str) -> bool {
    TIME_RE.is_match(time)
}

pub fn validate_time(field: &str, time: &str) -> Result<(), String> {
    if !is_valid_time(time) {
        return Err(format!("{field} must be in 24-hour HH:MM format, got '{time}'"));
    }
    Ok(())
}

pub fn validate_time_range(start_time: &str, end_time: &str) -> Result<(), String> {
    validate_time("start_time", start_time)?;
    validate_time("end_time", end_time)?;
    // 格式固定，可直接按字符串比较
    if start_time >= end_time {
        return Err(format!(
            "start_time ({start_time}) must be earlier than end_time ({end_time})"
        ));
    }
    Ok(())
}

pub fn validate_day_of_week(day_of_week: u8, max_day_of_week: u8) -> Result<(), String> {
    if !(MIN_DAY_OF_WEEK..=max_day_of_week).contains(&day_of_week) {
        return Err(format!(
            "day_of_week must be between {MIN_DAY_OF_WEEK} and {max_day_of_week}, got {day_of_week}"
        ));
    }
    Ok(())
}

pub fn validate_identifier(field: &str, value: &str) -> Result<(), String> {
    if !IDENTIFIER_RE.is_match(value) {
        return Err(format!(
            "{field} must be 1-64 characters without whitespace or control characters"
        ));
    }
    Ok(())
}

/// 课程字段校验结果
#[derive(Debug, Clone)]
pub struct LessonValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl LessonValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 在冲突检查之前校验课程的字段格式
///
/// 收集全部错误，而不是遇到第一个就返回。
pub fn validate_lesson(lesson: &Lesson, max_day_of_week: u8) -> LessonValidationResult {
    let mut errors = Vec::new();

    for (field, value) in [
        ("group_id", lesson.group_id.as_str()),
        ("semester_id", lesson.semester_id.as_str()),
        ("subject_id", lesson.subject_id.as_str()),
    ] {
        if let Err(e) = validate_identifier(field, value) {
            errors.push(e);
        }
    }

    if let Some(teacher_id) = &lesson.teacher_id
        && let Err(e) = validate_identifier("teacher_id", teacher_id)
    {
        errors.push(e);
    }

    if lesson.room.chars().count() > 64 {
        errors.push("room must be at most 64 characters".to_string());
    }

    if let Err(e) = validate_day_of_week(lesson.day_of_week, max_day_of_week) {
        errors.push(e);
    }

    if let Err(e) = validate_time_range(&lesson.start_time, &lesson.end_time) {
        errors.push(e);
    }

    LessonValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
