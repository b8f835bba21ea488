use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程类型（不参与冲突判断）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "lesson.ts")]
pub enum LessonType {
    Lecture,    // 讲授
    Seminar,    // 研讨 / 实践
    Laboratory, // 实验
    Exam,       // 考试
}

impl LessonType {
    pub const LECTURE: &'static str = "lecture";
    pub const SEMINAR: &'static str = "seminar";
    pub const LABORATORY: &'static str = "laboratory";
    pub const EXAM: &'static str = "exam";
}

// 旧数据中的别名在这里统一：practice -> seminar，lab -> laboratory
impl<'de> Deserialize<'de> for LessonType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<LessonType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid lesson type: '{s}'. Supported types: lecture, seminar, laboratory, exam"
            ))
        })
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LessonType::Lecture => write!(f, "{}", LessonType::LECTURE),
            LessonType::Seminar => write!(f, "{}", LessonType::SEMINAR),
            LessonType::Laboratory => write!(f, "{}", LessonType::LABORATORY),
            LessonType::Exam => write!(f, "{}", LessonType::EXAM),
        }
    }
}

impl std::str::FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lecture" => Ok(LessonType::Lecture),
            "seminar" | "practice" => Ok(LessonType::Seminar),
            "laboratory" | "lab" => Ok(LessonType::Laboratory),
            "exam" => Ok(LessonType::Exam),
            _ => Err(format!("Invalid lesson type: {s}")),
        }
    }
}

// 单双周
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "lesson.ts")]
pub enum WeekType {
    #[default]
    All, // 每周
    Odd,  // 单周
    Even, // 双周
}

impl WeekType {
    /// 两种周类型是否可能出现在同一周
    ///
    /// `all` 与任何类型兼容；`odd` 与 `even` 永不同周。
    pub fn is_compatible_with(self, other: WeekType) -> bool {
        !matches!(
            (self, other),
            (WeekType::Odd, WeekType::Even) | (WeekType::Even, WeekType::Odd)
        )
    }

    /// 用于提示信息的描述
    pub fn describe(self) -> &'static str {
        match self {
            WeekType::All => "every week",
            WeekType::Odd => "odd weeks",
            WeekType::Even => "even weeks",
        }
    }
}

impl<'de> Deserialize<'de> for WeekType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<WeekType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid week type: '{s}'. Supported types: all, odd, even"
            ))
        })
    }
}

impl std::fmt::Display for WeekType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekType::All => write!(f, "all"),
            WeekType::Odd => write!(f, "odd"),
            WeekType::Even => write!(f, "even"),
        }
    }
}

impl std::str::FromStr for WeekType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(WeekType::All),
            "odd" => Ok(WeekType::Odd),
            "even" => Ok(WeekType::Even),
            _ => Err(format!("Invalid week type: {s}")),
        }
    }
}

/// 旧数据表示"无教师"的哨兵值
pub const NO_TEACHER_SENTINEL: &str = "no_teacher";

/// 统一"无教师"的表示：`None`、空串、纯空白和 `no_teacher` 都归一为 `None`
pub fn normalize_teacher_id(teacher_id: Option<String>) -> Option<String> {
    teacher_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && id != NO_TEACHER_SENTINEL)
}

// 课程（每周重复的一次课）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct Lesson {
    // 课程ID，创建时分配
    pub id: String,
    // 所属班组
    pub group_id: String,
    // 所属学期
    pub semester_id: String,
    // 科目
    pub subject_id: String,
    // 授课教师（可为空）
    pub teacher_id: Option<String>,
    // 教室
    pub room: String,
    // 课程类型
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    // 星期几（1 = 周一）
    pub day_of_week: u8,
    // 开始时间 HH:MM
    pub start_time: String,
    // 结束时间 HH:MM
    pub end_time: String,
    // 单双周
    pub week_type: WeekType,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 冲突维度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "lesson.ts")]
pub enum ConflictDimension {
    Group,
    Teacher,
    Room,
}

impl std::fmt::Display for ConflictDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictDimension::Group => write!(f, "group"),
            ConflictDimension::Teacher => write!(f, "teacher"),
            ConflictDimension::Room => write!(f, "room"),
        }
    }
}

// 冲突记录：候选课程与某节已有课程在某个资源上重叠
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "lesson.ts")]
pub struct Violation {
    // 与之冲突的已有课程ID
    pub lesson_id: String,
    // 冲突的资源维度
    pub dimension: ConflictDimension,
    // 可直接展示给用户的提示
    pub message: String,
}
