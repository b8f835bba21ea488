/// 响应体中的业务错误码
///
/// 0 表示成功；1xxx 为通用错误；2xxx 课表；3xxx 课程。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    InternalServerError = 1500,

    ScheduleNotFound = 2000,
    ScheduleAlreadyExists = 2001,
    ScheduleCreationFailed = 2002,
    ScheduleDeleteFailed = 2003,

    LessonNotFound = 3000,
    LessonValidationFailed = 3001,
    LessonConflict = 3002,
    LessonCommitFailed = 3003,
    LessonDeleteFailed = 3004,
    LessonCommitContended = 3005,
}
