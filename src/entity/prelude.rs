//! 预导入模块，方便使用

pub use super::lessons::{ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel};
pub use super::schedules::{
    ActiveModel as ScheduleActiveModel, Entity as Schedules, Model as ScheduleModel,
};
