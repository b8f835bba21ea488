pub mod lessons;
pub mod schedules;
pub mod system;

pub use lessons::LessonService;
pub use schedules::ScheduleService;
pub use system::SystemService;
