pub mod lessons;

pub mod schedules;

pub mod system;

pub use lessons::configure_lessons_routes;
pub use schedules::configure_schedules_routes;
pub use system::configure_system_routes;
