//! 排课核心逻辑
//!
//! 只包含纯函数：不做 I/O，不持有状态，可在任意线程并发调用。

pub mod conflict;

pub use conflict::{can_add_lesson, day_name, lessons_overlap};
