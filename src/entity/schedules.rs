//! 课表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub group_id: String,
    pub semester_id: String,
    pub semester_label: Option<String>,
    pub year_label: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_schedule(self) -> crate::models::schedules::entities::Schedule {
        use crate::models::schedules::entities::Schedule;
        use chrono::{DateTime, Utc};

        Schedule {
            id: self.id,
            group_id: self.group_id,
            semester_id: self.semester_id,
            semester_label: self.semester_label,
            year_label: self.year_label,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
