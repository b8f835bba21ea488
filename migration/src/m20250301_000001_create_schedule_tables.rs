use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课表表（每个 group + semester 一张课表）
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::GroupId).string().not_null())
                    .col(ColumnDef::new(Schedules::SemesterId).string().not_null())
                    .col(ColumnDef::new(Schedules::SemesterLabel).string().null())
                    .col(ColumnDef::new(Schedules::YearLabel).string().null())
                    .col(ColumnDef::new(Schedules::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lessons::GroupId).string().not_null())
                    .col(ColumnDef::new(Lessons::SemesterId).string().not_null())
                    .col(ColumnDef::new(Lessons::SubjectId).string().not_null())
                    .col(ColumnDef::new(Lessons::TeacherId).string().null())
                    .col(ColumnDef::new(Lessons::Room).string().not_null())
                    .col(ColumnDef::new(Lessons::LessonType).string().not_null())
                    .col(ColumnDef::new(Lessons::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(Lessons::StartTime).string().not_null())
                    .col(ColumnDef::new(Lessons::EndTime).string().not_null())
                    .col(ColumnDef::new(Lessons::WeekType).string().not_null())
                    .col(ColumnDef::new(Lessons::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_schedules_group_semester")
                    .table(Schedules::Table)
                    .col(Schedules::GroupId)
                    .col(Schedules::SemesterId)
                    .to_owned(),
            )
            .await?;

        // 课程索引：冲突检查按 group / teacher / room 三个维度取范围
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_group_semester")
                    .table(Lessons::Table)
                    .col(Lessons::GroupId)
                    .col(Lessons::SemesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_teacher_id")
                    .table(Lessons::Table)
                    .col(Lessons::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_room")
                    .table(Lessons::Table)
                    .col(Lessons::Room)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_day_of_week")
                    .table(Lessons::Table)
                    .col(Lessons::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    GroupId,
    SemesterId,
    SemesterLabel,
    YearLabel,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lessons {
    #[sea_orm(iden = "lessons")]
    Table,
    Id,
    GroupId,
    SemesterId,
    SubjectId,
    TeacherId,
    Room,
    LessonType,
    DayOfWeek,
    StartTime,
    EndTime,
    WeekType,
    CreatedAt,
    UpdatedAt,
}
