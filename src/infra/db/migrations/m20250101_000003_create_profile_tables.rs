//! Migration: per-user preferences and the three student profile tracks.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Preferences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Preferences::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Preferences::UserId).big_integer().not_null().unique_key())
                    .col(ColumnDef::new(Preferences::DesiredCities).text().null())
                    .col(ColumnDef::new(Preferences::BudgetRange).string_len(100).null())
                    .col(ColumnDef::new(Preferences::Interests).text().null())
                    .col(ColumnDef::new(Preferences::CareerGoals).text().null())
                    .col(ColumnDef::new(Preferences::LanguagePreferences).string_len(255).null())
                    .col(ColumnDef::new(Preferences::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Preferences::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(&mut user_fk("fk_preferences_user", Preferences::Table, Preferences::UserId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BacStudents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BacStudents::UserId).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(BacStudents::BacMajor).string_len(100).null())
                    .col(ColumnDef::new(BacStudents::BacDegree).string_len(100).null())
                    .col(ColumnDef::new(BacStudents::Grade).double().null())
                    .col(ColumnDef::new(BacStudents::SubjectDegree).string_len(100).null())
                    .col(ColumnDef::new(BacStudents::BacYearGraduation).integer().null())
                    .foreign_key(&mut user_fk("fk_bac_students_user", BacStudents::Table, BacStudents::UserId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Bac2Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bac2Students::UserId).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(Bac2Students::AvgS1).double().null())
                    .col(ColumnDef::new(Bac2Students::AvgS2).double().null())
                    .col(ColumnDef::new(Bac2Students::AvgS3).double().null())
                    .col(ColumnDef::new(Bac2Students::AvgS4).double().null())
                    .col(ColumnDef::new(Bac2Students::DiplomaType).string_len(100).null())
                    .col(ColumnDef::new(Bac2Students::BacMajor).string_len(100).null())
                    .col(ColumnDef::new(Bac2Students::Institution).string_len(255).null())
                    .foreign_key(&mut user_fk("fk_bac2_students_user", Bac2Students::Table, Bac2Students::UserId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PrepaStudents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PrepaStudents::UserId).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(PrepaStudents::PrepaMajor).string_len(100).null())
                    .col(ColumnDef::new(PrepaStudents::CncRating).double().null())
                    .col(ColumnDef::new(PrepaStudents::NotesTrimestre).text().null())
                    .col(ColumnDef::new(PrepaStudents::AnneeBac).string_len(20).null())
                    .foreign_key(&mut user_fk("fk_prepa_students_user", PrepaStudents::Table, PrepaStudents::UserId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            PrepaStudents::Table.into_iden(),
            Bac2Students::Table.into_iden(),
            BacStudents::Table.into_iden(),
            Preferences::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

/// Cascade-on-delete foreign key from `table.column` to `users.id`
fn user_fk<T, C>(name: &str, table: T, column: C) -> ForeignKeyCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(Users::Table, Users::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Preferences {
    Table,
    Id,
    UserId,
    DesiredCities,
    BudgetRange,
    Interests,
    CareerGoals,
    LanguagePreferences,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum BacStudents {
    Table,
    UserId,
    BacMajor,
    BacDegree,
    Grade,
    SubjectDegree,
    BacYearGraduation,
}

#[derive(Iden)]
enum Bac2Students {
    Table,
    UserId,
    AvgS1,
    AvgS2,
    AvgS3,
    AvgS4,
    DiplomaType,
    BacMajor,
    Institution,
}

#[derive(Iden)]
enum PrepaStudents {
    Table,
    UserId,
    PrepaMajor,
    CncRating,
    NotesTrimestre,
    AnneeBac,
}
