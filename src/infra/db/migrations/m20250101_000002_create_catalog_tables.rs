//! Migration: universities, their filières and admission criteria.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Universities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Universities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Universities::Name).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(Universities::Location).string_len(255).null())
                    .col(ColumnDef::new(Universities::Type).string_len(100).null())
                    .col(ColumnDef::new(Universities::Description).text().null())
                    .col(ColumnDef::new(Universities::Website).string_len(255).null())
                    .col(ColumnDef::new(Universities::ContactEmail).string_len(255).null())
                    .col(ColumnDef::new(Universities::Phone).string_len(20).null())
                    .col(ColumnDef::new(Universities::AccreditationStatus).string_len(100).null())
                    .col(ColumnDef::new(Universities::Programs).text().null())
                    .col(ColumnDef::new(Universities::ImageUrl).string_len(512).null())
                    .col(ColumnDef::new(Universities::Slug).string_len(100).null().unique_key())
                    .col(ColumnDef::new(Universities::HeaderImageUrl).string_len(512).null())
                    .col(ColumnDef::new(Universities::EarthViewUrl).string_len(512).null())
                    .col(ColumnDef::new(Universities::GalleryImages).text().null())
                    .col(ColumnDef::new(Universities::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Universities::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Filieres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Filieres::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Filieres::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Filieres::UniversityId).big_integer().not_null())
                    .col(ColumnDef::new(Filieres::CritereAdmission).text().null())
                    .col(ColumnDef::new(Filieres::DurationYears).integer().null())
                    .col(ColumnDef::new(Filieres::TuitionFee).double().null())
                    .col(ColumnDef::new(Filieres::AdmissionType).string_len(100).null())
                    .col(ColumnDef::new(Filieres::Language).string_len(50).null())
                    .col(ColumnDef::new(Filieres::SeatsAvailable).integer().null())
                    .col(ColumnDef::new(Filieres::ApplicationDeadline).date().null())
                    .col(ColumnDef::new(Filieres::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Filieres::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_filieres_university")
                            .from(Filieres::Table, Filieres::UniversityId)
                            .to(Universities::Table, Universities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_filieres_university_name")
                    .table(Filieres::Table)
                    .col(Filieres::UniversityId)
                    .col(Filieres::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Criteres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Criteres::FiliereId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Criteres::AnneeAcademique).string_len(20).not_null())
                    .col(ColumnDef::new(Criteres::TypeCandidat).string_len(100).not_null())
                    .col(ColumnDef::new(Criteres::SerieBacCible).string_len(100).null())
                    .col(ColumnDef::new(Criteres::SeuilCalcul).double().null())
                    .col(ColumnDef::new(Criteres::NoteConcoursEcrit).double().null())
                    .col(ColumnDef::new(Criteres::AEntretien).boolean().not_null().default(false))
                    .col(ColumnDef::new(Criteres::AgeMax).integer().null())
                    .col(ColumnDef::new(Criteres::SeuilMatieresSpecifiques).text().null())
                    .col(ColumnDef::new(Criteres::ScorePrepa).double().null())
                    .col(ColumnDef::new(Criteres::ClassementCnc).integer().null())
                    .col(ColumnDef::new(Criteres::DiplomesRequis).text().null())
                    .col(ColumnDef::new(Criteres::NotesSemestres).text().null())
                    .col(ColumnDef::new(Criteres::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Criteres::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_criteres_filiere")
                            .from(Criteres::Table, Criteres::FiliereId)
                            .to(Filieres::Table, Filieres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Criteres::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Filieres::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Universities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Universities {
    Table,
    Id,
    Name,
    Location,
    Type,
    Description,
    Website,
    ContactEmail,
    Phone,
    AccreditationStatus,
    Programs,
    ImageUrl,
    Slug,
    HeaderImageUrl,
    EarthViewUrl,
    GalleryImages,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Filieres {
    Table,
    Id,
    Name,
    UniversityId,
    CritereAdmission,
    DurationYears,
    TuitionFee,
    AdmissionType,
    Language,
    SeatsAvailable,
    ApplicationDeadline,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Criteres {
    Table,
    FiliereId,
    AnneeAcademique,
    TypeCandidat,
    SerieBacCible,
    SeuilCalcul,
    NoteConcoursEcrit,
    AEntretien,
    AgeMax,
    SeuilMatieresSpecifiques,
    ScorePrepa,
    ClassementCnc,
    DiplomesRequis,
    NotesSemestres,
    CreatedAt,
    UpdatedAt,
}
