//! Catalog seeding.
//!
//! Loads the static school catalog when the university table is empty, or
//! unconditionally after wiping the catalog when `force` is set. Each school
//! is written in its own transaction; a failing school is logged and the
//! rest still load. Logos are generated only once a school's rows are
//! committed, so a rolled-back school leaves nothing on disk.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use super::seed_catalog::{self, SchoolSeed};
use crate::errors::AppResult;
use crate::infra::{FileStorage, UnitOfWork};

/// Outcome of one seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// True when existing data made the run a no-op
    pub skipped: bool,
    pub seeded: usize,
    pub failed: usize,
}

#[async_trait]
pub trait SeedService: Send + Sync {
    async fn seed(&self, force: bool) -> AppResult<SeedReport>;
}

pub struct CatalogSeeder<U: UnitOfWork> {
    uow: Arc<U>,
    storage: FileStorage,
    schools: Vec<SchoolSeed>,
}

impl<U: UnitOfWork> CatalogSeeder<U> {
    pub fn new(uow: Arc<U>, storage: FileStorage) -> Self {
        Self::with_catalog(uow, storage, seed_catalog::schools())
    }

    pub fn with_catalog(uow: Arc<U>, storage: FileStorage, schools: Vec<SchoolSeed>) -> Self {
        Self {
            uow,
            storage,
            schools,
        }
    }

    /// Critères reference filières which reference universities, so the
    /// wipe runs child tables first. Logos and uploads of the wiped
    /// universities go too.
    async fn wipe(&self) -> AppResult<()> {
        let criteres = self.uow.criteres().delete_all().await?;
        let filieres = self.uow.filieres().delete_all().await?;
        let universities = self.uow.universities().delete_all().await?;
        self.storage.clear_universities().await?;
        tracing::warn!(criteres, filieres, universities, "Force reseed wiped the catalog");
        Ok(())
    }

    async fn seed_school(&self, school: &SchoolSeed) -> AppResult<i64> {
        let school_rows = school.clone();
        let id = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let university = ctx
                        .universities()
                        .create(school_rows.university_request())
                        .await?;
                    let id = university.id_university;

                    for program in &school_rows.filieres {
                        let filiere = ctx.filieres().create(program.filiere_request(id)).await?;
                        if let Some(critere) = &program.critere {
                            ctx.criteres().create(critere.critere_request(filiere.id)).await?;
                        }
                    }

                    Ok(id)
                })
            })
            .await?;

        self.attach_logo(id, school).await;
        Ok(id)
    }

    /// Generate the placeholder logo and point the university at it. The
    /// school's rows are already committed, so failures here only cost the
    /// image; a logo that cannot be linked is removed again.
    async fn attach_logo(&self, id: i64, school: &SchoolSeed) {
        let Some(url) = self
            .storage
            .write_logo_svg(id, school.logo_abbr, school.logo_color)
            .await
        else {
            return;
        };

        if let Err(e) = self.uow.universities().set_image_url(id, Some(url.clone())).await {
            tracing::warn!(university_id = id, error = %e, "Could not link generated logo");
            self.storage.delete_by_url(&url).await;
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> SeedService for CatalogSeeder<U> {
    async fn seed(&self, force: bool) -> AppResult<SeedReport> {
        if !force && self.uow.universities().count().await? > 0 {
            tracing::info!("Catalog already present, skipping seed (set SEED_FORCE=true to reseed)");
            return Ok(SeedReport {
                skipped: true,
                ..SeedReport::default()
            });
        }

        if force {
            self.wipe().await?;
        }

        tracing::info!(schools = self.schools.len(), "Seeding institutions");
        let mut report = SeedReport::default();
        for school in &self.schools {
            let name = school.name;
            match self.seed_school(school).await {
                Ok(id) => {
                    tracing::debug!(university_id = id, name, "Seeded institution");
                    report.seeded += 1;
                }
                Err(e) => {
                    tracing::error!(name, error = %e, "Failed to seed institution");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(seeded = report.seeded, failed = report.failed, "Seeding finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::unit_of_work::testing::TestUnitOfWork;
    use crate::services::university_service::tests::university;

    fn storage(dir: &tempfile::TempDir) -> FileStorage {
        FileStorage::new(dir.path(), "http://localhost:8080")
    }

    #[tokio::test]
    async fn test_skips_when_catalog_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut uow = TestUnitOfWork::default();
        uow.universities.expect_count().returning(|| Ok(12));
        uow.universities.expect_delete_all().never();

        let seeder = CatalogSeeder::new(uow.build(), storage(&dir));
        let report = seeder.seed(false).await.unwrap();
        assert!(report.skipped);
        assert_eq!(report.seeded, 0);
    }

    #[tokio::test]
    async fn test_force_wipes_children_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut seq = mockall::Sequence::new();
        let mut uow = TestUnitOfWork::default();
        uow.universities.expect_count().never();
        uow.criteres
            .expect_delete_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(4));
        uow.filieres
            .expect_delete_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(4));
        uow.universities
            .expect_delete_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(1));

        let seeder = CatalogSeeder::with_catalog(uow.build(), storage(&dir), Vec::new());
        let report = seeder.seed(true).await.unwrap();
        assert!(!report.skipped);
        assert_eq!(report, SeedReport::default());
    }

    #[tokio::test]
    async fn test_force_clears_old_logos() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        storage.write_logo_svg(41, "EHTP", "#283593").await.unwrap();

        let mut uow = TestUnitOfWork::default();
        uow.criteres.expect_delete_all().returning(|| Ok(0));
        uow.filieres.expect_delete_all().returning(|| Ok(0));
        uow.universities.expect_delete_all().returning(|| Ok(1));

        let seeder = CatalogSeeder::with_catalog(uow.build(), storage, Vec::new());
        seeder.seed(true).await.unwrap();

        assert!(!dir.path().join("universities/41/logo.svg").exists());
    }

    #[tokio::test]
    async fn test_failing_school_is_counted_and_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut uow = TestUnitOfWork::default();
        uow.universities.expect_count().returning(|| Ok(0));
        uow.universities.expect_set_image_url().never();

        // The test unit of work rejects every transaction.
        let schools = seed_catalog::schools().into_iter().take(2).collect();
        let seeder = CatalogSeeder::with_catalog(uow.build(), storage(&dir), schools);
        let report = seeder.seed(false).await.unwrap();
        assert_eq!(report.seeded, 0);
        assert_eq!(report.failed, 2);
        assert!(!dir.path().join("universities").exists());
    }

    #[tokio::test]
    async fn test_logo_linked_after_commit() {
        let dir = tempfile::tempdir().unwrap();
        let mut uow = TestUnitOfWork::default();
        uow.universities
            .expect_set_image_url()
            .withf(|id, url| {
                *id == 5
                    && url.as_deref()
                        == Some("http://localhost:8080/uploads/universities/5/logo.svg")
            })
            .times(1)
            .returning(|id, url| {
                let mut u = university(id, "EMI");
                u.image_url = url;
                Ok(u)
            });

        let school = seed_catalog::schools().remove(0);
        let seeder = CatalogSeeder::with_catalog(uow.build(), storage(&dir), Vec::new());
        seeder.attach_logo(5, &school).await;

        assert!(dir.path().join("universities/5/logo.svg").exists());
    }

    #[tokio::test]
    async fn test_unlinked_logo_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let mut uow = TestUnitOfWork::default();
        uow.universities
            .expect_set_image_url()
            .times(1)
            .returning(|_, _| Err(AppError::internal("connection closed")));

        let school = seed_catalog::schools().remove(0);
        let seeder = CatalogSeeder::with_catalog(uow.build(), storage(&dir), Vec::new());
        seeder.attach_logo(5, &school).await;

        assert!(!dir.path().join("universities/5/logo.svg").exists());
    }
}
