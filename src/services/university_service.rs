//! University service - catalog of institutions and their images.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{University, UniversityRequest};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{FileStorage, UnitOfWork, UniversityFilter};

fn name_taken(name: &str) -> AppError {
    AppError::conflict(format!("University with name {} already exists", name))
}

#[async_trait]
pub trait UniversityService: Send + Sync {
    async fn create_university(&self, req: UniversityRequest) -> AppResult<University>;

    async fn get_university(&self, id: i64) -> AppResult<University>;

    async fn get_university_by_slug(&self, slug: &str) -> AppResult<University>;

    async fn list_universities(&self, filter: UniversityFilter) -> AppResult<Vec<University>>;

    async fn update_university(&self, id: i64, req: UniversityRequest) -> AppResult<University>;

    /// Deletes the university; its filières and critères go with it.
    async fn delete_university(&self, id: i64) -> AppResult<()>;

    async fn exists_by_name(&self, name: &str) -> AppResult<bool>;

    /// Store a new image and point `image_url` at it, replacing any
    /// previously uploaded file.
    async fn upload_image(
        &self,
        id: i64,
        file_name: Option<String>,
        data: Vec<u8>,
    ) -> AppResult<University>;
}

pub struct UniversityManager<U: UnitOfWork> {
    uow: Arc<U>,
    storage: FileStorage,
}

impl<U: UnitOfWork> UniversityManager<U> {
    pub fn new(uow: Arc<U>, storage: FileStorage) -> Self {
        Self { uow, storage }
    }

    async fn ensure_slug_free(&self, slug: Option<&str>, own_id: Option<i64>) -> AppResult<()> {
        let Some(slug) = slug.filter(|s| !s.is_empty()) else {
            return Ok(());
        };
        match self.uow.universities().find_by_slug(slug).await? {
            Some(other) if Some(other.id_university) != own_id => Err(AppError::conflict(
                format!("University with slug {} already exists", slug),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UniversityService for UniversityManager<U> {
    async fn create_university(&self, req: UniversityRequest) -> AppResult<University> {
        if self.uow.universities().exists_by_name(&req.name).await? {
            return Err(name_taken(&req.name));
        }
        self.ensure_slug_free(req.slug.as_deref(), None).await?;

        let university = self.uow.universities().create(req).await?;
        tracing::info!(university_id = university.id_university, "University created");
        Ok(university)
    }

    async fn get_university(&self, id: i64) -> AppResult<University> {
        self.uow
            .universities()
            .find_by_id(id)
            .await?
            .ok_or_not_found("University", id)
    }

    async fn get_university_by_slug(&self, slug: &str) -> AppResult<University> {
        self.uow
            .universities()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("University not found with slug: {}", slug)))
    }

    async fn list_universities(&self, filter: UniversityFilter) -> AppResult<Vec<University>> {
        self.uow.universities().list(filter).await
    }

    async fn update_university(&self, id: i64, req: UniversityRequest) -> AppResult<University> {
        let existing = self.get_university(id).await?;

        if existing.name != req.name && self.uow.universities().exists_by_name(&req.name).await? {
            return Err(name_taken(&req.name));
        }
        self.ensure_slug_free(req.slug.as_deref(), Some(id)).await?;

        let university = self.uow.universities().update(id, req).await?;
        tracing::info!(university_id = id, "University updated");
        Ok(university)
    }

    async fn delete_university(&self, id: i64) -> AppResult<()> {
        let existing = self.get_university(id).await?;
        self.uow.universities().delete(id).await?;

        if let Some(url) = existing.image_url {
            self.storage.delete_by_url(&url).await;
        }
        tracing::info!(university_id = id, "University deleted");
        Ok(())
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        self.uow.universities().exists_by_name(name).await
    }

    async fn upload_image(
        &self,
        id: i64,
        file_name: Option<String>,
        data: Vec<u8>,
    ) -> AppResult<University> {
        let existing = self.get_university(id).await?;

        let url = self
            .storage
            .store_university_image(id, file_name.as_deref(), &data)
            .await?;
        if let Some(old) = existing.image_url {
            self.storage.delete_by_url(&old).await;
        }

        self.uow.universities().set_image_url(id, Some(url)).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infra::unit_of_work::testing::{BuiltTestUnitOfWork, TestUnitOfWork};
    use chrono::Utc;
    use mockall::predicate::eq;

    pub(crate) fn university(id: i64, name: &str) -> University {
        University {
            id_university: id,
            name: name.to_string(),
            location: Some("Rabat".into()),
            kind: Some("Grande École Publique".into()),
            description: None,
            website: None,
            contact_email: None,
            phone: None,
            accreditation_status: None,
            programs: None,
            image_url: None,
            slug: None,
            header_image_url: None,
            earth_view_url: None,
            gallery_images: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(name: &str) -> UniversityRequest {
        UniversityRequest {
            name: name.to_string(),
            ..UniversityRequest::default()
        }
    }

    fn manager(uow: TestUnitOfWork, dir: &std::path::Path) -> UniversityManager<BuiltTestUnitOfWork> {
        UniversityManager::new(uow.build(), FileStorage::new(dir, "http://localhost:8080"))
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.universities
            .expect_exists_by_name()
            .with(eq("EMI"))
            .returning(|_| Ok(true));
        uow.universities.expect_create().never();

        let err = manager(uow, std::path::Path::new("/tmp"))
            .create_university(request("EMI"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "University with name EMI already exists");
    }

    #[tokio::test]
    async fn test_create_duplicate_slug_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.universities.expect_exists_by_name().returning(|_| Ok(false));
        uow.universities
            .expect_find_by_slug()
            .returning(|_| Ok(Some(university(9, "Autre"))));

        let mut req = request("EMI");
        req.slug = Some("emi".into());
        let err = manager(uow, std::path::Path::new("/tmp"))
            .create_university(req)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_own_name_and_slug() {
        let mut uow = TestUnitOfWork::default();
        uow.universities.expect_find_by_id().returning(|id| {
            let mut u = university(id, "EMI");
            u.slug = Some("emi".into());
            Ok(Some(u))
        });
        uow.universities.expect_exists_by_name().never();
        uow.universities.expect_find_by_slug().returning(|_| {
            let mut u = university(1, "EMI");
            u.slug = Some("emi".into());
            Ok(Some(u))
        });
        uow.universities
            .expect_update()
            .returning(|id, req| Ok(university(id, &req.name)));

        let mut req = request("EMI");
        req.slug = Some("emi".into());
        let updated = manager(uow, std::path::Path::new("/tmp"))
            .update_university(1, req)
            .await
            .unwrap();
        assert_eq!(updated.id_university, 1);
    }

    #[tokio::test]
    async fn test_upload_image_replaces_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path(), "http://localhost:8080");
        let old_url = storage
            .store_university_image(4, Some("old.png"), b"old")
            .await
            .unwrap();
        let old_path = dir.path().join(old_url.trim_start_matches("http://localhost:8080/uploads/"));
        assert!(old_path.exists());

        let mut uow = TestUnitOfWork::default();
        let stored_old = old_url.clone();
        uow.universities.expect_find_by_id().returning(move |id| {
            let mut u = university(id, "ENSIAS");
            u.image_url = Some(stored_old.clone());
            Ok(Some(u))
        });
        uow.universities
            .expect_set_image_url()
            .returning(|id, url| {
                let mut u = university(id, "ENSIAS");
                u.image_url = url;
                Ok(u)
            });

        let service = UniversityManager::new(uow.build(), storage);
        let updated = service
            .upload_image(4, Some("campus.jpg".into()), b"new".to_vec())
            .await
            .unwrap();

        let new_url = updated.image_url.unwrap();
        assert!(new_url.starts_with("http://localhost:8080/uploads/universities/4/"));
        assert!(new_url.ends_with(".jpg"));
        assert!(!old_path.exists());
    }

    #[tokio::test]
    async fn test_upload_image_unknown_university() {
        let mut uow = TestUnitOfWork::default();
        uow.universities.expect_find_by_id().returning(|_| Ok(None));

        let err = manager(uow, std::path::Path::new("/tmp"))
            .upload_image(77, None, vec![1, 2, 3])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "University not found with id: 77");
    }
}
