//! Filière service - programs offered by universities.
//!
//! Responses embed the university name and the admission critère, both
//! loaded in one batch per call rather than per row.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::container::parallel;
use crate::domain::{CritereResponse, Filiere, FiliereRequest, FiliereResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{FiliereFilter, UnitOfWork};

fn name_taken(name: &str) -> AppError {
    AppError::conflict(format!(
        "Filiere with name {} already exists in this university",
        name
    ))
}

#[async_trait]
pub trait FiliereService: Send + Sync {
    async fn create_filiere(&self, req: FiliereRequest) -> AppResult<FiliereResponse>;

    async fn get_filiere(&self, id: i64) -> AppResult<FiliereResponse>;

    async fn list_filieres(&self, filter: FiliereFilter) -> AppResult<Vec<FiliereResponse>>;

    async fn update_filiere(&self, id: i64, req: FiliereRequest) -> AppResult<FiliereResponse>;

    async fn delete_filiere(&self, id: i64) -> AppResult<()>;
}

pub struct FiliereManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> FiliereManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn enrich(&self, filieres: Vec<Filiere>) -> AppResult<Vec<FiliereResponse>> {
        if filieres.is_empty() {
            return Ok(Vec::new());
        }

        let mut university_ids: Vec<i64> = filieres.iter().map(|f| f.university_id).collect();
        university_ids.sort_unstable();
        university_ids.dedup();
        let filiere_ids: Vec<i64> = filieres.iter().map(|f| f.id).collect();

        let universities = self.uow.universities();
        let criteres = self.uow.criteres();
        let (universities, criteres) = parallel::join2(
            universities.find_by_ids(university_ids),
            criteres.find_by_filieres(filiere_ids),
        )
        .await?;

        let names: HashMap<i64, String> = universities
            .into_iter()
            .map(|u| (u.id_university, u.name))
            .collect();
        let mut criteres: HashMap<i64, _> =
            criteres.into_iter().map(|c| (c.filiere_id, c)).collect();

        Ok(filieres
            .into_iter()
            .map(|f| {
                let critere = criteres
                    .remove(&f.id)
                    .map(|c| CritereResponse::new(c, Some(f.name.clone())));
                let university_name = names.get(&f.university_id).cloned();
                FiliereResponse::new(f, university_name, critere)
            })
            .collect())
    }

    async fn enrich_one(&self, filiere: Filiere) -> AppResult<FiliereResponse> {
        self.enrich(vec![filiere])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("Filiere enrichment returned no rows"))
    }
}

#[async_trait]
impl<U: UnitOfWork> FiliereService for FiliereManager<U> {
    async fn create_filiere(&self, req: FiliereRequest) -> AppResult<FiliereResponse> {
        self.uow
            .universities()
            .find_by_id(req.university_id)
            .await?
            .ok_or_not_found("University", req.university_id)?;

        if self
            .uow
            .filieres()
            .exists_in_university(req.university_id, &req.name)
            .await?
        {
            return Err(name_taken(&req.name));
        }

        let filiere = self.uow.filieres().create(req).await?;
        tracing::info!(filiere_id = filiere.id, "Filiere created");
        self.enrich_one(filiere).await
    }

    async fn get_filiere(&self, id: i64) -> AppResult<FiliereResponse> {
        let filiere = self
            .uow
            .filieres()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Filiere", id)?;
        self.enrich_one(filiere).await
    }

    async fn list_filieres(&self, filter: FiliereFilter) -> AppResult<Vec<FiliereResponse>> {
        let filieres = self.uow.filieres().list(filter).await?;
        self.enrich(filieres).await
    }

    async fn update_filiere(&self, id: i64, req: FiliereRequest) -> AppResult<FiliereResponse> {
        let existing = self
            .uow
            .filieres()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Filiere", id)?;

        self.uow
            .universities()
            .find_by_id(req.university_id)
            .await?
            .ok_or_not_found("University", req.university_id)?;

        let moved = existing.name != req.name || existing.university_id != req.university_id;
        if moved
            && self
                .uow
                .filieres()
                .exists_in_university(req.university_id, &req.name)
                .await?
        {
            return Err(name_taken(&req.name));
        }

        let filiere = self.uow.filieres().update(id, req).await?;
        tracing::info!(filiere_id = id, "Filiere updated");
        self.enrich_one(filiere).await
    }

    async fn delete_filiere(&self, id: i64) -> AppResult<()> {
        self.uow.filieres().delete(id).await?;
        tracing::info!(filiere_id = id, "Filiere deleted");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::Critere;
    use crate::infra::unit_of_work::testing::TestUnitOfWork;
    use crate::services::university_service::tests::university;
    use chrono::Utc;

    pub(crate) fn filiere(id: i64, university_id: i64, name: &str) -> Filiere {
        Filiere {
            id,
            name: name.to_string(),
            university_id,
            critere_admission: None,
            duration_years: Some(3),
            tuition_fee: Some(0.0),
            admission_type: Some("CNC".into()),
            language: Some("Français".into()),
            seats_available: Some(90),
            application_deadline: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn critere(filiere_id: i64) -> Critere {
        Critere {
            filiere_id,
            annee_academique: "2025-2026".into(),
            type_candidat: "Lauréat CPGE".into(),
            serie_bac_cible: Some("Sciences Mathématiques".into()),
            seuil_calcul: Some(14.5),
            note_concours_ecrit: None,
            a_entretien: false,
            age_max: Some(28),
            seuil_matieres_specifiques: None,
            score_prepa: Some(16.0),
            classement_cnc: Some(400),
            diplomes_requis: None,
            notes_semestres: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(university_id: i64, name: &str) -> FiliereRequest {
        FiliereRequest {
            name: name.to_string(),
            university_id,
            critere_admission: None,
            duration_years: Some(3),
            tuition_fee: None,
            admission_type: Some("CNC".into()),
            language: Some("Français".into()),
            seats_available: Some(90),
            application_deadline: None,
        }
    }

    #[tokio::test]
    async fn test_list_embeds_university_name_and_critere() {
        let mut uow = TestUnitOfWork::default();
        uow.filieres.expect_list().returning(|_| {
            Ok(vec![
                filiere(10, 1, "Génie Informatique"),
                filiere(11, 1, "Génie Civil"),
                filiere(12, 2, "Data Science"),
            ])
        });
        uow.universities.expect_find_by_ids().returning(|mut ids| {
            ids.sort_unstable();
            assert_eq!(ids, vec![1, 2]);
            Ok(vec![university(1, "EMI"), university(2, "ENSIAS")])
        });
        uow.criteres
            .expect_find_by_filieres()
            .returning(|_| Ok(vec![critere(10)]));

        let service = FiliereManager::new(uow.build());
        let list = service.list_filieres(FiliereFilter::All).await.unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].university_name.as_deref(), Some("EMI"));
        assert_eq!(list[2].university_name.as_deref(), Some("ENSIAS"));
        let critere = list[0].critere.as_ref().unwrap();
        assert_eq!(critere.filiere_name.as_deref(), Some("Génie Informatique"));
        assert!(list[1].critere.is_none());
    }

    #[tokio::test]
    async fn test_list_empty_skips_lookups() {
        let mut uow = TestUnitOfWork::default();
        uow.filieres.expect_list().returning(|_| Ok(vec![]));
        uow.universities.expect_find_by_ids().never();

        let service = FiliereManager::new(uow.build());
        assert!(service.list_filieres(FiliereFilter::Available).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_university() {
        let mut uow = TestUnitOfWork::default();
        uow.universities.expect_find_by_id().returning(|_| Ok(None));
        uow.filieres.expect_create().never();

        let service = FiliereManager::new(uow.build());
        let err = service.create_filiere(request(5, "Génie Civil")).await.unwrap_err();
        assert_eq!(err.to_string(), "University not found with id: 5");
    }

    #[tokio::test]
    async fn test_create_duplicate_name_in_university_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.universities
            .expect_find_by_id()
            .returning(|id| Ok(Some(university(id, "EMI"))));
        uow.filieres
            .expect_exists_in_university()
            .returning(|_, _| Ok(true));

        let service = FiliereManager::new(uow.build());
        let err = service.create_filiere(request(1, "Génie Civil")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Filiere with name Génie Civil already exists in this university"
        );
    }

    #[tokio::test]
    async fn test_update_same_name_skips_uniqueness_check() {
        let mut uow = TestUnitOfWork::default();
        uow.filieres
            .expect_find_by_id()
            .returning(|id| Ok(Some(filiere(id, 1, "Génie Civil"))));
        uow.universities
            .expect_find_by_id()
            .returning(|id| Ok(Some(university(id, "EMI"))));
        uow.filieres.expect_exists_in_university().never();
        uow.filieres
            .expect_update()
            .returning(|id, req| Ok(filiere(id, req.university_id, &req.name)));
        uow.universities
            .expect_find_by_ids()
            .returning(|_| Ok(vec![university(1, "EMI")]));
        uow.criteres.expect_find_by_filieres().returning(|_| Ok(vec![]));

        let service = FiliereManager::new(uow.build());
        let updated = service.update_filiere(3, request(1, "Génie Civil")).await.unwrap();
        assert_eq!(updated.id_filiere, 3);
        assert_eq!(updated.university_name.as_deref(), Some("EMI"));
    }
}
