//! Critère service - admission criteria, at most one per filière.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Critere, CritereRequest, CritereResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{CritereFilter, UnitOfWork};

fn not_found(filiere_id: i64) -> AppError {
    AppError::NotFound(format!("Critere not found for filiere id: {}", filiere_id))
}

#[async_trait]
pub trait CritereService: Send + Sync {
    async fn create_critere(&self, req: CritereRequest) -> AppResult<CritereResponse>;

    async fn get_critere(&self, filiere_id: i64) -> AppResult<CritereResponse>;

    async fn list_criteres(&self, filter: CritereFilter) -> AppResult<Vec<CritereResponse>>;

    /// The critère stays attached to `filiere_id` whatever the body says.
    async fn update_critere(&self, filiere_id: i64, req: CritereRequest) -> AppResult<CritereResponse>;

    async fn delete_critere(&self, filiere_id: i64) -> AppResult<()>;

    async fn critere_exists(&self, filiere_id: i64) -> AppResult<bool>;
}

pub struct CritereManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CritereManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn with_names(&self, criteres: Vec<Critere>) -> AppResult<Vec<CritereResponse>> {
        if criteres.is_empty() {
            return Ok(Vec::new());
        }
        let ids = criteres.iter().map(|c| c.filiere_id).collect();
        let names: HashMap<i64, String> = self
            .uow
            .filieres()
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|f| (f.id, f.name))
            .collect();

        Ok(criteres
            .into_iter()
            .map(|c| {
                let name = names.get(&c.filiere_id).cloned();
                CritereResponse::new(c, name)
            })
            .collect())
    }

    async fn filiere_name(&self, filiere_id: i64) -> AppResult<String> {
        let filiere = self
            .uow
            .filieres()
            .find_by_id(filiere_id)
            .await?
            .ok_or_not_found("Filiere", filiere_id)?;
        Ok(filiere.name)
    }
}

#[async_trait]
impl<U: UnitOfWork> CritereService for CritereManager<U> {
    async fn create_critere(&self, req: CritereRequest) -> AppResult<CritereResponse> {
        let filiere_name = self.filiere_name(req.filiere_id).await?;

        if self.uow.criteres().exists(req.filiere_id).await? {
            return Err(AppError::conflict(format!(
                "Critere already exists for filiere id: {}",
                req.filiere_id
            )));
        }

        let critere = self.uow.criteres().create(req).await?;
        tracing::info!(filiere_id = critere.filiere_id, "Critere created");
        Ok(CritereResponse::new(critere, Some(filiere_name)))
    }

    async fn get_critere(&self, filiere_id: i64) -> AppResult<CritereResponse> {
        let critere = self
            .uow
            .criteres()
            .find_by_filiere(filiere_id)
            .await?
            .ok_or_else(|| not_found(filiere_id))?;
        self.with_names(vec![critere])
            .await?
            .pop()
            .ok_or_else(|| not_found(filiere_id))
    }

    async fn list_criteres(&self, filter: CritereFilter) -> AppResult<Vec<CritereResponse>> {
        let criteres = self.uow.criteres().list(filter).await?;
        self.with_names(criteres).await
    }

    async fn update_critere(&self, filiere_id: i64, req: CritereRequest) -> AppResult<CritereResponse> {
        if !self.uow.criteres().exists(filiere_id).await? {
            return Err(not_found(filiere_id));
        }
        let filiere_name = self.filiere_name(filiere_id).await?;

        let critere = self.uow.criteres().update(filiere_id, req).await?;
        tracing::info!(filiere_id, "Critere updated");
        Ok(CritereResponse::new(critere, Some(filiere_name)))
    }

    async fn delete_critere(&self, filiere_id: i64) -> AppResult<()> {
        if !self.uow.criteres().exists(filiere_id).await? {
            return Err(not_found(filiere_id));
        }
        self.uow.criteres().delete(filiere_id).await?;
        tracing::info!(filiere_id, "Critere deleted");
        Ok(())
    }

    async fn critere_exists(&self, filiere_id: i64) -> AppResult<bool> {
        self.uow.criteres().exists(filiere_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::unit_of_work::testing::TestUnitOfWork;
    use crate::services::filiere_service::tests::{critere, filiere};

    fn request(filiere_id: i64) -> CritereRequest {
        CritereRequest {
            filiere_id,
            annee_academique: "2025-2026".into(),
            type_candidat: "Bacheliers".into(),
            serie_bac_cible: None,
            seuil_calcul: Some(12.0),
            note_concours_ecrit: None,
            a_entretien: true,
            age_max: None,
            seuil_matieres_specifiques: None,
            score_prepa: None,
            classement_cnc: None,
            diplomes_requis: None,
            notes_semestres: None,
        }
    }

    #[tokio::test]
    async fn test_second_critere_for_filiere_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.filieres
            .expect_find_by_id()
            .returning(|id| Ok(Some(filiere(id, 1, "Génie Civil"))));
        uow.criteres.expect_exists().returning(|_| Ok(true));
        uow.criteres.expect_create().never();

        let service = CritereManager::new(uow.build());
        let err = service.create_critere(request(8)).await.unwrap_err();
        assert_eq!(err.to_string(), "Critere already exists for filiere id: 8");
    }

    #[tokio::test]
    async fn test_create_for_missing_filiere() {
        let mut uow = TestUnitOfWork::default();
        uow.filieres.expect_find_by_id().returning(|_| Ok(None));

        let service = CritereManager::new(uow.build());
        let err = service.create_critere(request(8)).await.unwrap_err();
        assert_eq!(err.to_string(), "Filiere not found with id: 8");
    }

    #[tokio::test]
    async fn test_get_carries_filiere_name() {
        let mut uow = TestUnitOfWork::default();
        uow.criteres
            .expect_find_by_filiere()
            .returning(|id| Ok(Some(critere(id))));
        uow.filieres
            .expect_find_by_ids()
            .returning(|_| Ok(vec![filiere(4, 1, "Topographie")]));

        let service = CritereManager::new(uow.build());
        let found = service.get_critere(4).await.unwrap();
        assert_eq!(found.filiere_name.as_deref(), Some("Topographie"));
    }

    #[tokio::test]
    async fn test_delete_missing_critere() {
        let mut uow = TestUnitOfWork::default();
        uow.criteres.expect_exists().returning(|_| Ok(false));
        uow.criteres.expect_delete().never();

        let service = CritereManager::new(uow.build());
        let err = service.delete_critere(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Critere not found for filiere id: 3");
    }
}
