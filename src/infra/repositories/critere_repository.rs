//! Critère repository implementation. Rows are keyed by filière id.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::critere::{self, ActiveModel, Entity as CritereEntity};
use crate::domain::{Critere, CritereRequest};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Selection criteria for listing critères
#[derive(Debug, Clone, PartialEq)]
pub enum CritereFilter {
    All,
    AnneeAcademique(String),
    TypeCandidat(String),
    SerieBac(String),
    /// Threshold at or above the value
    SeuilAtLeast(f64),
    WithEntretien,
    /// Age limit at or below the value
    AgeMaxAtMost(i32),
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CritereRepository: Send + Sync {
    async fn find_by_filiere(&self, filiere_id: i64) -> AppResult<Option<Critere>>;

    async fn find_by_filieres(&self, filiere_ids: Vec<i64>) -> AppResult<Vec<Critere>>;

    async fn exists(&self, filiere_id: i64) -> AppResult<bool>;

    async fn list(&self, filter: CritereFilter) -> AppResult<Vec<Critere>>;

    async fn create(&self, req: CritereRequest) -> AppResult<Critere>;

    async fn update(&self, filiere_id: i64, req: CritereRequest) -> AppResult<Critere>;

    async fn delete(&self, filiere_id: i64) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<u64>;
}

pub struct CritereStore {
    db: DatabaseConnection,
}

impl CritereStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CritereRepository for CritereStore {
    async fn find_by_filiere(&self, filiere_id: i64) -> AppResult<Option<Critere>> {
        let result = CritereEntity::find_by_id(filiere_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Critere::from))
    }

    async fn find_by_filieres(&self, filiere_ids: Vec<i64>) -> AppResult<Vec<Critere>> {
        if filiere_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = CritereEntity::find()
            .filter(critere::Column::FiliereId.is_in(filiere_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Critere::from).collect())
    }

    async fn exists(&self, filiere_id: i64) -> AppResult<bool> {
        let count = CritereEntity::find()
            .filter(critere::Column::FiliereId.eq(filiere_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn list(&self, filter: CritereFilter) -> AppResult<Vec<Critere>> {
        let query = match filter {
            CritereFilter::All => CritereEntity::find(),
            CritereFilter::AnneeAcademique(annee) => {
                CritereEntity::find().filter(critere::Column::AnneeAcademique.eq(annee))
            }
            CritereFilter::TypeCandidat(kind) => {
                CritereEntity::find().filter(critere::Column::TypeCandidat.eq(kind))
            }
            CritereFilter::SerieBac(serie) => {
                CritereEntity::find().filter(critere::Column::SerieBacCible.eq(serie))
            }
            CritereFilter::SeuilAtLeast(value) => {
                CritereEntity::find().filter(critere::Column::SeuilCalcul.gte(value))
            }
            CritereFilter::WithEntretien => {
                CritereEntity::find().filter(critere::Column::AEntretien.eq(true))
            }
            CritereFilter::AgeMaxAtMost(age) => {
                CritereEntity::find().filter(critere::Column::AgeMax.lte(age))
            }
        };

        let models = query
            .order_by_asc(critere::Column::FiliereId)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Critere::from).collect())
    }

    async fn create(&self, req: CritereRequest) -> AppResult<Critere> {
        insert(&self.db, req).await
    }

    async fn update(&self, filiere_id: i64, req: CritereRequest) -> AppResult<Critere> {
        let existing = CritereEntity::find_by_id(filiere_id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Critere", filiere_id)?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active, req);
        // The key never moves to another filière
        active.filiere_id = Set(filiere_id);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Critere::from(model))
    }

    async fn delete(&self, filiere_id: i64) -> AppResult<()> {
        let result = CritereEntity::delete_by_id(filiere_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Critere", filiere_id));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = CritereEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

fn apply(active: &mut ActiveModel, req: CritereRequest) {
    active.filiere_id = Set(req.filiere_id);
    active.annee_academique = Set(req.annee_academique);
    active.type_candidat = Set(req.type_candidat);
    active.serie_bac_cible = Set(req.serie_bac_cible);
    active.seuil_calcul = Set(req.seuil_calcul);
    active.note_concours_ecrit = Set(req.note_concours_ecrit);
    active.a_entretien = Set(req.a_entretien);
    active.age_max = Set(req.age_max);
    active.seuil_matieres_specifiques = Set(req.seuil_matieres_specifiques);
    active.score_prepa = Set(req.score_prepa);
    active.classement_cnc = Set(req.classement_cnc);
    active.diplomes_requis = Set(req.diplomes_requis);
    active.notes_semestres = Set(req.notes_semestres);
}

pub(crate) async fn insert<C: ConnectionTrait>(db: &C, req: CritereRequest) -> AppResult<Critere> {
    let now = chrono::Utc::now();
    let mut active = ActiveModel {
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply(&mut active, req);

    let model = active.insert(db).await.map_err(AppError::from)?;
    Ok(Critere::from(model))
}
