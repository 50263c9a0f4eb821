//! Critère database entity, keyed by its filière.

use sea_orm::entity::prelude::*;

use crate::domain::Critere;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "criteres")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub filiere_id: i64,
    pub annee_academique: String,
    pub type_candidat: String,
    pub serie_bac_cible: Option<String>,
    pub seuil_calcul: Option<f64>,
    pub note_concours_ecrit: Option<f64>,
    pub a_entretien: bool,
    pub age_max: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub seuil_matieres_specifiques: Option<String>,
    pub score_prepa: Option<f64>,
    pub classement_cnc: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub diplomes_requis: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes_semestres: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Critere {
    fn from(model: Model) -> Self {
        Critere {
            filiere_id: model.filiere_id,
            annee_academique: model.annee_academique,
            type_candidat: model.type_candidat,
            serie_bac_cible: model.serie_bac_cible,
            seuil_calcul: model.seuil_calcul,
            note_concours_ecrit: model.note_concours_ecrit,
            a_entretien: model.a_entretien,
            age_max: model.age_max,
            seuil_matieres_specifiques: model.seuil_matieres_specifiques,
            score_prepa: model.score_prepa,
            classement_cnc: model.classement_cnc,
            diplomes_requis: model.diplomes_requis,
            notes_semestres: model.notes_semestres,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
