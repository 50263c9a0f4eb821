//! Student profile tracks. A user holds at most one of them, keyed by the
//! user id: post-bac (`BacStudent`), two-year diploma (`Bac2Student`) or
//! preparatory class (`PrepaStudent`).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Which profile track a user is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentTrack {
    Bac,
    Bac2,
    Prepa,
}

impl std::fmt::Display for StudentTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentTrack::Bac => f.write_str("bac"),
            StudentTrack::Bac2 => f.write_str("bac+2"),
            StudentTrack::Prepa => f.write_str("prepa"),
        }
    }
}

// =============================================================================
// Bac
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BacStudent {
    pub user_id: i64,
    pub bac_major: Option<String>,
    pub bac_degree: Option<String>,
    pub grade: Option<f64>,
    pub subject_degree: Option<String>,
    pub bac_year_graduation: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BacStudentRequest {
    pub user_id: i64,
    #[validate(length(max = 100, message = "Bac major must not exceed 100 characters"))]
    #[schema(example = "Sciences Mathématiques A")]
    pub bac_major: Option<String>,
    #[validate(length(max = 100, message = "Bac degree must not exceed 100 characters"))]
    pub bac_degree: Option<String>,
    #[validate(range(min = 0.0, max = 20.0, message = "Grade must be between 0 and 20"))]
    #[schema(example = 16.5)]
    pub grade: Option<f64>,
    #[validate(length(max = 100, message = "Subject degree must not exceed 100 characters"))]
    pub subject_degree: Option<String>,
    #[validate(range(min = 1900, max = 2100, message = "Graduation year must be between 1900 and 2100"))]
    #[schema(example = 2024)]
    pub bac_year_graduation: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BacStudentResponse {
    pub id_user: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bac_major: Option<String>,
    pub bac_degree: Option<String>,
    pub grade: Option<f64>,
    pub subject_degree: Option<String>,
    pub bac_year_graduation: Option<i32>,
}

impl BacStudentResponse {
    pub fn new(student: BacStudent, username: Option<String>, email: Option<String>) -> Self {
        Self {
            id_user: student.user_id,
            username,
            email,
            bac_major: student.bac_major,
            bac_degree: student.bac_degree,
            grade: student.grade,
            subject_degree: student.subject_degree,
            bac_year_graduation: student.bac_year_graduation,
        }
    }
}

// =============================================================================
// Bac+2
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Bac2Student {
    pub user_id: i64,
    pub avg_s1: Option<f64>,
    pub avg_s2: Option<f64>,
    pub avg_s3: Option<f64>,
    pub avg_s4: Option<f64>,
    pub diploma_type: Option<String>,
    pub bac_major: Option<String>,
    pub institution: Option<String>,
}

impl Bac2Student {
    /// Mean of the semester averages that are present, rounded half-up to two
    /// decimals. `None` when no semester has been recorded.
    pub fn overall_average(&self) -> Option<f64> {
        overall_average(&[self.avg_s1, self.avg_s2, self.avg_s3, self.avg_s4])
    }
}

pub fn overall_average(semesters: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = semesters.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    Some(round_half_up(mean, 2))
}

fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    // The epsilon absorbs binary representation error (e.g. 14.125 stored as 14.12499..).
    ((value * factor) + 1e-9).round() / factor
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct Bac2StudentRequest {
    pub user_id: i64,
    #[validate(range(min = 0.0, max = 20.0, message = "Average S1 must be between 0 and 20"))]
    pub avg_s1: Option<f64>,
    #[validate(range(min = 0.0, max = 20.0, message = "Average S2 must be between 0 and 20"))]
    pub avg_s2: Option<f64>,
    #[validate(range(min = 0.0, max = 20.0, message = "Average S3 must be between 0 and 20"))]
    pub avg_s3: Option<f64>,
    #[validate(range(min = 0.0, max = 20.0, message = "Average S4 must be between 0 and 20"))]
    pub avg_s4: Option<f64>,
    #[validate(length(max = 100, message = "Diploma type must not exceed 100 characters"))]
    #[schema(example = "DUT")]
    pub diploma_type: Option<String>,
    #[validate(length(max = 100, message = "Bac major must not exceed 100 characters"))]
    pub bac_major: Option<String>,
    #[validate(length(max = 255, message = "Institution must not exceed 255 characters"))]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Bac2StudentResponse {
    pub id_user: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub avg_s1: Option<f64>,
    pub avg_s2: Option<f64>,
    pub avg_s3: Option<f64>,
    pub avg_s4: Option<f64>,
    pub overall_average: Option<f64>,
    pub diploma_type: Option<String>,
    pub bac_major: Option<String>,
    pub institution: Option<String>,
}

impl Bac2StudentResponse {
    pub fn new(student: Bac2Student, username: Option<String>, email: Option<String>) -> Self {
        Self {
            overall_average: student.overall_average(),
            id_user: student.user_id,
            username,
            email,
            avg_s1: student.avg_s1,
            avg_s2: student.avg_s2,
            avg_s3: student.avg_s3,
            avg_s4: student.avg_s4,
            diploma_type: student.diploma_type,
            bac_major: student.bac_major,
            institution: student.institution,
        }
    }
}

// =============================================================================
// Prepa
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PrepaStudent {
    pub user_id: i64,
    pub prepa_major: Option<String>,
    pub cnc_rating: Option<f64>,
    pub notes_trimestre: Option<String>,
    pub annee_bac: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PrepaStudentRequest {
    pub user_id: i64,
    #[validate(length(max = 100, message = "Prepa major must not exceed 100 characters"))]
    #[schema(example = "MP")]
    pub prepa_major: Option<String>,
    #[validate(range(min = 0.0, message = "CNC rating must be at least 0"))]
    pub cnc_rating: Option<f64>,
    pub notes_trimestre: Option<String>,
    #[validate(length(max = 20, message = "Annee bac must not exceed 20 characters"))]
    pub annee_bac: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrepaStudentResponse {
    pub id_user: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub prepa_major: Option<String>,
    pub cnc_rating: Option<f64>,
    pub notes_trimestre: Option<String>,
    pub annee_bac: Option<String>,
}

impl PrepaStudentResponse {
    pub fn new(student: PrepaStudent, username: Option<String>, email: Option<String>) -> Self {
        Self {
            id_user: student.user_id,
            username,
            email,
            prepa_major: student.prepa_major,
            cnc_rating: student.cnc_rating,
            notes_trimestre: student.notes_trimestre,
            annee_bac: student.annee_bac,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bac2(avgs: [Option<f64>; 4]) -> Bac2Student {
        Bac2Student {
            user_id: 1,
            avg_s1: avgs[0],
            avg_s2: avgs[1],
            avg_s3: avgs[2],
            avg_s4: avgs[3],
            diploma_type: Some("DUT".into()),
            bac_major: None,
            institution: None,
        }
    }

    #[test]
    fn test_overall_average_all_present() {
        let s = bac2([Some(12.0), Some(14.0), Some(16.0), Some(18.0)]);
        assert_eq!(s.overall_average(), Some(15.0));
    }

    #[test]
    fn test_overall_average_skips_missing_semesters() {
        let s = bac2([Some(12.0), None, Some(15.0), None]);
        assert_eq!(s.overall_average(), Some(13.5));
    }

    #[test]
    fn test_overall_average_none_when_empty() {
        assert_eq!(bac2([None; 4]).overall_average(), None);
    }

    #[test]
    fn test_overall_average_rounds_half_up() {
        // (12.25 + 12.26) / 2 = 12.255
        let s = bac2([Some(12.25), Some(12.26), None, None]);
        assert_eq!(s.overall_average(), Some(12.26));
        // 13.333.. rounds down
        let s = bac2([Some(13.0), Some(13.0), Some(14.0), None]);
        assert_eq!(s.overall_average(), Some(13.33));
    }

    #[test]
    fn test_response_carries_average() {
        let resp = Bac2StudentResponse::new(bac2([Some(10.0), Some(11.0), None, None]), None, None);
        assert_eq!(resp.overall_average, Some(10.5));
    }
}
