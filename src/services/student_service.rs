//! Student profile services for the three tracks.
//!
//! A user holds at most one profile across bac, bac+2 and prepa; creating a
//! second one on any track is a conflict. Responses carry the owner's
//! username and email, loaded in one batch.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::container::parallel;
use crate::domain::{
    Bac2StudentRequest, Bac2StudentResponse, BacStudentRequest, BacStudentResponse,
    PrepaStudentRequest, PrepaStudentResponse, StudentTrack,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Bac2StudentFilter, BacStudentFilter, PrepaStudentFilter, UnitOfWork};

type Identities = HashMap<i64, (String, String)>;

fn identity(identities: &Identities, user_id: i64) -> (Option<String>, Option<String>) {
    match identities.get(&user_id) {
        Some((username, email)) => (Some(username.clone()), Some(email.clone())),
        None => (None, None),
    }
}

#[async_trait]
pub trait BacStudentService: Send + Sync {
    async fn create_bac_student(&self, req: BacStudentRequest) -> AppResult<BacStudentResponse>;

    async fn get_bac_student(&self, user_id: i64) -> AppResult<BacStudentResponse>;

    async fn list_bac_students(&self, filter: BacStudentFilter) -> AppResult<Vec<BacStudentResponse>>;

    async fn update_bac_student(&self, user_id: i64, req: BacStudentRequest) -> AppResult<BacStudentResponse>;

    async fn delete_bac_student(&self, user_id: i64) -> AppResult<()>;
}

#[async_trait]
pub trait Bac2StudentService: Send + Sync {
    async fn create_bac2_student(&self, req: Bac2StudentRequest) -> AppResult<Bac2StudentResponse>;

    async fn get_bac2_student(&self, user_id: i64) -> AppResult<Bac2StudentResponse>;

    async fn list_bac2_students(&self, filter: Bac2StudentFilter) -> AppResult<Vec<Bac2StudentResponse>>;

    /// Students whose overall average is at least `min`, optionally
    /// restricted to one bac major. Students without any semester average
    /// never match.
    async fn list_bac2_by_overall_min(
        &self,
        min: f64,
        major: Option<String>,
    ) -> AppResult<Vec<Bac2StudentResponse>>;

    async fn update_bac2_student(&self, user_id: i64, req: Bac2StudentRequest) -> AppResult<Bac2StudentResponse>;

    async fn delete_bac2_student(&self, user_id: i64) -> AppResult<()>;
}

#[async_trait]
pub trait PrepaStudentService: Send + Sync {
    async fn create_prepa_student(&self, req: PrepaStudentRequest) -> AppResult<PrepaStudentResponse>;

    async fn get_prepa_student(&self, user_id: i64) -> AppResult<PrepaStudentResponse>;

    async fn list_prepa_students(&self, filter: PrepaStudentFilter) -> AppResult<Vec<PrepaStudentResponse>>;

    async fn update_prepa_student(&self, user_id: i64, req: PrepaStudentRequest) -> AppResult<PrepaStudentResponse>;

    async fn delete_prepa_student(&self, user_id: i64) -> AppResult<()>;
}

/// Implements all three track services over one unit of work.
pub struct StudentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StudentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// The user must exist and must not hold a profile on any track yet.
    async fn ensure_can_enroll(&self, user_id: i64) -> AppResult<Identities> {
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User", user_id)?;

        let bac = self.uow.bac_students();
        let bac2 = self.uow.bac2_students();
        let prepa = self.uow.prepa_students();
        let (has_bac, has_bac2, has_prepa) = parallel::join3(
            bac.exists(user_id),
            bac2.exists(user_id),
            prepa.exists(user_id),
        )
        .await?;

        let held = [
            (StudentTrack::Bac, has_bac),
            (StudentTrack::Bac2, has_bac2),
            (StudentTrack::Prepa, has_prepa),
        ]
        .into_iter()
        .find_map(|(track, exists)| exists.then_some(track));

        if let Some(track) = held {
            return Err(AppError::conflict(format!(
                "User {} already has a {} student profile",
                user_id, track
            )));
        }

        Ok(HashMap::from([(user.id, (user.username, user.email))]))
    }

    async fn identities(&self, mut user_ids: Vec<i64>) -> AppResult<Identities> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        user_ids.sort_unstable();
        user_ids.dedup();
        Ok(self
            .uow
            .users()
            .find_by_ids(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, (u.username, u.email)))
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> BacStudentService for StudentManager<U> {
    async fn create_bac_student(&self, req: BacStudentRequest) -> AppResult<BacStudentResponse> {
        let ids = self.ensure_can_enroll(req.user_id).await?;
        let student = self.uow.bac_students().create(req).await?;
        tracing::info!(user_id = student.user_id, track = %StudentTrack::Bac, "Student profile created");
        let (username, email) = identity(&ids, student.user_id);
        Ok(BacStudentResponse::new(student, username, email))
    }

    async fn get_bac_student(&self, user_id: i64) -> AppResult<BacStudentResponse> {
        let student = self
            .uow
            .bac_students()
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Bac student", user_id)?;
        let ids = self.identities(vec![user_id]).await?;
        let (username, email) = identity(&ids, user_id);
        Ok(BacStudentResponse::new(student, username, email))
    }

    async fn list_bac_students(&self, filter: BacStudentFilter) -> AppResult<Vec<BacStudentResponse>> {
        let students = self.uow.bac_students().list(filter).await?;
        let ids = self
            .identities(students.iter().map(|s| s.user_id).collect())
            .await?;
        Ok(students
            .into_iter()
            .map(|s| {
                let (username, email) = identity(&ids, s.user_id);
                BacStudentResponse::new(s, username, email)
            })
            .collect())
    }

    async fn update_bac_student(&self, user_id: i64, req: BacStudentRequest) -> AppResult<BacStudentResponse> {
        let student = self.uow.bac_students().update(user_id, req).await?;
        let ids = self.identities(vec![user_id]).await?;
        let (username, email) = identity(&ids, user_id);
        Ok(BacStudentResponse::new(student, username, email))
    }

    async fn delete_bac_student(&self, user_id: i64) -> AppResult<()> {
        self.uow.bac_students().delete(user_id).await?;
        tracing::info!(user_id, track = %StudentTrack::Bac, "Student profile deleted");
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> Bac2StudentService for StudentManager<U> {
    async fn create_bac2_student(&self, req: Bac2StudentRequest) -> AppResult<Bac2StudentResponse> {
        let ids = self.ensure_can_enroll(req.user_id).await?;
        let student = self.uow.bac2_students().create(req).await?;
        tracing::info!(user_id = student.user_id, track = %StudentTrack::Bac2, "Student profile created");
        let (username, email) = identity(&ids, student.user_id);
        Ok(Bac2StudentResponse::new(student, username, email))
    }

    async fn get_bac2_student(&self, user_id: i64) -> AppResult<Bac2StudentResponse> {
        let student = self
            .uow
            .bac2_students()
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Bac+2 student", user_id)?;
        let ids = self.identities(vec![user_id]).await?;
        let (username, email) = identity(&ids, user_id);
        Ok(Bac2StudentResponse::new(student, username, email))
    }

    async fn list_bac2_students(&self, filter: Bac2StudentFilter) -> AppResult<Vec<Bac2StudentResponse>> {
        let students = self.uow.bac2_students().list(filter).await?;
        let ids = self
            .identities(students.iter().map(|s| s.user_id).collect())
            .await?;
        Ok(students
            .into_iter()
            .map(|s| {
                let (username, email) = identity(&ids, s.user_id);
                Bac2StudentResponse::new(s, username, email)
            })
            .collect())
    }

    async fn list_bac2_by_overall_min(
        &self,
        min: f64,
        major: Option<String>,
    ) -> AppResult<Vec<Bac2StudentResponse>> {
        let filter = match major {
            Some(major) => Bac2StudentFilter::Major(major),
            None => Bac2StudentFilter::All,
        };
        let mut students = self.list_bac2_students(filter).await?;
        students.retain(|s| s.overall_average.is_some_and(|avg| avg >= min));
        Ok(students)
    }

    async fn update_bac2_student(&self, user_id: i64, req: Bac2StudentRequest) -> AppResult<Bac2StudentResponse> {
        let student = self.uow.bac2_students().update(user_id, req).await?;
        let ids = self.identities(vec![user_id]).await?;
        let (username, email) = identity(&ids, user_id);
        Ok(Bac2StudentResponse::new(student, username, email))
    }

    async fn delete_bac2_student(&self, user_id: i64) -> AppResult<()> {
        self.uow.bac2_students().delete(user_id).await?;
        tracing::info!(user_id, track = %StudentTrack::Bac2, "Student profile deleted");
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> PrepaStudentService for StudentManager<U> {
    async fn create_prepa_student(&self, req: PrepaStudentRequest) -> AppResult<PrepaStudentResponse> {
        let ids = self.ensure_can_enroll(req.user_id).await?;
        let student = self.uow.prepa_students().create(req).await?;
        tracing::info!(user_id = student.user_id, track = %StudentTrack::Prepa, "Student profile created");
        let (username, email) = identity(&ids, student.user_id);
        Ok(PrepaStudentResponse::new(student, username, email))
    }

    async fn get_prepa_student(&self, user_id: i64) -> AppResult<PrepaStudentResponse> {
        let student = self
            .uow
            .prepa_students()
            .find_by_user(user_id)
            .await?
            .ok_or_not_found("Prepa student", user_id)?;
        let ids = self.identities(vec![user_id]).await?;
        let (username, email) = identity(&ids, user_id);
        Ok(PrepaStudentResponse::new(student, username, email))
    }

    async fn list_prepa_students(&self, filter: PrepaStudentFilter) -> AppResult<Vec<PrepaStudentResponse>> {
        let students = self.uow.prepa_students().list(filter).await?;
        let ids = self
            .identities(students.iter().map(|s| s.user_id).collect())
            .await?;
        Ok(students
            .into_iter()
            .map(|s| {
                let (username, email) = identity(&ids, s.user_id);
                PrepaStudentResponse::new(s, username, email)
            })
            .collect())
    }

    async fn update_prepa_student(&self, user_id: i64, req: PrepaStudentRequest) -> AppResult<PrepaStudentResponse> {
        let student = self.uow.prepa_students().update(user_id, req).await?;
        let ids = self.identities(vec![user_id]).await?;
        let (username, email) = identity(&ids, user_id);
        Ok(PrepaStudentResponse::new(student, username, email))
    }

    async fn delete_prepa_student(&self, user_id: i64) -> AppResult<()> {
        self.uow.prepa_students().delete(user_id).await?;
        tracing::info!(user_id, track = %StudentTrack::Prepa, "Student profile deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bac2Student, BacStudent};
    use crate::infra::unit_of_work::testing::TestUnitOfWork;
    use crate::services::user_service::tests::user;

    fn bac_request(user_id: i64) -> BacStudentRequest {
        BacStudentRequest {
            user_id,
            bac_major: Some("Sciences Mathématiques A".into()),
            bac_degree: None,
            grade: Some(16.5),
            subject_degree: None,
            bac_year_graduation: Some(2024),
        }
    }

    fn bac2(user_id: i64, avgs: [Option<f64>; 2]) -> Bac2Student {
        Bac2Student {
            user_id,
            avg_s1: avgs[0],
            avg_s2: avgs[1],
            avg_s3: None,
            avg_s4: None,
            diploma_type: Some("DUT".into()),
            bac_major: Some("PC".into()),
            institution: Some("EST Salé".into()),
        }
    }

    fn enrollable(uow: &mut TestUnitOfWork) {
        uow.users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "s@example.ma"))));
        uow.bac.expect_exists().returning(|_| Ok(false));
        uow.bac2.expect_exists().returning(|_| Ok(false));
        uow.prepa.expect_exists().returning(|_| Ok(false));
    }

    #[tokio::test]
    async fn test_create_bac_student() {
        let mut uow = TestUnitOfWork::default();
        enrollable(&mut uow);
        uow.bac.expect_create().returning(|req| {
            Ok(BacStudent {
                user_id: req.user_id,
                bac_major: req.bac_major,
                bac_degree: req.bac_degree,
                grade: req.grade,
                subject_degree: req.subject_degree,
                bac_year_graduation: req.bac_year_graduation,
            })
        });

        let service = StudentManager::new(uow.build());
        let created = service.create_bac_student(bac_request(7)).await.unwrap();
        assert_eq!(created.id_user, 7);
        assert_eq!(created.email.as_deref(), Some("s@example.ma"));
    }

    #[tokio::test]
    async fn test_profile_on_another_track_conflicts() {
        let mut uow = TestUnitOfWork::default();
        uow.users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user(id, "s@example.ma"))));
        uow.bac.expect_exists().returning(|_| Ok(false));
        uow.bac2.expect_exists().returning(|_| Ok(false));
        uow.prepa.expect_exists().returning(|_| Ok(true));
        uow.bac.expect_create().never();

        let service = StudentManager::new(uow.build());
        let err = service.create_bac_student(bac_request(7)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "User 7 already has a prepa student profile");
    }

    #[tokio::test]
    async fn test_create_for_unknown_user() {
        let mut uow = TestUnitOfWork::default();
        uow.users.expect_find_by_id().returning(|_| Ok(None));

        let service = StudentManager::new(uow.build());
        let err = service.create_bac_student(bac_request(9)).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found with id: 9");
    }

    #[tokio::test]
    async fn test_get_missing_bac2_student() {
        let mut uow = TestUnitOfWork::default();
        uow.bac2.expect_find_by_user().returning(|_| Ok(None));

        let service = StudentManager::new(uow.build());
        let err = service.get_bac2_student(4).await.unwrap_err();
        assert_eq!(err.to_string(), "Bac+2 student not found with id: 4");
    }

    #[tokio::test]
    async fn test_overall_min_filters_on_computed_average() {
        let mut uow = TestUnitOfWork::default();
        uow.bac2.expect_list().returning(|filter| {
            assert_eq!(filter, Bac2StudentFilter::Major("PC".into()));
            Ok(vec![
                bac2(1, [Some(14.0), Some(15.0)]),
                bac2(2, [Some(11.0), Some(12.0)]),
                bac2(3, [None, None]),
            ])
        });
        uow.users.expect_find_by_ids().returning(|_| Ok(vec![]));

        let service = StudentManager::new(uow.build());
        let found = service
            .list_bac2_by_overall_min(14.0, Some("PC".into()))
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id_user, 1);
        assert_eq!(found[0].overall_average, Some(14.5));
    }
}
