//! University (institution) domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Higher-education institution
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct University {
    #[schema(example = 1)]
    pub id_university: i64,
    #[schema(example = "École Mohammadia d'Ingénieurs")]
    pub name: String,
    #[schema(example = "Rabat")]
    pub location: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "Public")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub accreditation_status: Option<String>,
    pub programs: Option<String>,
    pub image_url: Option<String>,
    #[schema(example = "emi")]
    pub slug: Option<String>,
    pub header_image_url: Option<String>,
    pub earth_view_url: Option<String>,
    /// JSON array of image URLs
    pub gallery_images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable university fields
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UniversityRequest {
    #[validate(length(min = 1, max = 255, message = "University name is required and must not exceed 255 characters"))]
    #[schema(example = "École Mohammadia d'Ingénieurs")]
    pub name: String,
    #[validate(length(max = 255, message = "Location must not exceed 255 characters"))]
    pub location: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(max = 100, message = "Type must not exceed 100 characters"))]
    pub kind: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 255, message = "Website must not exceed 255 characters"))]
    pub website: Option<String>,
    #[validate(email(message = "Email should be valid"))]
    pub contact_email: Option<String>,
    #[validate(length(max = 20, message = "Phone must not exceed 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 100, message = "Accreditation status must not exceed 100 characters"))]
    pub accreditation_status: Option<String>,
    pub programs: Option<String>,
    #[validate(length(max = 512, message = "Image URL must not exceed 512 characters"))]
    pub image_url: Option<String>,
    #[validate(length(max = 100, message = "Slug must not exceed 100 characters"))]
    pub slug: Option<String>,
    #[validate(length(max = 512, message = "Header image URL must not exceed 512 characters"))]
    pub header_image_url: Option<String>,
    #[validate(length(max = 512, message = "Earth view URL must not exceed 512 characters"))]
    pub earth_view_url: Option<String>,
    pub gallery_images: Option<String>,
}
