//! HTTP request handlers.

pub mod auth_handler;
pub mod chat_handler;
pub mod critere_handler;
pub mod filiere_handler;
pub mod preference_handler;
pub mod student_handler;
pub mod university_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use chat_handler::chat_routes;
pub use critere_handler::critere_routes;
pub use filiere_handler::filiere_routes;
pub use preference_handler::preference_routes;
pub use student_handler::{bac2_student_routes, bac_student_routes, prepa_student_routes};
pub use university_handler::university_routes;
pub use user_handler::user_routes;
