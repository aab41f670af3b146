pub mod models;
pub mod router;

pub use models::{find_doctor, Doctor, CLINICS, DOCTORS};
pub use router::directory_routes;
