// libs/directory-cell/src/models.rs
use serde::Serialize;

/// Static doctor directory entry. The directory is reference data supplied
/// to the booking flow; nothing in the core mutates it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Doctor {
    pub name: &'static str,
    pub image: &'static str,
    pub clinic: Option<&'static str>,
}

pub const DOCTORS: &[Doctor] = &[
    Doctor {
        name: "Dr. Khaled Mansour",
        image: "/assets/images/dr-khaled.png",
        clinic: Some("Cardiology"),
    },
    Doctor {
        name: "Dr. Sara Haddad",
        image: "/assets/images/dr-sara.png",
        clinic: Some("Pediatrics"),
    },
    Doctor {
        name: "Dr. Layla Nasser",
        image: "/assets/images/dr-layla.png",
        clinic: Some("Dermatology"),
    },
    Doctor {
        name: "Dr. Ahmad Khoury",
        image: "/assets/images/dr-ahmad.png",
        clinic: Some("Orthopedics"),
    },
    Doctor {
        name: "Dr. Youssef Rahal",
        image: "/assets/images/dr-youssef.png",
        clinic: Some("Neurology"),
    },
];

pub const CLINICS: &[&str] = &[
    "Orthopedics",
    "Neurology",
    "Pediatrics",
    "Dental",
    "Cardiology",
    "Gynecology",
    "Physical Therapy",
    "Ophthalmology",
    "Ear, Nose & Throat",
    "Dermatology",
];

pub fn find_doctor(name: &str) -> Option<&'static Doctor> {
    DOCTORS.iter().find(|doctor| doctor.name == name)
}
