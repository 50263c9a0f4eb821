//! Static catalog of Moroccan institutions loaded by the seeder.
//!
//! Programs are built through four admission templates: the CNC route for
//! CPGE graduates, national post-bac competitions, application files for
//! graduate programs, and plain file-based admission without a critère.

use chrono::NaiveDate;

use crate::domain::{CritereRequest, FiliereRequest, UniversityRequest};

const ACADEMIC_YEAR: &str = "2025-2026";
const DEADLINE_YEAR: i32 = 2026;

const CNC_ADMISSION: &str = "Sélection via le Concours National Commun (CNC). Réservé aux lauréats des Classes Préparatoires (MP, PC, PSI, TSI, PT).";
const POST_BAC_ADMISSION: &str =
    "Admission sur concours national post-baccalauréat. Épreuve écrite + oral.";
const DOSSIER_ADMISSION: &str = "Sélection sur dossier académique et entretien de motivation.";
const SIMPLE_ADMISSION: &str =
    "Sélection sur dossier académique (résultats du baccalauréat et notes lycée).";

// Shared photo banks for headers and galleries.
const ENG1: &str = "https://images.pexels.com/photos/256381/pexels-photo-256381.jpeg";
const ENG2: &str = "https://images.pexels.com/photos/3861969/pexels-photo-3861969.jpeg";
const ENG3: &str = "https://images.pexels.com/photos/267507/pexels-photo-267507.jpeg";
const CS1: &str = "https://images.pexels.com/photos/1181671/pexels-photo-1181671.jpeg";
const CS2: &str = "https://images.pexels.com/photos/2280571/pexels-photo-2280571.jpeg";
const CS3: &str = "https://images.pexels.com/photos/1181345/pexels-photo-1181345.jpeg";
const CIV1: &str = "https://images.pexels.com/photos/2219024/pexels-photo-2219024.jpeg";
const CIV2: &str = "https://images.pexels.com/photos/442574/pexels-photo-442574.jpeg";
const AGR1: &str = "https://images.pexels.com/photos/440731/pexels-photo-440731.jpeg";
const AGR2: &str = "https://images.pexels.com/photos/1382731/pexels-photo-1382731.jpeg";
const BIZ1: &str = "https://images.pexels.com/photos/1181622/pexels-photo-1181622.jpeg";
const BIZ2: &str = "https://images.pexels.com/photos/3184306/pexels-photo-3184306.jpeg";
const BIZ3: &str = "https://images.pexels.com/photos/3184292/pexels-photo-3184292.jpeg";
const UNI1: &str = "https://images.pexels.com/photos/207692/pexels-photo-207692.jpeg";
const UNI2: &str = "https://images.pexels.com/photos/159775/pexels-photo-159775.jpeg";
const UNI3: &str = "https://images.pexels.com/photos/4050315/pexels-photo-4050315.jpeg";
const ARC1: &str = "https://images.pexels.com/photos/1134176/pexels-photo-1134176.jpeg";
const ARC2: &str = "https://images.pexels.com/photos/1004014/pexels-photo-1004014.jpeg";
const SPT1: &str = "https://images.pexels.com/photos/1263426/pexels-photo-1263426.jpeg";
const PVT1: &str = "https://images.pexels.com/photos/274061/pexels-photo-274061.jpeg";
const PVT2: &str = "https://images.pexels.com/photos/1181354/pexels-photo-1181354.jpeg";
const FOR1: &str = "https://images.pexels.com/photos/167386/pexels-photo-167386.jpeg";
const TEX1: &str = "https://images.pexels.com/photos/3768022/pexels-photo-3768022.jpeg";

/// One institution with its programs
#[derive(Debug, Clone)]
pub struct SchoolSeed {
    pub name: &'static str,
    pub location: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub website: &'static str,
    pub contact_email: &'static str,
    pub phone: &'static str,
    pub accreditation: &'static str,
    pub programs: &'static str,
    pub logo_abbr: &'static str,
    pub logo_color: &'static str,
    pub slug: &'static str,
    pub header_image: &'static str,
    pub earth_view: &'static str,
    pub gallery: [&'static str; 3],
    pub filieres: Vec<ProgramSeed>,
}

#[derive(Debug, Clone)]
pub struct ProgramSeed {
    pub name: &'static str,
    pub critere_admission: &'static str,
    pub duration_years: i32,
    pub tuition_fee: f64,
    pub admission_type: &'static str,
    pub language: &'static str,
    pub seats: i32,
    pub deadline: Option<NaiveDate>,
    pub critere: Option<CritereSeed>,
}

#[derive(Debug, Clone)]
pub struct CritereSeed {
    pub type_candidat: &'static str,
    pub serie_bac_cible: Option<&'static str>,
    pub seuil_calcul: Option<f64>,
    pub note_concours_ecrit: Option<f64>,
    pub a_entretien: bool,
    pub age_max: Option<i32>,
    pub score_prepa: Option<f64>,
    pub classement_cnc: Option<i32>,
    pub diplomes_requis: Option<&'static str>,
}

impl SchoolSeed {
    pub fn university_request(&self) -> UniversityRequest {
        UniversityRequest {
            name: self.name.to_string(),
            location: Some(self.location.to_string()),
            kind: Some(self.kind.to_string()),
            description: Some(self.description.to_string()),
            website: Some(self.website.to_string()),
            contact_email: Some(self.contact_email.to_string()),
            phone: Some(self.phone.to_string()),
            accreditation_status: Some(self.accreditation.to_string()),
            programs: Some(self.programs.to_string()),
            image_url: None,
            slug: Some(self.slug.to_string()),
            header_image_url: Some(self.header_image.to_string()),
            earth_view_url: Some(self.earth_view.to_string()),
            gallery_images: serde_json::to_string(&self.gallery).ok(),
        }
    }
}

impl ProgramSeed {
    pub fn filiere_request(&self, university_id: i64) -> FiliereRequest {
        FiliereRequest {
            name: self.name.to_string(),
            university_id,
            critere_admission: Some(self.critere_admission.to_string()),
            duration_years: Some(self.duration_years),
            tuition_fee: Some(self.tuition_fee),
            admission_type: Some(self.admission_type.to_string()),
            language: Some(self.language.to_string()),
            seats_available: Some(self.seats),
            application_deadline: self.deadline,
        }
    }
}

impl CritereSeed {
    pub fn critere_request(&self, filiere_id: i64) -> CritereRequest {
        CritereRequest {
            filiere_id,
            annee_academique: ACADEMIC_YEAR.to_string(),
            type_candidat: self.type_candidat.to_string(),
            serie_bac_cible: self.serie_bac_cible.map(str::to_string),
            seuil_calcul: self.seuil_calcul,
            note_concours_ecrit: self.note_concours_ecrit,
            a_entretien: self.a_entretien,
            age_max: self.age_max,
            seuil_matieres_specifiques: None,
            score_prepa: self.score_prepa,
            classement_cnc: self.classement_cnc,
            diplomes_requis: self.diplomes_requis.map(str::to_string),
            notes_semestres: None,
        }
    }
}

fn deadline(month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(DEADLINE_YEAR, month, day)
}

/// Minimum prepa average expected for a given CNC rank.
pub fn score_prepa(classement: i32) -> f64 {
    match classement {
        ..=100 => 17.5,
        ..=300 => 16.0,
        ..=600 => 14.5,
        ..=1200 => 13.0,
        _ => 12.0,
    }
}

fn cnc(name: &'static str, seats: i32, seuil: f64, classement: i32) -> ProgramSeed {
    ProgramSeed {
        name,
        critere_admission: CNC_ADMISSION,
        duration_years: 3,
        tuition_fee: 0.0,
        admission_type: "CNC",
        language: "Français",
        seats,
        deadline: deadline(6, 15),
        critere: Some(CritereSeed {
            type_candidat: "Lauréat CPGE",
            serie_bac_cible: Some("Sciences Mathématiques"),
            seuil_calcul: Some(seuil),
            note_concours_ecrit: None,
            a_entretien: false,
            age_max: Some(28),
            score_prepa: Some(score_prepa(classement)),
            classement_cnc: Some(classement),
            diplomes_requis: Some("Diplôme de Classes Préparatoires scientifiques"),
        }),
    }
}

fn post_bac(
    name: &'static str,
    seats: i32,
    serie_bac: &'static str,
    seuil: f64,
    entretien: bool,
) -> ProgramSeed {
    ProgramSeed {
        name,
        critere_admission: POST_BAC_ADMISSION,
        duration_years: 5,
        tuition_fee: 0.0,
        admission_type: "CONCOURS",
        language: "Français",
        seats,
        deadline: deadline(5, 31),
        critere: Some(CritereSeed {
            type_candidat: "Bacheliers",
            serie_bac_cible: Some(serie_bac),
            seuil_calcul: Some(seuil),
            note_concours_ecrit: Some(12.0),
            a_entretien: entretien,
            age_max: Some(22),
            score_prepa: None,
            classement_cnc: None,
            diplomes_requis: Some("Baccalauréat marocain sciences"),
        }),
    }
}

fn dossier(
    name: &'static str,
    duration_years: i32,
    tuition_fee: f64,
    seats: i32,
    diplomes: &'static str,
) -> ProgramSeed {
    ProgramSeed {
        name,
        critere_admission: DOSSIER_ADMISSION,
        duration_years,
        tuition_fee,
        admission_type: "DOSSIER",
        language: "Français/Arabe",
        seats,
        deadline: deadline(6, 30),
        critere: Some(CritereSeed {
            type_candidat: "Titulaires d'un diplôme supérieur",
            serie_bac_cible: None,
            seuil_calcul: Some(12.0),
            note_concours_ecrit: None,
            a_entretien: true,
            age_max: None,
            score_prepa: None,
            classement_cnc: None,
            diplomes_requis: Some(diplomes),
        }),
    }
}

fn simple(
    name: &'static str,
    duration_years: i32,
    language: &'static str,
    seats: i32,
) -> ProgramSeed {
    ProgramSeed {
        name,
        critere_admission: SIMPLE_ADMISSION,
        duration_years,
        tuition_fee: 0.0,
        admission_type: "DOSSIER",
        language,
        seats,
        deadline: deadline(7, 31),
        critere: None,
    }
}

/// The full catalog, in insertion order.
pub fn schools() -> Vec<SchoolSeed> {
    vec![
        // Grandes écoles, CNC route
        SchoolSeed {
            name: "École Mohammadia d'Ingénieurs (EMI)",
            location: "Rabat",
            kind: "Grande École Publique",
            description: "La plus ancienne et la plus prestigieuse école d'ingénieurs du Maroc, fondée en 1959 et rattachée à l'Université Mohammed V. Elle forme des ingénieurs d'État reconnus dans tout le Maghreb et au-delà, avec plus de 10 000 lauréats dans les secteurs public et privé.",
            website: "http://www.emi.ac.ma",
            contact_email: "contact@emi.ac.ma",
            phone: "+212 537 68 00 10",
            accreditation: "Accréditée",
            programs: "Génie Civil, Informatique, Génie Électrique, Génie Mécanique, Topographie, Génie Industriel",
            logo_abbr: "EMI",
            logo_color: "#0D47A1",
            slug: "emi",
            header_image: ENG1,
            earth_view: "https://earth.google.com/web/search/EMI+Rabat+Maroc",
            gallery: [ENG2, ENG3, CS3],
            filieres: vec![
                cnc("Génie Informatique", 90, 14.5, 400),
                cnc("Génie Civil", 80, 13.8, 600),
                cnc("Génie Électrique", 70, 14.2, 500),
                cnc("Génie Mécanique", 60, 13.5, 700),
                cnc("Topographie", 40, 13.0, 900),
            ],
        },
        SchoolSeed {
            name: "Institut National des Postes et Télécommunications (INPT)",
            location: "Rabat",
            kind: "Grande École Publique",
            description: "École d'ingénieurs d'élite spécialisée dans les télécommunications, les réseaux, la cybersécurité et les nouvelles technologies. Rattachée au Ministère du Numérique, l'INPT forme les futurs leaders de l'écosystème digital marocain.",
            website: "https://inpt.ac.ma",
            contact_email: "contact@inpt.ac.ma",
            phone: "+212 537 77 30 70",
            accreditation: "Accréditée",
            programs: "Télécommunications, Réseaux, Cybersécurité, Intelligence Artificielle, Cloud Computing",
            logo_abbr: "INPT",
            logo_color: "#1A237E",
            slug: "inpt",
            header_image: CS1,
            earth_view: "https://earth.google.com/web/search/INPT+Rabat+Maroc",
            gallery: [CS2, CS3, ENG1],
            filieres: vec![
                cnc("Ingénierie des Réseaux et Télécommunications", 80, 15.0, 250),
                cnc("Ingénierie des Systèmes Informatiques", 70, 15.2, 220),
                cnc("Cybersécurité et Confiance Numérique", 50, 15.5, 180),
            ],
        },
        SchoolSeed {
            name: "École Nationale Supérieure d'Informatique et d'Analyse des Systèmes (ENSIAS)",
            location: "Rabat",
            kind: "Grande École Publique",
            description: "École d'ingénieurs de l'Université Mohammed V, référence nationale en génie logiciel, intelligence artificielle et systèmes d'information. Fondée en 1992, l'ENSIAS entretient des partenariats avec les plus grandes entreprises tech mondiales.",
            website: "https://ensias.um5.ac.ma",
            contact_email: "contact@ensias.um5.ac.ma",
            phone: "+212 537 68 00 30",
            accreditation: "Accréditée",
            programs: "Génie Logiciel, Intelligence Artificielle, Systèmes d'Information, Sécurité Informatique, Big Data",
            logo_abbr: "ENSIAS",
            logo_color: "#1565C0",
            slug: "ensias",
            header_image: CS2,
            earth_view: "https://earth.google.com/web/search/ENSIAS+Rabat+Maroc",
            gallery: [CS1, CS3, ENG3],
            filieres: vec![
                cnc("Génie Logiciel et Systèmes d'Information", 80, 15.3, 200),
                cnc("Intelligence Artificielle et Sciences des Données", 60, 15.8, 150),
                cnc("Sécurité des Systèmes d'Information", 50, 15.0, 230),
                cnc("Ingénierie du Web et du Mobile", 60, 14.8, 280),
            ],
        },
        SchoolSeed {
            name: "École Hassania des Travaux Publics (EHTP)",
            location: "Casablanca",
            kind: "Grande École Publique",
            description: "Placée sous la tutelle du Ministère de l'Équipement, l'EHTP est la référence marocaine en génie civil, hydraulique et infrastructures. Ses lauréats pilotent les plus grands projets d'infrastructure du pays (autoroutes, barrages, villes nouvelles).",
            website: "http://www.ehtp.ac.ma",
            contact_email: "info@ehtp.ac.ma",
            phone: "+212 522 23 83 00",
            accreditation: "Accréditée",
            programs: "Génie Civil, Géotechnique, Hydraulique et Environnement, Transport et Logistique, Géomatique",
            logo_abbr: "EHTP",
            logo_color: "#006064",
            slug: "ehtp",
            header_image: CIV1,
            earth_view: "https://earth.google.com/web/search/EHTP+Casablanca+Maroc",
            gallery: [CIV2, ENG1, UNI1],
            filieres: vec![
                cnc("Génie Civil et Structures", 70, 13.8, 600),
                cnc("Hydraulique et Environnement", 50, 13.5, 700),
                cnc("Transport et Mobilité Durable", 40, 13.2, 850),
                cnc("Géomatique et SIG", 30, 13.0, 950),
            ],
        },
        SchoolSeed {
            name: "École Nationale Supérieure d'Électricité et de Mécanique (ENSEM)",
            location: "Casablanca",
            kind: "Grande École Publique",
            description: "Rattachée à l'Université Hassan II, l'ENSEM forme des ingénieurs d'État en génie électrique, automatique, énergétique et mécanique industrielle. Fortement ancrée dans le tissu industriel casablancais, elle dispose de laboratoires de pointe.",
            website: "https://ensem.univh2c.ma",
            contact_email: "contact@ensem.univh2c.ma",
            phone: "+212 522 23 32 00",
            accreditation: "Accréditée",
            programs: "Génie Électrique, Automatique et Contrôle, Génie Mécanique, Énergétique et Développement Durable",
            logo_abbr: "ENSEM",
            logo_color: "#1B5E20",
            slug: "ensem",
            header_image: ENG2,
            earth_view: "https://earth.google.com/web/search/ENSEM+Casablanca+Maroc",
            gallery: [ENG3, CS3, ENG1],
            filieres: vec![
                cnc("Génie Électrique et Systèmes Embarqués", 70, 14.0, 550),
                cnc("Génie Mécanique et Productique", 60, 13.5, 700),
                cnc("Énergétique et Développement Durable", 50, 13.2, 800),
            ],
        },
        SchoolSeed {
            name: "École Nationale Forestière des Ingénieurs (ENFI)",
            location: "Salé",
            kind: "Grande École Publique",
            description: "Seule école d'ingénieurs forestiers du Maroc, l'ENFI forme des cadres spécialisés dans la gestion durable des forêts, la conservation de la biodiversité et l'aménagement des ressources naturelles.",
            website: "https://www.enfi.ac.ma",
            contact_email: "contact@enfi.ac.ma",
            phone: "+212 537 88 21 46",
            accreditation: "Accréditée",
            programs: "Eaux et Forêts, Lutte Contre la Désertification, Gestion de la Faune Sauvage, Génie de l'Environnement",
            logo_abbr: "ENFI",
            logo_color: "#2E7D32",
            slug: "enfi",
            header_image: FOR1,
            earth_view: "https://earth.google.com/web/search/ENFI+Sale+Maroc",
            gallery: [AGR1, FOR1, UNI3],
            filieres: vec![
                post_bac("Ingénierie des Eaux et Forêts", 50, "Sciences de la Vie et de la Terre", 14.0, false),
                post_bac("Génie de l'Environnement et Développement Durable", 30, "Sciences Mathématiques", 13.5, false),
            ],
        },
        // Écoles nationales des sciences appliquées
        SchoolSeed {
            name: "École Nationale des Sciences Appliquées de Marrakech (ENSA Marrakech)",
            location: "Marrakech",
            kind: "Grande École Publique",
            description: "Rattachée à l'Université Cadi Ayyad, l'ENSA Marrakech offre une formation pluridisciplinaire en ingénierie. Son campus moderne au cœur de la ville ocre bénéficie d'un environnement académique riche.",
            website: "http://ensa.uca.ma",
            contact_email: "contact@ensa.uca.ma",
            phone: "+212 524 43 36 03",
            accreditation: "Accréditée",
            programs: "Génie Informatique, Génie Civil, Génie Électrique, Génie Mécanique, Génie Industriel",
            logo_abbr: "ENSA",
            logo_color: "#E65100",
            slug: "ensa-marrakech",
            header_image: ENG3,
            earth_view: "https://earth.google.com/web/search/ENSA+Marrakech+Maroc",
            gallery: [ENG1, CS3, UNI1],
            filieres: vec![
                post_bac("Génie Informatique", 120, "Sciences Mathématiques", 15.0, false),
                post_bac("Génie Électrique et Informatique Industrielle", 80, "Sciences Mathématiques", 14.5, false),
                post_bac("Génie Civil et Environnement", 80, "Sciences Mathématiques", 14.0, false),
            ],
        },
        SchoolSeed {
            name: "École Nationale des Sciences Appliquées d'Agadir (ENSA Agadir)",
            location: "Agadir",
            kind: "Grande École Publique",
            description: "Rattachée à l'Université Ibn Zohr, l'ENSA Agadir propose des formations en ingénierie avec une forte orientation vers les technologies durables et les besoins spécifiques de la région du Souss-Massa.",
            website: "https://ensa.uiz.ac.ma",
            contact_email: "contact@ensa.uiz.ac.ma",
            phone: "+212 528 24 08 29",
            accreditation: "Accréditée",
            programs: "Génie Informatique, Génie Civil, Génie Électrique, Agro-industrie, Halieutique",
            logo_abbr: "ENSA",
            logo_color: "#BF360C",
            slug: "ensa-agadir",
            header_image: ENG1,
            earth_view: "https://earth.google.com/web/search/ENSA+Agadir+Maroc",
            gallery: [ENG2, CS1, UNI3],
            filieres: vec![
                post_bac("Génie Informatique et Systèmes Intelligents", 100, "Sciences Mathématiques", 14.8, false),
                post_bac("Génie Industriel et Logistique", 80, "Sciences Mathématiques", 14.2, false),
            ],
        },
        // Écoles spécialisées
        SchoolSeed {
            name: "École Nationale d'Agriculture de Meknès (ENA Meknès)",
            location: "Meknès",
            kind: "Grande École Publique",
            description: "L'ENA Meknès est spécialisée dans la formation d'ingénieurs agronomes. Située au cœur de la région agricole du Saiss, elle entretient des liens directs avec les exploitations de la plaine de Meknès-Fès.",
            website: "https://www.enameknes.ac.ma",
            contact_email: "contact@enameknes.ac.ma",
            phone: "+212 535 53 11 40",
            accreditation: "Accréditée",
            programs: "Agronomie Générale, Agro-industrie, Productions Animales, Eau et Environnement",
            logo_abbr: "ENA",
            logo_color: "#33691E",
            slug: "ena-meknes",
            header_image: AGR2,
            earth_view: "https://earth.google.com/web/search/ENA+Meknes+Maroc",
            gallery: [AGR1, FOR1, UNI2],
            filieres: vec![
                post_bac("Ingénierie Agronomique", 100, "Sciences de la Vie et de la Terre", 14.5, true),
                post_bac("Agro-industrie et Qualité Alimentaire", 60, "Sciences de la Vie et de la Terre", 14.0, false),
            ],
        },
        SchoolSeed {
            name: "École Supérieure des Industries du Textile et de l'Habillement (ESITH)",
            location: "Casablanca",
            kind: "Grande École Publique",
            description: "Seule école d'ingénieurs du secteur textile et habillement au Maroc, l'ESITH répond aux besoins de l'un des piliers de l'export marocain. Elle forme des ingénieurs bilingues capables de manager des chaînes de production internationales.",
            website: "https://www.esith.ac.ma",
            contact_email: "contact@esith.ac.ma",
            phone: "+212 522 23 38 00",
            accreditation: "Accréditée",
            programs: "Ingénierie Textile et Habillement, Marketing de la Mode, Qualité et Métrologie, Gestion Industrielle",
            logo_abbr: "ESITH",
            logo_color: "#880E4F",
            slug: "esith",
            header_image: TEX1,
            earth_view: "https://earth.google.com/web/search/ESITH+Casablanca+Maroc",
            gallery: [TEX1, BIZ2, UNI3],
            filieres: vec![
                post_bac("Ingénierie Textile et Production", 80, "Sciences Mathématiques", 13.5, true),
                post_bac("Marketing et Commerce International de la Mode", 50, "Sciences Économiques", 13.0, true),
            ],
        },
        SchoolSeed {
            name: "École Nationale d'Architecture de Rabat (ENA)",
            location: "Rabat",
            kind: "Grande École Publique",
            description: "L'ENA est la référence nationale pour la formation des architectes. Elle délivre le diplôme d'Architecte d'État, reconnu en Europe et dans le monde arabophone. Fort attachement au patrimoine architectural marocain.",
            website: "https://www.ena.ac.ma",
            contact_email: "contact@ena.ac.ma",
            phone: "+212 537 68 35 00",
            accreditation: "Accréditée",
            programs: "Architecture, Urbanisme et Aménagement, Patrimoine Bâti, Design d'Intérieur, Paysagisme",
            logo_abbr: "ENA",
            logo_color: "#212121",
            slug: "ena",
            header_image: ARC1,
            earth_view: "https://earth.google.com/web/search/ENA+Architecture+Rabat+Maroc",
            gallery: [ARC2, ARC1, UNI2],
            filieres: vec![
                post_bac("Architecture — Diplôme d'État (6 ans)", 200, "Sciences Mathématiques / Lettres", 14.0, true),
                dossier("Master Architecture et Patrimoine", 2, 0.0, 30, "Diplôme d'architecte ou équivalent"),
            ],
        },
        // Commerce et management
        SchoolSeed {
            name: "École Nationale de Commerce et de Gestion de Casablanca (ENCG Casablanca)",
            location: "Casablanca",
            kind: "Grande École Publique",
            description: "Principal pôle d'excellence en gestion, commerce et management au Maroc. L'ENCG Casablanca prépare des managers et entrepreneurs capables de s'insérer immédiatement dans le marché du travail national et international.",
            website: "https://encg-casa.ma",
            contact_email: "contact@encg-casa.ma",
            phone: "+212 522 23 28 00",
            accreditation: "Accréditée",
            programs: "Management Général, Commerce International, Finance d'Entreprise, Marketing, Audit et Contrôle de Gestion, RH",
            logo_abbr: "ENCG",
            logo_color: "#6A1B9A",
            slug: "encg-casablanca",
            header_image: BIZ1,
            earth_view: "https://earth.google.com/web/search/ENCG+Casablanca+Maroc",
            gallery: [BIZ2, BIZ3, UNI1],
            filieres: vec![
                post_bac("Ingénierie du Management — Parcours Finance", 80, "Sciences Économiques", 14.5, true),
                post_bac("Ingénierie du Management — Parcours Marketing", 80, "Sciences Économiques", 14.2, true),
                post_bac("Commerce International et Logistique", 60, "Sciences Économiques", 14.0, false),
            ],
        },
        SchoolSeed {
            name: "École Nationale de Commerce et de Gestion de Settat (ENCG Settat)",
            location: "Settat",
            kind: "Grande École Publique",
            description: "Rattachée à l'Université Hassan Premier, l'ENCG Settat offre un accès à une formation en management de haut niveau. Elle est particulièrement reconnue pour sa filière Ingénierie d'Affaires et ses partenariats avec des entreprises nationales.",
            website: "https://encg-settat.ma",
            contact_email: "contact@encg-settat.ma",
            phone: "+212 523 42 10 80",
            accreditation: "Accréditée",
            programs: "Gestion, Commerce, Finance d'Entreprise, Logistique, Informatique de Gestion",
            logo_abbr: "ENCG",
            logo_color: "#7B1FA2",
            slug: "encg-settat",
            header_image: BIZ2,
            earth_view: "https://earth.google.com/web/search/ENCG+Settat+Maroc",
            gallery: [BIZ1, BIZ3, UNI3],
            filieres: vec![
                post_bac("Ingénierie d'Affaires", 80, "Sciences Économiques", 14.2, true),
                post_bac("Finance et Comptabilité", 60, "Sciences Économiques", 13.8, false),
            ],
        },
        SchoolSeed {
            name: "Institut Supérieur de Commerce et d'Administration des Entreprises (ISCAE Casablanca)",
            location: "Casablanca",
            kind: "Grande École Publique",
            description: "L'ISCAE est l'école de management de référence au Maroc depuis 1971. Son MBA et ses Mastères Spécialisés sont très prisés par les cadres du secteur privé. Accrédité AACSB, il figure dans les classements africains des meilleures business schools.",
            website: "https://www.iscae.ac.ma",
            contact_email: "contact@iscae.ac.ma",
            phone: "+212 522 36 53 18",
            accreditation: "Accréditée AACSB",
            programs: "MBA, Management, Finance, Marketing, RH, Audit, Contrôle de Gestion, Stratégie",
            logo_abbr: "ISCAE",
            logo_color: "#4A148C",
            slug: "iscae",
            header_image: BIZ1,
            earth_view: "https://earth.google.com/web/search/ISCAE+Casablanca+Maroc",
            gallery: [BIZ3, BIZ2, PVT1],
            filieres: vec![
                dossier("Master of Business Administration (MBA)", 2, 35000.0, 60, "Bac+4 minimum, 2 ans d'expérience professionnelle"),
                dossier("Mastère Spécialisé Finance et Marchés de Capitaux", 1, 28000.0, 40, "Bac+4 en économie, gestion ou ingénierie"),
                dossier("Mastère Spécialisé Marketing et Digital", 1, 28000.0, 40, "Bac+4 en commerce, marketing ou communication"),
            ],
        },
        SchoolSeed {
            name: "Institut National de Statistique et d'Économie Appliquée (INSEA)",
            location: "Rabat",
            kind: "Grande École Publique",
            description: "L'INSEA forme des ingénieurs statisticiens-économistes et des actuaires qui occupent des postes clés en planification, analyse économique, data science et gestion des risques dans les secteurs public (HCP, Bank Al-Maghrib) et privé.",
            website: "https://www.insea.ac.ma",
            contact_email: "contact@insea.ac.ma",
            phone: "+212 537 77 23 03",
            accreditation: "Accréditée",
            programs: "Statistiques et Informatique Décisionnelle, Économie Appliquée, Actuariat, Data Science, Démographie",
            logo_abbr: "INSEA",
            logo_color: "#311B92",
            slug: "insea",
            header_image: CS2,
            earth_view: "https://earth.google.com/web/search/INSEA+Rabat+Maroc",
            gallery: [CS1, BIZ1, UNI1],
            filieres: vec![
                post_bac("Ingénierie Statistique et Informatique Décisionnelle", 80, "Sciences Mathématiques", 15.5, true),
                post_bac("Actuariat et Finance Quantitative", 40, "Sciences Mathématiques", 15.8, false),
            ],
        },
        // Universités publiques
        SchoolSeed {
            name: "Université Mohammed V de Rabat (UM5)",
            location: "Rabat",
            kind: "Université Publique",
            description: "La plus ancienne université du Maroc, fondée en 1957 à l'aube de l'Indépendance. Elle regroupe facultés, grandes écoles (EMI, ENSIAS) et centres de recherche. Plus de 100 000 étudiants inscrits.",
            website: "https://www.um5.ac.ma",
            contact_email: "info@um5.ac.ma",
            phone: "+212 537 77 19 02",
            accreditation: "Accréditée",
            programs: "Droit, Sciences Économiques, Lettres et Sciences Humaines, Sciences, Médecine, Pharmacie, Informatique",
            logo_abbr: "UM5",
            logo_color: "#0277BD",
            slug: "um5",
            header_image: UNI1,
            earth_view: "https://earth.google.com/web/search/Universite+Mohammed+V+Rabat+Maroc",
            gallery: [UNI2, UNI3, CS3],
            filieres: vec![
                simple("Licence en Informatique", 3, "Français/Arabe", 500),
                simple("Licence en Sciences Économiques et Gestion", 3, "Arabe/Français", 800),
                simple("Master en Droit des Affaires", 2, "Arabe/Français", 80),
            ],
        },
        SchoolSeed {
            name: "Université Hassan II de Casablanca (UH2C)",
            location: "Casablanca",
            kind: "Université Publique",
            description: "Deuxième plus grande université du Maroc avec plus de 170 000 étudiants. Fortement connectée au monde économique casablancais, elle regroupe facultés des sciences, droit, lettres et la plupart des grandes écoles de la ville.",
            website: "https://www.univh2c.ma",
            contact_email: "info@univh2c.ma",
            phone: "+212 522 23 30 00",
            accreditation: "Accréditée",
            programs: "Sciences, Droit, Lettres, Ingénierie, Médecine, Pharmacie, Dentaire",
            logo_abbr: "UH2C",
            logo_color: "#01579B",
            slug: "uh2c",
            header_image: UNI2,
            earth_view: "https://earth.google.com/web/search/Universite+Hassan+II+Casablanca+Maroc",
            gallery: [UNI1, UNI3, BIZ1],
            filieres: vec![
                simple("Licence en Sciences de la Matière — Physique", 3, "Français", 600),
                simple("DEUST Informatique et Réseaux", 2, "Français", 200),
                simple("Master Droit Privé — Droit des Contrats", 2, "Arabe", 60),
            ],
        },
        SchoolSeed {
            name: "Faculté des Sciences Juridiques, Économiques et Sociales Souissi (FSJES Souissi)",
            location: "Rabat",
            kind: "Faculté Publique",
            description: "Composante emblématique de l'Université Mohammed V, la FSJES Souissi est l'une des facultés de droit les plus réputées du Maroc. Elle forme chaque année des milliers de juristes, économistes et experts en sciences sociales.",
            website: "https://www.um5.ac.ma",
            contact_email: "fsjes@um5.ac.ma",
            phone: "+212 537 77 72 77",
            accreditation: "Accréditée",
            programs: "Droit Privé, Droit Public, Droit des Affaires, Sciences Économiques, Sciences de Gestion, Sociologie",
            logo_abbr: "FSJES",
            logo_color: "#283593",
            slug: "fsjes-souissi",
            header_image: UNI2,
            earth_view: "https://earth.google.com/web/search/FSJES+Souissi+Rabat+Maroc",
            gallery: [UNI1, BIZ2, UNI3],
            filieres: vec![
                simple("Licence Fondamentale en Droit Privé", 3, "Arabe", 2000),
                simple("Licence Fondamentale en Sciences Économiques", 3, "Arabe/Français", 1500),
                simple("Master Droit des Affaires Internationales", 2, "Arabe/Français", 40),
            ],
        },
        SchoolSeed {
            name: "École Supérieure de Technologie de Casablanca (EST Casablanca)",
            location: "Casablanca",
            kind: "École Supérieure de Technologie",
            description: "L'EST Casablanca propose des formations courtes de type DUT (Bac+2) puis Licence Professionnelle (Bac+3), orientées vers l'insertion professionnelle immédiate dans les secteurs technologiques et tertiaires.",
            website: "https://est.univh2c.ma",
            contact_email: "contact@est.univh2c.ma",
            phone: "+212 522 23 40 00",
            accreditation: "Accréditée",
            programs: "Techniques de Management, Informatique Décisionnelle, Génie Électrique, Génie Civil, Commerce et Distribution",
            logo_abbr: "EST",
            logo_color: "#0288D1",
            slug: "est-casablanca",
            header_image: ENG3,
            earth_view: "https://earth.google.com/web/search/EST+Casablanca+Maroc",
            gallery: [ENG1, CS3, UNI3],
            filieres: vec![
                simple("DUT Informatique et Réseaux", 2, "Français", 200),
                simple("DUT Techniques de Management — Finance", 2, "Français/Arabe", 180),
                simple("Licence Professionnelle Commerce et Distribution", 1, "Français/Arabe", 100),
            ],
        },
        // Instituts et universités privées
        SchoolSeed {
            name: "Université Internationale de Rabat (UIR)",
            location: "Rabat",
            kind: "Université Privée",
            description: "Université privée d'excellence fondée en partenariat avec des universités françaises, l'UIR accueille des étudiants de 40 nationalités sur son campus de Rabat-Technopolis. Ses programmes sont double-diplômants avec des partenaires européens.",
            website: "https://www.uir.ac.ma",
            contact_email: "info@uir.ac.ma",
            phone: "+212 530 10 30 00",
            accreditation: "Accréditée",
            programs: "Ingénierie, Architecture, Droit, Sciences Politiques, Aéronautique et Aérospatial, Management",
            logo_abbr: "UIR",
            logo_color: "#C62828",
            slug: "uir",
            header_image: PVT1,
            earth_view: "https://earth.google.com/web/search/Universite+Internationale+Rabat+Maroc",
            gallery: [PVT2, CS1, BIZ1],
            filieres: vec![
                dossier("Ingénierie Informatique et Réseaux", 3, 45000.0, 150, "Baccalauréat Sciences Mathématiques avec mention"),
                dossier("Ingénierie Aéronautique", 3, 55000.0, 60, "Baccalauréat Sciences Mathématiques avec mention"),
                dossier("Droit et Sciences Politiques", 3, 35000.0, 80, "Baccalauréat toutes séries"),
            ],
        },
        SchoolSeed {
            name: "Université Mundiapolis de Casablanca",
            location: "Casablanca",
            kind: "Université Privée",
            description: "Université privée casablancaise offrant des programmes en management, droit, informatique et communication dans un cadre international avec des échanges académiques en Europe et en Amérique du Nord.",
            website: "https://www.mundiapolis.ma",
            contact_email: "contact@mundiapolis.ma",
            phone: "+212 522 36 06 40",
            accreditation: "Accréditée",
            programs: "Management, Droit des Affaires, Informatique, Communication, Design, Architecture d'Intérieur",
            logo_abbr: "MPO",
            logo_color: "#AD1457",
            slug: "mundiapolis",
            header_image: PVT2,
            earth_view: "https://earth.google.com/web/search/Mundiapolis+Casablanca+Maroc",
            gallery: [PVT1, BIZ1, CS3],
            filieres: vec![
                dossier("Bachelor Management et Entrepreneuriat", 3, 38000.0, 100, "Baccalauréat toutes séries, dossier et entretien"),
                dossier("Bachelor Informatique et Big Data", 3, 38000.0, 80, "Baccalauréat Sciences Mathématiques"),
            ],
        },
        SchoolSeed {
            name: "Institut Royal de Formation des Cadres — Jeunesse et Sports (IRFC)",
            location: "Rabat",
            kind: "Institut Royal",
            description: "L'IRFC est l'unique institution marocaine de formation des professeurs d'EPS et des cadres supérieurs du sport et des loisirs. Il forme les futurs entraîneurs nationaux et responsables de fédérations sportives.",
            website: "https://www.irfc.ma",
            contact_email: "contact@irfc.ma",
            phone: "+212 537 78 52 11",
            accreditation: "Accréditée",
            programs: "Éducation Physique et Sportive, Sciences du Sport et de l'Entraînement, Animation et Loisirs, Management Sportif",
            logo_abbr: "IRFC",
            logo_color: "#BF360C",
            slug: "irfc",
            header_image: SPT1,
            earth_view: "https://earth.google.com/web/search/IRFC+Rabat+Maroc",
            gallery: [SPT1, AGR1, UNI3],
            filieres: vec![
                post_bac("Licence en Éducation Physique et Sportive", 60, "Sciences de la Vie et de la Terre", 13.0, true),
                dossier("Master en Management du Sport", 2, 0.0, 30, "Licence EPS ou équivalent + expérience sportive"),
            ],
        },
    ]
}
