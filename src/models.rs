use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub const DEFAULT_POSTER: &str = "/images/default-poster.jpg";

/// A theater account. The password hash never leaves the store layer in a
/// serializable form; responses use [`CinemaPublic`].
#[derive(Clone, Debug)]
pub struct Cinema {
    pub id: i64,
    pub nom: String,
    pub adresse: String,
    pub ville: String,
    pub login: String,
    pub mot_de_passe: String,
    pub email: String,
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CinemaPublic {
    pub id: i64,
    pub nom: String,
    pub adresse: String,
    pub ville: String,
    pub login: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<&Cinema> for CinemaPublic {
    fn from(cinema: &Cinema) -> Self {
        Self {
            id: cinema.id,
            nom: cinema.nom.clone(),
            adresse: cinema.adresse.clone(),
            ville: cinema.ville.clone(),
            login: cinema.login.clone(),
            email: cinema.email.clone(),
            created_at: cinema.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    pub titre: String,
    pub duree: i32,
    pub langue: String,
    pub sous_titres: bool,
    pub realisateur: String,
    pub acteurs_principaux: String,
    pub synopsis: Option<String>,
    pub age_minimum: String,
    pub genres: Option<String>,
    pub poster: String,
    pub created_at: Timestamp,
}

/// A recurring screening of one film at one cinema: three designated weekdays
/// at a fixed start time, over a date range.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Programmation {
    pub id: i64,
    pub film_id: i64,
    pub cinema_id: i64,
    pub date_debut: Date,
    pub date_fin: Date,
    pub jour_1: String,
    pub jour_2: String,
    pub jour_3: String,
    pub heure_debut: String,
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgrammationWithCinema {
    #[serde(flatten)]
    pub programmation: Programmation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cinema: Option<CinemaPublic>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilmWithProgrammations {
    #[serde(flatten)]
    pub film: Film,
    pub programmations: Vec<ProgrammationWithCinema>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgrammationWithDetails {
    #[serde(flatten)]
    pub programmation: Programmation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub film: Option<Film>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cinema: Option<CinemaPublic>,
}
