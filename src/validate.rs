//! Input payloads and their validation.
//!
//! Payloads deserialize leniently (every field optional) so that a request
//! with missing or blank fields produces a field-level error list instead of
//! a deserializer rejection. Validation runs before any storage access.

use jiff::civil::Date;
use serde::Deserialize;

use crate::error::{ApiError, FieldError};
use crate::models::DEFAULT_POSTER;

const WEEKDAYS: [&str; 7] =
    ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub login: Option<String>,
    pub mot_de_passe: Option<String>,
}

#[derive(Debug)]
pub struct LoginInput {
    pub login: String,
    pub mot_de_passe: String,
}

impl LoginRequest {
    pub fn validate(self) -> Result<LoginInput, ApiError> {
        let mut errors = Vec::new();
        let login = required(&mut errors, "login", self.login);
        let mot_de_passe = required(&mut errors, "mot_de_passe", self.mot_de_passe);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(LoginInput { login, mot_de_passe })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewCinema {
    pub nom: Option<String>,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub login: Option<String>,
    pub mot_de_passe: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct CinemaInput {
    pub nom: String,
    pub adresse: String,
    pub ville: String,
    pub login: String,
    pub mot_de_passe: String,
    pub email: String,
}

impl NewCinema {
    pub fn validate(self) -> Result<CinemaInput, ApiError> {
        let mut errors = Vec::new();
        let nom = required(&mut errors, "nom", self.nom);
        let adresse = required(&mut errors, "adresse", self.adresse);
        let ville = required(&mut errors, "ville", self.ville);
        let login = required(&mut errors, "login", self.login);
        let mot_de_passe = required(&mut errors, "mot_de_passe", self.mot_de_passe);
        let email = required(&mut errors, "email", self.email);

        if !mot_de_passe.is_empty() && mot_de_passe.len() < 8 {
            errors.push(FieldError::new("mot_de_passe", "Password must be at least 8 characters"));
        }
        if !email.is_empty() && !email.contains('@') {
            errors.push(FieldError::new("email", "Invalid email address"));
        }

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(CinemaInput { nom, adresse, ville, login, mot_de_passe, email })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewFilm {
    pub titre: Option<String>,
    pub duree: Option<i32>,
    pub langue: Option<String>,
    pub sous_titres: Option<bool>,
    pub realisateur: Option<String>,
    pub acteurs_principaux: Option<String>,
    pub synopsis: Option<String>,
    pub age_minimum: Option<String>,
    pub genres: Option<String>,
    pub poster: Option<String>,
}

#[derive(Debug)]
pub struct FilmInput {
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
}

impl NewFilm {
    pub fn validate(self) -> Result<FilmInput, ApiError> {
        let mut errors = Vec::new();
        let titre = required(&mut errors, "titre", self.titre);
        let langue = required(&mut errors, "langue", self.langue);
        let realisateur = required(&mut errors, "realisateur", self.realisateur);
        let acteurs_principaux = required(&mut errors, "acteurs_principaux", self.acteurs_principaux);
        let age_minimum = required(&mut errors, "age_minimum", self.age_minimum);

        let duree = match self.duree {
            Some(d) if d >= 1 => d,
            Some(_) => {
                errors.push(FieldError::new("duree", "Duration must be at least 1 minute"));
                0
            }
            None => {
                errors.push(FieldError::new("duree", "Required"));
                0
            }
        };

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }
        Ok(FilmInput {
            titre,
            duree,
            langue,
            sous_titres: self.sous_titres.unwrap_or(false),
            realisateur,
            acteurs_principaux,
            synopsis: self.synopsis.filter(|s| !s.trim().is_empty()),
            age_minimum,
            genres: self.genres.filter(|s| !s.trim().is_empty()),
            poster: self
                .poster
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_POSTER.to_string()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewProgrammation {
    pub film_id: Option<i64>,
    pub date_debut: Option<String>,
    pub date_fin: Option<String>,
    pub jour_1: Option<String>,
    pub jour_2: Option<String>,
    pub jour_3: Option<String>,
    pub heure_debut: Option<String>,
}

#[derive(Debug)]
pub struct ProgrammationInput {
    pub film_id: i64,
    pub date_debut: Date,
    pub date_fin: Date,
    pub jour_1: String,
    pub jour_2: String,
    pub jour_3: String,
    pub heure_debut: String,
}

impl NewProgrammation {
    pub fn validate(self) -> Result<ProgrammationInput, ApiError> {
        let mut errors = Vec::new();

        let film_id = match self.film_id {
            Some(id) => id,
            None => {
                errors.push(FieldError::new("film_id", "Required"));
                0
            }
        };

        let date_debut = parse_date(&mut errors, "date_debut", self.date_debut);
        let date_fin = parse_date(&mut errors, "date_fin", self.date_fin);
        if let (Some(debut), Some(fin)) = (date_debut, date_fin) {
            if fin < debut {
                errors.push(FieldError::new("date_fin", "End date must not precede start date"));
            }
        }

        let jour_1 = parse_weekday(&mut errors, "jour_1", self.jour_1);
        let jour_2 = parse_weekday(&mut errors, "jour_2", self.jour_2);
        let jour_3 = parse_weekday(&mut errors, "jour_3", self.jour_3);

        let heure_debut = match self.heure_debut {
            Some(ref h) if h.len() == 5 && h.parse::<jiff::civil::Time>().is_ok() => h.clone(),
            Some(_) => {
                errors.push(FieldError::new("heure_debut", "Expected a time in HH:MM format"));
                String::new()
            }
            None => {
                errors.push(FieldError::new("heure_debut", "Required"));
                String::new()
            }
        };

        // a missing date already pushed its own error above
        match (date_debut, date_fin) {
            (Some(date_debut), Some(date_fin)) if errors.is_empty() => Ok(ProgrammationInput {
                film_id,
                date_debut,
                date_fin,
                jour_1,
                jour_2,
                jour_3,
                heure_debut,
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

fn required(errors: &mut Vec<FieldError>, field: &'static str, value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            errors.push(FieldError::new(field, "Required"));
            String::new()
        }
    }
}

fn parse_date(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> Option<Date> {
    match value {
        Some(ref v) => match v.parse::<Date>() {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(field, "Expected a date in YYYY-MM-DD format"));
                None
            }
        },
        None => {
            errors.push(FieldError::new(field, "Required"));
            None
        }
    }
}

fn parse_weekday(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> String {
    match value {
        Some(v) if WEEKDAYS.contains(&v.to_lowercase().as_str()) => v,
        Some(_) => {
            errors.push(FieldError::new(field, "Expected a weekday name"));
            String::new()
        }
        None => {
            errors.push(FieldError::new(field, "Required"));
            String::new()
        }
    }
}
