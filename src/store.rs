//! In-memory store: one keyed map per entity behind a single `RwLock`, with
//! auto-incrementing ids. Relational lookups are collection scans; cascade
//! deletes substitute for referential integrity.

use std::collections::HashMap;

use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::models::{
    Cinema, CinemaPublic, Film, FilmWithProgrammations, Programmation, ProgrammationWithCinema,
    ProgrammationWithDetails,
};
use crate::validate::{CinemaInput, FilmInput, ProgrammationInput};

#[derive(Default)]
struct Tables {
    cinemas: HashMap<i64, Cinema>,
    films: HashMap<i64, Film>,
    programmations: HashMap<i64, Programmation>,
    next_cinema_id: i64,
    next_film_id: i64,
    next_programmation_id: i64,
}

impl Tables {
    fn new() -> Self {
        Self { next_cinema_id: 1, next_film_id: 1, next_programmation_id: 1, ..Self::default() }
    }

    fn cinema_public(&self, id: i64) -> Option<CinemaPublic> {
        self.cinemas.get(&id).map(CinemaPublic::from)
    }

    fn programmations_with_cinema(
        &self,
        mut pick: impl FnMut(&Programmation) -> bool,
    ) -> Vec<ProgrammationWithCinema> {
        let mut out: Vec<_> = self
            .programmations
            .values()
            .filter(|p| pick(p))
            .map(|p| ProgrammationWithCinema {
                programmation: p.clone(),
                cinema: self.cinema_public(p.cinema_id),
            })
            .collect();
        out.sort_by_key(|p| p.programmation.id);
        out
    }
}

pub struct Store {
    tables: RwLock<Tables>,
}

/// Sort orders accepted by the by-city film search. `Popular` and `Rating`
/// keep insertion order; there is no view or rating data to rank by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilmSort {
    Popular,
    Newest,
    Alphabetical,
    Rating,
}

impl FilmSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "popular" => Some(FilmSort::Popular),
            "newest" => Some(FilmSort::Newest),
            "alphabetical" => Some(FilmSort::Alphabetical),
            "rating" => Some(FilmSort::Rating),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct CityFilters {
    pub genre: Option<String>,
    pub langue: Option<String>,
    pub age_minimum: Option<String>,
    pub sort: Option<FilmSort>,
}

impl Store {
    pub fn new() -> Self {
        Self { tables: RwLock::new(Tables::new()) }
    }

    // ---- cinemas ----

    pub async fn cinema(&self, id: i64) -> Option<Cinema> {
        self.tables.read().await.cinemas.get(&id).cloned()
    }

    pub async fn cinema_by_login(&self, login: &str) -> Option<Cinema> {
        let tables = self.tables.read().await;
        tables.cinemas.values().find(|c| c.login == login).cloned()
    }

    pub async fn cinemas(&self, ville: Option<&str>) -> Vec<CinemaPublic> {
        let tables = self.tables.read().await;
        let mut out: Vec<_> = tables
            .cinemas
            .values()
            .filter(|c| ville.is_none_or(|v| c.ville.eq_ignore_ascii_case(v)))
            .map(CinemaPublic::from)
            .collect();
        out.sort_by_key(|c| c.id);
        out
    }

    pub async fn create_cinema(&self, input: CinemaInput, password_hash: String) -> Cinema {
        let mut tables = self.tables.write().await;
        let id = tables.next_cinema_id;
        tables.next_cinema_id += 1;
        let cinema = Cinema {
            id,
            nom: input.nom,
            adresse: input.adresse,
            ville: input.ville,
            login: input.login,
            mot_de_passe: password_hash,
            email: input.email,
            created_at: Timestamp::now(),
        };
        tables.cinemas.insert(id, cinema.clone());
        cinema
    }

    pub async fn delete_cinema(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        if tables.cinemas.remove(&id).is_none() {
            return false;
        }
        tables.programmations.retain(|_, p| p.cinema_id != id);
        true
    }

    // ---- films ----

    pub async fn film(&self, id: i64) -> Option<Film> {
        self.tables.read().await.films.get(&id).cloned()
    }

    pub async fn films(&self) -> Vec<Film> {
        let tables = self.tables.read().await;
        let mut out: Vec<_> = tables.films.values().cloned().collect();
        out.sort_by_key(|f| f.id);
        out
    }

    pub async fn film_with_programmations(&self, id: i64) -> Option<FilmWithProgrammations> {
        let tables = self.tables.read().await;
        let film = tables.films.get(&id)?.clone();
        let programmations = tables.programmations_with_cinema(|p| p.film_id == id);
        Some(FilmWithProgrammations { film, programmations })
    }

    /// Films with at least one programmation at a cinema in the given city,
    /// each carrying those programmations joined to their cinema.
    pub async fn films_by_city(&self, city: &str, filters: &CityFilters) -> Vec<FilmWithProgrammations> {
        let tables = self.tables.read().await;

        let cinema_ids: Vec<i64> = tables
            .cinemas
            .values()
            .filter(|c| c.ville.eq_ignore_ascii_case(city))
            .map(|c| c.id)
            .collect();

        let mut film_ids: Vec<i64> = tables
            .programmations
            .values()
            .filter(|p| cinema_ids.contains(&p.cinema_id))
            .map(|p| p.film_id)
            .collect();
        film_ids.sort_unstable();
        film_ids.dedup();

        let mut films: Vec<FilmWithProgrammations> = film_ids
            .into_iter()
            .filter_map(|id| tables.films.get(&id))
            .filter(|film| {
                filters.genre.as_deref().is_none_or(|genre| {
                    film.genres
                        .as_deref()
                        .is_some_and(|g| g.to_lowercase().contains(&genre.to_lowercase()))
                })
            })
            .filter(|film| filters.langue.as_deref().is_none_or(|l| film.langue == l))
            .filter(|film| filters.age_minimum.as_deref().is_none_or(|a| film.age_minimum == a))
            .map(|film| FilmWithProgrammations {
                film: film.clone(),
                programmations: tables.programmations_with_cinema(|p| {
                    p.film_id == film.id && cinema_ids.contains(&p.cinema_id)
                }),
            })
            .collect();

        match filters.sort {
            Some(FilmSort::Newest) => {
                films.sort_by(|a, b| b.film.created_at.cmp(&a.film.created_at))
            }
            Some(FilmSort::Alphabetical) => films.sort_by(|a, b| a.film.titre.cmp(&b.film.titre)),
            Some(FilmSort::Popular) | Some(FilmSort::Rating) | None => {}
        }

        films
    }

    pub async fn create_film(&self, input: FilmInput) -> Film {
        let mut tables = self.tables.write().await;
        let id = tables.next_film_id;
        tables.next_film_id += 1;
        let film = Film {
            id,
            titre: input.titre,
            duree: input.duree,
            langue: input.langue,
            sous_titres: input.sous_titres,
            realisateur: input.realisateur,
            acteurs_principaux: input.acteurs_principaux,
            synopsis: input.synopsis,
            age_minimum: input.age_minimum,
            genres: input.genres,
            poster: input.poster,
            created_at: Timestamp::now(),
        };
        tables.films.insert(id, film.clone());
        film
    }

    pub async fn update_film(&self, id: i64, input: FilmInput) -> Option<Film> {
        let mut tables = self.tables.write().await;
        let film = tables.films.get_mut(&id)?;
        film.titre = input.titre;
        film.duree = input.duree;
        film.langue = input.langue;
        film.sous_titres = input.sous_titres;
        film.realisateur = input.realisateur;
        film.acteurs_principaux = input.acteurs_principaux;
        film.synopsis = input.synopsis;
        film.age_minimum = input.age_minimum;
        film.genres = input.genres;
        film.poster = input.poster;
        Some(film.clone())
    }

    pub async fn delete_film(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        if tables.films.remove(&id).is_none() {
            return false;
        }
        tables.programmations.retain(|_, p| p.film_id != id);
        true
    }

    // ---- programmations ----

    pub async fn programmation(&self, id: i64) -> Option<Programmation> {
        self.tables.read().await.programmations.get(&id).cloned()
    }

    pub async fn programmation_with_details(&self, id: i64) -> Option<ProgrammationWithDetails> {
        let tables = self.tables.read().await;
        let programmation = tables.programmations.get(&id)?.clone();
        let film = tables.films.get(&programmation.film_id).cloned();
        let cinema = tables.cinema_public(programmation.cinema_id);
        Some(ProgrammationWithDetails { programmation, film, cinema })
    }

    pub async fn programmations(
        &self,
        cinema_id: Option<i64>,
        film_id: Option<i64>,
    ) -> Vec<Programmation> {
        let tables = self.tables.read().await;
        let mut out: Vec<_> = tables
            .programmations
            .values()
            .filter(|p| cinema_id.is_none_or(|id| p.cinema_id == id))
            .filter(|p| film_id.is_none_or(|id| p.film_id == id))
            .cloned()
            .collect();
        out.sort_by_key(|p| p.id);
        out
    }

    pub async fn create_programmation(
        &self,
        input: ProgrammationInput,
        cinema_id: i64,
    ) -> Programmation {
        let mut tables = self.tables.write().await;
        let id = tables.next_programmation_id;
        tables.next_programmation_id += 1;
        let programmation = Programmation {
            id,
            film_id: input.film_id,
            cinema_id,
            date_debut: input.date_debut,
            date_fin: input.date_fin,
            jour_1: input.jour_1,
            jour_2: input.jour_2,
            jour_3: input.jour_3,
            heure_debut: input.heure_debut,
            created_at: Timestamp::now(),
        };
        tables.programmations.insert(id, programmation.clone());
        programmation
    }

    pub async fn update_programmation(
        &self,
        id: i64,
        input: ProgrammationInput,
    ) -> Option<Programmation> {
        let mut tables = self.tables.write().await;
        let programmation = tables.programmations.get_mut(&id)?;
        programmation.film_id = input.film_id;
        programmation.date_debut = input.date_debut;
        programmation.date_fin = input.date_fin;
        programmation.jour_1 = input.jour_1;
        programmation.jour_2 = input.jour_2;
        programmation.jour_3 = input.jour_3;
        programmation.heure_debut = input.heure_debut;
        Some(programmation.clone())
    }

    pub async fn delete_programmation(&self, id: i64) -> bool {
        self.tables.write().await.programmations.remove(&id).is_some()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[tokio::test]
    async fn seeded_fixtures_are_linked() {
        let store = Store::new();
        seed::demo_data(&store).await;

        assert_eq!(store.cinemas(None).await.len(), 3);
        assert_eq!(store.films().await.len(), 4);
        let programmations = store.programmations(None, None).await;
        assert_eq!(programmations.len(), 4);
        for p in &programmations {
            assert!(store.film(p.film_id).await.is_some());
            assert!(store.cinema(p.cinema_id).await.is_some());
        }
    }

    #[tokio::test]
    async fn city_filter_is_case_insensitive() {
        let store = Store::new();
        seed::demo_data(&store).await;

        assert_eq!(store.cinemas(Some("paris")).await.len(), 3);
        assert_eq!(store.cinemas(Some("PARIS")).await.len(), 3);
        assert!(store.cinemas(Some("Lyon")).await.is_empty());
    }

    #[tokio::test]
    async fn deleting_film_cascades_to_programmations() {
        let store = Store::new();
        seed::demo_data(&store).await;

        let before = store.programmations(None, Some(1)).await;
        assert!(!before.is_empty());

        assert!(store.delete_film(1).await);
        assert!(store.film(1).await.is_none());
        assert!(store.programmations(None, Some(1)).await.is_empty());
    }

    #[tokio::test]
    async fn deleting_cinema_cascades_to_programmations() {
        let store = Store::new();
        seed::demo_data(&store).await;

        assert!(!store.programmations(Some(1), None).await.is_empty());
        assert!(store.delete_cinema(1).await);
        assert!(store.programmations(Some(1), None).await.is_empty());
        // other cinemas untouched
        assert!(!store.programmations(Some(2), None).await.is_empty());
    }

    #[tokio::test]
    async fn films_by_city_joins_programmations() {
        let store = Store::new();
        seed::demo_data(&store).await;

        let films = store.films_by_city("Paris", &CityFilters::default()).await;
        assert_eq!(films.len(), 4);
        for film in &films {
            assert!(!film.programmations.is_empty());
            for p in &film.programmations {
                assert_eq!(p.programmation.film_id, film.film.id);
                assert!(p.cinema.is_some());
            }
        }

        assert!(store.films_by_city("Marseille", &CityFilters::default()).await.is_empty());
    }

    #[tokio::test]
    async fn films_by_city_genre_filter_matches_substring() {
        let store = Store::new();
        seed::demo_data(&store).await;

        let filters = CityFilters { genre: Some("animation".to_string()), ..Default::default() };
        let films = store.films_by_city("Paris", &filters).await;
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].film.titre, "Le Voyage de Chihiro");
    }

    #[tokio::test]
    async fn films_by_city_sorts_alphabetically() {
        let store = Store::new();
        seed::demo_data(&store).await;

        let filters =
            CityFilters { sort: Some(FilmSort::Alphabetical), ..Default::default() };
        let films = store.films_by_city("Paris", &filters).await;
        let titles: Vec<_> = films.iter().map(|f| f.film.titre.as_str()).collect();
        let mut sorted = titles.clone();
        sorted.sort();
        assert_eq!(titles, sorted);
    }

    #[tokio::test]
    async fn deleted_cinema_leaves_details_join_partial() {
        let store = Store::new();
        seed::demo_data(&store).await;

        // drop the cinema map entry without the cascade to exercise the join
        {
            let mut tables = store.tables.write().await;
            tables.cinemas.remove(&1);
        }
        let details = store.programmation_with_details(1).await.unwrap();
        assert!(details.cinema.is_none());
        assert!(details.film.is_some());
    }
}
