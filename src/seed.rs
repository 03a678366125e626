//! Demo fixtures installed at startup so the API is browsable out of the box.

use crate::auth;
use crate::store::Store;
use crate::validate::{CinemaInput, FilmInput, ProgrammationInput};

pub const DEMO_PASSWORD: &str = "password123";

pub async fn demo_data(store: &Store) {
    let password_hash = auth::hash_password(DEMO_PASSWORD);

    let gaumont = store
        .create_cinema(
            CinemaInput {
                nom: "Cinéma Gaumont Opéra".to_string(),
                adresse: "2 Boulevard des Capucines".to_string(),
                ville: "Paris".to_string(),
                login: "gaumont".to_string(),
                mot_de_passe: String::new(),
                email: "contact@gaumont.fr".to_string(),
            },
            password_hash.clone(),
        )
        .await;

    let ugc = store
        .create_cinema(
            CinemaInput {
                nom: "UGC Ciné Cité Les Halles".to_string(),
                adresse: "7 Place de la Rotonde".to_string(),
                ville: "Paris".to_string(),
                login: "ugc".to_string(),
                mot_de_passe: String::new(),
                email: "contact@ugc.fr".to_string(),
            },
            password_hash.clone(),
        )
        .await;

    let mk2 = store
        .create_cinema(
            CinemaInput {
                nom: "MK2 Bibliothèque".to_string(),
                adresse: "128-162 Avenue de France".to_string(),
                ville: "Paris".to_string(),
                login: "mk2".to_string(),
                mot_de_passe: String::new(),
                email: "contact@mk2.fr".to_string(),
            },
            password_hash,
        )
        .await;

    let chihiro = store
        .create_film(FilmInput {
            titre: "Le Voyage de Chihiro".to_string(),
            duree: 125,
            langue: "Japonais".to_string(),
            sous_titres: true,
            realisateur: "Hayao Miyazaki".to_string(),
            acteurs_principaux: "Rumi Hiiragi, Miyu Irino".to_string(),
            synopsis: Some(
                "Chihiro, une fillette de 10 ans, découvre un monde où les humains ne sont pas \
                 les bienvenus et doit sauver ses parents transformés en porcs."
                    .to_string(),
            ),
            age_minimum: "Tous publics".to_string(),
            genres: Some("Animation, Aventure, Fantastique".to_string()),
            poster: "/images/chihiro.jpg".to_string(),
        })
        .await;

    let amelie = store
        .create_film(FilmInput {
            titre: "Amélie".to_string(),
            duree: 122,
            langue: "Français".to_string(),
            sous_titres: false,
            realisateur: "Jean-Pierre Jeunet".to_string(),
            acteurs_principaux: "Audrey Tautou, Mathieu Kassovitz".to_string(),
            synopsis: Some(
                "Une jeune serveuse de Montmartre invente des stratagèmes pour intervenir \
                 incognito dans l'existence de ceux qui l'entourent."
                    .to_string(),
            ),
            age_minimum: "Tous publics".to_string(),
            genres: Some("Comédie, Romance".to_string()),
            poster: "/images/amelie.jpg".to_string(),
        })
        .await;

    let fabuleux = store
        .create_film(FilmInput {
            titre: "Le Fabuleux Destin d'Amélie Poulain".to_string(),
            duree: 122,
            langue: "Français".to_string(),
            sous_titres: false,
            realisateur: "Jean-Pierre Jeunet".to_string(),
            acteurs_principaux: "Audrey Tautou, Mathieu Kassovitz".to_string(),
            synopsis: Some(
                "Amélie s'est fixé un objectif : faire le bien de ceux qui l'entourent."
                    .to_string(),
            ),
            age_minimum: "Tous publics".to_string(),
            genres: Some("Comédie, Romance".to_string()),
            poster: "/images/amelie-poulain.jpg".to_string(),
        })
        .await;

    let inception = store
        .create_film(FilmInput {
            titre: "Inception".to_string(),
            duree: 148,
            langue: "Anglais".to_string(),
            sous_titres: true,
            realisateur: "Christopher Nolan".to_string(),
            acteurs_principaux: "Leonardo DiCaprio, Joseph Gordon-Levitt".to_string(),
            synopsis: Some(
                "Dom Cobb, voleur expérimenté dans l'art de l'extraction, se voit offrir une \
                 chance de rédemption : l'inception, implanter une idée dans un esprit."
                    .to_string(),
            ),
            age_minimum: "12+".to_string(),
            genres: Some("Action, Science-Fiction, Thriller".to_string()),
            poster: "/images/inception.jpg".to_string(),
        })
        .await;

    for (film_id, cinema_id, debut, fin, jours, heure) in [
        (chihiro.id, gaumont.id, "2025-05-01", "2025-05-31", ["Monday", "Wednesday", "Friday"], "19:30"),
        (amelie.id, ugc.id, "2025-05-01", "2025-06-15", ["Tuesday", "Thursday", "Saturday"], "20:00"),
        (fabuleux.id, mk2.id, "2025-05-15", "2025-06-30", ["Wednesday", "Friday", "Sunday"], "18:45"),
        (inception.id, gaumont.id, "2025-05-10", "2025-06-10", ["Monday", "Thursday", "Saturday"], "21:15"),
    ] {
        store
            .create_programmation(
                ProgrammationInput {
                    film_id,
                    date_debut: debut.parse().expect("fixture date"),
                    date_fin: fin.parse().expect("fixture date"),
                    jour_1: jours[0].to_string(),
                    jour_2: jours[1].to_string(),
                    jour_3: jours[2].to_string(),
                    heure_debut: heure.to_string(),
                },
                cinema_id,
            )
            .await;
    }
}
