//! Noyau numérique du traceur
//!
//! Organisation interne :
//! - pretraitement.rs : virgules, constantes, x, multiplication implicite
//! - eval.rs          : lecteur à descente récursive (f64)
//! - echantillon.rs   : fonction échantillonnée sur [-échelle, échelle)
//! - derivee.rs       : dérivées approchées (différences centrées)
//! - analyse.rs       : racines, extremums, inflexion / selle
//! - tangente.rs      : équation de la tangente
//! - gestionnaire.rs  : façade (expression + échelle)
//! - graphe.rs        : modèle d’un tracé pour la vue
//! - point.rs / format.rs / erreur.rs : types et affichage

pub mod analyse;
pub mod derivee;
pub mod echantillon;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod gestionnaire;
pub mod graphe;
pub mod point;
pub mod pretraitement;
pub mod tangente;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use analyse::{extremums, racines, Classement};
pub use derivee::{deriver, Derivee};
pub use echantillon::FonctionEchantillonnee;
pub use erreur::ErreurEval;
pub use eval::{evaluer, evaluer_strict, ModeLecture};
pub use gestionnaire::{Gestionnaire, Plage};
pub use graphe::{Calques, Graphe};
pub use point::{Point, PointsMarques};
pub use tangente::Tangente;
