// src/noyau/erreur.rs

use thiserror::Error;

/// Erreurs de l’évaluateur.
///
/// Les résultats non finis (division par zéro, `ln` d’un négatif…) ne sont PAS
/// des erreurs : ils remontent en `NaN` / `±inf` et sont filtrés par l’échantillonneur.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErreurEval {
    /// Identifiant hors de {sqrt, ln, log, sin, cos, tan} : fatal pour l’évaluation.
    #[error("fonction inconnue: '{nom}'")]
    FonctionInconnue { nom: String },

    /// Suite de chiffres/points non convertible (ex: "1.2.3").
    #[error("nombre invalide: '{texte}'")]
    NombreInvalide { texte: String },

    /// Mode strict seulement : texte non consommé après une expression complète.
    #[error("entrée résiduelle à la position {position}: '{reste}'")]
    EntreeResiduelle { position: usize, reste: String },

    /// Mode strict seulement : opérande attendu (ex: "2+").
    #[error("opérande manquant à la position {position}")]
    OperandeManquant { position: usize },

    /// Garde-fou : imbrication trop profonde (anti-débordement de pile).
    #[error("expression trop imbriquée (profondeur > {max})")]
    ProfondeurExcessive { max: usize },
}
