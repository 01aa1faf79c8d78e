//! src/reglages.rs
//!
//! Réglages de session (remplace l’état “dernière saisie” global).
//!
//! Rôle : porter expression, échelles, plage du tableau, ordre des dérivées
//! d’une session à l’autre, et lire les champs texte de la vue avec tolérance.
//!
//! Contrats :
//! - Une saisie numérique invalide n’est jamais une erreur : valeur par défaut + `warn!`.
//! - Le fichier toml est optionnel : absent => réglages par défaut.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::noyau::{Classement, ModeLecture, Plage};

pub const ECHELLE_DEFAUT: u32 = 10;
pub const ORDRE_DERIVEES_DEFAUT: usize = 3;

/// Garde-fou : au-delà, chaque dérivée ne fait que perdre deux échantillons de plus.
pub const ORDRE_DERIVEES_MAX: usize = 10;

const TABLEAU_DEBUT_DEFAUT: i32 = -5;
const TABLEAU_FIN_DEFAUT: i32 = 5;
const TABLEAU_PAS_DEFAUT: f64 = 1.0;

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture des réglages impossible: {0}")]
    Lecture(#[from] io::Error),
    #[error("réglages mal formés: {0}")]
    Format(#[from] toml::de::Error),
    #[error("écriture des réglages impossible: {0}")]
    Ecriture(#[from] toml::ser::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlageTableau {
    pub debut: i32,
    pub fin: i32,
    pub pas: f64,
}

impl Default for PlageTableau {
    fn default() -> Self {
        Self {
            debut: TABLEAU_DEBUT_DEFAUT,
            fin: TABLEAU_FIN_DEFAUT,
            pas: TABLEAU_PAS_DEFAUT,
        }
    }
}

impl From<PlageTableau> for Plage {
    fn from(p: PlageTableau) -> Self {
        Plage {
            debut: f64::from(p.debut),
            fin: f64::from(p.fin),
            pas: p.pas,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    pub expression: String,
    pub echelle_x: u32,
    pub echelle_y: u32,
    pub tableau: PlageTableau,
    pub ordre_derivees: usize,
    /// Texte résiduel / opérande manquant => erreur au lieu de 0.
    pub strict: bool,
    pub classement: Classement,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            expression: String::new(),
            echelle_x: ECHELLE_DEFAUT,
            echelle_y: ECHELLE_DEFAUT,
            tableau: PlageTableau::default(),
            ordre_derivees: ORDRE_DERIVEES_DEFAUT,
            strict: false,
            classement: Classement::default(),
        }
    }
}

impl Reglages {
    /// `<config>/traceur/reglages.toml` (absent sur le web).
    pub fn chemin_par_defaut() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("traceur").join("reglages.toml"))
    }

    pub fn charger(chemin: &Path) -> Result<Self, ErreurReglages> {
        let texte = match fs::read_to_string(chemin) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let mut r: Self = toml::from_str(&texte)?;
        r.borner();
        Ok(r)
    }

    pub fn sauver(&self, chemin: &Path) -> Result<(), ErreurReglages> {
        if let Some(parent) = chemin.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(chemin, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn mode(&self) -> ModeLecture {
        if self.strict {
            ModeLecture::Strict
        } else {
            ModeLecture::Tolerant
        }
    }

    /// Ramène les valeurs hors domaine (fichier édité à la main) aux valeurs par défaut.
    fn borner(&mut self) {
        if self.echelle_x == 0 {
            self.echelle_x = ECHELLE_DEFAUT;
        }
        if self.echelle_y == 0 {
            self.echelle_y = ECHELLE_DEFAUT;
        }
        if !(self.tableau.pas.is_finite() && self.tableau.pas > 0.0) {
            self.tableau.pas = TABLEAU_PAS_DEFAUT;
        }
        self.ordre_derivees = self.ordre_derivees.min(ORDRE_DERIVEES_MAX);
    }
}

/* ------------------------ Lecture tolérante des champs ------------------------ */

/// Nombre décimal, virgule acceptée ; `None` si illisible.
pub fn lire_decimal(texte: &str) -> Option<f64> {
    texte
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Échelle d’axe : entier strictement positif, sinon 10.
pub fn lire_echelle(texte: &str) -> u32 {
    match texte.trim().parse::<u32>() {
        Ok(v) if v > 0 => v,
        _ => {
            warn!(saisie = texte, defaut = ECHELLE_DEFAUT, "échelle invalide");
            ECHELLE_DEFAUT
        }
    }
}

/// Borne entière du tableau, sinon `defaut`.
pub fn lire_borne(texte: &str, defaut: i32) -> i32 {
    texte.trim().parse::<i32>().unwrap_or_else(|_| {
        warn!(saisie = texte, defaut, "borne invalide");
        defaut
    })
}

/// Pas du tableau : décimal strictement positif, sinon 1.
pub fn lire_pas(texte: &str) -> f64 {
    match lire_decimal(texte) {
        Some(v) if v > 0.0 => v,
        _ => {
            warn!(saisie = texte, defaut = TABLEAU_PAS_DEFAUT, "pas invalide");
            TABLEAU_PAS_DEFAUT
        }
    }
}
