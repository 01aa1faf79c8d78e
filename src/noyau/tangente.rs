// src/noyau/tangente.rs

use std::fmt;

use super::echantillon::FonctionEchantillonnee;
use super::format::{arrondi, format_nombre};

/// Tangente `t(x) = m·x + b`, m et b arrondis à 2 décimales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tangente {
    pub pente: f64,
    pub ordonnee: f64,
}

impl Tangente {
    pub fn valeur_en(&self, x: f64) -> f64 {
        self.pente * x + self.ordonnee
    }
}

/// "{m}x", "{m}x + {b}" ou "{m}x - {|b|}".
impl fmt::Display for Tangente {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", format_nombre(self.pente))?;
        if self.ordonnee == 0.0 {
            return Ok(());
        }
        let signe = if self.ordonnee < 0.0 { '-' } else { '+' };
        write!(f, " {signe} {}", format_nombre(self.ordonnee.abs()))
    }
}

/// Tangente en `x`, où `y` est la valeur de la fonction en `x`.
///
/// La pente vient des deux échantillons qui encadrent strictement `x` ;
/// `None` si `x` est au bord du domaine échantillonné (ou au-delà).
pub fn tangente(echantillons: &FonctionEchantillonnee, x: f64, y: f64) -> Option<Tangente> {
    let prec = echantillons.inferieur(x)?;
    let suiv = echantillons.superieur(x)?;

    let pente = arrondi((suiv.y - prec.y) / (suiv.x - prec.x), 2);
    let ordonnee = arrondi(y - pente * x, 2);

    Some(Tangente { pente, ordonnee })
}
