// src/noyau/echantillon.rs
//
// Fonction échantillonnée : table x -> y triée par x croissant, clés uniques,
// valeurs finies seulement. Immuable une fois construite.

use tracing::debug;

use super::erreur::ErreurEval;
use super::eval::{evaluer_en, ModeLecture};
use super::format::arrondi;
use super::point::Point;

/// Pas plancher : en dessous d’une échelle de 5, `round(echelle/10)` vaut 0.
const PAS_MIN: f64 = 0.001;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FonctionEchantillonnee {
    // Invariant : x strictement croissants, x et y finis.
    points: Vec<(f64, f64)>,
}

impl FonctionEchantillonnee {
    /// Construit depuis des paires déjà triées ; les y non finis sont écartés.
    ///
    /// Une paire dont le x ne dépasse pas strictement le précédent est ignorée.
    pub fn depuis_paires(paires: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut points: Vec<(f64, f64)> = Vec::new();
        for (x, y) in paires {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            if points.last().is_some_and(|&(px, _)| x <= px) {
                continue;
            }
            points.push((x, y));
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|&(x, y)| Point::new(x, y))
    }

    /// Vue brute (x, y) ; utile pour les fenêtres glissantes.
    pub fn paires(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Valeur exactement à la clé `x`.
    pub fn get(&self, x: f64) -> Option<f64> {
        let i = self.points.partition_point(|&(px, _)| px < x);
        self.points
            .get(i)
            .filter(|&&(px, _)| px == x)
            .map(|&(_, y)| y)
    }

    /// Échantillon le plus proche strictement en dessous de `x`.
    pub fn inferieur(&self, x: f64) -> Option<Point> {
        let i = self.points.partition_point(|&(px, _)| px < x);
        i.checked_sub(1)
            .map(|j| Point::new(self.points[j].0, self.points[j].1))
    }

    /// Échantillon le plus proche strictement au-dessus de `x`.
    pub fn superieur(&self, x: f64) -> Option<Point> {
        let i = self.points.partition_point(|&(px, _)| px <= x);
        self.points.get(i).map(|&(px, py)| Point::new(px, py))
    }

    pub fn premier(&self) -> Option<Point> {
        self.points.first().map(|&(x, y)| Point::new(x, y))
    }

    pub fn dernier(&self) -> Option<Point> {
        self.points.last().map(|&(x, y)| Point::new(x, y))
    }
}

/// Pas d’échantillonnage : `round(echelle/10)/1000`, borné à 0.001.
pub fn pas_pour(echelle_x: f64) -> f64 {
    ((echelle_x / 10.0).round() / 1000.0).max(PAS_MIN)
}

/// Échantillonne `expr` sur `[-echelle_x, echelle_x)`.
///
/// Chaque x est arrondi à 3 décimales puis substitué ; les valeurs non finies
/// (asymptotes, hors domaine) sont omises. Rien n’est mis en cache.
pub fn echantillonner(
    expr: &str,
    echelle_x: f64,
    mode: ModeLecture,
) -> Result<FonctionEchantillonnee, ErreurEval> {
    if !echelle_x.is_finite() || echelle_x <= 0.0 {
        return Ok(FonctionEchantillonnee::default());
    }

    let pas = pas_pour(echelle_x);
    let nb = (2.0 * echelle_x / pas).ceil() as usize;

    let mut paires = Vec::with_capacity(nb);
    for k in 0..nb {
        // indexé (pas d’accumulation de flottants)
        let x = arrondi(-echelle_x + k as f64 * pas, 3);
        if x >= echelle_x {
            break;
        }
        paires.push((x, evaluer_en(expr, x, mode)?));
    }

    let f = FonctionEchantillonnee::depuis_paires(paires);
    debug!(
        expr,
        echelle_x,
        pas,
        echantillons = f.len(),
        "fonction échantillonnée"
    );
    Ok(f)
}
