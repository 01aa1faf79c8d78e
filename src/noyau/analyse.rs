//! Noyau — points remarquables d’une fonction échantillonnée.
//!
//! - racines    : changement de signe entre deux échantillons consécutifs
//! - extremums  : les deux voisins strictement plus bas (max) ou plus hauts (min)
//! - inflexion / selle : extremums de f', départagés par une valeur arrondie à 3 décimales
//!
//! Tous les résultats sont triés par x croissant.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::derivee::deriver;
use super::echantillon::FonctionEchantillonnee;
use super::erreur::ErreurEval;
use super::eval::{evaluer_en, ModeLecture};
use super::format::arrondi;
use super::point::Point;

/// Valeur lue au candidat pour séparer point d’inflexion et point selle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classement {
    /// f'(x) : pente nulle à l’inflexion => selle.
    #[default]
    Pente,
    /// f''(x).
    Courbure,
}

/// Partition exhaustive des candidats.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointsCritiques {
    pub inflexion: Vec<Point>,
    pub selle: Vec<Point>,
}

/// Racines : pour chaque paire consécutive dont le signe ne reste pas strictement
/// positif ou strictement négatif, on retient l’échantillon SUIVANT.
/// Un échantillon déjà retenu n’est pas retraité (pas de doublon sur un zéro exact).
pub fn racines(f: &FonctionEchantillonnee) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();

    for w in f.paires().windows(2) {
        let (x, y) = w[0];
        let (x_suiv, y_suiv) = w[1];

        if out.last().is_some_and(|r| r.x == x) {
            continue;
        }
        if (y > 0.0 && y_suiv > 0.0) || (y < 0.0 && y_suiv < 0.0) {
            continue;
        }

        out.push(Point::new(x_suiv, y_suiv));
    }

    out
}

/// Extremums locaux stricts (les bords, sans deux voisins, sont exclus).
pub fn extremums(f: &FonctionEchantillonnee) -> Vec<Point> {
    f.paires()
        .windows(3)
        .filter_map(|w| {
            let (_, y_prec) = w[0];
            let (x, y) = w[1];
            let (_, y_suiv) = w[2];

            let max = y_prec < y && y_suiv < y;
            let min = y_prec > y && y_suiv > y;
            (max || min).then_some(Point::new(x, y))
        })
        .collect()
}

/// Candidats : extremums de la dérivée première, y relu sur l’expression d’origine.
pub fn candidats(
    expr: &str,
    derivee: &FonctionEchantillonnee,
    mode: ModeLecture,
) -> Result<Vec<Point>, ErreurEval> {
    extremums(derivee)
        .into_iter()
        .map(|c| Ok(Point::new(c.x, evaluer_en(expr, c.x, mode)?)))
        .collect()
}

/// Sépare les candidats en points d’inflexion (valeur ≠ 0) et points selle (valeur = 0).
///
/// `f` est la fonction échantillonnée de `expr`.
pub fn classer(
    expr: &str,
    f: &FonctionEchantillonnee,
    mode: ModeLecture,
    classement: Classement,
) -> Result<PointsCritiques, ErreurEval> {
    let premiere = deriver(f);
    let reference = match classement {
        Classement::Pente => premiere.clone(),
        Classement::Courbure => deriver(&premiere),
    };

    let mut out = PointsCritiques::default();
    for c in candidats(expr, &premiere, mode)? {
        match reference.get(c.x) {
            Some(v) if arrondi(v, 3) == 0.0 => out.selle.push(c),
            Some(_) => out.inflexion.push(c),
            None => {
                // f'' a écarté une pente non finie en x : valeur inconnue, donc non nulle
                debug!(x = c.x, "candidat sans valeur de référence, compté en inflexion");
                out.inflexion.push(c);
            }
        }
    }

    Ok(out)
}
