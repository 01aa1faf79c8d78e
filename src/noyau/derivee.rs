// src/noyau/derivee.rs
//
// Dérivée approchée par différences centrées sur les deux voisins.
// Approximation bornée par le pas : chaque application perd un échantillon
// à chaque bord et cumule l’erreur de discrétisation.

use tracing::debug;

use super::echantillon::FonctionEchantillonnee;

/// Une dérivée + son état d’affichage.
#[derive(Clone, Debug, PartialEq)]
pub struct Derivee {
    pub valeurs: FonctionEchantillonnee,
    pub visible: bool,
}

/// Pente `(y_suiv − y_prec)/(x_suiv − x_prec)` en chaque échantillon intérieur.
///
/// Les deux bords (sans voisin) et les pentes non finies sont écartés.
pub fn deriver(f: &FonctionEchantillonnee) -> FonctionEchantillonnee {
    FonctionEchantillonnee::depuis_paires(f.paires().windows(3).map(|w| {
        let (x_prec, y_prec) = w[0];
        let (x, _) = w[1];
        let (x_suiv, y_suiv) = w[2];
        (x, (y_suiv - y_prec) / (x_suiv - x_prec))
    }))
}

/// Dérivées d’ordre 1..=ordre, chacune tirée de la précédente (toutes masquées).
pub fn derivees(base: &FonctionEchantillonnee, ordre: usize) -> Vec<Derivee> {
    let mut out: Vec<Derivee> = Vec::with_capacity(ordre);
    let mut courante = base.clone();

    for n in 1..=ordre {
        courante = deriver(&courante);
        debug!(ordre = n, echantillons = courante.len(), "dérivée calculée");
        out.push(Derivee {
            valeurs: courante.clone(),
            visible: false,
        });
    }

    out
}
