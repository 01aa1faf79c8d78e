//! Noyau — gestionnaire d’une fonction (façade pour la couche présentation).
//!
//! Rôle :
//! - garder l’expression (virgules normalisées) + l’échelle de l’axe x
//! - exposer valeurs échantillonnées, valeur ponctuelle, tangente, points critiques
//!
//! Contrats :
//! - Aucun cache : chaque appel ré-échantillonne (fonction pure des entrées).
//! - Aucune mutation après construction : nouvelle expression/échelle => nouveau gestionnaire.

use tracing::{debug, warn};

use super::analyse::{classer, Classement, PointsCritiques};
use super::echantillon::{echantillonner, FonctionEchantillonnee};
use super::erreur::ErreurEval;
use super::eval::{evaluer_en, ModeLecture};
use super::point::Point;
use super::pretraitement::normaliser_decimales;
use super::tangente::{tangente, Tangente};

/// Garde-fou : nombre maximal de lignes du tableau (calcul synchrone côté UI).
pub const LIGNES_MAX: usize = 10_000;

/// Pas de repli quand la plage demandée dépasse `LIGNES_MAX`.
const PAS_DEFAUT: f64 = 1.0;

/// Plage du tableau de valeurs : `debut..=fin` par pas de `pas`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plage {
    pub debut: f64,
    pub fin: f64,
    pub pas: f64,
}

#[derive(Clone, Debug)]
pub struct Gestionnaire {
    expression: String,
    echelle_x: f64,
    mode: ModeLecture,
    classement: Classement,
}

impl Gestionnaire {
    pub fn new(texte: &str, echelle_x: f64) -> Self {
        Self {
            expression: normaliser_decimales(texte.trim()),
            echelle_x,
            mode: ModeLecture::default(),
            classement: Classement::default(),
        }
    }

    pub fn avec_mode(mut self, mode: ModeLecture) -> Self {
        self.mode = mode;
        self
    }

    pub fn avec_classement(mut self, classement: Classement) -> Self {
        self.classement = classement;
        self
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn echelle_x(&self) -> f64 {
        self.echelle_x
    }

    pub fn mode(&self) -> ModeLecture {
        self.mode
    }

    pub fn valeurs_echantillonnees(&self) -> Result<FonctionEchantillonnee, ErreurEval> {
        echantillonner(&self.expression, self.echelle_x, self.mode)
    }

    pub fn valeur_en(&self, x: f64) -> Result<f64, ErreurEval> {
        evaluer_en(&self.expression, x, self.mode)
    }

    /// Point (x, f(x)) à marquer ; `None` si f(x) est NaN.
    pub fn point_en(&self, x: f64) -> Result<Option<Point>, ErreurEval> {
        let y = self.valeur_en(x)?;
        Ok((!y.is_nan()).then_some(Point::new(x, y)))
    }

    pub fn tangente_en(&self, x: f64) -> Result<Option<Tangente>, ErreurEval> {
        let echantillons = self.valeurs_echantillonnees()?;
        if echantillons.inferieur(x).is_none() || echantillons.superieur(x).is_none() {
            return Ok(None);
        }
        let y = self.valeur_en(x)?;
        Ok(tangente(&echantillons, x, y))
    }

    pub fn points_critiques(&self) -> Result<PointsCritiques, ErreurEval> {
        let f = self.valeurs_echantillonnees()?;
        let p = classer(&self.expression, &f, self.mode, self.classement)?;
        debug!(
            inflexion = p.inflexion.len(),
            selle = p.selle.len(),
            "points critiques"
        );
        Ok(p)
    }

    pub fn points_inflexion(&self) -> Result<Vec<Point>, ErreurEval> {
        Ok(self.points_critiques()?.inflexion)
    }

    pub fn points_selle(&self) -> Result<Vec<Point>, ErreurEval> {
        Ok(self.points_critiques()?.selle)
    }

    /// Lignes du tableau de valeurs ; les valeurs non finies sont gardées
    /// (le tableau les affiche "indéfini").
    ///
    /// Au plus `LIGNES_MAX + 1` lignes : un pas trop fin est remplacé par le pas
    /// par défaut, et une plage encore trop large est tronquée.
    pub fn tableau_valeurs(&self, plage: Plage) -> Result<Vec<Point>, ErreurEval> {
        let mut pas = if plage.pas.is_finite() && plage.pas > 0.0 {
            plage.pas
        } else {
            PAS_DEFAUT
        };
        if !plage.debut.is_finite() || !plage.fin.is_finite() || plage.fin < plage.debut {
            return Ok(Vec::new());
        }

        // tolérance : 0.1 + 0.1 + … doit atteindre `fin`
        let lignes = |pas: f64| ((plage.fin - plage.debut) / pas + 1e-9).floor();

        if pas != PAS_DEFAUT && lignes(pas) > LIGNES_MAX as f64 {
            warn!(pas, max = LIGNES_MAX, "pas trop fin pour le tableau, pas par défaut");
            pas = PAS_DEFAUT;
        }
        let mut nb = lignes(pas);
        if nb > LIGNES_MAX as f64 {
            warn!(
                debut = plage.debut,
                fin = plage.fin,
                max = LIGNES_MAX,
                "plage trop large pour le tableau, tronquée"
            );
            nb = LIGNES_MAX as f64;
        }

        (0..=nb as usize)
            .map(|k| {
                let x = plage.debut + k as f64 * pas;
                Ok(Point::new(x, self.valeur_en(x)?))
            })
            .collect()
    }
}
