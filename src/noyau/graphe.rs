// src/noyau/graphe.rs
//
// Modèle d’un tracé : fonction échantillonnée + dérivées + points remarquables,
// calculés UNE fois à la construction (chaque action utilisateur reconstruit).
// Bascules d’affichage, points marqués et tangente courante vivent ici aussi.

use tracing::info;

use super::analyse::{extremums, racines, PointsCritiques};
use super::derivee::{derivees, Derivee};
use super::echantillon::FonctionEchantillonnee;
use super::erreur::ErreurEval;
use super::gestionnaire::Gestionnaire;
use super::point::{Point, PointsMarques};
use super::tangente::Tangente;

/// Calques optionnels du tracé.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Calques {
    pub racines: bool,
    pub extremums: bool,
    pub inflexion: bool,
    pub selle: bool,
}

#[derive(Clone, Debug)]
pub struct Graphe {
    gestionnaire: Gestionnaire,
    echelle_y: f64,

    fonction: FonctionEchantillonnee,
    derivees: Vec<Derivee>,
    racines: Vec<Point>,
    extremums: Vec<Point>,
    critiques: PointsCritiques,

    pub calques: Calques,
    marques: PointsMarques,
    tangente: Option<Tangente>,
}

impl Graphe {
    /// Échantillonne, dérive `ordre_derivees` fois et détecte les points remarquables.
    pub fn construire(
        gestionnaire: Gestionnaire,
        echelle_y: f64,
        ordre_derivees: usize,
    ) -> Result<Self, ErreurEval> {
        let fonction = gestionnaire.valeurs_echantillonnees()?;
        let derivees = derivees(&fonction, ordre_derivees);
        let racines = racines(&fonction);
        let extremums = extremums(&fonction);
        let critiques = gestionnaire.points_critiques()?;

        info!(
            expression = gestionnaire.expression(),
            echelle_x = gestionnaire.echelle_x(),
            echelle_y,
            echantillons = fonction.len(),
            racines = racines.len(),
            extremums = extremums.len(),
            "graphe construit"
        );

        Ok(Self {
            gestionnaire,
            echelle_y,
            fonction,
            derivees,
            racines,
            extremums,
            critiques,
            calques: Calques::default(),
            marques: PointsMarques::default(),
            tangente: None,
        })
    }

    pub fn gestionnaire(&self) -> &Gestionnaire {
        &self.gestionnaire
    }

    pub fn echelle_x(&self) -> f64 {
        self.gestionnaire.echelle_x()
    }

    pub fn echelle_y(&self) -> f64 {
        self.echelle_y
    }

    pub fn fonction(&self) -> &FonctionEchantillonnee {
        &self.fonction
    }

    pub fn derivees(&self) -> &[Derivee] {
        &self.derivees
    }

    /// Inverse la visibilité de la dérivée d’ordre `indice + 1`.
    pub fn basculer_derivee(&mut self, indice: usize) {
        if let Some(d) = self.derivees.get_mut(indice) {
            d.visible = !d.visible;
        }
    }

    pub fn racines(&self) -> &[Point] {
        &self.racines
    }

    pub fn extremums(&self) -> &[Point] {
        &self.extremums
    }

    pub fn points_inflexion(&self) -> &[Point] {
        &self.critiques.inflexion
    }

    pub fn points_selle(&self) -> &[Point] {
        &self.critiques.selle
    }

    pub fn marques(&self) -> &PointsMarques {
        &self.marques
    }

    /// Marque (x, f(x)) ; renvoie `false` si f(x) est NaN (rien n’est ajouté).
    pub fn marquer(&mut self, x: f64) -> Result<bool, ErreurEval> {
        let Some(p) = self.gestionnaire.point_en(x)? else {
            return Ok(false);
        };
        self.marques.ajouter(p);
        Ok(true)
    }

    pub fn retirer_dernier_point(&mut self) -> Option<Point> {
        self.marques.retirer_dernier()
    }

    /// Point sous le curseur (non mémorisé).
    pub fn sonde(&self, x: f64) -> Result<Point, ErreurEval> {
        Ok(Point::new(x, self.gestionnaire.valeur_en(x)?))
    }

    pub fn tangente(&self) -> Option<&Tangente> {
        self.tangente.as_ref()
    }

    /// Pose la tangente en `x` ; au bord du domaine, la tangente courante est effacée.
    pub fn poser_tangente(&mut self, x: f64) -> Result<Option<Tangente>, ErreurEval> {
        self.tangente = self.gestionnaire.tangente_en(x)?;
        Ok(self.tangente)
    }

    pub fn effacer_tangente(&mut self) {
        self.tangente = None;
    }
}
