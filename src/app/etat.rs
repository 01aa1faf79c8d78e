//! src/app/etat.rs
//!
//! État UI du traceur (sans dessin).
//!
//! Rôle : garder les champs saisis, le graphe courant et les messages, et offrir
//! les actions (tracer, marquer, retirer, tangente, tableau) appelées par la vue.
//!
//! Contrats :
//! - Les champs numériques sont lus avec tolérance (défaut + `warn!`), jamais d’erreur.
//! - Une erreur d’évaluation ne détruit pas le graphe déjà affiché.
//! - Chaque tracé réussi est mémorisé dans les réglages (si un chemin existe).

use std::path::PathBuf;

use tracing::{info, warn};
use traceur::noyau::{Gestionnaire, Graphe, Plage, Point};
use traceur::reglages::{
    lire_borne, lire_decimal, lire_echelle, lire_pas, PlageTableau, Reglages, ORDRE_DERIVEES_MAX,
};

/// Champs texte de la vue (la lecture numérique se fait à l’action).
#[derive(Clone, Debug, Default)]
pub struct Saisie {
    pub expression: String,
    pub echelle_x: String,
    pub echelle_y: String,
    pub ordre_derivees: String,
    pub abscisse: String,
    pub debut: String,
    pub fin: String,
    pub pas: String,
}

impl Saisie {
    fn depuis_reglages(r: &Reglages) -> Self {
        Self {
            expression: r.expression.clone(),
            echelle_x: r.echelle_x.to_string(),
            echelle_y: r.echelle_y.to_string(),
            ordre_derivees: r.ordre_derivees.to_string(),
            abscisse: String::new(),
            debut: r.tableau.debut.to_string(),
            fin: r.tableau.fin.to_string(),
            pas: r.tableau.pas.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct AppGraphe {
    pub saisie: Saisie,
    pub reglages: Reglages,
    chemin_reglages: Option<PathBuf>,

    pub graphe: Option<Graphe>,
    pub tableau: Vec<Point>,

    pub erreur: String,
    pub message: String,

    // Permet à vue.rs de redonner le focus à l’expression.
    pub focus_entree: bool,
}

impl Default for AppGraphe {
    fn default() -> Self {
        Self::new(Reglages::default(), None)
    }
}

impl AppGraphe {
    /// Reprend la session ; une expression mémorisée est retracée tout de suite.
    pub fn new(reglages: Reglages, chemin_reglages: Option<PathBuf>) -> Self {
        let mut app = Self {
            saisie: Saisie::depuis_reglages(&reglages),
            reglages,
            chemin_reglages,
            graphe: None,
            tableau: Vec::new(),
            erreur: String::new(),
            message: String::new(),
            focus_entree: true,
        };
        if !app.saisie.expression.trim().is_empty() {
            app.tracer();
        }
        app
    }

    /* ------------------------ Messages ------------------------ */

    fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.message.clear();
    }

    fn set_message(&mut self, msg: impl Into<String>) {
        self.erreur.clear();
        self.message = msg.into();
    }

    /// Échap : efface l’expression saisie (le graphe reste).
    pub fn effacer_entree(&mut self) {
        self.saisie.expression.clear();
        self.focus_entree = true;
    }

    /* ------------------------ Tracé ------------------------ */

    /// Lit les champs, construit le graphe, recalcule le tableau.
    pub fn tracer(&mut self) {
        let expression = self.saisie.expression.trim().to_string();
        if expression.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        self.reglages.expression = expression.clone();
        self.reglages.echelle_x = lire_echelle(&self.saisie.echelle_x);
        self.reglages.echelle_y = lire_echelle(&self.saisie.echelle_y);
        self.reglages.ordre_derivees = self.lire_ordre();
        self.reglages.tableau = self.lire_plage();
        self.resynchroniser_champs();

        let gestionnaire = Gestionnaire::new(&expression, f64::from(self.reglages.echelle_x))
            .avec_mode(self.reglages.mode())
            .avec_classement(self.reglages.classement);

        match Graphe::construire(
            gestionnaire,
            f64::from(self.reglages.echelle_y),
            self.reglages.ordre_derivees,
        ) {
            Ok(g) => {
                // les calques choisis survivent au retracé
                let calques = self.graphe.as_ref().map(|a| a.calques).unwrap_or_default();
                self.graphe = Some(g);
                if let Some(g) = self.graphe.as_mut() {
                    g.calques = calques;
                }
                self.set_message(format!("f(x) = {}", expression));
                self.calculer_tableau();
                self.sauver_reglages();
            }
            Err(e) => {
                warn!(expression = %expression, erreur = %e, "tracé impossible");
                self.set_erreur(e.to_string());
            }
        }
    }

    fn lire_ordre(&self) -> usize {
        match self.saisie.ordre_derivees.trim().parse::<usize>() {
            Ok(n) => n.min(ORDRE_DERIVEES_MAX),
            Err(_) => {
                warn!(saisie = %self.saisie.ordre_derivees, "ordre des dérivées invalide");
                self.reglages.ordre_derivees
            }
        }
    }

    fn lire_plage(&self) -> PlageTableau {
        let defaut = PlageTableau::default();
        PlageTableau {
            debut: lire_borne(&self.saisie.debut, defaut.debut),
            fin: lire_borne(&self.saisie.fin, defaut.fin),
            pas: lire_pas(&self.saisie.pas),
        }
    }

    /// Réaffiche les valeurs réellement retenues (défauts compris).
    fn resynchroniser_champs(&mut self) {
        let abscisse = std::mem::take(&mut self.saisie.abscisse);
        self.saisie = Saisie {
            abscisse,
            ..Saisie::depuis_reglages(&self.reglages)
        };
    }

    fn sauver_reglages(&self) {
        let Some(chemin) = self.chemin_reglages.as_deref() else {
            return;
        };
        match self.reglages.sauver(chemin) {
            Ok(()) => info!(chemin = %chemin.display(), "réglages sauvés"),
            Err(e) => warn!(chemin = %chemin.display(), erreur = %e, "réglages non sauvés"),
        }
    }

    /* ------------------------ Tableau de valeurs ------------------------ */

    pub fn calculer_tableau(&mut self) {
        self.reglages.tableau = self.lire_plage();
        let Some(g) = self.graphe.as_ref() else {
            self.tableau.clear();
            return;
        };
        match g.gestionnaire().tableau_valeurs(Plage::from(self.reglages.tableau)) {
            Ok(lignes) => self.tableau = lignes,
            Err(e) => {
                self.tableau.clear();
                self.set_erreur(e.to_string());
            }
        }
    }

    /* ------------------------ Actions sur x ------------------------ */

    fn lire_abscisse(&mut self) -> Option<f64> {
        let x = lire_decimal(&self.saisie.abscisse);
        if x.is_none() {
            self.set_erreur(format!("abscisse invalide: {:?}", self.saisie.abscisse.trim()));
        }
        x
    }

    /// Marque (x, f(x)) pour l’abscisse saisie.
    pub fn marquer_saisie(&mut self) {
        if let Some(x) = self.lire_abscisse() {
            self.marquer(x);
        }
    }

    /// Marque (x, f(x)) ; un f(x) indéfini n’ajoute rien.
    pub fn marquer(&mut self, x: f64) {
        let Some(g) = self.graphe.as_mut() else {
            self.set_erreur("Aucun graphe");
            return;
        };
        match g.marquer(x) {
            Ok(true) => {
                let msg = g
                    .marques()
                    .iter()
                    .last()
                    .map(|p| format!("point marqué {p}"))
                    .unwrap_or_default();
                self.set_message(msg);
            }
            Ok(false) => self.set_message(format!("f({x}) indéfini : aucun point")),
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    pub fn retirer_point(&mut self) {
        let retire = self.graphe.as_mut().and_then(Graphe::retirer_dernier_point);
        match retire {
            Some(p) => self.set_message(format!("point retiré {p}")),
            None => self.set_message("aucun point à retirer"),
        }
    }

    /// Tangente à l’abscisse saisie ; au bord du domaine, rien n’est posé.
    pub fn tangente_saisie(&mut self) {
        let Some(x) = self.lire_abscisse() else {
            return;
        };
        let Some(g) = self.graphe.as_mut() else {
            self.set_erreur("Aucun graphe");
            return;
        };
        match g.poser_tangente(x) {
            Ok(Some(t)) => self.set_message(format!("t(x) = {t}")),
            Ok(None) => self.set_message(format!("pas de tangente en x = {x}")),
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    pub fn effacer_tangente(&mut self) {
        if let Some(g) = self.graphe.as_mut() {
            g.effacer_tangente();
        }
    }

    pub fn basculer_derivee(&mut self, indice: usize) {
        if let Some(g) = self.graphe.as_mut() {
            g.basculer_derivee(indice);
        }
    }

    /// Point sous le curseur (rien si indéfini ou pas de graphe).
    pub fn sonde(&self, x: f64) -> Option<Point> {
        self.graphe
            .as_ref()
            .and_then(|g| g.sonde(x).ok())
            .filter(|p| p.y.is_finite())
    }
}
