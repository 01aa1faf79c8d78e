//! Tests scientifiques (campagne) : propriétés observables du noyau, de bout en bout.
//!
//! But : vérifier ce que la vue consomme (valeurs, racines, tangentes, points critiques)
//! sans dépendre des détails internes.
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Tout est discret : pas de 0.001 pour une échelle de 10, donc les tolérances
//!   sont de l’ordre du pas (racines) ou de 1e-3 (valeurs relues).
//! - Les racines sont retenues sur l’échantillon SUIVANT le changement de signe :
//!   une racine “vraie” en r peut être rapportée en r + pas.
//! - Échelle < 5 : le pas est ramené au plancher 0.001 (sinon boucle infinie).

use approx::assert_abs_diff_eq;

use super::analyse::Classement;
use super::derivee::{deriver, derivees};
use super::echantillon::{echantillonner, pas_pour};
use super::eval::{evaluer, evaluer_en, ModeLecture};
use super::gestionnaire::Gestionnaire;
use super::graphe::Graphe;
use super::racines;

fn gestionnaire(expr: &str) -> Gestionnaire {
    Gestionnaire::new(expr, 10.0)
}

fn ok(expr: &str) -> f64 {
    evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/* ------------------------ Évaluateur ------------------------ */

#[test]
fn sci_valeurs_de_reference() {
    assert_eq!(ok("2+3*4"), 14.0);
    assert_eq!(ok("(2+3)*4"), 20.0);
    assert_eq!(ok("2(3)"), 6.0);
    assert_eq!(ok("sqrt(9)"), 3.0);
    assert_eq!(ok("sin(0)"), 0.0);
}

#[test]
fn sci_identites_numeriques() {
    // sin² + cos² = 1 (parenthèses obligatoires : sin(x)^2 se lit sin(x^2))
    for x in [-3.0, -0.5, 0.0, 1.25, 2.0] {
        let v = evaluer_en("(sin(x))^2+(cos(x))^2", x, ModeLecture::Tolerant).expect("eval");
        assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
    }
    // ln(e^x) = x
    let v = evaluer_en("ln(e^x)", 1.5, ModeLecture::Tolerant).expect("eval");
    assert_abs_diff_eq!(v, 1.5, epsilon = 1e-12);
    // log(10^x) = x
    let v = evaluer_en("log(10^x)", -2.0, ModeLecture::Tolerant).expect("eval");
    assert_abs_diff_eq!(v, -2.0, epsilon = 1e-12);
}

/* ------------------------ Échantillonnage ------------------------ */

#[test]
fn sci_idempotence() {
    let a = gestionnaire("x^3-2x+1").valeurs_echantillonnees().expect("a");
    let b = gestionnaire("x^3-2x+1").valeurs_echantillonnees().expect("b");
    assert_eq!(a, b);
}

#[test]
fn sci_aller_retour_echantillon_evaluation() {
    let g = gestionnaire("x^2-3x+sin(x)");
    let f = g.valeurs_echantillonnees().expect("échantillons");

    for p in f.iter().step_by(997) {
        let direct = g.valeur_en(p.x).expect("eval");
        assert_abs_diff_eq!(p.y, direct, epsilon = 1e-3);
    }
}

#[test]
fn sci_resolution_constante() {
    // ~ 2 * échelle / pas échantillons, quel que soit l’ordre de grandeur
    for echelle in [10.0, 100.0, 1000.0] {
        let f = echantillonner("x", echelle, ModeLecture::Tolerant).expect("x");
        let attendu = (2.0 * echelle / pas_pour(echelle)).round() as usize;
        assert!(f.len().abs_diff(attendu) <= 1, "échelle={echelle} len={}", f.len());
    }
}

#[test]
fn sci_petite_echelle_termine() {
    let f = echantillonner("x", 2.0, ModeLecture::Tolerant).expect("x");
    assert_eq!(f.len(), 4000);
}

/* ------------------------ Dérivées ------------------------ */

#[test]
fn sci_derivee_x_carre_en_3() {
    let f = gestionnaire("x^2").valeurs_echantillonnees().expect("x^2");
    let d = deriver(&f);
    let pente = d.get(3.0).expect("x=3");
    assert_abs_diff_eq!(pente, 6.0, epsilon = 1e-3);
}

#[test]
fn sci_derivees_de_sinus() {
    let f = gestionnaire("sin(x)").valeurs_echantillonnees().expect("sin");
    let liste = derivees(&f, 3);

    // sin' = cos, sin'' = -sin, sin''' = -cos
    let x = 1.0;
    assert_abs_diff_eq!(liste[0].valeurs.get(x).expect("f'"), x.cos(), epsilon = 1e-3);
    assert_abs_diff_eq!(liste[1].valeurs.get(x).expect("f''"), -x.sin(), epsilon = 1e-3);
    assert_abs_diff_eq!(liste[2].valeurs.get(x).expect("f'''"), -x.cos(), epsilon = 1e-2);
}

#[test]
fn sci_asymptote_filtree() {
    // 1/x : rien en 0, et la dérivée ne garde que des pentes finies
    let f = gestionnaire("1/x").valeurs_echantillonnees().expect("1/x");
    assert!(f.get(0.0).is_none());
    assert!(deriver(&f).iter().all(|p| p.y.is_finite()));
}

/* ------------------------ Points remarquables ------------------------ */

#[test]
fn sci_racines_x_carre_moins_4() {
    let r = racines(&gestionnaire("x^2-4").valeurs_echantillonnees().expect("f"));
    let xs: Vec<f64> = r.iter().map(|p| p.x).collect();
    assert_eq!(xs.len(), 2, "racines={xs:?}");
    assert_abs_diff_eq!(xs[0], -2.0, epsilon = 2e-3);
    assert_abs_diff_eq!(xs[1], 2.0, epsilon = 2e-3);
}

#[test]
fn sci_racines_du_sinus() {
    // sin s’annule en kπ : -3π..3π dans [-10, 10)
    let r = racines(&gestionnaire("sin(x)").valeurs_echantillonnees().expect("f"));
    assert_eq!(r.len(), 7);
    for (p, k) in r.iter().zip(-3..=3) {
        assert_abs_diff_eq!(p.x, f64::from(k) * std::f64::consts::PI, epsilon = 2e-3);
    }
}

#[test]
fn sci_selle_et_inflexion() {
    let selle = gestionnaire("x^3").points_selle().expect("x^3");
    assert_eq!(selle.len(), 1);
    assert_abs_diff_eq!(selle[0].x, 0.0, epsilon = 2e-3);

    let inflexion = gestionnaire("x^3-3x").points_inflexion().expect("x^3-3x");
    assert_eq!(inflexion.len(), 1);
    assert_abs_diff_eq!(inflexion[0].x, 0.0, epsilon = 2e-3);
}

#[test]
fn sci_classement_courbure() {
    // à un extremum de f', f'' ≈ 0 : en lecture “courbure”, l’inflexion de x^3-3x devient selle
    let g = gestionnaire("x^3-3x").avec_classement(Classement::Courbure);
    assert!(g.points_inflexion().expect("eval").is_empty());
    assert_eq!(g.points_selle().expect("eval").len(), 1);
}

/* ------------------------ Tangente ------------------------ */

#[test]
fn sci_tangentes() {
    let g = gestionnaire("x^2");
    let t = g.tangente_en(2.0).expect("eval").expect("intérieur");
    assert_eq!(t.to_string(), "4x - 4");

    let t = g.tangente_en(-1.0).expect("eval").expect("intérieur");
    assert_eq!(t.to_string(), "-2x - 1");

    let t = gestionnaire("x^2+1").tangente_en(0.0).expect("eval").expect("intérieur");
    assert_eq!(t.to_string(), "0x + 1");
}

#[test]
fn sci_tangente_aux_bords() {
    let g = gestionnaire("x^2");
    assert!(g.tangente_en(-10.0).expect("eval").is_none());
    assert!(g.tangente_en(10.0).expect("eval").is_none());
    assert!(g.tangente_en(-10.5).expect("eval").is_none());
}

/* ------------------------ Graphe complet ------------------------ */

#[test]
fn sci_graphe_cubique() {
    let g = Graphe::construire(gestionnaire("x^3-3x"), 10.0, 3).expect("graphe");
    // racines : -√3, 0, √3
    assert_eq!(g.racines().len(), 3);
    // extremums : -1 (max), 1 (min)
    let ext: Vec<f64> = g.extremums().iter().map(|p| p.x).collect();
    assert_eq!(ext.len(), 2);
    assert_abs_diff_eq!(ext[0], -1.0, epsilon = 2e-3);
    assert_abs_diff_eq!(ext[1], 1.0, epsilon = 2e-3);
    assert_eq!(g.points_inflexion().len(), 1);
    assert!(g.points_selle().is_empty());
}
