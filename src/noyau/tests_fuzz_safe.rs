//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le lecteur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global (large : les tests tournent aussi en debug)
//! - erreurs acceptées : seulement celles que la grammaire prévoit
//! - invariant clé : si le mode strict réussit, le mode tolérant donne la même valeur

use std::time::{Duration, Instant};

use super::echantillon::echantillonner;
use super::erreur::ErreurEval;
use super::eval::{evaluer, evaluer_strict, ModeLecture};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(10);
    if rng.coin() {
        format!("{entier}")
    } else {
        format!("{entier}.{}", rng.pick(100))
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(5) {
        0 | 1 => gen_nombre(rng),
        2 => "π".to_string(),
        3 => "e".to_string(),
        _ => format!("({})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(10) {
        0 => gen_atome(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("{a}*{}", gen_expr(rng, depth - 1)),
        4 => format!("{a}/{}", gen_expr(rng, depth - 1)),
        5 => format!("({a})^{}", gen_atome(rng)),
        6 => format!("-{a}"),
        7 => {
            let f = ["sqrt", "ln", "log", "sin", "cos", "tan"][rng.pick(6) as usize];
            format!("{f}({a})")
        }
        // multiplication implicite
        8 => format!("{}({a})", gen_nombre(rng)),
        _ => format!("({a})({})", gen_expr(rng, depth - 1)),
    }
}

/// Bruit : caractère parasite inséré n’importe où.
fn gen_bruit(rng: &mut Rng, expr: &str) -> String {
    let parasites = ['(', ')', '+', '*', '^', ' ', '.', '?', 'z'];
    let c = parasites[rng.pick(parasites.len() as u32) as usize];
    let chars: Vec<char> = expr.chars().collect();
    let i = rng.pick(chars.len() as u32 + 1) as usize;
    let mut out: String = chars[..i].iter().collect();
    out.push(c);
    out.extend(&chars[i..]);
    out
}

fn is_erreur_attendue(e: &ErreurEval) -> bool {
    // Liste blanche : erreurs qu’un bruit aléatoire peut légitimement provoquer.
    matches!(
        e,
        ErreurEval::FonctionInconnue { .. }
            | ErreurEval::NombreInvalide { .. }
            | ErreurEval::EntreeResiduelle { .. }
            | ErreurEval::OperandeManquant { .. }
    )
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        // bien formée => le mode strict lit tout
        let strict = evaluer_strict(&expr)
            .unwrap_or_else(|e| panic!("strict: expr={expr:?} err={e}"));
        let tolerant = evaluer(&expr).unwrap_or_else(|e| panic!("tolérant: expr={expr:?} err={e}"));

        // NaN != NaN : on compare les bits
        assert_eq!(strict.to_bits(), tolerant.to_bits(), "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);

        let va = evaluer(&ea).map(f64::to_bits);
        let vb = evaluer(&eb).map(f64::to_bits);
        assert_eq!(va, vb, "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let expr = gen_bruit(&mut rng, &base);

        // tolérant : seules des erreurs “de lecture” fatales
        match evaluer(&expr) {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }

        if let Err(e) = evaluer_strict(&expr) {
            assert!(
                is_erreur_attendue(&e),
                "erreur non attendue: expr={expr:?} err={e}"
            );
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_echantillons_tries_et_finis() {
    let mut rng = Rng::new(0xFEED_u64);

    for _ in 0..4 {
        let a = gen_nombre(&mut rng);
        let expr = match rng.pick(3) {
            0 => format!("{a}/(x-{a})"),
            1 => format!("sqrt(x)*{a}"),
            _ => format!("ln(x^2)-{a}x"),
        };

        let f = echantillonner(&expr, 5.0, ModeLecture::Tolerant)
            .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        assert!(
            f.paires().windows(2).all(|w| w[0].0 < w[1].0),
            "clés non croissantes: expr={expr:?}"
        );
        assert!(
            f.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
            "valeur non finie stockée: expr={expr:?}"
        );
    }
}
