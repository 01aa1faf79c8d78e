// src/noyau/pretraitement.rs
//
// Réécritures textuelles AVANT la lecture :
// - virgule décimale -> point
// - constantes e / π -> littéraux parenthésés
// - x -> littéral parenthésé (une seule variable : aucune fonction reconnue ne contient 'x')
// - multiplication implicite : 2(…) / )(… / 2sin(…) -> 2*(…) / )*(… / 2*sin(…)

use std::f64::consts::{E, PI};

/// Symbole de la variable libre.
pub const VARIABLE: char = 'x';

/// Tolère la virgule comme séparateur décimal (saisie "2,5").
pub fn normaliser_decimales(texte: &str) -> String {
    texte.replace(',', ".")
}

/// Remplace `x` par `(valeur)`.
///
/// Invariant : l’expression n’a qu’une variable, et aucun identifiant reconnu
/// (sqrt, ln, log, sin, cos, tan) ne contient la lettre `x`.
pub fn substituer_variable(expr: &str, valeur: f64) -> String {
    expr.replace(VARIABLE, &format!("({valeur})"))
}

/// Remplace `e` et `π` par leur valeur, entre parenthèses
/// (ainsi "2e" devient un produit, pas le nombre "22.718…").
pub fn substituer_constantes(texte: &str) -> String {
    let mut out = String::with_capacity(texte.len() + 16);
    for c in texte.chars() {
        match c {
            'e' => out.push_str(&format!("({E})")),
            'π' => out.push_str(&format!("({PI})")),
            _ => out.push(c),
        }
    }
    out
}

/// Insère `*` entre un chiffre ou `)` et un `(` / un nom de fonction qui suit immédiatement.
///
/// Une seule passe suffit : une insertion n’ajoute qu’un caractère et ne crée
/// jamais de nouvelle paire plus tôt dans la chaîne.
pub fn inserer_multiplications(texte: &str) -> String {
    let chars: Vec<char> = texte.chars().collect();
    let mut out = String::with_capacity(texte.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        let Some(&suivant) = chars.get(i + 1) else {
            continue;
        };
        let gauche = c.is_ascii_digit() || c == ')';
        let droite = suivant == '(' || suivant.is_ascii_lowercase();
        if gauche && droite {
            out.push('*');
        }
    }

    out
}

/// Pipeline complet : constantes puis multiplications implicites.
pub fn preparer(texte: &str) -> String {
    inserer_multiplications(&substituer_constantes(texte))
}
