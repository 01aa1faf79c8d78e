// src/noyau/format.rs
//
// Arrondis + affichage des nombres (étiquettes de points, équations).

/// Arrondi à `decimales` chiffres après la virgule (demi -> loin de zéro).
/// Un zéro négatif est ramené à `0.0` (sinon "-0x" à l’affichage).
pub fn arrondi(v: f64, decimales: i32) -> f64 {
    let facteur = 10f64.powi(decimales);
    let r = (v * facteur).round() / facteur;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Nombre en texte court : pas de ".0" superflu, pas de notation scientifique.
pub fn format_nombre(v: f64) -> String {
    if v.is_nan() {
        return "indéfini".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    format!("{}", if v == 0.0 { 0.0 } else { v })
}

/// Étiquette d’un point : "(x | y)" à 2 décimales.
pub fn format_coordonnees(x: f64, y: f64) -> String {
    format!(
        "({} | {})",
        format_nombre(arrondi(x, 2)),
        format_nombre(arrondi(y, 2))
    )
}

/// Étiquette d’une racine : "(x)" à 2 décimales.
pub fn format_abscisse(x: f64) -> String {
    format!("({})", format_nombre(arrondi(x, 2)))
}
