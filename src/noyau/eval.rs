//! Noyau — évaluation numérique (descente récursive)
//!
//! texte -> prétraitement (constantes, multiplication implicite) -> Lecteur -> f64
//!
//! Grammaire (gauche à droite, sans retour arrière) :
//! ```text
//! expression := terme (('+' | '-') terme)*
//! terme      := facteur (('*' | '/') facteur)*
//! facteur    := ('+' | '-') facteur
//!             | '(' expression ')'
//!             | nombre
//!             | fonction facteur
//! facteur    := facteur '^' facteur      (droite lue par un appel récursif à facteur)
//! ```
//!
//! Attention : une fonction lit un facteur complet, puissance comprise.
//! `sin(x)^2` vaut donc `sin(x^2)` ; écrire `(sin(x))^2` pour le carré.
//!
//! Les résultats non finis ne sont pas rejetés ici : ils remontent tels quels.

use super::erreur::ErreurEval;
use super::pretraitement::{preparer, substituer_variable, VARIABLE};

/// Garde-fou : profondeur maximale de facteurs imbriqués.
const PROFONDEUR_MAX: usize = 512;

/// Sévérité de la lecture.
///
/// - `Tolerant` : texte résiduel => 0, opérande manquant => 0 (comportement historique).
/// - `Strict`   : ces deux cas deviennent des erreurs distinctes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeLecture {
    #[default]
    Tolerant,
    Strict,
}

/// Fonctions reconnues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Ln,
    Log,
    Sin,
    Cos,
    Tan,
}

impl Fonction {
    pub const NOMS: [&'static str; 6] = ["sqrt", "ln", "log", "sin", "cos", "tan"];

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sqrt" => Some(Self::Sqrt),
            "ln" => Some(Self::Ln),
            "log" => Some(Self::Log),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            _ => None,
        }
    }

    pub fn appliquer(self, v: f64) -> f64 {
        match self {
            Self::Sqrt => v.sqrt(),
            Self::Ln => v.ln(),
            Self::Log => v.log10(),
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
        }
    }
}

/// Lecteur : entrée + curseur. Une instance par évaluation.
struct Lecteur {
    chars: Vec<char>,
    pos: usize,
    profondeur: usize,
    mode: ModeLecture,
}

impl Lecteur {
    fn new(texte: &str, mode: ModeLecture) -> Self {
        Self {
            chars: texte.chars().collect(),
            pos: 0,
            profondeur: 0,
            mode,
        }
    }

    fn courant(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn avancer(&mut self) {
        self.pos += 1;
    }

    fn sauter_espaces(&mut self) {
        while self.courant().is_some_and(char::is_whitespace) {
            self.avancer();
        }
    }

    /// Consomme `attendu` (après les espaces) s’il est le prochain caractère.
    fn manger(&mut self, attendu: char) -> bool {
        self.sauter_espaces();
        if self.courant() == Some(attendu) {
            self.avancer();
            true
        } else {
            false
        }
    }

    fn lire(mut self) -> Result<f64, ErreurEval> {
        let v = self.expression()?;
        self.sauter_espaces();

        if self.pos < self.chars.len() {
            return match self.mode {
                ModeLecture::Tolerant => Ok(0.0),
                ModeLecture::Strict => Err(ErreurEval::EntreeResiduelle {
                    position: self.pos,
                    reste: self.chars[self.pos..].iter().collect(),
                }),
            };
        }

        Ok(v)
    }

    fn expression(&mut self) -> Result<f64, ErreurEval> {
        let mut v = self.terme()?;
        loop {
            if self.manger('+') {
                v += self.terme()?;
            } else if self.manger('-') {
                v -= self.terme()?;
            } else {
                return Ok(v);
            }
        }
    }

    fn terme(&mut self) -> Result<f64, ErreurEval> {
        let mut v = self.facteur()?;
        loop {
            if self.manger('*') {
                v *= self.facteur()?;
            } else if self.manger('/') {
                v /= self.facteur()?;
            } else {
                return Ok(v);
            }
        }
    }

    fn facteur(&mut self) -> Result<f64, ErreurEval> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurEval::ProfondeurExcessive {
                max: PROFONDEUR_MAX,
            });
        }
        let v = self.facteur_interne();
        self.profondeur -= 1;
        v
    }

    fn facteur_interne(&mut self) -> Result<f64, ErreurEval> {
        if self.manger('+') {
            return self.facteur();
        }
        if self.manger('-') {
            return Ok(-self.facteur()?);
        }

        let debut = self.pos;
        let mut v = if self.manger('(') {
            let v = self.expression()?;
            self.manger(')');
            v
        } else if self.courant().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            while self.courant().is_some_and(|c| c.is_ascii_digit() || c == '.') {
                self.avancer();
            }
            let texte: String = self.chars[debut..self.pos].iter().collect();
            texte
                .parse::<f64>()
                .map_err(|_| ErreurEval::NombreInvalide { texte })?
        } else if self.courant().is_some_and(|c| c.is_ascii_lowercase()) {
            while self.courant().is_some_and(|c| c.is_ascii_lowercase()) {
                self.avancer();
            }
            let nom: String = self.chars[debut..self.pos].iter().collect();
            let fonction =
                Fonction::depuis_nom(&nom).ok_or(ErreurEval::FonctionInconnue { nom })?;
            fonction.appliquer(self.facteur()?)
        } else {
            // Rien de lisible ici (fin d’entrée, ')' orphelin, symbole inconnu…).
            return match self.mode {
                ModeLecture::Tolerant => Ok(0.0),
                ModeLecture::Strict => Err(ErreurEval::OperandeManquant { position: debut }),
            };
        };

        if self.manger('^') {
            v = v.powf(self.facteur()?);
        }

        Ok(v)
    }
}

/// Vérifie chaque suite de minuscules AVANT les substitutions textuelles :
/// elle doit se découper en noms de fonctions, `x` et `e`.
///
/// Sinon `exp` deviendrait `(e)·(x)·p` et l’erreur nommerait `p`.
fn verifier_identifiants(texte: &str) -> Result<(), ErreurEval> {
    let chars: Vec<char> = texte.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_lowercase() {
            i += 1;
            continue;
        }
        let debut = i;
        while chars.get(i).is_some_and(char::is_ascii_lowercase) {
            i += 1;
        }
        let mot: String = chars[debut..i].iter().collect();
        if !se_decoupe(&mot) {
            return Err(ErreurEval::FonctionInconnue { nom: mot });
        }
    }

    Ok(())
}

fn se_decoupe(mot: &str) -> bool {
    let mut reste = mot;
    while !reste.is_empty() {
        if let Some(nom) = Fonction::NOMS.iter().find(|n| reste.starts_with(**n)) {
            reste = &reste[nom.len()..];
        } else if reste.starts_with([VARIABLE, 'e']) {
            reste = &reste[1..];
        } else {
            return false;
        }
    }
    true
}

/// API publique : évalue un terme sans variable (mode tolérant).
pub fn evaluer(texte: &str) -> Result<f64, ErreurEval> {
    evaluer_avec(texte, ModeLecture::Tolerant)
}

/// Comme [`evaluer`], mais refuse le texte résiduel et les opérandes manquants.
pub fn evaluer_strict(texte: &str) -> Result<f64, ErreurEval> {
    evaluer_avec(texte, ModeLecture::Strict)
}

pub fn evaluer_avec(texte: &str, mode: ModeLecture) -> Result<f64, ErreurEval> {
    verifier_identifiants(texte)?;
    Lecteur::new(&preparer(texte), mode).lire()
}

/// Évalue une expression en `x` au point donné (substitution textuelle).
pub fn evaluer_en(expr: &str, x: f64, mode: ModeLecture) -> Result<f64, ErreurEval> {
    verifier_identifiants(expr)?;
    evaluer_avec(&substituer_variable(expr, x), mode)
}
