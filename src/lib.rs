//! Traceur de fonctions : noyau numérique + réglages de session.
//!
//! La vue egui (binaire) ne fait que consommer ces deux modules.

pub mod noyau;
pub mod reglages;
