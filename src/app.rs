// src/app.rs
//
// Traceur — module App (racine)
// -----------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppGraphe (pour main.rs: use app::AppGraphe;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter (tracer) est géré dans vue.rs, quand le champ d’expression a le focus.

pub mod etat;
pub mod vue;

pub use etat::AppGraphe;

use eframe::egui;

impl eframe::App for AppGraphe {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer l’expression saisie (le graphe affiché reste).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.effacer_entree();
        }

        self.ui(ctx);
    }
}
