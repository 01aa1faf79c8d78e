// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Panneau gauche : expression, échelles, actions sur x, calques, dérivées, tableau
// - Zone centrale  : repère + courbe + dérivées + points + tangente + sonde du curseur
//
// Notes :
// - Enter dans l’expression trace (seulement si le champ a le focus)
// - Clic dans le repère = marquer le point sous le curseur
// - La courbe est coupée là où deux échantillons voisins changent strictement de signe
//   (asymptote verticale) ou quand des échantillons manquent (hors domaine).

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};
use traceur::noyau::format::{format_abscisse, format_nombre};
use traceur::noyau::{Classement, FonctionEchantillonnee, Point};

use super::etat::AppGraphe;

const COULEUR_FONCTION: Color32 = Color32::from_rgb(30, 110, 220);
const COULEUR_TANGENTE: Color32 = Color32::from_rgb(220, 120, 20);
const COULEUR_MARQUE: Color32 = Color32::from_rgb(200, 40, 40);
const COULEURS_DERIVEES: [Color32; 4] = [
    Color32::from_rgb(40, 160, 70),
    Color32::from_rgb(150, 60, 190),
    Color32::from_rgb(200, 150, 0),
    Color32::from_rgb(0, 150, 160),
];

/// Graduations visées par demi-axe.
const GRADUATIONS: f64 = 10.0;

/// Passage repère mathématique <-> écran.
#[derive(Clone, Copy, Debug)]
struct Repere {
    rect: Rect,
    echelle_x: f64,
    echelle_y: f64,
}

impl Repere {
    fn vers_ecran(&self, x: f64, y: f64) -> Pos2 {
        let c = self.rect.center();
        let sx = f64::from(self.rect.width()) / (2.0 * self.echelle_x);
        let sy = f64::from(self.rect.height()) / (2.0 * self.echelle_y);
        // borné : une valeur énorme ne doit pas produire un f32 infini
        let dy = (y * sy).clamp(-1e5, 1e5);
        Pos2::new(c.x + (x * sx) as f32, c.y - dy as f32)
    }

    fn abscisse(&self, p: Pos2) -> f64 {
        let c = self.rect.center();
        let sx = f64::from(self.rect.width()) / (2.0 * self.echelle_x);
        f64::from(p.x - c.x) / sx
    }
}

impl AppGraphe {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("panneau_commandes")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
                        ui.heading("Traceur de fonctions");
                        ui.add_space(6.0);

                        self.ui_entree(ui);
                        ui.separator();
                        self.ui_actions_x(ui);
                        ui.separator();
                        self.ui_calques(ui);
                        ui.separator();
                        self.ui_tableau(ui);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_repere(ui);
        });
    }

    /* ------------------------ Panneau ------------------------ */

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("f(x) =");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.saisie.expression)
                .desired_width(ui.available_width())
                .hint_text("Ex: x^3-3x, 2sin(x), sqrt(x)/2")
                .id_salt("expression_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.lost_focus() && enter {
            self.tracer();
            self.focus_entree = true;
        }

        egui::Grid::new("grille_echelles")
            .num_columns(2)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                ui.label("Échelle x :");
                ui.add(egui::TextEdit::singleline(&mut self.saisie.echelle_x).desired_width(80.0));
                ui.end_row();

                ui.label("Échelle y :");
                ui.add(egui::TextEdit::singleline(&mut self.saisie.echelle_y).desired_width(80.0));
                ui.end_row();

                ui.label("Dérivées :");
                ui.add(
                    egui::TextEdit::singleline(&mut self.saisie.ordre_derivees)
                        .desired_width(80.0),
                );
                ui.end_row();
            });

        ui.checkbox(&mut self.reglages.strict, "Lecture stricte")
            .on_hover_text("Texte en trop ou opérande manquant => erreur au lieu de 0");

        ui.horizontal(|ui| {
            ui.label("Inflexion / selle selon :");
            egui::ComboBox::from_id_salt("choix_classement")
                .selected_text(nom_classement(self.reglages.classement))
                .show_ui(ui, |ui| {
                    for c in [Classement::Pente, Classement::Courbure] {
                        ui.selectable_value(&mut self.reglages.classement, c, nom_classement(c));
                    }
                });
        });

        if ui.add_sized([96.0, 30.0], egui::Button::new("Tracer")).clicked() {
            self.tracer();
        }

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        } else if !self.message.is_empty() {
            ui.monospace(&self.message);
        }
    }

    fn ui_actions_x(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("x =");
            ui.add(egui::TextEdit::singleline(&mut self.saisie.abscisse).desired_width(80.0));
        });

        ui.horizontal_wrapped(|ui| {
            if ui.button("Marquer").clicked() {
                self.marquer_saisie();
            }
            if ui
                .button("Retirer")
                .on_hover_text("Retire le dernier point marqué")
                .clicked()
            {
                self.retirer_point();
            }
            if ui.button("Tangente").clicked() {
                self.tangente_saisie();
            }
            if ui.button("Sans tangente").clicked() {
                self.effacer_tangente();
            }
        });
    }

    fn ui_calques(&mut self, ui: &mut egui::Ui) {
        let Some(g) = self.graphe.as_mut() else {
            return;
        };

        ui.label("Afficher :");
        ui.checkbox(&mut g.calques.racines, "Racines");
        ui.checkbox(&mut g.calques.extremums, "Extremums");
        ui.checkbox(&mut g.calques.inflexion, "Points d’inflexion");
        ui.checkbox(&mut g.calques.selle, "Points selle");

        let mut bascule = None;
        ui.horizontal_wrapped(|ui| {
            for (i, d) in g.derivees().iter().enumerate() {
                let mut visible = d.visible;
                let nom = format!("f{}", "'".repeat(i + 1));
                if ui.checkbox(&mut visible, nom).changed() {
                    bascule = Some(i);
                }
            }
        });
        if let Some(i) = bascule {
            self.basculer_derivee(i);
        }
    }

    fn ui_tableau(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Tableau de valeurs")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("de");
                    ui.add(egui::TextEdit::singleline(&mut self.saisie.debut).desired_width(40.0));
                    ui.label("à");
                    ui.add(egui::TextEdit::singleline(&mut self.saisie.fin).desired_width(40.0));
                    ui.label("pas");
                    ui.add(egui::TextEdit::singleline(&mut self.saisie.pas).desired_width(40.0));
                });
                if ui.button("Calculer").clicked() {
                    self.calculer_tableau();
                }

                egui::Grid::new("tableau_valeurs")
                    .striped(true)
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.strong("x");
                        ui.strong("f(x)");
                        ui.end_row();
                        for p in &self.tableau {
                            ui.monospace(format_nombre(p.x));
                            ui.monospace(format_nombre(p.y));
                            ui.end_row();
                        }
                    });
            });
    }

    /* ------------------------ Repère ------------------------ */

    fn ui_repere(&mut self, ui: &mut egui::Ui) {
        let (resp, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let rect = resp.rect;
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        let Some(g) = self.graphe.as_ref() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Saisir une fonction puis « Tracer »",
                FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        };

        let repere = Repere {
            rect,
            echelle_x: g.echelle_x(),
            echelle_y: g.echelle_y(),
        };
        let texte = ui.visuals().text_color();

        dessiner_axes(&painter, &repere, texte);

        for (i, d) in g.derivees().iter().enumerate() {
            if d.visible {
                let couleur = COULEURS_DERIVEES[i % COULEURS_DERIVEES.len()];
                dessiner_courbe(&painter, &repere, &d.valeurs, Stroke::new(1.5, couleur));
            }
        }
        dessiner_courbe(&painter, &repere, g.fonction(), Stroke::new(2.0, COULEUR_FONCTION));

        if let Some(t) = g.tangente() {
            let a = repere.vers_ecran(-repere.echelle_x, t.valeur_en(-repere.echelle_x));
            let b = repere.vers_ecran(repere.echelle_x, t.valeur_en(repere.echelle_x));
            painter.line_segment([a, b], Stroke::new(1.5, COULEUR_TANGENTE));
            painter.text(
                rect.right_top() + egui::vec2(-8.0, 8.0),
                Align2::RIGHT_TOP,
                format!("t(x) = {t}"),
                FontId::monospace(14.0),
                COULEUR_TANGENTE,
            );
        }

        // points remarquables
        let calques = g.calques;
        if calques.racines {
            for p in g.racines() {
                dessiner_point(&painter, &repere, *p, &format_abscisse(p.x), texte);
            }
        }
        let couches = [
            (calques.extremums, g.extremums()),
            (calques.inflexion, g.points_inflexion()),
            (calques.selle, g.points_selle()),
        ];
        for (actif, points) in couches {
            if actif {
                for p in points {
                    dessiner_point(&painter, &repere, *p, &p.to_string(), texte);
                }
            }
        }

        for p in g.marques().iter() {
            dessiner_point(&painter, &repere, *p, &p.to_string(), COULEUR_MARQUE);
        }

        // sonde du curseur
        if let Some(pos) = resp.hover_pos() {
            if let Some(p) = self.sonde(repere.abscisse(pos)) {
                dessiner_point(&painter, &repere, p, &p.to_string(), texte);
            }
        }

        if resp.clicked() {
            if let Some(pos) = resp.interact_pointer_pos() {
                self.marquer(repere.abscisse(pos));
            }
        }
    }
}

fn nom_classement(c: Classement) -> &'static str {
    match c {
        Classement::Pente => "f'(x)",
        Classement::Courbure => "f''(x)",
    }
}

/* ------------------------ Dessin ------------------------ */

/// Pas de graduation : environ `GRADUATIONS` marques par demi-axe, au moins 1.
fn pas_graduation(echelle: f64) -> f64 {
    (echelle / GRADUATIONS).round().max(1.0)
}

fn dessiner_axes(painter: &egui::Painter, r: &Repere, couleur: Color32) {
    let trait_axe = Stroke::new(1.0, couleur);
    let police = FontId::proportional(11.0);

    painter.line_segment(
        [r.vers_ecran(-r.echelle_x, 0.0), r.vers_ecran(r.echelle_x, 0.0)],
        trait_axe,
    );
    painter.line_segment(
        [r.vers_ecran(0.0, -r.echelle_y), r.vers_ecran(0.0, r.echelle_y)],
        trait_axe,
    );

    let pas = pas_graduation(r.echelle_x);
    let n = (r.echelle_x / pas).floor() as i64;
    for k in (-n..=n).filter(|&k| k != 0) {
        let x = k as f64 * pas;
        let p = r.vers_ecran(x, 0.0);
        painter.line_segment([p - egui::vec2(0.0, 4.0), p + egui::vec2(0.0, 4.0)], trait_axe);
        painter.text(
            p + egui::vec2(0.0, 6.0),
            Align2::CENTER_TOP,
            format_nombre(x),
            police.clone(),
            couleur,
        );
    }

    let pas = pas_graduation(r.echelle_y);
    let n = (r.echelle_y / pas).floor() as i64;
    for k in (-n..=n).filter(|&k| k != 0) {
        let y = k as f64 * pas;
        let p = r.vers_ecran(0.0, y);
        painter.line_segment([p - egui::vec2(4.0, 0.0), p + egui::vec2(4.0, 0.0)], trait_axe);
        painter.text(
            p + egui::vec2(6.0, 0.0),
            Align2::LEFT_CENTER,
            format_nombre(y),
            police.clone(),
            couleur,
        );
    }
}

/// Trace les échantillons en polylignes ; coupe sur changement strict de signe
/// ou sur un trou dans les abscisses. Au plus ~2 points par pixel.
fn dessiner_courbe(
    painter: &egui::Painter,
    r: &Repere,
    f: &FonctionEchantillonnee,
    trait_courbe: Stroke,
) {
    let paires = f.paires();
    if paires.len() < 2 {
        return;
    }

    let saut = (paires.len() / (2 * r.rect.width().max(1.0) as usize)).max(1);
    let ecart_max = 2.0 * (paires[1].0 - paires[0].0).abs() * saut as f64;

    let mut troncon: Vec<Pos2> = Vec::new();
    let mut precedent: Option<(f64, f64)> = None;

    for &(x, y) in paires.iter().step_by(saut) {
        if let Some((px, py)) = precedent {
            let coupe = (py > 0.0 && y < 0.0) || (py < 0.0 && y > 0.0) || x - px > ecart_max;
            if coupe {
                fermer_troncon(painter, &mut troncon, trait_courbe);
            }
        }
        troncon.push(r.vers_ecran(x, y));
        precedent = Some((x, y));
    }
    fermer_troncon(painter, &mut troncon, trait_courbe);
}

fn fermer_troncon(painter: &egui::Painter, troncon: &mut Vec<Pos2>, trait_courbe: Stroke) {
    if troncon.len() >= 2 {
        painter.add(egui::Shape::line(std::mem::take(troncon), trait_courbe));
    } else {
        troncon.clear();
    }
}

fn dessiner_point(painter: &egui::Painter, r: &Repere, p: Point, etiquette: &str, couleur: Color32) {
    let pos = r.vers_ecran(p.x, p.y);
    painter.circle_filled(pos, 4.0, couleur);
    painter.text(
        pos + egui::vec2(6.0, -6.0),
        Align2::LEFT_BOTTOM,
        etiquette,
        FontId::monospace(12.0),
        couleur,
    );
}
