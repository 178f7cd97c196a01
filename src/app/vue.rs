// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Affichage : entrée éditable + aperçu en direct (jamais d’erreur pendant la frappe)
// - Pavé avec symboles d’affichage (× ÷ − √ π ² %)
// - Mémoire (MC MR M+ M−) + historique cliquable
// - Clavier : Enter calcule (quand le champ est focus)
//
// Note :
// - Toute modification de l’entrée passe par AppCalc (inserer / entree_modifiee) :
//   c’est ce qui replanifie l’aperçu.

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::format_nombre;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_memoire(ui);
                ui.add_space(6.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_historique(ui);
            });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        let saisie = self.saisie_possible();

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (2+3)×4, √(2)², sin(30), 15%")
                .id_source("entree_edit")
                .interactive(saisie)
                .code_editor(),
        );

        if resp.changed() {
            self.entree_modifiee();
        }

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter calcule (seulement depuis le champ) ---
        // Un TextEdit une ligne perd le focus sur Enter : on accepte les deux cas.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter && (resp.has_focus() || resp.lost_focus()) {
            self.calculer();
        }

        // Aperçu (ou rien) / requête en cours / erreur
        ui.horizontal(|ui| {
            if self.requete_en_cours() {
                ui.spinner();
                ui.label("calcul en cours…");
            } else if let Some(v) = self.apercu.valeur() {
                ui.weak(format!("= {}", format_nombre(v)));
            } else {
                // hauteur stable
                ui.weak(" ");
            }

            if let Some(r) = self.resultat {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.monospace(format!("Ans = {}", format_nombre(r)));
                });
            }
        });

        if let Some(e) = &self.erreur {
            ui.colored_label(ui.visuals().error_fg_color, format!("Erreur : {e}"));
        }
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            self.bouton_action(ui, "MC", "Efface la mémoire", Action::MemoireEffacer);
            self.bouton_action(ui, "MR", "Insère la valeur mémorisée", Action::MemoireRappel);
            self.bouton_action(ui, "M+", "Ajoute la valeur courante", Action::MemoirePlus);
            self.bouton_action(ui, "M−", "Soustrait la valeur courante", Action::MemoireMoins);

            if !self.memoire.est_vide() {
                ui.separator();
                ui.monospace(format!("M = {}", format_nombre(self.memoire.rappel())));
            }
        });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "C", "Efface l’entrée (et l’erreur)", Action::ClearEntree);
                self.bouton_action(ui, "AC", "Efface entrée + résultat", Action::ResetTotal);
                self.bouton_insert(ui, "(", "(");
                self.bouton_insert(ui, ")", ")");
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "sin", "sin(");
                self.bouton_insert(ui, "cos", "cos(");
                self.bouton_insert(ui, "tan", "tan(");
                self.bouton_insert(ui, "√", "√(");
                self.bouton_insert(ui, "÷", "÷");
                ui.end_row();

                self.bouton_insert(ui, "7", "7");
                self.bouton_insert(ui, "8", "8");
                self.bouton_insert(ui, "9", "9");
                self.bouton_insert(ui, "x²", "²");
                self.bouton_insert(ui, "×", "×");
                ui.end_row();

                self.bouton_insert(ui, "4", "4");
                self.bouton_insert(ui, "5", "5");
                self.bouton_insert(ui, "6", "6");
                self.bouton_insert(ui, "%", "%");
                self.bouton_insert(ui, "−", "−");
                ui.end_row();

                self.bouton_insert(ui, "1", "1");
                self.bouton_insert(ui, "2", "2");
                self.bouton_insert(ui, "3", "3");
                self.bouton_insert(ui, "π", "π");
                self.bouton_insert(ui, "+", "+");
                ui.end_row();

                self.bouton_insert(ui, "0", "0");
                self.bouton_insert(ui, ".", ".");
                self.bouton_insert(ui, "e", "e");
                ui.label("");
                self.bouton_action(ui, "=", "Calcule l’expression", Action::Calculer);
                ui.end_row();
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        // copie des lignes : un clic modifie self
        let lignes: Vec<String> = self
            .historique
            .liste()
            .map(|e| {
                format!(
                    "{}  {} = {}",
                    e.horodatage(),
                    e.expression(),
                    format_nombre(e.resultat())
                )
            })
            .collect();

        egui::CollapsingHeader::new(format!("Historique ({})", lignes.len()))
            .default_open(true)
            .show(ui, |ui| {
                if lignes.is_empty() {
                    ui.weak("vide");
                    return;
                }

                for (i, ligne) in lignes.iter().enumerate() {
                    let resp = ui
                        .add(egui::Button::new(egui::RichText::new(ligne).monospace()).frame(false))
                        .on_hover_text("Recharger cette expression");
                    if resp.clicked() {
                        self.charger_historique(i);
                    }
                }

                ui.add_space(4.0);
                self.bouton_action(
                    ui,
                    "Vider",
                    "Efface tout l’historique",
                    Action::EffacerHistorique,
                );
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([52.0, 32.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::Calculer => self.calculer(),
                Action::MemoirePlus => self.memoire_plus(),
                Action::MemoireMoins => self.memoire_moins(),
                Action::MemoireRappel => self.memoire_rappel(),
                Action::MemoireEffacer => self.memoire_effacer(),
                Action::EffacerHistorique => self.effacer_historique(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([52.0, 32.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
    Calculer,
    MemoirePlus,
    MemoireMoins,
    MemoireRappel,
    MemoireEffacer,
    EffacerHistorique,
}
