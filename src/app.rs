// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - L’horloge de l’aperçu vient d’egui (i.time) : pas d’Instant (absent en wasm).
// - Enter est géré dans vue.rs (quand le champ a le focus).

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;

/// Cadence de sondage pendant une requête distante.
const SONDAGE_REQUETE: Duration = Duration::from_millis(50);

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let t = ctx.input(|i| i.time).max(0.0);
        self.regler_horloge(Duration::from_secs_f64(t));
        self.sonder();

        // ESC = effacer seulement l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });

        // egui ne redessine que sur événement : on se réveille pour l’aperçu / la réponse.
        if let Some(d) = self.prochain_reveil() {
            ctx.request_repaint_after(d);
        }
        if self.requete_en_cours() {
            ctx.request_repaint_after(SONDAGE_REQUETE);
        }
    }
}
