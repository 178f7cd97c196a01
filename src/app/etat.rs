//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue) : entrée, résultat, erreur, historique, mémoire, aperçu,
//! et les actions des boutons.
//!
//! Contrats :
//! - Flot de contrôle unique : aucune donnée partagée entre threads (hors réponse du service).
//! - « calculer » : au plus UNE requête distante en cours ; un second appel est refusé.
//! - Une erreur de calcul est un état terminal : l’entrée est conservée, les insertions sont
//!   refusées jusqu’à C (clear_entree) ou AC (reset_total). Jamais d’effacement automatique.
//! - L’aperçu est replanifié à chaque modification de l’entrée.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, ModeEvaluation};
use crate::noyau::expr::Expr;
use crate::noyau::{
    analyser_texte, eval_expression, evaluer, rendu_canonique, texte_saisie, Apercu,
    EntreeHistorique, ErreurCalcul, ErreurService, Historique, Memoire,
};
use crate::service::{backend_depuis_config, Backend};

/// Motifs retirés d’un bloc par le backspace.
const MOTIFS_BACKSPACE: [&str; 7] = ["sqrt(", "sin(", "cos(", "tan(", "√(", "pi", "√"];

type ReponseService = Result<f64, ErreurService>;

/// Requête distante en vol.
struct EnCours {
    expression: String,
    expr: Expr,
    reponse: Receiver<ReponseService>,
}

pub struct AppCalc {
    // --- entrée utilisateur (forme affichée) ---
    pub entree: String,

    // --- sorties ---
    pub resultat: Option<f64>,
    pub erreur: Option<ErreurCalcul>,

    // --- état de session ---
    pub historique: Historique,
    pub memoire: Memoire,
    pub apercu: Apercu,

    // --- évaluation ---
    mode: ModeEvaluation,
    backend: Option<Arc<dyn Backend>>,
    en_cours: Option<EnCours>,

    // Horloge de l’aperçu (fournie par la vue à chaque frame).
    horloge: Duration,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppCalc {
    pub fn new(config: &Config) -> Self {
        Self::avec_backend(config, backend_depuis_config(config))
    }

    pub fn avec_backend(config: &Config, backend: Option<Arc<dyn Backend>>) -> Self {
        Self {
            entree: String::new(),
            resultat: None,
            erreur: None,
            historique: Historique::avec_capacite(config.capacite_historique),
            memoire: Memoire::default(),
            apercu: Apercu::new(config.delai_apercu()),
            mode: config.mode,
            backend,
            en_cours: None,
            horloge: Duration::ZERO,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /* ------------------------ Horloge + sondage (à chaque frame) ------------------------ */

    pub fn regler_horloge(&mut self, maintenant: Duration) {
        self.horloge = maintenant;
    }

    /// Fait avancer l’aperçu et récupère une éventuelle réponse du service.
    /// Retourne true si quelque chose a changé (=> redessiner).
    pub fn sonder(&mut self) -> bool {
        let a = self.apercu.sonder(self.horloge);
        let b = self.sonder_reponse();
        a || b
    }

    /// Délai avant le prochain réveil utile (échéance d’aperçu), None si rien de planifié.
    pub fn prochain_reveil(&self) -> Option<Duration> {
        self.apercu
            .prochaine_echeance()
            .map(|e| e.saturating_sub(self.horloge))
    }

    pub fn requete_en_cours(&self) -> bool {
        self.en_cours.is_some()
    }

    /// Les insertions sont refusées pendant une requête ou en état d’erreur.
    pub fn saisie_possible(&self) -> bool {
        self.en_cours.is_none() && self.erreur.is_none()
    }

    /* ------------------------ Édition de l’entrée ------------------------ */

    /// À appeler après TOUTE modification de `entree` (boutons ou champ texte).
    pub fn entree_modifiee(&mut self) {
        self.apercu.editer(&self.entree, self.horloge);
    }

    pub fn inserer(&mut self, texte: &str) {
        if !self.saisie_possible() {
            return;
        }
        self.entree.push_str(texte);
        self.entree_modifiee();
        self.focus_entree = true;
    }

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    pub fn backspace_entree(&mut self) {
        if !self.saisie_possible() || self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire motifs connus, sinon un caractère
        match MOTIFS_BACKSPACE.iter().find(|m| self.entree.ends_with(**m)) {
            Some(m) => {
                let t = self.entree.len() - m.len();
                self.entree.truncate(t);
            }
            None => {
                self.entree.pop();
            }
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        self.entree_modifiee();
        self.focus_entree = true;
    }

    /* ------------------------ Effacements ------------------------ */

    /// C : efface l’entrée et l’erreur (sans toucher au résultat ni à l’historique).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur = None;
        self.apercu.annuler();
        self.focus_entree = true;
    }

    /// AC : entrée + résultat + erreur. Historique et mémoire restent.
    pub fn reset_total(&mut self) {
        self.clear_entree();
        self.resultat = None;
    }

    /* ------------------------ Calcul ------------------------ */

    /// « = » : analyse locale, puis évaluation locale ou distante selon le mode.
    pub fn calculer(&mut self) {
        if self.en_cours.is_some() {
            log::warn!("calcul refusé : une requête est déjà en cours");
            return;
        }
        if self.erreur.is_some() {
            return;
        }

        let expression = self.entree.trim().to_string();

        // Erreurs lexicales/syntaxiques : immédiates, quel que soit le backend.
        let expr = match analyser_texte(&expression) {
            Ok(e) => e,
            Err(e) => return self.terminer(&expression, Err(e)),
        };

        let backend = match self.mode {
            ModeEvaluation::Local => None,
            ModeEvaluation::Distant | ModeEvaluation::DistantRepli => self.backend.clone(),
        };

        match backend {
            Some(backend) => {
                let canonique = rendu_canonique(&expr);
                log::debug!("calcul distant: {expression:?} => {canonique:?}");

                self.apercu.annuler();
                self.en_cours = Some(EnCours {
                    expression,
                    expr,
                    reponse: lancer_requete(backend, canonique),
                });
            }
            None => {
                let r = evaluer(&expr).map_err(ErreurCalcul::from);
                self.terminer(&expression, r);
            }
        }
    }

    /// Récupère la réponse du service si elle est arrivée.
    fn sonder_reponse(&mut self) -> bool {
        let Some(req) = &self.en_cours else {
            return false;
        };

        let reponse = match req.reponse.try_recv() {
            Ok(r) => r,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(ErreurService::Indisponible),
        };

        let Some(req) = self.en_cours.take() else {
            return false;
        };

        let r = match reponse {
            Ok(v) => Ok(v),
            Err(e) if self.mode == ModeEvaluation::DistantRepli => {
                log::warn!("service: {e}, repli sur l’évaluation locale");
                evaluer(&req.expr).map_err(ErreurCalcul::from)
            }
            Err(e) => {
                log::warn!("service: {e}");
                Err(e.into())
            }
        };

        self.terminer(&req.expression, r);
        true
    }

    /// Succès : historique + entrée remplacée par le résultat (chaînage). Échec : état d’erreur.
    fn terminer(&mut self, expression: &str, r: Result<f64, ErreurCalcul>) {
        match r {
            Ok(v) => {
                log::info!("calcul: {expression} = {v}");
                self.historique.ajouter(EntreeHistorique::new(expression, v));
                self.resultat = Some(v);
                // valeur exacte : le calcul suivant repart du vrai résultat
                self.entree = texte_saisie(v);
                self.erreur = None;
                self.apercu.annuler();
            }
            Err(e) => {
                log::info!("calcul: {expression:?} en erreur ({e})");
                self.erreur = Some(e);
            }
        }
        self.focus_entree = true;
    }

    /* ------------------------ Mémoire ------------------------ */

    /// Valeur de l’entrée courante (évaluation locale), None si invalide.
    pub fn valeur_courante(&self) -> Option<f64> {
        eval_expression(&self.entree).ok()
    }

    /// M+
    pub fn memoire_plus(&mut self) {
        let v = self.valeur_courante();
        self.memoire.ajouter(v);
        log::info!("mémoire: M+ {v:?} => {}", self.memoire.rappel());
    }

    /// M−
    pub fn memoire_moins(&mut self) {
        let v = self.valeur_courante();
        self.memoire.soustraire(v);
        log::info!("mémoire: M− {v:?} => {}", self.memoire.rappel());
    }

    /// MR : insère la valeur mémorisée dans l’entrée.
    pub fn memoire_rappel(&mut self) {
        let v = self.memoire.rappel();
        let texte = texte_saisie(v);
        if v < 0.0 {
            self.inserer(&format!("({texte})"));
        } else {
            self.inserer(&texte);
        }
    }

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire.effacer();
        log::info!("mémoire: MC");
    }

    /* ------------------------ Historique ------------------------ */

    /// Recharge l’expression d’une entrée (l’historique n’est pas modifié).
    pub fn charger_historique(&mut self, index: usize) {
        if self.en_cours.is_some() {
            return;
        }
        let Some(e) = self.historique.charger(index) else {
            return;
        };
        self.entree = e.expression().to_string();
        self.erreur = None;
        self.entree_modifiee();
        self.focus_entree = true;
    }

    pub fn effacer_historique(&mut self) {
        self.historique.effacer();
        log::info!("historique effacé");
    }
}

/// Lance l’évaluation distante hors du flot UI ; la réponse arrive par le canal.
#[cfg(not(target_arch = "wasm32"))]
fn lancer_requete(backend: Arc<dyn Backend>, canonique: String) -> Receiver<ReponseService> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        // récepteur abandonné (session fermée) : rien à faire
        let _ = tx.send(backend.evaluer(&canonique));
    });
    rx
}

/// Pas de threads en wasm : réponse immédiate « indisponible ».
#[cfg(target_arch = "wasm32")]
fn lancer_requete(_backend: Arc<dyn Backend>, _canonique: String) -> Receiver<ReponseService> {
    let (tx, rx) = mpsc::channel();
    let _ = tx.send(Err(ErreurService::Indisponible));
    rx
}
