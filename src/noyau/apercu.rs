//! src/noyau/apercu.rs
//!
//! Aperçu en direct : réévaluation spéculative après une période calme.
//!
//! Contrats :
//! - Chaque édition annule l’évaluation planifiée précédente et en planifie une nouvelle
//!   (échéance = maintenant + délai).
//! - Seul le ticket de la DERNIÈRE édition peut déposer une valeur : un résultat livré
//!   avec un ticket périmé est ignoré (jamais de course entre aperçus).
//! - Toute erreur (lexicale, syntaxe, arithmétique) => pas d’aperçu, rien n’est remonté.
//! - Aucune mutation de l’entrée, de l’historique ou de la mémoire.
//!
//! L’horloge est fournie par l’appelant (`Duration` depuis un instant arbitraire) :
//! pas de minuterie interne, l’UI sonde à chaque frame.

use std::time::Duration;

use super::eval::eval_expression;

/// Délai calme par défaut.
pub const DELAI_DEFAUT: Duration = Duration::from_millis(300);

/// Identifie une planification ; périmé dès l’édition suivante.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug)]
struct Planification {
    ticket: Ticket,
    echeance: Duration,
    texte: String,
}

#[derive(Clone, Debug)]
pub struct Apercu {
    delai: Duration,
    generation: u64,
    planifie: Option<Planification>,
    valeur: Option<f64>,
}

impl Default for Apercu {
    fn default() -> Self {
        Self::new(DELAI_DEFAUT)
    }
}

impl Apercu {
    pub fn new(delai: Duration) -> Self {
        Self {
            delai,
            generation: 0,
            planifie: None,
            valeur: None,
        }
    }

    /// Édition : annule la planification en cours, en planifie une nouvelle.
    /// L’aperçu affiché est effacé (il ne correspond plus au texte).
    pub fn editer(&mut self, texte: &str, maintenant: Duration) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);

        if self.planifie.is_some() {
            log::debug!("aperçu: planification précédente annulée");
        }
        self.planifie = Some(Planification {
            ticket,
            echeance: maintenant + self.delai,
            texte: texte.to_string(),
        });
        self.valeur = None;
        ticket
    }

    /// À appeler régulièrement. Évalue si l’échéance est passée sans nouvelle édition.
    /// Retourne true si une évaluation a eu lieu.
    pub fn sonder(&mut self, maintenant: Duration) -> bool {
        let pret = matches!(&self.planifie, Some(p) if maintenant >= p.echeance);
        if !pret {
            return false;
        }

        let Some(p) = self.planifie.take() else {
            return false;
        };
        let v = eval_expression(&p.texte).ok();
        log::debug!("aperçu: {:?} => {:?}", p.texte, v);
        self.livrer(p.ticket, v)
    }

    /// Dépose un résultat. Ignoré si le ticket n’est plus le plus récent.
    pub fn livrer(&mut self, ticket: Ticket, valeur: Option<f64>) -> bool {
        if ticket != Ticket(self.generation) {
            log::debug!("aperçu: résultat périmé ignoré ({ticket:?})");
            return false;
        }
        self.valeur = valeur;
        true
    }

    /// Valeur à afficher (None = rien à montrer).
    pub fn valeur(&self) -> Option<f64> {
        self.valeur
    }

    /// Échéance de la planification en cours (pour programmer un réveil de l’UI).
    pub fn prochaine_echeance(&self) -> Option<Duration> {
        self.planifie.as_ref().map(|p| p.echeance)
    }

    /// Annule tout : planification, tickets en vol, valeur affichée.
    pub fn annuler(&mut self) {
        self.generation += 1;
        self.planifie = None;
        self.valeur = None;
    }

    pub fn delai(&self) -> Duration {
        self.delai
    }
}
