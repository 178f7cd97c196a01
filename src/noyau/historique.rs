//! src/noyau/historique.rs
//!
//! Historique borné des calculs réussis, du plus récent au plus ancien.
//!
//! Contrats :
//! - `len() <= capacite` toujours ; l’insertion au-delà évince la plus ancienne entrée.
//! - Les entrées sont immuables une fois créées.
//! - `charger(i)` est une lecture pure (ne retire rien).

use std::collections::VecDeque;

/// Capacité par défaut (fenêtre de l’historique).
pub const CAPACITE_DEFAUT: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    expression: String,
    resultat: f64,
    horodatage: String,
}

impl EntreeHistorique {
    /// Entrée horodatée maintenant (heure locale, HH:MM:SS).
    pub fn new(expression: impl Into<String>, resultat: f64) -> Self {
        let horodatage = chrono::Local::now().format("%H:%M:%S").to_string();
        Self::avec_horodatage(expression, resultat, horodatage)
    }

    pub fn avec_horodatage(
        expression: impl Into<String>,
        resultat: f64,
        horodatage: impl Into<String>,
    ) -> Self {
        Self {
            expression: expression.into(),
            resultat,
            horodatage: horodatage.into(),
        }
    }

    /// Expression telle qu’affichée à l’utilisateur.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn resultat(&self) -> f64 {
        self.resultat
    }

    pub fn horodatage(&self) -> &str {
        &self.horodatage
    }
}

#[derive(Clone, Debug)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
    capacite: usize,
}

impl Default for Historique {
    fn default() -> Self {
        Self::avec_capacite(CAPACITE_DEFAUT)
    }
}

impl Historique {
    /// Garde-fou : capacité au moins 1.
    pub fn avec_capacite(capacite: usize) -> Self {
        let capacite = capacite.max(1);
        Self {
            entrees: VecDeque::with_capacity(capacite + 1),
            capacite,
        }
    }

    /// Insère en tête ; évince la plus ancienne si la capacité est dépassée.
    pub fn ajouter(&mut self, entree: EntreeHistorique) {
        self.entrees.push_front(entree);
        self.entrees.truncate(self.capacite);
    }

    /// Du plus récent au plus ancien.
    pub fn liste(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn charger(&self, index: usize) -> Option<&EntreeHistorique> {
        self.entrees.get(index)
    }

    /// Irréversible.
    pub fn effacer(&mut self) {
        self.entrees.clear();
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn capacite(&self) -> usize {
        self.capacite
    }
}
