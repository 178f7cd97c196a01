// src/noyau/memoire.rs
//
// Registre mémoire (M+ / M− / MR / MC) : un seul nombre, 0 au départ.
// Pas de garde-fou au-delà de la plage du f64.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: f64,
}

impl Memoire {
    /// M+ : `None` (pas de valeur courante valide) => sans effet.
    pub fn ajouter(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.valeur += v;
        }
    }

    /// M− : `None` => sans effet.
    pub fn soustraire(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.valeur -= v;
        }
    }

    /// MR : lecture sans mutation.
    pub fn rappel(&self) -> f64 {
        self.valeur
    }

    /// MC : retour à exactement 0.
    pub fn effacer(&mut self) {
        self.valeur = 0.0;
    }

    pub fn est_vide(&self) -> bool {
        self.valeur == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aller_retour() {
        let mut m = Memoire::default();
        assert_eq!(m.rappel(), 0.0);

        m.ajouter(Some(5.0));
        m.soustraire(Some(2.0));
        assert_eq!(m.rappel(), 3.0);
        assert_eq!(m.rappel(), 3.0);

        m.effacer();
        assert_eq!(m.rappel(), 0.0);
        m.effacer();
        assert_eq!(m.rappel(), 0.0);
    }

    #[test]
    fn sans_valeur_courante() {
        let mut m = Memoire::default();
        m.ajouter(Some(4.0));
        m.ajouter(None);
        m.soustraire(None);
        assert_eq!(m.rappel(), 4.0);
    }
}
