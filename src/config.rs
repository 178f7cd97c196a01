//! src/config.rs
//!
//! Configuration (TOML, optionnelle).
//!
//! Emplacement : `$CALCULATRICE_CONFIG`, sinon `<config_dir>/calculatrice_pave/config.toml`.
//! Fichier absent => valeurs par défaut. Fichier illisible / invalide => défauts + avertissement.
//! Toutes les valeurs sont bornées (anti-abus / anti-gel), comme la précision côté UI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::noyau::apercu::DELAI_DEFAUT;
use crate::noyau::historique::CAPACITE_DEFAUT;

/// Variable d’environnement : chemin explicite du fichier.
pub const VAR_CONFIG: &str = "CALCULATRICE_CONFIG";

/// Service du widget d’origine.
const URL_SERVICE_DEFAUT: &str = "https://calculator-backend-ve6x.onrender.com/calculate";

const CAPACITE_MAX: usize = 1000;
const DELAI_MAX_MS: u64 = 10_000;
const TIMEOUT_MIN_MS: u64 = 100;
const TIMEOUT_MAX_MS: u64 = 60_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeEvaluation {
    /// Évaluateur local uniquement.
    #[default]
    Local,
    /// Service distant uniquement.
    Distant,
    /// Service distant, repli local sur erreur de service.
    DistantRepli,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub delai_apercu_ms: u64,
    pub capacite_historique: usize,
    pub mode: ModeEvaluation,
    pub url_service: String,
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delai_apercu_ms: DELAI_DEFAUT.as_millis() as u64,
            capacite_historique: CAPACITE_DEFAUT,
            mode: ModeEvaluation::Local,
            url_service: URL_SERVICE_DEFAUT.to_string(),
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("lecture de {}: {source}", chemin.display())]
    Lecture {
        chemin: PathBuf,
        source: std::io::Error,
    },

    #[error("format TOML invalide: {0}")]
    Format(#[from] toml::de::Error),
}

impl Config {
    /// Parse + bornes.
    pub fn depuis_toml(texte: &str) -> Result<Config, ErreurConfig> {
        let c: Config = toml::from_str(texte)?;
        Ok(c.bornee())
    }

    pub fn depuis_fichier(chemin: &Path) -> Result<Config, ErreurConfig> {
        let texte = std::fs::read_to_string(chemin).map_err(|source| ErreurConfig::Lecture {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        Self::depuis_toml(&texte)
    }

    /// Chemin effectif (variable d’environnement prioritaire).
    pub fn chemin_defaut() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(VAR_CONFIG) {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|d| d.join("calculatrice_pave").join("config.toml"))
    }

    /// Ne fait jamais échouer le démarrage.
    pub fn charger() -> Config {
        let Some(chemin) = Self::chemin_defaut() else {
            log::debug!("config: aucun répertoire de configuration, valeurs par défaut");
            return Config::default();
        };

        if !chemin.exists() {
            log::debug!("config: {} absent, valeurs par défaut", chemin.display());
            return Config::default();
        }

        match Self::depuis_fichier(&chemin) {
            Ok(c) => {
                log::info!("config: chargée depuis {}", chemin.display());
                c
            }
            Err(e) => {
                log::warn!("config ignorée ({e}), valeurs par défaut");
                Config::default()
            }
        }
    }

    /// Garde-fous sur toutes les valeurs numériques.
    pub fn bornee(mut self) -> Config {
        self.capacite_historique = self.capacite_historique.clamp(1, CAPACITE_MAX);
        self.delai_apercu_ms = self.delai_apercu_ms.min(DELAI_MAX_MS);
        self.timeout_ms = self.timeout_ms.clamp(TIMEOUT_MIN_MS, TIMEOUT_MAX_MS);
        self
    }

    pub fn delai_apercu(&self) -> Duration {
        Duration::from_millis(self.delai_apercu_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
