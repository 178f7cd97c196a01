//! src/service.rs
//!
//! Backend d’évaluation (abstraction) + implémentation HTTP (natif seulement).
//!
//! Format réseau :
//! - requête : POST `{"expression": "<forme canonique>"}`
//! - succès  : `{"result": <nombre>}`
//! - statut non 2xx, corps mal formé, transport => ErreurService
//!
//! Le backend ne garantit PAS « une seule requête à la fois » : c’est l’appelant (la session).

use std::sync::Arc;

use serde::Deserialize;

use crate::config::{Config, ModeEvaluation};
use crate::noyau::ErreurService;

/// Évaluation déléguée (texte canonique -> nombre).
pub trait Backend: Send + Sync {
    fn evaluer(&self, canonique: &str) -> Result<f64, ErreurService>;
}

#[derive(Deserialize)]
struct Reponse {
    result: f64,
}

/// Corps de réponse -> nombre fini.
pub fn decoder_reponse(corps: &str) -> Result<f64, ErreurService> {
    let r: Reponse =
        serde_json::from_str(corps).map_err(|e| ErreurService::ReponseInvalide(e.to_string()))?;
    if !r.result.is_finite() {
        return Err(ErreurService::ReponseInvalide("résultat non fini".into()));
    }
    Ok(r.result)
}

pub fn corps_requete(canonique: &str) -> String {
    serde_json::json!({ "expression": canonique }).to_string()
}

/// Backend selon la configuration (None => évaluation locale).
pub fn backend_depuis_config(config: &Config) -> Option<Arc<dyn Backend>> {
    if config.mode == ModeEvaluation::Local {
        return None;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Some(Arc::new(http::ServiceHttp::new(
            &config.url_service,
            config.timeout(),
        )))
    }

    #[cfg(target_arch = "wasm32")]
    {
        log::warn!("service distant indisponible en wasm, évaluation locale");
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod http {
    use std::time::Duration;

    use ureq::Agent;

    use super::{corps_requete, decoder_reponse, Backend};
    use crate::noyau::ErreurService;

    pub struct ServiceHttp {
        agent: Agent,
        url: String,
    }

    impl ServiceHttp {
        pub fn new(url: &str, timeout: Duration) -> Self {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            Self {
                agent,
                url: url.to_string(),
            }
        }
    }

    impl Backend for ServiceHttp {
        fn evaluer(&self, canonique: &str) -> Result<f64, ErreurService> {
            log::debug!("service: POST {} ({canonique})", self.url);

            let resp = match self
                .agent
                .post(&self.url)
                .set("Content-Type", "application/json")
                .send_string(&corps_requete(canonique))
            {
                Ok(r) => r,
                Err(ureq::Error::Status(code, _)) => return Err(ErreurService::Statut(code)),
                Err(ureq::Error::Transport(t)) => {
                    return Err(ErreurService::Transport(t.to_string()))
                }
            };

            if !(200..300).contains(&resp.status()) {
                return Err(ErreurService::Statut(resp.status()));
            }

            let corps = resp
                .into_string()
                .map_err(|e| ErreurService::ReponseInvalide(e.to_string()))?;
            decoder_reponse(&corps)
        }
    }

}
