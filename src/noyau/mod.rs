//! Noyau — moteur d’expressions arithmétiques
//!
//! Organisation interne :
//! - jetons.rs     : tokenisation (symboles d’affichage -> jetons)
//! - analyse.rs    : descente récursive -> Expr
//! - expr.rs       : AST
//! - eval.rs       : pli post-ordre + pipeline complet
//! - trig.rs       : trig en degrés + angles spéciaux
//! - canon.rs      : forme canonique (ASCII) pour le service distant
//! - format.rs     : affichage des résultats
//! - historique.rs : historique borné
//! - memoire.rs    : registre mémoire
//! - apercu.rs     : aperçu en direct (anti-rebond)
//! - erreurs.rs    : taxonomie des erreurs

pub mod analyse;
pub mod apercu;
pub mod canon;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod memoire;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use apercu::Apercu;
pub use canon::{forme_canonique, rendu_canonique};
pub use erreurs::{ErreurArithmetique, ErreurCalcul, ErreurLexicale, ErreurService, ErreurSyntaxe};
pub use eval::{analyser_texte, eval_expression, evaluer};
pub use format::{format_nombre, texte_saisie};
pub use historique::{EntreeHistorique, Historique};
pub use memoire::Memoire;
