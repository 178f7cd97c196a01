//! src/noyau/erreurs.rs
//!
//! Taxonomie des erreurs du noyau.
//!
//! - Lexicale / Syntaxe : bloquent toute évaluation du texte.
//! - Arithmétique : seulement pendant l’évaluation d’un AST bien formé.
//! - Service : seulement pour le backend distant.
//!
//! Toutes sont `Clone + PartialEq` : la session garde l’erreur comme état terminal.

use thiserror::Error;

/// Caractère non reconnu ou littéral mal formé.
/// `position` = index en caractères (pas en octets).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("caractère inattendu '{caractere}' à la position {position}")]
pub struct ErreurLexicale {
    pub position: usize,
    pub caractere: char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurSyntaxe {
    #[error("expression vide")]
    ExpressionVide,

    #[error("jeton inattendu (opérande manquant ?)")]
    JetonInattendu,

    #[error("parenthèses non fermées")]
    ParentheseNonFermee,

    #[error("expression trop imbriquée")]
    ProfondeurExcessive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurArithmetique {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("hors domaine")]
    HorsDomaine,

    #[error("résultat non fini")]
    NonFini,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurService {
    #[error("service injoignable: {0}")]
    Transport(String),

    #[error("service: statut HTTP {0}")]
    Statut(u16),

    #[error("service: réponse invalide ({0})")]
    ReponseInvalide(String),

    #[error("service indisponible")]
    Indisponible,
}

/// Erreur du chemin « calculer » (toutes catégories confondues).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error(transparent)]
    Lexicale(#[from] ErreurLexicale),

    #[error(transparent)]
    Syntaxe(#[from] ErreurSyntaxe),

    #[error(transparent)]
    Arithmetique(#[from] ErreurArithmetique),

    #[error(transparent)]
    Service(#[from] ErreurService),
}
