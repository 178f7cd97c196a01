// src/noyau/expr.rs
//
// AST (flottants double précision à l’évaluation).
// - Litteral : texte décimal du jeton (converti par l’évaluateur)
// - Pourcent(x) : x / 100
// - Carre(x)    : x * x
// - Appel       : sqrt ou trig (degrés)
//
// Chaque noeud possède ses enfants (arbre strict, pas de partage).

pub use super::jetons::{Constante, Fonction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl OpBinaire {
    pub fn symbole(self) -> char {
        match self {
            OpBinaire::Plus => '+',
            OpBinaire::Moins => '-',
            OpBinaire::Fois => '*',
            OpBinaire::Divise => '/',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Litteral(String),
    Constante(Constante),

    Neg(Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),

    Pourcent(Box<Expr>),
    Carre(Box<Expr>),

    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn binaire(op: OpBinaire, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn litteral(texte: &str) -> Expr {
        Expr::Litteral(texte.to_string())
    }
}
