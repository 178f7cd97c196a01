// src/noyau/canon.rs
//
// Forme canonique (ASCII) d’une expression :
// - × ÷ −  => * / -
// - π      => pi
// - √(     => sqrt(
// - ²      => ^2
// - %      => /100
//
// Le rendu part de l’AST (et non du texte) : les parenthèses nécessaires sont
// ajoutées pour que le texte produit garde exactement la structure analysée
// (ex: "50%²" => "(50/100)^2", pas "50/100^2").
// Le texte canonique est relu par tokenize() sans perte : chemins local et distant
// évaluent le même arbre.

use super::erreurs::ErreurCalcul;
use super::eval::analyser_texte;
use super::expr::{Expr, OpBinaire};

/* ------------------------ Niveaux de liaison ------------------------ */

const NIV_ADD: u8 = 1;
const NIV_MUL: u8 = 2;
const NIV_UNAIRE: u8 = 3;
const NIV_PUISSANCE: u8 = 4;
const NIV_ATOME: u8 = 5;

fn niveau(e: &Expr) -> u8 {
    match e {
        Expr::Litteral(_) | Expr::Constante(_) | Expr::Appel(..) => NIV_ATOME,
        Expr::Carre(_) => NIV_PUISSANCE,
        Expr::Neg(_) => NIV_UNAIRE,
        Expr::Pourcent(_) => NIV_MUL, // rendu "x/100"
        Expr::Binaire(OpBinaire::Fois | OpBinaire::Divise, ..) => NIV_MUL,
        Expr::Binaire(OpBinaire::Plus | OpBinaire::Moins, ..) => NIV_ADD,
    }
}

/* ------------------------ API ------------------------ */

/// Texte affiché -> texte canonique. Échoue comme le tokenizer / l’analyseur.
pub fn forme_canonique(texte: &str) -> Result<String, ErreurCalcul> {
    let expr = analyser_texte(texte)?;
    Ok(rendu_canonique(&expr))
}

pub fn rendu_canonique(e: &Expr) -> String {
    let mut out = String::new();
    rendre(e, 0, &mut out);
    out
}

/// Rend `e` dans un contexte qui exige au moins `min` ; parenthèses sinon.
fn rendre(e: &Expr, min: u8, out: &mut String) {
    let parens = niveau(e) < min;
    if parens {
        out.push('(');
    }

    match e {
        Expr::Litteral(texte) => out.push_str(texte),
        Expr::Constante(k) => out.push_str(k.nom()),

        Expr::Neg(x) => {
            out.push('-');
            rendre(x, NIV_UNAIRE, out);
        }

        Expr::Binaire(op, a, b) => {
            // associativité gauche : le membre droit exige un niveau de plus
            let n = niveau(e);
            rendre(a, n, out);
            out.push(op.symbole());
            rendre(b, n + 1, out);
        }

        Expr::Pourcent(x) => {
            rendre(x, NIV_MUL, out);
            out.push_str("/100");
        }

        Expr::Carre(x) => {
            rendre(x, NIV_ATOME, out);
            out.push_str("^2");
        }

        Expr::Appel(f, x) => {
            out.push_str(f.nom());
            out.push('(');
            rendre(x, 0, out);
            out.push(')');
        }
    }

    if parens {
        out.push(')');
    }
}
