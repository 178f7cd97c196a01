//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> analyse (descente récursive) -> Expr -> pli post-ordre -> f64 fini
//!
//! L’évaluateur est un pli récursif sans état : les enfants sont évalués avant le parent.
//! Le contrôle « fini » est fait une seule fois, sur la valeur finale.

use super::analyse::analyser;
use super::erreurs::{ErreurArithmetique, ErreurCalcul};
use super::expr::{Expr, Fonction, OpBinaire};
use super::jetons::{format_tokens, tokenize};
use super::trig::{trig_degres, TrigFn};

/// Texte -> AST (sans évaluer). Échoue sur toute erreur lexicale ou syntaxique.
pub fn analyser_texte(texte: &str) -> Result<Expr, ErreurCalcul> {
    let jetons = tokenize(texte)?;
    log::debug!("jetons: {}", format_tokens(&jetons));
    Ok(analyser(&jetons)?)
}

/// API publique : évalue une expression (forme affichée ou canonique).
pub fn eval_expression(texte: &str) -> Result<f64, ErreurCalcul> {
    let expr = analyser_texte(texte)?;
    Ok(evaluer(&expr)?)
}

/// Évalue un AST. Échoue si le résultat final n’est pas fini.
pub fn evaluer(expr: &Expr) -> Result<f64, ErreurArithmetique> {
    let v = plier(expr)?;
    if !v.is_finite() {
        return Err(ErreurArithmetique::NonFini);
    }
    Ok(v)
}

fn plier(expr: &Expr) -> Result<f64, ErreurArithmetique> {
    use Expr::*;

    match expr {
        Litteral(texte) => texte
            .parse::<f64>()
            .map_err(|_| ErreurArithmetique::NonFini),
        Constante(k) => Ok(k.valeur()),

        Neg(x) => Ok(-plier(x)?),

        Binaire(op, a, b) => {
            let va = plier(a)?;
            let vb = plier(b)?;
            match op {
                OpBinaire::Plus => Ok(va + vb),
                OpBinaire::Moins => Ok(va - vb),
                OpBinaire::Fois => Ok(va * vb),
                OpBinaire::Divise => {
                    if vb == 0.0 {
                        return Err(ErreurArithmetique::DivisionParZero);
                    }
                    Ok(va / vb)
                }
            }
        }

        Pourcent(x) => Ok(plier(x)? / 100.0),
        Carre(x) => {
            let v = plier(x)?;
            Ok(v * v)
        }

        Appel(f, x) => {
            let v = plier(x)?;
            match TrigFn::depuis(*f) {
                Some(t) => trig_degres(t, v),
                None => {
                    debug_assert_eq!(*f, Fonction::Sqrt);
                    if v < 0.0 {
                        return Err(ErreurArithmetique::HorsDomaine);
                    }
                    Ok(v.sqrt())
                }
            }
        }
    }
}
