// src/noyau/analyse.rs
//
// Descente récursive : jetons -> Expr
//
// Grammaire (du plus lâche au plus serré):
//   expr     := terme (('+' | '-') terme)*
//   terme    := unaire (('*' | '/') unaire)*
//   unaire   := '-' unaire | postfixe
//   postfixe := primaire ('²' | '%')*
//   primaire := Num | Constante | '(' expr ')' | Fonction '(' expr ')'
//
// Règles:
// - + - * / associatifs à gauche
// - moins unaire plus lâche que les postfixes : -3² = -(3²)
// - une fonction DOIT être suivie de '(' (sinon parenthèse non fermée)
// - tout ou rien : aucun AST partiel en cas d’erreur
// - hauteur de l’arbre bornée (chaînes plates "1+1+…", "2²²…" comprises) :
//   évaluation, rendu canonique et libération restent récursifs sans risque pour la pile

use super::erreurs::ErreurSyntaxe;
use super::expr::{Expr, OpBinaire};
use super::jetons::{Operateur, Tok};

/// Garde-fou : profondeur max (parenthèses + moins unaires) pour protéger la pile.
const MAX_PROFONDEUR: usize = 256;

/// Garde-fou : hauteur max de l’AST produit (nœuds sur la plus longue branche).
pub const MAX_HAUTEUR: usize = 1024;

/// Sous-arbre en construction + sa hauteur.
struct Arbre {
    expr: Expr,
    hauteur: usize,
}

impl Arbre {
    fn feuille(expr: Expr) -> Self {
        Arbre { expr, hauteur: 1 }
    }
}

/// Nouveau nœud au-dessus d’enfants de hauteur `enfants`.
fn noeud(expr: Expr, enfants: usize) -> Result<Arbre, ErreurSyntaxe> {
    let hauteur = enfants + 1;
    if hauteur > MAX_HAUTEUR {
        return Err(ErreurSyntaxe::ProfondeurExcessive);
    }
    Ok(Arbre { expr, hauteur })
}

pub fn analyser(jetons: &[Tok]) -> Result<Expr, ErreurSyntaxe> {
    if jetons.is_empty() {
        return Err(ErreurSyntaxe::ExpressionVide);
    }

    let mut a = Analyseur {
        jetons,
        pos: 0,
        profondeur: 0,
    };
    let e = a.expr()?;

    match a.courant() {
        None => Ok(e.expr),
        // ')' en trop
        Some(Tok::RPar) => Err(ErreurSyntaxe::ParentheseNonFermee),
        Some(_) => Err(ErreurSyntaxe::JetonInattendu),
    }
}

struct Analyseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    profondeur: usize,
}

impl Analyseur<'_> {
    fn courant(&self) -> Option<&Tok> {
        self.jetons.get(self.pos)
    }

    fn avancer(&mut self) -> Option<&Tok> {
        let t = self.jetons.get(self.pos);
        self.pos += 1;
        t
    }

    fn entrer(&mut self) -> Result<(), ErreurSyntaxe> {
        self.profondeur += 1;
        if self.profondeur > MAX_PROFONDEUR {
            return Err(ErreurSyntaxe::ProfondeurExcessive);
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }

    fn expr(&mut self) -> Result<Arbre, ErreurSyntaxe> {
        let mut gauche = self.terme()?;

        loop {
            let op = match self.courant() {
                Some(Tok::Op(Operateur::Plus)) => OpBinaire::Plus,
                Some(Tok::Op(Operateur::Moins)) => OpBinaire::Moins,
                _ => return Ok(gauche),
            };
            self.pos += 1;
            let droite = self.terme()?;
            let h = gauche.hauteur.max(droite.hauteur);
            gauche = noeud(Expr::binaire(op, gauche.expr, droite.expr), h)?;
        }
    }

    fn terme(&mut self) -> Result<Arbre, ErreurSyntaxe> {
        let mut gauche = self.unaire()?;

        loop {
            let op = match self.courant() {
                Some(Tok::Op(Operateur::Fois)) => OpBinaire::Fois,
                Some(Tok::Op(Operateur::Divise)) => OpBinaire::Divise,
                _ => return Ok(gauche),
            };
            self.pos += 1;
            let droite = self.unaire()?;
            let h = gauche.hauteur.max(droite.hauteur);
            gauche = noeud(Expr::binaire(op, gauche.expr, droite.expr), h)?;
        }
    }

    fn unaire(&mut self) -> Result<Arbre, ErreurSyntaxe> {
        if let Some(Tok::Op(Operateur::Moins)) = self.courant() {
            self.pos += 1;
            self.entrer()?;
            let x = self.unaire()?;
            self.sortir();
            return noeud(Expr::Neg(Box::new(x.expr)), x.hauteur);
        }
        self.postfixe()
    }

    fn postfixe(&mut self) -> Result<Arbre, ErreurSyntaxe> {
        let mut x = self.primaire()?;

        loop {
            let e = match self.courant() {
                Some(Tok::Carre) => Expr::Carre(Box::new(x.expr)),
                Some(Tok::Op(Operateur::Pourcent)) => Expr::Pourcent(Box::new(x.expr)),
                _ => return Ok(x),
            };
            x = noeud(e, x.hauteur)?;
            self.pos += 1;
        }
    }

    fn primaire(&mut self) -> Result<Arbre, ErreurSyntaxe> {
        match self.avancer().cloned() {
            Some(Tok::Num(texte)) => Ok(Arbre::feuille(Expr::Litteral(texte))),
            Some(Tok::Constante(k)) => Ok(Arbre::feuille(Expr::Constante(k))),

            Some(Tok::LPar) => self.groupe(),

            Some(Tok::Fonction(f)) => {
                // la fonction doit être immédiatement suivie de '('
                if !matches!(self.avancer(), Some(Tok::LPar)) {
                    return Err(ErreurSyntaxe::ParentheseNonFermee);
                }
                let x = self.groupe()?;
                noeud(Expr::Appel(f, Box::new(x.expr)), x.hauteur)
            }

            // opérande manquant : fin, opérateur, ')' ou postfixe orphelin
            _ => Err(ErreurSyntaxe::JetonInattendu),
        }
    }

    /// Contenu d’une parenthèse déjà ouverte, jusqu’à la ')' correspondante.
    fn groupe(&mut self) -> Result<Arbre, ErreurSyntaxe> {
        self.entrer()?;
        let x = self.expr()?;
        if !matches!(self.avancer(), Some(Tok::RPar)) {
            return Err(ErreurSyntaxe::ParentheseNonFermee);
        }
        self.sortir();
        Ok(x)
    }
}
