// src/noyau/jetons.rs

use super::erreurs::ErreurLexicale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Pourcent, // postfixé
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
}

impl Fonction {
    /// Nom canonique (ASCII).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sqrt => "sqrt",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
        }
    }

    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    // texte décimal tel que saisi (la conversion en f64 est faite par l’évaluateur)
    Num(String),
    Op(Operateur),

    LPar,
    RPar,

    Fonction(Fonction),
    Constante(Constante),

    Carre, // ² (ou ^2 en forme canonique)
}

fn est_car_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize une chaîne (forme affichée OU forme canonique) en jetons.
/// Supporte:
/// - nombres décimaux : chiffres avec au plus un point (".5" et "5." acceptés, "." seul refusé)
/// - opérateurs + - * / et leurs symboles d’affichage − × ÷
/// - % postfixé, ² postfixé (ou "^2")
/// - parenthèses ( )
/// - π / pi, e (seulement comme mot entier)
/// - sin cos tan sqrt (insensibles à la casse), √ (= sqrt, parenthèse ouvrante implicite)
///
/// Erreur : position (index en caractères) + caractère fautif.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurLexicale> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    let erreur = |position: usize| ErreurLexicale {
        position,
        caractere: chars[position],
    };

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Ponctuation + opérateurs (un caractère)
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Op(Operateur::Plus)),
            '-' | '−' => Some(Tok::Op(Operateur::Moins)),
            '*' | '×' => Some(Tok::Op(Operateur::Fois)),
            '/' | '÷' => Some(Tok::Op(Operateur::Divise)),
            '%' => Some(Tok::Op(Operateur::Pourcent)),
            '²' => Some(Tok::Carre),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // "^2" : seule puissance admise (forme canonique de ²)
        if c == '^' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            let deux = j < chars.len() && chars[j] == '2';
            let suite_num =
                j + 1 < chars.len() && (chars[j + 1].is_ascii_digit() || chars[j + 1] == '.');
            if !deux || suite_num {
                return Err(erreur(i));
            }
            out.push(Tok::Carre);
            i = j + 1;
            continue;
        }

        // π : refusé s’il est collé à un caractère d’identifiant (ex: "eπ", "2π")
        if c == 'π' {
            if i > 0 && est_car_ident(chars[i - 1]) {
                return Err(erreur(i));
            }
            out.push(Tok::Constante(Constante::Pi));
            i += 1;
            continue;
        }

        // √ => sqrt ; la parenthèse ouvrante est implicite si absente (jamais fermée pour l’appelant)
        if c == '√' {
            out.push(Tok::Fonction(Fonction::Sqrt));
            i += 1;
            let mut j = i;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j >= chars.len() || chars[j] != '(' {
                out.push(Tok::LPar);
            }
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && est_car_ident(chars[i]) {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            let tok = match word.to_lowercase().as_str() {
                "sin" => Tok::Fonction(Fonction::Sin),
                "cos" => Tok::Fonction(Fonction::Cos),
                "tan" => Tok::Fonction(Fonction::Tan),
                "sqrt" => Tok::Fonction(Fonction::Sqrt),
                "pi" => Tok::Constante(Constante::Pi),
                "e" => Tok::Constante(Constante::E),
                _ => return Err(erreur(start)),
            };
            out.push(tok);
            continue;
        }

        // Nombre décimal : suite maximale de chiffres, au plus un point
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut point = false;
            let mut chiffres = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if point {
                        // second point dans le même littéral
                        return Err(erreur(i));
                    }
                    point = true;
                } else {
                    chiffres = true;
                }
                i += 1;
            }
            if !chiffres {
                return Err(erreur(start));
            }
            out.push(Tok::Num(chars[start..i].iter().collect()));
            continue;
        }

        return Err(erreur(i));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => n.clone(),
            Tok::Op(Operateur::Plus) => "+".to_string(),
            Tok::Op(Operateur::Moins) => "-".to_string(),
            Tok::Op(Operateur::Fois) => "*".to_string(),
            Tok::Op(Operateur::Divise) => "/".to_string(),
            Tok::Op(Operateur::Pourcent) => "%".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),

            Tok::Fonction(f) => f.nom().to_string(),
            Tok::Constante(k) => k.nom().to_string(),
            Tok::Carre => "²".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
