//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées : seules des erreurs ARITHMÉTIQUES sont admises
//! - invariants clés : résultat fini ; forme canonique => même résultat ; aperçu == évaluation

use std::time::{Duration, Instant};

use super::apercu::Apercu;
use super::canon::forme_canonique;
use super::erreurs::ErreurCalcul;
use super::eval_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    // 0 fréquent : les divisions par zéro doivent apparaître
    match rng.pick(10) {
        0 | 1 => "0".to_string(),
        2 => "2".to_string(),
        3 => "0.5".to_string(),
        4 => "12".to_string(),
        5 => "3.25".to_string(),
        6 => "90".to_string(),
        7 => "π".to_string(),
        8 => "e".to_string(),
        _ => "(−2)".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let choix = rng.pick(13);
    if choix == 0 {
        return gen_atom(rng);
    }

    let mut sous = || gen_expr(rng, depth - 1);

    match choix {
        1 => format!("({}+{})", sous(), sous()),
        2 => format!("({}−{})", sous(), sous()),
        3 => format!("{}×{}", sous(), sous()),
        4 => format!("({}÷{})", sous(), sous()),
        5 => format!("−{}", sous()),
        6 => format!("({})²", sous()),
        7 => format!("({})%", sous()),
        8 => format!("sin({})", sous()),
        9 => format!("cos({})", sous()),
        10 => format!("tan({})", sous()),
        11 => format!("√({})", sous()),
        _ => format!("{}-{}", sous(), sous()),
    }
}

/// Soupe de caractères (valides ou non) : jamais de panique attendue.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '7', '9', '.', '+', '-', '−', '*', '×', '/', '÷', '(', ')', '%', '²', '√', 'π',
        'e', 's', 'i', 'n', ' ', '$', '^', '2',
    ];
    let n = 1 + rng.pick(20) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_canonique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let r1 = eval_expression(&expr);
        let r2 = eval_expression(&expr);
        assert_eq!(r1, r2, "non déterministe: expr={expr:?}");

        // chemins local et distant : même arbre, même résultat
        let canon = forme_canonique(&expr)
            .unwrap_or_else(|e| panic!("forme canonique refusée: expr={expr:?} err={e}"));
        assert_eq!(eval_expression(&canon), r1, "expr={expr:?} canon={canon:?}");

        match r1 {
            Ok(v) => {
                assert!(v.is_finite(), "non fini: expr={expr:?}");
                seen_ok += 1;
            }
            Err(ErreurCalcul::Arithmetique(_)) => seen_err += 1,
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_et_apercu() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let mut apercu = Apercu::default();
    let mut t = Duration::ZERO;

    for _ in 0..300 {
        budget(t0, max);

        let s = gen_bruit(&mut rng);
        let r = eval_expression(&s);
        if let Ok(v) = r {
            assert!(v.is_finite(), "non fini: s={s:?}");
        }

        // l’aperçu montre exactement ce que l’évaluation donne (ou rien)
        apercu.editer(&s, t);
        t += apercu.delai();
        assert!(apercu.sonder(t));
        assert_eq!(apercu.valeur(), r.ok(), "s={s:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800 × 0.5 = 400
    assert_eq!(v, 400.0);
}
