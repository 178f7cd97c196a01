//! Tests scientifiques (campagne) : propriétés attendues du moteur.
//!
//! But : verrouiller précédence, associativité, postfixes, degrés, erreurs typées,
//! bornes de l’historique, mémoire et aperçu, sur le pipeline complet.

use std::time::{Duration, Instant};

use super::apercu::Apercu;
use super::erreurs::{ErreurArithmetique, ErreurCalcul, ErreurSyntaxe};
use super::eval_expression;
use super::historique::{EntreeHistorique, Historique};
use super::memoire::Memoire;

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_err(expr: &str, attendu: impl Into<ErreurCalcul>) {
    assert_eq!(eval_expression(expr), Err(attendu.into()), "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    assert_eq!(eval_ok("2+3*4"), 14.0);
    assert_eq!(eval_ok("(2+3)*4"), 20.0);
    assert_eq!(eval_ok("2+3×4"), 14.0);
}

#[test]
fn sci_associativite_gauche() {
    assert_eq!(eval_ok("10-3-2"), 5.0);
    assert_eq!(eval_ok("100/10/2"), 5.0);
    assert_eq!(eval_ok("100÷10÷2"), 5.0);
}

#[test]
fn sci_moins_unaire() {
    assert_eq!(eval_ok("-5+3"), -2.0);
    assert_eq!(eval_ok("3*-2"), -6.0);
    assert_eq!(eval_ok("--4"), 4.0);
    assert_eq!(eval_ok("−(2+3)"), -5.0);
}

#[test]
fn sci_postfixes() {
    assert_eq!(eval_ok("3²"), 9.0);
    assert_eq!(eval_ok("200%"), 2.0);
    assert_eq!(eval_ok("10²%"), 1.0);
    assert_eq!(eval_ok("3²²"), 81.0);
}

/* ------------------------ Fonctions + convention degrés ------------------------ */

#[test]
fn sci_trig_degres() {
    assert!((eval_ok("sin(90)") - 1.0).abs() < 1e-12);
    assert!((eval_ok("cos(60)") - 0.5).abs() < 1e-12);
    assert!((eval_ok("tan(45)") - 1.0).abs() < 1e-12);
    // symétries
    assert_eq!(eval_ok("sin(-30)"), -eval_ok("sin(30)"));
    assert!((eval_ok("cos(-40)") - eval_ok("cos(40)")).abs() < 1e-12);
}

#[test]
fn sci_racine_et_constantes() {
    assert_eq!(eval_ok("√(9)×√(9)"), 9.0);
    assert_eq!(eval_ok("sqrt(2)²").round(), 2.0);
    assert!((eval_ok("π") - std::f64::consts::PI).abs() < 1e-15);
    assert!((eval_ok("e") - std::f64::consts::E).abs() < 1e-15);
}

/* ------------------------ Erreurs typées ------------------------ */

#[test]
fn sci_erreurs_arithmetiques() {
    assert_err("5/0", ErreurArithmetique::DivisionParZero);
    assert_err("sqrt(-4)", ErreurArithmetique::HorsDomaine);
    assert_err("√(−4)", ErreurArithmetique::HorsDomaine);
}

#[test]
fn sci_entrees_mal_formees() {
    assert_err("", ErreurSyntaxe::ExpressionVide);
    assert_err("(2+3", ErreurSyntaxe::ParentheseNonFermee);
    assert_err("2++", ErreurSyntaxe::JetonInattendu);
    assert_err("()", ErreurSyntaxe::JetonInattendu);
    assert!(matches!(
        eval_expression("2..5"),
        Err(ErreurCalcul::Lexicale(_))
    ));
}

/* ------------------------ État borné ------------------------ */

#[test]
fn sci_historique_borne() {
    let mut h = Historique::default();
    for i in 1..=11 {
        h.ajouter(EntreeHistorique::avec_horodatage(
            format!("{i}×1"),
            i as f64,
            "00:00:00",
        ));
    }
    assert_eq!(h.len(), 10);
    assert_eq!(h.charger(0).map(|e| e.expression()), Some("11×1"));
    assert!(h.liste().all(|e| e.expression() != "1×1"));
}

#[test]
fn sci_memoire_aller_retour() {
    let mut m = Memoire::default();
    m.ajouter(Some(5.0));
    m.soustraire(Some(2.0));
    assert_eq!(m.rappel(), 3.0);
    m.effacer();
    assert_eq!(m.rappel(), 0.0);
}

#[test]
fn sci_idempotence_effacements() {
    let mut m = Memoire::default();
    m.effacer();
    m.effacer();
    assert_eq!(m.rappel(), 0.0);

    let mut h = Historique::default();
    h.effacer();
    h.effacer();
    assert!(h.is_empty());
}

/* ------------------------ Aperçu : seule la dernière édition compte ------------------------ */

#[test]
fn sci_apercu_annulation() {
    let ms = Duration::from_millis;
    let mut a = Apercu::default();

    let premier = a.editer("1+1", ms(0));
    a.editer("7×6", ms(100));

    // l’échéance de "1+1" (300 ms) ne déclenche rien : elle a été annulée
    assert!(!a.sonder(ms(300)));
    assert_eq!(a.valeur(), None);

    assert!(a.sonder(ms(400)));
    assert_eq!(a.valeur(), Some(42.0));

    // résultat tardif de la première planification : ignoré
    assert!(!a.livrer(premier, Some(2.0)));
    assert_eq!(a.valeur(), Some(42.0));
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..200 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0.5");
        budget(t0, max);
    }
    assert_eq!(eval_ok(&expr), 100.0);
}

#[test]
fn sci_stress_chaines_plates_refusees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // collage massif : erreur de syntaxe, pas d’abandon du processus
    let somme = vec!["1"; 100_000].join("+");
    assert_err(&somme, ErreurSyntaxe::ProfondeurExcessive);
    budget(t0, max);

    let carres = format!("1{}", "²".repeat(200_000));
    assert_err(&carres, ErreurSyntaxe::ProfondeurExcessive);
    budget(t0, max);

    // l’aperçu suit le même chemin : rien à afficher
    let mut a = Apercu::default();
    a.editer(&somme, Duration::ZERO);
    assert!(a.sonder(a.delai()));
    assert_eq!(a.valeur(), None);

    // sous la borne : évaluation et forme canonique fonctionnent
    let longue = vec!["0.5"; 1000].join("+");
    assert_eq!(eval_ok(&longue), 500.0);
    let canon = super::forme_canonique(&longue).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(eval_ok(&canon), 500.0);
}

#[test]
fn sci_stress_imbrication_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = "2".to_string();
    for _ in 0..100 {
        expr = format!("√({expr}²)");
        budget(t0, max);
    }
    assert!((eval_ok(&expr) - 2.0).abs() < 1e-9);
}
