// src/noyau/format.rs

/// Chiffres significatifs affichés (masque le bruit flottant : 0.1+0.2 => 0.3).
const CHIFFRES_SIGNIFICATIFS: i32 = 12;

/// Décimales max (au-delà : arrondi à 0).
const DECIMALES_MAX: i32 = 15;

/// Affichage d’un résultat :
/// - pas de notation exponentielle (le texte doit pouvoir être re-tokenisé)
/// - pas de zéros finaux, pas de point final
/// - "-0" => "0"
pub fn format_nombre(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        // non fini : jamais produit par le noyau, affichage défensif
        return if v.is_finite() {
            "0".to_string()
        } else {
            v.to_string()
        };
    }

    let magnitude = v.abs().log10().floor() as i32;
    let decimales = (CHIFFRES_SIGNIFICATIFS - 1 - magnitude).clamp(0, DECIMALES_MAX) as usize;

    let mut s = format!("{v:.decimales$}");
    if s.contains('.') {
        let t = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(t);
    }

    if s == "-0" {
        return "0".to_string();
    }
    s
}

/// Texte réécrit dans l’entrée (chaînage, MR) : sans perte, relu à l’identique.
/// `Display` de f64 donne la plus courte écriture décimale exacte, jamais d’exposant.
pub fn texte_saisie(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}
