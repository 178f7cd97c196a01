// src/noyau/trig.rs
//
// Trigonométrie en DEGRÉS pour sin/cos/tan
// ----------------------------------------
// - Réduction modulo 360 (rem_euclid)
// - Angles spéciaux entiers (multiples de 30° ou 45°) dont la valeur est 0, ±1/2 ou ±1 :
//   valeur exacte (sin(180) = 0 et non 1.2e-16)
// - tan(90 + k·180) : indéfini => HorsDomaine
// - Sinon : conversion x·π/180 puis fonction flottante

use super::erreurs::ErreurArithmetique;
use super::expr::Fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    /// None pour sqrt (pas trigonométrique).
    pub fn depuis(f: Fonction) -> Option<TrigFn> {
        match f {
            Fonction::Sin => Some(TrigFn::Sin),
            Fonction::Cos => Some(TrigFn::Cos),
            Fonction::Tan => Some(TrigFn::Tan),
            Fonction::Sqrt => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Special {
    Valeur(f64),
    Indefini,
}

/// Table des angles spéciaux sur [0, 360).
/// None si l’angle n’a pas de valeur exacte représentable (ex: sin(45) = √2/2).
fn angle_special(f: TrigFn, degres: i64) -> Option<Special> {
    use Special::*;

    match f {
        TrigFn::Sin => match degres {
            0 | 180 => Some(Valeur(0.0)),
            30 | 150 => Some(Valeur(0.5)),
            90 => Some(Valeur(1.0)),
            210 | 330 => Some(Valeur(-0.5)),
            270 => Some(Valeur(-1.0)),
            _ => None,
        },
        TrigFn::Cos => match degres {
            0 => Some(Valeur(1.0)),
            60 | 300 => Some(Valeur(0.5)),
            90 | 270 => Some(Valeur(0.0)),
            120 | 240 => Some(Valeur(-0.5)),
            180 => Some(Valeur(-1.0)),
            _ => None,
        },
        TrigFn::Tan => match degres {
            0 | 180 => Some(Valeur(0.0)),
            45 | 225 => Some(Valeur(1.0)),
            135 | 315 => Some(Valeur(-1.0)),
            90 | 270 => Some(Indefini),
            _ => None,
        },
    }
}

/// sin/cos/tan d’un angle en degrés.
pub fn trig_degres(f: TrigFn, degres: f64) -> Result<f64, ErreurArithmetique> {
    if !degres.is_finite() {
        return Err(ErreurArithmetique::NonFini);
    }

    // rem_euclid d’un négatif minuscule arrondit à 360.0 exactement
    let reduit = match degres.rem_euclid(360.0) {
        r if r >= 360.0 => 0.0,
        r => r,
    };

    if reduit.fract() == 0.0 {
        // reduit ∈ [0, 360) entier : conversion sans perte
        match angle_special(f, reduit as i64) {
            Some(Special::Valeur(v)) => return Ok(v),
            Some(Special::Indefini) => return Err(ErreurArithmetique::HorsDomaine),
            None => {}
        }
    }

    let rad = reduit * std::f64::consts::PI / 180.0;
    Ok(match f {
        TrigFn::Sin => rad.sin(),
        TrigFn::Cos => rad.cos(),
        TrigFn::Tan => rad.tan(),
    })
}
