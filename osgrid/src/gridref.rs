//! Encodage alphanumérique des références de grille
//!
//! Une référence standard combine deux lettres de carroyage (alphabet A–Z
//! sans 'I') désignant un carré de 100 km et une partie numérique paire
//! (0 à 10 chiffres) répartie également entre easting et northing.

use std::str::FromStr;

use crate::error::OsgridError;
use crate::types::OsGridRef;

/// Emplacement du 'I' absent dans l'alphabet de carroyage
const I_SLOT: i32 = 8;

/// Index numérique d'une lettre de carroyage (A=0..Z=25, 'I' exclu)
fn letter_index(c: char, reference: &str) -> Result<i32, OsgridError> {
    let upper = c.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() || upper == 'I' {
        return Err(OsgridError::InvalidGridLetters(reference.to_string()));
    }

    let mut index = upper as i32 - 'A' as i32;
    // Décaler les lettres au-delà du 'I' absent
    if index >= I_SLOT {
        index -= 1;
    }
    Ok(index)
}

/// Décode une référence standard ("SU 387 148") en easting/northing métriques
///
/// Les chiffres donnés sont complétés par des zéros jusqu'à la résolution
/// 1 m ; une référence sans chiffres désigne le carré de 100 km et rend son
/// centre.
pub fn parse(s: &str) -> Result<OsGridRef, OsgridError> {
    let reference = s.trim();

    let mut chars = reference.chars();
    let (c1, c2) = match (chars.next(), chars.next()) {
        (Some(c1), Some(c2)) => (c1, c2),
        _ => return Err(OsgridError::InvalidGridLetters(reference.to_string())),
    };

    let l1 = letter_index(c1, reference)?;
    let l2 = letter_index(c2, reference)?;

    // Indices de carré de 100 km depuis la fausse origine (carré SV)
    let e100k = ((l1 - 2) % 5) * 5 + l2 % 5;
    let n100k = (19 - l1 / 5 * 5) - l2 / 5;
    if !(0..=6).contains(&e100k) || !(0..=12).contains(&n100k) {
        return Err(OsgridError::InvalidGridLetters(reference.to_string()));
    }

    // Les deux lettres sont ASCII, l'offset 2 tombe sur une frontière de char
    let digits: String = reference[2..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    // Chiffres ASCII uniquement: exclut signes, caractères multi-octets, etc.
    // La chaîne est alors tout ASCII et se découpe par index d'octet
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(OsgridError::InvalidGridDigits(reference.to_string()));
    }
    if digits.len() % 2 != 0 || digits.len() > 10 {
        return Err(OsgridError::InvalidGridDigits(reference.to_string()));
    }

    let half = digits.len() / 2;
    let (e_digits, n_digits) = digits.split_at(half);

    let (e_sub, n_sub) = if half == 0 {
        (50000, 50000)
    } else {
        let scale = 10_i32.pow(5 - half as u32);
        let e: i32 = e_digits
            .parse()
            .map_err(|_| OsgridError::InvalidGridDigits(reference.to_string()))?;
        let n: i32 = n_digits
            .parse()
            .map_err(|_| OsgridError::InvalidGridDigits(reference.to_string()))?;
        (e * scale, n * scale)
    };

    Ok(OsGridRef::new(
        e100k * 100000 + e_sub,
        n100k * 100000 + n_sub,
    ))
}

/// Encode un easting/northing en référence standard à la précision demandée
///
/// `digits` doit être pair et ≤ 10. Les restes sous-100 km sont tronqués (et
/// non arrondis) à `digits / 2` chiffres ; `digits == 0` rend la paire de
/// lettres seule.
pub fn format(gridref: &OsGridRef, digits: u32) -> Result<String, OsgridError> {
    if digits % 2 != 0 || digits > 10 {
        return Err(OsgridError::InvalidGridDigits(format!("digits={}", digits)));
    }

    // Division plancher: les coordonnées négatives sortent du domaine au lieu
    // de retomber dans le carré 0
    let e100k = gridref.easting.div_euclid(100000);
    let n100k = gridref.northing.div_euclid(100000);
    if !(0..=6).contains(&e100k) || !(0..=12).contains(&n100k) {
        return Err(OsgridError::GridIndexOutOfRange {
            easting: gridref.easting,
            northing: gridref.northing,
        });
    }

    let mut l1 = (19 - n100k) - (19 - n100k) % 5 + (e100k + 10) / 5;
    let mut l2 = (19 - n100k) * 5 % 25 + e100k % 5;

    // Ré-insérer l'emplacement du 'I' absent
    if l1 >= I_SLOT {
        l1 += 1;
    }
    if l2 >= I_SLOT {
        l2 += 1;
    }

    let letters: String = [l1, l2]
        .iter()
        .map(|&index| (b'A' + index as u8) as char)
        .collect();

    if digits == 0 {
        return Ok(letters);
    }

    let width = (digits / 2) as usize;
    let scale = 10_i32.pow(5 - digits / 2);
    let e = gridref.easting.rem_euclid(100000) / scale;
    let n = gridref.northing.rem_euclid(100000) / scale;

    Ok(format!("{letters} {e:0width$} {n:0width$}"))
}

impl FromStr for OsGridRef {
    type Err = OsgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
