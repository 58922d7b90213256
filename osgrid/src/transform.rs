//! Transformation de datum par similitude de Helmert
//!
//! Les tables de paramètres sont toutes définies par rapport à WGS84 :
//! seules les conversions WGS84 ↔ X sont routables. La composition
//! polaire → cartésien → Helmert → polaire est le seul ordre correct,
//! appliquer la transformation en coordonnées géographiques n'est pas
//! équivalent.

use crate::cartesian;
use crate::datum::{Datum, HelmertParams};
use crate::error::OsgridError;
use crate::types::{CartesianPoint, GeodeticPoint};

/// Applique la similitude à 7 paramètres au point cartésien
fn helmert_transform(point: &CartesianPoint, t: &HelmertParams) -> CartesianPoint {
    let (x, y, z) = (point.x, point.y, point.z);

    // Secondes d'arc → radians, ppm → facteur (1 + s)
    let rx = (t.rx / 3600.0).to_radians();
    let ry = (t.ry / 3600.0).to_radians();
    let rz = (t.rz / 3600.0).to_radians();
    let s1 = t.s / 1e6 + 1.0;

    CartesianPoint {
        x: t.tx + x * s1 - y * rz + z * ry,
        y: t.ty + x * rz + y * s1 - z * rx,
        z: t.tz - x * ry + y * rx + z * s1,
    }
}

/// Convertit un point géographique vers un autre datum
///
/// Le point résultat est étiqueté `to_datum` ; la hauteur traverse le calcul.
/// Toute paire dont aucun des deux datums n'est WGS84 est rejetée avec
/// `UnsupportedDatumPair`.
pub fn convert_datum(point: &GeodeticPoint, to_datum: Datum) -> Result<GeodeticPoint, OsgridError> {
    let transform = if point.datum == Datum::Wgs84 {
        // WGS84 → cible : transformation directe de la cible
        *to_datum.helmert()
    } else if to_datum == Datum::Wgs84 {
        // Source → WGS84 : inverse de la transformation de la source
        point.datum.helmert().inverse()
    } else {
        return Err(OsgridError::UnsupportedDatumPair {
            from: point.datum,
            to: to_datum,
        });
    };

    let cartesian = cartesian::to_cartesian(point);
    let transformed = helmert_transform(&cartesian, &transform);
    cartesian::to_polar(&transformed, to_datum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greenwich_wgs84_to_osgb36() {
        // Observatoire de Greenwich
        let wgs84 = GeodeticPoint::new(51.4778, -0.0015, Datum::Wgs84);
        let osgb36 = convert_datum(&wgs84, Datum::Osgb36).unwrap();

        assert_eq!(osgb36.datum, Datum::Osgb36);
        // Valeurs de référence du guide OS (décalage OSGB36 ≈ 120 m au sud-est)
        assert!((osgb36.lat - 51.477284).abs() < 1e-5, "lat={}", osgb36.lat);
        assert!((osgb36.lon - 0.000120).abs() < 1e-5, "lon={}", osgb36.lon);
    }

    #[test]
    fn test_round_trip_every_supported_datum() {
        let origin = GeodeticPoint::with_height(51.4778, -0.0015, 10.0, Datum::Wgs84);

        for datum in [
            Datum::Osgb36,
            Datum::Ed50,
            Datum::Irl1975,
            Datum::TokyoJapan,
        ] {
            let there = convert_datum(&origin, datum).unwrap();
            let back = convert_datum(&there, Datum::Wgs84).unwrap();

            // Résiduel de l'aller-retour Helmert: sub-centimétrique
            assert!(
                (back.lat - origin.lat).abs() < 1e-6,
                "{}: lat={}",
                datum,
                back.lat
            );
            assert!(
                (back.lon - origin.lon).abs() < 1e-6,
                "{}: lon={}",
                datum,
                back.lon
            );
            assert!(
                (back.height - origin.height).abs() < 0.05,
                "{}: height={}",
                datum,
                back.height
            );
        }
    }

    #[test]
    fn test_wgs84_to_wgs84_is_identity() {
        let point = GeodeticPoint::new(48.8584, 2.2945, Datum::Wgs84);
        let same = convert_datum(&point, Datum::Wgs84).unwrap();

        assert!((same.lat - point.lat).abs() < 1e-7, "lat={}", same.lat);
        assert!((same.lon - point.lon).abs() < 1e-7, "lon={}", same.lon);
    }

    #[test]
    fn test_non_wgs84_pair_is_rejected() {
        let osgb36 = GeodeticPoint::new(52.0, -1.0, Datum::Osgb36);
        let result = convert_datum(&osgb36, Datum::Ed50);

        match result {
            Err(OsgridError::UnsupportedDatumPair { from, to }) => {
                assert_eq!(from, Datum::Osgb36);
                assert_eq!(to, Datum::Ed50);
            }
            other => panic!("Expected UnsupportedDatumPair, got {:?}", other),
        }
    }

    #[test]
    fn test_same_non_wgs84_datum_is_rejected() {
        // Pas de cas particulier identité: le routage exige WGS84 d'un côté
        let osgb36 = GeodeticPoint::new(52.0, -1.0, Datum::Osgb36);
        assert!(convert_datum(&osgb36, Datum::Osgb36).is_err());
    }
}
