//! Tests d'intégration de l'API publique: chaînes de conversion complètes

use std::str::FromStr;

use osgrid::{
    convert_datum, grid_to_lat_lon, lat_lon_to_grid, Datum, GeodeticPoint, OsGridRef, OsgridError,
};

#[test]
fn test_greenwich_to_national_grid() {
    // Observatoire de Greenwich, comme sur la page de conversion d'origine:
    // WGS84 → OSGB36 → grille
    let wgs84 = GeodeticPoint::new(51.4778, -0.0015, Datum::Wgs84);

    let osgb36 = convert_datum(&wgs84, Datum::Osgb36).unwrap();
    let gridref = lat_lon_to_grid(&osgb36).unwrap();

    assert_eq!(gridref.easting, 538883);
    assert_eq!(gridref.northing, 177320);
    assert_eq!(gridref.format(6).unwrap(), "TQ 388 773");
}

#[test]
fn test_grid_reference_to_wgs84() {
    // Chaîne inverse: référence → OSGB36 → WGS84
    let gridref = OsGridRef::from_str("TQ 388 773").unwrap();
    let osgb36 = grid_to_lat_lon(&gridref).unwrap();
    let wgs84 = convert_datum(&osgb36, Datum::Wgs84).unwrap();

    assert_eq!(osgb36.datum, Datum::Osgb36);
    assert_eq!(wgs84.datum, Datum::Wgs84);
    // La référence 6 chiffres désigne un carré de 100 m: le point de départ
    // doit être retrouvé à ~100 m près
    assert!((wgs84.lat - 51.4778).abs() < 2e-3, "lat={}", wgs84.lat);
    assert!((wgs84.lon - (-0.0015)).abs() < 2e-3, "lon={}", wgs84.lon);
}

#[test]
fn test_os_worked_example_chain() {
    // Exemple numérique du guide OS: E 651409.903, N 313177.270
    let lat = 52.0 + 39.0 / 60.0 + 27.2531 / 3600.0;
    let lon = 1.0 + 43.0 / 60.0 + 4.5177 / 3600.0;
    let point = GeodeticPoint::new(lat, lon, Datum::Osgb36);

    let gridref = point.to_grid().unwrap();
    assert_eq!(gridref, OsGridRef::new(651410, 313177));
    assert_eq!(gridref.format(10).unwrap(), "TG 51410 13177");

    let back = gridref.to_lat_lon().unwrap();
    assert!((back.lat - lat).abs() < 1e-5, "lat={}", back.lat);
    assert!((back.lon - lon).abs() < 2e-5, "lon={}", back.lon);
}

#[test]
fn test_datum_round_trips_are_sub_meter() {
    let origin = GeodeticPoint::with_height(51.4778, -0.0015, 10.0, Datum::Wgs84);

    for datum in [
        Datum::Osgb36,
        Datum::Ed50,
        Datum::Irl1975,
        Datum::TokyoJapan,
    ] {
        let there = origin.convert_datum(datum).unwrap();
        let back = there.convert_datum(Datum::Wgs84).unwrap();

        // ~1e-5 degré ≈ 1 m; le résiduel observé est sub-centimétrique
        assert!(
            (back.lat - origin.lat).abs() < 1e-5,
            "{}: lat={}",
            datum,
            back.lat
        );
        assert!(
            (back.lon - origin.lon).abs() < 1e-5,
            "{}: lon={}",
            datum,
            back.lon
        );
        assert!(
            (back.height - origin.height).abs() < 1.0,
            "{}: height={}",
            datum,
            back.height
        );
    }
}

#[test]
fn test_parse_format_round_trip_is_exact() {
    for reference in ["SU 38700 14800", "TG 51409 13177", "TQ 38883 77320"] {
        let gridref = OsGridRef::from_str(reference).unwrap();
        assert_eq!(gridref.format(10).unwrap(), reference);
    }
}

#[test]
fn test_parse_precision_semantics() {
    // 6 chiffres: complétés par des zéros jusqu'à la résolution 1 m
    let gridref = OsGridRef::from_str("SU387148").unwrap();
    assert_eq!(gridref, OsGridRef::new(438700, 114800));

    // 0 chiffre: centre du carré de 100 km
    let square = OsGridRef::from_str("SV").unwrap();
    assert_eq!(square, OsGridRef::new(50000, 50000));
}

#[test]
fn test_invalid_references_are_typed_errors() {
    // ZZ retombe hors du domaine 0..6 × 0..12
    assert!(matches!(
        OsGridRef::from_str("ZZ123456"),
        Err(OsgridError::InvalidGridLetters(_))
    ));

    // Nombre de chiffres impair
    assert!(matches!(
        OsGridRef::from_str("SU1234567"),
        Err(OsgridError::InvalidGridDigits(_))
    ));
}

#[test]
fn test_unsupported_datum_pair_is_not_chained() {
    let osgb36 = GeodeticPoint::new(52.0, -1.0, Datum::Osgb36);
    assert!(matches!(
        osgb36.convert_datum(Datum::TokyoJapan),
        Err(OsgridError::UnsupportedDatumPair { .. })
    ));
}

#[test]
fn test_projection_requires_osgb36_input() {
    let wgs84 = GeodeticPoint::new(51.4778, -0.0015, Datum::Wgs84);
    assert!(matches!(
        wgs84.to_grid(),
        Err(OsgridError::DatumMismatch { .. })
    ));
}

#[test]
fn test_datum_name_parsing_for_upstream_callers() {
    // Les appelants construisent leurs points depuis des noms bruts
    let datum = Datum::from_str("osgb36").unwrap();
    let point = GeodeticPoint::with_height(52.0, -1.0, 0.0, datum);
    assert!(point.to_grid().is_ok());

    assert!(matches!(
        Datum::from_str("ngf84"),
        Err(OsgridError::UnknownDatum(_))
    ));
}
