//! Projection Mercator transverse de l'Ordnance Survey
//!
//! Séries directe (termes I..VI) et inverse (VII..XIIA) sur l'ellipsoïde
//! Airy 1830, q.v. OS « A guide to coordinate systems in Great Britain »,
//! annexe C.

use tracing::warn;

use crate::datum::Datum;
use crate::error::OsgridError;
use crate::types::{GeodeticPoint, OsGridRef};

/// Facteur d'échelle au méridien central
const F0: f64 = 0.9996012717;

/// Origine vraie de la grille : 49°N, 2°W
const LAT0_DEG: f64 = 49.0;
const LON0_DEG: f64 = -2.0;

/// Fausse origine en mètres (northing, easting)
const N0: f64 = -100000.0;
const E0: f64 = 400000.0;

/// Borne de sécurité du solveur d'arc méridien (convergence attendue < 10 itérations)
const MAX_ITERATIONS: u32 = 20;

/// Arc méridien depuis l'origine vraie, série en troisième aplatissement n
fn meridional_arc(lat: f64, lat0: f64, b: f64, n: f64) -> f64 {
    let n2 = n * n;
    let n3 = n2 * n;

    let ma = (1.0 + n + 5.0 / 4.0 * n2 + 5.0 / 4.0 * n3) * (lat - lat0);
    let mb = (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * (lat - lat0).sin() * (lat + lat0).cos();
    let mc =
        (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * (lat - lat0)).sin() * (2.0 * (lat + lat0)).cos();
    let md = 35.0 / 24.0 * n3 * (3.0 * (lat - lat0)).sin() * (3.0 * (lat + lat0)).cos();

    b * F0 * (ma - mb + mc - md)
}

/// Projette un point OSGB36 en easting/northing de la grille nationale
///
/// Le point doit être étiqueté OSGB36 (convertir le datum d'abord) ; tout
/// autre datum est rejeté avec `DatumMismatch`. Le résultat est arrondi au
/// mètre entier. Loin de la Grande-Bretagne le résultat est défini mais la
/// distorsion de projection le rend peu significatif.
pub fn lat_lon_to_grid(point: &GeodeticPoint) -> Result<OsGridRef, OsgridError> {
    if point.datum != Datum::Osgb36 {
        return Err(OsgridError::DatumMismatch {
            expected: Datum::Osgb36,
            actual: point.datum,
        });
    }

    let lat = point.lat.to_radians();
    let lon = point.lon.to_radians();
    let lat0 = LAT0_DEG.to_radians();
    let lon0 = LON0_DEG.to_radians();

    let ell = point.datum.ellipsoid();
    let (a, b) = (ell.a, ell.b);
    let e2 = ell.e2();
    let n = ell.n();

    let cos_lat = lat.cos();
    let sin_lat = lat.sin();

    // Rayons de courbure transverse et méridien
    let nu = a * F0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let rho = a * F0 * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5);
    let eta2 = nu / rho - 1.0;

    let m = meridional_arc(lat, lat0, b, n);

    let cos3_lat = cos_lat * cos_lat * cos_lat;
    let cos5_lat = cos3_lat * cos_lat * cos_lat;
    let tan2_lat = lat.tan() * lat.tan();
    let tan4_lat = tan2_lat * tan2_lat;

    let i = m + N0;
    let ii = (nu / 2.0) * sin_lat * cos_lat;
    let iii = (nu / 24.0) * sin_lat * cos3_lat * (5.0 - tan2_lat + 9.0 * eta2);
    let iiia = (nu / 720.0) * sin_lat * cos5_lat * (61.0 - 58.0 * tan2_lat + tan4_lat);
    let iv = nu * cos_lat;
    let v = (nu / 6.0) * cos3_lat * (nu / rho - tan2_lat);
    let vi = (nu / 120.0)
        * cos5_lat
        * (5.0 - 18.0 * tan2_lat + tan4_lat + 14.0 * eta2 - 58.0 * tan2_lat * eta2);

    let d_lon = lon - lon0;
    let d_lon2 = d_lon * d_lon;
    let d_lon3 = d_lon2 * d_lon;
    let d_lon4 = d_lon3 * d_lon;
    let d_lon5 = d_lon4 * d_lon;
    let d_lon6 = d_lon5 * d_lon;

    let northing = i + ii * d_lon2 + iii * d_lon4 + iiia * d_lon6;
    let easting = E0 + iv * d_lon + v * d_lon3 + vi * d_lon5;

    Ok(OsGridRef::new(
        easting.round() as i32,
        northing.round() as i32,
    ))
}

/// Coordonnées géographiques (OSGB36, hauteur nulle) d'un easting/northing
///
/// La latitude au pied du point est résolue itérativement sur l'arc méridien
/// (résiduel absolu < 0.00001 m), puis corrigée par les termes inverses
/// VII..XIIA.
pub fn grid_to_lat_lon(gridref: &OsGridRef) -> Result<GeodeticPoint, OsgridError> {
    let easting = f64::from(gridref.easting);
    let northing = f64::from(gridref.northing);

    let lat0 = LAT0_DEG.to_radians();
    let lon0 = LON0_DEG.to_radians();

    let ell = Datum::Osgb36.ellipsoid();
    let (a, b) = (ell.a, ell.b);
    let e2 = ell.e2();
    let n = ell.n();

    let mut lat = lat0;
    let mut m = 0.0;
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        lat += (northing - N0 - m) / (a * F0);
        m = meridional_arc(lat, lat0, b, n);

        if (northing - N0 - m).abs() < 0.00001 {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            easting = gridref.easting,
            northing = gridref.northing,
            "meridional arc solver exceeded iteration cap"
        );
        return Err(OsgridError::NonConvergence {
            context: "grid to lat/lon meridional arc solver",
            iterations: MAX_ITERATIONS,
        });
    }

    let cos_lat = lat.cos();
    let sin_lat = lat.sin();

    let nu = a * F0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let rho = a * F0 * (1.0 - e2) / (1.0 - e2 * sin_lat * sin_lat).powf(1.5);
    let eta2 = nu / rho - 1.0;

    let tan_lat = lat.tan();
    let tan2_lat = tan_lat * tan_lat;
    let tan4_lat = tan2_lat * tan2_lat;
    let tan6_lat = tan4_lat * tan2_lat;
    let sec_lat = 1.0 / cos_lat;
    let nu3 = nu * nu * nu;
    let nu5 = nu3 * nu * nu;
    let nu7 = nu5 * nu * nu;

    let vii = tan_lat / (2.0 * rho * nu);
    let viii = tan_lat / (24.0 * rho * nu3)
        * (5.0 + 3.0 * tan2_lat + eta2 - 9.0 * tan2_lat * eta2);
    let ix = tan_lat / (720.0 * rho * nu5) * (61.0 + 90.0 * tan2_lat + 45.0 * tan4_lat);
    let x = sec_lat / nu;
    let xi = sec_lat / (6.0 * nu3) * (nu / rho + 2.0 * tan2_lat);
    let xii = sec_lat / (120.0 * nu5) * (5.0 + 28.0 * tan2_lat + 24.0 * tan4_lat);
    let xiia = sec_lat / (5040.0 * nu7)
        * (61.0 + 662.0 * tan2_lat + 1320.0 * tan4_lat + 720.0 * tan6_lat);

    let d_e = easting - E0;
    let d_e2 = d_e * d_e;
    let d_e3 = d_e2 * d_e;
    let d_e4 = d_e2 * d_e2;
    let d_e5 = d_e3 * d_e2;
    let d_e6 = d_e4 * d_e2;
    let d_e7 = d_e5 * d_e2;

    let lat = lat - vii * d_e2 + viii * d_e4 - ix * d_e6;
    let lon = lon0 + x * d_e - xi * d_e3 + xii * d_e5 - xiia * d_e7;

    Ok(GeodeticPoint::new(
        lat.to_degrees(),
        lon.to_degrees(),
        Datum::Osgb36,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exemple numérique du guide OS: 52°39′27.2531″N, 1°43′4.5177″E
    /// → E = 651409.903, N = 313177.270
    fn os_worked_example() -> GeodeticPoint {
        let lat = 52.0 + 39.0 / 60.0 + 27.2531 / 3600.0;
        let lon = 1.0 + 43.0 / 60.0 + 4.5177 / 3600.0;
        GeodeticPoint::new(lat, lon, Datum::Osgb36)
    }

    #[test]
    fn test_os_worked_example_forward() {
        let grid = lat_lon_to_grid(&os_worked_example()).unwrap();
        assert_eq!(grid.easting, 651410);
        assert_eq!(grid.northing, 313177);
    }

    #[test]
    fn test_os_worked_example_inverse() {
        let expected = os_worked_example();
        let point = grid_to_lat_lon(&OsGridRef::new(651410, 313177)).unwrap();

        assert_eq!(point.datum, Datum::Osgb36);
        // 1e-5 degré ≈ 1 m
        assert!((point.lat - expected.lat).abs() < 1e-5, "lat={}", point.lat);
        assert!((point.lon - expected.lon).abs() < 1e-5, "lon={}", point.lon);
        assert_eq!(point.height, 0.0);
    }

    #[test]
    fn test_grid_round_trip_is_exact_on_integer_refs() {
        let gridref = OsGridRef::new(651410, 313177);
        let back = lat_lon_to_grid(&grid_to_lat_lon(&gridref).unwrap()).unwrap();
        assert_eq!(back, gridref);
    }

    #[test]
    fn test_lat_lon_round_trip_within_a_meter() {
        let point = os_worked_example();
        let back = grid_to_lat_lon(&lat_lon_to_grid(&point).unwrap()).unwrap();

        // L'arrondi au mètre entier borne l'erreur à ~1 m
        assert!((back.lat - point.lat).abs() < 1e-5, "lat={}", back.lat);
        assert!((back.lon - point.lon).abs() < 2e-5, "lon={}", back.lon);
    }

    #[test]
    fn test_wrong_datum_is_rejected() {
        let wgs84 = GeodeticPoint::new(51.4778, -0.0015, Datum::Wgs84);
        match lat_lon_to_grid(&wgs84) {
            Err(OsgridError::DatumMismatch { expected, actual }) => {
                assert_eq!(expected, Datum::Osgb36);
                assert_eq!(actual, Datum::Wgs84);
            }
            other => panic!("Expected DatumMismatch, got {:?}", other),
        }
    }
}
