//! Conversion géodésique ↔ cartésien géocentrique

use tracing::warn;

use crate::datum::Datum;
use crate::error::OsgridError;
use crate::types::{CartesianPoint, GeodeticPoint};

/// Borne de sécurité du solveur de latitude (convergence attendue en 1 à 4 itérations)
const MAX_ITERATIONS: u32 = 20;

/// Convertit un point géographique en coordonnées cartésiennes géocentriques
/// sur l'ellipsoïde de son datum
pub(crate) fn to_cartesian(point: &GeodeticPoint) -> CartesianPoint {
    let phi = point.lat.to_radians();
    let lambda = point.lon.to_radians();
    let h = point.height;

    let ell = point.datum.ellipsoid();
    let e2 = ell.e2();

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();

    // Rayon de courbure transverse
    let nu = ell.a / (1.0 - e2 * sin_phi * sin_phi).sqrt();

    CartesianPoint {
        x: (nu + h) * cos_phi * lambda.cos(),
        y: (nu + h) * cos_phi * lambda.sin(),
        z: ((1.0 - e2) * nu + h) * sin_phi,
    }
}

/// Convertit un point cartésien en coordonnées géographiques sur l'ellipsoïde
/// du datum indiqué (résolution itérative de la latitude)
pub(crate) fn to_polar(point: &CartesianPoint, datum: Datum) -> Result<GeodeticPoint, OsgridError> {
    let (x, y, z) = (point.x, point.y, point.z);

    let ell = datum.ellipsoid();
    let (a, e2) = (ell.a, ell.e2());

    let p = (x * x + y * y).sqrt();

    // Seuil de convergence rapporté au datum, précision ≈ 4 m
    let precision = 4.0 / a;

    let mut phi = z.atan2(p * (1.0 - e2));
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let nu = a / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
        let next = (z + e2 * nu * phi.sin()).atan2(p);

        if (next - phi).abs() <= precision {
            phi = next;
            converged = true;
            break;
        }
        phi = next;
    }

    if !converged {
        warn!(
            x = x,
            y = y,
            z = z,
            datum = %datum,
            "latitude solver exceeded iteration cap"
        );
        return Err(OsgridError::NonConvergence {
            context: "cartesian to polar latitude solver",
            iterations: MAX_ITERATIONS,
        });
    }

    let nu = a / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
    let lambda = y.atan2(x);
    let height = p / phi.cos() - nu;

    Ok(GeodeticPoint {
        lat: phi.to_degrees(),
        lon: lambda.to_degrees(),
        height,
        datum,
    })
}
