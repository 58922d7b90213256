//! Définitions des ellipsoïdes de référence

/// Paramètres d'un ellipsoïde de référence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,

    /// Demi-petit axe (rayon polaire) en mètres
    pub b: f64,

    /// Aplatissement (informatif, cohérent avec a et b)
    pub f: f64,
}

impl Ellipsoid {
    /// Première excentricité au carré : e² = (a² − b²) / a²
    pub fn e2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.a * self.a)
    }

    /// Troisième aplatissement : n = (a − b) / (a + b)
    pub fn n(&self) -> f64 {
        (self.a - self.b) / (self.a + self.b)
    }
}

/// Ellipsoïde WGS84
pub const WGS84: Ellipsoid = Ellipsoid {
    a: 6378137.0,
    b: 6356752.3142,
    f: 1.0 / 298.257223563,
};

/// Ellipsoïde GRS80
/// Note: Quasi identique à WGS84, différence < 0.1mm
pub const GRS80: Ellipsoid = Ellipsoid {
    a: 6378137.0,
    b: 6356752.31414,
    f: 1.0 / 298.257222101,
};

/// Ellipsoïde Airy 1830 (grille nationale britannique)
pub const AIRY_1830: Ellipsoid = Ellipsoid {
    a: 6377563.396,
    b: 6356256.909,
    f: 1.0 / 299.3249646,
};

/// Ellipsoïde Airy modifié (Irlande)
pub const AIRY_MODIFIED: Ellipsoid = Ellipsoid {
    a: 6377340.189,
    b: 6356034.448,
    f: 1.0 / 299.32496,
};

/// Ellipsoïde international 1924 (Hayford)
pub const INTL_1924: Ellipsoid = Ellipsoid {
    a: 6378388.0,
    b: 6356911.946,
    f: 1.0 / 297.0,
};

/// Ellipsoïde Bessel 1841
pub const BESSEL_1841: Ellipsoid = Ellipsoid {
    a: 6377397.155,
    b: 6356078.963,
    f: 1.0 / 299.152815351,
};
