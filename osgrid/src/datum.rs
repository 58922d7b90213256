//! Datums géodésiques et paramètres de transformation de Helmert
//!
//! Les paramètres sont ceux publiés par l'Ordnance Survey
//! (« A guide to coordinate systems in Great Britain », section 6) et
//! décrivent la transformation WGS84 → datum cible.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ellipsoid::{self, Ellipsoid};
use crate::error::OsgridError;

/// Paramètres d'une transformation de Helmert à 7 paramètres (WGS84 → datum)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelmertParams {
    /// Translation X en mètres
    pub tx: f64,
    /// Translation Y en mètres
    pub ty: f64,
    /// Translation Z en mètres
    pub tz: f64,

    /// Rotation autour de X en secondes d'arc
    pub rx: f64,
    /// Rotation autour de Y en secondes d'arc
    pub ry: f64,
    /// Rotation autour de Z en secondes d'arc
    pub rz: f64,

    /// Facteur d'échelle en parties par million
    pub s: f64,
}

impl HelmertParams {
    /// Transformation inverse (datum → WGS84) : négation de chaque composante
    pub(crate) fn inverse(&self) -> Self {
        Self {
            tx: -self.tx,
            ty: -self.ty,
            tz: -self.tz,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
            s: -self.s,
        }
    }
}

const WGS84_HELMERT: HelmertParams = HelmertParams {
    tx: 0.0,
    ty: 0.0,
    tz: 0.0,
    rx: 0.0,
    ry: 0.0,
    rz: 0.0,
    s: 0.0,
};

const OSGB36_HELMERT: HelmertParams = HelmertParams {
    tx: -446.448,
    ty: 125.157,
    tz: -542.060,
    rx: -0.1502,
    ry: -0.2470,
    rz: -0.8421,
    s: 20.4894,
};

const ED50_HELMERT: HelmertParams = HelmertParams {
    tx: 89.5,
    ty: 93.8,
    tz: 123.1,
    rx: 0.0,
    ry: 0.0,
    rz: 0.156,
    s: -1.2,
};

const IRL1975_HELMERT: HelmertParams = HelmertParams {
    tx: -482.530,
    ty: 130.596,
    tz: -564.557,
    rx: -1.042,
    ry: -0.214,
    rz: -0.631,
    s: -8.150,
};

const TOKYO_JAPAN_HELMERT: HelmertParams = HelmertParams {
    tx: 148.0,
    ty: -507.0,
    tz: -685.0,
    rx: 0.0,
    ry: 0.0,
    rz: 0.0,
    s: 0.0,
};

/// Datums supportés
///
/// Ensemble fermé : les tables de paramètres sont définies à la compilation,
/// une recherche par clé ne peut pas échouer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Datum {
    Wgs84,
    Osgb36,
    Ed50,
    Irl1975,
    TokyoJapan,
}

impl Datum {
    /// Ellipsoïde associé au datum
    pub fn ellipsoid(&self) -> &'static Ellipsoid {
        match self {
            Datum::Wgs84 => &ellipsoid::WGS84,
            Datum::Osgb36 => &ellipsoid::AIRY_1830,
            Datum::Ed50 => &ellipsoid::INTL_1924,
            Datum::Irl1975 => &ellipsoid::AIRY_MODIFIED,
            Datum::TokyoJapan => &ellipsoid::BESSEL_1841,
        }
    }

    /// Paramètres de Helmert WGS84 → datum (identité pour WGS84)
    pub fn helmert(&self) -> &'static HelmertParams {
        match self {
            Datum::Wgs84 => &WGS84_HELMERT,
            Datum::Osgb36 => &OSGB36_HELMERT,
            Datum::Ed50 => &ED50_HELMERT,
            Datum::Irl1975 => &IRL1975_HELMERT,
            Datum::TokyoJapan => &TOKYO_JAPAN_HELMERT,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Datum::Wgs84 => "WGS84",
            Datum::Osgb36 => "OSGB36",
            Datum::Ed50 => "ED50",
            Datum::Irl1975 => "Irl1975",
            Datum::TokyoJapan => "TokyoJapan",
        };
        f.write_str(name)
    }
}

impl FromStr for Datum {
    type Err = OsgridError;

    /// Parse un nom de datum (insensible à la casse)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("wgs84") {
            Ok(Datum::Wgs84)
        } else if name.eq_ignore_ascii_case("osgb36") {
            Ok(Datum::Osgb36)
        } else if name.eq_ignore_ascii_case("ed50") {
            Ok(Datum::Ed50)
        } else if name.eq_ignore_ascii_case("irl1975") {
            Ok(Datum::Irl1975)
        } else if name.eq_ignore_ascii_case("tokyojapan") {
            Ok(Datum::TokyoJapan)
        } else {
            Err(OsgridError::UnknownDatum(name.to_string()))
        }
    }
}
