//! Types de données pour le crate osgrid

use serde::{Deserialize, Serialize};

use crate::datum::Datum;
use crate::error::OsgridError;

/// Point géographique (latitude/longitude/hauteur) exprimé dans un datum
///
/// Les champs angulaires s'interprètent toujours contre l'ellipsoïde du datum
/// attaché : un point sans son datum n'a pas de sens, et aucune conversion ne
/// le remplace silencieusement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPoint {
    /// Latitude en degrés (signée, −90..90)
    pub lat: f64,

    /// Longitude en degrés (signée, −180..180)
    pub lon: f64,

    /// Hauteur au-dessus de l'ellipsoïde en mètres
    pub height: f64,

    /// Datum dans lequel le point est exprimé
    pub datum: Datum,
}

impl GeodeticPoint {
    /// Crée un point à hauteur ellipsoïdale nulle
    pub fn new(lat: f64, lon: f64, datum: Datum) -> Self {
        Self {
            lat,
            lon,
            height: 0.0,
            datum,
        }
    }

    /// Crée un point avec une hauteur ellipsoïdale explicite
    pub fn with_height(lat: f64, lon: f64, height: f64, datum: Datum) -> Self {
        Self {
            lat,
            lon,
            height,
            datum,
        }
    }

    /// Convertit le point vers un autre datum (via WGS84)
    pub fn convert_datum(&self, to_datum: Datum) -> Result<GeodeticPoint, OsgridError> {
        crate::transform::convert_datum(self, to_datum)
    }

    /// Projette le point (OSGB36) en easting/northing de la grille nationale
    pub fn to_grid(&self) -> Result<OsGridRef, OsgridError> {
        crate::projection::lat_lon_to_grid(self)
    }
}

/// Référence de la grille nationale : easting/northing en mètres entiers
/// depuis la fausse origine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OsGridRef {
    /// Easting en mètres depuis la fausse origine
    pub easting: i32,

    /// Northing en mètres depuis la fausse origine
    pub northing: i32,
}

impl OsGridRef {
    pub fn new(easting: i32, northing: i32) -> Self {
        Self { easting, northing }
    }

    /// Coordonnées géographiques (OSGB36) de la référence
    pub fn to_lat_lon(&self) -> Result<GeodeticPoint, OsgridError> {
        crate::projection::grid_to_lat_lon(self)
    }

    /// Référence alphanumérique standard ("TG 51409 13177") à la précision demandée
    ///
    /// `digits` doit être pair et ≤ 10 ; 10 chiffres = résolution 1 m,
    /// 0 chiffre = la paire de lettres seule.
    pub fn format(&self, digits: u32) -> Result<String, OsgridError> {
        crate::gridref::format(self, digits)
    }
}

/// Point cartésien géocentrique (x, y, z en mètres)
///
/// Le référentiel (datum) n'est pas stocké dans la valeur : il est porté par
/// la conversion appelante. Ne traverse jamais l'API publique.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
