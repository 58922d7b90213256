//! # osgrid
//!
//! Conversions géodésiques entre datums et références de la grille nationale
//! de l'Ordnance Survey britannique.
//!
//! ## Features
//!
//! - Transformation de datum par similitude de Helmert à 7 paramètres
//!   (WGS84 ↔ OSGB36, ED50, Irl1975, TokyoJapan)
//! - Projection Mercator transverse OSGB36 ↔ easting/northing
//! - Encodage/décodage des références alphanumériques ("TQ 388 773")
//!   avec sémantique de précision explicite
//! - Fonctions pures sans état: sûres à appeler depuis n'importe quel thread
//!
//! ## Usage
//!
//! ```rust,ignore
//! use osgrid::{convert_datum, lat_lon_to_grid, Datum, GeodeticPoint};
//!
//! let wgs84 = GeodeticPoint::new(51.4778, -0.0015, Datum::Wgs84);
//! let osgb36 = convert_datum(&wgs84, Datum::Osgb36)?;
//! let gridref = lat_lon_to_grid(&osgb36)?;
//!
//! println!("{}", gridref.format(6)?); // "TQ 388 773"
//! ```

mod cartesian;
pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod gridref;
pub mod projection;
pub mod transform;
pub mod types;

pub use datum::{Datum, HelmertParams};
pub use ellipsoid::Ellipsoid;
pub use error::OsgridError;
pub use projection::{grid_to_lat_lon, lat_lon_to_grid};
pub use transform::convert_datum;
pub use types::{GeodeticPoint, OsGridRef};
