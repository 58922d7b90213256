//! Types d'erreurs pour le crate osgrid

use thiserror::Error;

use crate::datum::Datum;

/// Erreurs pouvant survenir lors des conversions de coordonnées
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OsgridError {
    /// Conversion de datum entre deux datums non-WGS84
    #[error("Unsupported datum pair: {from} -> {to} (conversions are routed through WGS84)")]
    UnsupportedDatumPair { from: Datum, to: Datum },

    /// Point exprimé dans un autre datum que celui attendu par l'opération
    #[error("Datum mismatch: expected {expected}, got {actual}")]
    DatumMismatch { expected: Datum, actual: Datum },

    /// Lettres de carroyage invalides ou hors du domaine de la grille
    #[error("Invalid grid letters in reference: {0}")]
    InvalidGridLetters(String),

    /// Partie numérique invalide (longueur impaire, > 10 chiffres, non numérique)
    #[error("Invalid grid digits: {0}")]
    InvalidGridDigits(String),

    /// Coordonnées en dehors des carrés valides de la grille nationale
    #[error("Grid index out of range: easting={easting}, northing={northing}")]
    GridIndexOutOfRange { easting: i32, northing: i32 },

    /// Solveur itératif non convergent (défaut interne)
    #[error("{context} failed to converge after {iterations} iterations")]
    NonConvergence {
        context: &'static str,
        iterations: u32,
    },

    /// Nom de datum non reconnu
    #[error("Unknown datum: {0}")]
    UnknownDatum(String),
}
