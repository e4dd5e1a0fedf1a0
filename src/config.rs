//! Umbrales y límites configurables.
//!
//! Los umbrales espaciales se ajustaron con una webcam frontal y la mano a
//! la distancia del brazo. Sus valores definen el comportamiento: cambiar
//! uno cambia el gesto al que corresponde una pose.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// |middle_tip.x - wrist.x| por encima de esto marca la mano como inclinada
pub const TILT_THRESHOLD: f64 = 0.1;
/// Distancia punta del pulgar a punta del índice bajo la cual se lee el círculo OK
pub const OK_SIGN_DISTANCE: f64 = 0.08;

/// Muñeca con x menor que esto: borde izquierdo del frame
pub const LEFT_EDGE: f64 = 0.3;
/// Muñeca con x mayor que esto: borde derecho del frame
pub const RIGHT_EDGE: f64 = 0.7;
/// Muñeca con x mayor que esto: lado derecho del frame
pub const RIGHT_SIDE: f64 = 0.6;
/// Banda central abierta para la pose de rezo (excluye ambos extremos)
pub const CENTER_MIN: f64 = 0.4;
pub const CENTER_MAX: f64 = 0.6;

/// Muñeca con y menor que esto: mano levantada
pub const RAISED_LEVEL: f64 = 0.3;
/// Muñeca con y menor que esto: a la altura de la cara
pub const FACE_LEVEL: f64 = 0.4;
/// Muñeca con y mayor que esto: mano baja
pub const LOWERED_LEVEL: f64 = 0.6;
/// Muñeca con y mayor que esto: mano caída
pub const DROPPED_LEVEL: f64 = 0.7;

pub const SPECIFIC_CONFIDENCE: f32 = 0.8;
pub const BASE_CONFIDENCE: f32 = 0.85;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Etiqueta de gesto desconocida: {0}")]
    UnknownLabel(String),

    #[error("La palabra {0:?} está asignada a más de un gesto")]
    DuplicateWord(String),
}

/// Umbrales espaciales y confianzas de la cascada de gestos.
///
/// Los landmarks llegan en f32; las comparaciones espaciales los pasan a f64.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub tilt: f64,
    pub ok_sign_distance: f64,
    pub left_edge: f64,
    pub right_edge: f64,
    pub right_side: f64,
    pub center_min: f64,
    pub center_max: f64,
    pub raised_level: f64,
    pub face_level: f64,
    pub lowered_level: f64,
    pub dropped_level: f64,
    pub specific_confidence: f32,
    pub base_confidence: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            tilt: TILT_THRESHOLD,
            ok_sign_distance: OK_SIGN_DISTANCE,
            left_edge: LEFT_EDGE,
            right_edge: RIGHT_EDGE,
            right_side: RIGHT_SIDE,
            center_min: CENTER_MIN,
            center_max: CENTER_MAX,
            raised_level: RAISED_LEVEL,
            face_level: FACE_LEVEL,
            lowered_level: LOWERED_LEVEL,
            dropped_level: DROPPED_LEVEL,
            specific_confidence: SPECIFIC_CONFIDENCE,
            base_confidence: BASE_CONFIDENCE,
        }
    }
}

impl Thresholds {
    /// Cortes horizontales usados por las reglas de posición
    pub fn x_cuts(&self) -> Vec<f64> {
        vec![
            self.left_edge,
            self.center_min,
            self.center_max,
            self.right_side,
            self.right_edge,
        ]
    }

    /// Cortes verticales usados por las reglas de posición
    pub fn y_cuts(&self) -> Vec<f64> {
        vec![
            self.raised_level,
            self.face_level,
            self.lowered_level,
            self.dropped_level,
        ]
    }
}

/// Tamaños de salida del predictor de frases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorLimits {
    /// Frases de los generadores que se conservan antes de mezclar
    pub ai_limit: usize,
    /// Frases devueltas para una lista de palabras no vacía
    pub result_limit: usize,
    /// Frases devueltas para una lista vacía
    pub default_limit: usize,
    /// Frases de plantilla por categoría seleccionada
    pub per_category: usize,
}

impl Default for PredictorLimits {
    fn default() -> Self {
        Self {
            ai_limit: 8,
            result_limit: 15,
            default_limit: 10,
            per_category: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub limits: PredictorLimits,
}

impl Config {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
