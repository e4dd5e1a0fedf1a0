use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Landmarks por mano detectada
pub const LANDMARK_COUNT: usize = 21;

/// Índices de landmarks, en el orden anatómico del detector de mano
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Punto clave normalizado. x crece hacia la derecha, y hacia abajo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distancia en el plano de la imagen (sin z), calculada en f64
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("Cantidad de landmarks inválida: se esperaban {expected}, llegaron {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("El landmark {index} tiene una coordenada no finita")]
    NonFinite { index: usize },
}

/// Pose validada de una mano: exactamente 21 landmarks finitos
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    points: [Landmark; LANDMARK_COUNT],
}

impl Hand {
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] =
            landmarks
                .try_into()
                .map_err(|_| LandmarkError::WrongCount {
                    expected: LANDMARK_COUNT,
                    actual: landmarks.len(),
                })?;

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index });
        }

        Ok(Self { points })
    }

    pub fn point(&self, index: usize) -> &Landmark {
        &self.points[index]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

/// Extensión de los cinco dedos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    pub fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Construye el estado desde los 5 bits bajos: bit 0 = pulgar ... bit 4 = meñique
    pub fn from_bits(bits: u8) -> Self {
        Self::new(
            bits & 0b00001 != 0,
            bits & 0b00010 != 0,
            bits & 0b00100 != 0,
            bits & 0b01000 != 0,
            bits & 0b10000 != 0,
        )
    }

    /// Los 32 estados posibles
    pub fn all() -> impl Iterator<Item = FingerState> {
        (0u8..32).map(Self::from_bits)
    }

    pub fn as_array(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    pub fn count(&self) -> usize {
        self.as_array().iter().filter(|&&f| f).count()
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marks: String = self
            .as_array()
            .iter()
            .zip(['T', 'I', 'M', 'R', 'P'])
            .map(|(&on, c)| if on { c } else { '-' })
            .collect();
        f.pad(&marks)
    }
}

/// Contexto espacial de la mano, en unidades normalizadas del frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandDescriptor {
    pub tilted: bool,
    pub fingers_up: bool,
    pub center_x: f64,
    pub center_y: f64,
    pub thumb_position: Landmark,
    pub index_position: Landmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureCategory {
    Numbers,
    Emotions,
    BasicNeeds,
    Social,
}

impl GestureCategory {
    pub const ALL: [GestureCategory; 4] = [
        GestureCategory::Numbers,
        GestureCategory::Emotions,
        GestureCategory::BasicNeeds,
        GestureCategory::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numbers => "numbers",
            Self::Emotions => "emotions",
            Self::BasicNeeds => "basic_needs",
            Self::Social => "social",
        }
    }
}

/// Conjunto cerrado de gestos que el clasificador puede nombrar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    // Números
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Peace,
    #[serde(rename = "ok")]
    OkSign,

    // Emociones
    ThumbsUp,
    ThumbsDown,
    LoveSign,
    HappyPalm,
    SadFist,
    WorriedForehead,
    TiredRub,
    GratefulBow,

    // Necesidades básicas
    HelpWave,
    StopPalm,
    EatMouth,
    DrinkCup,
    SleepHead,
    BathroomUrgent,
    HotFan,
    ColdShiver,

    // Social
    HelloWave,
    ByeWave,
    YesNod,
    NoShake,
    PleasePray,
    ThanksBow,
    YouPoint,
    MePoint,
    CallPhone,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 33] = [
        GestureLabel::Zero,
        GestureLabel::One,
        GestureLabel::Two,
        GestureLabel::Three,
        GestureLabel::Four,
        GestureLabel::Five,
        GestureLabel::Peace,
        GestureLabel::OkSign,
        GestureLabel::ThumbsUp,
        GestureLabel::ThumbsDown,
        GestureLabel::LoveSign,
        GestureLabel::HappyPalm,
        GestureLabel::SadFist,
        GestureLabel::WorriedForehead,
        GestureLabel::TiredRub,
        GestureLabel::GratefulBow,
        GestureLabel::HelpWave,
        GestureLabel::StopPalm,
        GestureLabel::EatMouth,
        GestureLabel::DrinkCup,
        GestureLabel::SleepHead,
        GestureLabel::BathroomUrgent,
        GestureLabel::HotFan,
        GestureLabel::ColdShiver,
        GestureLabel::HelloWave,
        GestureLabel::ByeWave,
        GestureLabel::YesNod,
        GestureLabel::NoShake,
        GestureLabel::PleasePray,
        GestureLabel::ThanksBow,
        GestureLabel::YouPoint,
        GestureLabel::MePoint,
        GestureLabel::CallPhone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Three => "three",
            Self::Four => "four",
            Self::Five => "five",
            Self::Peace => "peace",
            Self::OkSign => "ok",
            Self::ThumbsUp => "thumbs_up",
            Self::ThumbsDown => "thumbs_down",
            Self::LoveSign => "love_sign",
            Self::HappyPalm => "happy_palm",
            Self::SadFist => "sad_fist",
            Self::WorriedForehead => "worried_forehead",
            Self::TiredRub => "tired_rub",
            Self::GratefulBow => "grateful_bow",
            Self::HelpWave => "help_wave",
            Self::StopPalm => "stop_palm",
            Self::EatMouth => "eat_mouth",
            Self::DrinkCup => "drink_cup",
            Self::SleepHead => "sleep_head",
            Self::BathroomUrgent => "bathroom_urgent",
            Self::HotFan => "hot_fan",
            Self::ColdShiver => "cold_shiver",
            Self::HelloWave => "hello_wave",
            Self::ByeWave => "bye_wave",
            Self::YesNod => "yes_nod",
            Self::NoShake => "no_shake",
            Self::PleasePray => "please_pray",
            Self::ThanksBow => "thanks_bow",
            Self::YouPoint => "you_point",
            Self::MePoint => "me_point",
            Self::CallPhone => "call_phone",
        }
    }

    pub fn category(&self) -> GestureCategory {
        use GestureLabel::*;
        match self {
            Zero | One | Two | Three | Four | Five | Peace | OkSign => GestureCategory::Numbers,
            ThumbsUp | ThumbsDown | LoveSign | HappyPalm | SadFist | WorriedForehead
            | TiredRub | GratefulBow => GestureCategory::Emotions,
            HelpWave | StopPalm | EatMouth | DrinkCup | SleepHead | BathroomUrgent | HotFan
            | ColdShiver => GestureCategory::BasicNeeds,
            HelloWave | ByeWave | YesNod | NoShake | PleasePray | ThanksBow | YouPoint
            | MePoint | CallPhone => GestureCategory::Social,
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Etiqueta de gesto desconocida: {0}")]
pub struct UnknownLabel(pub String);

impl FromStr for GestureLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Resultado de clasificar un frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub gesture: Option<GestureLabel>,
    pub confidence: f32,
    pub word: Option<String>,
    /// Nombre de la regla de la cascada que produjo el gesto
    #[serde(skip)]
    pub rule: Option<&'static str>,
}

impl Classification {
    pub fn no_hand() -> Self {
        Self {
            gesture: None,
            confidence: 0.0,
            word: None,
            rule: None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.gesture.is_some()
    }
}
