//! Manos sintéticas en posición vertical para tests.

use crate::types::{
    Landmark, INDEX_DIP, INDEX_MCP, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_DIP, MIDDLE_MCP,
    MIDDLE_PIP, MIDDLE_TIP, PINKY_DIP, PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_DIP, RING_MCP,
    RING_PIP, RING_TIP, THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbPose {
    /// Doblado sobre la palma
    Curled,
    /// Extendido, punta por encima del MCP
    Up,
    /// Extendido, punta por debajo de la muñeca
    Down,
    /// Extendido, punta sobre el IP pero bajo el MCP
    Level,
}

/// (nombre, desplazamiento x, [mcp, pip, dip, tip])
const FINGERS: [(&str, f32, [usize; 4]); 4] = [
    ("index", -0.03, [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP]),
    ("middle", 0.0, [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP]),
    ("ring", 0.03, [RING_MCP, RING_PIP, RING_DIP, RING_TIP]),
    ("pinky", 0.06, [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP]),
];

pub struct HandBuilder {
    wrist: (f32, f32),
    extended: Vec<&'static str>,
    thumb: ThumbPose,
    tilted: bool,
    overrides: Vec<(usize, f32, f32)>,
}

impl HandBuilder {
    pub fn new(wrist_x: f32, wrist_y: f32) -> Self {
        Self {
            wrist: (wrist_x, wrist_y),
            extended: Vec::new(),
            thumb: ThumbPose::Curled,
            tilted: false,
            overrides: Vec::new(),
        }
    }

    pub fn fingers(mut self, names: &[&'static str]) -> Self {
        self.extended.extend_from_slice(names);
        self
    }

    pub fn thumb(mut self, pose: ThumbPose) -> Self {
        self.thumb = pose;
        self
    }

    /// Desplaza la punta del dedo medio más allá del umbral de inclinación
    pub fn tilted(mut self) -> Self {
        self.tilted = true;
        self
    }

    /// Coloca un landmark con un desplazamiento desde la muñeca
    pub fn at(mut self, index: usize, dx: f32, dy: f32) -> Self {
        self.overrides.push((index, dx, dy));
        self
    }

    pub fn build(&self) -> Vec<Landmark> {
        let (wx, wy) = self.wrist;
        let p = |dx: f32, dy: f32| Landmark::new(wx + dx, wy + dy, 0.0);
        let mut points = vec![p(0.0, 0.0); LANDMARK_COUNT];

        points[WRIST] = p(0.0, 0.0);
        points[THUMB_CMC] = p(-0.03, -0.01);
        points[THUMB_MCP] = p(-0.05, -0.03);
        points[THUMB_IP] = p(-0.08, -0.05);
        points[THUMB_TIP] = match self.thumb {
            ThumbPose::Curled => p(-0.03, -0.02),
            ThumbPose::Up => p(-0.12, -0.08),
            ThumbPose::Down => p(-0.15, 0.05),
            ThumbPose::Level => {
                points[THUMB_MCP] = p(-0.05, -0.10);
                p(-0.12, -0.07)
            }
        };

        for (name, dx, [mcp, pip, dip, tip]) in FINGERS {
            points[mcp] = p(dx, -0.10);
            points[pip] = p(dx, -0.15);
            if self.extended.contains(&name) {
                points[dip] = p(dx, -0.18);
                points[tip] = p(dx, -0.20);
            } else {
                points[dip] = p(dx, -0.11);
                points[tip] = p(dx, -0.08);
            }
        }

        if self.tilted {
            points[MIDDLE_TIP].x += 0.15;
        }

        for &(index, dx, dy) in &self.overrides {
            points[index] = p(dx, dy);
        }

        points
    }
}
