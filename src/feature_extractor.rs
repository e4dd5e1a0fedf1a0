use crate::config::Thresholds;
use crate::types::{
    FingerState, Hand, HandDescriptor, Landmark, LandmarkError, INDEX_MCP, INDEX_PIP, INDEX_TIP,
    MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_MCP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Todo lo que la cascada de gestos lee de una mano
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    pub fingers: FingerState,
    pub descriptor: HandDescriptor,
    /// Punta del pulgar por encima de su MCP
    pub thumb_above_mcp: bool,
    /// Punta del pulgar por encima de su IP
    pub thumb_above_ip: bool,
    /// Distancia plana entre las puntas del pulgar y del índice
    pub pinch_distance: f64,
}

impl HandFeatures {
    pub fn num_extended(&self) -> usize {
        self.fingers.count()
    }
}

/// Deriva la extensión de los dedos y el contexto espacial de los landmarks
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    thresholds: Thresholds,
}

impl FeatureExtractor {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Falla si la entrada no es una mano de 21 puntos
    pub fn extract(&self, landmarks: &[Landmark]) -> Result<HandFeatures, LandmarkError> {
        let hand = Hand::from_landmarks(landmarks)?;
        Ok(self.extract_hand(&hand))
    }

    pub fn extract_hand(&self, hand: &Hand) -> HandFeatures {
        let thumb_tip = hand.point(THUMB_TIP);

        HandFeatures {
            fingers: self.finger_state(hand),
            descriptor: self.describe(hand),
            thumb_above_mcp: thumb_tip.y < hand.point(THUMB_MCP).y,
            thumb_above_ip: thumb_tip.y < hand.point(THUMB_IP).y,
            pinch_distance: thumb_tip.planar_distance(hand.point(INDEX_TIP)),
        }
    }

    pub fn finger_state(&self, hand: &Hand) -> FingerState {
        FingerState {
            thumb: Self::thumb_extended(hand),
            index: Self::finger_extended(hand, INDEX_TIP, INDEX_PIP, INDEX_MCP),
            middle: Self::finger_extended(hand, MIDDLE_TIP, MIDDLE_PIP, MIDDLE_MCP),
            ring: Self::finger_extended(hand, RING_TIP, RING_PIP, RING_MCP),
            pinky: Self::finger_extended(hand, PINKY_TIP, PINKY_PIP, PINKY_MCP),
        }
    }

    pub fn describe(&self, hand: &Hand) -> HandDescriptor {
        let wrist = hand.point(WRIST);
        let middle_tip = hand.point(MIDDLE_TIP);

        HandDescriptor {
            tilted: (f64::from(middle_tip.x) - f64::from(wrist.x)).abs() > self.thresholds.tilt,
            fingers_up: middle_tip.y < wrist.y,
            center_x: f64::from(wrist.x),
            center_y: f64::from(wrist.y),
            thumb_position: *hand.point(THUMB_TIP),
            index_position: *hand.point(INDEX_TIP),
        }
    }

    /// Punta sobre PIP sobre MCP. Solo vale para una mano vertical.
    fn finger_extended(hand: &Hand, tip: usize, pip: usize, mcp: usize) -> bool {
        let (tip, pip, mcp) = (hand.point(tip), hand.point(pip), hand.point(mcp));
        tip.y < pip.y && pip.y < mcp.y
    }

    /// El pulgar se dobla de lado: se compara su alcance desde la muñeca
    fn thumb_extended(hand: &Hand) -> bool {
        let wrist = hand.point(WRIST);
        let tip_distance = hand.point(THUMB_TIP).planar_distance(wrist);
        let ip_distance = hand.point(THUMB_IP).planar_distance(wrist);
        tip_distance > ip_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{HandBuilder, ThumbPose};
    use crate::types::LANDMARK_COUNT;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::default()
    }

    #[test]
    fn test_rejects_short_input() {
        let points = vec![Landmark::new(0.5, 0.5, 0.0); 5];
        assert!(extractor().extract(&points).is_err());
        assert!(extractor().extract(&[]).is_err());
    }

    #[test]
    fn test_fist_has_no_extended_fingers() {
        let features = extractor().extract(&HandBuilder::new(0.5, 0.5).build()).unwrap();
        assert_eq!(features.fingers, FingerState::default());
        assert_eq!(features.num_extended(), 0);
    }

    #[test]
    fn test_open_hand_all_extended() {
        let points = HandBuilder::new(0.5, 0.5)
            .fingers(&["index", "middle", "ring", "pinky"])
            .thumb(ThumbPose::Up)
            .build();
        let features = extractor().extract(&points).unwrap();
        assert_eq!(features.fingers, FingerState::new(true, true, true, true, true));
        assert!(features.descriptor.fingers_up);
        assert!(!features.descriptor.tilted);
    }

    #[test]
    fn test_finger_requires_strict_ordering() {
        // la punta a la altura del PIP no cuenta
        let points = HandBuilder::new(0.5, 0.5)
            .fingers(&["index"])
            .at(INDEX_TIP, -0.03, -0.15)
            .build();
        let features = extractor().extract(&points).unwrap();
        assert!(!features.fingers.index);
    }

    #[test]
    fn test_inverted_hand_reads_as_curled() {
        let mut points = HandBuilder::new(0.5, 0.5)
            .fingers(&["index", "middle", "ring", "pinky"])
            .build();
        for p in points.iter_mut() {
            p.y = 1.0 - p.y;
        }
        let features = extractor().extract(&points).unwrap();
        assert!(!features.fingers.index && !features.fingers.middle);
        assert!(!features.descriptor.fingers_up);
    }

    #[test]
    fn test_descriptor_uses_wrist_position() {
        let points = HandBuilder::new(0.25, 0.75).tilted().build();
        let d = extractor().extract(&points).unwrap().descriptor;
        assert_eq!(d.center_x, 0.25);
        assert_eq!(d.center_y, 0.75);
        assert!(d.tilted);
        assert_eq!(d.thumb_position, points[THUMB_TIP]);
        assert_eq!(d.index_position, points[INDEX_TIP]);
    }

    #[test]
    fn test_tilt_threshold_is_configurable() {
        let points = HandBuilder::new(0.5, 0.5).tilted().build();
        let loose = FeatureExtractor::new(Thresholds {
            tilt: 0.5,
            ..Thresholds::default()
        });
        assert!(!loose.extract(&points).unwrap().descriptor.tilted);
    }

    #[test]
    fn test_thumb_flags() {
        let up = extractor()
            .extract(&HandBuilder::new(0.5, 0.5).thumb(ThumbPose::Up).build())
            .unwrap();
        assert!(up.fingers.thumb && up.thumb_above_mcp && up.thumb_above_ip);

        let down = extractor()
            .extract(&HandBuilder::new(0.5, 0.5).thumb(ThumbPose::Down).build())
            .unwrap();
        assert!(down.fingers.thumb && !down.thumb_above_mcp && !down.thumb_above_ip);

        let level = extractor()
            .extract(&HandBuilder::new(0.5, 0.5).thumb(ThumbPose::Level).build())
            .unwrap();
        assert!(level.fingers.thumb && !level.thumb_above_mcp && level.thumb_above_ip);
    }

    #[test]
    fn test_builder_produces_full_hand() {
        assert_eq!(HandBuilder::new(0.5, 0.5).build().len(), LANDMARK_COUNT);
    }
}
