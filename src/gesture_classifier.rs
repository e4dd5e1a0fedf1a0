//! Clasificador de gestos por cascada de reglas.
//!
//! La clasificación recorre dos pasadas ordenadas sobre [`HandFeatures`]:
//!
//! * la pasada específica prueba reglas de pose y posición una tras otra y
//!   se detiene en la primera que nombra un gesto;
//! * la pasada general se detiene en la primera regla cuya guarda de dedos
//!   coincide. Su resolvedor espacial decide solo: si no nombra nada, la
//!   cascada termina sin gesto.
//!
//! Varias reglas generales se solapan. Su orden forma parte del
//! comportamiento y algunas nunca ganan; [`GestureCascade::audit`] dice cuáles.

use crate::config::Thresholds;
use crate::feature_extractor::{FeatureExtractor, HandFeatures};
use crate::types::{
    Classification, FingerState, GestureLabel, HandDescriptor, Landmark, LandmarkError,
};
use crate::vocabulary::Vocabulary;
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};
use GestureLabel::*;

pub type Guard = fn(&FingerState) -> bool;
pub type Resolver = fn(&HandFeatures, &Thresholds) -> Option<GestureLabel>;

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub guard: Guard,
    pub resolve: Resolver,
    /// Todas las etiquetas que puede devolver `resolve`
    pub outcomes: &'static [GestureLabel],
}

impl Rule {
    pub fn new(
        name: &'static str,
        guard: Guard,
        resolve: Resolver,
        outcomes: &'static [GestureLabel],
    ) -> Self {
        Self {
            name,
            guard,
            resolve,
            outcomes,
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("outcomes", &self.outcomes)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// Se prueban reglas hasta que una resuelve un gesto
    FirstResolved,
    /// Decide la primera regla cuya guarda coincide
    FirstGuard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Specific,
    Base,
}

impl Tier {
    fn confidence(&self, thresholds: &Thresholds) -> f32 {
        match self {
            Tier::Specific => thresholds.specific_confidence,
            Tier::Base => thresholds.base_confidence,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RulePass {
    pub name: &'static str,
    pub mode: PassMode,
    pub tier: Tier,
    pub rules: Vec<Rule>,
}

/// Lo que decidió una pasada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Matched {
        label: GestureLabel,
        rule: &'static str,
    },
    /// La regla coincidió pero su resolvedor no nombró nada
    Stopped { rule: &'static str },
    NoMatch,
}

impl RulePass {
    pub fn evaluate(&self, features: &HandFeatures, thresholds: &Thresholds) -> PassOutcome {
        for rule in &self.rules {
            if !(rule.guard)(&features.fingers) {
                continue;
            }
            let resolved = (rule.resolve)(features, thresholds);
            trace!(pass = self.name, rule = rule.name, ?resolved, "guarda coincidente");

            match (resolved, self.mode) {
                (Some(label), _) => {
                    return PassOutcome::Matched {
                        label,
                        rule: rule.name,
                    }
                }
                (None, PassMode::FirstGuard) => return PassOutcome::Stopped { rule: rule.name },
                (None, PassMode::FirstResolved) => {}
            }
        }
        PassOutcome::NoMatch
    }
}

/// Gesto reconocido, antes de buscar su palabra
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recognition {
    pub label: GestureLabel,
    pub confidence: f32,
    pub rule: &'static str,
}

/// Qué reglas pueden ganar y qué etiquetas puede producir una cascada
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeAudit {
    /// Pares (pasada, regla) que nunca deciden el resultado
    pub unreachable_rules: Vec<(&'static str, &'static str)>,
    pub produced: BTreeSet<GestureLabel>,
}

#[derive(Debug, Clone)]
pub struct GestureCascade {
    passes: Vec<RulePass>,
}

impl Default for GestureCascade {
    fn default() -> Self {
        Self::new(vec![specific_pass(), general_pass()])
    }
}

impl GestureCascade {
    pub fn new(passes: Vec<RulePass>) -> Self {
        Self { passes }
    }

    pub fn passes(&self) -> &[RulePass] {
        &self.passes
    }

    pub fn evaluate(&self, features: &HandFeatures, thresholds: &Thresholds) -> Option<Recognition> {
        for pass in &self.passes {
            match pass.evaluate(features, thresholds) {
                PassOutcome::Matched { label, rule } => {
                    return Some(Recognition {
                        label,
                        confidence: pass.tier.confidence(thresholds),
                        rule,
                    })
                }
                PassOutcome::Stopped { rule } => {
                    debug!(pass = pass.name, rule, "cascada detenida sin gesto");
                    return None;
                }
                PassOutcome::NoMatch => {}
            }
        }
        None
    }

    /// Ejecuta la cascada sobre cada estado de dedos y una muestra de cada
    /// región en que los umbrales dividen el espacio de características.
    pub fn audit(&self, thresholds: &Thresholds) -> CascadeAudit {
        let xs = sample_axis(&thresholds.x_cuts());
        let ys = sample_axis(&thresholds.y_cuts());
        let pinches = [
            thresholds.ok_sign_distance / 2.0,
            thresholds.ok_sign_distance * 2.0,
        ];

        let mut deciding: BTreeSet<(&'static str, &'static str)> = BTreeSet::new();
        let mut produced = BTreeSet::new();

        for fingers in FingerState::all() {
            for &center_x in &xs {
                for &center_y in &ys {
                    for tilted in [false, true] {
                        for (thumb_above_mcp, thumb_above_ip) in
                            [(false, false), (false, true), (true, false), (true, true)]
                        {
                            for &pinch_distance in &pinches {
                                let features = HandFeatures {
                                    fingers,
                                    descriptor: HandDescriptor {
                                        tilted,
                                        fingers_up: true,
                                        center_x,
                                        center_y,
                                        thumb_position: Landmark::default(),
                                        index_position: Landmark::default(),
                                    },
                                    thumb_above_mcp,
                                    thumb_above_ip,
                                    pinch_distance,
                                };
                                self.record(&features, thresholds, &mut deciding, &mut produced);
                            }
                        }
                    }
                }
            }
        }

        let unreachable_rules = self
            .passes
            .iter()
            .flat_map(|pass| pass.rules.iter().map(move |rule| (pass.name, rule.name)))
            .filter(|key| !deciding.contains(key))
            .collect();

        CascadeAudit {
            unreachable_rules,
            produced,
        }
    }

    fn record(
        &self,
        features: &HandFeatures,
        thresholds: &Thresholds,
        deciding: &mut BTreeSet<(&'static str, &'static str)>,
        produced: &mut BTreeSet<GestureLabel>,
    ) {
        for pass in &self.passes {
            match pass.evaluate(features, thresholds) {
                PassOutcome::Matched { label, rule } => {
                    deciding.insert((pass.name, rule));
                    produced.insert(label);
                    return;
                }
                PassOutcome::Stopped { rule } => {
                    deciding.insert((pass.name, rule));
                    return;
                }
                PassOutcome::NoMatch => {}
            }
        }
    }
}

/// Los puntos de corte más un valor dentro de cada intervalo
fn sample_axis(cuts: &[f64]) -> Vec<f64> {
    let mut bounds: Vec<f64> = cuts.iter().copied().filter(|c| c.is_finite()).collect();
    bounds.push(0.0);
    bounds.push(1.0);
    bounds.sort_by(f64::total_cmp);
    bounds.dedup();

    let mut samples = bounds.clone();
    samples.extend(bounds.windows(2).map(|w| (w[0] + w[1]) / 2.0));
    samples.sort_by(f64::total_cmp);
    samples
}

// ========== Tablas de reglas ==========

fn specific_pass() -> RulePass {
    RulePass {
        name: "specific",
        mode: PassMode::FirstResolved,
        tier: Tier::Specific,
        rules: vec![
            Rule::new(
                "prayer",
                |f| f.count() == 5,
                |h, t| {
                    let x = h.descriptor.center_x;
                    (x > t.center_min && x < t.center_max && !h.descriptor.tilted)
                        .then_some(PleasePray)
                },
                &[PleasePray],
            ),
            Rule::new(
                "tired",
                |f| f.count() == 3 && f.thumb && f.index && f.middle,
                |h, t| (h.descriptor.center_y < t.face_level).then_some(TiredRub),
                &[TiredRub],
            ),
            Rule::new(
                "eat",
                |f| f.count() == 3 && !f.thumb,
                |h, t| {
                    let d = &h.descriptor;
                    (d.center_y < t.face_level && d.center_x > t.center_min).then_some(EatMouth)
                },
                &[EatMouth],
            ),
            Rule::new(
                "pointing",
                |f| f.count() == 1 && f.index,
                |h, t| {
                    let x = h.descriptor.center_x;
                    if x < t.left_edge {
                        Some(MePoint)
                    } else if x > t.right_edge {
                        Some(YouPoint)
                    } else {
                        None
                    }
                },
                &[MePoint, YouPoint],
            ),
            Rule::new(
                "yes",
                |f| f.count() == 1 && f.thumb,
                |h, _| h.thumb_above_mcp.then_some(YesNod),
                &[YesNod],
            ),
            Rule::new(
                "no",
                |f| f.count() == 1 && f.index,
                |h, _| h.descriptor.tilted.then_some(NoShake),
                &[NoShake],
            ),
        ],
    }
}

fn general_pass() -> RulePass {
    RulePass {
        name: "general",
        mode: PassMode::FirstGuard,
        tier: Tier::Base,
        rules: vec![
            // Conteo
            Rule::new("zero", |f| f.count() == 0, |_, _| Some(Zero), &[Zero]),
            Rule::new(
                "one",
                |f| f.count() == 1 && f.index && !f.thumb,
                |_, _| Some(One),
                &[One],
            ),
            Rule::new(
                "peace",
                |f| f.count() == 2 && f.index && f.middle && !f.thumb,
                |_, _| Some(Peace),
                &[Peace],
            ),
            Rule::new(
                "two",
                |f| f.count() == 2 && f.index && f.middle,
                |_, _| Some(Two),
                &[Two],
            ),
            Rule::new(
                "three",
                |f| f.count() == 3 && f.index && f.middle && f.ring && !f.thumb,
                |_, _| Some(Three),
                &[Three],
            ),
            Rule::new(
                "four",
                |f| f.count() == 4 && !f.thumb,
                |_, _| Some(Four),
                &[Four],
            ),
            Rule::new("five", |f| f.count() == 5, |_, _| Some(Five), &[Five]),
            // Formas
            Rule::new(
                "ok_circle",
                |f| f.count() == 2 && f.thumb && f.index,
                |h, t| (h.pinch_distance < t.ok_sign_distance).then_some(OkSign),
                &[OkSign],
            ),
            Rule::new(
                "thumb_direction",
                |f| f.count() == 1 && f.thumb && !f.index,
                |h, _| Some(if h.thumb_above_ip { ThumbsUp } else { ThumbsDown }),
                &[ThumbsUp, ThumbsDown],
            ),
            Rule::new(
                "love",
                |f| f.count() == 2 && f.index && f.pinky && !f.thumb,
                |_, _| Some(LoveSign),
                &[LoveSign],
            ),
            // Según posición
            Rule::new(
                "open_palm_with_thumb",
                |f| f.count() == 5 && f.thumb,
                |h, t| {
                    let d = &h.descriptor;
                    Some(if d.center_y < t.raised_level {
                        HappyPalm
                    } else if d.center_x < t.left_edge {
                        HelpWave
                    } else if d.center_x > t.right_edge {
                        ByeWave
                    } else {
                        HelloWave
                    })
                },
                &[HappyPalm, HelpWave, ByeWave, HelloWave],
            ),
            Rule::new(
                "closed_fist",
                |f| f.count() == 0,
                |h, t| {
                    Some(if h.descriptor.center_y > t.dropped_level {
                        SadFist
                    } else {
                        ColdShiver
                    })
                },
                &[SadFist, ColdShiver],
            ),
            Rule::new(
                "open_palm_without_thumb",
                |f| f.count() == 5 && !f.thumb,
                |h, t| {
                    Some(if h.descriptor.center_x > t.right_side {
                        StopPalm
                    } else {
                        HelpWave
                    })
                },
                &[StopPalm, HelpWave],
            ),
            Rule::new(
                "three_with_thumb",
                |f| f.count() == 3 && f.thumb && f.index && f.middle,
                |h, t| {
                    Some(if h.descriptor.center_y < t.face_level {
                        DrinkCup
                    } else {
                        GratefulBow
                    })
                },
                &[DrinkCup, GratefulBow],
            ),
            Rule::new(
                "index_position",
                |f| f.count() == 1 && f.index,
                |h, t| {
                    let d = &h.descriptor;
                    Some(if d.center_y < t.raised_level {
                        WorriedForehead
                    } else if d.center_x > t.right_side {
                        YouPoint
                    } else {
                        BathroomUrgent
                    })
                },
                &[WorriedForehead, YouPoint, BathroomUrgent],
            ),
            Rule::new(
                "call",
                |f| f.count() == 2 && f.thumb && f.pinky,
                |_, _| Some(CallPhone),
                &[CallPhone],
            ),
            Rule::new(
                "four_with_thumb",
                |f| f.count() == 4 && f.thumb,
                |h, t| {
                    Some(if h.descriptor.center_y > t.lowered_level {
                        HotFan
                    } else {
                        SleepHead
                    })
                },
                &[HotFan, SleepHead],
            ),
        ],
    }
}

// ========== Clasificador ==========

/// Cobertura de etiquetas de un clasificador frente a su vocabulario
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub cascade: CascadeAudit,
    /// Etiquetas del vocabulario que ninguna entrada produce
    pub orphaned_labels: Vec<GestureLabel>,
}

impl CoverageReport {
    pub fn orphaned_words<'a>(&self, vocabulary: &'a Vocabulary) -> Vec<&'a str> {
        self.orphaned_labels
            .iter()
            .map(|&label| vocabulary.word(label))
            .collect()
    }
}

/// Entran landmarks, salen gesto y palabra. Sin estado entre frames.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    extractor: FeatureExtractor,
    cascade: GestureCascade,
    vocabulary: Vocabulary,
}

impl GestureClassifier {
    pub fn new(thresholds: Thresholds, vocabulary: Vocabulary) -> Self {
        Self {
            extractor: FeatureExtractor::new(thresholds),
            cascade: GestureCascade::default(),
            vocabulary,
        }
    }

    pub fn with_cascade(mut self, cascade: GestureCascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        self.extractor.thresholds()
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn cascade(&self) -> &GestureCascade {
        &self.cascade
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Nunca falla: una entrada inválida o ausente cuenta como "sin mano"
    pub fn classify(&self, landmarks: &[Landmark]) -> Classification {
        if landmarks.is_empty() {
            trace!("sin mano en el frame");
            return Classification::no_hand();
        }

        let features = match self.extractor.extract(landmarks) {
            Ok(features) => features,
            Err(e @ LandmarkError::NonFinite { .. }) => {
                warn!("landmarks rechazados: {}", e);
                return Classification::no_hand();
            }
            Err(e) => {
                debug!("landmarks rechazados: {}", e);
                return Classification::no_hand();
            }
        };

        match self.recognize(&features) {
            Some(recognition) => {
                let word = self.vocabulary.word(recognition.label).to_string();
                debug!(
                    gesture = %recognition.label,
                    rule = recognition.rule,
                    confidence = recognition.confidence,
                    %word,
                    "gesto reconocido"
                );
                Classification {
                    gesture: Some(recognition.label),
                    confidence: recognition.confidence,
                    word: Some(word),
                    rule: Some(recognition.rule),
                }
            }
            None => {
                debug!(fingers = %features.fingers, "ninguna regla coincidió");
                Classification::no_hand()
            }
        }
    }

    pub fn recognize(&self, features: &HandFeatures) -> Option<Recognition> {
        self.cascade.evaluate(features, self.extractor.thresholds())
    }

    pub fn audit(&self) -> CoverageReport {
        let cascade = self.cascade.audit(self.extractor.thresholds());
        let orphaned_labels = self
            .vocabulary
            .entries()
            .map(|(label, _)| label)
            .filter(|label| !cascade.produced.contains(label))
            .collect();

        CoverageReport {
            cascade,
            orphaned_labels,
        }
    }
}
