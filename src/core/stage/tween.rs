//=========================================================================
// Tweens
//=========================================================================
//
// Time-interpolated property animation on stage objects.
//
// A tween waits out its delay, captures the property's current value as
// its start, then eases towards the target over its duration. Tweens
// whose target disappears are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{ObjectId, Stage};

//=== Types ===============================================================

/// Animatable object property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    X,
    Y,
    Alpha,
    ScaleX,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicOut,
}

impl Easing {
    /// Maps linear progress `t ∈ [0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

#[derive(Debug, Clone)]
struct Tween {
    id: TweenId,
    target: ObjectId,
    property: Property,
    from: Option<f32>,
    to: f32,
    duration: Duration,
    delay: Duration,
    elapsed: Duration,
    easing: Easing,
}

//=== TweenManager ========================================================

#[derive(Debug, Default)]
pub struct TweenManager {
    tweens: Vec<Tween>,
    next_id: u64,
}

impl TweenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animates `property` of `target` to `to`, starting after `delay`.
    pub fn to(
        &mut self,
        target: ObjectId,
        property: Property,
        to: f32,
        duration: Duration,
        easing: Easing,
        delay: Duration,
    ) -> TweenId {
        self.next_id += 1;
        let id = TweenId(self.next_id);
        self.tweens.push(Tween {
            id,
            target,
            property,
            from: None,
            to,
            duration,
            delay,
            elapsed: Duration::ZERO,
            easing,
        });
        id
    }

    /// Advances every tween by `dt` and writes values to the stage.
    pub fn update(&mut self, dt: Duration, stage: &mut Stage) {
        self.tweens.retain_mut(|tween| {
            tween.elapsed += dt;
            if tween.elapsed < tween.delay {
                return true;
            }

            let Some(from) = tween.from.or_else(|| stage.property(tween.target, tween.property)) else {
                trace!(target: "ui", "Tween {:?} target gone", tween.id);
                return false;
            };
            tween.from = Some(from);

            let running = tween.elapsed - tween.delay;
            let t = if tween.duration.is_zero() {
                1.0
            } else {
                (running.as_secs_f32() / tween.duration.as_secs_f32()).min(1.0)
            };

            let value = from + (tween.to - from) * tween.easing.apply(t);
            stage.set_property(tween.target, tween.property, value) && t < 1.0
        });
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
