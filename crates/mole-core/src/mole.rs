use crate::constants::{
    MOLE_BASE_SCALE_X, MOLE_HIDDEN_TRANSLATE_PCT, MOLE_MAX_LEVEL, MOLE_SCALE_X_SPAN,
    MOLE_SINK_MS, MOLE_WOBBLE_COUNT, MOLE_WOBBLE_DEG, MOLE_WOBBLE_GAP_MS, MOLE_WOBBLE_MS,
};

/// CSS-ready placement of the mole sprite: pushed down by `translate_y_pct`
/// of its height and stretched horizontally by `scale_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MolePose {
    pub translate_y_pct: f64,
    pub scale_x: f64,
}

impl MolePose {
    pub const HIDDEN: MolePose = MolePose {
        translate_y_pct: MOLE_HIDDEN_TRANSLATE_PCT,
        scale_x: MOLE_BASE_SCALE_X,
    };
}

/// Map a score (or `cm`) to the mole's pose; the mole is fully out at
/// `MOLE_MAX_LEVEL`.
pub fn mole_pose(level: f64) -> MolePose {
    let visible = if level.is_finite() {
        (level / MOLE_MAX_LEVEL).clamp(0.0, 1.0)
    } else {
        0.0
    };
    MolePose {
        translate_y_pct: MOLE_HIDDEN_TRANSLATE_PCT - visible * MOLE_HIDDEN_TRANSLATE_PCT,
        scale_x: MOLE_BASE_SCALE_X + visible * MOLE_SCALE_X_SPAN,
    }
}

/// One rendered frame of the mole: a pose plus a tilt about its base.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoleFrame {
    pub pose: MolePose,
    pub rotate_deg: f64,
}

impl MoleFrame {
    pub fn upright(pose: MolePose) -> Self {
        Self {
            pose,
            rotate_deg: 0.0,
        }
    }

    /// Value for the CSS `transform` property.
    pub fn css_transform(&self) -> String {
        let base = format!(
            "translateY({}%) scaleX({})",
            self.pose.translate_y_pct, self.pose.scale_x
        );
        if self.rotate_deg == 0.0 {
            base
        } else {
            format!("{} rotate({}deg)", base, self.rotate_deg)
        }
    }
}

#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = unit(t);
    1.0 - (1.0 - t).powi(3)
}

/// Symmetric ease, close to CSS `ease-in-out`.
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = unit(t);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn unit(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Tilt at `progress` through one wobble: left, upright, right, upright.
pub fn wobble_angle_deg(progress: f64) -> f64 {
    const KEYS: [f64; 4] = [-MOLE_WOBBLE_DEG, 0.0, MOLE_WOBBLE_DEG, 0.0];
    let segments = (KEYS.len() - 1) as f64;
    let x = ease_in_out(progress) * segments;
    let i = (x.floor() as usize).min(KEYS.len() - 2);
    lerp(KEYS[i], KEYS[i + 1], x - i as f64)
}

/// Pose `progress` of the way from `from` down to [`MolePose::HIDDEN`],
/// eased out.
pub fn sink_pose(from: MolePose, progress: f64) -> MolePose {
    let t = ease_out_cubic(progress);
    MolePose {
        translate_y_pct: lerp(from.translate_y_pct, MolePose::HIDDEN.translate_y_pct, t),
        scale_x: lerp(from.scale_x, MolePose::HIDDEN.scale_x, t),
    }
}

/// The mole's goodbye once a round is over: a few wobbles in place, then a
/// slow sink back into the hole. Time 0 is the first wobble.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndOfRoundAnimation {
    from: MolePose,
}

impl EndOfRoundAnimation {
    const WOBBLE_SLOT_MS: f64 = MOLE_WOBBLE_MS + MOLE_WOBBLE_GAP_MS;
    const SINK_START_MS: f64 = MOLE_WOBBLE_COUNT as f64 * Self::WOBBLE_SLOT_MS;

    pub fn new(from: MolePose) -> Self {
        Self { from }
    }

    pub fn duration_ms() -> f64 {
        Self::SINK_START_MS + MOLE_SINK_MS
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= Self::duration_ms()
    }

    pub fn frame_at(&self, elapsed_ms: f64) -> MoleFrame {
        if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
            return MoleFrame::upright(self.from);
        }
        if elapsed_ms >= Self::SINK_START_MS {
            let progress = (elapsed_ms - Self::SINK_START_MS) / MOLE_SINK_MS;
            return MoleFrame::upright(sink_pose(self.from, progress));
        }
        let into_slot = elapsed_ms % Self::WOBBLE_SLOT_MS;
        if into_slot >= MOLE_WOBBLE_MS {
            return MoleFrame::upright(self.from);
        }
        MoleFrame {
            pose: self.from,
            rotate_deg: wobble_angle_deg(into_slot / MOLE_WOBBLE_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_level_is_hidden() {
        assert_eq!(mole_pose(0.0), MolePose::HIDDEN);
        assert_eq!(mole_pose(-3.0), MolePose::HIDDEN);
    }

    #[test]
    fn full_level_and_beyond_saturate() {
        let full = mole_pose(10.0);
        assert!(full.translate_y_pct.abs() < 1e-12);
        assert!((full.scale_x - 1.3).abs() < 1e-12);
        assert_eq!(mole_pose(25.0), full);
    }

    #[test]
    fn halfway() {
        let p = mole_pose(5.0);
        assert!((p.translate_y_pct - 37.5).abs() < 1e-12);
        assert!((p.scale_x - 0.9).abs() < 1e-12);
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(close(ease_out_cubic(0.5), 0.875));
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_out_cubic(f64::NAN), 0.0);
        assert!(close(ease_in_out(0.5), 0.5));
    }

    #[test]
    fn wobble_swings_both_ways_and_settles() {
        assert!(close(wobble_angle_deg(0.0), -3.0));
        assert!(close(wobble_angle_deg(0.5), 1.5));
        assert!(close(wobble_angle_deg(1.0), 0.0));
        let peak = (0..=100)
            .map(|i| wobble_angle_deg(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak <= 3.0 + 1e-9 && peak > 2.9);
    }

    #[test]
    fn sink_eases_from_current_pose_to_hidden() {
        let from = mole_pose(10.0);
        assert_eq!(sink_pose(from, 0.0), from);
        assert_eq!(sink_pose(from, 1.0), MolePose::HIDDEN);
        let half = sink_pose(from, 0.5);
        // ease-out: 87.5% of the way there at half time
        assert!(close(half.translate_y_pct, 75.0 * 0.875));
        assert!(close(half.scale_x, 1.3 - 0.8 * 0.875));
    }

    #[test]
    fn end_of_round_timeline() {
        let from = mole_pose(4.0);
        let anim = EndOfRoundAnimation::new(from);
        assert_eq!(EndOfRoundAnimation::duration_ms(), 5500.0);

        // three wobbles, each followed by a rest
        for start in [0.0, 1000.0, 2000.0] {
            let f = anim.frame_at(start + 250.0);
            assert_eq!(f.pose, from);
            assert!(close(f.rotate_deg, 1.5));
            assert_eq!(anim.frame_at(start + 750.0), MoleFrame::upright(from));
        }
        assert_eq!(anim.frame_at(3000.0), MoleFrame::upright(from));
        let mid = anim.frame_at(4250.0);
        assert_eq!(mid.rotate_deg, 0.0);
        assert!(close(mid.pose.translate_y_pct, sink_pose(from, 0.5).translate_y_pct));

        assert!(!anim.is_finished(5499.0));
        assert!(anim.is_finished(5500.0));
        assert_eq!(anim.frame_at(9000.0), MoleFrame::upright(MolePose::HIDDEN));
    }

    #[test]
    fn css_transform_only_rotates_when_tilted() {
        let upright = MoleFrame::upright(MolePose::HIDDEN);
        assert_eq!(upright.css_transform(), "translateY(75%) scaleX(0.5)");
        let tilted = MoleFrame {
            pose: MolePose::HIDDEN,
            rotate_deg: -3.0,
        };
        assert_eq!(
            tilted.css_transform(),
            "translateY(75%) scaleX(0.5) rotate(-3deg)"
        );
    }
}
