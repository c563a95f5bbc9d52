//! Additive, clamped stat effects.

use qb_story::Effect;

use crate::stats::Stats;

/// The only effect operation the engine applies.
const OP_ADD: &str = "add";

/// Apply a list of effects to the stats, in order.
///
/// Each `add` effect adds its delta, clamps to the effect's own
/// `clamp_min`/`clamp_max` when provided, then clamps again to the
/// global bounds for the stat. Story authors may under-specify bounds;
/// the second clamp keeps the global invariants intact regardless.
/// Effects with any other operation are skipped.
pub fn apply_effects(stats: &mut Stats, effects: &[Effect]) {
    for effect in effects {
        if effect.op != OP_ADD {
            continue;
        }
        let mut value = stats.get(effect.stat) + effect.value;
        if let Some(max) = effect.clamp_max {
            value = value.min(max);
        }
        if let Some(min) = effect.clamp_min {
            value = value.max(min);
        }
        stats.set(effect.stat, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{MAX_STAT, MIN_STAT};
    use qb_story::StatKind;

    fn add(stat: StatKind, value: i32) -> Effect {
        Effect {
            op: "add".to_string(),
            stat,
            value,
            clamp_min: None,
            clamp_max: None,
        }
    }

    #[test]
    fn adds_deltas_in_order() {
        let mut stats = Stats::starting();
        apply_effects(
            &mut stats,
            &[add(StatKind::Health, -2), add(StatKind::Strength, 1)],
        );
        assert_eq!(stats.health, 10);
        assert_eq!(stats.strength, 8);
    }

    #[test]
    fn per_effect_clamp_applies_before_global() {
        let mut stats = Stats::starting();
        let mut healing = add(StatKind::Health, 20);
        healing.clamp_max = Some(14);
        apply_effects(&mut stats, &[healing]);
        assert_eq!(stats.health, 14);
    }

    #[test]
    fn global_bounds_override_story_clamps() {
        let mut stats = Stats::starting();
        let mut boost = add(StatKind::Strength, 30);
        boost.clamp_max = Some(99);
        apply_effects(&mut stats, &[boost]);
        assert_eq!(stats.strength, MAX_STAT);

        let mut drain = add(StatKind::Luck, -30);
        drain.clamp_min = Some(-10);
        apply_effects(&mut stats, &[drain]);
        assert_eq!(stats.luck, MIN_STAT);
    }

    #[test]
    fn health_floors_at_zero() {
        let mut stats = Stats::starting();
        stats.health = 3;
        apply_effects(&mut stats, &[add(StatKind::Health, -999)]);
        assert_eq!(stats.health, 0);
        assert!(stats.is_dead());
    }

    #[test]
    fn unknown_op_is_skipped() {
        let mut stats = Stats::starting();
        let mut multiply = add(StatKind::Health, -5);
        multiply.op = "multiply".to_string();
        apply_effects(&mut stats, &[multiply]);
        assert_eq!(stats.health, 12);
    }

    #[test]
    fn clamp_min_wins_over_clamp_max() {
        // Mirrors the resolution order: max first, then min.
        let mut stats = Stats::starting();
        stats.health = 5;
        let mut odd = add(StatKind::Health, 0);
        odd.clamp_min = Some(8);
        odd.clamp_max = Some(6);
        apply_effects(&mut stats, &[odd]);
        assert_eq!(stats.health, 8);
    }
}
