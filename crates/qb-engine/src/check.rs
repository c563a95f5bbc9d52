//! Stat check resolution.

use qb_story::Check;

use crate::error::{EngineError, EngineResult};
use crate::stats::Stats;

/// Resolve a stat check from a 2d6 roll total: pass if the roll is at
/// or below the current value of the checked stat.
///
/// Only `roll = "2d6"` with `target = "stat"` is supported; anything
/// else is a configuration error, rejected loudly before resolution.
pub fn check_roll(stats: &Stats, check: &Check, roll: i32) -> EngineResult<bool> {
    if check.roll != "2d6" || check.target != "stat" {
        return Err(EngineError::UnsupportedCheck {
            roll: check.roll.clone(),
            target: check.target.clone(),
        });
    }
    Ok(roll <= stats.get(check.stat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qb_story::StatKind;

    fn check_on(stat: StatKind) -> Check {
        Check {
            stat,
            roll: "2d6".to_string(),
            target: "stat".to_string(),
        }
    }

    #[test]
    fn passes_at_or_below_stat() {
        let stats = Stats::starting(); // luck 7
        assert!(check_roll(&stats, &check_on(StatKind::Luck), 7).unwrap());
        assert!(check_roll(&stats, &check_on(StatKind::Luck), 2).unwrap());
        assert!(!check_roll(&stats, &check_on(StatKind::Luck), 8).unwrap());
    }

    #[test]
    fn checks_the_named_stat() {
        let stats = Stats {
            strength: 12,
            luck: 2,
            health: 5,
        };
        assert!(check_roll(&stats, &check_on(StatKind::Strength), 12).unwrap());
        assert!(!check_roll(&stats, &check_on(StatKind::Luck), 3).unwrap());
        assert!(check_roll(&stats, &check_on(StatKind::Health), 5).unwrap());
    }

    #[test]
    fn unsupported_roll_is_rejected() {
        let stats = Stats::starting();
        let mut bad = check_on(StatKind::Luck);
        bad.roll = "1d20".to_string();
        let err = check_roll(&stats, &bad, 7).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedCheck { .. }));
    }

    #[test]
    fn unsupported_target_is_rejected() {
        let stats = Stats::starting();
        let mut bad = check_on(StatKind::Luck);
        bad.target = "fixed".to_string();
        assert!(check_roll(&stats, &bad, 7).is_err());
    }
}
