//! Levels and experience

use crate::core::{LevelUpBonus, ProgressionConfig, Signal};

use super::PlayerStats;

/// Experience pair published after every grant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceProgress {
    /// Experience carried into the current level
    pub current: f32,
    /// Experience needed to reach the next level
    pub required: f32,
}

/// Level and experience of the player.
///
/// The curve is fixed at construction: reaching level `n + 1` from level `n`
/// costs `base_experience * growth_factor^(n - 1)`.
#[derive(Debug)]
pub struct PlayerProgression {
    level: u32,
    experience: f32,
    base_experience: f32,
    growth_factor: f32,
    bonus: LevelUpBonus,

    /// Fired with the new level, once per level gained
    pub on_level_up: Signal<u32>,
    /// Fired once after every grant has settled
    pub on_experience_changed: Signal<ExperienceProgress>,
}

impl PlayerProgression {
    /// Start at level 1 with no experience. The curve is sanitized first.
    #[must_use]
    pub fn new(config: &ProgressionConfig) -> Self {
        let config = config.sanitized();
        Self {
            level: 1,
            experience: 0.0,
            base_experience: config.base_experience,
            growth_factor: config.growth_factor,
            bonus: config.level_up_bonus,
            on_level_up: Signal::new(),
            on_experience_changed: Signal::new(),
        }
    }

    /// Experience needed to leave the current level
    #[must_use]
    pub fn required_for_next_level(&self) -> f32 {
        let power = self.level.saturating_sub(1);
        self.base_experience * self.growth_factor.powi(power as i32)
    }

    /// Grant experience, levelling up as many times as it pays for.
    ///
    /// Each level gained fires `on_level_up` and applies the configured bonus
    /// to `stats`; `on_experience_changed` fires once at the end. Non-positive
    /// and non-finite amounts are ignored.
    pub fn add_experience(&mut self, amount: f32, mut stats: Option<&mut PlayerStats>) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }

        let total = self.experience + amount;
        if !total.is_finite() {
            log::warn!("PlayerProgression: experience grant of {amount} overflows, ignored");
            return;
        }
        self.experience = total;

        let mut leveled_up = false;
        loop {
            let required = self.required_for_next_level();
            if !required.is_finite() || self.experience < required || self.level == u32::MAX {
                break;
            }

            // Below f32 precision the subtraction makes no progress; a flat
            // curve would then never settle
            let remaining = self.experience - required;
            if remaining == self.experience && self.growth_factor <= 1.0 {
                break;
            }

            self.experience = remaining;
            self.level += 1;
            leveled_up = true;

            let level = self.level;
            self.on_level_up.emit(&level);
            if let Some(stats) = stats.as_deref_mut() {
                stats.apply_level_up_bonuses(self.bonus.health, self.bonus.mana);
            }
        }

        let progress = self.progress();
        self.on_experience_changed.emit(&progress);

        if leveled_up {
            log::info!(
                "New level: {}, experience: {}/{}",
                self.level,
                progress.current,
                progress.required
            );
        }
    }

    /// Re-publish the current experience pair, e.g. for a freshly bound UI
    pub fn publish(&mut self) {
        let progress = self.progress();
        self.on_experience_changed.emit(&progress);
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn experience(&self) -> f32 {
        self.experience
    }

    /// Current experience against the next requirement
    #[must_use]
    pub fn progress(&self) -> ExperienceProgress {
        ExperienceProgress {
            current: self.experience,
            required: self.required_for_next_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn progression(base: f32, growth: f32) -> PlayerProgression {
        PlayerProgression::new(&ProgressionConfig {
            base_experience: base,
            growth_factor: growth,
            ..Default::default()
        })
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Level(u32),
        Experience(f32, f32),
    }

    fn record(progression: &mut PlayerProgression) -> Rc<RefCell<Vec<Seen>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let levels = Rc::clone(&log);
        progression
            .on_level_up
            .subscribe(move |level| levels.borrow_mut().push(Seen::Level(*level)));
        let experience = Rc::clone(&log);
        progression.on_experience_changed.subscribe(move |p| {
            experience
                .borrow_mut()
                .push(Seen::Experience(p.current, p.required))
        });
        log
    }

    #[test]
    fn test_required_experience_curve() {
        let mut progression = progression(100.0, 1.5);
        assert_eq!(progression.required_for_next_level(), 100.0);

        progression.add_experience(100.0, None);
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.required_for_next_level(), 150.0);

        progression.add_experience(150.0, None);
        assert_eq!(progression.level(), 3);
        assert_eq!(progression.required_for_next_level(), 225.0);
    }

    #[test]
    fn test_non_positive_grants_are_ignored() {
        let mut progression = progression(100.0, 1.5);
        let log = record(&mut progression);

        progression.add_experience(0.0, None);
        progression.add_experience(-50.0, None);

        assert_eq!(progression.experience(), 0.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_non_finite_grant_is_ignored() {
        let mut progression = progression(100.0, 1.5);
        let log = record(&mut progression);

        progression.add_experience(f32::INFINITY, None);
        progression.add_experience(f32::NAN, None);
        progression.add_experience(f32::NEG_INFINITY, None);

        assert_eq!(progression.level(), 1);
        assert_eq!(progression.experience(), 0.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_huge_grant_settles() {
        let mut progression = progression(100.0, 1.5);

        progression.add_experience(1e30, None);

        assert!(progression.level() > 1);
        assert!(progression.experience().is_finite());
        assert!(progression.experience() < progression.required_for_next_level());
    }

    #[test]
    fn test_flat_curve_grant_beyond_precision_terminates() {
        let mut progression = progression(1.0, 1.0);

        progression.add_experience(1e9, None);

        assert!(progression.experience().is_finite());
        assert_eq!(progression.required_for_next_level(), 1.0);
    }

    #[test]
    fn test_degenerate_curve_is_sanitized() {
        let mut shrinking = progression(-10.0, 0.5);
        assert_eq!(shrinking.required_for_next_level(), 100.0);

        shrinking.add_experience(250.0, None);

        // growth clamped to 1: 100 per level
        assert_eq!(shrinking.level(), 3);
        assert_eq!(shrinking.experience(), 50.0);
        assert!(shrinking.experience() < shrinking.required_for_next_level());

        let mut not_a_number = progression(f32::NAN, f32::NAN);
        not_a_number.add_experience(100.0, None);
        assert_eq!(not_a_number.level(), 2);
        assert_eq!(not_a_number.required_for_next_level(), 150.0);
    }

    #[test]
    fn test_partial_grant_keeps_level() {
        let mut progression = progression(100.0, 1.5);
        let log = record(&mut progression);

        progression.add_experience(40.0, None);

        assert_eq!(progression.level(), 1);
        assert_eq!(*log.borrow(), vec![Seen::Experience(40.0, 100.0)]);
    }

    #[test]
    fn test_large_grant_levels_up_repeatedly() {
        let mut progression = progression(100.0, 1.5);
        let log = record(&mut progression);

        progression.add_experience(250.0, None);

        assert_eq!(progression.level(), 3);
        assert_eq!(progression.experience(), 0.0);
        assert_eq!(
            *log.borrow(),
            vec![
                Seen::Level(2),
                Seen::Level(3),
                Seen::Experience(0.0, 225.0)
            ]
        );
    }

    #[test]
    fn test_remainder_stays_below_requirement() {
        let mut progression = progression(10.0, 2.0);

        progression.add_experience(1000.0, None);

        // 10 + 20 + 40 + 80 + 160 + 320 = 630, next step costs 640
        assert_eq!(progression.level(), 7);
        assert_eq!(progression.experience(), 370.0);
        assert!(progression.experience() < progression.required_for_next_level());
    }

    #[test]
    fn test_level_up_grants_bonus_to_stats() {
        let mut stats = PlayerStats::new();
        stats.initialize(Some(&PlayerConfig {
            max_health: 100.0,
            max_mana: 10.0,
            ..Default::default()
        }));
        let mut progression = progression(100.0, 1.5);

        progression.add_experience(250.0, Some(&mut stats));

        assert_eq!(stats.max_health(), 120.0);
        assert_eq!(stats.health(), 120.0);
        assert_eq!(stats.max_mana(), 20.0);
        assert_eq!(stats.mana(), 20.0);
    }

    #[test]
    fn test_publish_reports_current_progress() {
        let mut progression = progression(100.0, 1.5);
        let log = record(&mut progression);

        progression.publish();

        assert_eq!(*log.borrow(), vec![Seen::Experience(0.0, 100.0)]);
    }
}
