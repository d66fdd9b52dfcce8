//! Health and mana

use crate::core::{PlayerConfig, Signal};

/// Tolerance below which a mana delta counts as zero
const MANA_EPSILON: f32 = 1e-6;

/// A `(current, max)` pair published on every change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub current: f32,
    pub max: f32,
}

/// Health and mana of one living entity.
///
/// All mutation goes through the methods below; presentation code listens on
/// the public signals. Without a configuration the component is inert.
#[derive(Debug, Default)]
pub struct PlayerStats {
    initialized: bool,
    max_health: f32,
    max_mana: f32,
    health: f32,
    mana: f32,
    death_reported: bool,

    /// Fired with the new health after every change
    pub on_health_changed: Signal<Gauge>,
    /// Fired with the new mana after every change
    pub on_mana_changed: Signal<Gauge>,
    /// Fired once when health reaches zero
    pub on_death: Signal<()>,
}

impl PlayerStats {
    /// Create inert stats; call [`initialize`](Self::initialize) to bring them
    /// to life
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new life from `config`, filling health and mana.
    ///
    /// Passing `None` logs the missing configuration and makes every other
    /// operation a no-op until this is called again with a config.
    pub fn initialize(&mut self, config: Option<&PlayerConfig>) {
        let Some(config) = config else {
            log::error!("PlayerStats: player configuration not assigned");
            self.initialized = false;
            return;
        };

        self.initialized = true;
        self.max_health = config.max_health.max(1.0);
        self.max_mana = config.max_mana.max(0.0);
        self.health = self.max_health;
        self.mana = self.max_mana;
        self.death_reported = false;

        let (health, mana) = (self.health_gauge(), self.mana_gauge());
        self.on_health_changed.emit(&health);
        self.on_mana_changed.emit(&mana);
    }

    fn ensure_initialized(&self, operation: &str) -> bool {
        if !self.initialized {
            log::warn!("PlayerStats::{operation}: not initialized");
        }
        self.initialized
    }

    /// Subtract health. Ignored for non-positive or non-finite amounts, or
    /// when dead.
    pub fn take_damage(&mut self, amount: f32) {
        if !self.ensure_initialized("take_damage") || !is_valid_amount(amount) || self.health <= 0.0
        {
            return;
        }

        self.health = (self.health - amount).clamp(0.0, self.max_health);
        let gauge = self.health_gauge();
        self.on_health_changed.emit(&gauge);

        if self.health <= 0.0 && !self.death_reported {
            self.death_reported = true;
            log::info!("PlayerStats: died");
            self.on_death.emit(&());
        }
    }

    /// Add health up to the maximum. Cannot revive a dead entity.
    pub fn heal(&mut self, amount: f32) {
        if !self.ensure_initialized("heal") || !is_valid_amount(amount) || self.health <= 0.0 {
            return;
        }

        self.health = (self.health + amount).clamp(0.0, self.max_health);
        let gauge = self.health_gauge();
        self.on_health_changed.emit(&gauge);
    }

    /// Add (or with a negative delta, spend) mana, clamped to `[0, max]`
    pub fn add_mana(&mut self, delta: f32) {
        if !self.ensure_initialized("add_mana") || !delta.is_finite() || delta.abs() <= MANA_EPSILON
        {
            return;
        }

        self.mana = (self.mana + delta).clamp(0.0, self.max_mana);
        let gauge = self.mana_gauge();
        self.on_mana_changed.emit(&gauge);
    }

    /// Permanently raise both maximums and grant the same amount to the
    /// current values. A dead entity gains the maximums only.
    pub fn apply_level_up_bonuses(&mut self, health_bonus: f32, mana_bonus: f32) {
        if !self.ensure_initialized("apply_level_up_bonuses") {
            return;
        }
        let health_bonus = if is_valid_amount(health_bonus) { health_bonus } else { 0.0 };
        let mana_bonus = if is_valid_amount(mana_bonus) { mana_bonus } else { 0.0 };

        self.max_health += health_bonus;
        self.max_mana += mana_bonus;

        if self.health > 0.0 {
            self.health = (self.health + health_bonus).min(self.max_health);
            self.mana = (self.mana + mana_bonus).min(self.max_mana);
        }

        let (health, mana) = (self.health_gauge(), self.mana_gauge());
        self.on_health_changed.emit(&health);
        self.on_mana_changed.emit(&mana);
    }

    /// Re-publish health and mana, e.g. for a freshly bound UI
    pub fn publish(&mut self) {
        if !self.ensure_initialized("publish") {
            return;
        }
        let (health, mana) = (self.health_gauge(), self.mana_gauge());
        self.on_health_changed.emit(&health);
        self.on_mana_changed.emit(&mana);
    }

    /// Whether [`initialize`](Self::initialize) succeeded
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether health has reached zero in this life
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.is_initialized() && self.health <= 0.0
    }

    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[must_use]
    pub fn mana(&self) -> f32 {
        self.mana
    }

    #[must_use]
    pub fn max_mana(&self) -> f32 {
        self.max_mana
    }

    /// Current and maximum health
    #[must_use]
    pub fn health_gauge(&self) -> Gauge {
        Gauge {
            current: self.health,
            max: self.max_health,
        }
    }

    /// Current and maximum mana
    #[must_use]
    pub fn mana_gauge(&self) -> Gauge {
        Gauge {
            current: self.mana,
            max: self.max_mana,
        }
    }
}

/// Positive and finite
fn is_valid_amount(amount: f32) -> bool {
    amount.is_finite() && amount > 0.0
}
