/// Explicit stand-ins for the platform's periodic timer events.
///
/// A `Scheduler` fires once when the clock reaches its due time and then
/// stays disarmed until the handler's returned interval re-arms it.

use rand::Rng;

use crate::config::RoundConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct Scheduler {
    next_due_ms: Option<u64>,
}

impl Scheduler {
    pub fn armed(now_ms: u64, interval_ms: u64) -> Self {
        Scheduler { next_due_ms: Some(now_ms + interval_ms) }
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Returns true at most once per arming.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.next_due_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn rearm(&mut self, now_ms: u64, interval_ms: u64) {
        self.next_due_ms = Some(now_ms + interval_ms);
    }
}

/// Which timer went off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    BonusSpawn,
    EnemyFire,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timers {
    pub bonus_spawn: Scheduler,
    pub enemy_fire: Scheduler,
}

impl Timers {
    pub fn new(config: &RoundConfig, now_ms: u64, rng: &mut impl Rng) -> Self {
        Timers {
            bonus_spawn: Scheduler::armed(now_ms, bonus_interval(config, rng)),
            enemy_fire: Scheduler::armed(now_ms, config.enemy_fire_interval_ms),
        }
    }

    /// Signals due at `now_ms`, bonus first.  Each returned scheduler is left
    /// disarmed until the caller re-arms it.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Signal> {
        let mut due = Vec::new();
        if self.bonus_spawn.poll(now_ms) {
            due.push(Signal::BonusSpawn);
        }
        if self.enemy_fire.poll(now_ms) {
            due.push(Signal::EnemyFire);
        }
        due
    }

    pub fn rearm(&mut self, signal: Signal, now_ms: u64, interval_ms: u64) {
        match signal {
            Signal::BonusSpawn => self.bonus_spawn.rearm(now_ms, interval_ms),
            Signal::EnemyFire => self.enemy_fire.rearm(now_ms, interval_ms),
        }
    }
}

/// Uniform in `[bonus_interval_min_ms, bonus_interval_max_ms)`.
pub fn bonus_interval(config: &RoundConfig, rng: &mut impl Rng) -> u64 {
    if config.bonus_interval_max_ms <= config.bonus_interval_min_ms {
        return config.bonus_interval_min_ms;
    }
    rng.gen_range(config.bonus_interval_min_ms..config.bonus_interval_max_ms)
}
