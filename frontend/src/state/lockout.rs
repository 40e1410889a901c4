use std::rc::Rc;

use crate::utils::{
    storage::{self, KeyValueStore},
    time::{minutes_until, Clock, MINUTE_MS},
};

pub const MAX_FAILED_ATTEMPTS: u32 = 5;
pub const LOCKOUT_DURATION_MS: i64 = 15 * MINUTE_MS;

pub const FAILED_ATTEMPTS_KEY: &str = "campusboard.login.failed_attempts";
pub const LOCKOUT_UNTIL_KEY: &str = "campusboard.login.lockout_until";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutDecision {
    Allowed { remaining: u32 },
    Locked { until: i64, remaining_minutes: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockoutStatus {
    pub locked: bool,
    pub remaining_minutes: Option<u32>,
}

impl LockoutStatus {
    fn unlocked() -> Self {
        Self::default()
    }
}

/// Counts consecutive failed logins and holds the lockout deadline.
///
/// State lives in the key-value store only; every call re-reads it, so two
/// governors over the same storage always agree.
#[derive(Clone)]
pub struct LoginAttemptGovernor {
    storage: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
}

impl LoginAttemptGovernor {
    pub fn new(storage: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn failed_attempts(&self) -> u32 {
        storage::get_u32(self.storage.as_ref(), FAILED_ATTEMPTS_KEY).unwrap_or(0)
    }

    pub fn lockout_until(&self) -> Option<i64> {
        storage::get_i64(self.storage.as_ref(), LOCKOUT_UNTIL_KEY)
    }

    pub fn record_failure(&self) -> LockoutDecision {
        let now = self.clock.now_ms();
        let attempts = self.failed_attempts().saturating_add(1);
        self.storage.set(FAILED_ATTEMPTS_KEY, &attempts.to_string());

        if attempts >= MAX_FAILED_ATTEMPTS {
            let until = now + LOCKOUT_DURATION_MS;
            self.storage.set(LOCKOUT_UNTIL_KEY, &until.to_string());
            log::warn!(
                "login locked after {} failed attempts until {}",
                attempts,
                crate::utils::time::format_timestamp(until)
            );
            return LockoutDecision::Locked {
                until,
                remaining_minutes: minutes_until(now, until),
            };
        }

        LockoutDecision::Allowed {
            remaining: MAX_FAILED_ATTEMPTS - attempts,
        }
    }

    pub fn record_success(&self) {
        self.reset();
    }

    pub fn current_status(&self) -> LockoutStatus {
        let Some(until) = self.lockout_until() else {
            return LockoutStatus::unlocked();
        };
        let now = self.clock.now_ms();
        if until > now {
            return LockoutStatus {
                locked: true,
                remaining_minutes: Some(minutes_until(now, until)),
            };
        }
        log::info!("login lockout elapsed; failed attempts reset");
        self.reset();
        LockoutStatus::unlocked()
    }

    fn reset(&self) {
        self.storage.remove(LOCKOUT_UNTIL_KEY);
        self.storage.remove(FAILED_ATTEMPTS_KEY);
    }
}
