use std::collections::{HashMap, HashSet};
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::GuardConfig;

/// Where an address stands in the failed-login state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AddressStatus {
    Clean,
    Warned { attempts: usize },
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityEvent {
    pub event_type: &'static str,
    pub ip_address: IpAddr,
    pub attempts: usize,
    pub last_attempt: DateTime<Utc>,
    pub blocked: bool,
}

/// Sliding-window failed attempt tracker with lazy block expiry.
///
/// Methods take `&mut self`; share an instance behind a mutex so each
/// record/check/clear runs as one critical section.
pub struct IntrusionGuard {
    config: GuardConfig,
    attempts: HashMap<IpAddr, Vec<DateTime<Utc>>>,
    blocked: HashSet<IpAddr>,
}

impl IntrusionGuard {
    pub fn new(config: GuardConfig) -> Self {
        IntrusionGuard {
            config,
            attempts: HashMap::new(),
            blocked: HashSet::new(),
        }
    }

    pub fn record_failed_attempt(&mut self, ip: IpAddr) -> AddressStatus {
        self.record_failed_attempt_at(ip, Utc::now())
    }

    pub fn record_failed_attempt_at(&mut self, ip: IpAddr, now: DateTime<Utc>) -> AddressStatus {
        let cutoff = now - self.config.attempt_window;
        let log = self.attempts.entry(ip).or_default();
        log.push(now);
        log.retain(|at| *at > cutoff);

        let attempts = log.len();
        if attempts >= self.config.max_attempts {
            if self.blocked.insert(ip) {
                tracing::warn!("IP address blocked: {} ({} failed attempts)", ip, attempts);
            }
            AddressStatus::Blocked
        } else {
            tracing::debug!("Failed attempt {} of {} from {}", attempts, self.config.max_attempts, ip);
            AddressStatus::Warned { attempts }
        }
    }

    pub fn is_blocked(&mut self, ip: &IpAddr) -> bool {
        self.is_blocked_at(ip, Utc::now())
    }

    /// Lifts the block once the earliest recorded attempt is older than the
    /// block duration; the address then starts over with an empty log.
    pub fn is_blocked_at(&mut self, ip: &IpAddr, now: DateTime<Utc>) -> bool {
        if !self.blocked.contains(ip) {
            self.prune(ip, now);
            return false;
        }
        let earliest = self
            .attempts
            .get(ip)
            .and_then(|log| log.iter().min().copied());
        if let Some(earliest) = earliest {
            if now - earliest > self.config.block_duration {
                self.blocked.remove(ip);
                self.attempts.remove(ip);
                tracing::info!("Block lifted for {}", ip);
                return false;
            }
        }
        true
    }

    pub fn clear_failed_attempts(&mut self, ip: &IpAddr) {
        self.attempts.remove(ip);
        self.blocked.remove(ip);
    }

    pub fn status_at(&mut self, ip: &IpAddr, now: DateTime<Utc>) -> AddressStatus {
        if self.is_blocked_at(ip, now) {
            return AddressStatus::Blocked;
        }
        match self.attempts.get(ip).map(Vec::len) {
            Some(attempts) if attempts > 0 => AddressStatus::Warned { attempts },
            _ => AddressStatus::Clean,
        }
    }

    pub fn status(&mut self, ip: &IpAddr) -> AddressStatus {
        self.status_at(ip, Utc::now())
    }

    pub fn security_events(&mut self) -> Vec<SecurityEvent> {
        self.security_events_at(Utc::now())
    }

    /// Snapshot of addresses with attempts still inside the window. Stale
    /// logs of unblocked addresses are dropped along the way.
    pub fn security_events_at(&mut self, now: DateTime<Utc>) -> Vec<SecurityEvent> {
        let cutoff = now - self.config.attempt_window;
        let blocked = &self.blocked;
        self.attempts.retain(|ip, log| {
            if !blocked.contains(ip) {
                log.retain(|at| *at > cutoff);
            }
            !log.is_empty()
        });

        let mut events: Vec<SecurityEvent> = self
            .attempts
            .iter()
            .filter_map(|(ip, log)| {
                let last_attempt = log.iter().max().copied()?;
                Some(SecurityEvent {
                    event_type: "failed_attempts",
                    ip_address: *ip,
                    attempts: log.len(),
                    last_attempt,
                    blocked: self.blocked.contains(ip),
                })
            })
            .collect();
        events.sort_by(|a, b| b.last_attempt.cmp(&a.last_attempt));
        events
    }

    /// Drops attempts older than the window; an emptied log is removed.
    fn prune(&mut self, ip: &IpAddr, now: DateTime<Utc>) {
        let cutoff = now - self.config.attempt_window;
        if let Some(log) = self.attempts.get_mut(ip) {
            log.retain(|at| *at > cutoff);
            if log.is_empty() {
                self.attempts.remove(ip);
            }
        }
    }
}
