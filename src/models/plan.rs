//! Game configuration and the per-half substitution plan.

use crate::models::court::{Half, Position};
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Default half length when input is missing or unusable.
pub const DEFAULT_HALF_LENGTH_MINUTES: u32 = 18;
/// Default substitution interval (2.5 minutes) when input is missing or unusable.
pub const DEFAULT_SUBSTITUTION_INTERVAL_SECS: u32 = 150;

/// Accepted half lengths, in minutes.
pub const HALF_LENGTH_MINUTES_RANGE: RangeInclusive<u32> = 5..=30;
/// Accepted substitution intervals, in seconds (1 to 10 minutes).
pub const SUBSTITUTION_INTERVAL_SECS_RANGE: RangeInclusive<u32> = 60..=600;

/// Timing settings shared by the plan and the live clock.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub half_length_minutes: u32,
    pub substitution_interval_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            half_length_minutes: DEFAULT_HALF_LENGTH_MINUTES,
            substitution_interval_secs: DEFAULT_SUBSTITUTION_INTERVAL_SECS,
        }
    }
}

impl GameConfig {
    /// Number of substitution intervals per half: floor(half seconds / interval seconds).
    pub fn interval_count(&self) -> usize {
        if self.substitution_interval_secs == 0 {
            return 0;
        }
        let half_secs = u64::from(self.half_length_minutes) * 60;
        (half_secs / u64::from(self.substitution_interval_secs)) as usize
    }

    /// Half length if within range, otherwise the default.
    pub fn checked_half_length_minutes(minutes: u32) -> u32 {
        if HALF_LENGTH_MINUTES_RANGE.contains(&minutes) {
            minutes
        } else {
            DEFAULT_HALF_LENGTH_MINUTES
        }
    }

    /// Substitution interval if within range, otherwise the default.
    pub fn checked_substitution_interval_secs(secs: u32) -> u32 {
        if SUBSTITUTION_INTERVAL_SECS_RANGE.contains(&secs) {
            secs
        } else {
            DEFAULT_SUBSTITUTION_INTERVAL_SECS
        }
    }

    /// Parse whole minutes from form input. Unparsable or out-of-range input yields the default.
    pub fn parse_half_length_minutes(input: &str) -> u32 {
        match input.trim().parse::<u32>() {
            Ok(n) => Self::checked_half_length_minutes(n),
            Err(_) => DEFAULT_HALF_LENGTH_MINUTES,
        }
    }

    /// Parse (possibly fractional) minutes from form input into whole seconds.
    /// Unparsable or out-of-range input yields the default.
    pub fn parse_substitution_interval_secs(input: &str) -> u32 {
        match input.trim().parse::<f64>() {
            Ok(minutes) if minutes.is_finite() => {
                let secs = (minutes * 60.0).round();
                let max = f64::from(*SUBSTITUTION_INTERVAL_SECS_RANGE.end());
                if (0.0..=max).contains(&secs) {
                    Self::checked_substitution_interval_secs(secs as u32)
                } else {
                    DEFAULT_SUBSTITUTION_INTERVAL_SECS
                }
            }
            _ => DEFAULT_SUBSTITUTION_INTERVAL_SECS,
        }
    }
}

/// A planned swap at one position. Either side may still be empty while planning.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionEntry {
    pub position: Position,
    pub outgoing: Option<PlayerId>,
    pub incoming: Option<PlayerId>,
}

impl SubstitutionEntry {
    /// Both sides filled in; only complete entries are applied by the clock.
    pub fn is_complete(&self) -> bool {
        self.outgoing.is_some() && self.incoming.is_some()
    }
}

/// Substitutions planned for one interval (numbered from 1).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IntervalPlan {
    pub interval: usize,
    pub subs: Vec<SubstitutionEntry>,
}

impl IntervalPlan {
    pub fn new(interval: usize) -> Self {
        Self {
            interval,
            subs: Vec::new(),
        }
    }

    pub fn entry(&self, position: Position) -> Option<&SubstitutionEntry> {
        self.subs.iter().find(|s| s.position == position)
    }

    /// Entry for `position`, created empty if absent.
    fn entry_mut_or_insert(&mut self, position: Position) -> &mut SubstitutionEntry {
        let idx = match self.subs.iter().position(|s| s.position == position) {
            Some(idx) => idx,
            None => {
                self.subs.push(SubstitutionEntry {
                    position,
                    outgoing: None,
                    incoming: None,
                });
                self.subs.len() - 1
            }
        };
        &mut self.subs[idx]
    }
}

/// Interval plans for both halves, each holding `interval_count` intervals.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GamePlan {
    pub halves: BTreeMap<Half, Vec<IntervalPlan>>,
}

impl GamePlan {
    /// Empty plan with intervals 1..=interval_count in each half.
    pub fn new(interval_count: usize) -> Self {
        let halves = Half::ALL
            .iter()
            .map(|&half| {
                let intervals = (1..=interval_count).map(IntervalPlan::new).collect();
                (half, intervals)
            })
            .collect();
        Self { halves }
    }

    pub fn interval_count(&self) -> usize {
        self.halves.get(&Half::First).map_or(0, Vec::len)
    }

    /// Interval plan by 1-based interval number.
    pub fn interval(&self, half: Half, interval: usize) -> Option<&IntervalPlan> {
        self.halves
            .get(&half)?
            .iter()
            .find(|i| i.interval == interval)
    }

    fn interval_mut(&mut self, half: Half, interval: usize) -> Option<&mut IntervalPlan> {
        self.halves
            .get_mut(&half)?
            .iter_mut()
            .find(|i| i.interval == interval)
    }

    /// Upsert the outgoing side of the entry. Unknown intervals are ignored.
    pub fn set_outgoing(
        &mut self,
        half: Half,
        interval: usize,
        position: Position,
        player: Option<PlayerId>,
    ) -> bool {
        match self.interval_mut(half, interval) {
            Some(plan) => {
                plan.entry_mut_or_insert(position).outgoing = player;
                true
            }
            None => false,
        }
    }

    /// Upsert the incoming side of the entry. Unknown intervals are ignored.
    pub fn set_incoming(
        &mut self,
        half: Half,
        interval: usize,
        position: Position,
        player: Option<PlayerId>,
    ) -> bool {
        match self.interval_mut(half, interval) {
            Some(plan) => {
                plan.entry_mut_or_insert(position).incoming = player;
                true
            }
            None => false,
        }
    }

    /// Drop the entry for `position`, filled or not.
    pub fn clear_entry(&mut self, half: Half, interval: usize, position: Position) -> bool {
        match self.interval_mut(half, interval) {
            Some(plan) => {
                let before = plan.subs.len();
                plan.subs.retain(|s| s.position != position);
                plan.subs.len() != before
            }
            None => false,
        }
    }
}
