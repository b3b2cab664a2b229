//! Lock flags and the transitions between lock states

use crate::deal::{Field, Side, UnknownField};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Something a user can lock: a single field or a whole side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockFlag {
    Field(Field),
    Terms(Side),
}

impl LockFlag {
    pub fn key(self) -> &'static str {
        match self {
            LockFlag::Field(field) => field.key(),
            LockFlag::Terms(Side::Broker) => "brokerTerms",
            LockFlag::Terms(Side::Affiliate) => "affiliateTerms",
        }
    }
}

impl From<Field> for LockFlag {
    fn from(field: Field) -> Self {
        LockFlag::Field(field)
    }
}

impl fmt::Display for LockFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LockFlag {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "brokerterms" => Ok(LockFlag::Terms(Side::Broker)),
            "affiliateterms" => Ok(LockFlag::Terms(Side::Affiliate)),
            _ => s.parse::<Field>().map(LockFlag::Field),
        }
    }
}

/// Which fields and sides the user has pinned
///
/// A set group flag counts as both members of its side being locked.
/// Setting it does not touch the member flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockState {
    #[serde(rename = "brokerCPA")]
    broker_cpa: bool,
    #[serde(rename = "brokerCRG")]
    broker_crg: bool,
    #[serde(rename = "affiliateCPA")]
    affiliate_cpa: bool,
    #[serde(rename = "affiliateCRG")]
    affiliate_crg: bool,
    margin: bool,
    #[serde(rename = "brokerTerms")]
    broker_terms: bool,
    #[serde(rename = "affiliateTerms")]
    affiliate_terms: bool,
}

impl LockState {
    /// State with exactly the given flags set, no transition rules applied
    pub fn with_flags<I>(flags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<LockFlag>,
    {
        let mut state = Self::default();
        for flag in flags {
            *state.slot_mut(flag.into()) = true;
        }
        state
    }

    fn slot_mut(&mut self, flag: LockFlag) -> &mut bool {
        match flag {
            LockFlag::Field(Field::BrokerCpa) => &mut self.broker_cpa,
            LockFlag::Field(Field::BrokerCrg) => &mut self.broker_crg,
            LockFlag::Field(Field::AffiliateCpa) => &mut self.affiliate_cpa,
            LockFlag::Field(Field::AffiliateCrg) => &mut self.affiliate_crg,
            LockFlag::Field(Field::Margin) => &mut self.margin,
            LockFlag::Terms(Side::Broker) => &mut self.broker_terms,
            LockFlag::Terms(Side::Affiliate) => &mut self.affiliate_terms,
        }
    }

    /// Raw value of one flag
    pub fn flag(&self, flag: LockFlag) -> bool {
        match flag {
            LockFlag::Field(Field::BrokerCpa) => self.broker_cpa,
            LockFlag::Field(Field::BrokerCrg) => self.broker_crg,
            LockFlag::Field(Field::AffiliateCpa) => self.affiliate_cpa,
            LockFlag::Field(Field::AffiliateCrg) => self.affiliate_crg,
            LockFlag::Field(Field::Margin) => self.margin,
            LockFlag::Terms(Side::Broker) => self.broker_terms,
            LockFlag::Terms(Side::Affiliate) => self.affiliate_terms,
        }
    }

    /// Whether the field itself carries a lock (group flags ignored)
    pub fn is_marked(&self, field: Field) -> bool {
        self.flag(LockFlag::Field(field))
    }

    /// Whether the solver must leave `field` alone, counting group flags
    pub fn is_locked(&self, field: Field) -> bool {
        self.is_marked(field)
            || field.side().is_some_and(|side| self.flag(LockFlag::Terms(side)))
    }

    pub fn margin_locked(&self) -> bool {
        self.margin
    }

    /// A side is pinned when its group flag is set or both members are locked
    pub fn side_pinned(&self, side: Side) -> bool {
        self.flag(LockFlag::Terms(side))
            || (self.is_marked(side.cpa()) && self.is_marked(side.crg()))
    }

    /// Number of primary fields locked individually
    pub fn marked_count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.is_marked(**f)).count()
    }

    /// Flags currently set, in declaration order
    pub fn active_flags(&self) -> Vec<LockFlag> {
        Field::ALL
            .iter()
            .map(|f| LockFlag::Field(*f))
            .chain(Side::ALL.iter().map(|s| LockFlag::Terms(*s)))
            .filter(|flag| self.flag(*flag))
            .collect()
    }

    /// Flip one flag
    ///
    /// Unlocking a member of a locked side also unlocks the side, so a set
    /// group flag always means both members are pinned.
    pub fn toggled(&self, flag: LockFlag) -> Self {
        let mut next = *self;
        let slot = next.slot_mut(flag);
        *slot = !*slot;
        let now_set = *slot;

        if let LockFlag::Field(field) = flag {
            if !now_set {
                if let Some(side) = field.side() {
                    *next.slot_mut(LockFlag::Terms(side)) = false;
                }
            }
        }
        next
    }

    /// Everything locked except `keep`, with both group flags cleared
    pub fn solo(keep: Field) -> Self {
        Self::with_flags(Field::ALL.into_iter().filter(|f| *f != keep))
    }

    /// Nothing locked
    pub fn cleared() -> Self {
        Self::default()
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = self.active_flags();
        if flags.is_empty() {
            return f.write_str("none");
        }
        let keys: Vec<&str> = flags.iter().map(|flag| flag.key()).collect();
        f.write_str(&keys.join("|"))
    }
}
