//! Deal value tuple and its derived projections

use super::{Field, Side};
use crate::calc::{self, round_cents};
use serde::{Deserialize, Serialize};

/// The five primary deal values
///
/// Effective values are not stored; they are always projected from the
/// CPA/CRG pair of their side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealTerms {
    /// Amount the broker pays per qualifying conversion
    #[serde(rename = "brokerCPA", default = "default_broker_cpa")]
    pub broker_cpa: f64,

    /// Conversion rate guaranteed to the broker (percent)
    #[serde(rename = "brokerCRG", default = "default_crg")]
    pub broker_crg: f64,

    /// Amount paid on to the affiliate per conversion
    #[serde(rename = "affiliateCPA", default = "default_affiliate_cpa")]
    pub affiliate_cpa: f64,

    /// Conversion rate guaranteed by the affiliate (percent)
    #[serde(rename = "affiliateCRG", default = "default_crg")]
    pub affiliate_crg: f64,

    /// Margin retained between the two effective values (percent)
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_broker_cpa() -> f64 { 1200.0 }
fn default_affiliate_cpa() -> f64 { 1000.0 }
fn default_crg() -> f64 { 10.0 }
fn default_margin() -> f64 { 20.0 }

impl Default for DealTerms {
    fn default() -> Self {
        Self {
            broker_cpa: 1200.0,
            broker_crg: 10.0,
            affiliate_cpa: 1000.0,
            affiliate_crg: 10.0,
            margin: 20.0,
        }
    }
}

impl DealTerms {
    pub fn new(
        broker_cpa: f64,
        broker_crg: f64,
        affiliate_cpa: f64,
        affiliate_crg: f64,
        margin: f64,
    ) -> Self {
        Self { broker_cpa, broker_crg, affiliate_cpa, affiliate_crg, margin }
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::BrokerCpa => self.broker_cpa,
            Field::BrokerCrg => self.broker_crg,
            Field::AffiliateCpa => self.affiliate_cpa,
            Field::AffiliateCrg => self.affiliate_crg,
            Field::Margin => self.margin,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::BrokerCpa => self.broker_cpa = value,
            Field::BrokerCrg => self.broker_crg = value,
            Field::AffiliateCpa => self.affiliate_cpa = value,
            Field::AffiliateCrg => self.affiliate_crg = value,
            Field::Margin => self.margin = value,
        }
    }

    /// Unrounded CPA × CRG% of one side
    pub fn raw_effective(&self, side: Side) -> f64 {
        calc::effective_value(self.get(side.cpa()), self.get(side.crg()))
    }

    /// Broker effective value, rounded to cents
    pub fn broker_effective(&self) -> f64 {
        round_cents(self.raw_effective(Side::Broker))
    }

    /// Affiliate effective value, rounded to cents
    pub fn affiliate_effective(&self) -> f64 {
        round_cents(self.raw_effective(Side::Affiliate))
    }

    /// Affiliate cost per lead. Same number as the affiliate effective value,
    /// it has no lock and is never solved for.
    pub fn affiliate_cpl(&self) -> f64 {
        self.affiliate_effective()
    }

    /// Margin implied by the rounded effective values
    pub fn implied_margin(&self) -> f64 {
        round_cents(calc::margin(self.broker_effective(), self.affiliate_effective()))
    }

    /// All values with non-finite entries replaced by 0
    pub fn sanitized(&self) -> Self {
        Self {
            broker_cpa: calc::finite_or_zero(self.broker_cpa),
            broker_crg: calc::finite_or_zero(self.broker_crg),
            affiliate_cpa: calc::finite_or_zero(self.affiliate_cpa),
            affiliate_crg: calc::finite_or_zero(self.affiliate_crg),
            margin: calc::finite_or_zero(self.margin),
        }
    }

    /// All values rounded to 2 decimals
    pub fn rounded(&self) -> Self {
        Self {
            broker_cpa: round_cents(self.broker_cpa),
            broker_crg: round_cents(self.broker_crg),
            affiliate_cpa: round_cents(self.affiliate_cpa),
            affiliate_crg: round_cents(self.affiliate_crg),
            margin: round_cents(self.margin),
        }
    }

    /// Flat record of the primaries plus both effective values
    pub fn summary(&self) -> DealSummary {
        DealSummary {
            broker_cpa: self.broker_cpa,
            broker_crg: self.broker_crg,
            affiliate_cpa: self.affiliate_cpa,
            affiliate_crg: self.affiliate_crg,
            margin: self.margin,
            broker_effective: self.broker_effective(),
            affiliate_effective: self.affiliate_effective(),
        }
    }
}

/// Serializable view of a solved deal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealSummary {
    #[serde(rename = "brokerCPA")]
    pub broker_cpa: f64,
    #[serde(rename = "brokerCRG")]
    pub broker_crg: f64,
    #[serde(rename = "affiliateCPA")]
    pub affiliate_cpa: f64,
    #[serde(rename = "affiliateCRG")]
    pub affiliate_crg: f64,
    pub margin: f64,
    pub broker_effective: f64,
    pub affiliate_effective: f64,
}
