//! Deal sides and primary fields

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One side of the deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Broker,
    Affiliate,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Broker, Side::Affiliate];

    /// CPA field of this side
    pub fn cpa(self) -> Field {
        match self {
            Side::Broker => Field::BrokerCpa,
            Side::Affiliate => Field::AffiliateCpa,
        }
    }

    /// CRG field of this side
    pub fn crg(self) -> Field {
        match self {
            Side::Broker => Field::BrokerCrg,
            Side::Affiliate => Field::AffiliateCrg,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Broker => Side::Affiliate,
            Side::Affiliate => Side::Broker,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Broker => f.write_str("Broker"),
            Side::Affiliate => f.write_str("Affiliate"),
        }
    }
}

/// The five user-editable deal values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "brokerCPA")]
    BrokerCpa,
    #[serde(rename = "brokerCRG")]
    BrokerCrg,
    #[serde(rename = "affiliateCPA")]
    AffiliateCpa,
    #[serde(rename = "affiliateCRG")]
    AffiliateCrg,
    #[serde(rename = "margin")]
    Margin,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::BrokerCpa,
        Field::BrokerCrg,
        Field::AffiliateCpa,
        Field::AffiliateCrg,
        Field::Margin,
    ];

    /// Side the field belongs to; margin belongs to neither
    pub fn side(self) -> Option<Side> {
        match self {
            Field::BrokerCpa | Field::BrokerCrg => Some(Side::Broker),
            Field::AffiliateCpa | Field::AffiliateCrg => Some(Side::Affiliate),
            Field::Margin => None,
        }
    }

    pub fn is_cpa(self) -> bool {
        matches!(self, Field::BrokerCpa | Field::AffiliateCpa)
    }

    /// Key used in scenario files, CSV lock lists and CLI flags
    pub fn key(self) -> &'static str {
        match self {
            Field::BrokerCpa => "brokerCPA",
            Field::BrokerCrg => "brokerCRG",
            Field::AffiliateCpa => "affiliateCPA",
            Field::AffiliateCrg => "affiliateCRG",
            Field::Margin => "margin",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unrecognised field or lock key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deal field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Case-insensitive; accepts `brokerCPA`, `broker_cpa` and `broker-cpa`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "brokercpa" => Ok(Field::BrokerCpa),
            "brokercrg" => Ok(Field::BrokerCrg),
            "affiliatecpa" => Ok(Field::AffiliateCpa),
            "affiliatecrg" => Ok(Field::AffiliateCrg),
            "margin" => Ok(Field::Margin),
            _ => Err(UnknownField(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_sides() {
        assert_eq!(Field::BrokerCpa.side(), Some(Side::Broker));
        assert_eq!(Field::AffiliateCrg.side(), Some(Side::Affiliate));
        assert_eq!(Field::Margin.side(), None);
        assert_eq!(Side::Affiliate.cpa(), Field::AffiliateCpa);
        assert_eq!(Side::Broker.crg(), Field::BrokerCrg);
        assert_eq!(Side::Broker.other(), Side::Affiliate);
    }

    #[test]
    fn test_parse_field_keys() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
        assert_eq!("broker_cpa".parse::<Field>().unwrap(), Field::BrokerCpa);
        assert_eq!("Affiliate-CRG".parse::<Field>().unwrap(), Field::AffiliateCrg);
        assert!("brokerTerms".parse::<Field>().is_err());
        assert!("cpl".parse::<Field>().is_err());
    }
}
