//! Solve a single deal from the command line
//!
//! Examples:
//!   deal_calc --broker-cpa 1200 --broker-crg 10 --affiliate-crg 10 --margin 20 \
//!             --lock brokerTerms --lock margin
//!   deal_calc --scenario deal.json --json

use anyhow::{bail, Context, Result};
use clap::Parser;
use deal_calc::{load_scenario, DealTerms, Field, LockFlag, LockState, Scenario};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "deal_calc", about = "Solve broker/affiliate CPA, CRG and margin terms")]
struct Args {
    /// JSON scenario file; value and lock flags below override it
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long)]
    broker_cpa: Option<f64>,

    #[arg(long)]
    broker_crg: Option<f64>,

    #[arg(long)]
    affiliate_cpa: Option<f64>,

    #[arg(long)]
    affiliate_crg: Option<f64>,

    /// Margin percent
    #[arg(long)]
    margin: Option<f64>,

    /// Lock a field or side (brokerCPA, brokerCRG, affiliateCPA, affiliateCRG,
    /// margin, brokerTerms, affiliateTerms). Repeatable.
    #[arg(long = "lock")]
    locks: Vec<LockFlag>,

    /// Lock every field except this one
    #[arg(long, conflicts_with = "locks")]
    solo: Option<Field>,

    /// Field edited last; kept fixed when the solver has a choice
    #[arg(long)]
    hint: Option<Field>,

    /// Print the solved deal as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => load_scenario(path)
                .with_context(|| format!("loading scenario {}", path.display()))?,
            None => Scenario::default(),
        };

        let overrides = [
            (Field::BrokerCpa, self.broker_cpa),
            (Field::BrokerCrg, self.broker_crg),
            (Field::AffiliateCpa, self.affiliate_cpa),
            (Field::AffiliateCrg, self.affiliate_crg),
            (Field::Margin, self.margin),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                if !value.is_finite() {
                    bail!("{} must be a finite number", field);
                }
                scenario.terms.set(field, value);
            }
        }

        if let Some(keep) = self.solo {
            scenario.locks = LockState::solo(keep);
        } else if !self.locks.is_empty() {
            scenario.locks = LockState::with_flags(self.locks.iter().copied());
        }
        if self.hint.is_some() {
            scenario.last_edited = self.hint;
        }
        Ok(scenario)
    }
}

fn print_deal(terms: &DealTerms, locks: &LockState) {
    println!("Locks:            {}", locks);
    println!(
        "Broker:           ${:.2} x {:.2}% = ${:.2}",
        terms.broker_cpa,
        terms.broker_crg,
        terms.broker_effective()
    );
    println!(
        "Affiliate:        ${:.2} x {:.2}% = ${:.2}",
        terms.affiliate_cpa,
        terms.affiliate_crg,
        terms.affiliate_effective()
    );
    println!("Margin:           {:.2}%", terms.margin);
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let scenario = args.scenario()?;

    let solved = match scenario.solve() {
        Ok(solved) => solved,
        Err(reason) => bail!("{}", reason),
    };

    if args.json {
        let out = serde_json::to_string_pretty(&solved.summary()).context("serializing result")?;
        println!("{}", out);
    } else {
        print_deal(&solved, &scenario.locks);
    }
    Ok(())
}
