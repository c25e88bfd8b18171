use crate::config::{FixtureCase, FixtureConfig};
use anyhow::Result;
use ipcheck_common::net::Verdict;
use ipcheck_common::{internet_checksum, ipv4_checksum, verify_ipv4_checksum};
use log::{debug, error, info};

/// Result of running a single fixture case
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub name: String,
    pub expected: Verdict,
    pub actual: Verdict,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub outcomes: Vec<CaseOutcome>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failed().next().is_none()
    }
}

pub fn run_case(case: &FixtureCase) -> Result<CaseOutcome> {
    let fields = case.header.to_fields()?;
    let actual = Verdict::from(verify_ipv4_checksum(&fields));

    debug!(
        "{}: checksum {:#06x}, expected {:#06x}, wire residue {:#06x}",
        case.name,
        fields.hdr_checksum,
        ipv4_checksum(&fields),
        internet_checksum(&fields.to_wire())
    );

    let outcome = CaseOutcome {
        name: case.name.clone(),
        expected: case.expect,
        actual,
    };

    let actual: &'static str = outcome.actual.into();
    if outcome.passed() {
        info!("{}: ok ({})", outcome.name, actual);
    } else {
        let expected: &'static str = outcome.expected.into();
        error!("{}: expected {} but header is {}", outcome.name, expected, actual);
    }

    Ok(outcome)
}

pub fn run(config: &FixtureConfig) -> Result<Report> {
    info!(
        "Running {} checksum cases from {}",
        config.cases.len(),
        config.name.as_deref().unwrap_or("fixtures")
    );

    let outcomes = config
        .cases
        .iter()
        .map(run_case)
        .collect::<Result<Vec<_>>>()?;

    Ok(Report { outcomes })
}
