//! Minimizing binary quadratic models.
//!
//! [`Sampler`] is the boundary to minimization back ends: simulated or
//! quantum annealers, variational solvers, or anything else that maps a
//! [`BinaryQuadraticModel`] to low-energy samples. The only back end shipped
//! here is [`ExactSolver`], which enumerates every assignment and is meant for
//! small models and for checking other samplers.

use log::debug;

use crate::bqm::BinaryQuadraticModel;
use crate::error::{Error, Result};
use crate::types::{all_samples, Sample, Var};

/// Tolerance used to group records with the lowest energy.
const ENERGY_EPS: f64 = 1e-9;

/// Hard ceiling on enumeration, whatever [`ExactSolver::max_variables`] says.
pub const ENUMERATION_LIMIT: usize = 30;

pub trait Sampler {
    fn sample(&self, bqm: &BinaryQuadraticModel) -> Result<SampleSet>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub sample: Sample,
    pub energy: f64,
}

/// Samples with their energies, ordered by ascending energy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    records: Vec<SampleRecord>,
}

impl SampleSet {
    /// Builds a sample set, sorting the records by energy.
    ///
    /// The sort is stable: records of equal energy keep their given order.
    /// Records with a NaN energy go last.
    pub fn from_records(mut records: Vec<SampleRecord>) -> Self {
        records.sort_by(|a, b| match (a.energy.is_nan(), b.energy.is_nan()) {
            (false, false) => a.energy.total_cmp(&b.energy),
            (x, y) => x.cmp(&y),
        });
        Self { records }
    }

    /// Lowest-energy record.
    pub fn first(&self) -> Option<&SampleRecord> {
        self.records.first()
    }

    /// All records sharing the lowest energy.
    pub fn lowest(&self) -> &[SampleRecord] {
        let Some(first) = self.records.first() else {
            return &[];
        };
        let n = self
            .records
            .iter()
            .take_while(|r| r.energy - first.energy <= ENERGY_EPS)
            .count();
        &self.records[..n]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IntoIterator for SampleSet {
    type Item = SampleRecord;
    type IntoIter = std::vec::IntoIter<SampleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Brute-force sampler returning every assignment.
#[derive(Debug, Clone)]
pub struct ExactSolver {
    /// Largest number of variables the solver agrees to enumerate.
    ///
    /// Values above [`ENUMERATION_LIMIT`] are clamped to it.
    pub max_variables: usize,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self { max_variables: 20 }
    }
}

impl ExactSolver {
    pub fn new(max_variables: usize) -> Self {
        Self { max_variables }
    }
}

impl Sampler for ExactSolver {
    fn sample(&self, bqm: &BinaryQuadraticModel) -> Result<SampleSet> {
        let vars: Vec<Var> = bqm.variables().cloned().collect();
        let limit = self.max_variables.min(ENUMERATION_LIMIT);
        let count = u32::try_from(vars.len())
            .ok()
            .filter(|_| vars.len() <= limit)
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or(Error::TooManyVariables {
                count: vars.len(),
                limit,
            })?;
        debug!("Enumerating {} assignments of {} variables", count, vars.len());

        let mut records = Vec::with_capacity(count);
        for sample in all_samples(&vars) {
            let energy = bqm.energy(&sample)?;
            records.push(SampleRecord { sample, energy });
        }
        let set = SampleSet::from_records(records);
        if let Some(best) = set.first() {
            debug!("Ground energy {} ({} ground states)", best.energy, set.lowest().len());
        }
        Ok(set)
    }
}
