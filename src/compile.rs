//! Compilation of expressions into binary quadratic models.
//!
//! Compiling an [`Expr`] expands it into a multilinear [`Polynomial`] and then
//! lowers every monomial of degree greater than two by substituting a pair of
//! variables `u * v` with a fresh auxiliary variable `y`. Consistency of the
//! substitution is enforced by the penalty
//!
//! ```text
//! strength * (u*v - 2*u*y - 2*v*y + 3*y)
//! ```
//!
//! which is `0` when `y = u*v` and at least `strength` otherwise.
//!
//! ```
//! use qubo_logic::expr::Expr;
//! use qubo_logic::gate::or;
//! use qubo_logic::types::sample;
//!
//! let a = Expr::binary("a");
//! let b = Expr::binary("b");
//! let model = or(&a, &b).compile().unwrap();
//!
//! assert_eq!(model.energy(&sample([("a", false), ("b", true)])).unwrap(), 1.0);
//! assert_eq!(model.energy(&sample([("a", false), ("b", false)])).unwrap(), 0.0);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::bqm::BinaryQuadraticModel;
use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::poly::{Monomial, Polynomial};
use crate::types::{Sample, Var, Vartype};

/// Options for [`Expr::compile_with`].
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Penalty strength for auxiliary variables introduced by degree reduction.
    pub strength: f64,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self { strength: 5.0 }
    }
}

/// An auxiliary variable standing for the product of two other variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxVar {
    pub var: Var,
    pub left: Var,
    pub right: Var,
}

/// A compiled expression: a quadratic model plus the bookkeeping needed to
/// interpret its samples.
#[derive(Debug, Clone)]
pub struct Model {
    bqm: BinaryQuadraticModel,
    variables: BTreeSet<Var>,
    aux: Vec<AuxVar>,
}

/// A sample interpreted against a [`Model`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSample {
    /// Values of the source variables (auxiliaries removed).
    pub sample: Sample,
    /// Energy of the full sample.
    pub energy: f64,
    /// Auxiliary variables whose value differs from the product they stand for.
    pub broken: Vec<Var>,
}

impl DecodedSample {
    pub fn is_consistent(&self) -> bool {
        self.broken.is_empty()
    }
}

impl Expr {
    /// Compiles the expression with the default configuration.
    pub fn compile(&self) -> Result<Model> {
        self.compile_with(&CompileConfig::default())
    }

    /// Compiles the expression into a quadratic [`Model`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStrength`] if the penalty strength is not a positive finite number.
    /// - [`Error::AuxNameCollision`] if an auxiliary name is already used by a variable.
    pub fn compile_with(&self, config: &CompileConfig) -> Result<Model> {
        if !config.strength.is_finite() || config.strength <= 0.0 {
            return Err(Error::InvalidStrength(config.strength));
        }

        let poly = Polynomial::from_expr(self);
        let variables = self.variables();
        debug!(
            "Compiling expression over {} variables: {} terms of degree {}",
            variables.len(),
            poly.len(),
            poly.degree()
        );

        let (poly, aux) = reduce_degree(poly, &variables, config.strength)?;
        if !aux.is_empty() {
            debug!("Introduced {} auxiliary variables", aux.len());
        }

        let mut bqm = BinaryQuadraticModel::new(Vartype::Binary);
        for var in &variables {
            bqm.add_variable(var.clone());
        }
        for (m, c) in poly.terms() {
            match m.vars() {
                [] => bqm.add_offset(c),
                [v] => bqm.add_linear(v.clone(), c),
                [u, v] => bqm.add_quadratic(u.clone(), v.clone(), c),
                _ => unreachable!("monomial {} survived degree reduction", m),
            }
        }
        debug!(
            "Compiled model: {} variables, {} interactions",
            bqm.num_variables(),
            bqm.num_interactions()
        );

        Ok(Model { bqm, variables, aux })
    }
}

/// Quadratizes a polynomial by pairwise substitution.
///
/// At each step the pair of variables occurring together in the most
/// high-degree monomials is replaced; ties go to the smallest pair.
fn reduce_degree(
    mut poly: Polynomial,
    variables: &BTreeSet<Var>,
    strength: f64,
) -> Result<(Polynomial, Vec<AuxVar>)> {
    let mut aux = Vec::new();

    loop {
        let mut counts: BTreeMap<(&Var, &Var), usize> = BTreeMap::new();
        for (m, _) in poly.terms().filter(|(m, _)| m.degree() > 2) {
            let vars = m.vars();
            for i in 0..vars.len() {
                for j in (i + 1)..vars.len() {
                    *counts.entry((&vars[i], &vars[j])).or_insert(0) += 1;
                }
            }
        }

        let mut best: Option<((&Var, &Var), usize)> = None;
        for (pair, count) in counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((pair, count));
            }
        }
        let Some(((u, v), _)) = best else {
            break;
        };
        let (u, v) = (u.clone(), v.clone());

        let y = Var::new(format!("{}*{}", u, v));
        if variables.contains(&y) || aux.iter().any(|a: &AuxVar| a.var == y) {
            return Err(Error::AuxNameCollision(y));
        }
        trace!("Substituting {} for {} * {}", y, u, v);

        let mut next = Polynomial::zero();
        for (m, c) in poly.terms() {
            let m = if m.degree() > 2 {
                m.substitute_pair(&u, &v, &y).unwrap_or_else(|| m.clone())
            } else {
                m.clone()
            };
            next.add_term(m, c);
        }

        let uv = Monomial::from_vars([u.clone(), v.clone()]);
        let uy = Monomial::from_vars([u.clone(), y.clone()]);
        let vy = Monomial::from_vars([v.clone(), y.clone()]);
        next.add_term(uv, strength);
        next.add_term(uy, -2.0 * strength);
        next.add_term(vy, -2.0 * strength);
        next.add_term(Monomial::var(y.clone()), 3.0 * strength);

        aux.push(AuxVar { var: y, left: u, right: v });
        poly = next;
    }

    Ok((poly, aux))
}

impl Model {
    pub fn bqm(&self) -> &BinaryQuadraticModel {
        &self.bqm
    }

    pub fn into_bqm(self) -> BinaryQuadraticModel {
        self.bqm
    }

    /// Variables of the source expression.
    pub fn variables(&self) -> &BTreeSet<Var> {
        &self.variables
    }

    pub fn aux_variables(&self) -> &[AuxVar] {
        &self.aux
    }

    /// Completes a sample with consistent values for any missing auxiliaries.
    ///
    /// Auxiliaries are filled in creation order, so an auxiliary standing for
    /// a product involving an earlier auxiliary sees its value.
    fn complete(&self, sample: &Sample) -> Result<Sample> {
        let mut full = sample.clone();
        for a in &self.aux {
            if full.contains_key(&a.var) {
                continue;
            }
            let left = *full.get(&a.left).ok_or_else(|| Error::MissingVariable(a.left.clone()))?;
            let right = *full.get(&a.right).ok_or_else(|| Error::MissingVariable(a.right.clone()))?;
            full.insert(a.var.clone(), left && right);
        }
        Ok(full)
    }

    /// Energy of a sample.
    ///
    /// Auxiliary variables absent from the sample take the value of the
    /// product they stand for, so a sample of the source variables alone
    /// evaluates to the value of the source expression.
    pub fn energy(&self, sample: &Sample) -> Result<f64> {
        let full = self.complete(sample)?;
        self.bqm.energy(&full)
    }

    /// Splits a solver sample into source-variable values, energy and broken auxiliaries.
    pub fn decode_sample(&self, sample: &Sample) -> Result<DecodedSample> {
        let full = self.complete(sample)?;
        let energy = self.bqm.energy(&full)?;
        let broken = self
            .aux
            .iter()
            .filter(|a| full[&a.var] != (full[&a.left] && full[&a.right]))
            .map(|a| a.var.clone())
            .collect();
        let sample = full
            .into_iter()
            .filter(|(v, _)| self.variables.contains(v))
            .collect();
        Ok(DecodedSample { sample, energy, broken })
    }
}
