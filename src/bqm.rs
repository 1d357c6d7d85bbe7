//! Binary quadratic models.
//!
//! A [`BinaryQuadraticModel`] is the objective handed to a minimizer:
//!
//! ```text
//! E(x) = offset + sum_i a_i x_i + sum_{i<j} b_ij x_i x_j
//! ```
//!
//! over binary (`x in {0, 1}`) or spin (`s in {-1, +1}`) variables.
//!
//! # Key canonicalization
//!
//! Interactions are stored once per unordered pair, under the key `(u, v)`
//! with `u < v`. A "diagonal" interaction `(u, u)` is not an interaction at
//! all: for binary variables `x * x = x`, so it is folded into the linear bias,
//! and for spins `s * s = 1`, so it is folded into the offset.
//!
//! ```
//! use qubo_logic::bqm::BinaryQuadraticModel;
//! use qubo_logic::types::Var;
//!
//! let (a, b) = (Var::new("a"), Var::new("b"));
//! let bqm = BinaryQuadraticModel::from_qubo(
//!     [((a.clone(), a.clone()), -1.0), ((b.clone(), a.clone()), 2.0), ((a.clone(), b.clone()), 1.0)],
//!     0.0,
//! );
//! assert_eq!(bqm.linear(&a), -1.0);
//! assert_eq!(bqm.quadratic(&a, &b), 3.0);
//! assert_eq!(bqm.num_interactions(), 1);
//! ```

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::{Sample, Var, Vartype};

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryQuadraticModel {
    vartype: Vartype,
    linear: BTreeMap<Var, f64>,
    quadratic: BTreeMap<(Var, Var), f64>,
    offset: f64,
}

fn canonical(u: Var, v: Var) -> (Var, Var) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl BinaryQuadraticModel {
    pub fn new(vartype: Vartype) -> Self {
        Self {
            vartype,
            linear: BTreeMap::new(),
            quadratic: BTreeMap::new(),
            offset: 0.0,
        }
    }

    /// Builds a binary model from a QUBO given as `(u, v) -> bias` entries.
    ///
    /// Entries for `(u, v)` and `(v, u)` are summed. Diagonal entries become linear biases.
    pub fn from_qubo<I>(qubo: I, offset: f64) -> Self
    where
        I: IntoIterator<Item = ((Var, Var), f64)>,
    {
        let mut bqm = Self::new(Vartype::Binary);
        for ((u, v), bias) in qubo {
            bqm.add_quadratic(u, v, bias);
        }
        bqm.add_offset(offset);
        bqm
    }

    /// Builds a spin model from linear fields `h` and couplings `j`.
    pub fn from_ising<H, J>(h: H, j: J, offset: f64) -> Self
    where
        H: IntoIterator<Item = (Var, f64)>,
        J: IntoIterator<Item = ((Var, Var), f64)>,
    {
        let mut bqm = Self::new(Vartype::Spin);
        for (v, bias) in h {
            bqm.add_linear(v, bias);
        }
        for ((u, v), bias) in j {
            bqm.add_quadratic(u, v, bias);
        }
        bqm.add_offset(offset);
        bqm
    }

    pub fn vartype(&self) -> Vartype {
        self.vartype
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Ensures the variable is part of the model, with a zero bias if it is new.
    pub fn add_variable(&mut self, var: Var) {
        self.linear.entry(var).or_insert(0.0);
    }

    pub fn add_linear(&mut self, var: Var, bias: f64) {
        *self.linear.entry(var).or_insert(0.0) += bias;
    }

    /// Adds `bias * u * v`, canonicalizing the key.
    pub fn add_quadratic(&mut self, u: Var, v: Var, bias: f64) {
        if u == v {
            match self.vartype {
                Vartype::Binary => self.add_linear(u, bias),
                Vartype::Spin => {
                    self.add_variable(u);
                    self.add_offset(bias);
                }
            }
            return;
        }
        self.add_variable(u.clone());
        self.add_variable(v.clone());
        if bias == 0.0 {
            return;
        }
        let key = canonical(u, v);
        let entry = self.quadratic.entry(key.clone()).or_insert(0.0);
        *entry += bias;
        if *entry == 0.0 {
            self.quadratic.remove(&key);
        }
    }

    pub fn add_offset(&mut self, offset: f64) {
        self.offset += offset;
    }

    pub fn linear(&self, var: &Var) -> f64 {
        self.linear.get(var).copied().unwrap_or(0.0)
    }

    /// Interaction bias between `u` and `v`, in either order.
    pub fn quadratic(&self, u: &Var, v: &Var) -> f64 {
        let key = canonical(u.clone(), v.clone());
        self.quadratic.get(&key).copied().unwrap_or(0.0)
    }

    pub fn linear_terms(&self) -> impl Iterator<Item = (&Var, f64)> {
        self.linear.iter().map(|(v, &b)| (v, b))
    }

    pub fn quadratic_terms(&self) -> impl Iterator<Item = (&Var, &Var, f64)> {
        self.quadratic.iter().map(|((u, v), &b)| (u, v, b))
    }

    pub fn variables(&self) -> impl Iterator<Item = &Var> {
        self.linear.keys()
    }

    pub fn contains(&self, var: &Var) -> bool {
        self.linear.contains_key(var)
    }

    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Energy of a sample, interpreting bits according to the model's vartype.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVariable`] if some model variable is not assigned.
    /// Extra variables in the sample are ignored.
    pub fn energy(&self, sample: &Sample) -> Result<f64> {
        let value = |var: &Var| -> Result<f64> {
            sample
                .get(var)
                .map(|&bit| self.vartype.value(bit))
                .ok_or_else(|| Error::MissingVariable(var.clone()))
        };
        let mut energy = self.offset;
        for (v, &bias) in &self.linear {
            energy += bias * value(v)?;
        }
        for ((u, v), &bias) in &self.quadratic {
            energy += bias * value(u)? * value(v)?;
        }
        Ok(energy)
    }

    /// Removes a variable by fixing it to the given value.
    pub fn fix_variable(&mut self, var: &Var, bit: bool) {
        let value = self.vartype.value(bit);
        if let Some(bias) = self.linear.remove(var) {
            self.offset += bias * value;
        }
        let touching: Vec<(Var, Var)> = self
            .quadratic
            .keys()
            .filter(|(u, v)| u == var || v == var)
            .cloned()
            .collect();
        for key in touching {
            if let Some(bias) = self.quadratic.remove(&key) {
                let other = if &key.0 == var { key.1 } else { key.0 };
                self.add_linear(other, bias * value);
            }
        }
    }

    /// Returns the equivalent model over spin variables.
    ///
    /// Uses `x = (s + 1) / 2`.
    pub fn to_spin(&self) -> BinaryQuadraticModel {
        if self.vartype == Vartype::Spin {
            return self.clone();
        }
        let mut res = Self::new(Vartype::Spin);
        res.offset = self.offset;
        for (v, &a) in &self.linear {
            res.add_linear(v.clone(), a / 2.0);
            res.offset += a / 2.0;
        }
        for ((u, v), &b) in &self.quadratic {
            res.add_quadratic(u.clone(), v.clone(), b / 4.0);
            res.add_linear(u.clone(), b / 4.0);
            res.add_linear(v.clone(), b / 4.0);
            res.offset += b / 4.0;
        }
        res
    }

    /// Returns the equivalent model over binary variables.
    ///
    /// Uses `s = 2x - 1`.
    pub fn to_binary(&self) -> BinaryQuadraticModel {
        if self.vartype == Vartype::Binary {
            return self.clone();
        }
        let mut res = Self::new(Vartype::Binary);
        res.offset = self.offset;
        for (v, &h) in &self.linear {
            res.add_linear(v.clone(), 2.0 * h);
            res.offset -= h;
        }
        for ((u, v), &j) in &self.quadratic {
            res.add_quadratic(u.clone(), v.clone(), 4.0 * j);
            res.add_linear(u.clone(), -2.0 * j);
            res.add_linear(v.clone(), -2.0 * j);
            res.offset += j;
        }
        res
    }

    /// Returns the model as an upper-triangular QUBO dictionary and an offset.
    ///
    /// Linear biases appear on the diagonal. Spin models are converted first.
    pub fn to_qubo(&self) -> (BTreeMap<(Var, Var), f64>, f64) {
        let bqm = self.to_binary();
        let mut qubo = BTreeMap::new();
        for (v, &a) in &bqm.linear {
            if a != 0.0 {
                qubo.insert((v.clone(), v.clone()), a);
            }
        }
        for (key, &b) in &bqm.quadratic {
            qubo.insert(key.clone(), b);
        }
        (qubo, bqm.offset)
    }
}
