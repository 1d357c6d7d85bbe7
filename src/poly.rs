//! Multilinear polynomials over binary variables.
//!
//! Expanding an [`Expr`] yields a [`Polynomial`]: a sum of monomials with real
//! coefficients. Since variables are binary, `x * x = x`, so every monomial is
//! a *set* of variables and the polynomial is multilinear.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::expr::{Expr, NodeId};
use crate::types::{Sample, Var};

/// A product of distinct binary variables.
///
/// # Invariants
///
/// - Variables are sorted and deduplicated.
/// - The empty monomial is the constant `1`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Monomial(Vec<Var>);

impl Monomial {
    /// The constant monomial `1`.
    pub fn one() -> Self {
        Monomial(Vec::new())
    }

    pub fn var(var: Var) -> Self {
        Monomial(vec![var])
    }

    pub fn from_vars(vars: impl IntoIterator<Item = Var>) -> Self {
        let mut vars: Vec<Var> = vars.into_iter().collect();
        vars.sort();
        vars.dedup();
        Monomial(vars)
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    pub fn vars(&self) -> &[Var] {
        &self.0
    }

    pub fn contains(&self, var: &Var) -> bool {
        self.0.binary_search(var).is_ok()
    }

    /// Product of two monomials (set union).
    pub fn product(&self, other: &Monomial) -> Monomial {
        let mut vars = Vec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => {
                    vars.push(self.0[i].clone());
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    vars.push(other.0[j].clone());
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    vars.push(self.0[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        vars.extend_from_slice(&self.0[i..]);
        vars.extend_from_slice(&other.0[j..]);
        Monomial(vars)
    }

    /// Replaces the pair `u * v` by the single variable `y`.
    ///
    /// Returns `None` if the monomial does not contain both `u` and `v`.
    pub fn substitute_pair(&self, u: &Var, v: &Var, y: &Var) -> Option<Monomial> {
        if !self.contains(u) || !self.contains(v) {
            return None;
        }
        let rest = self.0.iter().filter(|&x| x != u && x != v).cloned();
        Some(Monomial::from_vars(rest.chain(std::iter::once(y.clone()))))
    }

    pub fn eval(&self, sample: &Sample) -> Result<bool> {
        let mut value = true;
        for var in &self.0 {
            let bit = *sample.get(var).ok_or_else(|| Error::MissingVariable(var.clone()))?;
            value &= bit;
        }
        Ok(value)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }
        for (i, var) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            write!(f, "{}", var)?;
        }
        Ok(())
    }
}

/// A multilinear polynomial: a map from monomials to non-zero coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, f64>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        let mut poly = Self::zero();
        poly.add_term(Monomial::one(), value);
        poly
    }

    pub fn var(var: Var) -> Self {
        let mut poly = Self::zero();
        poly.add_term(Monomial::var(var), 1.0);
        poly
    }

    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, f64)>) -> Self {
        let mut poly = Self::zero();
        for (m, c) in terms {
            poly.add_term(m, c);
        }
        poly
    }

    /// Adds `coeff * monomial`, dropping the term if it cancels out.
    pub fn add_term(&mut self, monomial: Monomial, coeff: f64) {
        if coeff == 0.0 {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Vacant(e) => {
                e.insert(coeff);
            }
            Entry::Occupied(mut e) => {
                *e.get_mut() += coeff;
                // Exact cancellation, e.g. `a - a`.
                if *e.get() == 0.0 {
                    e.remove();
                }
            }
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, f64)> {
        self.terms.iter().map(|(m, &c)| (m, c))
    }

    pub fn coefficient(&self, monomial: &Monomial) -> f64 {
        self.terms.get(monomial).copied().unwrap_or(0.0)
    }

    pub fn constant_term(&self) -> f64 {
        self.coefficient(&Monomial::one())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Maximum degree over all monomials (0 for constants and the zero polynomial).
    pub fn degree(&self) -> usize {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    pub fn variables(&self) -> BTreeSet<Var> {
        self.terms.keys().flat_map(|m| m.vars().iter().cloned()).collect()
    }

    pub fn scale(&self, factor: f64) -> Polynomial {
        Polynomial::from_terms(self.terms.iter().map(|(m, &c)| (m.clone(), c * factor)))
    }

    pub fn eval(&self, sample: &Sample) -> Result<f64> {
        let mut total = 0.0;
        for (m, c) in self.terms() {
            if m.eval(sample)? {
                total += c;
            }
        }
        Ok(total)
    }

    /// Fully expands an expression.
    ///
    /// Shared inner nodes are expanded once.
    pub fn from_expr(expr: &Expr) -> Polynomial {
        let mut cache = HashMap::new();
        Self::expand(expr, &mut cache)
    }

    fn expand(expr: &Expr, cache: &mut HashMap<NodeId, Polynomial>) -> Polynomial {
        let key = expr.node_id();
        if let Some(poly) = key.and_then(|k| cache.get(&k)) {
            return poly.clone();
        }
        let poly = match expr {
            Expr::Const(c) => Polynomial::constant(*c),
            Expr::Binary(v) => Polynomial::var(v.clone()),
            Expr::Add(l, r) => Self::expand(l, cache) + Self::expand(r, cache),
            Expr::Sub(l, r) => Self::expand(l, cache) - Self::expand(r, cache),
            Expr::Mul(l, r) => &Self::expand(l, cache) * &Self::expand(r, cache),
            Expr::Neg(e) => -Self::expand(e, cache),
            Expr::Gate(node) => Self::expand(node.body(), cache),
        };
        if let Some(k) = key {
            cache.insert(k, poly.clone());
        }
        poly
    }
}

impl From<&Expr> for Polynomial {
    fn from(expr: &Expr) -> Self {
        Polynomial::from_expr(expr)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Polynomial) -> Polynomial {
        for (m, c) in rhs.terms {
            self.add_term(m, c);
        }
        self
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(mut self, rhs: Polynomial) -> Polynomial {
        for (m, c) in rhs.terms {
            self.add_term(m, -c);
        }
        self
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut res = Polynomial::zero();
        for (m1, &c1) in &self.terms {
            for (m2, &c2) in &rhs.terms {
                res.add_term(m1.product(m2), c1 * c2);
            }
        }
        res
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (m, c)) in self.terms().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if m.degree() == 0 {
                write!(f, "{}", c)?;
            } else {
                write!(f, "{} {}", c, m)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::gate::{and, not, or, xor};
    use crate::types::{all_samples, sample};

    fn mono(names: &[&str]) -> Monomial {
        Monomial::from_vars(names.iter().map(|&n| Var::new(n)))
    }

    #[test]
    fn test_monomial_canonical() {
        let m = mono(&["b", "a", "b"]);
        assert_eq!(m.degree(), 2);
        assert_eq!(m.to_string(), "a*b");
        assert_eq!(Monomial::one().to_string(), "1");
    }

    #[test]
    fn test_monomial_product_idempotent() {
        let ab = mono(&["a", "b"]);
        let bc = mono(&["b", "c"]);
        assert_eq!(ab.product(&bc), mono(&["a", "b", "c"]));
        assert_eq!(ab.product(&ab), ab);
        assert_eq!(ab.product(&Monomial::one()), ab);
    }

    #[test]
    fn test_substitute_pair() {
        let m = mono(&["a", "b", "c"]);
        let y = Var::new("a*b");
        let r = m.substitute_pair(&Var::new("a"), &Var::new("b"), &y).unwrap();
        assert_eq!(r, Monomial::from_vars([Var::new("c"), y.clone()]));
        assert_eq!(mono(&["a", "c"]).substitute_pair(&Var::new("a"), &Var::new("b"), &y), None);
    }

    #[test]
    fn test_cancellation() {
        let a = Expr::binary("a");
        let p = Polynomial::from_expr(&(&a - &a));
        assert!(p.is_zero());
        assert_eq!(p.to_string(), "0");
    }

    #[test]
    fn test_expand_square() {
        // (a + b)^2 = a + b + 2ab over binary variables.
        let a = Expr::binary("a");
        let b = Expr::binary("b");
        let s = &a + &b;
        let p = Polynomial::from_expr(&(&s * &s));
        assert_eq!(p.len(), 3);
        assert_eq!(p.coefficient(&mono(&["a"])), 1.0);
        assert_eq!(p.coefficient(&mono(&["b"])), 1.0);
        assert_eq!(p.coefficient(&mono(&["a", "b"])), 2.0);
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn test_expand_gates() {
        let a = Expr::binary("a");
        let b = Expr::binary("b");

        let p = Polynomial::from_expr(&not(&a));
        assert_eq!(p, Polynomial::from_terms([(Monomial::one(), 1.0), (mono(&["a"]), -1.0)]));

        let p = Polynomial::from_expr(&and(&a, &b));
        assert_eq!(p, Polynomial::from_terms([(mono(&["a", "b"]), 1.0)]));

        // a + b - ab
        let p = Polynomial::from_expr(&or(&a, &b));
        assert_eq!(p.coefficient(&mono(&["a", "b"])), -1.0);
        assert_eq!(p.coefficient(&mono(&["a"])), 1.0);
        assert_eq!(p.constant_term(), 0.0);

        // a + b - 2ab
        let p = Polynomial::from_expr(&xor(&a, &b));
        assert_eq!(p.len(), 3);
        assert_eq!(p.coefficient(&mono(&["a", "b"])), -2.0);
    }

    #[test]
    fn test_expansion_agrees_with_eval() {
        let a = Expr::binary("a");
        let b = Expr::binary("b");
        let c = Expr::binary("c");
        let f = or(&xor(&a, &b), &and(&not(&c), &a));
        let p = Polynomial::from_expr(&f);
        let vars: Vec<Var> = f.variables().into_iter().collect();
        for s in all_samples(&vars) {
            assert_eq!(p.eval(&s).unwrap(), f.eval(&s).unwrap());
        }
    }

    #[test]
    fn test_expand_shared_arithmetic() {
        let x = Expr::binary("x");
        let mut e = &x * (1.0 - Expr::binary("y"));
        for _ in 0..100 {
            e = &e * &e;
        }
        let p = Polynomial::from_expr(&e);
        assert_eq!(p.len(), 2);
        assert_eq!(p.coefficient(&mono(&["x"])), 1.0);
        assert_eq!(p.coefficient(&mono(&["x", "y"])), -1.0);
    }

    #[test]
    fn test_eval_missing_variable() {
        let p = Polynomial::var(Var::new("a"));
        assert_eq!(p.eval(&sample([("b", true)])), Err(Error::MissingVariable(Var::new("a"))));
    }
}
