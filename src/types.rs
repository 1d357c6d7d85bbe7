//! Binary variables, variable types and samples.
//!
//! Variables are identified by name only: two [`Var`]s carrying the same name
//! denote the same variable wherever they appear in an expression or a model.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A named binary variable.
///
/// # Invariants
///
/// - Identity, ordering and hashing are by name.
/// - Cloning is cheap (the name is shared).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(Arc<str>);

impl Var {
    /// Creates a variable with the given name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Var(name.into())
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Self {
        Var::new(name)
    }
}

impl From<String> for Var {
    fn from(name: String) -> Self {
        Var::new(name)
    }
}

impl From<&Var> for Var {
    fn from(var: &Var) -> Self {
        var.clone()
    }
}

/// Domain of the variables of a model.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Vartype {
    /// Variables take values in `{0, 1}`.
    Binary,
    /// Variables take values in `{-1, +1}`.
    Spin,
}

impl Vartype {
    /// Numeric value of a sampled bit in this domain.
    ///
    /// `true` maps to `1` (binary) or `+1` (spin), `false` maps to `0` or `-1`.
    pub fn value(self, bit: bool) -> f64 {
        match (self, bit) {
            (Vartype::Binary, true) => 1.0,
            (Vartype::Binary, false) => 0.0,
            (Vartype::Spin, true) => 1.0,
            (Vartype::Spin, false) => -1.0,
        }
    }
}

impl fmt::Display for Vartype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vartype::Binary => write!(f, "BINARY"),
            Vartype::Spin => write!(f, "SPIN"),
        }
    }
}

/// An assignment of values to variables.
pub type Sample = BTreeMap<Var, bool>;

/// Builds a [`Sample`] from `(variable, value)` pairs.
///
/// ```
/// use qubo_logic::types::{sample, Var};
///
/// let s = sample([("a", true), ("b", false)]);
/// assert_eq!(s[&Var::new("a")], true);
/// ```
pub fn sample<K, I>(pairs: I) -> Sample
where
    K: Into<Var>,
    I: IntoIterator<Item = (K, bool)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Iterates over all `2^n` samples of the given variables.
///
/// The `i`-th sample assigns bit `j` of `i` to the `j`-th variable, so the
/// first variable changes fastest.
///
/// # Panics
///
/// Panics if there are 64 variables or more. Callers that take the variable
/// count from user input, like [`ExactSolver`](crate::solver::ExactSolver),
/// check it against their own limit first.
pub fn all_samples(vars: &[Var]) -> impl Iterator<Item = Sample> + '_ {
    let count = u32::try_from(vars.len())
        .ok()
        .and_then(|n| 1u64.checked_shl(n));
    let Some(count) = count else {
        panic!("too many variables to enumerate: {}", vars.len());
    };
    (0u64..count).map(move |bits| {
        vars.iter()
            .enumerate()
            .map(|(j, v)| (v.clone(), (bits >> j) & 1 == 1))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_identity_by_name() {
        let a1 = Var::new("a");
        let a2 = Var::from(String::from("a"));
        let b = Var::from("b");
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert!(a1 < b);
        assert_eq!(a1.to_string(), "a");
    }

    #[test]
    fn test_vartype_value() {
        assert_eq!(Vartype::Binary.value(true), 1.0);
        assert_eq!(Vartype::Binary.value(false), 0.0);
        assert_eq!(Vartype::Spin.value(true), 1.0);
        assert_eq!(Vartype::Spin.value(false), -1.0);
    }

    #[test]
    fn test_sample_builder() {
        let s = sample([("x", true), ("y", false)]);
        assert_eq!(s.len(), 2);
        assert!(s[&Var::new("x")]);
        assert!(!s[&Var::new("y")]);
    }

    #[test]
    fn test_all_samples() {
        let vars = vec![Var::new("a"), Var::new("b")];
        let samples: Vec<Sample> = all_samples(&vars).collect();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[1], sample([("a", true), ("b", false)]));
        assert_eq!(samples[2], sample([("a", false), ("b", true)]));

        let none: Vec<Sample> = all_samples(&[]).collect();
        assert_eq!(none, vec![Sample::new()]);
    }

    #[test]
    #[should_panic(expected = "too many variables")]
    fn test_all_samples_too_many() {
        let vars: Vec<Var> = (0..64).map(|i| Var::new(format!("x{}", i))).collect();
        let _ = all_samples(&vars);
    }
}
