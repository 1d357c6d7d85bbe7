//! Expressions over binary variables.
//!
//! An [`Expr`] is an immutable tree (in fact a DAG, since sub-expressions are
//! shared through [`Arc`]) whose leaves are constants and binary variables, and
//! whose inner nodes are arithmetic operations or named [gates](crate::gate).
//!
//! Expressions are built bottom-up and never mutated afterwards:
//!
//! ```
//! use qubo_logic::expr::Expr;
//! use qubo_logic::types::sample;
//!
//! let a = Expr::binary("a");
//! let b = Expr::binary("b");
//! let h = 2.0 * &a * &b - &a + 1.0;
//!
//! let value = h.eval(&sample([("a", true), ("b", true)])).unwrap();
//! assert_eq!(value, 2.0);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::gate::GateKind;
use crate::types::{Sample, Var, Vartype};

#[derive(Debug, Clone)]
pub enum Expr {
    Const(f64),
    Binary(Var),
    Add(Arc<Expr>, Arc<Expr>),
    Sub(Arc<Expr>, Arc<Expr>),
    Mul(Arc<Expr>, Arc<Expr>),
    Neg(Arc<Expr>),
    Gate(Arc<GateNode>),
}

/// A gate application: the gate kind, its inputs, and the Hamiltonian it stands for.
#[derive(Debug)]
pub struct GateNode {
    kind: GateKind,
    inputs: Vec<Expr>,
    body: Expr,
}

impl GateNode {
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn inputs(&self) -> &[Expr] {
        &self.inputs
    }

    /// The polynomial expression this gate evaluates to.
    pub fn body(&self) -> &Expr {
        &self.body
    }
}

// Constructors
impl Expr {
    pub fn binary(name: impl Into<Var>) -> Self {
        Expr::Binary(name.into())
    }

    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    pub fn mk_add(lhs: Expr, rhs: Expr) -> Self {
        Expr::Add(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn mk_sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sub(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn mk_mul(lhs: Expr, rhs: Expr) -> Self {
        Expr::Mul(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn mk_neg(expr: Expr) -> Self {
        Expr::Neg(Arc::new(expr))
    }

    pub(crate) fn mk_gate(kind: GateKind, inputs: Vec<Expr>, body: Expr) -> Self {
        debug_assert_eq!(inputs.len(), kind.arity());
        Expr::Gate(Arc::new(GateNode { kind, inputs, body }))
    }
}

/// Identity of an inner node, used to memoize traversals of the DAG.
///
/// Gates are identified by their shared [`GateNode`], arithmetic nodes by
/// their address, which is stable while the root is borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeId {
    Gate(usize),
    Op(usize),
}

impl Expr {
    /// `None` for leaves, which are cheaper to recompute than to look up.
    pub(crate) fn node_id(&self) -> Option<NodeId> {
        match self {
            Expr::Const(_) | Expr::Binary(_) => None,
            Expr::Gate(node) => Some(NodeId::Gate(Arc::as_ptr(node) as usize)),
            Expr::Add(..) | Expr::Sub(..) | Expr::Mul(..) | Expr::Neg(_) => {
                Some(NodeId::Op(self as *const Expr as usize))
            }
        }
    }

    /// Evaluates the expression at the given assignment.
    ///
    /// Every inner node is evaluated once per call, however many times it is
    /// shared, so the cost is linear in the size of the expression DAG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVariable`] if `sample` does not assign a variable
    /// that occurs in the expression.
    pub fn eval(&self, sample: &Sample) -> Result<f64> {
        let mut cache = HashMap::new();
        self.eval_cached(sample, &mut cache)
    }

    fn eval_cached(&self, sample: &Sample, cache: &mut HashMap<NodeId, f64>) -> Result<f64> {
        let key = self.node_id();
        if let Some(value) = key.and_then(|k| cache.get(&k)) {
            return Ok(*value);
        }
        let value = match self {
            Expr::Const(c) => *c,
            Expr::Binary(v) => sample
                .get(v)
                .map(|&bit| Vartype::Binary.value(bit))
                .ok_or_else(|| Error::MissingVariable(v.clone()))?,
            Expr::Add(l, r) => l.eval_cached(sample, cache)? + r.eval_cached(sample, cache)?,
            Expr::Sub(l, r) => l.eval_cached(sample, cache)? - r.eval_cached(sample, cache)?,
            Expr::Mul(l, r) => l.eval_cached(sample, cache)? * r.eval_cached(sample, cache)?,
            Expr::Neg(e) => -e.eval_cached(sample, cache)?,
            Expr::Gate(node) => node.body.eval_cached(sample, cache)?,
        };
        if let Some(k) = key {
            cache.insert(k, value);
        }
        Ok(value)
    }

    /// Returns all variables occurring in the expression.
    pub fn variables(&self) -> BTreeSet<Var> {
        let mut vars = BTreeSet::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<&Expr> = vec![self];
        while let Some(expr) = stack.pop() {
            if let Some(id) = expr.node_id() {
                if !visited.insert(id) {
                    continue;
                }
            }
            match expr {
                Expr::Const(_) => {}
                Expr::Binary(v) => {
                    vars.insert(v.clone());
                }
                Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
                Expr::Neg(e) => stack.push(e),
                Expr::Gate(node) => stack.push(&node.body),
            }
        }
        vars
    }

    /// Returns the gate kind if this expression is a gate application.
    pub fn gate_kind(&self) -> Option<GateKind> {
        match self {
            Expr::Gate(node) => Some(node.kind),
            _ => None,
        }
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        Expr::Binary(var)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Binary(v) => write!(f, "{}", v),
            Expr::Add(l, r) => write!(f, "({} + {})", l, r),
            Expr::Sub(l, r) => write!(f, "({} - {})", l, r),
            Expr::Mul(l, r) => write!(f, "{} * {}", l, r),
            Expr::Neg(e) => write!(f, "-{}", e),
            Expr::Gate(node) => {
                write!(f, "{}(", node.kind.name())?;
                for (i, input) in node.inputs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", input)?;
                }
                write!(f, ")")
            }
        }
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $ctor:ident) => {
        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$ctor(self, rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::$ctor(self, rhs.clone())
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$ctor(self.clone(), rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::$ctor(self.clone(), rhs.clone())
            }
        }

        impl $trait<f64> for Expr {
            type Output = Expr;

            fn $method(self, rhs: f64) -> Expr {
                Expr::$ctor(self, Expr::Const(rhs))
            }
        }

        impl $trait<f64> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: f64) -> Expr {
                Expr::$ctor(self.clone(), Expr::Const(rhs))
            }
        }

        impl $trait<Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$ctor(Expr::Const(self), rhs)
            }
        }

        impl $trait<&Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::$ctor(Expr::Const(self), rhs.clone())
            }
        }
    };
}

impl_binop!(Add, add, mk_add);
impl_binop!(Sub, sub, mk_sub);
impl_binop!(Mul, mul, mk_mul);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::mk_neg(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::mk_neg(self.clone())
    }
}

impl Sum for Expr {
    fn sum<I: Iterator<Item = Expr>>(iter: I) -> Expr {
        iter.reduce(Expr::mk_add).unwrap_or(Expr::Const(0.0))
    }
}
