//! Logical gates as polynomials over binary variables.
//!
//! Each constructor returns an [`Expr::Gate`] whose body is an algebraic
//! identity over its inputs. When the inputs are 0/1-valued, evaluating the
//! body yields exactly the truth-table value of the gate:
//!
//! | Gate  | Identity                               |
//! |-------|----------------------------------------|
//! | `not` | `1 - a`                                |
//! | `and` | `a * b`                                |
//! | `or`  | `not(and(not(a), not(b)))`             |
//! | `xor` | `and(not(and(a, b)), or(a, b))`        |
//!
//! Inputs must be binary-valued (variables or other gates). This is not
//! checked: passing e.g. `2 * a` gives meaningless results.
//!
//! ```
//! use qubo_logic::expr::Expr;
//! use qubo_logic::gate::{and, xor};
//! use qubo_logic::types::sample;
//!
//! let a = Expr::binary("a");
//! let b = Expr::binary("b");
//! let c = Expr::binary("c");
//! let f = xor(&and(&a, &b), &c);
//!
//! let s = sample([("a", true), ("b", true), ("c", false)]);
//! assert_eq!(f.eval(&s).unwrap(), 1.0);
//! ```

use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::expr::Expr;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateKind {
    Not,
    And,
    Or,
    Xor,
}

impl GateKind {
    pub const ALL: [GateKind; 4] = [GateKind::Not, GateKind::And, GateKind::Or, GateKind::Xor];

    pub fn name(self) -> &'static str {
        match self {
            GateKind::Not => "Not",
            GateKind::And => "And",
            GateKind::Or => "Or",
            GateKind::Xor => "Xor",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            GateKind::Not => 1,
            GateKind::And | GateKind::Or | GateKind::Xor => 2,
        }
    }

    /// Reference truth table of the gate.
    ///
    /// # Panics
    ///
    /// Panics if `inputs.len()` differs from the arity of the gate.
    pub fn truth(self, inputs: &[bool]) -> bool {
        assert_eq!(inputs.len(), self.arity(), "{} expects {} inputs", self.name(), self.arity());
        match self {
            GateKind::Not => !inputs[0],
            GateKind::And => inputs[0] && inputs[1],
            GateKind::Or => inputs[0] || inputs[1],
            GateKind::Xor => inputs[0] ^ inputs[1],
        }
    }

    /// Applies the gate to the given inputs.
    ///
    /// # Panics
    ///
    /// Panics if `inputs.len()` differs from the arity of the gate.
    pub fn build(self, inputs: &[Expr]) -> Expr {
        assert_eq!(inputs.len(), self.arity(), "{} expects {} inputs", self.name(), self.arity());
        match self {
            GateKind::Not => not(&inputs[0]),
            GateKind::And => and(&inputs[0], &inputs[1]),
            GateKind::Or => or(&inputs[0], &inputs[1]),
            GateKind::Xor => xor(&inputs[0], &inputs[1]),
        }
    }
}

/// Logical NOT: `1 - bit`.
pub fn not(bit: &Expr) -> Expr {
    let body = 1.0 - bit;
    Expr::mk_gate(GateKind::Not, vec![bit.clone()], body)
}

/// Logical AND: `a * b`.
pub fn and(a: &Expr, b: &Expr) -> Expr {
    let body = a * b;
    Expr::mk_gate(GateKind::And, vec![a.clone(), b.clone()], body)
}

/// Logical OR, by De Morgan: `not(and(not(a), not(b)))`.
pub fn or(a: &Expr, b: &Expr) -> Expr {
    let body = not(&and(&not(a), &not(b)));
    Expr::mk_gate(GateKind::Or, vec![a.clone(), b.clone()], body)
}

/// Logical XOR as `nand(a, b)` AND `or(a, b)`.
pub fn xor(a: &Expr, b: &Expr) -> Expr {
    let nand_ab = not(&and(a, b));
    let or_ab = or(a, b);
    let body = and(&nand_ab, &or_ab);
    Expr::mk_gate(GateKind::Xor, vec![a.clone(), b.clone()], body)
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        not(&self)
    }
}

impl Not for &Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        not(self)
    }
}

impl BitAnd for &Expr {
    type Output = Expr;

    fn bitand(self, rhs: Self) -> Expr {
        and(self, rhs)
    }
}

impl BitOr for &Expr {
    type Output = Expr;

    fn bitor(self, rhs: Self) -> Expr {
        or(self, rhs)
    }
}

impl BitXor for &Expr {
    type Output = Expr;

    fn bitxor(self, rhs: Self) -> Expr {
        xor(self, rhs)
    }
}
