//! Gate constraints as penalty Hamiltonians.
//!
//! Where the functions in [`gate`](crate::gate) compute the *value* of a gate,
//! the functions here relate an existing output variable to the inputs: the
//! returned expression is `0` exactly when `out` equals the gate applied to
//! the inputs, and at least `1` otherwise. Summing such penalties over every
//! gate of a circuit gives an objective whose ground states are the
//! consistent assignments of the circuit.
//!
//! All penalties are quadratic, so they compile without auxiliary variables.
//! XOR cannot be expressed quadratically over three variables, so
//! [`xor_constraint`] takes one extra ancilla, which equals `a AND b` in
//! every ground state.

use crate::expr::Expr;

/// `out == NOT a`: `2*a*out - a - out + 1`.
pub fn not_constraint(a: &Expr, out: &Expr) -> Expr {
    2.0 * a * out - a - out + 1.0
}

/// `out == a AND b`: `a*b - 2*(a + b)*out + 3*out`.
pub fn and_constraint(a: &Expr, b: &Expr, out: &Expr) -> Expr {
    a * b - 2.0 * (a + b) * out + 3.0 * out
}

/// `out == a OR b`: `a*b + (a + b)*(1 - 2*out) + out`.
pub fn or_constraint(a: &Expr, b: &Expr, out: &Expr) -> Expr {
    a * b + (a + b) * (1.0 - 2.0 * out) + out
}

/// `out == a XOR b`: `(a + b - out - 2*aux)^2`.
pub fn xor_constraint(a: &Expr, b: &Expr, out: &Expr, aux: &Expr) -> Expr {
    let diff = a + b - out - 2.0 * aux;
    &diff * &diff
}
