//! # qubo-logic: Boolean gates as binary quadratic models
//!
//! **`qubo-logic`** rewrites logical gates (NOT, AND, OR, XOR) into polynomial
//! expressions over 0/1-valued variables, and compiles such expressions into
//! binary quadratic models (QUBOs) that can be handed to a minimizer.
//!
//! ## Gates as polynomials
//!
//! Every gate is an algebraic identity over its inputs. For binary inputs the
//! identity evaluates to *exactly* the truth-table value of the gate:
//!
//! | Gate  | Identity                        |
//! |-------|---------------------------------|
//! | NOT   | `1 - a`                         |
//! | AND   | `a * b`                         |
//! | OR    | `NOT(AND(NOT a, NOT b))`        |
//! | XOR   | `AND(NOT(AND(a, b)), OR(a, b))` |
//!
//! Gates compose freely, since the output of a gate is again binary-valued.
//!
//! ## Basic Usage
//!
//! ```rust
//! use qubo_logic::expr::Expr;
//! use qubo_logic::gate::{and, not, or, xor};
//! use qubo_logic::types::sample;
//!
//! // 1. Declare variables
//! let a = Expr::binary("a");
//! let b = Expr::binary("b");
//!
//! // 2. Compose gates
//! let f = xor(&a, &b);
//!
//! // 3. Evaluate at an assignment
//! let s = sample([("a", true), ("b", false)]);
//! assert_eq!(f.eval(&s).unwrap(), 1.0);
//! assert_eq!(or(&a, &b).eval(&s).unwrap(), 1.0);
//! assert_eq!(not(&and(&a, &b)).eval(&s).unwrap(), 1.0);
//!
//! // 4. Compile to a quadratic model and minimize it
//! use qubo_logic::solver::{ExactSolver, Sampler};
//!
//! let model = f.compile().unwrap();
//! let best = ExactSolver::default().sample(model.bqm()).unwrap();
//! assert_eq!(best.first().unwrap().energy, 0.0);
//! ```
//!
//! ## Core Components
//!
//! - **[`expr`]**: immutable expression trees and their evaluation.
//! - **[`gate`]**: the gate constructors.
//! - **[`poly`]**: expansion into multilinear polynomials.
//! - **[`compile`]**: degree reduction and compilation into a [`bqm::BinaryQuadraticModel`].
//! - **[`constraint`]**: penalty forms enforcing `out == gate(inputs)`.
//! - **[`solver`]**: the [`solver::Sampler`] boundary and a brute-force reference solver.
//! - **[`dot`]**: Graphviz rendering of expressions.

pub mod bqm;
pub mod compile;
pub mod constraint;
pub mod dot;
pub mod error;
pub mod expr;
pub mod gate;
pub mod poly;
pub mod solver;
pub mod types;
