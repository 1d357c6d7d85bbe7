//! Expression to DOT (Graphviz) conversion.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Variables** are rendered as double circles at the bottom (sink rank)
//! - **Constants** are rendered as plain text
//! - **Arithmetic nodes** are rendered as circles labeled with their operator
//! - **Gates** are rendered as boxes labeled with the gate name
//! - **Edges** point from a node to its operands; shared nodes appear once
//!
//! # Examples
//!
//! ```
//! use qubo_logic::expr::Expr;
//! use qubo_logic::gate::xor;
//!
//! let a = Expr::binary("a");
//! let b = Expr::binary("b");
//! let f = xor(&a, &b);
//!
//! let dot = f.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::expr::{Expr, NodeId};
use crate::types::Var;

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for arithmetic nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for variable leaves (default: "doublecircle")
    pub var_shape: &'static str,
    /// Shape for gate nodes (default: "box")
    pub gate_shape: &'static str,
    /// Whether to use HTML labels for variable names with an index suffix, e.g. `x_1` (default: true)
    pub use_html_labels: bool,
    /// Render the Hamiltonian body of each gate instead of its inputs (default: false)
    pub expand_gates: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            var_shape: "doublecircle",
            gate_shape: "box",
            use_html_labels: true,
            expand_gates: false,
        }
    }
}

/// Escapes text placed inside a quoted DOT string.
fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escapes text placed inside an HTML-like DOT label.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn var_label(var: &Var, config: &DotConfig) -> String {
    let name = var.name();
    if config.use_html_labels {
        if let Some((base, index)) = name.rsplit_once('_') {
            if !base.is_empty() && !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                return format!("<{}<SUB>{}</SUB>>", escape_html(base), index);
            }
        }
    }
    format!("\"{}\"", escape_quoted(name))
}

/// Assigns DOT node ids while walking an expression DAG.
struct DotWriter<'a> {
    config: &'a DotConfig,
    body: String,
    leaves: String,
    vars: HashMap<Var, usize>,
    nodes: HashMap<NodeId, usize>,
    next_id: usize,
}

impl<'a> DotWriter<'a> {
    fn fresh(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn visit(&mut self, expr: &Expr) -> Result<usize, std::fmt::Error> {
        let key = expr.node_id();
        if let Some(&id) = key.and_then(|k| self.nodes.get(&k)) {
            return Ok(id);
        }
        let id = match expr {
            Expr::Const(c) => {
                let id = self.fresh();
                writeln!(self.body, "n{} [shape=plaintext, label=\"{}\"];", id, c)?;
                id
            }
            Expr::Binary(v) => {
                if let Some(&id) = self.vars.get(v) {
                    return Ok(id);
                }
                let id = self.fresh();
                let label = var_label(v, self.config);
                writeln!(self.leaves, "n{} [shape={}, label={}];", id, self.config.var_shape, label)?;
                self.vars.insert(v.clone(), id);
                id
            }
            Expr::Add(l, r) => self.visit_op("+", &[&**l, &**r])?,
            Expr::Sub(l, r) => self.visit_op("-", &[&**l, &**r])?,
            Expr::Mul(l, r) => self.visit_op("*", &[&**l, &**r])?,
            Expr::Neg(e) => self.visit_op("neg", &[&**e])?,
            Expr::Gate(node) => {
                let id = self.fresh();
                writeln!(
                    self.body,
                    "n{} [shape={}, label=\"{}\"];",
                    id,
                    self.config.gate_shape,
                    node.kind().name()
                )?;
                if self.config.expand_gates {
                    let child = self.visit(node.body())?;
                    writeln!(self.body, "n{} -> n{} [style=dashed];", id, child)?;
                } else {
                    for (i, input) in node.inputs().iter().enumerate() {
                        let child = self.visit(input)?;
                        writeln!(self.body, "n{} -> n{} [label=\"{}\"];", id, child, i)?;
                    }
                }
                id
            }
        };
        if let Some(k) = key {
            self.nodes.insert(k, id);
        }
        Ok(id)
    }

    fn visit_op(&mut self, op: &str, children: &[&Expr]) -> Result<usize, std::fmt::Error> {
        let id = self.fresh();
        writeln!(self.body, "n{} [shape={}, label=\"{}\"];", id, self.config.node_shape, op)?;
        for child in children {
            let child_id = self.visit(child)?;
            writeln!(self.body, "n{} -> n{};", id, child_id)?;
        }
        Ok(id)
    }
}

impl Expr {
    /// Converts the expression to DOT (Graphviz) format.
    ///
    /// Gates are drawn as boxes connected to their inputs. Variables and inner
    /// nodes shared between several parents are drawn once.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the expression to DOT format with custom configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use qubo_logic::dot::DotConfig;
    /// use qubo_logic::expr::Expr;
    /// use qubo_logic::gate::or;
    ///
    /// let f = or(&Expr::binary("x_1"), &Expr::binary("x_2"));
    /// let config = DotConfig {
    ///     expand_gates: true,
    ///     ..DotConfig::default()
    /// };
    ///
    /// let dot = f.to_dot_with_config(&config).unwrap();
    /// assert!(dot.contains("Not"));
    /// ```
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut writer = DotWriter {
            config,
            body: String::new(),
            leaves: String::new(),
            vars: HashMap::new(),
            nodes: HashMap::new(),
            next_id: 0,
        };
        let root = writer.visit(self)?;

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [fixedsize=false];")?;
        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "r [shape=rect, label=\"f\"];")?;
        writeln!(dot, "}}")?;
        dot.push_str(&writer.body);
        if !writer.leaves.is_empty() {
            writeln!(dot, "{{ rank=sink")?;
            dot.push_str(&writer.leaves);
            writeln!(dot, "}}")?;
        }
        writeln!(dot, "r -> n{};", root)?;
        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gate::{and, not, xor};

    /// Basic test: verify DOT output is generated without errors
    #[test]
    fn test_to_dot_basic() {
        let a = Expr::binary("a");
        let b = Expr::binary("b");
        let f = 2.0 * &a - &b;

        let dot = f.to_dot().unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("label=\"a\""));
        assert!(dot.contains("label=\"2\""));
    }

    /// Shared variables and gates appear once
    #[test]
    fn test_to_dot_sharing() {
        let a = Expr::binary("a");
        let b = Expr::binary("b");
        let g = and(&a, &b);
        let f = xor(&g, &not(&g));

        let dot = f.to_dot().unwrap();
        assert_eq!(dot.matches("label=\"And\"").count(), 1);
        assert_eq!(dot.matches("label=\"a\"").count(), 1);
        assert_eq!(dot.matches("label=\"Xor\"").count(), 1);
    }

    /// Expanded gates show their bodies
    #[test]
    fn test_to_dot_expand_gates() {
        let a = Expr::binary("a");
        let b = Expr::binary("b");
        let f = xor(&a, &b);

        let config = DotConfig {
            expand_gates: true,
            ..DotConfig::default()
        };
        let dot = f.to_dot_with_config(&config).unwrap();
        assert!(dot.contains("label=\"Or\""));
        assert!(dot.contains("label=\"*\""));
        assert!(dot.contains("style=dashed"));

        let dot = f.to_dot().unwrap();
        assert!(!dot.contains("label=\"Or\""));
    }

    #[test]
    fn test_html_labels() {
        let x = Expr::binary("x_12");
        let dot = x.to_dot().unwrap();
        assert!(dot.contains("label=<x<SUB>12</SUB>>"));

        let config = DotConfig {
            use_html_labels: false,
            ..DotConfig::default()
        };
        let dot = x.to_dot_with_config(&config).unwrap();
        assert!(dot.contains("label=\"x_12\""));
    }

    #[test]
    fn test_labels_are_escaped() {
        let x = Expr::binary("a<b&c_1");
        let dot = x.to_dot().unwrap();
        assert!(dot.contains("label=<a&lt;b&amp;c<SUB>1</SUB>>"));

        let y = Expr::binary(r#"p\"q"#);
        let dot = y.to_dot().unwrap();
        assert!(dot.contains(r#"label="p\\\"q""#));
    }

    #[test]
    fn test_to_dot_shared_arithmetic() {
        let mut e = Expr::binary("x") + 1.0;
        for _ in 0..64 {
            e = &e * &e;
        }
        // Each level holds two copies of the previous root, sharing its children.
        let dot = e.to_dot().unwrap();
        assert_eq!(dot.matches("label=\"+\"").count(), 2);
        assert_eq!(dot.matches("label=\"*\"").count(), 127);
    }
}
