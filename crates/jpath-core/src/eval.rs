//! Path evaluator and result projection.
//!
//! Evaluation maintains a *context set*: an ordered sequence of borrowed
//! values, starting as `[root]`. Each step maps every context element, in
//! order, to zero or more results, concatenating them before the next step
//! runs. That depth-first, left-to-right discipline is what makes match order
//! deterministic for wildcard, slice, and recursive-descent expansion.
//!
//! Type mismatches never fail: a member step on an array, an index step on an
//! object, or an out-of-range index all contribute zero results for that
//! context. A compiled [`JsonPath`] therefore evaluates infallibly; "no
//! matches" is a legitimate empty result, not an error.

use crate::error::Result;
use crate::path::{CmpOp, DescentTarget, JsonPath, Predicate, Step};
use crate::value::Value;

impl JsonPath {
    /// Evaluate this path against `root`, returning every match in
    /// deterministic order (possibly none).
    pub fn select<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        let mut contexts: Vec<&'a Value> = vec![root];
        for step in &self.steps {
            let mut next = Vec::new();
            for ctx in contexts {
                apply_step(ctx, step, &mut next);
            }
            contexts = next;
        }
        contexts
    }

    /// Evaluate and project to the caller-facing convention:
    /// no match → `None`, one match → that value, several matches → a fresh
    /// array of them in evaluator order.
    pub fn query(&self, root: &Value) -> Option<Value> {
        project(self.select(root))
    }
}

impl Value {
    /// Compile `query` and run it against this value, collapsing the match
    /// list per [`project`]. Callers running the same query repeatedly should
    /// compile once with [`JsonPath::compile`] and reuse the path.
    pub fn query(&self, query: &str) -> Result<Option<Value>> {
        Ok(JsonPath::compile(query)?.query(self))
    }
}

/// Collapse a match list into the single-value-or-array convention:
/// `[]` → `None`, `[x]` → `x` unwrapped (even when `x` is itself an array or
/// object), `[x, y, ..]` → an array in the original order.
pub fn project(matches: Vec<&Value>) -> Option<Value> {
    match matches.len() {
        0 => None,
        1 => Some(matches[0].clone()),
        _ => Some(Value::Array(matches.into_iter().cloned().collect())),
    }
}

/// Apply one step to one context element, appending its results to `out`.
fn apply_step<'a>(ctx: &'a Value, step: &Step, out: &mut Vec<&'a Value>) {
    match step {
        Step::Member(name) => {
            if let Some(v) = ctx.get(name) {
                out.push(v);
            }
        }
        Step::Wildcard => push_children(ctx, out),
        Step::Index(i) => {
            if let Some(v) = ctx.at(*i) {
                out.push(v);
            }
        }
        Step::Slice { start, end, step } => {
            if let Value::Array(items) = ctx {
                for idx in slice_indices(items.len(), *start, *end, *step) {
                    out.push(&items[idx]);
                }
            }
        }
        Step::Descent(target) => descend(ctx, target, out),
        Step::Filter(pred) => {
            match ctx {
                Value::Array(items) => {
                    for item in items {
                        if satisfies(item, pred) {
                            out.push(item);
                        }
                    }
                }
                Value::Object(pairs) => {
                    for (_, v) in pairs {
                        if satisfies(v, pred) {
                            out.push(v);
                        }
                    }
                }
                // Primitive contexts have no children to filter.
                _ => {}
            }
        }
    }
}

/// All element/member-value children of a value, in stored order.
fn push_children<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => out.extend(items.iter()),
        Value::Object(pairs) => out.extend(pairs.iter().map(|(_, v)| v)),
        _ => {}
    }
}

/// Recursive descent: visit the subtree in pre-order (node before children,
/// children in stored order) and apply the target selector at every node.
fn descend<'a>(node: &'a Value, target: &DescentTarget, out: &mut Vec<&'a Value>) {
    match target {
        DescentTarget::All => push_children(node, out),
        DescentTarget::Member(name) => {
            if let Some(v) = node.get(name) {
                out.push(v);
            }
        }
        DescentTarget::Index(i) => {
            if let Some(v) = node.at(*i) {
                out.push(v);
            }
        }
    }
    match node {
        Value::Array(items) => {
            for item in items {
                descend(item, target, out);
            }
        }
        Value::Object(pairs) => {
            for (_, v) in pairs {
                descend(v, target, out);
            }
        }
        _ => {}
    }
}

/// Resolve the indices selected by `[start:end:step]` over an array of
/// `len` elements. Follows the Python convention: negative indices count
/// from the end, out-of-range bounds are clamped, a negative step walks
/// backward. The compiler rejects a zero step.
fn slice_indices(len: usize, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Vec<usize> {
    let len = len as i64;
    let step = step.unwrap_or(1);

    let normalize = |i: i64| if i < 0 { i + len } else { i };

    let (mut i, stop) = if step > 0 {
        let lo = normalize(start.unwrap_or(0)).clamp(0, len);
        let hi = normalize(end.unwrap_or(len)).clamp(0, len);
        (lo, hi)
    } else {
        let lo = normalize(start.unwrap_or(len - 1)).clamp(-1, len - 1);
        let hi = normalize(end.unwrap_or(-len - 1)).clamp(-1, len - 1);
        (lo, hi)
    };

    // A huge step must exhaust the walk, not overflow the cursor.
    let mut indices = Vec::new();
    if step > 0 {
        while i < stop {
            indices.push(i as usize);
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    } else {
        while i > stop {
            indices.push(i as usize);
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    }
    indices
}

/// Test one candidate against a filter predicate. The `@`-rooted key path is
/// resolved first; a missing key excludes the candidate. An existence
/// predicate (no comparison) is then satisfied; a comparison predicate
/// applies [`compare`].
fn satisfies(candidate: &Value, pred: &Predicate) -> bool {
    let mut current = candidate;
    for key in &pred.path {
        match current.get(key) {
            Some(v) => current = v,
            None => return false,
        }
    }
    match &pred.test {
        None => true,
        Some((op, literal)) => compare(current, *op, literal),
    }
}

/// Filter comparison semantics: Integer and Double compare at double
/// precision; strings compare lexicographically for ordering operators;
/// booleans and null support only equality. Comparing incompatible variants
/// with an ordering operator excludes the candidate rather than failing the
/// query.
fn compare(lhs: &Value, op: CmpOp, rhs: &Value) -> bool {
    use std::cmp::Ordering;

    let ordering = match (numeric(lhs), numeric(rhs)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (lhs, rhs) {
            (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
            _ => None,
        },
    };

    match op {
        CmpOp::Eq => match ordering {
            Some(ord) => ord == Ordering::Equal,
            None => lhs == rhs,
        },
        CmpOp::Ne => match ordering {
            Some(ord) => ord != Ordering::Equal,
            None => lhs != rhs,
        },
        CmpOp::Lt => ordering == Some(Ordering::Less),
        CmpOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        CmpOp::Gt => ordering == Some(Ordering::Greater),
        CmpOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Double(d) => Some(*d),
        _ => None,
    }
}
