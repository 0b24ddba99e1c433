//! JSONPath compiler — query string to executable step list.
//!
//! The grammar is deliberately small and strictly left-to-right:
//!
//! ```text
//! $                      root (required leading token)
//! .name    ['name']      member access
//! .*  [*]  .[*]          wildcard (all elements / member values)
//! [2]  [-1]              index (negative counts from the end)
//! [start:end:step]       slice, any part omissible, step != 0
//! ..name  ..*  ..[0]     recursive descent with a per-depth selector
//! [?(@.key)]             filter: child key exists
//! [?(@.key op literal)]  filter: comparison, op in == != < <= > >=
//! ```
//!
//! Compilation is pure: the same query string always yields an equal
//! [`JsonPath`], so callers may cache compiled paths by query string.
//! Errors carry the byte offset where scanning stopped.

use crate::error::{JsonError, Result};
use crate::value::Value;

/// A compiled JSONPath query: a flat, ordered list of steps executed left to
/// right against a growing-and-shrinking context set (see [`crate::eval`]).
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    pub(crate) steps: Vec<Step>,
}

/// One selection step of a compiled path.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    /// `.name` / `['name']` — the value under a key of an object context.
    Member(String),
    /// `.*` / `[*]` — all array elements or object member values.
    Wildcard,
    /// `[i]` — one array element, negative `i` counting from the end.
    Index(i64),
    /// `[start:end:step]` — a sub-range of an array context.
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// `..name` / `..*` / `..[i]` — apply a selector at every depth.
    Descent(DescentTarget),
    /// `[?(...)]` — keep only children satisfying a predicate.
    Filter(Predicate),
}

/// The per-depth selector attached to a recursive-descent step.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DescentTarget {
    /// `..*` — every child at every depth.
    All,
    /// `..name` — the value under `name` at every depth.
    Member(String),
    /// `..[i]` — the element at index `i` at every depth.
    Index(i64),
}

/// A filter predicate: a `@`-rooted key path, optionally compared against a
/// literal. With no comparison the predicate tests key existence.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Predicate {
    pub(crate) path: Vec<String>,
    pub(crate) test: Option<(CmpOp, Value)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl JsonPath {
    /// Compile a JSONPath query string.
    ///
    /// Fails with [`JsonError::PathSyntax`] when the query is empty, does not
    /// start with `$`, contains an unterminated bracket or quote, uses an
    /// unknown step syntax, or a filter uses an unsupported operator.
    pub fn compile(query: &str) -> Result<Self> {
        let mut sc = Scanner { query, pos: 0 };
        if query.is_empty() {
            return Err(sc.error(0, "empty query"));
        }
        if !sc.eat(b'$') {
            return Err(sc.error(0, "query must start with the root token '$'"));
        }

        let mut steps = Vec::new();
        while let Some(b) = sc.peek() {
            match b {
                b'.' if sc.rest().starts_with("..") => {
                    sc.advance(2);
                    steps.push(parse_descent(&mut sc)?);
                }
                b'.' => {
                    sc.advance(1);
                    match sc.peek() {
                        Some(b'*') => {
                            sc.advance(1);
                            steps.push(Step::Wildcard);
                        }
                        Some(b'[') => steps.push(parse_bracket(&mut sc)?),
                        Some(c) if is_ident_start(c) => {
                            steps.push(Step::Member(parse_ident(&mut sc)));
                        }
                        _ => {
                            return Err(
                                sc.error(sc.pos, "expected a member name, '*', or '[' after '.'")
                            )
                        }
                    }
                }
                b'[' => steps.push(parse_bracket(&mut sc)?),
                _ => {
                    let ch = sc.peek_char().unwrap_or_default();
                    return Err(sc.error(sc.pos, format!("unexpected character {ch:?} in query")));
                }
            }
        }

        Ok(JsonPath { steps })
    }
}

/// Byte-offset scanner over the query string. Multi-byte characters only ever
/// appear inside names and quoted strings, so single-byte dispatch on the
/// ASCII structural characters is safe.
struct Scanner<'a> {
    query: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.query[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.query.as_bytes().get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn error(&self, pos: usize, message: impl Into<String>) -> JsonError {
        JsonError::PathSyntax {
            pos,
            message: message.into(),
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Scan an unquoted member name (`[A-Za-z_][A-Za-z0-9_]*`, plus any
/// non-ASCII). The caller has checked `is_ident_start`.
fn parse_ident(sc: &mut Scanner<'_>) -> String {
    let start = sc.pos;
    while let Some(b) = sc.peek() {
        if is_ident_continue(b) {
            sc.advance(1);
        } else {
            break;
        }
    }
    sc.query[start..sc.pos].to_string()
}

/// Parse the selector following `..`.
fn parse_descent(sc: &mut Scanner<'_>) -> Result<Step> {
    match sc.peek() {
        Some(b'*') => {
            sc.advance(1);
            Ok(Step::Descent(DescentTarget::All))
        }
        Some(b'[') => {
            let open = sc.pos;
            match parse_bracket(sc)? {
                Step::Member(name) => Ok(Step::Descent(DescentTarget::Member(name))),
                Step::Index(i) => Ok(Step::Descent(DescentTarget::Index(i))),
                Step::Wildcard => Ok(Step::Descent(DescentTarget::All)),
                _ => Err(sc.error(open, "only a name, index, or '*' may follow '..'")),
            }
        }
        Some(c) if is_ident_start(c) => Ok(Step::Descent(DescentTarget::Member(parse_ident(sc)))),
        _ => Err(sc.error(sc.pos, "expected a name, '*', or '[' after '..'")),
    }
}

/// Parse a bracket selector. `sc` is positioned on the `[`.
fn parse_bracket(sc: &mut Scanner<'_>) -> Result<Step> {
    let open = sc.pos;
    sc.advance(1);
    sc.skip_spaces();
    match sc.peek() {
        None => Err(sc.error(open, "unterminated bracket selector")),
        Some(b'\'') | Some(b'"') => {
            let name = parse_quoted(sc)?;
            close_bracket(sc, open)?;
            Ok(Step::Member(name))
        }
        Some(b'*') => {
            sc.advance(1);
            close_bracket(sc, open)?;
            Ok(Step::Wildcard)
        }
        Some(b'?') => parse_filter(sc, open),
        _ => parse_index_or_slice(sc, open),
    }
}

/// Consume the closing `]` of a bracket selector opened at `open`.
fn close_bracket(sc: &mut Scanner<'_>, open: usize) -> Result<()> {
    sc.skip_spaces();
    match sc.peek() {
        Some(b']') => {
            sc.advance(1);
            Ok(())
        }
        Some(_) => Err(sc.error(sc.pos, "expected ']' to close bracket selector")),
        None => Err(sc.error(open, "unterminated bracket selector")),
    }
}

/// Parse a quoted name or string literal. `sc` is positioned on the opening
/// quote (single or double). Handles `\\`-escapes; unknown escapes pass
/// through verbatim.
fn parse_quoted(sc: &mut Scanner<'_>) -> Result<String> {
    let quote_pos = sc.pos;
    let quote = sc.peek().map(char::from).unwrap_or('\'');
    sc.advance(1);
    let mut out = String::new();
    loop {
        match sc.peek_char() {
            None => return Err(sc.error(quote_pos, "unterminated quoted string")),
            Some('\\') => {
                sc.advance(1);
                match sc.peek_char() {
                    None => return Err(sc.error(quote_pos, "unterminated quoted string")),
                    Some(esc) => {
                        match esc {
                            'n' => out.push('\n'),
                            'r' => out.push('\r'),
                            't' => out.push('\t'),
                            '\\' | '\'' | '"' => out.push(esc),
                            other => {
                                out.push('\\');
                                out.push(other);
                            }
                        }
                        sc.advance(esc.len_utf8());
                    }
                }
            }
            Some(c) if c == quote => {
                sc.advance(1);
                return Ok(out);
            }
            Some(c) => {
                out.push(c);
                sc.advance(c.len_utf8());
            }
        }
    }
}

/// Parse `[i]` or `[start:end:step]` after the opening bracket.
fn parse_index_or_slice(sc: &mut Scanner<'_>, open: usize) -> Result<Step> {
    let mut parts: Vec<Option<i64>> = Vec::new();
    loop {
        sc.skip_spaces();
        parts.push(parse_optional_int(sc)?);
        sc.skip_spaces();
        match sc.peek() {
            Some(b':') => {
                sc.advance(1);
                if parts.len() == 3 {
                    return Err(sc.error(sc.pos, "too many ':' in slice selector"));
                }
            }
            Some(b']') => {
                sc.advance(1);
                break;
            }
            Some(_) => {
                let ch = sc.peek_char().unwrap_or_default();
                return Err(sc.error(
                    sc.pos,
                    format!("unexpected character {ch:?} in bracket selector"),
                ));
            }
            None => return Err(sc.error(open, "unterminated bracket selector")),
        }
    }

    if parts.len() == 1 {
        match parts[0] {
            Some(i) => Ok(Step::Index(i)),
            None => Err(sc.error(open, "expected an index, slice, name, or '*'")),
        }
    } else {
        let step = parts.get(2).copied().flatten();
        if step == Some(0) {
            return Err(sc.error(open, "slice step cannot be zero"));
        }
        Ok(Step::Slice {
            start: parts[0],
            end: parts[1],
            step,
        })
    }
}

/// Parse an optional signed integer. Returns `None` when the next character
/// is not part of a number (slice parts may be omitted).
fn parse_optional_int(sc: &mut Scanner<'_>) -> Result<Option<i64>> {
    let start = sc.pos;
    if sc.peek() == Some(b'-') {
        sc.advance(1);
    }
    while matches!(sc.peek(), Some(b) if b.is_ascii_digit()) {
        sc.advance(1);
    }
    let text = &sc.query[start..sc.pos];
    if text.is_empty() {
        return Ok(None);
    }
    if text == "-" {
        return Err(sc.error(start, "expected digits after '-'"));
    }
    text.parse::<i64>()
        .map(Some)
        .map_err(|_| sc.error(start, "integer out of range"))
}

/// Parse a filter selector `?(...)]`. `sc` is positioned on the `?`.
fn parse_filter(sc: &mut Scanner<'_>, open: usize) -> Result<Step> {
    sc.advance(1);
    if !sc.eat(b'(') {
        return Err(sc.error(sc.pos, "expected '(' after '?'"));
    }
    sc.skip_spaces();
    if !sc.eat(b'@') {
        return Err(sc.error(sc.pos, "filter predicate must start with '@'"));
    }

    let mut path = Vec::new();
    while sc.peek() == Some(b'.') {
        sc.advance(1);
        match sc.peek() {
            Some(b) if is_ident_start(b) => path.push(parse_ident(sc)),
            _ => return Err(sc.error(sc.pos, "expected a member name after '.'")),
        }
    }
    if path.is_empty() {
        return Err(sc.error(sc.pos, "expected '.name' after '@' in filter predicate"));
    }

    sc.skip_spaces();
    let test = if sc.peek() == Some(b')') {
        None
    } else {
        let op = parse_cmp_op(sc)?;
        sc.skip_spaces();
        let literal = parse_literal(sc)?;
        Some((op, literal))
    };

    sc.skip_spaces();
    if !sc.eat(b')') {
        return Err(sc.error(sc.pos, "expected ')' to close filter predicate"));
    }
    close_bracket(sc, open)?;
    Ok(Step::Filter(Predicate { path, test }))
}

/// Parse a comparison operator. The operator token is scanned greedily so
/// unsupported operators like `=~` are reported as a whole.
fn parse_cmp_op(sc: &mut Scanner<'_>) -> Result<CmpOp> {
    let start = sc.pos;
    while matches!(sc.peek(), Some(b'=' | b'!' | b'<' | b'>' | b'~')) {
        sc.advance(1);
    }
    match &sc.query[start..sc.pos] {
        "==" | "=" => Ok(CmpOp::Eq),
        "!=" => Ok(CmpOp::Ne),
        "<" => Ok(CmpOp::Lt),
        "<=" => Ok(CmpOp::Le),
        ">" => Ok(CmpOp::Gt),
        ">=" => Ok(CmpOp::Ge),
        other => Err(sc.error(
            start,
            format!("unsupported filter operator {:?}", other),
        )),
    }
}

/// Parse a filter literal: quoted string, `true`/`false`/`null`, or a number
/// (with a fraction or exponent it becomes a Double, otherwise an Integer).
fn parse_literal(sc: &mut Scanner<'_>) -> Result<Value> {
    let start = sc.pos;
    match sc.peek() {
        Some(b'\'') | Some(b'"') => Ok(Value::String(parse_quoted(sc)?)),
        Some(b) if b == b'-' || b.is_ascii_digit() => {
            while matches!(
                sc.peek(),
                Some(b'-' | b'+' | b'.' | b'e' | b'E') | Some(b'0'..=b'9')
            ) {
                sc.advance(1);
            }
            let text = &sc.query[start..sc.pos];
            if text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
                text.parse::<f64>()
                    .map(Value::Double)
                    .map_err(|_| sc.error(start, "invalid number literal"))
            } else {
                text.parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| sc.error(start, "invalid number literal"))
            }
        }
        Some(b) if is_ident_start(b) => {
            let word = parse_ident(sc);
            match word.as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                "null" => Ok(Value::Null),
                other => Err(sc.error(start, format!("unknown literal {:?}", other))),
            }
        }
        _ => Err(sc.error(start, "expected a literal value")),
    }
}
