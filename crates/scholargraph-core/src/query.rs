//! Cypher query text with bound parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Transaction mode a query is submitted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Read,
    Write,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Read => write!(f, "read"),
            AccessMode::Write => write!(f, "write"),
        }
    }
}

/// A value bound to a `$name` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Param {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    StringList(Vec<String>),
}

impl Param {
    /// Parse a CLI-style literal.
    ///
    /// A value wrapped in single or double quotes is always a string. Plain
    /// integers without leading zeros become `Int`, finite decimals written
    /// as `digits.digits` become `Float`, `true`/`false` become `Bool`, and
    /// everything else (`007`, `nan`, `inf`, `1e3`) stays a string.
    pub fn parse_literal(raw: &str) -> Self {
        if let Some(inner) = unquote(raw) {
            return Param::String(inner.to_string());
        }
        match raw {
            "true" => return Param::Bool(true),
            "false" => return Param::Bool(false),
            _ => {}
        }
        if is_integer_literal(raw) {
            if let Ok(i) = raw.parse::<i64>() {
                return Param::Int(i);
            }
        }
        if is_decimal_literal(raw) {
            if let Ok(f) = raw.parse::<f64>() {
                if f.is_finite() {
                    return Param::Float(f);
                }
            }
        }
        Param::String(raw.to_string())
    }
}

fn unquote(raw: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|q| {
        raw.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

fn unsigned_digits(raw: &str) -> &str {
    raw.strip_prefix('-').unwrap_or(raw)
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = unsigned_digits(raw);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

fn is_decimal_literal(raw: &str) -> bool {
    let Some((whole, frac)) = unsigned_digits(raw).split_once('.') else {
        return false;
    };
    (whole == "0" || is_integer_literal(whole))
        && !frac.is_empty()
        && frac.bytes().all(|b| b.is_ascii_digit())
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::String(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::String(v)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Float(v)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

impl From<Vec<String>> for Param {
    fn from(v: Vec<String>) -> Self {
        Param::StringList(v)
    }
}

impl From<&[&str]> for Param {
    fn from(v: &[&str]) -> Self {
        Param::StringList(v.iter().map(|s| s.to_string()).collect())
    }
}

/// An immutable Cypher statement plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CypherQuery {
    text: String,
    params: BTreeMap<String, Param>,
}

impl CypherQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
        }
    }

    /// Bind a parameter, replacing any earlier value under the same name.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &BTreeMap<String, Param> {
        &self.params
    }

    /// The statement text collapsed onto a single line, for headers and logs.
    pub fn one_line(&self) -> String {
        self.text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for CypherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_replaces_previous_binding() {
        let q = CypherQuery::new("RETURN $x AS x").param("x", 1i64).param("x", 2i64);
        assert_eq!(q.params().len(), 1);
        assert_eq!(q.params()["x"], Param::Int(2));
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(Param::parse_literal("42"), Param::Int(42));
        assert_eq!(Param::parse_literal("0.9"), Param::Float(0.9));
        assert_eq!(Param::parse_literal("true"), Param::Bool(true));
        assert_eq!(
            Param::parse_literal("Databases"),
            Param::String("Databases".to_string())
        );
    }

    #[test]
    fn test_parse_literal_keeps_ambiguous_values_as_strings() {
        for raw in ["007", "nan", "inf", "-inf", "NaN", "1e3", ".5", "5.", "-"] {
            assert_eq!(
                Param::parse_literal(raw),
                Param::String(raw.to_string()),
                "{raw}"
            );
        }
        assert_eq!(Param::parse_literal("0"), Param::Int(0));
        assert_eq!(Param::parse_literal("-3"), Param::Int(-3));
        assert_eq!(Param::parse_literal("-0.5"), Param::Float(-0.5));
    }

    #[test]
    fn test_quoted_literal_is_always_a_string() {
        assert_eq!(Param::parse_literal("'123'"), Param::String("123".to_string()));
        assert_eq!(Param::parse_literal("\"true\""), Param::String("true".to_string()));
        assert_eq!(Param::parse_literal("''"), Param::String(String::new()));
        assert_eq!(Param::parse_literal("'"), Param::String("'".to_string()));
    }

    #[test]
    fn test_one_line_collapses_whitespace() {
        let q = CypherQuery::new("MATCH (p:Paper)\n         RETURN p.title AS title\n  LIMIT 5");
        assert_eq!(q.one_line(), "MATCH (p:Paper) RETURN p.title AS title LIMIT 5");
    }
}
