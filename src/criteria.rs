// Copyright 2025 Cowboy AI, LLC.

//! Condition and sort expressions plus the manager-owned search filter
//!
//! These are plain values handed to the external domain manager. Their
//! evaluation belongs to the manager; this module only builds and combines them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::accumulator::Slice;
use crate::errors::{FrontendError, FrontendResult};

/// Comparison operator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `=~` (starts with)
    StartsWith,
    /// `~=` (contains)
    Contains,
}

impl Operator {
    /// Parse an operator token
    pub fn parse(token: &str) -> FrontendResult<Self> {
        Ok(match token {
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::Less,
            "<=" => Self::LessEqual,
            ">" => Self::Greater,
            ">=" => Self::GreaterEqual,
            "=~" => Self::StartsWith,
            "~=" => Self::Contains,
            other => {
                return Err(FrontendError::controller_with_details(
                    format!("Invalid operator \"{other}\""),
                    [("operator".to_string(), other.to_string())],
                ))
            }
        })
    }

    /// Operator token
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::StartsWith => "=~",
            Self::Contains => "~=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate passed to the domain manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Compare a key against a value
    Compare {
        /// Comparison operator
        operator: Operator,
        /// Field key, e.g. `product.code`
        key: String,
        /// Value compared against
        value: Value,
    },
    /// All conditions must hold
    And(Vec<Condition>),
    /// At least one condition must hold
    Or(Vec<Condition>),
    /// Negation
    Not(Box<Condition>),
}

impl Condition {
    /// Build a comparison
    pub fn compare(operator: Operator, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Compare {
            operator,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Combine with logical AND; a single condition is returned unwrapped
    pub fn and(mut conditions: Vec<Condition>) -> Option<Self> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop(),
            _ => Some(Condition::And(conditions)),
        }
    }

    /// Combine with logical OR; a single condition is returned unwrapped
    pub fn or(mut conditions: Vec<Condition>) -> Option<Self> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop(),
            _ => Some(Condition::Or(conditions)),
        }
    }

    /// Negate
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Parse the JSON condition form
    ///
    /// `{"==": {"product.code": "abc"}}` compares, `{"&&": [..]}` and
    /// `{"||": [..]}` combine, `{"!": {..}}` negates. Several entries in one
    /// object are combined with AND; an empty object yields `None`.
    pub fn parse(value: &Value) -> FrontendResult<Option<Self>> {
        let Value::Object(map) = value else {
            return Err(invalid_condition(value));
        };

        let mut parts = Vec::with_capacity(map.len());
        for (token, operand) in map {
            match token.as_str() {
                "&&" | "||" => {
                    let Value::Array(items) = operand else {
                        return Err(invalid_condition(operand));
                    };
                    let list = items
                        .iter()
                        .map(Self::parse)
                        .collect::<FrontendResult<Vec<_>>>()?
                        .into_iter()
                        .flatten()
                        .collect();
                    parts.extend(if token == "&&" {
                        Self::and(list)
                    } else {
                        Self::or(list)
                    });
                }
                "!" => parts.extend(Self::parse(operand)?.map(Self::not)),
                other => {
                    let operator = Operator::parse(other)?;
                    let Value::Object(pairs) = operand else {
                        return Err(invalid_condition(operand));
                    };
                    parts.extend(
                        pairs
                            .iter()
                            .map(|(key, value)| Self::compare(operator, key.clone(), value.clone())),
                    );
                }
            }
        }
        Ok(Self::and(parts))
    }
}

fn invalid_condition(value: &Value) -> FrontendError {
    FrontendError::controller_with_details(
        "Invalid condition",
        [("condition".to_string(), value.to_string())],
    )
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Sort in ascending order (`+`)
    #[default]
    Ascending,
    /// Sort in descending order (`-`)
    Descending,
}

impl SortDirection {
    /// Sign character used in sort keys
    pub fn sign(self) -> char {
        match self {
            SortDirection::Ascending => '+',
            SortDirection::Descending => '-',
        }
    }
}

/// Sort clause passed to the domain manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Direction
    pub direction: SortDirection,
    /// Field key or function-call key, passed through verbatim
    pub key: String,
}

impl Sort {
    /// Create a sort clause
    pub fn new(direction: SortDirection, key: impl Into<String>) -> Self {
        Self {
            direction,
            key: key.into(),
        }
    }
}

/// Expression collected by a controller before the terminal search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Filter predicate
    Condition(Condition),
    /// Sort clause
    Sort(Sort),
}

impl From<Condition> for Expression {
    fn from(condition: Condition) -> Self {
        Expression::Condition(condition)
    }
}

impl From<Sort> for Expression {
    fn from(sort: Sort) -> Self {
        Expression::Sort(sort)
    }
}

/// Search criteria owned by a domain manager
///
/// Managers hand out a fresh filter carrying their own base predicate; the
/// terminal controller operation folds its accumulated expressions onto it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Manager-defined base predicate (e.g. status or site restrictions)
    pub base: Option<Condition>,
    /// Accumulated conditions merged in by the controller
    pub conditions: Option<Condition>,
    /// Sort clauses in application order
    pub sortations: Vec<Sort>,
    /// Requested result window
    pub slice: Slice,
    /// Locale of the request, for language-dependent texts and sorting
    pub locale: Option<String>,
}

impl Filter {
    /// Create a filter with a base predicate
    pub fn with_base(base: Condition) -> Self {
        Self {
            base: Some(base),
            ..Default::default()
        }
    }

    /// Merge a combined condition with the base predicate
    pub fn merge(&mut self, condition: Option<Condition>) -> &mut Self {
        let parts = self.conditions.take().into_iter().chain(condition).collect();
        self.conditions = Condition::and(parts);
        self
    }

    /// Append sort clauses in order
    pub fn sort(&mut self, sortations: impl IntoIterator<Item = Sort>) -> &mut Self {
        self.sortations.extend(sortations);
        self
    }

    /// Effective predicate: base AND accumulated conditions
    pub fn predicate(&self) -> Option<Condition> {
        let parts = self.base.iter().chain(self.conditions.iter()).cloned().collect();
        Condition::and(parts)
    }
}
