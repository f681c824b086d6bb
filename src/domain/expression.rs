//! Set-style partial update instructions.
//!
//! Attribute names and values never appear inline in the expression text.
//! Each clause refers to a name placeholder (`#attr`) and a value placeholder
//! (`:attr`), and the two maps carry the actual name and value. This keeps
//! attribute names that collide with store keywords from breaking the
//! expression.

use crate::error::{Result, StoreError};
use serde_json::Value;
use std::collections::BTreeMap;

const SET_PREFIX: &str = "set ";
const CLAUSE_SEPARATOR: &str = ", ";
const NAME_PLACEHOLDER: char = '#';
const VALUE_PLACEHOLDER: char = ':';

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    expression: String,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, Value>,
}

impl UpdateExpression {
    /// Builds one `#attr = :attr` clause per pair, in the order given.
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut update = Self::default();
        let mut clauses = Vec::new();

        for (attribute, value) in assignments {
            let name_key = format!("{NAME_PLACEHOLDER}{attribute}");
            let value_key = format!("{VALUE_PLACEHOLDER}{attribute}");
            clauses.push(format!("{name_key} = {value_key}"));
            update.names.insert(name_key, attribute.to_string());
            update.values.insert(value_key, value);
        }

        if !clauses.is_empty() {
            update.expression = format!("{SET_PREFIX}{}", clauses.join(CLAUSE_SEPARATOR));
        }
        update
    }

    /// Reassembles an expression received from elsewhere.
    pub fn from_parts(
        expression: impl Into<String>,
        names: BTreeMap<String, String>,
        values: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            expression: expression.into(),
            names,
            values,
        }
    }

    /// True when there is nothing to set.
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Evaluates the expression against its placeholder maps.
    ///
    /// Returns the concrete `(attribute, value)` pairs to write, in clause
    /// order.
    pub fn resolve(&self) -> Result<Vec<(String, Value)>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let body = self
            .expression
            .strip_prefix(SET_PREFIX)
            .ok_or_else(|| malformed(format!("missing '{}' prefix", SET_PREFIX.trim())))?;

        body.split(CLAUSE_SEPARATOR)
            .map(|clause| self.resolve_clause(clause))
            .collect()
    }

    fn resolve_clause(&self, clause: &str) -> Result<(String, Value)> {
        let (name_key, value_key) = clause
            .split_once('=')
            .map(|(lhs, rhs)| (lhs.trim(), rhs.trim()))
            .ok_or_else(|| malformed(format!("clause without '=': {clause}")))?;

        if !name_key.starts_with(NAME_PLACEHOLDER) || !value_key.starts_with(VALUE_PLACEHOLDER) {
            return Err(malformed(format!("clause without placeholders: {clause}")));
        }

        let attribute = self
            .names
            .get(name_key)
            .ok_or_else(|| malformed(format!("unbound name placeholder {name_key}")))?;
        let value = self
            .values
            .get(value_key)
            .ok_or_else(|| malformed(format!("unbound value placeholder {value_key}")))?;

        Ok((attribute.clone(), value.clone()))
    }
}

fn malformed(reason: String) -> StoreError {
    StoreError::MalformedExpression(reason)
}
