//! Parameter encoding.
//!
//! Turns the named arguments of one operation into the exact parameters sent
//! upstream. Unset values are never inserted, so they can never reach the wire
//! as `null` or `""`; the API treats an absent parameter differently from an
//! empty one.

use serde_json::{Map, Number, Value};

use pa_core::constants::{self, REDACTED};
use pa_core::error::{PaError, PaResult};

use crate::operation::Operation;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Sent comma-joined, in the order given.
    List(Vec<String>),
    Bool(bool),
}

impl ParamValue {
    /// Wire form used in query strings.
    pub fn encode(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::UInt(u) => u.to_string(),
            ParamValue::Float(f) => f.to_string(),
            ParamValue::List(items) => items.join(constants::LIST_DELIMITER),
            ParamValue::Bool(b) => b.to_string(),
        }
    }

    /// JSON form used in request bodies.
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Int(i) => Value::Number((*i).into()),
            ParamValue::UInt(u) => Value::Number((*u).into()),
            ParamValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
            ParamValue::List(_) => Value::String(self.encode()),
            ParamValue::Bool(b) => Value::Bool(*b),
        }
    }

    /// Whether this value counts as unset.
    fn is_empty(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.trim().is_empty(),
            ParamValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::UInt(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::List(v)
    }
}

/// Named arguments for one call, in insertion order.
///
/// Setting a name twice replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter. Empty strings and empty lists are treated as unset.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        let value = value.into();
        if value.is_empty() {
            self.remove(name);
            return self;
        }
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
        self
    }

    /// Set a parameter only when a value is given.
    pub fn set_opt<V: Into<ParamValue>>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(name, v);
        }
        self
    }

    /// Set a list parameter from any sequence of displayable items, keeping order.
    pub fn set_list<I, T>(&mut self, name: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let items: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
        self.set(name, ParamValue::List(items))
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validated parameters for one operation, ready to be placed on a request.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedParams {
    entries: Vec<(String, ParamValue)>,
}

impl EncodedParams {
    /// String pairs for a query string, in caller order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(n, v)| (n.clone(), v.encode()))
            .collect()
    }

    /// JSON object for a request body.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(n, v)| (n.clone(), v.to_json()))
            .collect();
        Value::Object(map)
    }

    /// String pairs with credential-bearing values masked, for diagnostics.
    pub fn redacted(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(n, v)| {
                let shown = if constants::is_secret_param(n) {
                    REDACTED.to_string()
                } else {
                    v.encode()
                };
                (n.clone(), shown)
            })
            .collect()
    }

    /// Move the named parameters out, returning them as encoded strings in the
    /// order requested. Names that are absent are skipped.
    pub fn take_path_params(&mut self, names: &[&str]) -> Vec<(String, String)> {
        let mut taken = Vec::with_capacity(names.len());
        for name in names {
            if let Some(pos) = self.entries.iter().position(|(n, _)| n == name) {
                let (n, v) = self.entries.remove(pos);
                taken.push((n, v.encode()));
            }
        }
        taken
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate `params` against the operation's rules and encode them.
///
/// Checks run in a fixed order: unrecognized names, conflicting pairs,
/// required names, all-or-none groups, dependencies, then one-of sets.
pub fn encode(operation: Operation, params: &RequestParams) -> PaResult<EncodedParams> {
    let rules = operation.rules();
    let op = operation.name();

    if let Some(unknown) = params.names().find(|n| !rules.accepts(n)) {
        return Err(PaError::UnrecognizedParameter {
            operation: op,
            parameter: unknown.to_string(),
        });
    }

    for (first, second) in rules.exclusive {
        if params.contains(first) && params.contains(second) {
            return Err(PaError::ConflictingParameter {
                operation: op,
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }

    if let Some(missing) = rules.required.iter().find(|n| !params.contains(n)) {
        return Err(missing_parameter(op, missing));
    }

    for group in rules.together {
        let present = group.iter().filter(|n| params.contains(n)).count();
        if present > 0 && present < group.len() {
            if let Some(missing) = group.iter().find(|n| !params.contains(n)) {
                return Err(missing_parameter(op, missing));
            }
        }
    }

    for (dependent, dependency) in rules.requires {
        if params.contains(dependent) && !params.contains(dependency) {
            return Err(missing_parameter(op, dependency));
        }
    }

    if !rules.one_of.is_empty() && !rules.one_of.iter().any(|n| params.contains(n)) {
        return Err(missing_parameter(op, &rules.one_of.join(" or ")));
    }

    // Path segments accept only non-negative integer ids.
    for name in operation.path_params() {
        match params.get(name) {
            Some(ParamValue::UInt(_)) | None => {}
            Some(ParamValue::Int(i)) if *i >= 0 => {}
            Some(other) => {
                return Err(PaError::InvalidParameter {
                    parameter: name.to_string(),
                    reason: format!("expected a non-negative integer id, got {:?}", other.encode()),
                });
            }
        }
    }

    Ok(EncodedParams {
        entries: params.entries.clone(),
    })
}

fn missing_parameter(operation: &'static str, name: &str) -> PaError {
    PaError::MissingParameter {
        operation,
        parameter: name.to_string(),
    }
}
