use indexmap::IndexMap;
use std::sync::Arc;

use crate::origin::Origin;

/// The closed set of build-expression results the evaluator can produce.
///
/// Dynamic typing beyond this list is a non-goal; adding a variant
/// here is a breaking change to the whole crate, which is the point.
#[derive(Debug, Clone, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(name(ValueKind))]
#[strum_discriminants(derive(strum::Display))]
pub enum ValueData {
    Null,
    Bool(bool),
    Integer(i64),
    String(Arc<str>),
    List(Vec<Value>),
    /// A bulk snapshot of a `Scope`'s local bindings (`get_current_scope_values`),
    /// reified as a value so it can be passed around like any other result.
    Scope(Arc<IndexMap<String, Value>>),
}

/// A typed build-expression result together with the AST node that produced
/// it. Equality is structural over the payload only — two values with the
/// same data but different origins compare equal.
#[derive(Debug, Clone)]
pub struct Value {
    data: ValueData,
    origin: Origin,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Value {
    pub fn new(data: ValueData, origin: Origin) -> Self {
        Value { data, origin }
    }

    pub fn null(origin: Origin) -> Self {
        Value::new(ValueData::Null, origin)
    }

    pub fn bool(value: bool, origin: Origin) -> Self {
        Value::new(ValueData::Bool(value), origin)
    }

    pub fn integer(value: i64, origin: Origin) -> Self {
        Value::new(ValueData::Integer(value), origin)
    }

    pub fn string(value: impl Into<Arc<str>>, origin: Origin) -> Self {
        Value::new(ValueData::String(value.into()), origin)
    }

    pub fn list(value: Vec<Value>, origin: Origin) -> Self {
        Value::new(ValueData::List(value), origin)
    }

    pub fn scope_snapshot(value: IndexMap<String, Value>, origin: Origin) -> Self {
        Value::new(ValueData::Scope(Arc::new(value)), origin)
    }

    /// The AST node that produced this value. Replacing a binding via
    /// `Scope::set_value` carries the new origin; this accessor always
    /// reflects the most recent construction, never an earlier one.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn data(&self) -> &ValueData {
        &self.data
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::from(&self.data)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, ValueData::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            ValueData::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.data {
            ValueData::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match &self.data {
            ValueData::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scope(&self) -> Option<&IndexMap<String, Value>> {
        match &self.data {
            ValueData::Scope(map) => Some(map),
            _ => None,
        }
    }

    /// A short, stable name for the variant, used by callers building a
    /// `TypeMismatch` diagnostic.
    pub fn type_name(&self) -> &'static str {
        match self.data {
            ValueData::Null => "null",
            ValueData::Bool(_) => "bool",
            ValueData::Integer(_) => "integer",
            ValueData::String(_) => "string",
            ValueData::List(_) => "list",
            ValueData::Scope(_) => "scope",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_origin() {
        let a = Value::integer(5, Origin::new("a"));
        let b = Value::integer(5, Origin::new("b"));
        assert_eq!(a, b);
        assert_ne!(a.origin(), b.origin());
    }

    #[test]
    fn inequality_on_payload() {
        let a = Value::integer(5, Origin::new("a"));
        let b = Value::integer(6, Origin::new("a"));
        assert_ne!(a, b);
    }

    #[test]
    fn accessors_are_total() {
        let v = Value::string("x", Origin::new("a"));
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.as_integer(), None);
        assert_eq!(v.as_str(), Some("x"));
        assert_eq!(v.type_name(), "string");
    }

    #[test]
    fn null_is_unset_placeholder() {
        let v = Value::null(Origin::new("a"));
        assert!(v.is_null());
        assert_eq!(v.type_name(), "null");
    }
}
