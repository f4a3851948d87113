//! Field values and per-type field accessor registries

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Textual form used by the string operators (`contains`, `startswith`, ...)
    ///
    /// Returns `None` for `Null` so that a missing value never matches a text search.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::String(s) => Some(Cow::Borrowed(s)),
            FieldValue::Integer(i) => Some(Cow::Owned(i.to_string())),
            FieldValue::Float(f) => Some(Cow::Owned(f.to_string())),
            FieldValue::Boolean(b) => Some(Cow::Owned(b.to_string())),
            FieldValue::Uuid(u) => Some(Cow::Owned(u.to_string())),
            FieldValue::DateTime(dt) => Some(Cow::Owned(dt.to_rfc3339())),
            FieldValue::Null => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) | FieldValue::Float(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Uuid(_) => 4,
            FieldValue::DateTime(_) => 5,
        }
    }

    /// Total order used when sorting entities by a field.
    ///
    /// `Null` sorts first. Integers and floats compare by exact numeric value
    /// (floats with `f64::total_cmp`). Values of unrelated variants are ordered
    /// by variant so that a mixed column still sorts deterministically.
    pub fn total_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Integer(i), FieldValue::Float(f)) => cmp_int_float(*i, *f),
            (FieldValue::Float(f), FieldValue::Integer(i)) => cmp_int_float(*i, *f).reverse(),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Comparison used by filter operators.
    ///
    /// A `String` on either side is parsed into the type of the other side, so a
    /// filter value of `"42"` compares against an integer field. Returns `None`
    /// when the two values cannot be compared.
    pub fn loose_cmp(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Some(Ordering::Equal),
            (FieldValue::Null, _) | (_, FieldValue::Null) => None,
            (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Integer(i), FieldValue::Float(f)) if !f.is_nan() => {
                Some(cmp_int_float(*i, *f))
            }
            (FieldValue::Float(f), FieldValue::Integer(i)) if !f.is_nan() => {
                Some(cmp_int_float(*i, *f).reverse())
            }
            (FieldValue::Integer(_), FieldValue::Float(_))
            | (FieldValue::Float(_), FieldValue::Integer(_)) => None,
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => Some(a.cmp(b)),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => Some(a.cmp(b)),
            (_, FieldValue::String(raw)) => self.loose_cmp(&self.parse_like(raw)?),
            (FieldValue::String(raw), _) => other.parse_like(raw)?.loose_cmp(other),
            _ => None,
        }
    }

    /// Parse `raw` into the same variant as `self`
    fn parse_like(&self, raw: &str) -> Option<FieldValue> {
        let raw = raw.trim();
        match self {
            FieldValue::String(_) => Some(FieldValue::String(raw.to_string())),
            FieldValue::Integer(_) => raw
                .parse::<i64>()
                .map(FieldValue::Integer)
                .ok()
                .or_else(|| raw.parse::<f64>().ok().map(FieldValue::Float)),
            FieldValue::Float(_) => raw.parse::<f64>().ok().map(FieldValue::Float),
            FieldValue::Boolean(_) => raw
                .to_ascii_lowercase()
                .parse::<bool>()
                .ok()
                .map(FieldValue::Boolean),
            FieldValue::Uuid(_) => Uuid::parse_str(raw).ok().map(FieldValue::Uuid),
            FieldValue::DateTime(_) => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc))),
            FieldValue::Null => None,
        }
    }
}

/// Compare an integer with a float without rounding the integer.
///
/// Agrees with `f64::total_cmp`: NaN sorts above every integer (below when its
/// sign bit is set) and `-0.0` sorts just below `0`.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float past i64::MAX
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    // in range, so the cast is exact
    i.cmp(&(whole as i64)).then_with(|| {
        if f > whole {
            Ordering::Less
        } else if f < whole {
            Ordering::Greater
        } else if f == 0.0 && f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "null"),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null),
            },
            Value::String(s) => FieldValue::String(s.clone()),
            other => FieldValue::String(other.to_string()),
        }
    }
}

/// Conversion of an entity field into a [`FieldValue`]
///
/// Implemented for the scalar types entity structs are built from. The
/// `impl_entity!` macro relies on it to build accessor tables.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl ToFieldValue for i32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for u32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ToFieldValue for Uuid {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl<V: ToFieldValue> ToFieldValue for Option<V> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// Reads one named field off an entity
pub type FieldAccessor<T> = fn(&T) -> FieldValue;

/// Name → accessor table for one entity type.
///
/// Built once per type (see `Entity::fields`) and shared read-only by every
/// query against that type. Lookups are case-sensitive exact matches.
pub struct FieldRegistry<T> {
    accessors: IndexMap<&'static str, FieldAccessor<T>>,
}

impl<T> FieldRegistry<T> {
    pub fn new() -> Self {
        Self {
            accessors: IndexMap::new(),
        }
    }

    /// Register an accessor under `name`.
    ///
    /// # Panics
    /// If `name` is already registered. Accessor tables are static per type, so
    /// a duplicate is a definition bug and surfaces the first time the table
    /// is built.
    pub fn with(mut self, name: &'static str, accessor: FieldAccessor<T>) -> Self {
        assert!(
            !self.accessors.contains_key(name),
            "field '{}' registered twice",
            name
        );
        self.accessors.insert(name, accessor);
        self
    }

    pub fn get(&self, name: &str) -> Option<FieldAccessor<T>> {
        self.accessors.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    /// Registered field names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.accessors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl<T> Default for FieldRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.accessors.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_null_has_no_text() {
        assert!(FieldValue::Null.is_null());
        assert!(FieldValue::Null.as_text().is_none());
        assert_eq!(FieldValue::Null.to_string(), "null");
    }

    #[test]
    fn test_total_cmp_nulls_first() {
        let null = FieldValue::Null;
        let s = FieldValue::String("a".to_string());
        assert_eq!(null.total_cmp(&s), Ordering::Less);
        assert_eq!(s.total_cmp(&null), Ordering::Greater);
        assert_eq!(null.total_cmp(&FieldValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_total_cmp_mixed_numeric() {
        assert_eq!(
            FieldValue::Integer(2).total_cmp(&FieldValue::Float(2.5)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Float(3.0).total_cmp(&FieldValue::Integer(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_total_cmp_mixed_numeric_beyond_f64_precision() {
        let two_53 = 1_i64 << 53;
        // 2^53 + 1 rounds to 2^53 as an f64
        assert_eq!(
            FieldValue::Integer(two_53 + 1).total_cmp(&FieldValue::Float(two_53 as f64)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::Float(two_53 as f64).total_cmp(&FieldValue::Integer(two_53 + 1)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Integer(two_53).total_cmp(&FieldValue::Float(two_53 as f64)),
            Ordering::Equal
        );
        assert_eq!(
            FieldValue::Integer(i64::MAX).total_cmp(&FieldValue::Float(i64::MAX as f64)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Integer(i64::MIN).total_cmp(&FieldValue::Float(i64::MIN as f64)),
            Ordering::Equal
        );
        assert_eq!(
            FieldValue::Integer(-3).total_cmp(&FieldValue::Float(-2.5)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Integer(i64::MAX).total_cmp(&FieldValue::Float(f64::NAN)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Integer(0).total_cmp(&FieldValue::Float(-0.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_total_cmp_sorts_mixed_numeric_column_consistently() {
        let two_53 = 1_i64 << 53;
        let mut values = vec![
            FieldValue::Float(f64::NAN),
            FieldValue::Integer(two_53 + 1),
            FieldValue::Float(0.0),
            FieldValue::Float(two_53 as f64),
            FieldValue::Integer(0),
            FieldValue::Float(-0.0),
            FieldValue::Integer(two_53),
            FieldValue::Float(f64::NEG_INFINITY),
            FieldValue::Integer(i64::MIN),
        ];
        values.sort_by(|a, b| a.total_cmp(b));

        for pair in values.windows(2) {
            assert_ne!(pair[0].total_cmp(&pair[1]), Ordering::Greater);
        }
        assert!(matches!(values[0], FieldValue::Float(f) if f == f64::NEG_INFINITY));
        assert!(matches!(values.last(), Some(FieldValue::Float(f)) if f.is_nan()));
        let big = values
            .iter()
            .position(|v| matches!(v, FieldValue::Integer(i) if *i == two_53 + 1))
            .unwrap();
        assert_eq!(big, values.len() - 2);
    }

    #[test]
    fn test_loose_cmp_mixed_numeric_is_exact() {
        let two_53 = 1_i64 << 53;
        assert_eq!(
            FieldValue::Integer(two_53 + 1).loose_cmp(&FieldValue::Float(two_53 as f64)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            FieldValue::Integer(1).loose_cmp(&FieldValue::Float(f64::NAN)),
            None
        );
    }

    #[test]
    fn test_total_cmp_strings_are_case_sensitive() {
        let upper = FieldValue::String("Zed".to_string());
        let lower = FieldValue::String("ann".to_string());
        // byte order: uppercase letters sort before lowercase
        assert_eq!(upper.total_cmp(&lower), Ordering::Less);
    }

    #[test]
    fn test_loose_cmp_parses_string_into_field_type() {
        let age = FieldValue::Integer(30);
        assert_eq!(
            age.loose_cmp(&FieldValue::String("30".to_string())),
            Some(Ordering::Equal)
        );
        assert_eq!(
            age.loose_cmp(&FieldValue::String(" 25 ".to_string())),
            Some(Ordering::Greater)
        );
        assert_eq!(age.loose_cmp(&FieldValue::String("abc".to_string())), None);

        let flag = FieldValue::Boolean(true);
        assert_eq!(
            flag.loose_cmp(&FieldValue::String("TRUE".to_string())),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_loose_cmp_uuid_and_datetime() {
        let id = Uuid::new_v4();
        assert_eq!(
            FieldValue::Uuid(id).loose_cmp(&FieldValue::String(id.to_string())),
            Some(Ordering::Equal)
        );

        let at = DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            FieldValue::DateTime(at)
                .loose_cmp(&FieldValue::String("2024-02-01T00:00:00Z".to_string())),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_loose_cmp_null_only_equals_null() {
        assert_eq!(
            FieldValue::Null.loose_cmp(&FieldValue::Null),
            Some(Ordering::Equal)
        );
        assert_eq!(FieldValue::Null.loose_cmp(&FieldValue::Integer(1)), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(FieldValue::from(&json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from(&json!(7)), FieldValue::Integer(7));
        assert_eq!(FieldValue::from(&json!(1.5)), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from(&json!(true)), FieldValue::Boolean(true));
        assert_eq!(
            FieldValue::from(&json!("x")),
            FieldValue::String("x".to_string())
        );
    }

    #[test]
    fn test_option_to_field_value() {
        assert_eq!(None::<String>.to_field_value(), FieldValue::Null);
        assert_eq!(Some(5i64).to_field_value(), FieldValue::Integer(5));
    }

    struct Row {
        label: String,
    }

    #[test]
    fn test_registry_lookup_is_exact() {
        let registry = FieldRegistry::<Row>::new().with("Label", |r: &Row| {
            FieldValue::String(r.label.clone())
        });

        assert!(registry.contains("Label"));
        assert!(!registry.contains("label"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Label"]);

        let accessor = registry.get("Label").unwrap();
        let row = Row {
            label: "hello".to_string(),
        };
        assert_eq!(accessor(&row), FieldValue::String("hello".to_string()));
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_registry_rejects_duplicates() {
        let _ = FieldRegistry::<Row>::new()
            .with("Label", |_: &Row| FieldValue::Null)
            .with("Label", |_: &Row| FieldValue::Null);
    }
}
