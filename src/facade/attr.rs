//! Facade attributes and how they are merged into handler fields

use crate::core::log_context::{FieldValue, Fields};

/// A key/value pair passed through the facade
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: AttrValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A scalar, list or map stored as-is
    Value(FieldValue),
    /// Sub-attributes namespaced under the attribute key
    Group(Vec<Attr>),
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: AttrValue::Value(value.into()),
        }
    }

    /// A group attribute; an empty group contributes nothing when merged
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: AttrValue::Group(attrs),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.value, AttrValue::Group(_))
    }
}

/// Merge `attrs` into a copy of `base`; `base` itself is never touched.
///
/// Applied in order, last write wins. A non-empty group merges recursively
/// into the map already stored at its key, or into a fresh map when the key
/// is absent or holds a scalar.
///
/// ```
/// use rust_log_bridge::facade::{merge_attrs, Attr};
/// use rust_log_bridge::core::log_context::Fields;
///
/// let first = merge_attrs(&Fields::new(), &[Attr::group("a", vec![Attr::new("x", 1)])]);
/// let second = merge_attrs(&first, &[Attr::group("a", vec![Attr::new("y", 2)])]);
///
/// let a = second["a"].as_map().unwrap();
/// assert_eq!(a.len(), 2);
/// ```
pub fn merge_attrs(base: &Fields, attrs: &[Attr]) -> Fields {
    let mut merged = base.clone();

    for attr in attrs {
        match &attr.value {
            AttrValue::Group(group) => {
                if group.is_empty() {
                    continue;
                }
                let nested = match merged.get(&attr.key) {
                    Some(FieldValue::Map(existing)) => merge_attrs(existing, group),
                    _ => merge_attrs(&Fields::new(), group),
                };
                merged.insert(attr.key.clone(), FieldValue::Map(nested));
            }
            AttrValue::Value(value) => {
                merged.insert(attr.key.clone(), value.clone());
            }
        }
    }

    merged
}

/// Wrap `attrs` in one group per entry of `groups`, outermost first
pub(crate) fn nest_under(groups: &[String], attrs: &[Attr]) -> Vec<Attr> {
    groups
        .iter()
        .rev()
        .fold(attrs.to_vec(), |inner, name| vec![Attr::group(name.clone(), inner)])
}
