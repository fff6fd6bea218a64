use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of a card's declared content ordering.
///
/// The stored field is a heterogeneous array: a plain string references one
/// block, a nested array references blocks that render as a single visual
/// unit. Nesting stops at one level; a group holds identifiers only, never
/// another group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderEntry {
    Single(String),
    Group(Vec<String>),
}

/// A card's declared content ordering.
///
/// Stored data is decoded into this shape exactly once, at the boundary,
/// via [`ContentOrder::from_value`]; everything past that point works with
/// typed entries. Equality is deep and structural, so `==` answers "would
/// writing this back change anything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentOrder(pub Vec<OrderEntry>);

impl ContentOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tolerant decode of the raw stored field value.
    ///
    /// Accepts whatever is found: a missing value, `null`, or any non-array
    /// shape decodes to an empty ordering. Within an array, strings become
    /// [`OrderEntry::Single`], arrays become [`OrderEntry::Group`] keeping
    /// only their string members, and every other element is dropped. This
    /// never fails, whatever the input.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Array(items)) = value else {
            return Self::default();
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(id) => entries.push(OrderEntry::Single(id.clone())),
                Value::Array(sub) => {
                    let ids = sub
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_owned))
                        .collect();
                    entries.push(OrderEntry::Group(ids));
                }
                _ => {}
            }
        }
        Self(entries)
    }

    /// Encodes back to the wire shape: `["id", ["id", "id"], ...]`.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|entry| match entry {
                    OrderEntry::Single(id) => Value::String(id.clone()),
                    OrderEntry::Group(ids) => {
                        Value::Array(ids.iter().cloned().map(Value::String).collect())
                    }
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[OrderEntry] {
        &self.0
    }

    /// Flat view over every referenced identifier, singles and group
    /// members alike, in declared order.
    pub fn block_ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .flat_map(|entry| match entry {
                OrderEntry::Single(id) => std::slice::from_ref(id).iter(),
                OrderEntry::Group(ids) => ids.iter(),
            })
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, entry: OrderEntry) {
        self.0.push(entry);
    }
}

impl FromIterator<OrderEntry> for ContentOrder {
    fn from_iter<I: IntoIterator<Item = OrderEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<OrderEntry> for ContentOrder {
    fn extend<I: IntoIterator<Item = OrderEntry>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ContentOrder {
    type Item = OrderEntry;
    type IntoIter = std::vec::IntoIter<OrderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ContentOrder {
    type Item = &'a OrderEntry;
    type IntoIter = std::slice::Iter<'a, OrderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
