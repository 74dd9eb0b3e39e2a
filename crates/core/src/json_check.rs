//! Structural duplicate detection for JSON request bodies.
//!
//! `serde_json` silently keeps the last value when an object repeats a key,
//! so `{"rating": 1, "rating": 11}` would slip past field validation. This
//! module walks the document as it is parsed (no intermediate `Value` tree)
//! and rejects:
//!
//! - a key that appears twice in the same object;
//! - a scalar that appears twice in the same array (`[1, 2, 1]`).
//!
//! Containers nested inside arrays are recursed into but not compared with
//! each other. Scalars are compared by type and value, so `1` and `"1"` are
//! distinct while `1` and `1.0` are the same number.
//!
//! [`check_duplicates`] only borrows the input; callers decode the same bytes
//! afterwards.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

/// Outcome of a failed [`check_duplicates`] run.
#[derive(Debug, thiserror::Error)]
pub enum JsonCheckError {
    /// A key repeated inside one object. `path` points at the repeated key.
    #[error("duplicate key found in JSON: {path}")]
    DuplicateKey { path: String },

    /// A scalar repeated inside one array. `path` points at the array.
    #[error("duplicate value {value} found in JSON at index {index} in path {path}")]
    DuplicateValue {
        value: String,
        index: usize,
        path: String,
    },

    /// The input is not a single well-formed JSON document.
    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Validate that `input` holds one JSON document without duplicate object
/// keys or duplicate array scalars at any depth.
pub fn check_duplicates(input: &[u8]) -> Result<(), JsonCheckError> {
    let found = RefCell::new(None);
    let mut de = serde_json::Deserializer::from_slice(input);

    let root = Node {
        path: Path::default(),
        found: &found,
    };
    let parsed = root.deserialize(&mut de).and_then(|_| de.end());

    // A duplicate aborts parsing through a custom serde error; the structured
    // description is parked in `found`.
    match (parsed, found.into_inner()) {
        (_, Some(duplicate)) => Err(duplicate),
        (Ok(()), None) => Ok(()),
        (Err(err), None) => Err(JsonCheckError::Malformed(err)),
    }
}

// ---------------------------------------------------------------------------
// Path tracking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location inside the document, rendered as `$`, `$.a.b`, `$.a[2].c`.
#[derive(Debug, Clone, Default)]
struct Path(Vec<Segment>);

impl Path {
    fn key(&self, key: &str) -> Path {
        let mut next = self.clone();
        next.0.push(Segment::Key(key.to_owned()));
        next
    }

    fn index(&self, index: usize) -> Path {
        let mut next = self.clone();
        next.0.push(Segment::Index(index));
        next
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Scalar {
    Null,
    Bool(bool),
    /// Canonical decimal rendering; integral floats collapse to integers.
    Number(String),
    String(String),
}

impl Scalar {
    fn float(v: f64) -> Scalar {
        if v.fract() == 0.0 && v.abs() < 9.0e15 {
            Scalar::Number(format!("{}", v as i64))
        } else {
            Scalar::Number(format!("{v}"))
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Number(v) => f.write_str(v),
            Scalar::String(v) => write!(f, "{v:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Visitor
// ---------------------------------------------------------------------------

/// One value in the document. Yields `Some(scalar)` for leaves and `None`
/// for objects and arrays.
struct Node<'a> {
    path: Path,
    found: &'a RefCell<Option<JsonCheckError>>,
}

impl Node<'_> {
    fn report<E: de::Error>(&self, duplicate: JsonCheckError) -> E {
        let message = duplicate.to_string();
        *self.found.borrow_mut() = Some(duplicate);
        E::custom(message)
    }
}

impl<'de> DeserializeSeed<'de> for Node<'_> {
    type Value = Option<Scalar>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Node<'_> {
    type Value = Option<Scalar>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Null))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Number(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Scalar::Number(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(Scalar::float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(Scalar::String(v.to_owned())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(Scalar::String(v)))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            let path = self.path.key(&key);
            if !seen.insert(key) {
                return Err(self.report(JsonCheckError::DuplicateKey {
                    path: path.to_string(),
                }));
            }
            map.next_value_seed(Node {
                path,
                found: self.found,
            })?;
        }
        Ok(None)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut seen = HashSet::new();
        let mut index = 0;
        loop {
            let element = Node {
                path: self.path.index(index),
                found: self.found,
            };
            match seq.next_element_seed(element)? {
                None => break,
                Some(None) => {}
                Some(Some(scalar)) => {
                    if seen.contains(&scalar) {
                        return Err(self.report(JsonCheckError::DuplicateValue {
                            value: scalar.to_string(),
                            index,
                            path: self.path.to_string(),
                        }));
                    }
                    seen.insert(scalar);
                }
            }
            index += 1;
        }
        Ok(None)
    }
}
