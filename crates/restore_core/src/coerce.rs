//! Total conversions from raw nodes to typed values.
//!
//! Numbers are persisted as text, so the strict readers only accept
//! [`Node::Text`]. The `_loose` readers also accept [`Node::Number`] and are
//! reserved for the few fields that were historically written either way.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::catalog::BrawlingGlove;
use crate::core_api::{CoerceError, Location};
use crate::node::Node;
use crate::ordinal::Ordinal;

pub fn as_integer(node: &Node) -> Result<i32, CoerceError> {
    parse_text(node)
}

pub fn as_long(node: &Node) -> Result<i64, CoerceError> {
    parse_text(node)
}

pub fn as_double(node: &Node) -> Result<f64, CoerceError> {
    parse_text(node)
}

pub fn as_integer_loose(node: &Node) -> Result<i32, CoerceError> {
    parse_scalar(node)
}

pub fn as_double_loose(node: &Node) -> Result<f64, CoerceError> {
    parse_scalar(node)
}

pub fn as_bool(node: &Node) -> Result<bool, CoerceError> {
    match node {
        Node::Bool(b) => Ok(*b),
        other => Err(CoerceError::shape("bool", other.kind())),
    }
}

pub fn as_text(node: &Node) -> Result<&str, CoerceError> {
    match node {
        Node::Text(s) => Ok(s),
        other => Err(CoerceError::shape("text", other.kind())),
    }
}

pub fn as_mapping(node: &Node) -> Result<&BTreeMap<String, Node>, CoerceError> {
    match node {
        Node::Mapping(map) => Ok(map),
        other => Err(CoerceError::shape("mapping", other.kind())),
    }
}

pub fn as_sequence(node: &Node) -> Result<&[Node], CoerceError> {
    match node {
        Node::Sequence(items) => Ok(items),
        other => Err(CoerceError::shape("sequence", other.kind())),
    }
}

/// Resolves a text index into `E`, bounds-checked against `E::VALUES`.
pub fn as_enum_ordinal<E: Ordinal>(node: &Node) -> Result<E, CoerceError> {
    let index = as_long(node)?;
    E::from_ordinal(index).ok_or(CoerceError::EnumIndexOutOfRange {
        enumeration: E::NAME,
        index,
        cardinality: E::cardinality(),
    })
}

/// Resolves a one-byte glove indicator. Accepts text or number.
pub fn as_glove(node: &Node) -> Result<BrawlingGlove, CoerceError> {
    let raw = scalar_text(node)?;
    let indicator: u8 = raw
        .parse()
        .map_err(|_| CoerceError::malformed_number(raw.as_ref()))?;
    BrawlingGlove::from_indicator(indicator).ok_or(CoerceError::EnumIndexOutOfRange {
        enumeration: BrawlingGlove::NAME,
        index: i64::from(indicator),
        cardinality: BrawlingGlove::count(),
    })
}

/// Parses `"x,y,z"`: exactly three comma-separated integers.
pub fn as_coordinate_triple(node: &Node) -> Result<Location, CoerceError> {
    let text = as_text(node)?;
    let malformed = || CoerceError::MalformedCoordinate(text.to_string());

    let mut parts = text.split(',');
    let mut next = || -> Result<i32, CoerceError> {
        parts
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(malformed)
    };
    let x = next()?;
    let y = next()?;
    let z = next()?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(Location::new(x, y, z))
}

/// Fetches a required sub-field of a mapping node.
pub fn field<'a>(node: &'a Node, key: &str) -> Result<&'a Node, CoerceError> {
    as_mapping(node)?
        .get(key)
        .ok_or_else(|| CoerceError::MissingField(key.to_string()))
}

/// Fetches an optional sub-field of a mapping node. A present `null` counts
/// as present.
pub fn optional_field<'a>(node: &'a Node, key: &str) -> Result<Option<&'a Node>, CoerceError> {
    Ok(as_mapping(node)?.get(key))
}

fn parse_text<T: FromStr>(node: &Node) -> Result<T, CoerceError> {
    let text = as_text(node)?;
    text.parse()
        .map_err(|_| CoerceError::malformed_number(text))
}

fn parse_scalar<T: FromStr>(node: &Node) -> Result<T, CoerceError> {
    let text = scalar_text(node)?;
    text.parse()
        .map_err(|_| CoerceError::malformed_number(text.as_ref()))
}

fn scalar_text(node: &Node) -> Result<Cow<'_, str>, CoerceError> {
    match node {
        Node::Text(s) => Ok(Cow::Borrowed(s)),
        Node::Number(n) => Ok(Cow::Owned(n.to_string())),
        other => Err(CoerceError::shape("text or number", other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GraveType, IronmanMode};
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        Node::from(value)
    }

    #[test]
    fn integers_require_text() {
        assert_eq!(as_integer(&node(json!("42"))), Ok(42));
        assert_eq!(as_integer(&node(json!("-7"))), Ok(-7));
        assert_eq!(
            as_integer(&node(json!(42))),
            Err(CoerceError::shape("text", "number"))
        );
        assert_eq!(
            as_integer(&node(json!("4x"))),
            Err(CoerceError::malformed_number("4x"))
        );
        for padded in [" 42 ", "42 ", "\t42", ""] {
            assert_eq!(
                as_integer(&node(json!(padded))),
                Err(CoerceError::malformed_number(padded)),
                "{padded:?} is not an integer literal"
            );
        }
        assert!(matches!(
            as_double(&node(json!(" 1.5"))),
            Err(CoerceError::MalformedNumber { .. })
        ));
        assert!(matches!(
            as_integer_loose(&node(json!(" 12"))),
            Err(CoerceError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn integer_overflow_is_malformed() {
        assert!(matches!(
            as_integer(&node(json!("2147483648"))),
            Err(CoerceError::MalformedNumber { .. })
        ));
        assert_eq!(as_long(&node(json!("2147483648"))), Ok(2_147_483_648));
    }

    #[test]
    fn loose_readers_accept_numbers() {
        assert_eq!(as_double_loose(&node(json!(1250.5))), Ok(1250.5));
        assert_eq!(as_double_loose(&node(json!("3.0"))), Ok(3.0));
        assert_eq!(as_integer_loose(&node(json!(12))), Ok(12));
        assert_eq!(
            as_double_loose(&node(json!(true))),
            Err(CoerceError::shape("text or number", "bool"))
        );
    }

    #[test]
    fn enum_ordinals_resolve_in_declared_order() {
        for (index, expected) in GraveType::VALUES.iter().enumerate() {
            let text = node(json!(index.to_string()));
            assert_eq!(as_enum_ordinal::<GraveType>(&text), Ok(*expected));
        }
    }

    #[test]
    fn enum_ordinals_never_clamp() {
        let err = as_enum_ordinal::<IronmanMode>(&node(json!("3"))).expect_err("out of range");
        assert_eq!(
            err,
            CoerceError::EnumIndexOutOfRange {
                enumeration: "IronmanMode",
                index: 3,
                cardinality: 3,
            }
        );
        assert!(matches!(
            as_enum_ordinal::<IronmanMode>(&node(json!("-1"))),
            Err(CoerceError::EnumIndexOutOfRange { index: -1, .. })
        ));
        assert!(matches!(
            as_enum_ordinal::<IronmanMode>(&node(json!("one"))),
            Err(CoerceError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn coordinate_triples() {
        assert_eq!(
            as_coordinate_triple(&node(json!("3200,3200,0"))),
            Ok(Location::new(3200, 3200, 0))
        );
        for bad in [
            "3200,3200",
            "3200,3200,0,1",
            "3200,x,0",
            "",
            ",,",
            "1,2,",
            "3200, 3200, 0",
            " 3200,3200,0",
            "3200,3200,0 ",
        ] {
            assert_eq!(
                as_coordinate_triple(&node(json!(bad))),
                Err(CoerceError::MalformedCoordinate(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn gloves_resolve_by_indicator() {
        assert_eq!(as_glove(&node(json!(3))), Ok(BrawlingGlove::Magic));
        assert_eq!(as_glove(&node(json!("13"))), Ok(BrawlingGlove::Cooking));
        assert!(matches!(
            as_glove(&node(json!(" 13"))),
            Err(CoerceError::MalformedNumber { .. })
        ));
        assert!(matches!(
            as_glove(&node(json!(300))),
            Err(CoerceError::MalformedNumber { .. })
        ));
        assert!(matches!(
            as_glove(&node(json!(99))),
            Err(CoerceError::EnumIndexOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn fields_distinguish_missing_from_wrong_shape() {
        let record = node(json!({"index": "5"}));
        assert_eq!(field(&record, "index"), Ok(&Node::text("5")));
        assert_eq!(
            field(&record, "value"),
            Err(CoerceError::MissingField("value".into()))
        );
        assert_eq!(
            field(&node(json!(["5"])), "index"),
            Err(CoerceError::shape("mapping", "sequence"))
        );
        assert_eq!(optional_field(&record, "value"), Ok(None));
    }
}
