/// Serde utility functions for common patterns
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;

/// Deserialize an optional numeric id that may arrive as a number or a numeric string.
///
/// - Missing field or `null` → `None`
/// - `42` or `"42"` → `Some(42)`
/// - Anything else → error
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::flexible_id")]
///     board_id: Option<u64>,
/// }
/// ```
pub fn flexible_id<'de, D>(de: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    struct NotAnId(String);

    impl fmt::Display for NotAnId {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "expected a numeric id, got '{}'", self.0)
        }
    }

    match Option::<Raw>::deserialize(de)? {
        None => Ok(None),
        Some(Raw::Number(id)) => Ok(Some(id)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(NotAnId(text))),
    }
}

/// Deserialize `Option<Option<T>>` to distinguish between missing field and null value.
///
/// - Missing field → `None`
/// - Field is `null` → `Some(None)`
/// - Field has value → `Some(Some(value))`
///
/// Pair with `skip_serializing_if = "Option::is_none"` to write back exactly
/// what was read.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    struct DoubleOptionVisitor<T> {
        _inner: PhantomData<T>,
    }

    impl<'de, T: Deserialize<'de>> serde::de::Visitor<'de> for DoubleOptionVisitor<T> {
        type Value = Option<Option<T>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("option")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(None))
        }

        // Flattened structs buffer `null` as unit
        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(None))
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            T::deserialize(deserializer).map(|val| Some(Some(val)))
        }
    }

    de.deserialize_option(DoubleOptionVisitor {
        _inner: PhantomData,
    })
}
