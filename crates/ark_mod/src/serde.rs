use std::fmt;

use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Serialize,
};

use crate::types::ArkString;

/// Strings serialize as text, bytes that are not UTF-8 are replaced
impl Serialize for ArkString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

struct ArkStringVisitor {}

impl ArkStringVisitor {
    fn new() -> Self {
        ArkStringVisitor {}
    }
}

impl<'de> Visitor<'de> for ArkStringVisitor {
    type Value = ArkString;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a byte sequence")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ArkString::from(v))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ArkString::from(v))
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(byte) = access.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(ArkString::new(bytes))
    }
}

impl<'de> Deserialize<'de> for ArkString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ArkStringVisitor::new())
    }
}
