//! Record types for the mod description files.

use bon::Builder;
use derive_more::derive::{Constructor, Deref, From, IntoIterator};
use std::{borrow::Cow, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Magic bytes written between the map list and the mod type of every `.mod` file
pub const MODFILE_MAGIC: [u8; 8] = [0x33, 0xFF, 0x22, 0xFF, 0x02, 0x00, 0x00, 0x00];

/// A length prefixed, null terminated byte string
///
/// Held without the terminator. The contents are not interpreted, most files carry UTF-8.
#[derive(Constructor, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, From)]
pub struct ArkString(Vec<u8>);

impl ArkString {
    /// The raw bytes, without terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The contents decoded as UTF-8, with invalid sequences replaced
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Unwrap the raw bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for ArkString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for ArkString {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ArkString {
    fn from(value: &[u8; N]) -> Self {
        Self(value.to_vec())
    }
}

impl From<&str> for ArkString {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for ArkString {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl fmt::Debug for ArkString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArkString({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for ArkString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// A count prefixed list of strings, in map load order
#[derive(Constructor, Clone, Debug, Default, PartialEq, Eq, Deref, From, IntoIterator)]
#[into_iterator(owned, ref)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct StringArray(Vec<ArkString>);

impl<S: Into<ArkString>> FromIterator<S> for StringArray {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A count prefixed list of key/value pairs
///
/// Keys are not unique as far as the format is concerned, order is kept as read.
#[derive(Constructor, Clone, Debug, Default, PartialEq, Eq, Deref, From, IntoIterator)]
#[into_iterator(owned, ref)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Metadata(Vec<(ArkString, ArkString)>);

impl Metadata {
    /// The value of the last entry with this key
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&ArkString> {
        let key = key.as_ref();
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k.as_bytes() == key)
            .map(|(_, v)| v)
    }

    /// Append an entry
    pub fn push(&mut self, key: impl Into<ArkString>, value: impl Into<ArkString>) {
        self.0.push((key.into(), value.into()));
    }
}

impl<K: Into<ArkString>, V: Into<ArkString>> FromIterator<(K, V)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Contents of a `mod.info` file
#[derive(Clone, Debug, Default, PartialEq, Eq, Builder)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModInfo {
    /// Display name of the mod
    #[builder(into)]
    pub mod_name: ArkString,

    /// Maps shipped by the mod
    #[builder(into, default)]
    pub map_filenames: StringArray,

    /// Trailing bytes of unknown meaning, kept as read
    #[builder(default)]
    pub trailer: [u8; 8],
}

/// Contents of a `modmeta.info` file
#[derive(Clone, Debug, Default, PartialEq, Eq, Constructor)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModMetaInfo {
    /// Metadata entries
    pub entries: Metadata,
}

/// Contents of a `<modid>.mod` registration file
///
/// This follows the revision with an 8 byte magic followed by an explicit mod type byte.
#[derive(Clone, Debug, PartialEq, Eq, Builder)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModFile {
    /// Workshop id of the mod
    pub mod_id: u64,

    /// Display name of the mod
    #[builder(into)]
    pub mod_name: ArkString,

    /// Where the game finds the mod's content, relative to its binaries
    #[builder(into)]
    pub mod_path: ArkString,

    /// Maps shipped by the mod
    #[builder(into, default)]
    pub map_filenames: StringArray,

    /// See [`MODFILE_MAGIC`]
    #[builder(default = MODFILE_MAGIC)]
    pub magic: [u8; 8],

    /// Numeric mod type, mirrors the `ModType` metadata entry
    #[builder(default = 1)]
    pub mod_type: u8,

    /// Metadata entries
    #[builder(into, default)]
    pub metadata: Metadata,
}

impl ModFile {
    /// Check the magic bytes read from a file against `expected`
    pub fn check_magic(&self, expected: &[u8; 8]) -> Result<()> {
        if &self.magic != expected {
            return Err(Error::UnexpectedMagic {
                expected: *expected,
                found: self.magic,
            });
        }
        Ok(())
    }
}
