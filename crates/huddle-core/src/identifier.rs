//! Participant identifiers backed by string interning.
//!
//! Room members are referred to by string ids coming from the host
//! application. The layout engine keys its per-participant state by these
//! ids on every frame, so they are interned once and compared as symbols.

use std::{
    convert::Infallible,
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Stable identifier of a room participant.
///
/// `Id` is `Copy` and hashes as a small integer, which makes it cheap to use
/// as a map key in per-frame code.
///
/// # Examples
///
/// ```
/// use huddle_core::identifier::Id;
///
/// let ana = Id::new("ana");
/// let again: Id = "ana".into();
///
/// assert_eq!(ana, again);
/// assert_eq!(ana, "ana");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates an identifier for an unnamed slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use huddle_core::identifier::Id;
    ///
    /// assert_eq!(Id::from_anonymous(3), "__3");
    /// ```
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl std::str::FromStr for Id {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner
            .resolve(self.0)
            .is_some_and(|self_str| self_str == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("ana");
        let id2 = Id::new("ana");
        let id3 = Id::new("ben");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "ana");
    }

    #[test]
    fn test_from_anonymous() {
        let id1 = Id::from_anonymous(0);
        let id2 = Id::from_anonymous(1);

        assert_ne!(id1, id2);
        assert_eq!(id1, Id::from_anonymous(0));
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_from_str() {
        let id: Id = "parsed".parse().unwrap();
        assert_eq!(id, Id::new("parsed"));
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(Id::new("key1"), "value1");
        map.insert(Id::new("key2"), "value2");

        assert_eq!(map.get(&Id::new("key1")), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("speaker");

        assert!(id == "speaker");
        assert!(id != "listener");

        let name = String::from("speaker");
        assert!(id == name.as_str());
    }
}
