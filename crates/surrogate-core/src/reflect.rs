//! Reflection over the public API of a class.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::signature::Signature;

/// Whether a method lives on instances or on the class object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Class-level (singleton) method.
    Class,
    /// Instance method.
    Instance,
}

impl MethodKind {
    /// Parses the `"class"` / `"instance"` discriminator.
    #[must_use]
    pub fn parse(discriminator: &str) -> Option<Self> {
        match discriminator.trim_start_matches(':') {
            "class" => Some(Self::Class),
            "instance" => Some(Self::Instance),
            _ => None,
        }
    }

    /// Prefix used when printing a method of this kind (`.find`, `#save`).
    #[must_use]
    pub const fn sigil(self) -> char {
        match self {
            Self::Class => '.',
            Self::Instance => '#',
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Instance => f.write_str("instance"),
        }
    }
}

/// A method found by reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    /// Method name.
    pub name: String,
    /// Name of the class that defines the method.
    pub owner: String,
    /// True if the method comes from an ancestor rather than the class itself.
    pub inherited: bool,
    /// Declared parameters.
    pub signature: Signature,
}

/// Reflection facility the comparator runs against.
///
/// Implemented by [`crate::ClassShape`] for real collaborators and by
/// [`crate::SurrogateClass`] for surrogates.
pub trait Reflect {
    /// Name of the reflected class.
    fn class_name(&self) -> String;

    /// Names of every public method of the given kind, inherited ones included.
    fn public_methods(&self, kind: MethodKind) -> BTreeSet<String>;

    /// Looks up a public method. Private methods are not found.
    fn find_method(&self, kind: MethodKind, name: &str) -> Option<MethodInfo>;

    /// Returns true if a public method with this name exists.
    fn responds_to(&self, kind: MethodKind, name: &str) -> bool {
        self.find_method(kind, name).is_some()
    }
}
