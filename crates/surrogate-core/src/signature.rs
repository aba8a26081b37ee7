//! Method signatures as ordered (kind, name) parameter pairs.
//!
//! Rust closures carry no parameter metadata, so signatures are declared
//! next to the behavior they describe. A parameter whose kind or name is
//! unknown makes the whole signature unreflectable, which keeps it out of
//! shape and name comparisons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Mandatory positional parameter.
    Required,
    /// Positional parameter with a default.
    Optional,
    /// Splat collecting remaining positional arguments.
    Rest,
    /// Keyword parameter with a default.
    Keyword,
    /// Mandatory keyword parameter.
    RequiredKeyword,
    /// Splat collecting remaining keywords.
    KeywordRest,
    /// Trailing block parameter.
    Block,
}

impl ParamKind {
    /// Short name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "req",
            Self::Optional => "opt",
            Self::Rest => "rest",
            Self::Keyword => "key",
            Self::RequiredKeyword => "keyreq",
            Self::KeywordRest => "keyrest",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared parameter. Either half may be unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    /// Parameter kind, if known.
    pub kind: Option<ParamKind>,
    /// Parameter name, if known.
    pub name: Option<String>,
}

impl Param {
    /// Creates a fully known parameter.
    #[must_use]
    pub fn new(kind: ParamKind, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            name: Some(name.into()),
        }
    }

    /// Mandatory positional parameter.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Required, name)
    }

    /// Optional positional parameter.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Optional, name)
    }

    /// Positional splat.
    #[must_use]
    pub fn rest(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Rest, name)
    }

    /// Optional keyword.
    #[must_use]
    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Keyword, name)
    }

    /// Mandatory keyword.
    #[must_use]
    pub fn required_keyword(name: impl Into<String>) -> Self {
        Self::new(ParamKind::RequiredKeyword, name)
    }

    /// Keyword splat.
    #[must_use]
    pub fn keyword_rest(name: impl Into<String>) -> Self {
        Self::new(ParamKind::KeywordRest, name)
    }

    /// Block parameter.
    #[must_use]
    pub fn block(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Block, name)
    }

    /// Parameter with a known kind and no name.
    #[must_use]
    pub const fn anonymous(kind: ParamKind) -> Self {
        Self {
            kind: Some(kind),
            name: None,
        }
    }

    /// Parameter with neither kind nor name known.
    #[must_use]
    pub const fn opaque() -> Self {
        Self {
            kind: None,
            name: None,
        }
    }

    /// Returns true if both kind and name are known.
    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        self.kind.is_some() && self.name.is_some()
    }
}

/// Positional arity derived from a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Mandatory positional parameters.
    pub required: usize,
    /// Optional positional parameters.
    pub optional: usize,
    /// Whether a positional splat is present.
    pub rest: bool,
}

impl Arity {
    /// Returns true if `given` positional arguments are acceptable.
    #[must_use]
    pub const fn accepts(&self, given: usize) -> bool {
        given >= self.required && (self.rest || given <= self.required + self.optional)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest {
            write!(f, "{}+", self.required)
        } else if self.optional > 0 {
            write!(f, "{}..{}", self.required, self.required + self.optional)
        } else {
            write!(f, "{}", self.required)
        }
    }
}

/// Ordered parameter list of a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Creates a signature from parameters in declaration order.
    #[must_use]
    pub fn new(params: impl IntoIterator<Item = Param>) -> Self {
        Self {
            params: params.into_iter().collect(),
        }
    }

    /// Signature with no parameters.
    #[must_use]
    pub const fn empty() -> Self {
        Self { params: Vec::new() }
    }

    /// The `(*args)` signature of a generated stub.
    #[must_use]
    pub fn catch_all() -> Self {
        Self::new([Param::rest("args")])
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Ordered kinds.
    #[must_use]
    pub fn param_kinds(&self) -> Vec<Option<ParamKind>> {
        self.params.iter().map(|p| p.kind).collect()
    }

    /// Ordered names.
    #[must_use]
    pub fn param_names(&self) -> Vec<Option<String>> {
        self.params.iter().map(|p| p.name.clone()).collect()
    }

    /// Returns true if every parameter has a known kind and name.
    #[must_use]
    pub fn is_reflectable(&self) -> bool {
        self.params.iter().all(Param::is_resolvable)
    }

    /// Positional arity. Unknown kinds count as optional.
    #[must_use]
    pub fn arity(&self) -> Arity {
        let mut arity = Arity {
            required: 0,
            optional: 0,
            rest: false,
        };
        for param in &self.params {
            match param.kind {
                Some(ParamKind::Required) => arity.required += 1,
                Some(ParamKind::Optional) | None => arity.optional += 1,
                Some(ParamKind::Rest) => arity.rest = true,
                Some(_) => {}
            }
        }
        arity
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let name = param.name.as_deref().unwrap_or("_");
            match param.kind {
                Some(ParamKind::Optional) => write!(f, "{name} = ?")?,
                Some(ParamKind::Rest) => write!(f, "*{name}")?,
                Some(ParamKind::Keyword) => write!(f, "{name}: ?")?,
                Some(ParamKind::RequiredKeyword) => write!(f, "{name}:")?,
                Some(ParamKind::KeywordRest) => write!(f, "**{name}")?,
                Some(ParamKind::Block) => write!(f, "&{name}")?,
                Some(ParamKind::Required) | None => write!(f, "{name}")?,
            }
        }
        write!(f, ")")
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self::new(iter)
    }
}
