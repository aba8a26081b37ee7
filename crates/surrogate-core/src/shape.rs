//! Declared API of a real collaborator class.
//!
//! A `ClassShape` is what a surrogate gets compared against: the public
//! instance and class methods of the real class together with their
//! parameter lists, optionally inheriting from a superclass shape.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::reflect::{MethodInfo, MethodKind, Reflect};
use crate::signature::{Param, Signature};

/// Method visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Callable from outside.
    Public,
    /// Hidden from reflection.
    Private,
}

#[derive(Debug, Clone)]
struct DeclaredMethod {
    signature: Signature,
    visibility: Visibility,
}

/// Declared API of a class.
#[derive(Debug, Clone)]
pub struct ClassShape {
    name: String,
    superclass: Option<Arc<ClassShape>>,
    instance_methods: BTreeMap<String, DeclaredMethod>,
    class_methods: BTreeMap<String, DeclaredMethod>,
}

impl ClassShape {
    /// Creates a shape with no methods.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            instance_methods: BTreeMap::new(),
            class_methods: BTreeMap::new(),
        }
    }

    /// Sets the superclass whose methods are inherited.
    #[must_use]
    pub fn superclass(mut self, parent: Self) -> Self {
        self.superclass = Some(Arc::new(parent));
        self
    }

    /// Declares a public instance method.
    #[must_use]
    pub fn instance_method(
        self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = Param>,
    ) -> Self {
        self.declare(MethodKind::Instance, name, params, Visibility::Public)
    }

    /// Declares a public class method.
    #[must_use]
    pub fn class_method(
        self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = Param>,
    ) -> Self {
        self.declare(MethodKind::Class, name, params, Visibility::Public)
    }

    /// Declares a method with explicit kind and visibility.
    #[must_use]
    pub fn declare(
        mut self,
        kind: MethodKind,
        name: impl Into<String>,
        params: impl IntoIterator<Item = Param>,
        visibility: Visibility,
    ) -> Self {
        let method = DeclaredMethod {
            signature: Signature::new(params),
            visibility,
        };
        self.table_mut(kind).insert(name.into(), method);
        self
    }

    /// Name of the class.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn table(&self, kind: MethodKind) -> &BTreeMap<String, DeclaredMethod> {
        match kind {
            MethodKind::Class => &self.class_methods,
            MethodKind::Instance => &self.instance_methods,
        }
    }

    fn table_mut(&mut self, kind: MethodKind) -> &mut BTreeMap<String, DeclaredMethod> {
        match kind {
            MethodKind::Class => &mut self.class_methods,
            MethodKind::Instance => &mut self.instance_methods,
        }
    }

    /// Nearest declaration along the ancestor chain, with its owner.
    fn lookup(&self, kind: MethodKind, name: &str) -> Option<(&Self, &DeclaredMethod)> {
        let mut current = Some(self);
        while let Some(shape) = current {
            if let Some(method) = shape.table(kind).get(name) {
                return Some((shape, method));
            }
            current = shape.superclass.as_deref();
        }
        None
    }
}

impl Reflect for ClassShape {
    fn class_name(&self) -> String {
        self.name.clone()
    }

    fn public_methods(&self, kind: MethodKind) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut seen = BTreeSet::new();
        let mut current = Some(self);
        while let Some(shape) = current {
            for (name, method) in shape.table(kind) {
                // a subclass declaration shadows the ancestor's visibility
                if seen.insert(name.clone()) && method.visibility == Visibility::Public {
                    names.insert(name.clone());
                }
            }
            current = shape.superclass.as_deref();
        }
        names
    }

    fn find_method(&self, kind: MethodKind, name: &str) -> Option<MethodInfo> {
        let (owner, method) = self.lookup(kind, name)?;
        if method.visibility == Visibility::Private {
            return None;
        }
        Some(MethodInfo {
            name: name.to_string(),
            owner: owner.name.clone(),
            inherited: !std::ptr::eq(owner, self),
            signature: method.signature.clone(),
        })
    }
}
