//! The implemented-by visitor: concrete implementations of an interface method.
//!
//! For every non-interface type the visitor first checks whether the type, or one of its base
//! types, declares the target's interface. The walk carries an explicit [`GenericContext`], so
//! `Leaf : Middle<string>` with `Middle<T> : IComparer<T>` sees `IComparer<string>` without
//! touching the type definitions. When the interface is found, the type's own methods are
//! searched: an explicit override entry wins, otherwise a single structural signature match
//! is the implementation.

use std::sync::Arc;

use crate::{
    analysis::{
        result::{ResultLocation, UsageKind},
        search::TypeVisitor,
    },
    metadata::{
        method::MethodRc,
        signatures::{GenericContext, TypeName, TypeSig},
        typesystem::CilTypeRc,
        workspace::{ModuleRc, Workspace},
    },
    Error, Result,
};

/// Finds the methods implementing an interface method.
pub struct ImplementedByVisitor {
    workspace: Arc<Workspace>,
    target: MethodRc,
    interface: TypeName,
    max_depth: usize,
}

impl ImplementedByVisitor {
    /// Creates the visitor for one query.
    ///
    /// # Errors
    /// Returns [`Error::InvalidQuery`] if the target is not a virtual or abstract method of an
    /// interface, and [`crate::Error::Malformed`] if its declaring type is not loaded.
    pub fn new(workspace: Arc<Workspace>, target: MethodRc, max_depth: usize) -> Result<Self> {
        let declaring = workspace
            .type_def(target.declaring_type)
            .ok_or_else(|| malformed_error!("declaring type of {} is not loaded", target.id))?;

        if !declaring.is_interface() {
            return Err(Error::InvalidQuery(format!(
                "{}::{} is not declared on an interface",
                declaring.fullname(),
                target.name
            )));
        }
        if !target.is_virtual() && !target.is_abstract() {
            return Err(Error::InvalidQuery(format!(
                "{}::{} is neither virtual nor abstract",
                declaring.fullname(),
                target.name
            )));
        }

        Ok(Self {
            workspace,
            target,
            interface: declaring.type_name(),
            max_depth,
        })
    }

    /// Finds the target interface among the interfaces declared by `ty` and its base types,
    /// returning the reference with all generic arguments expressed in terms of `ty`.
    fn implemented_interface(&self, ty: &CilTypeRc) -> Option<TypeSig> {
        let mut current = ty.clone();
        let mut context = GenericContext::empty();

        for _ in 0..self.max_depth {
            let found = current
                .interfaces
                .iter()
                .map(|interface| interface.substitute(&context))
                .find(|interface| interface.names(&self.interface));
            if found.is_some() {
                return found;
            }

            let base = current.base.as_ref()?;
            let Some(next) = self.workspace.resolve_type(base) else {
                log::warn!(
                    "base type {} of {} does not resolve, interface walk stopped",
                    base,
                    current.type_name()
                );
                return None;
            };
            context = context.derive(base);
            current = next;
        }

        log::warn!(
            "inheritance chain of {} exceeds {} levels",
            ty.type_name(),
            self.max_depth
        );
        None
    }

    /// First own concrete virtual method whose override table names the target
    fn explicit_override(&self, ty: &CilTypeRc) -> Option<MethodRc> {
        ty.methods
            .iter()
            .filter(|method| method.is_concrete_virtual())
            .find(|method| {
                method.overrides.iter().any(|declaration| {
                    self.workspace
                        .resolve_method(declaration)
                        .is_some_and(|resolved| resolved.id == self.target.id)
                })
            })
            .cloned()
    }

    /// Own concrete virtual methods matching the target by name and substituted signature
    fn implicit_candidates(&self, ty: &CilTypeRc, interface: &TypeSig) -> Vec<MethodRc> {
        let context = GenericContext::empty().derive(interface);
        let wanted = self.target.signature.substitute(&context);

        ty.methods
            .iter()
            .filter(|method| {
                method.is_concrete_virtual()
                    && method.name == self.target.name
                    && method.signature.matches(&wanted)
            })
            .cloned()
            .collect()
    }
}

impl TypeVisitor for ImplementedByVisitor {
    fn visit(&self, _module: &ModuleRc, ty: &CilTypeRc) -> Vec<Result<ResultLocation>> {
        if ty.is_interface() {
            return Vec::new();
        }
        let Some(interface) = self.implemented_interface(ty) else {
            return Vec::new();
        };

        if let Some(method) = self.explicit_override(ty) {
            return vec![Ok(ResultLocation::in_method(
                &method,
                None,
                UsageKind::Implementation,
            ))];
        }

        let mut candidates = self.implicit_candidates(ty, &interface);
        match candidates.len() {
            0 => Vec::new(),
            1 => {
                let method = candidates.remove(0);
                vec![Ok(ResultLocation::in_method(
                    &method,
                    None,
                    UsageKind::Implementation,
                ))]
            }
            _ => vec![Err(Error::AmbiguousImplementation {
                type_name: ty.type_name().to_string(),
                method: self.target.name.clone(),
                candidates: candidates
                    .iter()
                    .map(|method| format!("{} {}", method.name, method.signature))
                    .collect(),
            })],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::factories::{comparer_workspace, shapes_workspace};

    fn implementers(workspace: &Arc<Workspace>, target: MethodRc) -> Vec<Result<String>> {
        let visitor = ImplementedByVisitor::new(workspace.clone(), target, 64).unwrap();
        workspace
            .modules()
            .iter()
            .flat_map(|module| {
                module
                    .types
                    .iter()
                    .flat_map(|ty| visitor.visit(module, ty))
                    .collect::<Vec<_>>()
            })
            .map(|item| {
                item.map(|location| {
                    let method = workspace.method(location.member.unwrap()).unwrap();
                    let ty = workspace.type_def(method.declaring_type).unwrap();
                    format!("{}::{}", ty.fullname(), method.name)
                })
            })
            .collect()
    }

    #[test]
    fn test_explicit_and_implicit_implementations() {
        let workspace = Arc::new(shapes_workspace());
        let area = workspace.find_method("Shapes", "Shapes.IShape", "Area").unwrap();
        let found: Vec<String> = implementers(&workspace, area)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(
            found,
            vec![
                "Shapes.Circle::ComputeArea",
                "Shapes.Square::Area",
                "Shapes.Triangle::Area"
            ]
        );
    }

    #[test]
    fn test_generic_interface_through_substitution() {
        let workspace = Arc::new(comparer_workspace());
        let compare = workspace
            .find_method(
                "System.Runtime",
                "System.Collections.Generic.IComparer`1",
                "Compare",
            )
            .unwrap();
        let results = implementers(&workspace, compare);

        let found: Vec<&String> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(
            found,
            vec![
                "App.StrCmp::Compare",
                "App.GenericCmp`1::Compare",
                "App.BaseCmp::Compare",
                "App.Leaf::Compare"
            ]
        );

        let errors: Vec<&Error> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors.len(), 1);
        match errors[0] {
            Error::AmbiguousImplementation {
                type_name,
                candidates,
                ..
            } => {
                assert_eq!(type_name, "[App]App.AmbiguousCmp");
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_rejects_non_interface_target() {
        let workspace = Arc::new(shapes_workspace());
        let area = workspace
            .find_method("Shapes", "Shapes.Circle", "ComputeArea")
            .unwrap();
        assert!(matches!(
            ImplementedByVisitor::new(workspace.clone(), area, 64),
            Err(Error::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_rejects_non_virtual_interface_method() {
        let workspace = Arc::new(comparer_workspace());
        let create = workspace
            .find_method(
                "System.Runtime",
                "System.Collections.Generic.IComparer`1",
                "Create",
            )
            .unwrap();
        assert!(matches!(
            ImplementedByVisitor::new(workspace.clone(), create, 64),
            Err(Error::InvalidQuery(_))
        ));
    }
}
