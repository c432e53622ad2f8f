//! Scanning custom attribute applications for named-argument writes.
//!
//! `[Custom(Name = "v")]` compiles to an attribute blob whose named argument assigns the
//! property; no instruction ever calls the setter. Setter and field-write queries therefore
//! also inspect the attribute lists of every owner in scope: each assembly and each module
//! once per query, whether or not the module defines any type, and every visited type
//! together with its members.

use crate::{
    analysis::{
        result::{ResultLocation, UsageKind},
        visited::VisitedSet,
    },
    metadata::{
        customattributes::{CustomAttribute, CustomAttributeList},
        token::{DefId, ModuleId, Token},
        typesystem::CilTypeRc,
        workspace::{Module, Workspace},
    },
    Result,
};

/// Per-query attribute scanner; remembers which assemblies and modules it already covered
#[derive(Debug, Default)]
pub struct AttributeScanner {
    modules: VisitedSet<ModuleId>,
    assemblies: VisitedSet<String>,
}

impl AttributeScanner {
    /// Creates a scanner that has not covered any assembly or module yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the assembly and module attributes of a module in scope.
    ///
    /// The assembly is covered by the first of its modules passed in, and every module once.
    /// An owner with at least one application satisfying `matches` produces one
    /// [`UsageKind::AttributeApplication`] location, unless `visited` already holds it.
    pub fn scan_module<F>(
        &self,
        workspace: &Workspace,
        module: &Module,
        visited: &VisitedSet<DefId>,
        matches: F,
    ) -> Vec<Result<ResultLocation>>
    where
        F: Fn(&CustomAttribute) -> bool,
    {
        let mut results = Vec::new();

        if self.assemblies.insert(module.assembly.name.clone()) {
            let manifest = workspace
                .assembly_modules(&module.assembly.name)
                .first()
                .copied()
                .unwrap_or(module.id);
            Self::report(
                &module.assembly_attributes,
                Self::location(manifest, None, None, DefId::new(manifest, Token::ASSEMBLY)),
                visited,
                &matches,
                &mut results,
            );
        }

        if self.modules.insert(module.id) {
            Self::report(
                &module.custom_attributes,
                Self::location(module.id, None, None, module.module_def()),
                visited,
                &matches,
                &mut results,
            );
        }

        results
    }

    /// Scans the attributes of `ty` and of its methods, fields and properties
    pub fn scan_type<F>(
        &self,
        module: &Module,
        ty: &CilTypeRc,
        visited: &VisitedSet<DefId>,
        matches: F,
    ) -> Vec<Result<ResultLocation>>
    where
        F: Fn(&CustomAttribute) -> bool,
    {
        let mut results = Vec::new();
        let mut report = |list: &CustomAttributeList, location: ResultLocation| {
            Self::report(list, location, visited, &matches, &mut results);
        };

        report(
            &ty.custom_attributes,
            Self::location(module.id, Some(ty.id), None, ty.id),
        );
        for method in &ty.methods {
            report(
                &method.custom_attributes,
                Self::location(module.id, Some(ty.id), Some(method.id), method.id),
            );
        }
        for field in &ty.fields {
            report(
                &field.custom_attributes,
                Self::location(module.id, Some(ty.id), Some(field.id), field.id),
            );
        }
        for property in &ty.properties {
            report(
                &property.custom_attributes,
                Self::location(module.id, Some(ty.id), Some(property.id), property.id),
            );
        }

        results
    }

    fn report<F>(
        list: &CustomAttributeList,
        location: ResultLocation,
        visited: &VisitedSet<DefId>,
        matches: &F,
        results: &mut Vec<Result<ResultLocation>>,
    ) where
        F: Fn(&CustomAttribute) -> bool,
    {
        if list.iter().any(|(_, attribute)| matches(attribute)) && visited.insert(location.owner) {
            results.push(Ok(location));
        }
    }

    fn location(
        module: ModuleId,
        declaring_type: Option<DefId>,
        member: Option<DefId>,
        owner: DefId,
    ) -> ResultLocation {
        ResultLocation {
            module,
            declaring_type,
            member,
            owner,
            offset: None,
            kind: UsageKind::AttributeApplication,
        }
    }
}
