//! The field-access visitor: methods reading or writing a field.
//!
//! Works like the used-by visitor with field instructions instead of calls. Write queries
//! also report attribute applications that assign the field through a named argument.

use std::sync::Arc;

use strum::{Display, IntoStaticStr};

use crate::{
    analysis::{
        attributes::AttributeScanner,
        locator::OriginalLocation,
        result::{ResultLocation, UsageKind},
        search::TypeVisitor,
        visited::VisitedSet,
    },
    assembly::{FieldAccessKind, Instruction},
    metadata::{
        customattributes::CustomAttribute,
        method::Method,
        signatures::TypeName,
        token::DefId,
        typesystem::{CilTypeRc, FieldRc},
        workspace::{ModuleRc, Workspace},
    },
    Result,
};

/// Which field accesses a query is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum FieldAccess {
    /// Loads of the value or the address
    Read,
    /// Stores, including attribute named-argument assignments
    Write,
    /// Both
    Any,
}

impl FieldAccess {
    /// Returns `true` if an instruction access of `kind` is wanted
    #[must_use]
    pub fn accepts(&self, kind: FieldAccessKind) -> bool {
        match self {
            FieldAccess::Read => kind == FieldAccessKind::Read,
            FieldAccess::Write => kind == FieldAccessKind::Write,
            FieldAccess::Any => true,
        }
    }

    /// Returns `true` if attribute named-argument writes are wanted
    #[must_use]
    pub fn includes_writes(&self) -> bool {
        matches!(self, FieldAccess::Write | FieldAccess::Any)
    }
}

/// Finds the methods accessing a target field.
pub struct FieldAccessVisitor {
    workspace: Arc<Workspace>,
    target: FieldRc,
    target_type: CilTypeRc,
    declaring_name: TypeName,
    access: FieldAccess,
    locator: Arc<dyn OriginalLocation>,
    visited: VisitedSet<DefId>,
    scanner: AttributeScanner,
    max_depth: usize,
}

impl FieldAccessVisitor {
    /// Creates the visitor for one query.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type of the field is not loaded.
    pub fn new(
        workspace: Arc<Workspace>,
        target: FieldRc,
        access: FieldAccess,
        locator: Arc<dyn OriginalLocation>,
        max_depth: usize,
    ) -> Result<Self> {
        let target_type = workspace
            .type_def(target.declaring_type)
            .ok_or_else(|| malformed_error!("declaring type of {} is not loaded", target.id))?;

        Ok(Self {
            workspace,
            declaring_name: target_type.type_name(),
            target,
            target_type,
            access,
            locator,
            visited: VisitedSet::new(),
            scanner: AttributeScanner::new(),
            max_depth,
        })
    }

    fn attribute_writes(&self, attribute: &CustomAttribute) -> bool {
        attribute.writes_field(&self.target.name)
            && attribute.attribute_type.names(&self.declaring_name)
    }

    fn first_access<'m>(&self, method: &'m Method) -> Option<(&'m Instruction, FieldAccessKind)> {
        method.instructions().iter().find_map(|instruction| {
            let kind = instruction.opcode.field_access()?;
            if !self.access.accepts(kind) {
                return None;
            }
            let reference = instruction.member()?;
            if reference.name != self.target.name || !reference.is_field() {
                return None;
            }

            let parent = self.workspace.resolve_type(&reference.parent)?;
            if !self
                .workspace
                .related_by_inheritance(&parent, &self.target_type, self.max_depth)
            {
                return None;
            }

            self.workspace
                .resolve_field(reference)
                .filter(|resolved| resolved.id == self.target.id)
                .map(|_| (instruction, kind))
        })
    }
}

impl TypeVisitor for FieldAccessVisitor {
    fn visit(&self, module: &ModuleRc, ty: &CilTypeRc) -> Vec<Result<ResultLocation>> {
        let mut results = Vec::new();

        for method in &ty.methods {
            let Some((instruction, kind)) = self.first_access(method) else {
                continue;
            };

            let original = self.locator.original_method(&self.workspace, method);
            if self.visited.insert(original.id) {
                let offset = (original.id == method.id).then_some(instruction.offset);
                let usage = match kind {
                    FieldAccessKind::Read => UsageKind::FieldRead,
                    FieldAccessKind::Write => UsageKind::FieldWrite,
                };
                results.push(Ok(ResultLocation::in_method(&original, offset, usage)));
            }
        }

        if self.access.includes_writes() {
            results.extend(self.scanner.scan_type(module, ty, &self.visited, |attribute| {
                self.attribute_writes(attribute)
            }));
        }

        results
    }

    fn visit_module(&self, module: &ModuleRc) -> Vec<Result<ResultLocation>> {
        if !self.access.includes_writes() {
            return Vec::new();
        }
        self.scanner
            .scan_module(&self.workspace, module, &self.visited, |attribute| {
                self.attribute_writes(attribute)
            })
    }
}
