//! The used-by visitor: call sites of a method.
//!
//! Matching runs in two phases per instruction. A cheap pre-filter keeps only call-like
//! instructions whose operand carries the target's name, is a method reference, and is
//! declared through a type related to the target's declaring type by inheritance. Survivors
//! are resolved against the workspace and must bind to exactly the target definition.
//!
//! Only the first hit per method is reported. Hits are mapped to their original location
//! (state machine bodies are reported at the method the user wrote) and deduplicated on that
//! location's identity.

use std::sync::Arc;

use crate::{
    analysis::{
        attributes::AttributeScanner,
        locator::OriginalLocation,
        result::{ResultLocation, UsageKind},
        search::TypeVisitor,
        visited::VisitedSet,
    },
    assembly::Instruction,
    metadata::{
        customattributes::CustomAttribute,
        method::{Method, MethodRc},
        signatures::TypeName,
        token::DefId,
        typesystem::{CilTypeRc, PropertyRc},
        workspace::{ModuleRc, Workspace},
    },
    Error, Result,
};

/// Property written through attribute named arguments
struct SetterTarget {
    property: PropertyRc,
    declaring_type: TypeName,
    scanner: AttributeScanner,
}

impl SetterTarget {
    fn writes(&self, attribute: &CustomAttribute) -> bool {
        attribute.writes_property(&self.property.name)
            && attribute.attribute_type.names(&self.declaring_type)
    }
}

/// Finds the methods whose bodies call a target method.
pub struct UsedByVisitor {
    workspace: Arc<Workspace>,
    target: MethodRc,
    target_type: CilTypeRc,
    locator: Arc<dyn OriginalLocation>,
    visited: Arc<VisitedSet<DefId>>,
    setter: Option<SetterTarget>,
    max_depth: usize,
}

impl UsedByVisitor {
    /// Creates the visitor for one query.
    ///
    /// # Arguments
    /// * `workspace` - The graph to resolve operands against
    /// * `target` - The method whose call sites are wanted
    /// * `is_setter_query` - Also report attribute applications writing the owning property
    /// * `locator` - Maps generated methods to their original location
    /// * `visited` - Reported locations, possibly shared with sibling visitors of the query
    /// * `max_depth` - Bound for inheritance walks
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the target's declaring type is not loaded, and
    /// [`Error::InvalidQuery`] if `is_setter_query` is set and the target is not the setter of
    /// any property.
    pub fn new(
        workspace: Arc<Workspace>,
        target: MethodRc,
        is_setter_query: bool,
        locator: Arc<dyn OriginalLocation>,
        visited: Arc<VisitedSet<DefId>>,
        max_depth: usize,
    ) -> Result<Self> {
        let target_type = workspace
            .type_def(target.declaring_type)
            .ok_or_else(|| malformed_error!("declaring type of {} is not loaded", target.id))?;

        let setter = if is_setter_query {
            let property = workspace
                .property_of(target.id)
                .filter(|property| {
                    property
                        .setter
                        .as_ref()
                        .is_some_and(|setter| setter.id == target.id)
                })
                .ok_or_else(|| {
                    Error::InvalidQuery(format!(
                        "{}::{} is not the setter of any property",
                        target_type.fullname(),
                        target.name
                    ))
                })?;
            Some(SetterTarget {
                property,
                declaring_type: target_type.type_name(),
                scanner: AttributeScanner::new(),
            })
        } else {
            None
        };

        Ok(Self {
            workspace,
            target,
            target_type,
            locator,
            visited,
            setter,
            max_depth,
        })
    }

    /// Returns the first instruction of `method` that calls the target
    fn first_call<'m>(&self, method: &'m Method) -> Option<&'m Instruction> {
        method.instructions().iter().find(|instruction| {
            let Some(reference) = instruction.call_target() else {
                return false;
            };
            if reference.name != self.target.name || reference.is_field() {
                return false;
            }

            let related = self
                .workspace
                .resolve_type(&reference.parent)
                .is_some_and(|parent| {
                    self.workspace
                        .related_by_inheritance(&parent, &self.target_type, self.max_depth)
                });

            related
                && self
                    .workspace
                    .resolve_method(reference)
                    .is_some_and(|resolved| resolved.id == self.target.id)
        })
    }
}

impl TypeVisitor for UsedByVisitor {
    fn visit(&self, module: &ModuleRc, ty: &CilTypeRc) -> Vec<Result<ResultLocation>> {
        let mut results = Vec::new();

        for method in &ty.methods {
            if method.body.is_none() {
                continue;
            }
            let Some(instruction) = self.first_call(method) else {
                continue;
            };

            let original = self.locator.original_method(&self.workspace, method);
            if self.visited.insert(original.id) {
                let offset = (original.id == method.id).then_some(instruction.offset);
                results.push(Ok(ResultLocation::in_method(
                    &original,
                    offset,
                    UsageKind::Call,
                )));
            }
        }

        if let Some(setter) = &self.setter {
            results.extend(setter.scanner.scan_type(module, ty, &self.visited, |attribute| {
                setter.writes(attribute)
            }));
        }

        results
    }

    fn visit_module(&self, module: &ModuleRc) -> Vec<Result<ResultLocation>> {
        match &self.setter {
            Some(setter) => setter.scanner.scan_module(
                &self.workspace,
                module,
                &self.visited,
                |attribute| setter.writes(attribute),
            ),
            None => Vec::new(),
        }
    }
}
