//! On-demand resolution of type and member references.
//!
//! Resolution follows the runtime's lookup rules closely enough for cross-reference matching:
//! a type reference resolves through its assembly and full name, and a member reference
//! resolves in its parent type first and then in the parent's base types. Reference signatures
//! are written against the parent's generic type definition, so they compare unsubstituted at
//! the parent and only base links substitute generic arguments. Every walk is bounded so that
//! an inheritance cycle in a malformed module terminates.

use crate::metadata::{
    member::{MemberReference, MemberSignature},
    method::MethodRc,
    signatures::{GenericContext, TypeSig},
    token::DefId,
    typesystem::{CilType, CilTypeRc, FieldRc},
    workspace::{Workspace, MAX_RESOLUTION_DEPTH},
};

impl Workspace {
    /// Resolves a type reference to its definition.
    ///
    /// Generic instantiations resolve to their generic type definition. Primitives, arrays,
    /// pointers and generic parameters have no definition and return `None`.
    #[must_use]
    pub fn resolve_type(&self, reference: &TypeSig) -> Option<CilTypeRc> {
        let name = reference.type_name()?;
        self.type_by_name(&name.assembly, &name.full_name())
    }

    /// Resolves the base type of `ty`, or `None` for roots and broken links
    #[must_use]
    pub fn base_type(&self, ty: &CilType) -> Option<CilTypeRc> {
        self.resolve_type(ty.base.as_ref()?)
    }

    /// Resolves a method reference to its definition.
    ///
    /// The lookup starts at the referenced parent type and continues up the base chain, the
    /// way a call through a derived type binds to an inherited method. Candidates match on
    /// name and structural signature. At the parent the raw signatures are compared, so
    /// `Bag<int32>::Add(int32)` never binds to `Add(!0)`; in base types the candidate's
    /// signature is seen through the instantiated base reference.
    ///
    /// # Arguments
    /// * `reference` - The method reference, as found in an operand or an override entry
    ///
    /// # Returns
    /// The resolved method, or `None` if the reference is a field reference, the parent does
    /// not resolve, or no type in the chain declares a matching method.
    #[must_use]
    pub fn resolve_method(&self, reference: &MemberReference) -> Option<MethodRc> {
        let MemberSignature::Method(signature) = &reference.signature else {
            return None;
        };

        let mut current = self.resolve_type(&reference.parent)?;
        let mut current_context = GenericContext::empty();
        for _ in 0..MAX_RESOLUTION_DEPTH {
            let found = current.methods.iter().find(|method| {
                method.name == reference.name
                    && method.signature.substitute(&current_context).matches(signature)
            });
            if let Some(method) = found {
                return Some(method.clone());
            }

            let base = current.base.as_ref()?;
            current_context = current_context.derive(base);
            current = self.resolve_type(base)?;
        }

        log::warn!(
            "gave up resolving {} after {} base types",
            reference,
            MAX_RESOLUTION_DEPTH
        );
        None
    }

    /// Resolves a field reference to its definition, searching base types like
    /// [`Workspace::resolve_method`].
    #[must_use]
    pub fn resolve_field(&self, reference: &MemberReference) -> Option<FieldRc> {
        let MemberSignature::Field(field_type) = &reference.signature else {
            return None;
        };

        let mut current = self.resolve_type(&reference.parent)?;
        let mut current_context = GenericContext::empty();
        for _ in 0..MAX_RESOLUTION_DEPTH {
            let found = current.fields.iter().find(|field| {
                field.name == reference.name
                    && field.field_type.substitute(&current_context) == *field_type
            });
            if let Some(field) = found {
                return Some(field.clone());
            }

            let base = current.base.as_ref()?;
            current_context = current_context.derive(base);
            current = self.resolve_type(base)?;
        }
        None
    }

    /// Returns `true` if `ancestor` appears in the base chain of `ty` (excluding `ty` itself).
    ///
    /// The walk stops at the first link that does not resolve, or after `max_depth` steps.
    #[must_use]
    pub fn inherits_from(&self, ty: &CilType, ancestor: DefId, max_depth: usize) -> bool {
        let mut current = self.base_type(ty);
        let mut depth = 0;
        while let Some(base) = current {
            if base.id == ancestor {
                return true;
            }
            depth += 1;
            if depth >= max_depth {
                log::warn!(
                    "inheritance chain of {} exceeds {} levels",
                    ty.type_name(),
                    max_depth
                );
                return false;
            }
            current = self.base_type(&base);
        }
        false
    }

    /// Returns `true` if two types are the same or one derives from the other
    #[must_use]
    pub fn related_by_inheritance(&self, a: &CilType, b: &CilType, max_depth: usize) -> bool {
        a.id == b.id || self.inherits_from(a, b.id, max_depth) || self.inherits_from(b, a.id, max_depth)
    }
}
