use std::{fmt, sync::Arc};

use crate::metadata::{
    customattributes::CustomAttributeList, method::MethodRc, signatures::TypeSig, token::DefId,
};

/// A reference-counted pointer to a `Field`
pub type FieldRc = Arc<Field>;
/// A reference-counted pointer to a `Property`
pub type PropertyRc = Arc<Property>;

/// A field definition
pub struct Field {
    /// Workspace-wide identity of this field
    pub id: DefId,
    /// Identity of the declaring type
    pub declaring_type: DefId,
    /// Field name
    pub name: String,
    /// Field type, in terms of the declaring type's generic parameters
    pub field_type: TypeSig,
    /// Static field
    pub is_static: bool,
    /// Private or assembly-internal
    pub is_assembly_bound: bool,
    /// All custom attributes applied to this field
    pub custom_attributes: CustomAttributeList,
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("field_type", &self.field_type.to_string())
            .finish_non_exhaustive()
    }
}

/// A property definition.
///
/// A property is not callable by itself; code touches it through its accessors, and
/// attribute applications touch it through named arguments.
pub struct Property {
    /// Workspace-wide identity of this property
    pub id: DefId,
    /// Identity of the declaring type
    pub declaring_type: DefId,
    /// Property name
    pub name: String,
    /// Property type
    pub property_type: TypeSig,
    /// The `get` accessor, if any
    pub getter: Option<MethodRc>,
    /// The `set` accessor, if any
    pub setter: Option<MethodRc>,
    /// All custom attributes applied to this property
    pub custom_attributes: CustomAttributeList,
}

impl Property {
    /// Returns the accessors that exist, getter first
    #[must_use]
    pub fn accessors(&self) -> Vec<MethodRc> {
        self.getter.iter().chain(self.setter.iter()).cloned().collect()
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("getter", &self.getter.as_ref().map(|m| m.id))
            .field("setter", &self.setter.as_ref().map(|m| m.id))
            .finish_non_exhaustive()
    }
}
