pub mod factories;

use crate::metadata::{
    customattributes::{CustomAttribute, CustomAttributeArgument},
    identity::{AssemblyIdentity, AssemblyVersion},
    member::MemberReference,
    signatures::{MethodSig, TypeSig},
};

// Helper function to create an AssemblyIdentity with version 1.0.0.0
pub fn identity(name: &str) -> AssemblyIdentity {
    AssemblyIdentity::new(name, AssemblyVersion::new(1, 0, 0, 0))
}

// Helper function to create a reference to an instance method
pub fn instance_ref(
    parent: TypeSig,
    name: &str,
    return_type: TypeSig,
    params: Vec<TypeSig>,
) -> MemberReference {
    MemberReference::method(parent, name, MethodSig::instance(return_type, params))
}

// Helper function to create an attribute assigning one string property
pub fn string_property_attribute(attribute_type: TypeSig, property: &str, value: &str) -> CustomAttribute {
    CustomAttribute::new(attribute_type)
        .with_property(property, CustomAttributeArgument::String(value.to_string()))
}
