use super::scoping::attribute_class;
use crate::{
    assembly::OpCode,
    metadata::{
        customattributes::{CustomAttribute, CustomAttributeArgument},
        signatures::TypeSig,
        workspace::{FieldBuilder, MethodBuilder, ModuleBuilder, TypeBuilder, Workspace, WorkspaceBuilder},
    },
    test::{identity, instance_ref, string_property_attribute},
};

fn custom(value: &str) -> CustomAttribute {
    string_property_attribute(TypeSig::class("Lib", "Lib", "CustomAttribute"), "Name", value)
}

/// `Lib.CustomAttribute` applied in every position an attribute can take.
///
/// - `Lib.dll` declares `CustomAttribute` (property `Name`, public field `Tag`) and
///   `OtherAttribute` with its own `Name`
/// - `App.dll` applies `[Custom(Name = "v")]` to `Tagged`, `[Other(Name = "x")]` to `Other`,
///   `[Custom(Tag = "t")]` to `Fielded`, and calls both `Name` accessors from `Program.Main`
/// - `Plugin.dll` applies `[Custom(Name = ...)]` to its assembly, its module and the method
///   `Entry.Configure`
pub fn attribute_workspace() -> Workspace {
    let custom_type = TypeSig::class("Lib", "Lib", "CustomAttribute");

    let lib = ModuleBuilder::new("Lib.dll", identity("Lib"))
        .reference("System.Runtime")
        .ty(attribute_class("Lib", "CustomAttribute", "Name", TypeSig::String)
            .field(FieldBuilder::new("Tag", TypeSig::String)))
        .ty(attribute_class("Lib", "OtherAttribute", "Name", TypeSig::String));

    let app = ModuleBuilder::new("App.dll", identity("App"))
        .reference("Lib")
        .ty(TypeBuilder::class("App", "Tagged").attribute(custom("v")))
        .ty(TypeBuilder::class("App", "Other").attribute(string_property_attribute(
            TypeSig::class("Lib", "Lib", "OtherAttribute"),
            "Name",
            "x",
        )))
        .ty(TypeBuilder::class("App", "Fielded").attribute(
            CustomAttribute::new(custom_type.clone())
                .with_field("Tag", CustomAttributeArgument::String("t".to_string())),
        ))
        .ty(TypeBuilder::class("App", "Program").method(
            MethodBuilder::new("Main")
                .static_method()
                .call(
                    OpCode::Callvirt,
                    instance_ref(custom_type.clone(), "get_Name", TypeSig::String, vec![]),
                )
                .call(
                    OpCode::Callvirt,
                    instance_ref(custom_type, "set_Name", TypeSig::Void, vec![TypeSig::String]),
                )
                .ret(),
        ));

    let plugin = ModuleBuilder::new("Plugin.dll", identity("Plugin"))
        .reference("Lib")
        .attribute(custom("m"))
        .assembly_attribute(custom("a"))
        .ty(TypeBuilder::class("Plugin", "Entry")
            .method(MethodBuilder::new("Configure").attribute(custom("x")).ret()));

    WorkspaceBuilder::new()
        .module(lib)
        .module(app)
        .module(plugin)
        .build()
        .unwrap()
}
