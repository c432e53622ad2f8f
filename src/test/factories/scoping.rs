use crate::{
    metadata::{
        customattributes::{CustomAttribute, CustomAttributeArgument},
        method::MethodAccessFlags,
        signatures::TypeSig,
        workspace::{
            MethodBuilder, ModuleBuilder, PropertyBuilder, TypeBuilder, Workspace, WorkspaceBuilder,
        },
    },
    assembly::OpCode,
    test::{identity, instance_ref, string_property_attribute},
};

/// Five modules with different visibility of the `Core` assembly, in load order:
///
/// 1. `Core.dll` declares `Core.Service` with public `Run` and assembly-internal `RunInternal`,
///    and grants `Friend` access through `InternalsVisibleTo`
/// 2. `Core.Extra.netmodule` belongs to `Core` and calls `Run`
/// 3. `App.dll` references `Core` and calls `Run`
/// 4. `Unrelated.dll` does not reference `Core`
/// 5. `Friend.dll` references `Core` and calls `RunInternal`
pub fn layered_workspace() -> Workspace {
    let service = TypeSig::class("Core", "Core", "Service");
    let run = instance_ref(service.clone(), "Run", TypeSig::Void, vec![]);
    let run_internal = instance_ref(service, "RunInternal", TypeSig::Void, vec![]);
    let friends = CustomAttribute::new(TypeSig::class(
        "System.Runtime",
        "System.Runtime.CompilerServices",
        "InternalsVisibleToAttribute",
    ))
    .with_fixed(CustomAttributeArgument::String(
        "Friend, PublicKey=0024000004800000".to_string(),
    ));

    WorkspaceBuilder::new()
        .module(
            ModuleBuilder::new("Core.dll", identity("Core"))
                .reference("System.Runtime")
                .assembly_attribute(friends)
                .ty(TypeBuilder::class("Core", "Service")
                    .method(MethodBuilder::new("Run").ret())
                    .method(
                        MethodBuilder::new("RunInternal")
                            .access(MethodAccessFlags::ASSEM)
                            .ret(),
                    )),
        )
        .module(
            ModuleBuilder::new("Core.Extra.netmodule", identity("Core")).ty(TypeBuilder::class(
                "Core", "Helper",
            )
            .internal()
            .method(MethodBuilder::new("Help").call(OpCode::Call, run.clone()).ret())),
        )
        .module(
            ModuleBuilder::new("App.dll", identity("App"))
                .reference("Core")
                .ty(TypeBuilder::class("App", "Program")
                    .method(MethodBuilder::new("Main").static_method().call(OpCode::Call, run).ret())),
        )
        .module(
            ModuleBuilder::new("Unrelated.dll", identity("Unrelated"))
                .reference("System.Runtime")
                .ty(TypeBuilder::class("Unrelated", "Thing").method(MethodBuilder::new("Run").ret())),
        )
        .module(
            ModuleBuilder::new("Friend.dll", identity("Friend"))
                .reference("Core")
                .ty(TypeBuilder::class("Friend", "Client")
                    .method(MethodBuilder::new("Use").call(OpCode::Call, run_internal).ret())),
        )
        .build()
        .unwrap()
}

/// `modules` independent modules `Gen{i}.dll`, each with `types_per_module` types `T{j}`
/// declaring one method `M`
pub fn many_types_workspace(modules: usize, types_per_module: usize) -> Workspace {
    let mut builder = WorkspaceBuilder::new();
    for i in 0..modules {
        let namespace = format!("Gen{i}");
        let mut module = ModuleBuilder::new(&format!("{namespace}.dll"), identity(&namespace));
        for j in 0..types_per_module {
            module = module.ty(TypeBuilder::class(&namespace, &format!("T{j}"))
                .method(MethodBuilder::new("M").ret()));
        }
        builder = builder.module(module);
    }
    builder.build().unwrap()
}

/// A `System.Attribute` subclass with one read-write property
pub(super) fn attribute_class(namespace: &str, name: &str, property: &str, property_type: TypeSig) -> TypeBuilder {
    TypeBuilder::class(namespace, name)
        .extends(TypeSig::class("System.Runtime", "System", "Attribute"))
        .method(
            MethodBuilder::new(&format!("get_{property}"))
                .special_name()
                .returns(property_type.clone())
                .ret(),
        )
        .method(
            MethodBuilder::new(&format!("set_{property}"))
                .special_name()
                .param(property_type.clone())
                .ret(),
        )
        .property(
            PropertyBuilder::new(property, property_type)
                .getter(&format!("get_{property}"))
                .setter(&format!("set_{property}")),
        )
}

/// `StructLayoutAttribute.Pack` next to the ordinary `ObsoleteAttribute.Message`.
///
/// `Native.dll` applies `[StructLayout(Pack = 1)]` without referencing `System.Runtime`, the
/// way the compiler leaves pseudo attributes behind. `Lib.dll` references `System.Runtime`
/// and applies `[Obsolete(Message = "old")]`.
pub fn pseudo_attribute_workspace() -> Workspace {
    let runtime = ModuleBuilder::new("System.Runtime.dll", identity("System.Runtime"))
        .ty(attribute_class(
            "System.Runtime.InteropServices",
            "StructLayoutAttribute",
            "Pack",
            TypeSig::I4,
        ))
        .ty(attribute_class("System", "ObsoleteAttribute", "Message", TypeSig::String));

    let lib = ModuleBuilder::new("Lib.dll", identity("Lib"))
        .reference("System.Runtime")
        .ty(TypeBuilder::class("Lib", "Legacy").attribute(string_property_attribute(
            TypeSig::class("System.Runtime", "System", "ObsoleteAttribute"),
            "Message",
            "old",
        )));

    let native = ModuleBuilder::new("Native.dll", identity("Native")).ty(
        TypeBuilder::class("Native", "Interop").attribute(
            CustomAttribute::new(TypeSig::class(
                "System.Runtime",
                "System.Runtime.InteropServices",
                "StructLayoutAttribute",
            ))
            .with_property("Pack", CustomAttributeArgument::I4(1)),
        ),
    );

    WorkspaceBuilder::new()
        .module(runtime)
        .module(lib)
        .module(native)
        .build()
        .unwrap()
}
