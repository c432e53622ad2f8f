use crate::{
    metadata::{
        signatures::TypeSig,
        typesystem::TypeAttributes,
        workspace::{MethodBuilder, ModuleBuilder, TypeBuilder, Workspace, WorkspaceBuilder},
    },
    test::identity,
};

/// `Bag<T>` with `Add(T)`, an `Add(int32)` overload and `Count()`, and `IntBag : Bag<int32>`
/// declaring nothing itself
pub fn generic_collection_workspace() -> Workspace {
    let module = ModuleBuilder::new("Collections.dll", identity("Collections"))
        .ty(TypeBuilder::class("Collections", "Bag`1")
            .generic_param("T")
            .method(
                MethodBuilder::new("Add")
                    .param(TypeSig::GenericParamType(0))
                    .ret(),
            )
            .method(MethodBuilder::new("Add").param(TypeSig::I4).ret())
            .method(MethodBuilder::new("Count").returns(TypeSig::I4).ret()))
        .ty(TypeBuilder::class("Collections", "IntBag").extends(TypeSig::generic(
            "Collections",
            "Collections",
            "Bag`1",
            vec![TypeSig::I4],
        )));

    WorkspaceBuilder::new().module(module).build().unwrap()
}

fn comparer_of(arg: TypeSig) -> TypeSig {
    TypeSig::generic(
        "System.Runtime",
        "System.Collections.Generic",
        "IComparer`1",
        vec![arg],
    )
}

fn compare(arg: TypeSig) -> MethodBuilder {
    MethodBuilder::new("Compare")
        .returns(TypeSig::I4)
        .param(arg.clone())
        .param(arg)
}

/// `IComparer<T>` in `System.Runtime` and a set of implementers in `App`.
///
/// In type order:
/// - `StrCmp : IComparer<string>` implements `Compare(string, string)`
/// - `GenericCmp<T> : IComparer<T>` implements `Compare(T, T)`
/// - `BaseCmp : IComparer<int32>` implements `Compare(int32, int32)`
/// - `DerivedCmp : BaseCmp` inherits the implementation and declares nothing
/// - `AmbiguousCmp : IComparer<string>` declares two matching `Compare` methods
/// - `WrongCmp : IComparer<string>` declares `Compare(int32, int32)` only
/// - `Middle<T> : IComparer<T>` is abstract with an abstract `Compare`
/// - `Leaf : Middle<string>` overrides `Compare(string, string)`
///
/// `IComparer<T>` also carries a static `Create()` helper.
pub fn comparer_workspace() -> Workspace {
    let runtime = ModuleBuilder::new("System.Runtime.dll", identity("System.Runtime")).ty(
        TypeBuilder::interface("System.Collections.Generic", "IComparer`1")
            .generic_param("T")
            .method(compare(TypeSig::GenericParamType(0)).abstract_method())
            .method(
                MethodBuilder::new("Create")
                    .static_method()
                    .returns(TypeSig::I4)
                    .ret(),
            ),
    );

    let app = ModuleBuilder::new("App.dll", identity("App"))
        .reference("System.Runtime")
        .ty(TypeBuilder::class("App", "StrCmp")
            .implements(comparer_of(TypeSig::String))
            .method(compare(TypeSig::String).virtual_method().ret()))
        .ty(TypeBuilder::class("App", "GenericCmp`1")
            .generic_param("T")
            .implements(comparer_of(TypeSig::GenericParamType(0)))
            .method(compare(TypeSig::GenericParamType(0)).virtual_method().ret()))
        .ty(TypeBuilder::class("App", "BaseCmp")
            .implements(comparer_of(TypeSig::I4))
            .method(compare(TypeSig::I4).virtual_method().ret()))
        .ty(TypeBuilder::class("App", "DerivedCmp").extends(TypeSig::class("App", "App", "BaseCmp")))
        .ty(TypeBuilder::class("App", "AmbiguousCmp")
            .implements(comparer_of(TypeSig::String))
            .method(compare(TypeSig::String).virtual_method().ret())
            .method(compare(TypeSig::String).virtual_method().ret()))
        .ty(TypeBuilder::class("App", "WrongCmp")
            .implements(comparer_of(TypeSig::String))
            .method(compare(TypeSig::I4).virtual_method().ret()))
        .ty(TypeBuilder::class("App", "Middle`1")
            .flags(TypeAttributes::PUBLIC | TypeAttributes::ABSTRACT)
            .generic_param("T")
            .implements(comparer_of(TypeSig::GenericParamType(0)))
            .method(compare(TypeSig::GenericParamType(0)).abstract_method()))
        .ty(TypeBuilder::class("App", "Leaf")
            .extends(TypeSig::generic("App", "App", "Middle`1", vec![TypeSig::String]))
            .method(compare(TypeSig::String).override_method().ret()));

    WorkspaceBuilder::new()
        .module(runtime)
        .module(app)
        .build()
        .unwrap()
}
