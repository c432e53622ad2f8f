use crate::{
    assembly::OpCode,
    metadata::{
        signatures::TypeSig,
        workspace::{MethodBuilder, ModuleBuilder, TypeBuilder, Workspace, WorkspaceBuilder},
    },
    test::{identity, instance_ref},
};

/// `A : B` and `B : A`, plus an unrelated `C`
pub fn cyclic_workspace() -> Workspace {
    let module = ModuleBuilder::new("Broken.dll", identity("Broken"))
        .ty(TypeBuilder::class("Broken", "A").extends(TypeSig::class("Broken", "Broken", "B")))
        .ty(TypeBuilder::class("Broken", "B").extends(TypeSig::class("Broken", "Broken", "A")))
        .ty(TypeBuilder::class("Broken", "C"));

    WorkspaceBuilder::new().module(module).build().unwrap()
}

fn move_next(kickoff_type: &str, kickoff: &str) -> MethodBuilder {
    MethodBuilder::new("MoveNext")
        .override_method()
        .state_machine_of(instance_ref(
            TypeSig::class("App", "App", kickoff_type),
            kickoff,
            TypeSig::Void,
            vec![],
        ))
}

/// Compiler-generated state machines calling `Client.Fetch`.
///
/// - `Worker.Sync` calls `Fetch` directly
/// - `Worker.LoadAsync` only starts `<LoadAsync>d__1`, whose `MoveNext` calls `Fetch`
/// - `<<LoadAsync>b__0>d` is nested one level deeper and also calls `Fetch`
/// - `Broken/<Loop>d__0` and `Broken/<Loop>d__1` name each other as kickoff
pub fn async_workspace() -> Workspace {
    let fetch = instance_ref(TypeSig::class("App", "App", "Client"), "Fetch", TypeSig::Void, vec![]);

    let module = ModuleBuilder::new("App.dll", identity("App"))
        .ty(TypeBuilder::class("App", "Client").method(MethodBuilder::new("Fetch").ret()))
        .ty(TypeBuilder::class("App", "Worker")
            .method(MethodBuilder::new("LoadAsync").ret())
            .method(MethodBuilder::new("Sync").call(OpCode::Call, fetch.clone()).ret()))
        .ty(TypeBuilder::class("App", "Worker/<LoadAsync>d__1")
            .internal()
            .method(
                move_next("Worker", "LoadAsync")
                    .call(OpCode::Callvirt, fetch.clone())
                    .ret(),
            ))
        .ty(TypeBuilder::class("App", "Worker/<<LoadAsync>b__0>d")
            .internal()
            .method(
                move_next("Worker/<LoadAsync>d__1", "MoveNext")
                    .call(OpCode::Callvirt, fetch)
                    .ret(),
            ))
        .ty(TypeBuilder::class("App", "Broken/<Loop>d__0")
            .internal()
            .method(move_next("Broken/<Loop>d__1", "MoveNext").ret()))
        .ty(TypeBuilder::class("App", "Broken/<Loop>d__1")
            .internal()
            .method(move_next("Broken/<Loop>d__0", "MoveNext").ret()));

    WorkspaceBuilder::new().module(module).build().unwrap()
}
