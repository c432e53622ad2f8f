use crate::{
    assembly::{OpCode, Operand},
    metadata::{
        member::MemberReference,
        signatures::TypeSig,
        typesystem::TypeAttributes,
        workspace::{FieldBuilder, MethodBuilder, ModuleBuilder, TypeBuilder, Workspace, WorkspaceBuilder},
    },
    test::{identity, instance_ref},
};

fn shapes(name: &str) -> TypeSig {
    TypeSig::class("Shapes", "Shapes", name)
}

/// A single module with a small shape hierarchy.
///
/// - `IShape` declares `Area()`
/// - `Shape` declares `Describe()`, called by `Printer.PrintAll` directly and by
///   `Circle.PrintCircle` through the derived type
/// - `Circle : Shape, IShape` implements `Area` explicitly as `ComputeArea` and owns `radius`,
///   written by its constructor and read by `ComputeArea`
/// - `Square : Shape, IShape` implements `Area` implicitly and has an unrelated non-virtual
///   `ComputeArea`, called only from `Printer.Report`
/// - `Polygon` is abstract and leaves `Area` abstract; `Triangle : Polygon` overrides it
pub fn shapes_workspace() -> Workspace {
    let describe = instance_ref(shapes("Shape"), "Describe", TypeSig::String, vec![]);
    let describe_circle = instance_ref(shapes("Circle"), "Describe", TypeSig::String, vec![]);
    let circle_area = instance_ref(shapes("Circle"), "ComputeArea", TypeSig::R8, vec![]);
    let square_area = instance_ref(shapes("Square"), "ComputeArea", TypeSig::R8, vec![]);
    let interface_area = instance_ref(shapes("IShape"), "Area", TypeSig::R8, vec![]);
    let radius = MemberReference::field(shapes("Circle"), "radius", TypeSig::R8);

    let module = ModuleBuilder::new("Shapes.dll", identity("Shapes"))
        .reference("System.Runtime")
        .ty(TypeBuilder::interface("Shapes", "IShape")
            .method(MethodBuilder::new("Area").abstract_method().returns(TypeSig::R8)))
        .ty(TypeBuilder::class("Shapes", "Shape")
            .flags(TypeAttributes::PUBLIC | TypeAttributes::ABSTRACT)
            .method(
                MethodBuilder::new("Describe")
                    .returns(TypeSig::String)
                    .instruction(OpCode::Ldstr, Operand::String("shape".to_string()))
                    .ret(),
            ))
        .ty(TypeBuilder::class("Shapes", "Printer")
            .method(
                MethodBuilder::new("PrintAll")
                    .call(OpCode::Callvirt, describe.clone())
                    .instruction(OpCode::Other, Operand::None)
                    .call(OpCode::Callvirt, describe)
                    .call(OpCode::Callvirt, circle_area.clone())
                    .ret(),
            )
            .method(
                MethodBuilder::new("Report")
                    .call(OpCode::Call, square_area)
                    .call(OpCode::Callvirt, circle_area)
                    .ret(),
            ))
        .ty(TypeBuilder::class("Shapes", "Circle")
            .extends(shapes("Shape"))
            .implements(shapes("IShape"))
            .field(FieldBuilder::new("radius", TypeSig::R8).internal())
            .method(
                MethodBuilder::new(".ctor")
                    .special_name()
                    .param(TypeSig::R8)
                    .instruction(OpCode::Other, Operand::None)
                    .instruction(OpCode::Other, Operand::None)
                    .call(OpCode::Stfld, radius.clone())
                    .ret(),
            )
            .method(
                MethodBuilder::new("ComputeArea")
                    .virtual_method()
                    .returns(TypeSig::R8)
                    .overrides(interface_area)
                    .call(OpCode::Ldfld, radius.clone())
                    .call(OpCode::Ldfld, radius)
                    .instruction(OpCode::Other, Operand::None)
                    .ret(),
            )
            .method(
                MethodBuilder::new("PrintCircle")
                    .call(OpCode::Callvirt, describe_circle)
                    .ret(),
            ))
        .ty(TypeBuilder::class("Shapes", "Square")
            .extends(shapes("Shape"))
            .implements(shapes("IShape"))
            .method(MethodBuilder::new("Area").virtual_method().returns(TypeSig::R8).ret())
            .method(MethodBuilder::new("ComputeArea").returns(TypeSig::R8).ret()))
        .ty(TypeBuilder::class("Shapes", "Polygon")
            .flags(TypeAttributes::PUBLIC | TypeAttributes::ABSTRACT)
            .extends(shapes("Shape"))
            .implements(shapes("IShape"))
            .method(MethodBuilder::new("Area").abstract_method().returns(TypeSig::R8)))
        .ty(TypeBuilder::class("Shapes", "Triangle")
            .extends(shapes("Polygon"))
            .method(MethodBuilder::new("Area").override_method().returns(TypeSig::R8).ret()));

    WorkspaceBuilder::new().module(module).build().unwrap()
}
