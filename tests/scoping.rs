//! Integration tests for query scoping.
//!
//! Pseudo custom attributes are stored as metadata flags by the compiler, so modules applying
//! them need not reference the attribute's assembly. Queries for their properties must scan
//! every module; queries for ordinary properties only scan modules that can see the
//! declaring assembly.

use std::sync::Arc;

use dotscope_xref::{prelude::*, Result};

fn identity(name: &str) -> AssemblyIdentity {
    AssemblyIdentity::new(name, AssemblyVersion::new(8, 0, 0, 0))
}

fn attribute_type(namespace: &str, name: &str, property: &str, property_type: TypeSig) -> TypeBuilder {
    let getter = format!("get_{property}");
    let setter = format!("set_{property}");
    TypeBuilder::class(namespace, name)
        .method(MethodBuilder::new(&getter).special_name().returns(property_type.clone()).ret())
        .method(MethodBuilder::new(&setter).special_name().param(property_type.clone()).ret())
        .property(PropertyBuilder::new(property, property_type).getter(&getter).setter(&setter))
}

fn workspace() -> Result<Workspace> {
    let runtime = ModuleBuilder::new("System.Runtime.dll", identity("System.Runtime"))
        .ty(attribute_type(
            "System.Runtime.InteropServices",
            "StructLayoutAttribute",
            "CharSet",
            TypeSig::I4,
        ))
        .ty(attribute_type(
            "System.ComponentModel",
            "DescriptionAttribute",
            "Text",
            TypeSig::String,
        ));

    let interop = ModuleBuilder::new("Interop.dll", identity("Interop")).ty(
        TypeBuilder::class("Interop", "NativeRect").attribute(
            CustomAttribute::new(TypeSig::class(
                "System.Runtime",
                "System.Runtime.InteropServices",
                "StructLayoutAttribute",
            ))
            .with_property("CharSet", CustomAttributeArgument::I4(2)),
        ),
    );

    let ui = ModuleBuilder::new("Ui.dll", identity("Ui"))
        .reference("System.Runtime")
        .ty(TypeBuilder::class("Ui", "Button").attribute(
            CustomAttribute::new(TypeSig::class(
                "System.Runtime",
                "System.ComponentModel",
                "DescriptionAttribute",
            ))
            .with_property("Text", CustomAttributeArgument::String("OK".to_string())),
        ));

    let standalone = ModuleBuilder::new("Standalone.dll", identity("Standalone"))
        .ty(TypeBuilder::class("Standalone", "Tool"));

    WorkspaceBuilder::new()
        .module(runtime)
        .module(interop)
        .module(ui)
        .module(standalone)
        .build()
}

#[test]
fn test_pseudo_attribute_property_scans_every_module() -> Result<()> {
    let analyzer = Analyzer::new(Arc::new(workspace()?));
    let workspace = analyzer.workspace().clone();
    let char_set = workspace.find_property(
        "System.Runtime",
        "System.Runtime.InteropServices.StructLayoutAttribute",
        "CharSet",
    )?;

    let symbol = Symbol::Property(char_set.clone());
    let scope = analyzer.resolve_scope(&symbol, false)?;
    assert_eq!(scope.len(), workspace.modules().len());

    let native = workspace.find_type("Interop", "Interop.NativeRect")?;
    let locations = analyzer
        .find_usages(&symbol, &CancellationToken::new())?
        .locations()?;
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].owner, native.id);
    assert_eq!(locations[0].kind, UsageKind::AttributeApplication);
    Ok(())
}

#[test]
fn test_ordinary_property_follows_references() -> Result<()> {
    let analyzer = Analyzer::new(Arc::new(workspace()?));
    let workspace = analyzer.workspace().clone();
    let text = workspace.find_property(
        "System.Runtime",
        "System.ComponentModel.DescriptionAttribute",
        "Text",
    )?;

    let scope = analyzer.resolve_scope(&Symbol::Property(text.clone()), false)?;
    let names: Vec<&str> = scope.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["System.Runtime.dll", "Ui.dll"]);

    let everything = analyzer.resolve_scope(&Symbol::Property(text.clone()), true)?;
    assert_eq!(everything.len(), workspace.modules().len());
    assert_eq!(everything[0].name, "System.Runtime.dll");

    let button = workspace.find_type("Ui", "Ui.Button")?;
    let locations = analyzer
        .property_usages(&text, &CancellationToken::new())?
        .locations()?;
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].owner, button.id);
    Ok(())
}

#[test]
fn test_configured_pseudo_attribute_widens_scope() -> Result<()> {
    let config = SearchConfig::default().with_pseudo_attribute("System.ComponentModel.DescriptionAttribute");
    let analyzer = Analyzer::with_config(Arc::new(workspace()?), config);
    let text = analyzer.workspace().find_property(
        "System.Runtime",
        "System.ComponentModel.DescriptionAttribute",
        "Text",
    )?;

    let scope = analyzer.resolve_scope(&Symbol::Property(text), false)?;
    assert_eq!(scope.len(), analyzer.workspace().modules().len());
    Ok(())
}
