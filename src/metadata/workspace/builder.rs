//! Fluent builders for assembling a [`Workspace`].
//!
//! Loaders and test fixtures describe modules, types and members by name; the builders assign
//! [`ModuleId`]s in load order and metadata tokens in declaration order, link property
//! accessors to the methods they name, and share assembly-level attribute lists between all
//! modules of the same assembly.

use std::{collections::HashMap, sync::Arc};

use crate::{
    assembly::{Instruction, OpCode, Operand},
    metadata::{
        customattributes::{empty_list, list_from, CustomAttribute, CustomAttributeList},
        identity::AssemblyIdentity,
        member::MemberReference,
        method::{Method, MethodAccessFlags, MethodBody, MethodModifiers},
        signatures::{MethodSig, TypeSig},
        token::{DefId, ModuleId, Token},
        typesystem::{CilType, Field, Property, TypeAttributes},
        workspace::{Module, Workspace},
    },
    Result,
};

/// Builds a [`Workspace`] from module descriptions in load order
#[derive(Default)]
pub struct WorkspaceBuilder {
    modules: Vec<ModuleBuilder>,
}

impl WorkspaceBuilder {
    /// Creates an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a module; modules are numbered in the order they are added
    #[must_use]
    pub fn module(mut self, module: ModuleBuilder) -> Self {
        self.modules.push(module);
        self
    }

    /// Builds the workspace and its indices.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a property names an accessor its type does not
    /// declare.
    pub fn build(self) -> Result<Workspace> {
        let mut assembly_attributes: HashMap<String, Vec<CustomAttribute>> = HashMap::new();
        for module in &self.modules {
            assembly_attributes
                .entry(module.assembly.name.clone())
                .or_default()
                .extend(module.assembly_attributes.iter().cloned());
        }
        let assembly_attributes: HashMap<String, CustomAttributeList> = assembly_attributes
            .into_iter()
            .map(|(name, attributes)| (name, list_from(attributes)))
            .collect();

        let mut modules = Vec::with_capacity(self.modules.len());
        for (index, module) in self.modules.into_iter().enumerate() {
            let id = ModuleId(u32::try_from(index).map_err(|_| malformed_error!("too many modules"))?);
            let shared = assembly_attributes
                .get(&module.assembly.name)
                .cloned()
                .unwrap_or_else(empty_list);
            modules.push(Arc::new(module.build(id, shared)?));
        }

        Ok(Workspace::new(modules))
    }
}

#[derive(Default)]
struct RowCounters {
    types: u32,
    methods: u32,
    fields: u32,
    properties: u32,
}

impl RowCounters {
    fn next(counter: &mut u32, table: u8) -> Token {
        *counter += 1;
        Token::from_parts(table, *counter)
    }
}

/// Describes one module
pub struct ModuleBuilder {
    name: String,
    assembly: AssemblyIdentity,
    references: Vec<String>,
    types: Vec<TypeBuilder>,
    attributes: Vec<CustomAttribute>,
    assembly_attributes: Vec<CustomAttribute>,
}

impl ModuleBuilder {
    /// Creates a module belonging to `assembly`
    #[must_use]
    pub fn new(name: &str, assembly: AssemblyIdentity) -> Self {
        Self {
            name: name.to_string(),
            assembly,
            references: Vec::new(),
            types: Vec::new(),
            attributes: Vec::new(),
            assembly_attributes: Vec::new(),
        }
    }

    /// Adds an assembly reference by simple name
    #[must_use]
    pub fn reference(mut self, assembly: &str) -> Self {
        self.references.push(assembly.to_string());
        self
    }

    /// Adds a type definition
    #[must_use]
    pub fn ty(mut self, ty: TypeBuilder) -> Self {
        self.types.push(ty);
        self
    }

    /// Applies a custom attribute to the module
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Applies a custom attribute to the owning assembly
    #[must_use]
    pub fn assembly_attribute(mut self, attribute: CustomAttribute) -> Self {
        self.assembly_attributes.push(attribute);
        self
    }

    fn build(self, id: ModuleId, assembly_attributes: CustomAttributeList) -> Result<Module> {
        let mut rows = RowCounters::default();
        let mut types = Vec::with_capacity(self.types.len());
        for ty in self.types {
            types.push(Arc::new(ty.build(id, &self.assembly.name, &mut rows)?));
        }

        Ok(Module {
            id,
            name: self.name,
            assembly: self.assembly,
            references: self.references,
            types,
            custom_attributes: list_from(self.attributes),
            assembly_attributes,
        })
    }
}

/// Describes one type definition
pub struct TypeBuilder {
    namespace: String,
    name: String,
    flags: TypeAttributes,
    base: Option<TypeSig>,
    interfaces: Vec<TypeSig>,
    generic_params: Vec<String>,
    methods: Vec<MethodBuilder>,
    fields: Vec<FieldBuilder>,
    properties: Vec<PropertyBuilder>,
    attributes: Vec<CustomAttribute>,
}

impl TypeBuilder {
    fn with_flags(namespace: &str, name: &str, flags: TypeAttributes) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            flags,
            base: None,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// A public class
    #[must_use]
    pub fn class(namespace: &str, name: &str) -> Self {
        Self::with_flags(namespace, name, TypeAttributes::PUBLIC)
    }

    /// A public interface
    #[must_use]
    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::with_flags(
            namespace,
            name,
            TypeAttributes::PUBLIC | TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT,
        )
    }

    /// Adds flags, e.g. `ABSTRACT` or `SEALED`
    #[must_use]
    pub fn flags(mut self, flags: TypeAttributes) -> Self {
        self.flags |= flags;
        self
    }

    /// Makes the type visible only inside its assembly
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.flags.remove(TypeAttributes::PUBLIC);
        self
    }

    /// Sets the base type
    #[must_use]
    pub fn extends(mut self, base: TypeSig) -> Self {
        self.base = Some(base);
        self
    }

    /// Adds a declared interface
    #[must_use]
    pub fn implements(mut self, interface: TypeSig) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Adds a generic parameter; the name should carry the matching arity suffix
    #[must_use]
    pub fn generic_param(mut self, name: &str) -> Self {
        self.generic_params.push(name.to_string());
        self
    }

    /// Adds a method
    #[must_use]
    pub fn method(mut self, method: MethodBuilder) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a field
    #[must_use]
    pub fn field(mut self, field: FieldBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a property; its accessors must be added with [`TypeBuilder::method`]
    #[must_use]
    pub fn property(mut self, property: PropertyBuilder) -> Self {
        self.properties.push(property);
        self
    }

    /// Applies a custom attribute to the type
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, module: ModuleId, assembly: &str, rows: &mut RowCounters) -> Result<CilType> {
        let id = DefId::new(
            module,
            RowCounters::next(&mut rows.types, Token::TABLE_TYPEDEF),
        );

        let methods: Vec<_> = self
            .methods
            .into_iter()
            .map(|method| {
                let token = RowCounters::next(&mut rows.methods, Token::TABLE_METHODDEF);
                Arc::new(method.build(DefId::new(module, token), id))
            })
            .collect();

        let fields = self
            .fields
            .into_iter()
            .map(|field| {
                let token = RowCounters::next(&mut rows.fields, Token::TABLE_FIELD);
                Arc::new(field.build(DefId::new(module, token), id))
            })
            .collect();

        let mut properties = Vec::with_capacity(self.properties.len());
        for property in self.properties {
            let accessor = |name: &Option<String>| match name {
                None => Ok(None),
                Some(name) => methods
                    .iter()
                    .find(|m: &&Arc<Method>| &m.name == name)
                    .cloned()
                    .map(Some)
                    .ok_or_else(|| {
                        malformed_error!(
                            "property {}.{}::{} names undeclared accessor {}",
                            self.namespace,
                            self.name,
                            property.name,
                            name
                        )
                    }),
            };
            let getter = accessor(&property.getter)?;
            let setter = accessor(&property.setter)?;

            let token = RowCounters::next(&mut rows.properties, Token::TABLE_PROPERTY);
            properties.push(Arc::new(Property {
                id: DefId::new(module, token),
                declaring_type: id,
                name: property.name,
                property_type: property.property_type,
                getter,
                setter,
                custom_attributes: list_from(property.attributes),
            }));
        }

        Ok(CilType {
            id,
            assembly: assembly.to_string(),
            namespace: self.namespace,
            name: self.name,
            flags: self.flags,
            base: self.base,
            interfaces: self.interfaces,
            generic_params: self.generic_params,
            methods,
            fields,
            properties,
            custom_attributes: list_from(self.attributes),
        })
    }
}

/// Describes one method definition
pub struct MethodBuilder {
    name: String,
    access: MethodAccessFlags,
    modifiers: MethodModifiers,
    signature: MethodSig,
    generic_params: Vec<String>,
    has_body: bool,
    instructions: Vec<Instruction>,
    next_offset: u32,
    overrides: Vec<MemberReference>,
    kickoff: Option<MemberReference>,
    attributes: Vec<CustomAttribute>,
}

impl MethodBuilder {
    /// A public instance method returning `void` without parameters
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            access: MethodAccessFlags::PUBLIC,
            modifiers: MethodModifiers::HIDE_BY_SIG,
            signature: MethodSig::instance(TypeSig::Void, Vec::new()),
            generic_params: Vec::new(),
            has_body: true,
            instructions: Vec::new(),
            next_offset: 0,
            overrides: Vec::new(),
            kickoff: None,
            attributes: Vec::new(),
        }
    }

    /// Replaces the signature
    #[must_use]
    pub fn signature(mut self, signature: MethodSig) -> Self {
        self.signature = signature;
        self
    }

    /// Sets the return type
    #[must_use]
    pub fn returns(mut self, return_type: TypeSig) -> Self {
        self.signature.return_type = return_type;
        self
    }

    /// Appends a parameter type
    #[must_use]
    pub fn param(mut self, param: TypeSig) -> Self {
        self.signature.params.push(param);
        self
    }

    /// Adds a generic method parameter
    #[must_use]
    pub fn generic_param(mut self, name: &str) -> Self {
        self.generic_params.push(name.to_string());
        self.signature.generic_arity += 1;
        self
    }

    /// Sets the member access
    #[must_use]
    pub fn access(mut self, access: MethodAccessFlags) -> Self {
        self.access = access;
        self
    }

    /// Makes the method static
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::STATIC;
        self.signature.has_this = false;
        self
    }

    /// Makes the method virtual, claiming a new slot
    #[must_use]
    pub fn virtual_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL | MethodModifiers::NEW_SLOT;
        self
    }

    /// Makes the method an override of an inherited virtual slot
    #[must_use]
    pub fn override_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL;
        self
    }

    /// Makes the method abstract (and virtual) without a body
    #[must_use]
    pub fn abstract_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::VIRTUAL | MethodModifiers::ABSTRACT;
        self.modifiers |= MethodModifiers::NEW_SLOT;
        self.has_body = false;
        self
    }

    /// Marks the method as implemented outside of IL, e.g. P/Invoke
    #[must_use]
    pub fn extern_method(mut self) -> Self {
        self.modifiers |= MethodModifiers::PINVOKE_IMPL;
        self.has_body = false;
        self
    }

    /// Marks the method as having a special name, e.g. property accessors
    #[must_use]
    pub fn special_name(mut self) -> Self {
        self.modifiers |= MethodModifiers::SPECIAL_NAME;
        self
    }

    /// Appends an instruction at the next offset
    #[must_use]
    pub fn instruction(mut self, opcode: OpCode, operand: Operand) -> Self {
        let size = match operand {
            Operand::None => 1,
            Operand::Member(_) | Operand::Type(_) | Operand::String(_) | Operand::Target(_) => 5,
            Operand::Immediate(_) => 9,
        };
        self.instructions
            .push(Instruction::new(self.next_offset, opcode, operand));
        self.next_offset += size;
        self
    }

    /// Appends a call-like instruction to `target`
    #[must_use]
    pub fn call(self, opcode: OpCode, target: MemberReference) -> Self {
        self.instruction(opcode, Operand::Member(Arc::new(target)))
    }

    /// Appends a `ret`
    #[must_use]
    pub fn ret(self) -> Self {
        self.instruction(OpCode::Ret, Operand::None)
    }

    /// Adds an explicit override entry
    #[must_use]
    pub fn overrides(mut self, declaration: MemberReference) -> Self {
        self.overrides.push(declaration);
        self
    }

    /// Marks the method as the state machine body generated for `kickoff`
    #[must_use]
    pub fn state_machine_of(mut self, kickoff: MemberReference) -> Self {
        self.kickoff = Some(kickoff);
        self
    }

    /// Applies a custom attribute to the method
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, id: DefId, declaring_type: DefId) -> Method {
        let body = if self.has_body {
            Some(MethodBody::new(self.instructions))
        } else {
            None
        };

        Method {
            id,
            declaring_type,
            name: self.name,
            flags_access: self.access,
            flags_modifiers: self.modifiers,
            signature: self.signature,
            generic_params: self.generic_params,
            body,
            overrides: self.overrides,
            state_machine_kickoff: self.kickoff,
            custom_attributes: list_from(self.attributes),
        }
    }
}

/// Describes one field definition
pub struct FieldBuilder {
    name: String,
    field_type: TypeSig,
    is_static: bool,
    is_assembly_bound: bool,
    attributes: Vec<CustomAttribute>,
}

impl FieldBuilder {
    /// A public instance field
    #[must_use]
    pub fn new(name: &str, field_type: TypeSig) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            is_static: false,
            is_assembly_bound: false,
            attributes: Vec::new(),
        }
    }

    /// Makes the field static
    #[must_use]
    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Makes the field private or internal
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.is_assembly_bound = true;
        self
    }

    /// Applies a custom attribute to the field
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    fn build(self, id: DefId, declaring_type: DefId) -> Field {
        Field {
            id,
            declaring_type,
            name: self.name,
            field_type: self.field_type,
            is_static: self.is_static,
            is_assembly_bound: self.is_assembly_bound,
            custom_attributes: list_from(self.attributes),
        }
    }
}

/// Describes one property definition; accessors are linked by method name
pub struct PropertyBuilder {
    name: String,
    property_type: TypeSig,
    getter: Option<String>,
    setter: Option<String>,
    attributes: Vec<CustomAttribute>,
}

impl PropertyBuilder {
    /// A property without accessors
    #[must_use]
    pub fn new(name: &str, property_type: TypeSig) -> Self {
        Self {
            name: name.to_string(),
            property_type,
            getter: None,
            setter: None,
            attributes: Vec::new(),
        }
    }

    /// Names the `get` accessor
    #[must_use]
    pub fn getter(mut self, method: &str) -> Self {
        self.getter = Some(method.to_string());
        self
    }

    /// Names the `set` accessor
    #[must_use]
    pub fn setter(mut self, method: &str) -> Self {
        self.setter = Some(method.to_string());
        self
    }

    /// Applies a custom attribute to the property
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}
