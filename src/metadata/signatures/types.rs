use std::fmt;

/// Name of a type as seen through a type reference: defining assembly, namespace and name.
///
/// Generic type definitions carry their arity in the name using the runtime convention
/// (e.g. ``IComparer`1``), so two names are scope-equal exactly when assembly, namespace and
/// name (including arity) match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    /// Simple name of the defining assembly
    pub assembly: String,
    /// Namespace, empty for the global namespace and nested types
    pub namespace: String,
    /// Type name, for nested types `Outer/Inner`
    pub name: String,
}

impl TypeName {
    /// Creates a new type name
    #[must_use]
    pub fn new(assembly: &str, namespace: &str, name: &str) -> Self {
        Self {
            assembly: assembly.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    /// Returns the full name (`Namespace.Name`, or just `Name` for the global namespace)
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Returns the generic arity encoded in the name's backtick suffix, or 0
    #[must_use]
    pub fn arity(&self) -> u32 {
        self.name
            .rsplit_once('`')
            .and_then(|(_, arity)| arity.parse().ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.assembly, self.full_name())
    }
}

/// Structural shape of a type as it appears in signatures and member references.
///
/// Generic parameters are positional: `GenericParamType(0)` is the first generic parameter of
/// the enclosing type, `GenericParamMethod(0)` the first generic parameter of the enclosing
/// method. Equality is structural, which is what interface implementation matching needs after
/// generic arguments were substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeSig {
    #[default]
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// signed integer, sized to executing platform
    I,
    /// unsigned integer, sized to executing platform
    U,
    /// System.String
    String,
    /// System.Object
    Object,
    /// CIL class
    Class(TypeName),
    /// CIL value-type
    ValueType(TypeName),
    /// Generic type and its arguments
    GenericInst(TypeName, Vec<TypeSig>),
    /// Generic type parameter, by position
    GenericParamType(u32),
    /// Generic method parameter, by position
    GenericParamMethod(u32),
    /// Single dimension array
    SzArray(Box<TypeSig>),
    /// Type by reference
    ByRef(Box<TypeSig>),
    /// A pointer to a type
    Ptr(Box<TypeSig>),
}

impl TypeSig {
    /// Shorthand for a class reference
    #[must_use]
    pub fn class(assembly: &str, namespace: &str, name: &str) -> Self {
        TypeSig::Class(TypeName::new(assembly, namespace, name))
    }

    /// Shorthand for a generic instantiation
    #[must_use]
    pub fn generic(assembly: &str, namespace: &str, name: &str, args: Vec<TypeSig>) -> Self {
        TypeSig::GenericInst(TypeName::new(assembly, namespace, name), args)
    }

    /// Returns the referenced type definition name, if this signature names one.
    ///
    /// Generic instantiations return the name of their generic type definition. Arrays,
    /// pointers, by-refs, primitives and generic parameters return `None`.
    #[must_use]
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            TypeSig::Class(name) | TypeSig::ValueType(name) | TypeSig::GenericInst(name, _) => {
                Some(name)
            }
            _ => None,
        }
    }

    /// Returns the generic arguments of an instantiation, or an empty slice
    #[must_use]
    pub fn generic_args(&self) -> &[TypeSig] {
        match self {
            TypeSig::GenericInst(_, args) => args,
            _ => &[],
        }
    }

    /// Returns `true` if the signature names the given type definition
    #[must_use]
    pub fn names(&self, other: &TypeName) -> bool {
        self.type_name().is_some_and(|name| name == other)
    }

    /// Returns a new signature with generic parameters replaced from `context`.
    ///
    /// Parameters without a binding in the context (an open context, or a malformed
    /// instantiation with too few arguments) are left untouched.
    #[must_use]
    pub fn substitute(&self, context: &GenericContext) -> TypeSig {
        match self {
            TypeSig::GenericParamType(index) => context
                .type_args
                .get(*index as usize)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeSig::GenericParamMethod(index) => context
                .method_args
                .get(*index as usize)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeSig::GenericInst(name, args) => TypeSig::GenericInst(
                name.clone(),
                args.iter().map(|arg| arg.substitute(context)).collect(),
            ),
            TypeSig::SzArray(inner) => TypeSig::SzArray(Box::new(inner.substitute(context))),
            TypeSig::ByRef(inner) => TypeSig::ByRef(Box::new(inner.substitute(context))),
            TypeSig::Ptr(inner) => TypeSig::Ptr(Box::new(inner.substitute(context))),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSig::Void => f.write_str("void"),
            TypeSig::Boolean => f.write_str("bool"),
            TypeSig::Char => f.write_str("char"),
            TypeSig::I1 => f.write_str("int8"),
            TypeSig::U1 => f.write_str("uint8"),
            TypeSig::I2 => f.write_str("int16"),
            TypeSig::U2 => f.write_str("uint16"),
            TypeSig::I4 => f.write_str("int32"),
            TypeSig::U4 => f.write_str("uint32"),
            TypeSig::I8 => f.write_str("int64"),
            TypeSig::U8 => f.write_str("uint64"),
            TypeSig::R4 => f.write_str("float32"),
            TypeSig::R8 => f.write_str("float64"),
            TypeSig::I => f.write_str("native int"),
            TypeSig::U => f.write_str("native uint"),
            TypeSig::String => f.write_str("string"),
            TypeSig::Object => f.write_str("object"),
            TypeSig::Class(name) | TypeSig::ValueType(name) => write!(f, "{name}"),
            TypeSig::GenericInst(name, args) => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeSig::GenericParamType(index) => write!(f, "!{index}"),
            TypeSig::GenericParamMethod(index) => write!(f, "!!{index}"),
            TypeSig::SzArray(inner) => write!(f, "{inner}[]"),
            TypeSig::ByRef(inner) => write!(f, "{inner}&"),
            TypeSig::Ptr(inner) => write!(f, "{inner}*"),
        }
    }
}

/// Explicit generic substitution map.
///
/// Threaded through base-type walks: every step derives a fresh context from the instantiated
/// base reference instead of mutating shared type objects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenericContext {
    /// Arguments bound to the enclosing type's generic parameters
    pub type_args: Vec<TypeSig>,
    /// Arguments bound to the enclosing method's generic parameters
    pub method_args: Vec<TypeSig>,
}

impl GenericContext {
    /// An open context that substitutes nothing
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A context binding the enclosing type's parameters
    #[must_use]
    pub fn for_type(type_args: Vec<TypeSig>) -> Self {
        Self {
            type_args,
            method_args: Vec::new(),
        }
    }

    /// A context derived from an instantiated reference, e.g. `Base<int>` binds `!0 = int`.
    ///
    /// The reference is first substituted through `self`, so that `Derived<T> : Base<T>`
    /// walked from `Derived<string>` yields `Base<string>`.
    #[must_use]
    pub fn derive(&self, reference: &TypeSig) -> Self {
        match reference.substitute(self) {
            TypeSig::GenericInst(_, args) => Self::for_type(args),
            _ => Self::empty(),
        }
    }

    /// Returns `true` if no parameter is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.type_args.is_empty() && self.method_args.is_empty()
    }
}

/// Method signature (II.23.2.1), reduced to the parts structural matching compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MethodSig {
    /// Instance method (`this` is passed)
    pub has_this: bool,
    /// Number of generic method parameters
    pub generic_arity: u32,
    /// The return type
    pub return_type: TypeSig,
    /// The parameter types
    pub params: Vec<TypeSig>,
}

impl MethodSig {
    /// Signature of an instance method
    #[must_use]
    pub fn instance(return_type: TypeSig, params: Vec<TypeSig>) -> Self {
        Self {
            has_this: true,
            generic_arity: 0,
            return_type,
            params,
        }
    }

    /// Signature of a static method
    #[must_use]
    pub fn static_method(return_type: TypeSig, params: Vec<TypeSig>) -> Self {
        Self {
            has_this: false,
            generic_arity: 0,
            return_type,
            params,
        }
    }

    /// Sets the number of generic method parameters
    #[must_use]
    pub fn with_generic_arity(mut self, arity: u32) -> Self {
        self.generic_arity = arity;
        self
    }

    /// Returns the signature with type-level generic parameters bound from `context`.
    ///
    /// Method-level parameters stay positional so that two generic methods with the same
    /// arity still compare equal after their declaring types were substituted.
    #[must_use]
    pub fn substitute(&self, context: &GenericContext) -> MethodSig {
        let context = GenericContext::for_type(context.type_args.clone());
        MethodSig {
            has_this: self.has_this,
            generic_arity: self.generic_arity,
            return_type: self.return_type.substitute(&context),
            params: self.params.iter().map(|p| p.substitute(&context)).collect(),
        }
    }

    /// Structural equality: calling convention, arity, return and parameter shapes
    #[must_use]
    pub fn matches(&self, other: &MethodSig) -> bool {
        self.has_this == other.has_this
            && self.generic_arity == other.generic_arity
            && self.params.len() == other.params.len()
            && self.return_type == other.return_type
            && self.params == other.params
    }
}

impl fmt::Display for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.return_type)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}
