//! TypeDescriptor - the conversion target model.
//!
//! A descriptor is an immutable tree describing "what type the output should
//! be". It is built explicitly by callers who know the shape they want; there
//! is no parsing from strings and no runtime reflection.
//!
//! # Example
//!
//! ```
//! use typeconv_core::{PrimitiveKind, TypeDescriptor, TypeName};
//!
//! // List<Int32>
//! let list = TypeDescriptor::list_of(TypeName::Boxed(PrimitiveKind::Int32));
//! assert_eq!(list.type_name(), "List<Int32>");
//! assert_eq!(list.erasure(), TypeName::List);
//!
//! // Int32[]
//! let array = TypeDescriptor::array_of(TypeName::Boxed(PrimitiveKind::Int32));
//! assert_eq!(array.type_name(), "Int32[]");
//!
//! // Independently built descriptors compare structurally.
//! assert_eq!(list, TypeDescriptor::list_of(TypeName::Boxed(PrimitiveKind::Int32)));
//! ```

use std::fmt::{self, Display, Formatter};

use crate::error::DescriptorError;
use crate::{PrimitiveKind, TypeName};

/// A conversion target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A plain nominal type.
    Simple(TypeName),
    /// A nominal type applied to type arguments, e.g. `List<Int32>`.
    Parameterized(ParameterizedType),
    /// An array with the given component type.
    Array(Box<TypeDescriptor>),
}

/// The parameterized form of a descriptor.
///
/// Fields are private so a constructed descriptor cannot change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterizedType {
    raw: TypeName,
    owner: Option<Box<TypeDescriptor>>,
    arguments: Vec<TypeDescriptor>,
}

impl ParameterizedType {
    /// The raw (erased) nominal type.
    pub fn raw(&self) -> &TypeName {
        &self.raw
    }

    /// The enclosing type, for nested types.
    pub fn owner(&self) -> Option<&TypeDescriptor> {
        self.owner.as_deref()
    }

    /// The ordered type arguments.
    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        &self.arguments
    }

    /// An owned copy of the type arguments.
    pub fn to_type_arguments(&self) -> Vec<TypeDescriptor> {
        self.arguments.clone()
    }
}

impl TypeDescriptor {
    /// A plain nominal type.
    pub fn simple(name: impl Into<TypeName>) -> Self {
        TypeDescriptor::Simple(name.into())
    }

    /// A parameterized type.
    ///
    /// `raw` must be a concrete nominal type; array classes are rejected since
    /// arrays are modelled by [`TypeDescriptor::Array`].
    pub fn parameterized(
        raw: TypeName,
        owner: Option<TypeDescriptor>,
        arguments: impl IntoIterator<Item = TypeDescriptor>,
    ) -> Result<Self, DescriptorError> {
        if let TypeName::Array(_) = raw {
            return Err(DescriptorError::ArrayRawType(raw));
        }
        Ok(Self::parameterized_unchecked(
            raw,
            owner,
            arguments.into_iter().collect(),
        ))
    }

    fn parameterized_unchecked(
        raw: TypeName,
        owner: Option<TypeDescriptor>,
        arguments: Vec<TypeDescriptor>,
    ) -> Self {
        TypeDescriptor::Parameterized(ParameterizedType {
            raw,
            owner: owner.map(Box::new),
            arguments,
        })
    }

    /// An array of `component`.
    pub fn array(component: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(component))
    }

    /// `Collection<element>`.
    pub fn collection_of(element: impl Into<TypeDescriptor>) -> Self {
        Self::collection_with(TypeName::Collection, element)
    }

    /// `List<element>`.
    pub fn list_of(element: impl Into<TypeDescriptor>) -> Self {
        Self::collection_with(TypeName::List, element)
    }

    /// `Set<element>`.
    pub fn set_of(element: impl Into<TypeDescriptor>) -> Self {
        Self::collection_with(TypeName::Set, element)
    }

    /// A concrete container type applied to one element type, e.g.
    /// `LinkedList<String>`.
    ///
    /// An array class passed as `container` is treated as the array's
    /// component and yields an array descriptor of arrays.
    pub fn collection_with(container: TypeName, element: impl Into<TypeDescriptor>) -> Self {
        match container {
            TypeName::Array(component) => {
                Self::array(Self::collection_with(*component, element))
            }
            container => Self::parameterized_unchecked(container, None, vec![element.into()]),
        }
    }

    /// `Map<key, value>`.
    pub fn map_of(key: impl Into<TypeDescriptor>, value: impl Into<TypeDescriptor>) -> Self {
        Self::parameterized_unchecked(TypeName::Map, None, vec![key.into(), value.into()])
    }

    /// `component[]`.
    pub fn array_of(component: impl Into<TypeDescriptor>) -> Self {
        Self::array(component.into())
    }

    /// The nominal type with every type argument removed, e.g. `List` for
    /// `List<Int32>`.
    pub fn erasure(&self) -> TypeName {
        match self {
            TypeDescriptor::Simple(name) => name.clone(),
            TypeDescriptor::Parameterized(p) => p.raw.clone(),
            TypeDescriptor::Array(component) => TypeName::array_of(component.erasure()),
        }
    }

    /// Full rendered name, including type arguments.
    pub fn type_name(&self) -> String {
        self.to_string()
    }

    /// The nominal type if this is a simple descriptor.
    pub fn as_simple(&self) -> Option<&TypeName> {
        match self {
            TypeDescriptor::Simple(name) => Some(name),
            _ => None,
        }
    }

    /// The parameterized form, if any.
    pub fn as_parameterized(&self) -> Option<&ParameterizedType> {
        match self {
            TypeDescriptor::Parameterized(p) => Some(p),
            _ => None,
        }
    }

    /// The array component, if this is an array descriptor.
    pub fn array_component(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Type arguments; empty for simple and array descriptors.
    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        match self {
            TypeDescriptor::Parameterized(p) => &p.arguments,
            _ => &[],
        }
    }

    /// Short name of the descriptor shape, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            TypeDescriptor::Simple(_) => "simple type",
            TypeDescriptor::Parameterized(_) => "parameterized type",
            TypeDescriptor::Array(_) => "array type",
        }
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Simple(name) => write!(f, "{name}"),
            TypeDescriptor::Parameterized(p) => {
                if let Some(owner) = &p.owner {
                    write!(f, "{owner}.")?;
                }
                write!(f, "{}", p.raw)?;
                if !p.arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in p.arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeDescriptor::Array(component) => write!(f, "{component}[]"),
        }
    }
}

impl From<TypeName> for TypeDescriptor {
    fn from(name: TypeName) -> Self {
        TypeDescriptor::Simple(name)
    }
}

impl From<PrimitiveKind> for TypeDescriptor {
    fn from(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Simple(TypeName::Primitive(kind))
    }
}
