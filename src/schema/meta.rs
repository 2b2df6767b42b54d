//! Metadata describing a schema's named types, fields, and arguments.
//!
//! This module is a read-only description of a type system; building one
//! from live Rust types (the executor's registry/derive machinery) is out
//! of scope here; schemas arrive fully resolved.

use std::fmt;

use crate::ast::{InputValue, Type};

/// A parse-literal predicate for a leaf type: does this AST literal denote
/// a valid value of the type? Full coercion to a runtime value is an
/// executor concern; the validator only needs pass/fail.
pub type ParseLiteralFn = Box<dyn Fn(&InputValue) -> bool + Send + Sync>;

#[doc(hidden)]
pub struct ScalarMeta {
    pub name: String,
    pub description: Option<String>,
    pub parse_literal: ParseLiteralFn,
}

#[doc(hidden)]
pub struct ObjectMeta {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
    pub interface_names: Vec<String>,
}

#[doc(hidden)]
pub struct EnumMeta {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValue>,
}

#[doc(hidden)]
pub struct InterfaceMeta {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

#[doc(hidden)]
pub struct UnionMeta {
    pub name: String,
    pub description: Option<String>,
    pub of_type_names: Vec<String>,
}

#[doc(hidden)]
pub struct InputObjectMeta {
    pub name: String,
    pub description: Option<String>,
    pub input_fields: Vec<Argument>,
}

/// A named type in the schema's type system.
pub enum MetaType {
    Scalar(ScalarMeta),
    Object(ObjectMeta),
    Enum(EnumMeta),
    Interface(InterfaceMeta),
    Union(UnionMeta),
    InputObject(InputObjectMeta),
}

/// Metadata for a field on an object or interface type.
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<Argument>,
    pub field_type: Type<'static>,
    pub deprecation_reason: Option<String>,
}

/// Metadata for an argument on a field or directive, or an input field.
#[derive(Clone)]
pub struct Argument {
    pub name: String,
    pub description: Option<String>,
    pub arg_type: Type<'static>,
    pub default_value: Option<InputValue<'static>>,
}

/// A single value of an enum type.
#[derive(Clone)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub deprecation_reason: Option<String>,
}

impl MetaType {
    pub fn name(&self) -> &str {
        match *self {
            MetaType::Scalar(ScalarMeta { ref name, .. })
            | MetaType::Object(ObjectMeta { ref name, .. })
            | MetaType::Enum(EnumMeta { ref name, .. })
            | MetaType::Interface(InterfaceMeta { ref name, .. })
            | MetaType::Union(UnionMeta { ref name, .. })
            | MetaType::InputObject(InputObjectMeta { ref name, .. }) => name,
        }
    }

    /// Looks up a field by name. Only objects and interfaces have fields.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        match *self {
            MetaType::Object(ObjectMeta { ref fields, .. })
            | MetaType::Interface(InterfaceMeta { ref fields, .. }) => {
                fields.iter().find(|f| f.name == name)
            }
            _ => None,
        }
    }

    /// Looks up an input field by name. Only input objects have input fields.
    pub fn input_field_by_name(&self, name: &str) -> Option<&Argument> {
        match *self {
            MetaType::InputObject(InputObjectMeta { ref input_fields, .. }) => {
                input_fields.iter().find(|f| f.name == name)
            }
            _ => None,
        }
    }

    pub fn parse_literal(&self, value: &InputValue) -> Option<bool> {
        match *self {
            MetaType::Scalar(ScalarMeta { ref parse_literal, .. }) => Some(parse_literal(value)),
            _ => None,
        }
    }

    /// Object, Interface, or Union.
    pub fn is_composite(&self) -> bool {
        matches!(*self, MetaType::Object(_) | MetaType::Interface(_) | MetaType::Union(_))
    }

    /// Scalar or Enum.
    pub fn is_leaf(&self) -> bool {
        matches!(*self, MetaType::Scalar(_) | MetaType::Enum(_))
    }

    /// Interface or Union.
    pub fn is_abstract(&self) -> bool {
        matches!(*self, MetaType::Interface(_) | MetaType::Union(_))
    }

    /// Scalar, Enum, or InputObject.
    pub fn is_input(&self) -> bool {
        matches!(*self, MetaType::Scalar(_) | MetaType::Enum(_) | MetaType::InputObject(_))
    }
}

impl ScalarMeta {
    pub fn new(name: &str, parse_literal: ParseLiteralFn) -> ScalarMeta {
        ScalarMeta { name: name.to_owned(), description: None, parse_literal }
    }

    pub fn description(mut self, description: &str) -> ScalarMeta {
        self.description = Some(description.to_owned());
        self
    }

    pub fn into_meta(self) -> MetaType {
        MetaType::Scalar(self)
    }
}

impl ObjectMeta {
    pub fn new(name: &str, fields: &[Field]) -> ObjectMeta {
        ObjectMeta { name: name.to_owned(), description: None, fields: fields.to_vec(), interface_names: vec![] }
    }

    pub fn description(mut self, description: &str) -> ObjectMeta {
        self.description = Some(description.to_owned());
        self
    }

    pub fn interfaces(mut self, interfaces: &[&str]) -> ObjectMeta {
        self.interface_names = interfaces.iter().map(|s| (*s).to_owned()).collect();
        self
    }

    pub fn into_meta(self) -> MetaType {
        MetaType::Object(self)
    }
}

impl EnumMeta {
    pub fn new(name: &str, values: &[EnumValue]) -> EnumMeta {
        EnumMeta { name: name.to_owned(), description: None, values: values.to_vec() }
    }

    pub fn description(mut self, description: &str) -> EnumMeta {
        self.description = Some(description.to_owned());
        self
    }

    pub fn into_meta(self) -> MetaType {
        MetaType::Enum(self)
    }
}

impl InterfaceMeta {
    pub fn new(name: &str, fields: &[Field]) -> InterfaceMeta {
        InterfaceMeta { name: name.to_owned(), description: None, fields: fields.to_vec() }
    }

    pub fn description(mut self, description: &str) -> InterfaceMeta {
        self.description = Some(description.to_owned());
        self
    }

    pub fn into_meta(self) -> MetaType {
        MetaType::Interface(self)
    }
}

impl UnionMeta {
    pub fn new(name: &str, of_types: &[&str]) -> UnionMeta {
        UnionMeta { name: name.to_owned(), description: None, of_type_names: of_types.iter().map(|s| (*s).to_owned()).collect() }
    }

    pub fn description(mut self, description: &str) -> UnionMeta {
        self.description = Some(description.to_owned());
        self
    }

    pub fn into_meta(self) -> MetaType {
        MetaType::Union(self)
    }
}

impl InputObjectMeta {
    pub fn new(name: &str, input_fields: &[Argument]) -> InputObjectMeta {
        InputObjectMeta { name: name.to_owned(), description: None, input_fields: input_fields.to_vec() }
    }

    pub fn description(mut self, description: &str) -> InputObjectMeta {
        self.description = Some(description.to_owned());
        self
    }

    pub fn into_meta(self) -> MetaType {
        MetaType::InputObject(self)
    }
}

impl Field {
    pub fn new(name: &str, field_type: Type<'static>) -> Field {
        Field { name: name.to_owned(), description: None, arguments: vec![], field_type, deprecation_reason: None }
    }

    pub fn description(mut self, description: &str) -> Field {
        self.description = Some(description.to_owned());
        self
    }

    pub fn argument(mut self, argument: Argument) -> Field {
        self.arguments.push(argument);
        self
    }

    pub fn deprecated(mut self, reason: &str) -> Field {
        self.deprecation_reason = Some(reason.to_owned());
        self
    }
}

impl Argument {
    pub fn new(name: &str, arg_type: Type<'static>) -> Argument {
        Argument { name: name.to_owned(), description: None, arg_type, default_value: None }
    }

    pub fn description(mut self, description: &str) -> Argument {
        self.description = Some(description.to_owned());
        self
    }

    pub fn default_value(mut self, default_value: InputValue<'static>) -> Argument {
        self.default_value = Some(default_value);
        self
    }
}

impl EnumValue {
    pub fn new(name: &str) -> EnumValue {
        EnumValue { name: name.to_owned(), description: None, deprecation_reason: None }
    }

    pub fn description(mut self, description: &str) -> EnumValue {
        self.description = Some(description.to_owned());
        self
    }

    pub fn deprecated(mut self, reason: &str) -> EnumValue {
        self.deprecation_reason = Some(reason.to_owned());
        self
    }
}

impl fmt::Debug for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MetaType({})", self.name())
    }
}
