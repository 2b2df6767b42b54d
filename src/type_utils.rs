//! Small pure-function type algorithms shared by several rules: resolving
//! an AST type literal against the schema, stripping wrappers, overlap and
//! sub-type checks, and a variable's effective type at its definition site.

use crate::ast::{Type, VariableDefinition};
use crate::schema::meta::MetaType;
use crate::schema::model::{SchemaType, TypeType};

/// Resolves an AST type literal into the schema's corresponding [`TypeType`].
/// `None` means the named type does not exist in the schema.
pub fn type_from_ast<'a>(schema: &'a SchemaType<'a>, t: &Type) -> Option<TypeType<'a>> {
    schema.make_type(t)
}

/// Strips `List`/`NonNull` wrappers to reach the underlying named type.
pub fn get_named<'a>(t: &TypeType<'a>) -> &'a MetaType {
    t.get_named()
}

pub fn do_types_overlap(schema: &SchemaType, a: &MetaType, b: &MetaType) -> bool {
    schema.type_overlap(a, b)
}

pub fn is_type_sub_type_of(schema: &SchemaType, sub_type: &Type, super_type: &Type) -> bool {
    schema.is_subtype(sub_type, super_type)
}

/// A variable's effective type at its definition site: its declared type,
/// wrapped in `NonNull` if a default value is supplied and the declared
/// type was nullable. `$v: Int = 1` behaves, at every use site, like `Int!`.
pub fn effective_type<'a>(var_type: &'a Type<'a>, var_def: &'a VariableDefinition<'a>) -> Type<'a> {
    if var_def.default_value.is_some() && !var_type.is_non_null() {
        match *var_type {
            Type::Named(n) => Type::NonNullNamed(n),
            Type::List(ref inner) => Type::NonNullList(inner.clone()),
            ref t => t.clone(),
        }
    } else {
        var_type.clone()
    }
}
