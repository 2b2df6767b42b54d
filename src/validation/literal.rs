//! Pure literal-value-vs-type checking, independent of the traversal
//! engine: does an AST value literal denote a valid value of a given input
//! type? Used by `ArgumentsOfCorrectType` and `DefaultValuesOfCorrectType`,
//! which both already hold the relevant `Argument`/`VariableDefinition`
//! node and call straight into this rather than through a traversal hook.

use crate::ast::InputValue;
use crate::schema::meta::MetaType;
use crate::schema::model::{SchemaType, TypeType};

/// Checks whether `value` is a valid literal for `input_type`. `value` is
/// `None` when the position (an argument, an input object field) was not
/// supplied at all — distinct from an explicit `null` literal, though both
/// are rejected the same way against a non-null type.
///
/// Returns the empty list if valid, else one message per violation found,
/// in encounter order, each already prefixed with its path (`In element
/// #i: ` for list elements, `In field "F": ` for input object fields) when
/// nested more than one level deep.
pub fn is_valid_literal_value<'a>(
    schema: &'a SchemaType<'a>,
    input_type: &TypeType<'a>,
    value: Option<&InputValue<'a>>,
) -> Vec<String> {
    if let TypeType::NonNull(ref inner) = *input_type {
        return match value {
            None => vec![format!("Expected \"{}\", found null.", input_type)],
            Some(v) if v.is_null() => vec![format!("Expected \"{}\", found null.", input_type)],
            Some(v) => is_valid_literal_value(schema, inner, Some(v)),
        };
    }

    let value = match value {
        None => return vec![],
        Some(v) => v,
    };

    if value.is_variable() || value.is_null() {
        return vec![];
    }

    if let TypeType::List(ref elem_type) = *input_type {
        return match *value {
            InputValue::List(ref items) => items
                .iter()
                .enumerate()
                .flat_map(|(i, item)| {
                    is_valid_literal_value(schema, elem_type, Some(&item.item))
                        .into_iter()
                        .map(move |msg| format!("In element #{}: {}", i, msg))
                })
                .collect(),
            _ => is_valid_literal_value(schema, elem_type, Some(value)),
        };
    }

    let named = input_type.get_named();

    if let MetaType::InputObject(ref obj) = *named {
        let fields = match value.as_object() {
            Some(f) => f,
            None => return vec![format!("Expected \"{}\", found not an object.", named.name())],
        };

        let mut errors = Vec::new();

        for &(ref name, _) in fields {
            if obj.input_fields.iter().all(|f| f.name != name.item) {
                errors.push(format!("In field \"{}\": Unknown field.", name.item));
            }
        }

        for field in &obj.input_fields {
            let provided = fields.iter().find(|item| item.0.item == field.name).map(|item| &item.1.item);
            if let Some(field_type) = schema.make_type(&field.arg_type) {
                for msg in is_valid_literal_value(schema, &field_type, provided) {
                    errors.push(format!("In field \"{}\": {}", field.name, msg));
                }
            }
        }

        return errors;
    }

    if is_valid_leaf_literal(named, value) {
        vec![]
    } else {
        vec![format!("Expected type \"{}\", found {}.", named.name(), value)]
    }
}

fn is_valid_leaf_literal(named: &MetaType, value: &InputValue) -> bool {
    match *named {
        // A string literal can coerce into an enum at runtime, but is not
        // accepted as an enum *literal* in a query document.
        MetaType::Enum(ref e) => match *value {
            InputValue::Enum(ref name) => e.values.iter().any(|v| v.name == *name),
            _ => false,
        },
        _ => named.parse_literal(value).unwrap_or(false),
    }
}
