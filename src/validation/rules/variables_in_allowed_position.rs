//! A variable used at a position expecting type `U` must have a declared
//! type that is a sub-type of `U`, accounting for a default value making an
//! otherwise-nullable declaration effectively non-null.

use crate::ast::Operation;
use crate::span::Spanning;
use crate::traversal::Visitor;
use crate::type_utils::effective_type;
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct VariablesInAllowedPosition;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(VariablesInAllowedPosition)
}

impl<'a> Visitor<'a> for VariablesInAllowedPosition {
    fn leave_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) {
        let Some(ref defs) = op.item.variable_definitions else { return };

        for usage in ctx.recursive_variable_usages(&op.item).iter() {
            let Some(expected) = usage.expected_type.as_ref() else { continue };
            let Some((_, var_def)) = defs.item.iter().find(|(name, _)| name.item == usage.name) else { continue };

            let effective = effective_type(&var_def.var_type.item, var_def);
            if !ctx.schema.is_subtype(&effective, &expected.to_ast()) {
                ctx.report_error(
                    format!(r#"Variable "${}" of type "{}" used in position expecting type "{}"."#, usage.name, var_def.var_type.item, expected),
                    &[usage.location.clone()],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{OperationType, Type};
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field_with_args, operation, var_def};

    use super::VariablesInAllowedPosition;

    #[test]
    fn matching_variable_type_passes() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("age", var_def(Type::Named("Int"), None))],
            vec![field_with_args("dog", vec![("age", crate::ast::InputValue::Variable("age"))], vec![])],
        )]);
        expect_passes_rule(&document, &schema, VariablesInAllowedPosition::default);
    }

    #[test]
    fn mismatched_variable_type_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("age", var_def(Type::Named("String"), None))],
            vec![field_with_args("dog", vec![("age", crate::ast::InputValue::Variable("age"))], vec![])],
        )]);
        expect_fails_rule(&document, &schema, VariablesInAllowedPosition::default, &[r#"Variable "$age" of type "String" used in position expecting type "Int"."#]);
    }
}
