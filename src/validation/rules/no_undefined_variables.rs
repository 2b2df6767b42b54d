//! Every variable used within an operation (or a fragment it transitively
//! spreads) must be declared by that operation.

use std::collections::HashSet;

use crate::ast::Operation;
use crate::span::Spanning;
use crate::traversal::Visitor;
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct NoUndefinedVariables;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(NoUndefinedVariables)
}

impl<'a> Visitor<'a> for NoUndefinedVariables {
    fn leave_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) {
        let defined: HashSet<&str> = op.item.variable_definitions.as_ref().map(|defs| defs.item.iter().map(|(n, _)| n.item).collect()).unwrap_or_default();

        for usage in ctx.recursive_variable_usages(&op.item).iter() {
            if defined.contains(usage.name) {
                continue;
            }

            let message = match op.item.name {
                Some(ref name) => format!(r#"Variable "${}" is not defined by operation "{}"."#, usage.name, name.item),
                None => format!(r#"Variable "${}" is not defined."#, usage.name),
            };
            ctx.report_error(message, &[usage.location.clone()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{OperationType, Type};
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field_with_args, operation, var_def};

    use super::NoUndefinedVariables;

    #[test]
    fn defined_variable_passes() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("age", var_def(Type::Named("Int"), None))],
            vec![field_with_args("dog", vec![("age", crate::ast::InputValue::Variable("age"))], vec![])],
        )]);
        expect_passes_rule(&document, &schema, NoUndefinedVariables::default);
    }

    #[test]
    fn undefined_variable_in_named_operation_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![],
            vec![field_with_args("dog", vec![("age", crate::ast::InputValue::Variable("age"))], vec![])],
        )]);
        expect_fails_rule(&document, &schema, NoUndefinedVariables::default, &[r#"Variable "$age" is not defined by operation "Q"."#]);
    }

    #[test]
    fn undefined_variable_in_anonymous_operation_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            None,
            vec![],
            vec![field_with_args("dog", vec![("age", crate::ast::InputValue::Variable("age"))], vec![])],
        )]);
        expect_fails_rule(&document, &schema, NoUndefinedVariables::default, &[r#"Variable "$age" is not defined."#]);
    }
}
