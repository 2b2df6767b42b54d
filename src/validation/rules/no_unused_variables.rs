//! A variable an operation declares but never uses is dead weight the same
//! way an unused fragment is.

use crate::ast::Operation;
use crate::span::Spanning;
use crate::traversal::Visitor;
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct NoUnusedVariables;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(NoUnusedVariables)
}

impl<'a> Visitor<'a> for NoUnusedVariables {
    fn leave_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) {
        let Some(ref defs) = op.item.variable_definitions else { return };

        let used: std::collections::HashSet<&str> = ctx.recursive_variable_usages(&op.item).iter().map(|u| u.name).collect();

        for (name, _) in &defs.item {
            if !used.contains(name.item) {
                ctx.report_error(format!(r#"Variable "${}" is never used."#, name.item), &[name.start().clone()]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{OperationType, Type};
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field_with_args, operation, var_def};

    use super::NoUnusedVariables;

    #[test]
    fn used_variable_passes() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("age", var_def(Type::Named("Int"), None))],
            vec![field_with_args("dog", vec![("age", crate::ast::InputValue::Variable("age"))], vec![])],
        )]);
        expect_passes_rule(&document, &schema, NoUnusedVariables::default);
    }

    #[test]
    fn unused_variable_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(OperationType::Query, Some("Q"), vec![("age", var_def(Type::Named("Int"), None))], vec![field_with_args("dog", vec![], vec![])])]);
        expect_fails_rule(&document, &schema, NoUnusedVariables::default, &[r#"Variable "$age" is never used."#]);
    }
}
