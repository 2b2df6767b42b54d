//! A variable's declared type must be an input type — a scalar, enum, or
//! input object — never an object, interface, or union.

use crate::ast::VariableDefinition;
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct VariablesAreInputTypes;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(VariablesAreInputTypes)
}

impl<'a> Visitor<'a> for VariablesAreInputTypes {
    fn enter_variable_definition(&mut self, ctx: &mut ValidationContext<'a>, def: &'a (Spanning<&'a str>, VariableDefinition<'a>)) -> Action {
        if let Some(ty) = ctx.schema.make_type(&def.1.var_type.item) {
            if !ty.get_named().is_input() {
                ctx.report_error(
                    format!(r#"Variable "${}" cannot be non-input type "{}"."#, def.0.item, def.1.var_type.item),
                    &[def.1.var_type.start().clone()],
                );
            }
        }
        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{OperationType, Type};
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field, operation, var_def};

    use super::VariablesAreInputTypes;

    #[test]
    fn scalar_variable_type_passes() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("x", var_def(Type::Named("Int"), None))],
            vec![field("dog", vec![])],
        )]);
        expect_passes_rule(&document, &schema, VariablesAreInputTypes::default);
    }

    #[test]
    fn object_variable_type_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("x", var_def(Type::Named("Dog"), None))],
            vec![field("dog", vec![])],
        )]);
        expect_fails_rule(&document, &schema, VariablesAreInputTypes::default, &[r#"Variable "$x" cannot be non-input type "Dog"."#]);
    }
}
