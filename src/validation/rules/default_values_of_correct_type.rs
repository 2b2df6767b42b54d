//! A variable's default value must be valid for its declared type, and a
//! non-null-typed variable must not declare one (it could never be used).

use crate::ast::VariableDefinition;
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;
use crate::validation::literal::is_valid_literal_value;

#[derive(Default)]
pub struct DefaultValuesOfCorrectType;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(DefaultValuesOfCorrectType)
}

impl<'a> Visitor<'a> for DefaultValuesOfCorrectType {
    fn enter_variable_definition(&mut self, ctx: &mut ValidationContext<'a>, def: &'a (Spanning<&'a str>, VariableDefinition<'a>)) -> Action {
        let Some(default_value) = def.1.default_value.as_ref() else { return Action::Continue };

        let var_type = &def.1.var_type.item;
        if var_type.is_non_null() {
            ctx.report_error(
                format!(
                    r#"Variable "${}" of type "{}" is required and will not use the default value. Perhaps you meant to use type "{}"."#,
                    def.0.item,
                    var_type,
                    var_type.innermost_name(),
                ),
                &[default_value.start().clone()],
            );
            return Action::Continue;
        }

        if let Some(resolved) = ctx.schema.make_type(var_type) {
            let messages = is_valid_literal_value(ctx.schema, &resolved, Some(&default_value.item));
            if !messages.is_empty() {
                let mut message = format!(r#"Variable "${}" has invalid default value: {}."#, def.0.item, default_value.item);
                for m in &messages {
                    message.push_str("\n  ");
                    message.push_str(m);
                }
                ctx.report_error(message, &[default_value.start().clone()]);
            }
        }

        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{InputValue, OperationType, Type};
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field, operation, var_def};

    use super::DefaultValuesOfCorrectType;

    #[test]
    fn valid_default_value_passes() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("x", var_def(Type::Named("Int"), Some(InputValue::Int(3))))],
            vec![field("dog", vec![])],
        )]);
        expect_passes_rule(&document, &schema, DefaultValuesOfCorrectType::default);
    }

    #[test]
    fn non_null_type_with_default_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("x", var_def(Type::NonNullNamed("Int"), Some(InputValue::Int(3))))],
            vec![field("dog", vec![])],
        )]);
        expect_fails_rule(
            &document,
            &schema,
            DefaultValuesOfCorrectType::default,
            &[r#"Variable "$x" of type "Int!" is required and will not use the default value. Perhaps you meant to use type "Int"."#],
        );
    }

    #[test]
    fn invalid_default_value_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("x", var_def(Type::Named("Int"), Some(InputValue::String("nope".into()))))],
            vec![field("dog", vec![])],
        )]);
        let errors = crate::test_support::run_rule(&document, &schema, DefaultValuesOfCorrectType::default);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().starts_with(r#"Variable "$x" has invalid default value: "nope"."#));
    }
}
