//! An argument's literal value must be valid for the declared type of the
//! argument it fills.

use crate::ast::InputValue;
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;
use crate::validation::literal::is_valid_literal_value;

#[derive(Default)]
pub struct ArgumentsOfCorrectType;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(ArgumentsOfCorrectType)
}

impl<'a> Visitor<'a> for ArgumentsOfCorrectType {
    fn enter_argument(&mut self, ctx: &mut ValidationContext<'a>, arg: &'a (Spanning<&'a str>, Spanning<InputValue<'a>>)) -> Action {
        let Some(input_type) = ctx.input_type().cloned() else { return Action::Continue };
        if ctx.argument_def().is_none() {
            return Action::Continue;
        }

        let messages = is_valid_literal_value(ctx.schema, &input_type, Some(&arg.1.item));
        if !messages.is_empty() {
            let mut message = format!(r#"Argument "{}" has invalid value {}."#, arg.0.item, arg.1.item);
            for m in &messages {
                message.push_str("\n  ");
                message.push_str(m);
            }
            ctx.report_error(message, &[arg.1.start().clone()]);
        }

        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::InputValue;
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field_with_args, query};

    use super::ArgumentsOfCorrectType;

    #[test]
    fn valid_argument_value_passes() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![field_with_args("dog", vec![("age", InputValue::Int(3))], vec![])])]);
        expect_passes_rule(&document, &schema, ArgumentsOfCorrectType::default);
    }

    #[test]
    fn invalid_argument_value_fails() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![field_with_args("dog", vec![("age", InputValue::String("old".into()))], vec![])])]);
        let schema_ref = &schema;
        let errors = crate::test_support::run_rule(&document, schema_ref, ArgumentsOfCorrectType::default);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().starts_with(r#"Argument "age" has invalid value "old"."#));
    }
}
