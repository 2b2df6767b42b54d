//! A type name referenced anywhere in a document — a variable's declared
//! type, a fragment's type condition — must be a type the schema defines.

use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct KnownTypeNames;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(KnownTypeNames)
}

impl<'a> Visitor<'a> for KnownTypeNames {
    fn enter_named_type(&mut self, ctx: &mut ValidationContext<'a>, name: Spanning<&'a str>) -> Action {
        if ctx.schema.concrete_type_by_name(name.item).is_none() {
            ctx.report_error(format!(r#"Unknown type "{}"."#, name.item), &[name.start().clone()]);
        }
        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Type;
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field, fragment, query, spread, var_def};

    use super::KnownTypeNames;

    #[test]
    fn known_type_in_fragment_condition_passes() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![spread("A")]), fragment("A", "Dog", vec![field("name", vec![])])]);
        expect_passes_rule(&document, &schema, KnownTypeNames::default);
    }

    #[test]
    fn unknown_fragment_condition_type_fails() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![spread("A")]), fragment("A", "Doge", vec![field("name", vec![])])]);
        expect_fails_rule(&document, &schema, KnownTypeNames::default, &[r#"Unknown type "Doge"."#]);
    }

    #[test]
    fn unknown_variable_type_fails() {
        use crate::ast::OperationType;

        let schema = build_schema();
        let document = doc(vec![crate::test_support::operation(
            OperationType::Query,
            Some("Q"),
            vec![("x", var_def(Type::Named("NotARealType"), None))],
            vec![field("dog", vec![])],
        )]);
        expect_fails_rule(&document, &schema, KnownTypeNames::default, &[r#"Unknown type "NotARealType"."#]);
    }
}
