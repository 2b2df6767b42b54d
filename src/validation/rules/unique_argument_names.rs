//! Two arguments of the same name on one field or directive application
//! would be ambiguous to resolve.

use std::collections::HashMap;

use crate::ast::{Directive, Field, InputValue};
use crate::span::{SourcePosition, Spanning};
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct UniqueArgumentNames<'a> {
    names: HashMap<&'a str, SourcePosition>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(UniqueArgumentNames::default())
}

impl<'a> Visitor<'a> for UniqueArgumentNames<'a> {
    fn enter_field(&mut self, _ctx: &mut ValidationContext<'a>, _field: &'a Spanning<Field<'a>>) -> Action {
        self.names.clear();
        Action::Continue
    }

    fn enter_directive(&mut self, _ctx: &mut ValidationContext<'a>, _directive: &'a Spanning<Directive<'a>>) -> Action {
        self.names.clear();
        Action::Continue
    }

    fn enter_argument(&mut self, ctx: &mut ValidationContext<'a>, arg: &'a (Spanning<&'a str>, Spanning<InputValue<'a>>)) -> Action {
        let name = &arg.0;
        if let Some(first) = self.names.insert(name.item, name.start().clone()) {
            ctx.report_error(format!(r#"There can be only one argument named "{}"."#, name.item), &[first, name.start().clone()]);
        }
        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::InputValue;
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field_with_args, query};

    use super::UniqueArgumentNames;

    #[test]
    fn distinct_argument_names_pass() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![field_with_args("isAtLocation", vec![("x", InputValue::Int(0)), ("y", InputValue::Int(0))], vec![])])]);
        expect_passes_rule(&document, &schema, UniqueArgumentNames::default);
    }

    #[test]
    fn duplicate_argument_name_fails() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![field_with_args("isAtLocation", vec![("x", InputValue::Int(0)), ("x", InputValue::Int(1))], vec![])])]);
        expect_fails_rule(&document, &schema, UniqueArgumentNames::default, &[r#"There can be only one argument named "x"."#]);
    }
}
