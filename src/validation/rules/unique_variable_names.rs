//! Two variables of the same name within one operation would be
//! unaddressable at use sites.

use std::collections::HashMap;

use crate::ast::{Operation, VariableDefinition};
use crate::span::{SourcePosition, Spanning};
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct UniqueVariableNames<'a> {
    names: HashMap<&'a str, SourcePosition>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(UniqueVariableNames::default())
}

impl<'a> Visitor<'a> for UniqueVariableNames<'a> {
    fn enter_operation_definition(&mut self, _ctx: &mut ValidationContext<'a>, _op: &'a Spanning<Operation<'a>>) -> Action {
        self.names.clear();
        Action::Continue
    }

    fn enter_variable_definition(&mut self, ctx: &mut ValidationContext<'a>, def: &'a (Spanning<&'a str>, VariableDefinition<'a>)) -> Action {
        let name = &def.0;
        if let Some(first) = self.names.insert(name.item, name.start().clone()) {
            ctx.report_error(format!(r#"There can only be one variable named "{}"."#, name.item), &[first, name.start().clone()]);
        }
        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{OperationType, Type};
    use crate::test_support::{build_schema, doc, expect_fails_rule, field, operation, var_def};

    use super::UniqueVariableNames;

    #[test]
    fn duplicate_variable_name_fails() {
        let schema = build_schema();
        let document = doc(vec![operation(
            OperationType::Query,
            Some("Q"),
            vec![("x", var_def(Type::Named("Int"), None)), ("x", var_def(Type::Named("String"), None))],
            vec![field("dog", vec![])],
        )]);
        expect_fails_rule(&document, &schema, UniqueVariableNames::default, &[r#"There can only be one variable named "x"."#]);
    }
}
