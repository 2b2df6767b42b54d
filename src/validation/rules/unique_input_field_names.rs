//! Two fields of the same name inside one input object literal would be
//! ambiguous to resolve, the same way duplicate arguments would be.

use std::collections::HashMap;

use crate::ast::InputValue;
use crate::span::{SourcePosition, Spanning};
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct UniqueInputFieldNames<'a> {
    stack: Vec<HashMap<&'a str, SourcePosition>>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(UniqueInputFieldNames::default())
}

impl<'a> Visitor<'a> for UniqueInputFieldNames<'a> {
    fn enter_object_value(&mut self, _ctx: &mut ValidationContext<'a>, _object: Spanning<&'a [(Spanning<&'a str>, Spanning<InputValue<'a>>)]>) -> Action {
        self.stack.push(HashMap::new());
        Action::Continue
    }

    fn leave_object_value(&mut self, _ctx: &mut ValidationContext<'a>, _object: Spanning<&'a [(Spanning<&'a str>, Spanning<InputValue<'a>>)]>) {
        self.stack.pop();
    }

    fn enter_object_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a (Spanning<&'a str>, Spanning<InputValue<'a>>)) -> Action {
        let name = &field.0;
        if let Some(names) = self.stack.last_mut() {
            if let Some(first) = names.insert(name.item, name.start().clone()) {
                ctx.report_error(format!(r#"There can be only one input field named "{}"."#, name.item), &[first, name.start().clone()]);
            }
        }
        Action::Continue
    }
}
