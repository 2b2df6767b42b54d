//! Two operations sharing a name would be ambiguous to address by name at
//! the transport layer.

use std::collections::HashMap;

use crate::ast::Operation;
use crate::span::{SourcePosition, Spanning};
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct UniqueOperationNames<'a> {
    names: HashMap<&'a str, SourcePosition>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(UniqueOperationNames::default())
}

impl<'a> Visitor<'a> for UniqueOperationNames<'a> {
    fn enter_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) -> Action {
        if let Some(ref name) = op.item.name {
            if let Some(first) = self.names.insert(name.item, name.start().clone()) {
                ctx.report_error(format!(r#"There can only be one operation named "{}"."#, name.item), &[first, name.start().clone()]);
            }
        }
        Action::Continue
    }
}
