//! An anonymous operation is only legal when it is the document's sole
//! operation — otherwise there would be no way to address the others.

use crate::ast::{Definition, Document, Operation};
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct LoneAnonymousOperation {
    operation_count: usize,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(LoneAnonymousOperation::default())
}

impl<'a> Visitor<'a> for LoneAnonymousOperation {
    fn enter_document(&mut self, _ctx: &mut ValidationContext<'a>, doc: &'a Document<'a>) -> Action {
        self.operation_count = doc.iter().filter(|d| matches!(**d, Definition::Operation(_))).count();
        Action::Continue
    }

    fn enter_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) -> Action {
        if self.operation_count > 1 && op.item.name.is_none() {
            ctx.report_error("This anonymous operation must be the only defined operation.", &[op.start().clone()]);
        }
        Action::Continue
    }
}
