//! A field selected on a composite type must actually be declared by that
//! type (or, for interfaces and unions, be resolvable against it).

use crate::ast::Field;
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct FieldsOnCorrectType;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(FieldsOnCorrectType)
}

impl<'a> Visitor<'a> for FieldsOnCorrectType {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a Spanning<Field<'a>>) -> Action {
        // __typename is implicitly available on every composite type; this
        // schema facade doesn't model meta-fields, so it's special-cased here.
        if field.item.name.item == "__typename" {
            return Action::Continue;
        }

        if let Some(parent) = ctx.parent_type() {
            if ctx.field_def().is_none() {
                ctx.report_error(
                    format!(r#"Cannot query field "{}" on "{}"."#, field.item.name.item, parent.get_named().name()),
                    &[field.item.name.start().clone()],
                );
            }
        }

        Action::Continue
    }
}
