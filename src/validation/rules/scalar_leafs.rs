//! A field returning a scalar or enum must not have a sub-selection; a
//! field returning anything else must.

use crate::ast::Field;
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct ScalarLeafs;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(ScalarLeafs)
}

impl<'a> Visitor<'a> for ScalarLeafs {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a Spanning<Field<'a>>) -> Action {
        let Some(ty) = ctx.current_type() else { return Action::Continue };
        let named = ty.get_named();
        let has_selections = field.item.selection_set.is_some();

        if named.is_leaf() && has_selections {
            ctx.report_error(
                format!(r#"Field "{}" of type "{}" must not have a sub selection."#, field.item.name.item, ty),
                &[field.item.name.start().clone()],
            );
        } else if !named.is_leaf() && !has_selections {
            ctx.report_error(
                format!(r#"Field "{}" of type "{}" must have a sub selection."#, field.item.name.item, ty),
                &[field.item.name.start().clone()],
            );
        }

        Action::Continue
    }
}
