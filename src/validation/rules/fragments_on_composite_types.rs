//! A fragment's type condition must name an object, interface, or union —
//! selecting fields against a scalar or enum is meaningless.

use crate::ast::{Fragment, InlineFragment};
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct FragmentsOnCompositeTypes;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(FragmentsOnCompositeTypes)
}

impl<'a> Visitor<'a> for FragmentsOnCompositeTypes {
    fn enter_fragment_definition(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<Fragment<'a>>) -> Action {
        if let Some(ty) = ctx.schema.concrete_type_by_name(frag.item.type_condition.item) {
            if !ty.is_composite() {
                ctx.report_error(
                    format!(r#"Fragment "{}" cannot condition on non composite type "{}"."#, frag.item.name.item, ty.name()),
                    &[frag.item.type_condition.start().clone()],
                );
            }
        }
        Action::Continue
    }

    fn enter_inline_fragment(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<InlineFragment<'a>>) -> Action {
        if let Some(ref condition) = frag.item.type_condition {
            if let Some(ty) = ctx.schema.concrete_type_by_name(condition.item) {
                if !ty.is_composite() {
                    ctx.report_error(format!(r#"Fragment cannot condition on non composite type "{}"."#, ty.name()), &[condition.start().clone()]);
                }
            }
        }
        Action::Continue
    }
}
