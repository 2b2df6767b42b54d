//! A fragment spread only makes sense where its type condition can overlap
//! with the type of the place it's spread into.

use crate::ast::{FragmentSpread, InlineFragment};
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct PossibleFragmentSpreads;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(PossibleFragmentSpreads)
}

impl<'a> Visitor<'a> for PossibleFragmentSpreads {
    fn enter_inline_fragment(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<InlineFragment<'a>>) -> Action {
        let (Some(parent), Some(condition)) = (ctx.parent_type(), ctx.current_type()) else { return Action::Continue };

        if !ctx.schema.type_overlap(parent.get_named(), condition.get_named()) {
            ctx.report_error(
                format!(
                    r#"Fragment cannot be spread here as objects of type "{}" can never be of type "{}"."#,
                    parent.get_named().name(),
                    condition.get_named().name()
                ),
                &[frag.start().clone()],
            );
        }

        Action::Continue
    }

    fn enter_fragment_spread(&mut self, ctx: &mut ValidationContext<'a>, spread: &'a Spanning<FragmentSpread<'a>>) -> Action {
        let Some(parent) = ctx.parent_type() else { return Action::Continue };
        let name = spread.item.name.item;
        let Some(frag) = ctx.fragment(name) else { return Action::Continue };
        let Some(condition) = ctx.schema.concrete_type_by_name(frag.item.type_condition.item) else { return Action::Continue };

        if !ctx.schema.type_overlap(parent.get_named(), condition) {
            ctx.report_error(
                format!(
                    r#"Fragment "{}" cannot be spread here as objects of type "{}" can never be of type "{}"."#,
                    name,
                    parent.get_named().name(),
                    condition.name()
                ),
                &[spread.start().clone()],
            );
        }

        Action::Continue
    }
}
