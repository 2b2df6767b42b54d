//! Fragment names are the only way to address a fragment from a spread;
//! duplicates would make spreads ambiguous.

use std::collections::HashMap;

use crate::ast::Fragment;
use crate::span::{SourcePosition, Spanning};
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct UniqueFragmentNames<'a> {
    names: HashMap<&'a str, SourcePosition>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(UniqueFragmentNames::default())
}

impl<'a> Visitor<'a> for UniqueFragmentNames<'a> {
    fn enter_fragment_definition(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<Fragment<'a>>) -> Action {
        let name = &frag.item.name;
        if let Some(first) = self.names.insert(name.item, name.start().clone()) {
            ctx.report_error(format!(r#"There can only be one fragment named "{}"."#, name.item), &[first, name.start().clone()]);
        }
        Action::Continue
    }
}
