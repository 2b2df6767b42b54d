//! A fragment that no operation ever spreads, directly or transitively, is
//! dead weight in the document.

use std::collections::HashSet;

use crate::ast::{Definition, Document};
use crate::traversal::Visitor;
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct NoUnusedFragments;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(NoUnusedFragments)
}

impl<'a> Visitor<'a> for NoUnusedFragments {
    fn leave_document(&mut self, ctx: &mut ValidationContext<'a>, doc: &'a Document<'a>) {
        let mut used: HashSet<&'a str> = HashSet::new();
        for def in doc {
            if let Definition::Operation(ref op) = *def {
                used.extend(ctx.reachable_fragments(&op.item.selection_set));
            }
        }

        for def in doc {
            if let Definition::Fragment(ref frag) = *def {
                let name = frag.item.name.item;
                if !used.contains(name) {
                    ctx.report_error(format!(r#"Fragment "{}" is never used."#, name), &[frag.item.name.start().clone()]);
                }
            }
        }
    }
}
