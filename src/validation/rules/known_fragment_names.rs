//! A fragment spread must name a fragment the document actually defines.

use crate::ast::FragmentSpread;
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct KnownFragmentNames;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(KnownFragmentNames)
}

impl<'a> Visitor<'a> for KnownFragmentNames {
    fn enter_fragment_spread(&mut self, ctx: &mut ValidationContext<'a>, spread: &'a Spanning<FragmentSpread<'a>>) -> Action {
        let name = &spread.item.name;
        if !ctx.is_known_fragment(name.item) {
            ctx.report_error(format!(r#"Unknown fragment "{}"."#, name.item), &[name.start().clone()]);
        }
        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field, fragment, query, spread};

    use super::KnownFragmentNames;

    #[test]
    fn known_fragment_passes() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![spread("A")]), fragment("A", "Dog", vec![field("name", vec![])])]);
        expect_passes_rule(&document, &schema, KnownFragmentNames::default);
    }

    #[test]
    fn unknown_fragment_fails() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![spread("NotDefined")])]);
        expect_fails_rule(&document, &schema, KnownFragmentNames::default, &[r#"Unknown fragment "NotDefined"."#]);
    }
}
