//! A directive must be declared by the schema, and used only where that
//! declaration allows.

use crate::ast::{Directive, Field, Fragment, FragmentSpread, InlineFragment, Operation};
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Clone, Copy, PartialEq)]
enum Location {
    Operation,
    Field,
    Fragment,
}

#[derive(Default)]
pub struct KnownDirectives {
    location_stack: Vec<Location>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(KnownDirectives::default())
}

impl<'a> Visitor<'a> for KnownDirectives {
    fn enter_operation_definition(&mut self, _ctx: &mut ValidationContext<'a>, _op: &'a Spanning<Operation<'a>>) -> Action {
        self.location_stack.push(Location::Operation);
        Action::Continue
    }

    fn leave_operation_definition(&mut self, _ctx: &mut ValidationContext<'a>, _op: &'a Spanning<Operation<'a>>) {
        self.location_stack.pop();
    }

    fn enter_field(&mut self, _ctx: &mut ValidationContext<'a>, _field: &'a Spanning<Field<'a>>) -> Action {
        self.location_stack.push(Location::Field);
        Action::Continue
    }

    fn leave_field(&mut self, _ctx: &mut ValidationContext<'a>, _field: &'a Spanning<Field<'a>>) {
        self.location_stack.pop();
    }

    fn enter_fragment_definition(&mut self, _ctx: &mut ValidationContext<'a>, _frag: &'a Spanning<Fragment<'a>>) -> Action {
        self.location_stack.push(Location::Fragment);
        Action::Continue
    }

    fn leave_fragment_definition(&mut self, _ctx: &mut ValidationContext<'a>, _frag: &'a Spanning<Fragment<'a>>) {
        self.location_stack.pop();
    }

    fn enter_fragment_spread(&mut self, _ctx: &mut ValidationContext<'a>, _spread: &'a Spanning<FragmentSpread<'a>>) -> Action {
        self.location_stack.push(Location::Fragment);
        Action::Continue
    }

    fn leave_fragment_spread(&mut self, _ctx: &mut ValidationContext<'a>, _spread: &'a Spanning<FragmentSpread<'a>>) {
        self.location_stack.pop();
    }

    fn enter_inline_fragment(&mut self, _ctx: &mut ValidationContext<'a>, _frag: &'a Spanning<InlineFragment<'a>>) -> Action {
        self.location_stack.push(Location::Fragment);
        Action::Continue
    }

    fn leave_inline_fragment(&mut self, _ctx: &mut ValidationContext<'a>, _frag: &'a Spanning<InlineFragment<'a>>) {
        self.location_stack.pop();
    }

    fn enter_directive(&mut self, ctx: &mut ValidationContext<'a>, directive: &'a Spanning<Directive<'a>>) -> Action {
        let name = directive.item.name.item;
        match ctx.schema.directive_by_name(name) {
            None => {
                ctx.report_error(format!(r#"Unknown directive "{}"."#, name), &[directive.start().clone()]);
            }
            Some(def) => {
                let location = self.location_stack.last().copied();
                let allowed = match location {
                    Some(Location::Operation) => def.on_operation,
                    Some(Location::Field) => def.on_field,
                    Some(Location::Fragment) => def.on_fragment,
                    None => true,
                };
                if !allowed {
                    let location_name = match location {
                        Some(Location::Operation) => "operation",
                        Some(Location::Field) => "field",
                        Some(Location::Fragment) => "fragment",
                        None => "",
                    };
                    ctx.report_error(format!(r#"Directive "{}" may not be used on "{}"."#, name, location_name), &[directive.start().clone()]);
                }
            }
        }
        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::InputValue;
    use crate::test_support::{build_schema, directive, doc, expect_fails_rule, expect_passes_rule, field_with_directives, query};

    use super::KnownDirectives;

    #[test]
    fn known_directive_on_field_passes() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![field_with_directives("dog", vec![directive("include", vec![("if", InputValue::Boolean(true))])], vec![])])]);
        expect_passes_rule(&document, &schema, KnownDirectives::default);
    }

    #[test]
    fn unknown_directive_fails() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![field_with_directives("dog", vec![directive("bogus", vec![])], vec![])])]);
        expect_fails_rule(&document, &schema, KnownDirectives::default, &[r#"Unknown directive "bogus"."#]);
    }
}
