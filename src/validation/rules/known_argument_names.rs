//! An argument must be declared on the field or directive it's supplied to.

use crate::ast::InputValue;
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct KnownArgumentNames;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(KnownArgumentNames)
}

impl<'a> Visitor<'a> for KnownArgumentNames {
    fn enter_argument(&mut self, ctx: &mut ValidationContext<'a>, arg: &'a (Spanning<&'a str>, Spanning<InputValue<'a>>)) -> Action {
        if ctx.argument_def().is_some() {
            return Action::Continue;
        }

        let name = &arg.0;
        if let Some(directive) = ctx.directive() {
            ctx.report_error(format!(r#"Unknown argument "{}" on directive "@{}"."#, name.item, directive.name), &[name.start().clone()]);
        } else if let Some(field_def) = ctx.field_def() {
            let parent_name = ctx.parent_type().map(|t| t.to_string()).unwrap_or_default();
            ctx.report_error(
                format!(r#"Unknown argument "{}" on field "{}" of type "{}"."#, name.item, field_def.name, parent_name),
                &[name.start().clone()],
            );
        }

        Action::Continue
    }
}
