//! Every required argument — non-null-typed and without a default value —
//! must be supplied.

use crate::ast::{Directive, Field};
use crate::schema::meta::Argument;
use crate::span::Spanning;
use crate::traversal::Visitor;
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct ProvidedNonNullArguments;

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(ProvidedNonNullArguments)
}

fn is_required(arg: &Argument) -> bool {
    arg.arg_type.is_non_null() && arg.default_value.is_none()
}

impl<'a> Visitor<'a> for ProvidedNonNullArguments {
    fn leave_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a Spanning<Field<'a>>) {
        let Some(field_def) = ctx.field_def() else { return };
        let supplied: Vec<&str> = field.item.arguments.as_ref().map(|a| a.item.iter().map(|(n, _)| n.item).collect()).unwrap_or_default();

        for arg_def in &field_def.arguments {
            if is_required(arg_def) && !supplied.contains(&arg_def.name.as_str()) {
                ctx.report_error(
                    format!(r#"Field "{}" argument "{}" of type "{}" is required but not provided."#, field.item.name.item, arg_def.name, arg_def.arg_type),
                    &[field.item.name.start().clone()],
                );
            }
        }
    }

    fn leave_directive(&mut self, ctx: &mut ValidationContext<'a>, directive: &'a Spanning<Directive<'a>>) {
        let Some(directive_def) = ctx.directive() else { return };
        let supplied: Vec<&str> = directive.item.arguments.as_ref().map(|a| a.item.iter().map(|(n, _)| n.item).collect()).unwrap_or_default();

        for arg_def in &directive_def.arguments {
            if is_required(arg_def) && !supplied.contains(&arg_def.name.as_str()) {
                ctx.report_error(
                    format!(
                        r#"Directive "@{}" argument "{}" of type "{}" is required but not provided."#,
                        directive.item.name.item, arg_def.name, arg_def.arg_type
                    ),
                    &[directive.start().clone()],
                );
            }
        }
    }
}
