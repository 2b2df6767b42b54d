//! Query validation: the `ValidationContext` facade, the literal-value
//! checker, the twenty-four rules, and the orchestrator that fuses them
//! into one traversal pass.

pub mod context;
pub mod literal;
pub mod rules;

pub use context::{RuleError, ValidationContext, VariableUsage};
pub use rules::{default_rules, RuleFactory};

use crate::ast::Document;
use crate::schema::model::SchemaType;
use crate::traversal::{walk_document, walk_document_expanding_fragments, MultiVisitor};

/// Runs `rule_factories` over `document` against `schema` in a single
/// traversal pass (plus a second pass for any rule requesting fragment
/// expansion) and returns the accumulated errors.
pub fn validate<'a>(schema: &'a SchemaType<'a>, document: &'a Document<'a>, rule_factories: &[RuleFactory<'a>]) -> Vec<RuleError> {
    let mut ctx = ValidationContext::new(schema, document);

    let expanding: Vec<bool> = rule_factories.iter().map(|f| f().wants_fragment_expansion()).collect();

    let mut primary = MultiVisitor::new(rule_factories.iter().map(|f| f()).collect());
    walk_document(&mut primary, &mut ctx, document);

    let expansion_factories: Vec<&RuleFactory<'a>> =
        rule_factories.iter().zip(&expanding).filter(|&(_, &wants)| wants).map(|(f, _)| f).collect();

    if !expansion_factories.is_empty() {
        let mut secondary = MultiVisitor::new(expansion_factories.iter().map(|f| (f)()).collect());
        walk_document_expanding_fragments(&mut secondary, &mut ctx, document);
    }

    debug_assert!(ctx.stacks_balanced(), "type-info stack left unbalanced after validation");

    ctx.into_errors()
}
