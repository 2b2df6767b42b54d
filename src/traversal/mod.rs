//! The AST traversal engine: a depth-first, pre-order walker parametric on
//! a [`Visitor`], with an ancestor-respecting skip/stop control flow and an
//! optional fragment-spread expansion mode.

mod multi;
mod walk;

pub use multi::MultiVisitor;
pub use walk::{walk_document, walk_document_expanding_fragments};

use crate::ast::{Directive, Field, Fragment, FragmentSpread, InlineFragment, Operation, Selection};
use crate::span::Spanning;
use crate::validation::context::ValidationContext;

/// What the engine should do after a hook returns.
///
/// `Replace` is not exercised by this crate's rules — every hook here only
/// ever reports errors — but is kept as part of the engine's contract so a
/// future AST-transformation pass can reuse the same walker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Proceed normally.
    Continue,
    /// Do not visit this node's children.
    Skip,
    /// Terminate the whole traversal immediately.
    Stop,
    /// Reserved for AST-transformation reuse; unused by validation rules.
    Replace,
}

impl Default for Action {
    fn default() -> Action {
        Action::Continue
    }
}

/// A visitor observes nodes of a [`crate::ast::Document`] during a single
/// traversal pass. Every hook defaults to a no-op that continues the walk;
/// a rule implements only the hooks it cares about.
///
/// Hook naming mirrors the AST node kinds in the data model: `enter_*` runs
/// before a node's children are visited, `leave_*` after. Leaf value kinds
/// (`IntValue`, `StringValue`, …) are not individually dispatched — no rule
/// in this crate's set inspects a literal through the traversal engine
/// rather than by reading it directly off the `Argument`/`VariableDefinition`
/// it hangs from, so the walker does not fire hooks for them. `ObjectValue`
/// and `ObjectField` are the exception: `UniqueInputFieldNames` needs to see
/// every nested input object, however deeply a literal is embedded in a
/// list, so those two kinds keep dedicated hooks.
#[allow(unused_variables)]
pub trait Visitor<'a> {
    fn enter_document(&mut self, ctx: &mut ValidationContext<'a>, doc: &'a crate::ast::Document<'a>) -> Action {
        Action::Continue
    }
    fn leave_document(&mut self, ctx: &mut ValidationContext<'a>, doc: &'a crate::ast::Document<'a>) {}

    fn enter_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) -> Action {
        Action::Continue
    }
    fn leave_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) {}

    fn enter_fragment_definition(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<Fragment<'a>>) -> Action {
        Action::Continue
    }
    fn leave_fragment_definition(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<Fragment<'a>>) {}

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        def: &'a (Spanning<&'a str>, crate::ast::VariableDefinition<'a>),
    ) -> Action {
        Action::Continue
    }
    fn leave_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        def: &'a (Spanning<&'a str>, crate::ast::VariableDefinition<'a>),
    ) {
    }

    fn enter_directive(&mut self, ctx: &mut ValidationContext<'a>, directive: &'a Spanning<Directive<'a>>) -> Action {
        Action::Continue
    }
    fn leave_directive(&mut self, ctx: &mut ValidationContext<'a>, directive: &'a Spanning<Directive<'a>>) {}

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        arg: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) -> Action {
        Action::Continue
    }
    fn leave_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        arg: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) {
    }

    fn enter_selection_set(&mut self, ctx: &mut ValidationContext<'a>, set: &'a [Selection<'a>]) -> Action {
        Action::Continue
    }
    fn leave_selection_set(&mut self, ctx: &mut ValidationContext<'a>, set: &'a [Selection<'a>]) {}

    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a Spanning<Field<'a>>) -> Action {
        Action::Continue
    }
    fn leave_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a Spanning<Field<'a>>) {}

    fn enter_fragment_spread(&mut self, ctx: &mut ValidationContext<'a>, spread: &'a Spanning<FragmentSpread<'a>>) -> Action {
        Action::Continue
    }
    fn leave_fragment_spread(&mut self, ctx: &mut ValidationContext<'a>, spread: &'a Spanning<FragmentSpread<'a>>) {}

    fn enter_inline_fragment(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<InlineFragment<'a>>) -> Action {
        Action::Continue
    }
    fn leave_inline_fragment(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<InlineFragment<'a>>) {}

    fn enter_object_value(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        value: Spanning<&'a [(Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>)]>,
    ) -> Action {
        Action::Continue
    }
    fn leave_object_value(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        value: Spanning<&'a [(Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>)]>,
    ) {
    }

    fn enter_object_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) -> Action {
        Action::Continue
    }
    fn leave_object_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) {
    }

    /// Fires for the name of every `NamedType` occurrence the walker
    /// resolves on the caller's behalf: a variable's declared type and a
    /// fragment's (or inline fragment's) type condition.
    fn enter_named_type(&mut self, ctx: &mut ValidationContext<'a>, name: Spanning<&'a str>) -> Action {
        Action::Continue
    }

    /// Whether this rule's hooks should additionally be run, in a second
    /// pass, with fragment spreads expanded in place at their spread site
    /// (§4.1's fragment-spread expansion mode).
    fn wants_fragment_expansion(&self) -> bool {
        false
    }
}
