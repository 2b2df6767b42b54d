//! Fuses many rules' [`Visitor`] implementations into the single combined
//! visitor the orchestrator drives over one traversal pass.

use crate::ast::{Directive, Field, Fragment, FragmentSpread, InlineFragment, Operation, Selection};
use crate::span::Spanning;
use crate::validation::context::ValidationContext;

use super::{Action, Visitor};

/// Combines `N` rules' visitors into one. Hooks run in registration order;
/// per §4.1, a `Skip`/`Stop` returned by one rule's hook never prevents a
/// later rule's hook for the *same* node from running. `Skip` only
/// suppresses that one rule's view of the skipped node's descendants;
/// `Stop` terminates the whole traversal once every rule's hook for the
/// current node has had a chance to run.
pub struct MultiVisitor<'v, 'a> {
    visitors: Vec<Box<dyn Visitor<'a> + 'v>>,
    skip_from: Vec<Option<usize>>,
    scope_stack: Vec<usize>,
    next_scope: usize,
    stop_requested: bool,
}

impl<'v, 'a> MultiVisitor<'v, 'a> {
    pub fn new(visitors: Vec<Box<dyn Visitor<'a> + 'v>>) -> MultiVisitor<'v, 'a> {
        let skip_from = vec![None; visitors.len()];
        MultiVisitor { visitors, skip_from, scope_stack: Vec::new(), next_scope: 0, stop_requested: false }
    }

    fn active_indices(&self) -> Vec<usize> {
        (0..self.visitors.len()).filter(|&i| self.skip_from[i].is_none()).collect()
    }

    /// Runs `call` on every visitor not currently skipped by an ancestor
    /// scope; records new skip/stop requests; returns the combined action
    /// the generic walker should take for this scope.
    fn enter_scope<F>(&mut self, ctx: &mut ValidationContext<'a>, mut call: F) -> Action
    where
        F: FnMut(&mut dyn Visitor<'a>, &mut ValidationContext<'a>) -> Action,
    {
        let scope_id = self.next_scope;
        self.next_scope += 1;
        self.scope_stack.push(scope_id);

        for i in self.active_indices() {
            match call(self.visitors[i].as_mut(), ctx) {
                Action::Skip => self.skip_from[i] = Some(scope_id),
                Action::Stop => {
                    self.stop_requested = true;
                    self.skip_from[i] = Some(scope_id);
                }
                Action::Continue | Action::Replace => {}
            }
        }

        if self.stop_requested {
            Action::Stop
        } else if self.visitors.is_empty() || self.skip_from.iter().all(Option::is_some) {
            Action::Skip
        } else {
            Action::Continue
        }
    }

    fn leave_scope<F>(&mut self, ctx: &mut ValidationContext<'a>, mut call: F)
    where
        F: FnMut(&mut dyn Visitor<'a>, &mut ValidationContext<'a>),
    {
        let scope_id = self.scope_stack.pop().expect("scope stack underflow: unbalanced enter/leave");

        for i in 0..self.visitors.len() {
            let skipping_ancestor = matches!(self.skip_from[i], Some(id) if id != scope_id);
            if !skipping_ancestor {
                call(self.visitors[i].as_mut(), ctx);
            }
            if self.skip_from[i] == Some(scope_id) {
                self.skip_from[i] = None;
            }
        }
    }

    /// Fires `call` for every visitor not currently skipped, without
    /// opening a new scope (leaf dispatch points: directives, arguments,
    /// variable definitions, fragment spreads, object fields, type names).
    fn fire<F>(&mut self, ctx: &mut ValidationContext<'a>, mut call: F) -> Action
    where
        F: FnMut(&mut dyn Visitor<'a>, &mut ValidationContext<'a>) -> Action,
    {
        for i in self.active_indices() {
            if call(self.visitors[i].as_mut(), ctx) == Action::Stop {
                self.stop_requested = true;
            }
        }
        if self.stop_requested { Action::Stop } else { Action::Continue }
    }

    fn fire_leave<F>(&mut self, ctx: &mut ValidationContext<'a>, mut call: F)
    where
        F: FnMut(&mut dyn Visitor<'a>, &mut ValidationContext<'a>),
    {
        for i in self.active_indices() {
            call(self.visitors[i].as_mut(), ctx);
        }
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}

impl<'v, 'a> Visitor<'a> for MultiVisitor<'v, 'a> {
    fn enter_document(&mut self, ctx: &mut ValidationContext<'a>, doc: &'a crate::ast::Document<'a>) -> Action {
        self.enter_scope(ctx, |v, ctx| v.enter_document(ctx, doc))
    }
    fn leave_document(&mut self, ctx: &mut ValidationContext<'a>, doc: &'a crate::ast::Document<'a>) {
        self.leave_scope(ctx, |v, ctx| v.leave_document(ctx, doc));
    }

    fn enter_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) -> Action {
        self.enter_scope(ctx, |v, ctx| v.enter_operation_definition(ctx, op))
    }
    fn leave_operation_definition(&mut self, ctx: &mut ValidationContext<'a>, op: &'a Spanning<Operation<'a>>) {
        self.leave_scope(ctx, |v, ctx| v.leave_operation_definition(ctx, op));
    }

    fn enter_fragment_definition(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<Fragment<'a>>) -> Action {
        self.enter_scope(ctx, |v, ctx| v.enter_fragment_definition(ctx, frag))
    }
    fn leave_fragment_definition(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<Fragment<'a>>) {
        self.leave_scope(ctx, |v, ctx| v.leave_fragment_definition(ctx, frag));
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        def: &'a (Spanning<&'a str>, crate::ast::VariableDefinition<'a>),
    ) -> Action {
        self.fire(ctx, |v, ctx| v.enter_variable_definition(ctx, def))
    }
    fn leave_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        def: &'a (Spanning<&'a str>, crate::ast::VariableDefinition<'a>),
    ) {
        self.fire_leave(ctx, |v, ctx| v.leave_variable_definition(ctx, def));
    }

    fn enter_directive(&mut self, ctx: &mut ValidationContext<'a>, directive: &'a Spanning<Directive<'a>>) -> Action {
        self.fire(ctx, |v, ctx| v.enter_directive(ctx, directive))
    }
    fn leave_directive(&mut self, ctx: &mut ValidationContext<'a>, directive: &'a Spanning<Directive<'a>>) {
        self.fire_leave(ctx, |v, ctx| v.leave_directive(ctx, directive));
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        arg: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) -> Action {
        self.fire(ctx, |v, ctx| v.enter_argument(ctx, arg))
    }
    fn leave_argument(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        arg: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) {
        self.fire_leave(ctx, |v, ctx| v.leave_argument(ctx, arg));
    }

    fn enter_selection_set(&mut self, ctx: &mut ValidationContext<'a>, set: &'a [Selection<'a>]) -> Action {
        self.enter_scope(ctx, |v, ctx| v.enter_selection_set(ctx, set))
    }
    fn leave_selection_set(&mut self, ctx: &mut ValidationContext<'a>, set: &'a [Selection<'a>]) {
        self.leave_scope(ctx, |v, ctx| v.leave_selection_set(ctx, set));
    }

    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a Spanning<Field<'a>>) -> Action {
        self.enter_scope(ctx, |v, ctx| v.enter_field(ctx, field))
    }
    fn leave_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a Spanning<Field<'a>>) {
        self.leave_scope(ctx, |v, ctx| v.leave_field(ctx, field));
    }

    fn enter_fragment_spread(&mut self, ctx: &mut ValidationContext<'a>, spread: &'a Spanning<FragmentSpread<'a>>) -> Action {
        self.fire(ctx, |v, ctx| v.enter_fragment_spread(ctx, spread))
    }
    fn leave_fragment_spread(&mut self, ctx: &mut ValidationContext<'a>, spread: &'a Spanning<FragmentSpread<'a>>) {
        self.fire_leave(ctx, |v, ctx| v.leave_fragment_spread(ctx, spread));
    }

    fn enter_inline_fragment(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<InlineFragment<'a>>) -> Action {
        self.enter_scope(ctx, |v, ctx| v.enter_inline_fragment(ctx, frag))
    }
    fn leave_inline_fragment(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<InlineFragment<'a>>) {
        self.leave_scope(ctx, |v, ctx| v.leave_inline_fragment(ctx, frag));
    }

    fn enter_object_value(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        value: Spanning<&'a [(Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>)]>,
    ) -> Action {
        self.enter_scope(ctx, |v, ctx| v.enter_object_value(ctx, value.clone()))
    }
    fn leave_object_value(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        value: Spanning<&'a [(Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>)]>,
    ) {
        self.leave_scope(ctx, |v, ctx| v.leave_object_value(ctx, value.clone()));
    }

    fn enter_object_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) -> Action {
        self.fire(ctx, |v, ctx| v.enter_object_field(ctx, field))
    }
    fn leave_object_field(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        field: &'a (Spanning<&'a str>, Spanning<crate::ast::InputValue<'a>>),
    ) {
        self.fire_leave(ctx, |v, ctx| v.leave_object_field(ctx, field));
    }

    fn enter_named_type(&mut self, ctx: &mut ValidationContext<'a>, name: Spanning<&'a str>) -> Action {
        self.fire(ctx, |v, ctx| v.enter_named_type(ctx, name.clone()))
    }
}
