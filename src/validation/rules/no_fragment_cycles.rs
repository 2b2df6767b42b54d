//! A fragment that spreads itself, directly or transitively through other
//! fragments, could never be expanded to a finite selection set.

use std::collections::HashSet;

use crate::ast::{Fragment, Selection};
use crate::span::Spanning;
use crate::traversal::{Action, Visitor};
use crate::validation::context::ValidationContext;

#[derive(Default)]
pub struct NoFragmentCycles<'a> {
    visited: HashSet<&'a str>,
    known_to_lead_to_cycle: HashSet<&'a str>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(NoFragmentCycles::default())
}

/// The fragment names spread directly inside `selections`, skipping into
/// inline fragments (same selection set, same cycle risk) but not recursing
/// into other named fragments — that's the DFS's job.
fn direct_spreads<'a>(selections: &'a [Selection<'a>], out: &mut Vec<(&'a str, crate::span::SourcePosition)>) {
    for selection in selections {
        match *selection {
            Selection::FragmentSpread(ref spread) => out.push((spread.item.name.item, spread.start().clone())),
            Selection::InlineFragment(ref inline) => direct_spreads(&inline.item.selection_set, out),
            Selection::Field(_) => {}
        }
    }
}

impl<'a> Visitor<'a> for NoFragmentCycles<'a> {
    fn enter_fragment_definition(&mut self, ctx: &mut ValidationContext<'a>, frag: &'a Spanning<Fragment<'a>>) -> Action {
        let start_name = frag.item.name.item;
        if self.visited.contains(start_name) {
            return Action::Continue;
        }

        // Explicit work-stack DFS: each frame is (fragment name, path of
        // fragment names taken to reach it, its list of spreads still to try).
        let mut stack: Vec<(&'a str, Vec<&'a str>, Vec<(&'a str, crate::span::SourcePosition)>)> = Vec::new();
        self.visited.insert(start_name);

        let mut initial_spreads = Vec::new();
        direct_spreads(&frag.item.selection_set, &mut initial_spreads);
        stack.push((start_name, vec![start_name], initial_spreads));

        while let Some((current_name, path, mut spreads)) = stack.pop() {
            let Some((next_name, next_pos)) = spreads.pop() else { continue };
            stack.push((current_name, path.clone(), spreads));

            if let Some(cycle_start) = path.iter().position(|&n| n == next_name) {
                let via: Vec<&str> = path[cycle_start + 1..].to_vec();
                let suffix = if via.is_empty() { String::new() } else { format!(" via {}", via.join(", ")) };
                ctx.report_error(format!(r#"Cannot spread fragment "{}" within itself{}."#, next_name, suffix), &[next_pos]);
                for name in &path[cycle_start..] {
                    self.known_to_lead_to_cycle.insert(name);
                }
                continue;
            }

            if self.known_to_lead_to_cycle.contains(next_name) {
                continue;
            }

            self.visited.insert(next_name);

            if let Some(next_frag) = ctx.fragment(next_name) {
                let mut next_spreads = Vec::new();
                direct_spreads(&next_frag.item.selection_set, &mut next_spreads);
                let mut next_path = path.clone();
                next_path.push(next_name);
                stack.push((next_name, next_path, next_spreads));
            }
        }

        Action::Continue
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{build_schema, doc, expect_fails_rule, expect_passes_rule, field, fragment, query, spread};

    use super::NoFragmentCycles;

    #[test]
    fn acyclic_fragments_pass() {
        let schema = build_schema();
        let document = doc(vec![
            query(None, vec![spread("A")]),
            fragment("A", "Dog", vec![field("name", vec![])]),
        ]);
        expect_passes_rule(&document, &schema, NoFragmentCycles::default);
    }

    #[test]
    fn direct_self_cycle_fails() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![spread("A")]), fragment("A", "Dog", vec![spread("A")])]);
        expect_fails_rule(&document, &schema, NoFragmentCycles::default, &[r#"Cannot spread fragment "A" within itself."#]);
    }

    #[test]
    fn transitive_cycle_fails() {
        let schema = build_schema();
        let document = doc(vec![
            query(None, vec![spread("A")]),
            fragment("A", "Dog", vec![spread("B")]),
            fragment("B", "Dog", vec![spread("A")]),
        ]);
        expect_fails_rule(&document, &schema, NoFragmentCycles::default, &[r#"Cannot spread fragment "A" within itself via B."#]);
    }
}
