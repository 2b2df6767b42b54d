//! Two fields selected under the same response name must be mergeable: a
//! client reading the response can't tell apart which field populated a
//! given key, so they'd better agree on what that key means.

use std::collections::HashSet;

use itertools::Itertools;

use crate::ast::{Arguments, Directive, Field, Selection};
use crate::schema::meta::MetaType;
use crate::schema::model::SchemaType;
use crate::span::Spanning;
use crate::traversal::Visitor;
use crate::validation::context::ValidationContext;

/// A conflict's explanation: either a direct reason, or a named subfield
/// whose own merge conflicts recursively explain this one.
enum Reason<'a> {
    Leaf(String),
    Node(&'a str, Vec<Reason<'a>>),
}

fn render_reason(reason: &Reason) -> String {
    match *reason {
        Reason::Leaf(ref s) => s.clone(),
        Reason::Node(name, ref subs) => {
            format!(r#"subfields "{}" conflict because {}"#, name, subs.iter().map(render_reason).collect::<Vec<_>>().join(" and "))
        }
    }
}

type FieldEntry<'a> = (&'a Spanning<Field<'a>>, Option<&'a MetaType>);

#[derive(Default)]
pub struct OverlappingFieldsCanBeMerged {
    checked: HashSet<(usize, usize)>,
}

pub fn boxed<'a>() -> Box<dyn Visitor<'a> + 'a> {
    Box::new(OverlappingFieldsCanBeMerged::default())
}

fn field_ptr(field: &Field) -> usize {
    field as *const Field as usize
}

fn pair_key(a: &Field, b: &Field) -> (usize, usize) {
    let (pa, pb) = (field_ptr(a), field_ptr(b));
    if pa < pb {
        (pa, pb)
    } else {
        (pb, pa)
    }
}

fn collect_fields<'a>(
    schema: &'a SchemaType<'a>,
    ctx: &ValidationContext<'a>,
    selections: &'a [Selection<'a>],
    parent: Option<&'a MetaType>,
    visited_fragments: &mut HashSet<&'a str>,
    out: &mut Vec<(&'a str, FieldEntry<'a>)>,
) {
    for selection in selections {
        match *selection {
            Selection::Field(ref field) => {
                out.push((field.item.response_name(), (field, parent)));
            }
            Selection::InlineFragment(ref inline) => {
                let next_parent = inline
                    .item
                    .type_condition
                    .as_ref()
                    .and_then(|t| schema.concrete_type_by_name(t.item))
                    .or(parent);
                collect_fields(schema, ctx, &inline.item.selection_set, next_parent, visited_fragments, out);
            }
            Selection::FragmentSpread(ref spread) => {
                let name = spread.item.name.item;
                if !visited_fragments.insert(name) {
                    continue;
                }
                if let Some(frag) = ctx.fragment(name) {
                    let next_parent = schema.concrete_type_by_name(frag.item.type_condition.item).or(parent);
                    collect_fields(schema, ctx, &frag.item.selection_set, next_parent, visited_fragments, out);
                }
            }
        }
    }
}

fn same_arguments(a: Option<&Spanning<Arguments>>, b: Option<&Spanning<Arguments>>) -> bool {
    let a = a.map(|s| s.item.as_slice()).unwrap_or(&[]);
    let b = b.map(|s| s.item.as_slice()).unwrap_or(&[]);
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(name, value)| b.iter().any(|(n2, v2)| n2.item == name.item && v2.item == value.item))
}

fn same_directives(a: Option<&Vec<Spanning<Directive>>>, b: Option<&Vec<Spanning<Directive>>>) -> bool {
    let a = a.map(|v| v.as_slice()).unwrap_or(&[]);
    let b = b.map(|v| v.as_slice()).unwrap_or(&[]);
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|d| {
        b.iter().any(|d2| d2.item.name.item == d.item.name.item && same_arguments(d.item.arguments.as_ref(), d2.item.arguments.as_ref()))
    })
}

fn find_conflict<'a>(schema: &'a SchemaType<'a>, ctx: &ValidationContext<'a>, a: &FieldEntry<'a>, b: &FieldEntry<'a>) -> Option<Reason<'a>> {
    let (field_a, owner_a) = *a;
    let (field_b, owner_b) = *b;

    if field_a.item.name.item != field_b.item.name.item {
        return Some(Reason::Leaf(format!(r#""{}" and "{}" are different fields"#, field_a.item.name.item, field_b.item.name.item)));
    }

    let def_a = owner_a.and_then(|o| o.field_by_name(field_a.item.name.item));
    let def_b = owner_b.and_then(|o| o.field_by_name(field_b.item.name.item));

    if let (Some(def_a), Some(def_b)) = (def_a, def_b) {
        if def_a.field_type.to_string() != def_b.field_type.to_string() {
            return Some(Reason::Leaf(format!("they return differing types {} and {}", def_a.field_type, def_b.field_type)));
        }
    }

    if !same_arguments(field_a.item.arguments.as_ref(), field_b.item.arguments.as_ref()) {
        return Some(Reason::Leaf("they have differing arguments".to_owned()));
    }

    if !same_directives(field_a.item.directives.as_ref(), field_b.item.directives.as_ref()) {
        return Some(Reason::Leaf("they have differing directives".to_owned()));
    }

    let sub_owner_a = def_a.and_then(|d| schema.make_type(&d.field_type)).map(|t| t.get_named());
    let sub_owner_b = def_b.and_then(|d| schema.make_type(&d.field_type)).map(|t| t.get_named());

    let mut merged = Vec::new();
    if let Some(ref sub) = field_a.item.selection_set {
        collect_fields(schema, ctx, sub, sub_owner_a, &mut HashSet::new(), &mut merged);
    }
    if let Some(ref sub) = field_b.item.selection_set {
        collect_fields(schema, ctx, sub, sub_owner_b, &mut HashSet::new(), &mut merged);
    }

    let sub_conflicts = find_group_conflicts(schema, ctx, &merged);
    if sub_conflicts.is_empty() {
        None
    } else {
        Some(Reason::Node(field_a.item.response_name(), sub_conflicts.into_iter().map(|(_, _, _, reason)| reason).collect()))
    }
}

/// Every conflicting pair within a response-name group, not just the first
/// one found: with three or more fields sharing a response name, fields 1
/// and 3 can conflict even when 1 and 2 don't, and both pairs must be
/// reported. Returns the actual entries each conflict was found between, so
/// the caller reports the true offending pair rather than guessing from
/// document order.
fn find_group_conflicts<'a>(schema: &'a SchemaType<'a>, ctx: &ValidationContext<'a>, fields: &[(&'a str, FieldEntry<'a>)]) -> Vec<(&'a str, FieldEntry<'a>, FieldEntry<'a>, Reason<'a>)> {
    let groups: std::collections::HashMap<&'a str, Vec<FieldEntry<'a>>> = fields.iter().copied().into_group_map();

    let mut conflicts = Vec::new();
    for (name, entries) in groups {
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                if std::ptr::eq(entries[i].0, entries[j].0) {
                    continue;
                }
                if let Some(reason) = find_conflict(schema, ctx, &entries[i], &entries[j]) {
                    conflicts.push((name, entries[i], entries[j], reason));
                }
            }
        }
    }
    conflicts
}

impl<'a> Visitor<'a> for OverlappingFieldsCanBeMerged {
    fn leave_selection_set(&mut self, ctx: &mut ValidationContext<'a>, set: &'a [Selection<'a>]) {
        let parent = ctx.parent_type().map(|t| t.get_named());
        let schema = ctx.schema;

        let mut fields = Vec::new();
        collect_fields(schema, ctx, set, parent, &mut HashSet::new(), &mut fields);

        for (name, a, b, reason) in find_group_conflicts(schema, ctx, &fields) {
            let key = pair_key(&a.0.item, &b.0.item);
            if !self.checked.insert(key) {
                continue;
            }

            ctx.report_error(
                format!(r#"Fields "{}" conflict because {}."#, name, render_reason(&reason)),
                &[a.0.start().clone(), b.0.start().clone()],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Field, InputValue, Selection};
    use crate::span::Spanning;
    use crate::test_support::{aliased_field, build_schema, doc, expect_fails_rule, expect_passes_rule, field, field_with_args, query};

    use super::OverlappingFieldsCanBeMerged;

    #[test]
    fn identical_fields_merge() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![field("dog", vec![field("name", vec![])]), field("dog", vec![field("barkVolume", vec![])])])]);
        expect_passes_rule(&document, &schema, OverlappingFieldsCanBeMerged::default);
    }

    #[test]
    fn conflicting_alias_fails() {
        let schema = build_schema();
        let document = doc(vec![query(None, vec![aliased_field("name", "nickname", vec![]), field("name", vec![])])]);
        expect_fails_rule(&document, &schema, OverlappingFieldsCanBeMerged::default, &[r#"Fields "name" conflict because "nickname" and "name" are different fields."#]);
    }

    #[test]
    fn conflicting_arguments_fail() {
        let schema = build_schema();
        let document = doc(vec![query(
            None,
            vec![
                field_with_args("doesKnowCommand", vec![("dogCommand", InputValue::Enum("SIT".into()))], vec![]),
                field_with_args("doesKnowCommand", vec![("dogCommand", InputValue::Enum("HEEL".into()))], vec![]),
            ],
        )]);
        expect_fails_rule(&document, &schema, OverlappingFieldsCanBeMerged::default, &[r#"Fields "doesKnowCommand" conflict because they have differing arguments."#]);
    }

    /// Three fields share a response name: the first two are identical and
    /// don't conflict, but the third conflicts with each of them. Every
    /// conflicting pair must be reported (not just the first one found), and
    /// each report's locations must point at the pair that actually
    /// conflicts rather than whichever two fields happen to come first in
    /// document order.
    #[test]
    fn three_fields_same_response_name_reports_every_conflicting_pair() {
        use crate::span::SourcePosition;

        let schema = build_schema();

        let pos = |i: usize| SourcePosition::new(i, 0, i);
        let at = |i: usize, name: &'static str| {
            Selection::Field(Spanning::single_width(
                &pos(i),
                Field { alias: Some(Spanning::unlocated("x")), name: Spanning::unlocated(name), arguments: None, directives: None, selection_set: None },
            ))
        };

        let document = doc(vec![query(None, vec![at(0, "nickname"), at(1, "nickname"), at(2, "name")])]);

        let errors = crate::test_support::run_rule(&document, &schema, OverlappingFieldsCanBeMerged::default);

        assert_eq!(errors.len(), 2, "expected one report per conflicting pair, got: {:?}", errors);
        for error in &errors {
            assert_eq!(error.message(), r#"Fields "x" conflict because "nickname" and "name" are different fields."#);
            let locations = error.locations();
            assert_eq!(locations.len(), 2);
            assert!(locations.contains(&pos(2)), "conflict must involve the field at position 2: {:?}", locations);
            assert!(locations.contains(&pos(0)) || locations.contains(&pos(1)), "conflict must involve one of the non-conflicting pair's fields, got: {:?}", locations);
        }

        let other_ends: std::collections::HashSet<_> = errors.iter().map(|e| e.locations().iter().find(|p| **p != pos(2)).cloned().unwrap()).collect();
        assert_eq!(other_ends, std::collections::HashSet::from([pos(0), pos(1)]), "the two reports must pair position 2 with 0 and with 1 respectively, not both with the same one");
    }
}
