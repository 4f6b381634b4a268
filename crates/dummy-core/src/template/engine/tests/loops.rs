//! Loop extraction and rendering tests

use super::helpers::{artists, engine_with};
use super::*;
use crate::template::loader::MemoryLoader;

#[test]
fn test_assign_loop() {
    let mut dummy = engine_with(&[(
        "band.tpl",
        "Queen: {loop artists}Name: {:name} ({:age}) {/loop}- fin",
    )]);
    dummy.get("band.tpl").unwrap();

    assert!(dummy.assign_loop("artists", &artists()).unwrap());
    assert_eq!(
        dummy.get("band.tpl").unwrap(),
        "Queen: Name: Freddie (65) Name: Brian (66) - fin"
    );
}

#[test]
fn test_assign_unknown_loop() {
    let mut dummy = engine_with(&[("band.tpl", "{loop artists}{:name}{/loop}")]);
    dummy.get("band.tpl").unwrap();

    assert!(!dummy.assign_loop("missing", &[]).unwrap());
    assert_eq!(dummy.resolved(), Some("{loop artists}{:name}{/loop}"));
}

#[test]
fn test_assign_loop_before_any_template() {
    let mut dummy = engine_with(&[]);
    assert!(!dummy.assign_loop("artists", &artists()).unwrap());
    assert_eq!(dummy.resolved(), None);
}

#[test]
fn test_assign_loop_with_no_records_removes_block() {
    let mut dummy = engine_with(&[("band.tpl", "[{loop artists}{:name}{/loop}]")]);
    dummy.get("band.tpl").unwrap();

    assert!(dummy.assign_loop("artists", &[]).unwrap());
    assert_eq!(dummy.resolved(), Some("[]"));
}

#[test]
fn test_sequential_loops_close_at_nearest_end() {
    let mut dummy = engine_with(&[(
        "page.tpl",
        "{loop a}<{:x}>{/loop} middle {loop b}[{:y}]{/loop}",
    )]);
    dummy.get("page.tpl").unwrap();

    let loops = extract_loops(dummy.resolved().unwrap()).unwrap();
    assert_eq!(loops.get("a").map(String::as_str), Some("{loop a}<{:x}>{/loop}"));
    assert_eq!(loops.get("b").map(String::as_str), Some("{loop b}[{:y}]{/loop}"));

    assert!(dummy
        .assign_loop("a", &[Record::from([("x", "1")]), Record::from([("x", "2")])])
        .unwrap());
    assert!(dummy.assign_loop("b", &[Record::from([("y", "3")])]).unwrap());
    assert_eq!(dummy.resolved(), Some("<1><2> middle [3]"));
}

#[test]
fn test_loop_spanning_lines() {
    let mut dummy = engine_with(&[(
        "list.tpl",
        "<ul>\n{loop artists}  <li>{:name}</li>\n{/loop}</ul>",
    )]);
    dummy.get("list.tpl").unwrap();

    dummy.assign_loop("artists", &artists()).unwrap();
    assert_eq!(
        dummy.resolved(),
        Some("<ul>\n  <li>Freddie</li>\n  <li>Brian</li>\n</ul>")
    );
}

#[test]
fn test_duplicate_loop_names_last_wins() {
    let loops = extract_loops("{loop a}first{/loop}{loop a}second{/loop}").unwrap();
    assert_eq!(loops.len(), 1);
    assert_eq!(loops["a"], "{loop a}second{/loop}");
}

#[test]
fn test_unclosed_loop_is_plain_text() {
    let loops = extract_loops("{loop a} never closed").unwrap();
    assert!(loops.is_empty());

    let loops = extract_loops("stray {/loop} then {loop b}x{/loop}").unwrap();
    assert_eq!(loops.keys().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn test_loop_inside_included_template() {
    let mut dummy = engine_with(&[
        ("page.tpl", "Members: {load members.tpl}"),
        ("members.tpl", "{loop artists}{:name};{/loop}"),
    ]);
    dummy.get("page.tpl").unwrap();

    assert!(dummy.assign_loop("artists", &artists()).unwrap());
    assert_eq!(dummy.resolved(), Some("Members: Freddie;Brian;"));
}

#[test]
fn test_loop_names() {
    let mut dummy = engine_with(&[(
        "page.tpl",
        "{loop b}{/loop}{loop a}{/loop}{loop c}{/loop}",
    )]);
    dummy.get("page.tpl").unwrap();

    assert_eq!(dummy.loop_names().unwrap(), vec!["a", "b", "c"]);
    dummy.assign_loop("b", &[]).unwrap();
    assert_eq!(dummy.loop_names().unwrap(), vec!["a", "c"]);
}

#[test]
fn test_loop_assigned_twice_second_time_is_unknown() {
    let mut dummy = engine_with(&[("page.tpl", "{loop a}{:x}{/loop}")]);
    dummy.get("page.tpl").unwrap();

    assert!(dummy.assign_loop("a", &[Record::from([("x", "1")])]).unwrap());
    assert!(!dummy.assign_loop("a", &[Record::from([("x", "2")])]).unwrap());
    assert_eq!(dummy.resolved(), Some("1"));
}

#[test]
fn test_identical_loop_blocks_are_assigned_in_turn() {
    let mut dummy = engine_with(&[("page.tpl", "{loop a}<{:x}>{/loop}|{loop a}<{:x}>{/loop}")]);
    dummy.get("page.tpl").unwrap();

    assert!(dummy.assign_loop("a", &[Record::from([("x", "1")])]).unwrap());
    assert_eq!(dummy.resolved(), Some("<1>|{loop a}<{:x}>{/loop}"));
    assert_eq!(dummy.loop_names().unwrap(), vec!["a"]);

    assert!(dummy.assign_loop("a", &[Record::from([("x", "2")])]).unwrap());
    assert_eq!(dummy.resolved(), Some("<1>|<2>"));
    assert!(dummy.loop_names().unwrap().is_empty());
}

#[test]
fn test_missing_field_renders_empty_by_default() {
    let block = "{loop artists}{:name}/{:instrument};{/loop}";
    let records = [
        Record::from([("name", "Freddie"), ("instrument", "piano")]),
        Record::from([("name", "Roger")]),
    ];

    assert_eq!(
        render_loop(block, &records, MissingFieldPolicy::Empty),
        "Freddie/piano;Roger/;"
    );
}

#[test]
fn test_missing_field_literal_policy() {
    let block = "{loop artists}{:name}/{:instrument};{/loop}";
    let records = [Record::from([("name", "Roger")])];

    assert_eq!(
        render_loop(block, &records, MissingFieldPolicy::Literal),
        "Roger/{:instrument};"
    );
}

#[test]
fn test_literal_policy_through_engine_options() {
    let loader = MemoryLoader::new().with("page.tpl", "{loop a}{:x}{:y}{/loop}");
    let options = EngineOptions {
        missing_field: MissingFieldPolicy::Literal,
        ..EngineOptions::default()
    };
    let mut dummy = Dummy::with_options(loader, options);
    dummy.get("page.tpl").unwrap();

    dummy.assign_loop("a", &[Record::from([("x", "1")])]).unwrap();
    assert_eq!(dummy.resolved(), Some("1{:y}"));
}

#[test]
fn test_record_values_are_not_rescanned() {
    let block = "{loop a}{:x}|{:y}{/loop}";
    let records = [Record::from([("x", "{:y}"), ("y", "why")])];

    assert_eq!(
        render_loop(block, &records, MissingFieldPolicy::Empty),
        "{:y}|why"
    );
}

#[test]
fn test_extra_record_fields_are_ignored() {
    let block = "{loop a}{:x}{/loop}";
    let records = [Record::from([("x", "1"), ("unused", "2")])];
    assert_eq!(render_loop(block, &records, MissingFieldPolicy::Empty), "1");
}

#[test]
fn test_loop_fields() {
    assert_eq!(loop_fields("{:foo} bla {:bar} {:foo}"), vec!["foo", "bar"]);
    assert!(loop_fields("no fields {here}").is_empty());
}

#[test]
fn test_inner_pattern_keeps_plain_placeholders() {
    assert_eq!(
        loop_inner_pattern("{loop a}{title}: {:x}{/loop}"),
        "{title}: {:x}"
    );
}
