//! Edge case tests for nice-dom
//!
//! Light-DOM mutation reporting, listener scoping and deferred work.

use nice_dom::{
    Document, EventLoop, EventType, LightDom, MutationObserverInit, MutationType, OptGroupSource,
    OptionFlag, OptionSource, SourceNode,
};

fn observed_light(document: &Document) -> LightDom {
    let host = document.create_node_id();
    let mut light = LightDom::new(host, document.node_ids());
    light.observe(MutationObserverInit::everything());
    light
}

#[test]
fn test_nested_option_changes_are_subtree_records() {
    let document = Document::new();
    let mut light = observed_light(&document);
    let group = light.append(SourceNode::optgroup(OptGroupSource::new("G")));
    let option = light.append_to(group, SourceNode::option(OptionSource::new("A"))).unwrap();
    light.take_records();

    light.set_option_flag(option, OptionFlag::Disabled, true);
    light.set_option_text(option, "B");

    let records = light.take_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].mutation_type, MutationType::Attributes);
    assert_eq!(records[0].attribute_name.as_deref(), Some("disabled"));
    assert_eq!(records[1].mutation_type, MutationType::CharacterData);
    assert_eq!(records[1].old_value.as_deref(), Some("A"));
}

#[test]
fn test_subtree_disabled_only_sees_host() {
    let document = Document::new();
    let host = document.create_node_id();
    let mut light = LightDom::new(host, document.node_ids());
    light.observe(MutationObserverInit {
        child_list: true,
        attributes: true,
        ..Default::default()
    });

    let option = light.append(SourceNode::option(OptionSource::new("A")));
    light.set_option_flag(option, OptionFlag::Selected, true);

    let records = light.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].mutation_type, MutationType::ChildList);
}

#[test]
fn test_attribute_filter() {
    let document = Document::new();
    let host = document.create_node_id();
    let mut light = LightDom::new(host, document.node_ids());
    light.observe(MutationObserverInit {
        attribute_filter: Some(vec!["selected".to_string()]),
        ..MutationObserverInit::everything()
    });

    let option = light.append(SourceNode::option(OptionSource::new("A")));
    light.take_records();
    light.set_option_flag(option, OptionFlag::Hidden, true);
    light.set_option_flag(option, OptionFlag::Selected, true);

    let records = light.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].attribute_name.as_deref(), Some("selected"));
}

#[test]
fn test_unchanged_flag_reports_nothing() {
    let document = Document::new();
    let mut light = observed_light(&document);
    let option = light.append(SourceNode::option(OptionSource::new("A").selected()));
    light.take_records();

    assert!(!light.set_option_flag(option, OptionFlag::Selected, true));
    assert!(light.take_records().is_empty());
}

#[test]
fn test_ids_never_collide() {
    let document = Document::new();
    let mut light = observed_light(&document);
    let other = document.create_node_id();

    let ids = light.replace_children(vec![
        SourceNode::option(OptionSource::new("A")),
        SourceNode::optgroup(OptGroupSource::new("G").with_option(OptionSource::new("B"))),
    ]);

    assert!(!ids.contains(&other));
    assert!(!ids.contains(&light.host()));
    let nested = light.options()[1].0;
    assert!(!ids.contains(&nested));
}

#[test]
fn test_remove_missing_node() {
    let document = Document::new();
    let mut light = observed_light(&document);
    assert!(light.remove(document.create_node_id()).is_none());
    assert!(light.take_records().is_empty());
}

#[test]
fn test_listener_outlives_document() {
    let handle = {
        let document = Document::new();
        let host = document.create_node_id();
        document.add_event_listener(EventType::KeyDown, host)
    };
    assert!(!handle.is_live());
    drop(handle);
}

#[test]
fn test_listeners_are_per_event() {
    let document = Document::new();
    let host = document.create_node_id();
    let click = document.add_event_listener(EventType::Click, host);
    let _key = document.add_event_listener(EventType::KeyDown, host);

    assert_eq!(document.listeners(EventType::Click), vec![host]);
    drop(click);
    assert_eq!(document.listener_count(EventType::Click), 0);
    assert_eq!(document.listener_count(EventType::KeyDown), 1);
}

#[test]
fn test_cleared_timer_never_fires() {
    let mut event_loop = EventLoop::new();
    let first = event_loop.set_timeout("first", 10);
    event_loop.set_timeout("second", 10);

    assert!(event_loop.clear_timer(first));
    assert!(!event_loop.clear_timer(first));
    assert_eq!(event_loop.tick(10), vec!["second"]);
    assert!(event_loop.tick(100).is_empty());
}

#[test]
fn test_frames_requested_during_frame_wait() {
    let mut event_loop = EventLoop::new();
    event_loop.request_animation_frame(1);

    let tasks = event_loop.take_frame_callbacks();
    event_loop.request_animation_frame(2);

    assert_eq!(tasks, vec![1]);
    assert_eq!(event_loop.take_frame_callbacks(), vec![2]);
}
