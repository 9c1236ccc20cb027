use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use auto_transition::{
    height_from_auto, height_to_auto, width_from_auto, width_to_auto, Callback, Dimension,
    OptionValue, StyleProperty, StyledElement, TransitionEndEvent, TransitionOptions,
};
use auto_transition_dom::{Document, Element};

const FRAME: Duration = Duration::from_millis(16);

fn counter() -> (Rc<Cell<usize>>, Callback) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    (count, Box::new(move || inner.set(inner.get() + 1)))
}

fn element_with_content(doc: &Document, width: f64, height: f64) -> Element {
    let elem = doc.create_element();
    elem.set_content_size(width, height);
    elem
}

fn rounded(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Inline `transition` at the moment `dimension` was last written
fn transition_at_last_write(elem: &Element, dimension: Dimension) -> Option<String> {
    elem.mutations()
        .into_iter()
        .rev()
        .find(|m| m.property == dimension.style_property())
        .map(|m| m.transition)
}

#[test]
fn height_to_auto_scenario() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 100.0, 120.0);
    elem.set_style(StyleProperty::Height, "0px");
    doc.flush_styles();

    let (calls, callback) = counter();
    let options = TransitionOptions::new()
        .with_duration(0.5)
        .with_timing("linear")
        .with_delay(0);
    height_to_auto(&elem, &options, Some(callback));

    assert_eq!(elem.style(StyleProperty::Height), "120px");
    assert_eq!(
        transition_at_last_write(&elem, Dimension::Height).as_deref(),
        Some("height 0.5s linear 0s")
    );
    assert_eq!(doc.layout_flushes(), 1);

    doc.advance(Duration::from_millis(250));
    assert!(elem.is_transitioning(Dimension::Height));
    assert_eq!(rounded(elem.rendered_size(Dimension::Height)), 60.0);
    assert_eq!(calls.get(), 0);

    doc.advance(Duration::from_millis(250));
    assert_eq!(calls.get(), 1);
    assert_eq!(elem.style(StyleProperty::Height), "auto");
    assert_eq!(elem.style(StyleProperty::Transition), "");
    assert_eq!(elem.listener_count(), 0);

    doc.run_until_idle(FRAME, 10);
    assert_eq!(elem.rendered_size(Dimension::Height), 120.0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn to_auto_from_stylesheet_size_settles_on_auto() {
    for dimension in [Dimension::Width, Dimension::Height] {
        let doc = Document::new();
        let elem = element_with_content(&doc, 64.0, 48.0);
        elem.set_sheet_style(dimension.style_property(), "0px");
        doc.flush_styles();
        assert_eq!(elem.style(dimension.style_property()), "");

        match dimension {
            Dimension::Width => width_to_auto(&elem, &TransitionOptions::default(), None),
            Dimension::Height => height_to_auto(&elem, &TransitionOptions::default(), None),
        }
        let frames = doc.run_until_idle(FRAME, 100);

        assert!(frames > 0);
        assert_eq!(elem.style(dimension.style_property()), "auto");
        assert_eq!(elem.style(StyleProperty::Transition), "");
        assert_eq!(elem.listener_count(), 0);
    }
}

#[test]
fn to_auto_from_unset_auto_waits_for_finish_signal() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 64.0, 48.0);
    let (calls, callback) = counter();

    width_to_auto(&elem, &TransitionOptions::default(), Some(callback));
    doc.run_until_idle(FRAME, 100);

    // auto -> 64px is not animatable, so nothing finishes on its own
    assert_eq!(calls.get(), 0);
    assert_eq!(elem.style(StyleProperty::Width), "64px");
    assert_eq!(elem.listener_count(), 1);

    elem.dispatch_transition_end(TransitionEndEvent::new("width", 0.2));
    assert_eq!(calls.get(), 1);
    assert_eq!(elem.style(StyleProperty::Width), "auto");
    assert_eq!(elem.style(StyleProperty::Transition), "");
}

#[test]
fn width_from_auto_scenario() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 200.0, 20.0);
    doc.flush_styles();

    let (calls, callback) = counter();
    let options = TransitionOptions::new()
        .with_duration(1)
        .with_timing("ease-in")
        .with_delay("0.1s");
    width_from_auto(&elem, Some(OptionValue::from(50)), &options, Some(callback));

    assert_eq!(elem.style(StyleProperty::Width), "50px");
    assert_eq!(
        transition_at_last_write(&elem, Dimension::Width).as_deref(),
        Some("width 1s ease-in 0.1s")
    );

    doc.advance(Duration::from_millis(100));
    assert_eq!(elem.rendered_size(Dimension::Width), 200.0);

    doc.advance(Duration::from_millis(1000));
    assert_eq!(calls.get(), 1);
    assert_eq!(elem.style(StyleProperty::Width), "50px");
    assert_eq!(elem.rendered_size(Dimension::Width), 50.0);
    assert_eq!(elem.style(StyleProperty::Transition), "width 1s ease-in 0.1s");
}

#[test]
fn from_auto_defaults_to_zero() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 200.0, 20.0);

    width_from_auto(&elem, None, &TransitionOptions::default(), None);
    assert_eq!(elem.listener_count(), 0);

    doc.run_until_idle(FRAME, 100);
    assert_eq!(elem.style(StyleProperty::Width), "0px");
    assert_eq!(elem.rendered_size(Dimension::Width), 0.0);
}

#[test]
fn from_auto_then_to_auto_round_trip() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 80.0, 150.0);

    height_from_auto(&elem, None, &TransitionOptions::default(), None);
    doc.run_until_idle(FRAME, 100);
    assert_eq!(elem.rendered_size(Dimension::Height), 0.0);

    let (calls, callback) = counter();
    height_to_auto(&elem, &TransitionOptions::default(), Some(callback));
    doc.run_until_idle(FRAME, 100);

    assert_eq!(calls.get(), 1);
    assert_eq!(elem.style(StyleProperty::Height), "auto");
    assert_eq!(elem.rendered_size(Dimension::Height), 150.0);
}

#[test]
fn unrelated_transition_end_is_ignored() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 80.0, 90.0);
    elem.set_style(StyleProperty::Height, "0px");

    let (calls, callback) = counter();
    height_to_auto(&elem, &TransitionOptions::default(), Some(callback));

    elem.dispatch_transition_end(TransitionEndEvent::new("opacity", 0.3));
    elem.dispatch_transition_end(TransitionEndEvent::new("width", 0.2));

    assert_eq!(calls.get(), 0);
    assert_eq!(elem.style(StyleProperty::Height), "90px");
    assert_eq!(elem.style(StyleProperty::Transition), "height 0.2s ease 0s");
    assert_eq!(elem.listener_count(), 1);

    doc.run_until_idle(FRAME, 100);
    assert_eq!(calls.get(), 1);
    assert_eq!(elem.style(StyleProperty::Height), "auto");
}

#[test]
fn invalid_option_types_use_defaults() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 80.0, 90.0);
    elem.set_style(StyleProperty::Height, "0px");

    let options = TransitionOptions::new()
        .with_duration(true)
        .with_timing(2)
        .with_delay(OptionValue::Null);
    height_to_auto(&elem, &options, None);

    assert_eq!(elem.style(StyleProperty::Transition), "height 0.2s ease 0s");

    height_from_auto(&elem, Some(OptionValue::Bool(false)), &options, None);
    assert_eq!(elem.style(StyleProperty::Height), "0px");
}

#[test]
fn zero_duration_leaves_listener_pending() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 80.0, 90.0);
    elem.set_style(StyleProperty::Height, "0px");

    let (calls, callback) = counter();
    height_to_auto(&elem, &TransitionOptions::new().with_duration(0), Some(callback));
    doc.run_until_idle(FRAME, 100);

    assert_eq!(elem.rendered_size(Dimension::Height), 90.0);
    assert_eq!(elem.style(StyleProperty::Height), "90px");
    assert_eq!(calls.get(), 0);
    assert_eq!(elem.listener_count(), 1);
}

#[test]
fn removed_element_never_calls_back() {
    let doc = Document::new();
    let parent = doc.create_element();
    let elem = element_with_content(&doc, 80.0, 90.0);
    parent.append_child(&elem);
    elem.set_style(StyleProperty::Height, "0px");

    let (calls, callback) = counter();
    height_to_auto(&elem, &TransitionOptions::default(), Some(callback));
    doc.advance(FRAME);
    elem.remove();
    doc.run_until_idle(FRAME, 100);

    assert_eq!(calls.get(), 0);
    assert_eq!(elem.listener_count(), 1);
    assert_eq!(parent.computed_size(Dimension::Height), 0.0);
}

#[test]
fn stale_listener_reacts_to_a_later_transition() {
    let doc = Document::new();
    let elem = element_with_content(&doc, 80.0, 90.0);
    elem.set_style(StyleProperty::Height, "0px");

    let (expanded, expand_callback) = counter();
    let (collapsed, collapse_callback) = counter();
    height_to_auto(&elem, &TransitionOptions::default(), Some(expand_callback));
    doc.advance(FRAME);

    // Collapse before the expansion finished; both listeners watch "height"
    height_from_auto(&elem, None, &TransitionOptions::default(), Some(collapse_callback));
    assert_eq!(elem.listener_count(), 2);

    doc.run_until_idle(FRAME, 100);
    assert_eq!(expanded.get(), 1);
    assert_eq!(collapsed.get(), 1);
    assert_eq!(elem.listener_count(), 0);

    // The expansion's listener also reset the collapsed element to auto
    assert_eq!(elem.style(StyleProperty::Height), "auto");
    assert_eq!(elem.rendered_size(Dimension::Height), 90.0);
}

#[test]
fn parent_at_auto_follows_child_animation() {
    let doc = Document::new();
    let panel = element_with_content(&doc, 300.0, 40.0);
    let body = element_with_content(&doc, 300.0, 200.0);
    panel.append_child(&body);
    assert_eq!(panel.computed_size(Dimension::Height), 240.0);

    let options = TransitionOptions::new().with_duration(1).with_timing("linear");
    height_from_auto(&body, None, &options, None);
    doc.advance(Duration::from_millis(500));
    assert_eq!(rounded(panel.rendered_size(Dimension::Height)), 140.0);

    doc.run_until_idle(FRAME, 100);
    assert_eq!(panel.computed_size(Dimension::Height), 40.0);
}
