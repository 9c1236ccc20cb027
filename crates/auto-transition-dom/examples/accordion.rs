//! Accordion example
//!
//! Collapses and expands an accordion body inside a panel and logs the
//! heights frame by frame.
//!
//! Run with `RUST_LOG=info cargo run --example accordion`; `RUST_LOG=trace`
//! also shows the style writes and transition events.

use std::time::Duration;

use auto_transition::{height_from_auto, height_to_auto, Dimension, TransitionOptions};
use auto_transition_dom::{Document, Element};

const FRAME: Duration = Duration::from_millis(16);

fn log_frames(doc: &Document, panel: &Element, body: &Element) {
    let mut frame = 0;
    while doc.has_active_transitions() && frame < 120 {
        doc.advance(FRAME);
        frame += 1;
        log::info!(
            "t={:>4}ms  body={:>7.2}px  panel={:>7.2}px",
            doc.now().as_millis(),
            body.rendered_size(Dimension::Height),
            panel.rendered_size(Dimension::Height),
        );
    }
}

fn main() {
    env_logger::init();

    let doc = Document::new();
    let panel = doc.create_element();
    panel.set_content_size(320.0, 32.0);
    let body = doc.create_element();
    body.set_content_size(320.0, 180.0);
    panel.append_child(&body);
    doc.flush_styles();

    let options = TransitionOptions::new()
        .with_duration("250ms")
        .with_timing("ease-in-out");

    log::info!("collapsing");
    height_from_auto(
        &body,
        None,
        &options,
        Some(Box::new(|| log::info!("collapsed"))),
    );
    doc.flush_styles();
    log_frames(&doc, &panel, &body);

    log::info!("expanding");
    height_to_auto(&body, &options, Some(Box::new(|| log::info!("expanded"))));
    doc.flush_styles();
    log_frames(&doc, &panel, &body);
}
