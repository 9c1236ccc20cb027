//! Transitions between fixed sizes and intrinsic (`auto`) sizes.
//!
//! `auto` is not an animatable value, so the element is measured at `auto`,
//! restored, and then animated between concrete pixel lengths. A layout flush
//! sits between the restore and the animated write so the host cannot coalesce
//! them into a single style change.

use crate::dimension::{Dimension, StyleProperty, AUTO};
use crate::element::{ListenerControl, StyledElement, TransitionEndEvent};
use crate::options::{resolve_length, CssLength, OptionValue, TransitionOptions};

/// Completion callback, run once when the transition finishes
pub type Callback = Box<dyn FnOnce()>;

/// Animate `dimension` of `elem` from its current size to its natural size,
/// then leave the dimension at `auto`.
///
/// A transition-end listener is registered whether or not `callback` is given,
/// so the element always settles on `auto`.
pub fn dimension_to_auto<E: StyledElement>(
    dimension: Dimension,
    elem: &E,
    options: &TransitionOptions,
    callback: Option<Callback>,
) {
    let resolved = options.resolve();
    let property = dimension.style_property();

    // Measure at auto, then put the old value back.
    let previous = elem.style(property);
    elem.set_style(property, AUTO);
    let natural = CssLength::Px(elem.computed_size(dimension)).to_string();
    elem.set_style(property, &previous);
    elem.flush_layout(dimension);

    let transition = resolved.transition_value(dimension);
    elem.set_style(StyleProperty::Transition, &transition);
    elem.set_style(property, &natural);

    log::debug!(
        "{} to auto: '{}' -> {} ({})",
        dimension,
        previous,
        natural,
        transition
    );

    let mut callback = callback;
    elem.add_transition_end_listener(Box::new(
        move |elem: &E, event: &TransitionEndEvent| {
            if !dimension.matches(&event.property_name) {
                log::trace!(
                    "ignoring transitionend for '{}' while waiting on {}",
                    event.property_name,
                    dimension
                );
                return ListenerControl::Keep;
            }

            elem.set_style(StyleProperty::Transition, "");
            elem.set_style(property, AUTO);
            if let Some(callback) = callback.take() {
                callback();
            }
            ListenerControl::Remove
        },
    ));
}

/// Animate `dimension` of `elem` from its rendered size to `target`
/// (default `0px`).
///
/// The final style is left as is. A listener is only registered when a
/// `callback` is supplied.
pub fn dimension_from_auto<E: StyledElement>(
    dimension: Dimension,
    elem: &E,
    target: Option<&OptionValue>,
    options: &TransitionOptions,
    callback: Option<Callback>,
) {
    let (target, _) = resolve_length(target);
    let resolved = options.resolve();
    let property = dimension.style_property();

    // Pin the rendered size; transitions cannot start from auto.
    let current = CssLength::Px(elem.computed_size(dimension)).to_string();
    elem.set_style(property, &current);

    let transition = resolved.transition_value(dimension);
    elem.set_style(StyleProperty::Transition, &transition);
    elem.flush_layout(dimension);

    let target = target.to_string();
    elem.set_style(property, &target);

    log::debug!(
        "{} from auto: {} -> {} ({})",
        dimension,
        current,
        target,
        transition
    );

    let Some(callback) = callback else {
        return;
    };

    let mut callback = Some(callback);
    elem.add_transition_end_listener(Box::new(
        move |_elem: &E, event: &TransitionEndEvent| {
            if !dimension.matches(&event.property_name) {
                return ListenerControl::Keep;
            }

            if let Some(callback) = callback.take() {
                callback();
            }
            ListenerControl::Remove
        },
    ));
}

/// Animate the width of `elem` to its natural width, ending at `width: auto`
pub fn width_to_auto<E: StyledElement>(
    elem: &E,
    options: &TransitionOptions,
    callback: Option<Callback>,
) {
    dimension_to_auto(Dimension::Width, elem, options, callback)
}

/// Animate the height of `elem` to its natural height, ending at `height: auto`
pub fn height_to_auto<E: StyledElement>(
    elem: &E,
    options: &TransitionOptions,
    callback: Option<Callback>,
) {
    dimension_to_auto(Dimension::Height, elem, options, callback)
}

/// Animate the width of `elem` from its rendered width to `width`
/// (`None` means `0px`; numbers are pixels)
pub fn width_from_auto<E: StyledElement>(
    elem: &E,
    width: Option<OptionValue>,
    options: &TransitionOptions,
    callback: Option<Callback>,
) {
    dimension_from_auto(Dimension::Width, elem, width.as_ref(), options, callback)
}

/// Animate the height of `elem` from its rendered height to `height`
/// (`None` means `0px`; numbers are pixels)
pub fn height_from_auto<E: StyledElement>(
    elem: &E,
    height: Option<OptionValue>,
    options: &TransitionOptions,
    callback: Option<Callback>,
) {
    dimension_from_auto(Dimension::Height, elem, height.as_ref(), options, callback)
}
