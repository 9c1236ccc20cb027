//! Headless document: an element tree with inline styles, a virtual clock and
//! CSS transitions driven frame by frame.
//!
//! Style changes are committed on style recalculation, which happens on a
//! computed-size read, on a layout flush, and at the start of every
//! [`Document::advance`]. A transition starts only when a committed pixel value
//! changes to another pixel value while `transition` names the property. `auto`
//! on either side snaps, the same as in a browser.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use auto_transition::{
    Dimension, ListenerControl, ListenerId, StyleProperty, StyledElement, TransitionEndEvent,
    TransitionEndHandler,
};

use crate::layout::{stacked_size, IntrinsicSize, LengthValue};
use crate::style::{InlineStyle, StyleMutation};
use crate::transition::{parse_transition_list, spec_for, RunningTransition, TransitionSpec};

const DIMENSIONS: [Dimension; 2] = [Dimension::Width, Dimension::Height];

const fn slot(dimension: Dimension) -> usize {
    match dimension {
        Dimension::Width => 0,
        Dimension::Height => 1,
    }
}

/// Identifier of an element within its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

struct ElementData {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    connected: bool,
    inline: InlineStyle,
    /// Cascaded non-inline declarations (stylesheet rules)
    sheet: HashMap<StyleProperty, String>,
    content: IntrinsicSize,
    /// Specified size as of the last style recalculation
    committed: [LengthValue; 2],
    running: [Option<RunningTransition>; 2],
    listeners: Vec<(ListenerId, TransitionEndHandler<Element>)>,
    /// Listeners taken out by an ongoing dispatch
    dispatching: Vec<ListenerId>,
    /// Listeners removed while `dispatching` them
    removed: Vec<ListenerId>,
}

impl ElementData {
    fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            connected: true,
            inline: InlineStyle::new(),
            sheet: HashMap::new(),
            content: IntrinsicSize::zero(),
            committed: [LengthValue::Auto; 2],
            running: [None, None],
            listeners: Vec::new(),
            dispatching: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Inline value if set, otherwise the stylesheet value
    fn specified(&self, property: StyleProperty) -> &str {
        match self.inline.get(property) {
            "" => self.sheet.get(&property).map(String::as_str).unwrap_or(""),
            value => value,
        }
    }

    fn specified_length(&self, dimension: Dimension) -> LengthValue {
        LengthValue::parse(self.specified(dimension.style_property())).unwrap_or_default()
    }

    fn transition_specs(&self) -> Vec<TransitionSpec> {
        parse_transition_list(self.specified(StyleProperty::Transition)).unwrap_or_default()
    }
}

struct DocumentInner {
    elements: Vec<ElementData>,
    /// Virtual time in seconds
    now: f64,
    layout_flushes: usize,
    next_listener: u64,
}

impl DocumentInner {
    fn new() -> Self {
        Self {
            elements: Vec::new(),
            now: 0.0,
            layout_flushes: 0,
            next_listener: 0,
        }
    }

    fn element(&self, id: ElementId) -> &ElementData {
        &self.elements[id.0]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut ElementData {
        &mut self.elements[id.0]
    }

    /// Size currently on screen: the animated value if transitioning
    fn rendered_size(&self, id: ElementId, dimension: Dimension) -> f64 {
        let element = self.element(id);
        if let Some(running) = &element.running[slot(dimension)] {
            return running.value_at(self.now);
        }
        match element.committed[slot(dimension)] {
            LengthValue::Px(px) => px,
            LengthValue::Auto => self.natural_size(id, dimension),
        }
    }

    /// Size the element takes at `auto`
    fn natural_size(&self, id: ElementId, dimension: Dimension) -> f64 {
        let element = self.element(id);
        let children = element
            .children
            .iter()
            .filter(|child| self.element(**child).connected)
            .map(|child| self.rendered_size(*child, dimension));
        stacked_size(dimension, element.content, children)
    }

    /// Commit pending style changes, starting or cancelling transitions
    fn recalc_style(&mut self) {
        for idx in 0..self.elements.len() {
            let id = ElementId(idx);
            if !self.element(id).connected {
                continue;
            }
            let transitions = self.element(id).transition_specs();
            for dimension in DIMENSIONS {
                self.update_dimension(id, dimension, &transitions);
            }
        }
    }

    fn update_dimension(
        &mut self,
        id: ElementId,
        dimension: Dimension,
        transitions: &[TransitionSpec],
    ) {
        let slot = slot(dimension);
        let now = self.now;
        let before = self.rendered_size(id, dimension);
        let spec = spec_for(transitions, dimension.as_str())
            .filter(|spec| spec.is_animated())
            .cloned();

        let element = self.element_mut(id);
        let specified = element.specified_length(dimension);
        let was_running = element.running[slot].is_some();

        if specified == element.committed[slot] {
            if was_running && spec.is_none() {
                log::trace!("{:?}: {} transition cancelled, no longer transitioned", id, dimension);
                element.running[slot] = None;
            }
            return;
        }

        // auto is not interpolable; an in-flight value always is
        let interpolable =
            (was_running || !element.committed[slot].is_auto()) && !specified.is_auto();
        element.committed[slot] = specified;
        element.running[slot] = None;

        match (spec, specified) {
            (Some(spec), LengthValue::Px(to)) if interpolable && before != to => {
                log::trace!(
                    "{:?}: {} transition {}px -> {}px over {}s (delay {}s)",
                    id,
                    dimension,
                    before,
                    to,
                    spec.duration,
                    spec.delay
                );
                element.running[slot] = Some(RunningTransition {
                    dimension,
                    from: before,
                    to,
                    start_time: now,
                    duration: spec.duration,
                    delay: spec.delay,
                    timing: spec.timing,
                });
            }
            _ => {
                if was_running {
                    log::trace!("{:?}: {} transition cancelled by snap", id, dimension);
                }
            }
        }
    }

    /// Drop finished transitions and return their transition-end events
    fn finish_transitions(&mut self) -> Vec<(ElementId, TransitionEndEvent)> {
        let now = self.now;
        let mut events = Vec::new();

        for (idx, element) in self.elements.iter_mut().enumerate() {
            for running in element.running.iter_mut() {
                let finished = running
                    .as_ref()
                    .is_some_and(|running| running.is_finished(now));
                if !finished {
                    continue;
                }
                if let Some(done) = running.take() {
                    log::trace!("{:?}: {} transition finished", ElementId(idx), done.dimension);
                    events.push((
                        ElementId(idx),
                        TransitionEndEvent::new(done.dimension.as_str(), done.duration),
                    ));
                }
            }
        }

        events
    }

    fn has_active_transitions(&self) -> bool {
        self.elements
            .iter()
            .any(|element| element.running.iter().any(Option::is_some))
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, mut id: ElementId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.element(id).parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Move a subtree into or out of the document
    ///
    /// Leaving cancels running transitions. Entering commits the specified
    /// sizes without transitioning, like a freshly inserted element.
    fn set_connected(&mut self, id: ElementId, connected: bool) {
        let element = self.element_mut(id);
        if element.connected == connected {
            return;
        }
        element.connected = connected;

        if connected {
            for dimension in DIMENSIONS {
                element.committed[slot(dimension)] = element.specified_length(dimension);
            }
        } else if element.running.iter().any(Option::is_some) {
            log::trace!("{:?}: removed, cancelling transitions", id);
        }
        element.running = [None, None];

        let children = element.children.clone();
        for child in children {
            self.set_connected(child, connected);
        }
    }
}

/// Run the transition-end listeners of `id` for `event`
///
/// Listeners are taken out of the document while they run so handlers may
/// mutate styles or subscribe again. Listeners added during dispatch are not
/// invoked for this event.
fn dispatch(inner: &Rc<RefCell<DocumentInner>>, id: ElementId, event: &TransitionEndEvent) {
    let (listeners, batch) = {
        let mut inner = inner.borrow_mut();
        let data = inner.element_mut(id);
        let listeners = std::mem::take(&mut data.listeners);
        let batch: Vec<ListenerId> = listeners
            .iter()
            .map(|(listener_id, _)| *listener_id)
            .collect();
        data.dispatching.extend_from_slice(&batch);
        (listeners, batch)
    };
    if listeners.is_empty() {
        return;
    }

    let element = Element {
        inner: inner.clone(),
        id,
    };

    let mut kept = Vec::with_capacity(listeners.len());
    for (listener_id, mut handler) in listeners {
        // Removed by an earlier handler of this dispatch
        if inner.borrow().element(id).removed.contains(&listener_id) {
            continue;
        }
        match handler(&element, event) {
            ListenerControl::Keep => kept.push((listener_id, handler)),
            ListenerControl::Remove => {
                log::trace!("{:?}: listener {:?} removed", id, listener_id)
            }
        }
    }

    let mut inner = inner.borrow_mut();
    let data = inner.element_mut(id);
    kept.retain(|(listener_id, _)| !data.removed.contains(listener_id));
    data.dispatching.retain(|listener_id| !batch.contains(listener_id));
    data.removed.retain(|listener_id| !batch.contains(listener_id));
    kept.append(&mut data.listeners);
    data.listeners = kept;
}

/// A headless document with a virtual clock
///
/// Cloning yields another handle to the same document.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DocumentInner::new())),
        }
    }

    /// Create a connected element with no parent
    pub fn create_element(&self) -> Element {
        let mut inner = self.inner.borrow_mut();
        let id = ElementId(inner.elements.len());
        inner.elements.push(ElementData::new());
        Element {
            inner: self.inner.clone(),
            id,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        Duration::from_secs_f64(self.inner.borrow().now)
    }

    /// Number of forced layouts so far
    pub fn layout_flushes(&self) -> usize {
        self.inner.borrow().layout_flushes
    }

    /// Commit pending style changes without advancing time
    pub fn flush_styles(&self) {
        self.inner.borrow_mut().recalc_style();
    }

    /// Check if any transition is in flight
    pub fn has_active_transitions(&self) -> bool {
        self.inner.borrow().has_active_transitions()
    }

    /// Render one frame: commit styles, move the clock by `dt`, and dispatch
    /// transition-end events for transitions that completed
    pub fn advance(&self, dt: Duration) {
        let events = {
            let mut inner = self.inner.borrow_mut();
            inner.recalc_style();
            inner.now += dt.as_secs_f64();
            inner.finish_transitions()
        };

        for (id, event) in events {
            dispatch(&self.inner, id, &event);
        }
    }

    /// Advance in steps of `frame` until no transition is running
    ///
    /// Returns the number of frames rendered (at most `max_frames`).
    pub fn run_until_idle(&self, frame: Duration, max_frames: usize) -> usize {
        let mut frames = 0;
        loop {
            self.flush_styles();
            if !self.has_active_transitions() || frames >= max_frames {
                return frames;
            }
            self.advance(frame);
            frames += 1;
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Document")
            .field("elements", &inner.elements.len())
            .field("now", &inner.now)
            .finish()
    }
}

/// Handle to an element of a [`Document`]
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<DocumentInner>>,
    id: ElementId,
}

impl Element {
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Append `child` as the last child, detaching it from any previous parent
    ///
    /// The child subtree takes over the connected state of `self`. Appending an
    /// element under itself or one of its descendants is rejected.
    pub fn append_child(&self, child: &Element) {
        if !Rc::ptr_eq(&self.inner, &child.inner) {
            log::warn!("cannot append {:?}: element belongs to another document", child.id);
            return;
        }

        let mut inner = self.inner.borrow_mut();
        if inner.is_ancestor_or_self(child.id, self.id) {
            log::warn!("cannot append {:?}: it contains {:?}", child.id, self.id);
            return;
        }

        if let Some(old_parent) = inner.element_mut(child.id).parent.take() {
            inner
                .element_mut(old_parent)
                .children
                .retain(|id| *id != child.id);
        }
        inner.element_mut(child.id).parent = Some(self.id);
        inner.element_mut(self.id).children.push(child.id);

        let connected = inner.element(self.id).connected;
        inner.set_connected(child.id, connected);
    }

    /// Detach from the parent and disconnect this subtree from the document
    ///
    /// Running transitions are cancelled; no transition-end events follow.
    pub fn remove(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(parent) = inner.element_mut(self.id).parent.take() {
            inner.element_mut(parent).children.retain(|id| *id != self.id);
        }
        inner.set_connected(self.id, false);
    }

    pub fn is_connected(&self) -> bool {
        self.inner.borrow().element(self.id).connected
    }

    /// Set the intrinsic content size (excluding children)
    pub fn set_content_size(&self, width: f64, height: f64) {
        self.inner.borrow_mut().element_mut(self.id).content = IntrinsicSize::new(width, height);
    }

    /// Set a stylesheet declaration, used when no inline value is set
    pub fn set_sheet_style(&self, property: StyleProperty, value: &str) {
        validate(property, value);
        let mut inner = self.inner.borrow_mut();
        let sheet = &mut inner.element_mut(self.id).sheet;
        if value.is_empty() {
            sheet.remove(&property);
        } else {
            sheet.insert(property, value.to_string());
        }
    }

    /// Size on screen as of the last style recalculation
    pub fn rendered_size(&self, dimension: Dimension) -> f64 {
        self.inner.borrow().rendered_size(self.id, dimension)
    }

    pub fn is_transitioning(&self, dimension: Dimension) -> bool {
        self.inner.borrow().element(self.id).running[slot(dimension)].is_some()
    }

    /// Number of registered transition-end listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().element(self.id).listeners.len()
    }

    /// Every inline style write so far, in order
    pub fn mutations(&self) -> Vec<StyleMutation> {
        self.inner.borrow().element(self.id).inline.mutations().to_vec()
    }

    /// Unsubscribe a transition-end listener
    ///
    /// Works from inside a handler too: a listener removed during a dispatch
    /// is not invoked for the rest of it. Returns `false` for unknown ids.
    pub fn remove_transition_end_listener(&self, listener: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let data = inner.element_mut(self.id);
        if let Some(pos) = data.listeners.iter().position(|(id, _)| *id == listener) {
            data.listeners.remove(pos);
            return true;
        }
        if data.dispatching.contains(&listener) && !data.removed.contains(&listener) {
            data.removed.push(listener);
            return true;
        }
        false
    }

    /// Dispatch a synthetic transition-end event to this element's listeners
    pub fn dispatch_transition_end(&self, event: TransitionEndEvent) {
        dispatch(&self.inner, self.id, &event);
    }

    fn recalc_and_measure(&self, dimension: Dimension, count_flush: bool) -> f64 {
        let mut inner = self.inner.borrow_mut();
        if count_flush {
            inner.layout_flushes += 1;
        }
        inner.recalc_style();
        inner.rendered_size(self.id, dimension)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) && self.id == other.id
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.id.0).finish()
    }
}

/// Warn about values the layout cannot resolve; they are still stored
fn validate(property: StyleProperty, value: &str) {
    let result = match property {
        StyleProperty::Width | StyleProperty::Height => LengthValue::parse(value).map(|_| ()),
        StyleProperty::Transition => parse_transition_list(value).map(|_| ()),
    };
    if let Err(err) = result {
        log::warn!("{}: {}; treated as {}", property, err, fallback_name(property));
    }
}

const fn fallback_name(property: StyleProperty) -> &'static str {
    match property {
        StyleProperty::Width | StyleProperty::Height => "auto",
        StyleProperty::Transition => "none",
    }
}

impl StyledElement for Element {
    fn style(&self, property: StyleProperty) -> String {
        self.inner
            .borrow()
            .element(self.id)
            .inline
            .get(property)
            .to_string()
    }

    fn set_style(&self, property: StyleProperty, value: &str) {
        validate(property, value);
        self.inner
            .borrow_mut()
            .element_mut(self.id)
            .inline
            .set(property, value);
    }

    fn computed_size(&self, dimension: Dimension) -> f64 {
        self.recalc_and_measure(dimension, false)
    }

    fn flush_layout(&self, dimension: Dimension) -> f64 {
        self.recalc_and_measure(dimension, true)
    }

    fn add_transition_end_listener(&self, handler: TransitionEndHandler<Self>) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        inner.element_mut(self.id).listeners.push((id, handler));
        id
    }
}
