use std::cell::Cell;
use std::rc::Rc;

use super::bus::{PageChange, PageChangeBus};
use super::view::View;
use crate::warp::sequencer::Transition;

/// Addressable location of the page.
pub trait HistoryPort {
    /// Current location fragment, including the leading `#` when present.
    fn fragment(&self) -> String;
    /// Adds a history entry for `view`.
    fn push(&self, view: View);
}

/// Where the current view gets projected.
pub trait ViewSurface {
    fn highlight(&self, view: View);
    /// Makes `view` the only visible section.
    fn display(&self, view: View);
    fn scroll_to_top(&self);
    /// Runs `then` once the newly displayed section has had a frame to lay out.
    fn after_layout(&self, then: Box<dyn FnOnce()>);
    fn reveal(&self, view: View);
}

/// Owns "which section is visible" and keeps history in sync with it.
pub struct ViewRouter {
    current: Cell<View>,
    history: Rc<dyn HistoryPort>,
    surface: Rc<dyn ViewSurface>,
    transition: Rc<dyn Transition>,
    bus: Rc<PageChangeBus>,
}

impl ViewRouter {
    pub fn new(
        history: Rc<dyn HistoryPort>,
        surface: Rc<dyn ViewSurface>,
        transition: Rc<dyn Transition>,
        bus: Rc<PageChangeBus>,
    ) -> Rc<Self> {
        Rc::new(Self {
            current: Cell::new(View::default()),
            history,
            surface,
            transition,
            bus,
        })
    }

    #[cfg(test)]
    pub fn current(&self) -> View {
        self.current.get()
    }

    pub fn resolve_current_token(&self) -> View {
        View::from_fragment(&self.history.fragment())
    }

    /// First paint: no transition.
    pub fn start(self: &Rc<Self>) {
        let view = self.resolve_current_token();
        log::info!("router starting on {}", view.token());
        self.show(view.token(), false);
    }

    /// Unknown tokens are ignored on purpose: stale links degrade to a no-op.
    pub fn show(self: &Rc<Self>, token: &str, animate: bool) {
        let Some(view) = View::from_token(token) else {
            log::debug!("ignoring unknown view token {:?}", token);
            return;
        };

        self.surface.highlight(view);

        if animate {
            let router = Rc::clone(self);
            self.transition.transition(Box::new(move || router.swap(view)));
        } else {
            self.swap(view);
        }
    }

    /// Handles activation of an element carrying a view token.
    /// Returns whether the default link behaviour should be suppressed.
    pub fn handle_link(self: &Rc<Self>, token: &str) -> bool {
        let Some(view) = View::from_token(token) else {
            return false;
        };
        self.history.push(view);
        self.show(view.token(), true);
        true
    }

    /// Back/forward navigation plays the same transition as a click.
    pub fn handle_history_navigation(self: &Rc<Self>) {
        let view = self.resolve_current_token();
        self.show(view.token(), true);
    }

    fn swap(&self, view: View) {
        self.current.set(view);
        self.surface.display(view);
        self.surface.scroll_to_top();

        let surface = Rc::clone(&self.surface);
        let bus = Rc::clone(&self.bus);
        self.surface.after_layout(Box::new(move || {
            surface.reveal(view);
            bus.publish(PageChange { view });
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::warp::context::WarpContext;
    use crate::warp::sequencer::{Motion, TransitionSequencer};

    #[derive(Default)]
    struct FakeHistory {
        entries: RefCell<Vec<String>>,
    }

    impl FakeHistory {
        fn at(fragment: &str) -> Rc<Self> {
            let history = Self::default();
            history.entries.borrow_mut().push(fragment.to_string());
            Rc::new(history)
        }

        fn back(&self) {
            self.entries.borrow_mut().pop();
        }

        fn len(&self) -> usize {
            self.entries.borrow().len()
        }
    }

    impl HistoryPort for FakeHistory {
        fn fragment(&self) -> String {
            self.entries.borrow().last().cloned().unwrap_or_default()
        }

        fn push(&self, view: View) {
            self.entries.borrow_mut().push(view.fragment());
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Highlight(View),
        Display(View, f64),
        ScrollTop,
        Reveal(View),
    }

    /// Records DOM mutations, and the overlay opacity seen at display time.
    struct FakeSurface {
        events: RefCell<Vec<Event>>,
        shown: RefCell<HashMap<View, bool>>,
        deferred: RefCell<Vec<Box<dyn FnOnce()>>>,
        sequencer: RefCell<Option<Rc<TransitionSequencer>>>,
    }

    impl FakeSurface {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                events: RefCell::new(Vec::new()),
                // Before the router runs every section is still in the page.
                shown: RefCell::new(View::ALL.into_iter().map(|v| (v, true)).collect()),
                deferred: RefCell::new(Vec::new()),
                sequencer: RefCell::new(None),
            })
        }

        fn next_frame(&self) {
            let pending: Vec<_> = self.deferred.borrow_mut().drain(..).collect();
            for then in pending {
                then();
            }
        }

        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        fn visible(&self) -> Vec<View> {
            View::ALL
                .into_iter()
                .filter(|v| self.shown.borrow().get(v).copied().unwrap_or(false))
                .collect()
        }
    }

    impl ViewSurface for FakeSurface {
        fn highlight(&self, view: View) {
            self.events.borrow_mut().push(Event::Highlight(view));
        }

        fn display(&self, view: View) {
            let overlay = self
                .sequencer
                .borrow()
                .as_ref()
                .map(|seq| seq.frame().overlay_opacity)
                .unwrap_or(0.0);
            self.events.borrow_mut().push(Event::Display(view, overlay));
            for (section, shown) in self.shown.borrow_mut().iter_mut() {
                *shown = section.active_class(view).is_some();
            }
        }

        fn scroll_to_top(&self) {
            self.events.borrow_mut().push(Event::ScrollTop);
        }

        fn after_layout(&self, then: Box<dyn FnOnce()>) {
            self.deferred.borrow_mut().push(then);
        }

        fn reveal(&self, view: View) {
            self.events.borrow_mut().push(Event::Reveal(view));
        }
    }

    struct Harness {
        router: Rc<ViewRouter>,
        history: Rc<FakeHistory>,
        surface: Rc<FakeSurface>,
        sequencer: Rc<TransitionSequencer>,
        changes: Rc<RefCell<Vec<View>>>,
    }

    impl Harness {
        fn new(fragment: &str, motion: Motion) -> Self {
            let history = FakeHistory::at(fragment);
            let surface = FakeSurface::new();
            let sequencer = Rc::new(TransitionSequencer::new(motion, Rc::new(WarpContext::new())));
            *surface.sequencer.borrow_mut() = Some(Rc::clone(&sequencer));
            let bus = Rc::new(PageChangeBus::new());
            let changes = Rc::new(RefCell::new(Vec::new()));
            {
                let changes = Rc::clone(&changes);
                bus.subscribe(move |change| changes.borrow_mut().push(change.view));
            }
            let router = ViewRouter::new(
                history.clone(),
                surface.clone(),
                sequencer.clone(),
                bus,
            );
            Self {
                router,
                history,
                surface,
                sequencer,
                changes,
            }
        }

        fn finish_transition(&self) {
            let mut now = 0.0;
            while !self.sequencer.is_idle() {
                self.sequencer.tick(now);
                now += 16.0;
            }
            self.surface.next_frame();
        }
    }

    #[test]
    fn empty_fragment_starts_on_home_without_overlay() {
        let h = Harness::new("", Motion::Available);
        assert_eq!(h.router.resolve_current_token(), View::Home);

        h.router.start();

        assert!(h.sequencer.is_idle());
        assert_eq!(
            h.surface.events(),
            vec![
                Event::Highlight(View::Home),
                Event::Display(View::Home, 0.0),
                Event::ScrollTop,
            ]
        );
        assert_eq!(h.router.current(), View::Home);
    }

    #[test]
    fn startup_honours_a_deep_link() {
        let h = Harness::new("#web3d", Motion::Available);
        h.router.start();
        assert_eq!(h.router.current(), View::Web3d);
        assert_eq!(h.surface.visible(), vec![View::Web3d]);
    }

    #[test]
    fn unknown_token_changes_nothing() {
        let h = Harness::new("", Motion::Available);
        h.router.start();
        h.surface.next_frame();
        let before = h.surface.events();

        h.router.show("precios", true);
        h.router.show("", false);

        assert_eq!(h.router.current(), View::Home);
        assert_eq!(h.surface.events(), before);
        assert!(h.sequencer.is_idle());
    }

    #[test]
    fn show_without_animation_leaves_exactly_one_view_visible() {
        let h = Harness::new("", Motion::Available);
        assert_eq!(h.surface.visible().len(), View::ALL.len());
        for view in View::ALL.into_iter().rev() {
            h.router.show(view.token(), false);
            assert_eq!(h.surface.visible(), vec![view]);
            assert_eq!(h.router.current(), view);
        }
        h.router.show("precios", false);
        assert_eq!(h.surface.visible(), vec![View::Home]);
    }

    #[test]
    fn link_activation_pushes_history_and_swaps_behind_the_overlay() {
        let h = Harness::new("", Motion::Available);
        h.router.start();
        h.surface.next_frame();

        assert!(h.router.handle_link("automatizacion"));
        assert_eq!(h.history.len(), 2);
        assert_eq!(h.history.fragment(), "#automatizacion");
        // Links highlight at once, the section flips at the midpoint.
        assert_eq!(h.surface.events().last(), Some(&Event::Highlight(View::Automatizacion)));
        assert_eq!(h.router.current(), View::Home);

        h.finish_transition();

        let events = h.surface.events();
        assert!(events.contains(&Event::Display(View::Automatizacion, 1.0)));
        assert_eq!(events.last(), Some(&Event::Reveal(View::Automatizacion)));
        assert_eq!(h.router.current(), View::Automatizacion);
        assert_eq!(*h.changes.borrow(), vec![View::Home, View::Automatizacion]);
    }

    #[test]
    fn unknown_link_is_not_intercepted() {
        let h = Harness::new("", Motion::Available);
        assert!(!h.router.handle_link("blog"));
        assert_eq!(h.history.len(), 1);
    }

    #[test]
    fn back_navigation_restores_the_previous_view() {
        let h = Harness::new("#web3d", Motion::Available);
        h.router.start();

        h.router.handle_link("ia-media");
        h.finish_transition();
        assert_eq!(h.router.current(), View::IaMedia);

        h.history.back();
        h.router.handle_history_navigation();
        assert!(!h.sequencer.is_idle());
        h.finish_transition();

        assert_eq!(h.router.current(), View::Web3d);
    }

    #[test]
    fn home_link_uses_the_bare_address() {
        let h = Harness::new("#web3d", Motion::Available);
        h.router.start();
        h.router.handle_link("home");
        assert_eq!(h.history.fragment(), "");
    }

    #[test]
    fn without_motion_navigation_is_immediate() {
        let h = Harness::new("", Motion::Unavailable);
        h.router.start();
        h.router.handle_link("web3d");
        assert_eq!(h.router.current(), View::Web3d);
        h.surface.next_frame();
        assert_eq!(*h.changes.borrow(), vec![View::Home, View::Web3d]);
    }
}
