use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::nav::View;
use crate::warp::Motion;

pub const REVEAL_CLASS: &str = "reveal";
pub const REVEALED_CLASS: &str = "revealed";
pub const STAGGER_MS: u32 = 100;
/// Groups start revealing when their first element crosses 88% of the viewport.
const ROOT_MARGIN: &str = "0px 0px -12% 0px";
const GROUP_ATTR: &str = "data-reveal-group";

/// Whether an element is already inside the visible part of the viewport.
pub fn in_view(top: f64, height: f64, viewport_height: f64) -> bool {
    top < viewport_height * 0.9 && top > -height
}

pub fn stagger_delay_ms(index_in_group: usize) -> u32 {
    STAGGER_MS.saturating_mul(index_in_group as u32)
}

/// Buckets items by a key, preserving first-seen order of keys and items.
pub fn group_by_parent<T, K: PartialEq>(items: Vec<T>, key: impl Fn(&T) -> Option<K>) -> Vec<Vec<T>> {
    let mut keys: Vec<Option<K>> = Vec::new();
    let mut groups: Vec<Vec<T>> = Vec::new();
    for item in items {
        let k = key(&item);
        match keys.iter().position(|existing| *existing == k) {
            Some(i) => groups[i].push(item),
            None => {
                keys.push(k);
                groups.push(vec![item]);
            }
        }
    }
    groups
}

struct ActivePass {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

/// Scroll-triggered reveal of `.reveal` elements in the active section.
pub struct ScrollReveal {
    motion: Motion,
    pass: RefCell<Option<ActivePass>>,
}

impl ScrollReveal {
    pub fn new(motion: Motion) -> Self {
        Self {
            motion,
            pass: RefCell::new(None),
        }
    }

    pub fn trigger(&self, view: View) {
        if let Some(previous) = self.pass.borrow_mut().take() {
            previous.observer.disconnect();
        }
        let Some(document) = window().and_then(|w| w.document()) else {
            return;
        };

        if self.motion == Motion::Unavailable {
            if let Some(root) = document.document_element() {
                for element in query_all(&root, &format!(".{}", REVEAL_CLASS)) {
                    let _ = element.class_list().add_1(REVEALED_CLASS);
                }
            }
            return;
        }

        let Some(page) = document.get_element_by_id(&view.element_id()) else {
            return;
        };
        let elements = query_all(&page, &format!(".{}", REVEAL_CLASS));
        let groups = Rc::new(group_by_parent(elements, |el| el.parent_element()));

        for (group_index, group) in groups.iter().enumerate() {
            for (i, element) in group.iter().enumerate() {
                let _ = element.class_list().remove_1(REVEALED_CLASS);
                if let Some(html) = element.dyn_ref::<HtmlElement>() {
                    let _ = html
                        .style()
                        .set_property("transition-delay", &format!("{}ms", stagger_delay_ms(i)));
                }
            }
            let _ = group[0].set_attribute(GROUP_ATTR, &group_index.to_string());
        }

        let callback = {
            let groups = Rc::clone(&groups);
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        observer.unobserve(&target);
                        let group = target
                            .get_attribute(GROUP_ATTR)
                            .and_then(|i| i.parse::<usize>().ok())
                            .and_then(|i| groups.get(i));
                        for element in group.into_iter().flatten() {
                            let _ = element.class_list().add_1(REVEALED_CLASS);
                        }
                    }
                },
            )
        };

        let options = IntersectionObserverInit::new();
        options.set_root_margin(ROOT_MARGIN);
        let observer = match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable, revealing everything: {:?}", e);
                for element in groups.iter().flatten() {
                    let _ = element.class_list().add_1(REVEALED_CLASS);
                }
                return;
            }
        };
        for group in groups.iter() {
            observer.observe(&group[0]);
        }

        let viewport_height = window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        for element in groups.iter().flatten() {
            let rect = element.get_bounding_client_rect();
            if in_view(rect.top(), rect.height(), viewport_height) {
                let _ = element.class_list().add_1(REVEALED_CLASS);
            }
        }

        *self.pass.borrow_mut() = Some(ActivePass {
            observer,
            _callback: callback,
        });
    }
}

fn query_all(parent: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_near_the_top_are_in_view() {
        assert!(in_view(100.0, 50.0, 800.0));
        assert!(in_view(-20.0, 50.0, 800.0));
        assert!(!in_view(720.0, 50.0, 800.0));
        assert!(!in_view(-60.0, 50.0, 800.0));
    }

    #[test]
    fn stagger_grows_by_a_hundred_ms() {
        assert_eq!(stagger_delay_ms(0), 0);
        assert_eq!(stagger_delay_ms(3), 300);
    }

    #[test]
    fn grouping_keeps_siblings_together_in_order() {
        let items = vec![("a", 1), ("b", 2), ("c", 1), ("d", 3), ("e", 2)];
        let groups = group_by_parent(items, |(_, parent)| Some(*parent));
        let names: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.iter().map(|(name, _)| *name).collect())
            .collect();
        assert_eq!(names, vec![vec!["a", "c"], vec!["b", "e"], vec!["d"]]);
    }
}
