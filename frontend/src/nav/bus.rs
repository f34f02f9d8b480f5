use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageChange {
    pub view: View,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(&PageChange)>;

/// Observer list for "page changed" notifications.
///
/// Delivery is synchronous and follows registration order. Subscribers added
/// while a notification is being delivered only see the next one.
#[derive(Default)]
pub struct PageChangeBus {
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
}

impl PageChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, subscriber: impl Fn(&PageChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sub_id, _)| *sub_id != id);
    }

    pub fn publish(&self, change: PageChange) {
        let snapshot: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        log::debug!("page change to {} ({} subscribers)", change.view.token(), snapshot.len());
        for subscriber in snapshot {
            subscriber(&change);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_are_notified_in_registration_order() {
        let bus = PageChangeBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["reveal", "cursor", "analytics"] {
            let log = Rc::clone(&log);
            bus.subscribe(move |change| log.borrow_mut().push((name, change.view)));
        }

        bus.publish(PageChange { view: View::Web3d });

        assert_eq!(
            *log.borrow(),
            vec![("reveal", View::Web3d), ("cursor", View::Web3d), ("analytics", View::Web3d)]
        );
    }

    #[test]
    fn unsubscribed_observers_stop_receiving() {
        let bus = PageChangeBus::new();
        let hits = Rc::new(Cell::new(0));
        let id = {
            let hits = Rc::clone(&hits);
            bus.subscribe(move |_| hits.set(hits.get() + 1))
        };
        bus.publish(PageChange { view: View::Home });
        bus.unsubscribe(id);
        bus.publish(PageChange { view: View::Home });

        assert_eq!(hits.get(), 1);
        assert_eq!(bus.len(), 0);
    }

    #[test]
    fn subscribing_during_delivery_does_not_panic() {
        let bus = Rc::new(PageChangeBus::new());
        let late_hits = Rc::new(Cell::new(0));
        {
            let bus_inner = Rc::clone(&bus);
            let late_hits = Rc::clone(&late_hits);
            bus.subscribe(move |_| {
                let late_hits = Rc::clone(&late_hits);
                bus_inner.subscribe(move |_| late_hits.set(late_hits.get() + 1));
            });
        }

        bus.publish(PageChange { view: View::Home });
        assert_eq!(late_hits.get(), 0);
        bus.publish(PageChange { view: View::Home });
        assert_eq!(late_hits.get(), 1);
    }
}
