//! Observation primitives the page host exposes to its components.
//!
//! [`ScrollBus`] broadcasts every scroll tick to its listeners, and
//! [`IntersectionObserver`] reports threshold crossings for watched elements.
//! Both hand out guards ([`Subscription`], [`Observation`]) that unregister
//! when dropped, so a component releases its listener on every unmount path.
//!
//! Everything here is single-threaded: callbacks run synchronously on the
//! UI thread that calls [`ScrollBus::emit`] or [`IntersectionObserver::evaluate`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Instant;

use super::geometry::{intersection_ratio, ElementId, PageGeometry};

// ───────────────────────────────────────── scroll bus ────────

type ScrollListener = RefCell<dyn FnMut(&dyn PageGeometry)>;

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    listeners: BTreeMap<u64, Rc<ScrollListener>>,
}

/// Source of scroll events.  Cloning shares the same listener table.
#[derive(Default, Clone)]
pub struct ScrollBus {
    table: Rc<RefCell<ListenerTable>>,
}

impl ScrollBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every subsequent scroll event.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&dyn PageGeometry) + 'static,
    {
        let listener: Rc<ScrollListener> = Rc::new(RefCell::new(listener));
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id = table.next_id.wrapping_add(1);
        table.listeners.insert(id, listener);
        Subscription {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Deliver one scroll event to every live listener, in subscription order.
    pub fn emit(&self, geometry: &dyn PageGeometry) {
        // Snapshot first so listeners may subscribe or unsubscribe while
        // the event is being delivered.
        let snapshot: Vec<(u64, Rc<ScrollListener>)> = self
            .table
            .borrow()
            .listeners
            .iter()
            .map(|(&id, listener)| (id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.table.borrow().listeners.contains_key(&id) {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(geometry);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.table.borrow().listeners.len()
    }
}

impl fmt::Debug for ScrollBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Live registration on a [`ScrollBus`].  Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    table: Weak<RefCell<ListenerTable>>,
}

impl Subscription {
    /// `false` once the bus itself is gone.
    pub fn is_active(&self) -> bool {
        self.table
            .upgrade()
            .is_some_and(|table| table.borrow().listeners.contains_key(&self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if let Ok(mut table) = table.try_borrow_mut() {
                table.listeners.remove(&self.id);
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// ───────────────────────────────────────── intersection ──────

/// One report delivered to an intersection callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    /// Fraction of the element inside the (inset) viewport.
    pub ratio: f64,
    /// Any part of the element overlaps the (inset) viewport.
    pub is_intersecting: bool,
    pub time: Instant,
}

/// What the observer does with a target after its callback returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Keep,
    Unobserve,
}

type IntersectionCallback = RefCell<dyn FnMut(&IntersectionEntry) -> Disposition>;

struct Target {
    element: ElementId,
    threshold: f64,
    /// Whether the threshold was met at the previous evaluation.
    /// `None` until the first evaluation, which always reports.
    last_met: Option<bool>,
    callback: Rc<IntersectionCallback>,
}

#[derive(Default)]
struct TargetTable {
    next_id: u64,
    targets: BTreeMap<u64, Target>,
}

/// Watches elements and reports when their visibility crosses a threshold.
///
/// The observed viewport is the real one with its bottom edge pulled up by
/// `bottom_inset` pixels.
#[derive(Clone)]
pub struct IntersectionObserver {
    bottom_inset: f64,
    table: Rc<RefCell<TargetTable>>,
}

impl IntersectionObserver {
    pub fn new(bottom_inset: f64) -> Self {
        Self {
            bottom_inset,
            table: Rc::default(),
        }
    }

    /// Start watching `element`.  The callback runs on the first evaluation
    /// and then whenever the element crosses `threshold` in either direction.
    pub fn observe<F>(&self, element: ElementId, threshold: f64, callback: F) -> Observation
    where
        F: FnMut(&IntersectionEntry) -> Disposition + 'static,
    {
        let callback: Rc<IntersectionCallback> = Rc::new(RefCell::new(callback));
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id = table.next_id.wrapping_add(1);
        table.targets.insert(
            id,
            Target {
                element,
                threshold: threshold.clamp(0.0, 1.0),
                last_met: None,
                callback,
            },
        );
        Observation {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Measure every watched element against `geometry` and deliver the
    /// crossings.  Elements the geometry cannot locate are skipped.
    pub fn evaluate(&self, geometry: &dyn PageGeometry, now: Instant) {
        let snapshot: Vec<(u64, ElementId, f64, Option<bool>, Rc<IntersectionCallback>)> = self
            .table
            .borrow()
            .targets
            .iter()
            .map(|(&id, t)| (id, t.element, t.threshold, t.last_met, Rc::clone(&t.callback)))
            .collect();

        let viewport_height = geometry.viewport_height();

        for (id, element, threshold, last_met, callback) in snapshot {
            if !self.table.borrow().targets.contains_key(&id) {
                continue;
            }
            let Some(bounds) = geometry.element_bounds(element) else {
                continue;
            };

            let ratio = intersection_ratio(bounds, viewport_height, self.bottom_inset);
            let is_intersecting = ratio > 0.0;
            let met = if threshold <= 0.0 {
                is_intersecting
            } else {
                ratio >= threshold
            };
            if last_met == Some(met) {
                continue;
            }

            if let Some(target) = self.table.borrow_mut().targets.get_mut(&id) {
                target.last_met = Some(met);
            }

            let entry = IntersectionEntry {
                element,
                ratio,
                is_intersecting,
                time: now,
            };
            let disposition = match callback.try_borrow_mut() {
                Ok(mut cb) => (&mut *cb)(&entry),
                Err(_) => Disposition::Keep,
            };
            if disposition == Disposition::Unobserve {
                self.table.borrow_mut().targets.remove(&id);
            }
        }
    }

    pub fn observed_count(&self) -> usize {
        self.table.borrow().targets.len()
    }
}

impl fmt::Debug for IntersectionObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntersectionObserver")
            .field("bottom_inset", &self.bottom_inset)
            .field("observed", &self.observed_count())
            .finish()
    }
}

/// Live registration on an [`IntersectionObserver`].  Dropping it unobserves.
#[must_use = "dropping an Observation stops observing immediately"]
pub struct Observation {
    id: u64,
    table: Weak<RefCell<TargetTable>>,
}

impl Observation {
    /// `false` once the target was unobserved or the observer is gone.
    pub fn is_active(&self) -> bool {
        self.table
            .upgrade()
            .is_some_and(|table| table.borrow().targets.contains_key(&self.id))
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if let Ok(mut table) = table.try_borrow_mut() {
                table.targets.remove(&self.id);
            }
        }
    }
}

impl fmt::Debug for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::core::geometry::tests::FakePage;

    #[test]
    fn emit_reaches_every_listener() {
        let bus = ScrollBus::new();
        let hits = Rc::new(Cell::new(0));

        let a = Rc::clone(&hits);
        let _sub_a = bus.subscribe(move |_| a.set(a.get() + 1));
        let b = Rc::clone(&hits);
        let _sub_b = bus.subscribe(move |_| b.set(b.get() + 10));

        bus.emit(&FakePage::new(800.0, 2000.0));
        assert_eq!(hits.get(), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let bus = ScrollBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = bus.subscribe(move |_| h.set(h.get() + 1));

        let page = FakePage::new(800.0, 2000.0);
        bus.emit(&page);
        assert!(sub.is_active());
        drop(sub);
        bus.emit(&page);
        bus.emit(&page);

        assert_eq!(hits.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_bus_is_inactive() {
        let bus = ScrollBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        assert!(!sub.is_active());
    }

    #[test]
    fn listener_sees_scroll_position() {
        let bus = ScrollBus::new();
        let seen = Rc::new(Cell::new(0.0));
        let s = Rc::clone(&seen);
        let _sub = bus.subscribe(move |geo| s.set(geo.scroll_y()));

        bus.emit(&FakePage::new(800.0, 2000.0).scrolled_to(420.0));
        assert_eq!(seen.get(), 420.0);
    }

    #[test]
    fn first_evaluation_always_reports() {
        let observer = IntersectionObserver::new(100.0);
        let page = FakePage::new(800.0, 3000.0).element(ElementId(1), 2000.0, 200.0);
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let _obs = observer.observe(ElementId(1), 0.2, move |entry| {
            assert!(!entry.is_intersecting);
            c.set(c.get() + 1);
            Disposition::Keep
        });

        let now = Instant::now();
        observer.evaluate(&page, now);
        observer.evaluate(&page, now);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn crossing_in_both_directions_reports() {
        let observer = IntersectionObserver::new(100.0);
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let _obs = observer.observe(ElementId(1), 0.2, move |_| {
            c.set(c.get() + 1);
            Disposition::Keep
        });

        let page = FakePage::new(800.0, 3000.0).element(ElementId(1), 1000.0, 200.0);
        let now = Instant::now();
        observer.evaluate(&page.clone().scrolled_to(0.0), now); // initial: out
        observer.evaluate(&page.clone().scrolled_to(500.0), now); // in
        observer.evaluate(&page.clone().scrolled_to(2000.0), now); // out again
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn unobserve_disposition_removes_target() {
        let observer = IntersectionObserver::new(100.0);
        let page = FakePage::new(800.0, 3000.0).element(ElementId(7), 100.0, 50.0);
        let obs = observer.observe(ElementId(7), 0.2, |_| Disposition::Unobserve);

        observer.evaluate(&page, Instant::now());
        assert!(!obs.is_active());
        assert_eq!(observer.observed_count(), 0);
    }

    #[test]
    fn missing_element_is_skipped() {
        let observer = IntersectionObserver::new(100.0);
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let _obs = observer.observe(ElementId(99), 0.2, move |_| {
            c.set(c.get() + 1);
            Disposition::Keep
        });

        observer.evaluate(&FakePage::new(800.0, 3000.0), Instant::now());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn dropping_observation_unobserves() {
        let observer = IntersectionObserver::new(100.0);
        let obs = observer.observe(ElementId(1), 0.2, |_| Disposition::Keep);
        assert_eq!(observer.observed_count(), 1);
        drop(obs);
        assert_eq!(observer.observed_count(), 0);
    }
}
