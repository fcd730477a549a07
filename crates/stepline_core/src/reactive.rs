//! Push-pull reactive graph
//!
//! Writing a signal pushes a dirty mark through everything that read it.
//! Derived values are pulled: they recompute on the next read, never earlier.
//! Effects are eager and re-run right after the write, or once at the end of
//! a [`ReactiveGraph::batch`].
//!
//! Dependencies are discovered while a computation runs: every read made
//! from inside a derived or effect closure subscribes that closure to the
//! value it read. Dependencies are rebuilt on every run, so conditional
//! reads are tracked correctly.
//!
//! The graph is single-threaded (`Rc`/`RefCell` inside) and is meant to be
//! owned by whoever drives the frame loop.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Key of a signal node
    pub struct SignalId;
    /// Key of a derived node
    pub struct DerivedId;
    /// Key of an effect node
    pub struct EffectId;
}

/// A node that can be read and therefore depended upon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Source {
    Signal(SignalId),
    Derived(DerivedId),
}

/// A node that reads other nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Observer {
    Derived(DerivedId),
    Effect(EffectId),
}

type Sources = SmallVec<[Source; 4]>;
type ComputeFn = Rc<dyn Fn(&ReactiveGraph) -> Box<dyn Any>>;
type EffectFn = Rc<RefCell<dyn FnMut(&ReactiveGraph)>>;

/// Typed handle to a signal.
pub struct Signal<T> {
    id: SignalId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Signal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&self.id).finish()
    }
}

/// Typed handle to a derived value.
pub struct Derived<T> {
    id: DerivedId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Derived<T> {
    pub fn id(&self) -> DerivedId {
        self.id
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Derived<T> {}

impl<T> std::fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Derived").field(&self.id).finish()
    }
}

/// Handle to a registered effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn id(&self) -> EffectId {
        self.id
    }
}

struct SignalNode {
    value: Box<dyn Any>,
    observers: RefCell<FxHashSet<Observer>>,
}

struct DerivedNode {
    compute: ComputeFn,
    value: RefCell<Option<Box<dyn Any>>>,
    dirty: Cell<bool>,
    sources: RefCell<Sources>,
    observers: RefCell<FxHashSet<Observer>>,
}

struct EffectNode {
    run: EffectFn,
    sources: RefCell<Sources>,
}

/// Owner of all signals, derived values and effects.
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalNode>,
    derived: SlotMap<DerivedId, DerivedNode>,
    effects: SlotMap<EffectId, EffectNode>,
    /// One frame per computation currently running (innermost last).
    tracking: RefCell<Vec<Sources>>,
    batch_depth: u32,
    pending: Vec<EffectId>,
}

impl ReactiveGraph {
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            derived: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            tracking: RefCell::new(Vec::new()),
            batch_depth: 0,
            pending: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Signals
    // ------------------------------------------------------------------

    /// Create a new signal holding `value`.
    pub fn create_signal<T: 'static>(&mut self, value: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(value),
            observers: RefCell::new(FxHashSet::default()),
        });
        Signal {
            id,
            _marker: PhantomData,
        }
    }

    /// Read a signal, subscribing the running computation (if any) to it.
    ///
    /// Returns `None` if the signal has been removed.
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        let node = self.signals.get(signal.id)?;
        self.track(Source::Signal(signal.id));
        node.value.downcast_ref::<T>().cloned()
    }

    /// Replace a signal's value and propagate the change.
    pub fn set<T: 'static>(&mut self, signal: Signal<T>, value: T) {
        let Some(node) = self.signals.get_mut(signal.id) else {
            tracing::warn!(?signal, "write to a removed signal ignored");
            return;
        };
        node.value = Box::new(value);
        self.notify(Source::Signal(signal.id));
    }

    /// Mutate a signal's value in place and propagate the change.
    pub fn update<T: 'static, F: FnOnce(&mut T)>(&mut self, signal: Signal<T>, f: F) {
        let Some(value) = self
            .signals
            .get_mut(signal.id)
            .and_then(|node| node.value.downcast_mut::<T>())
        else {
            return;
        };
        f(value);
        self.notify(Source::Signal(signal.id));
    }

    /// Remove a signal. Anything that read it sees `None` afterwards.
    pub fn remove_signal<T>(&mut self, signal: Signal<T>) {
        if let Some(node) = self.signals.remove(signal.id) {
            let observers = node.observers.into_inner().into_iter().collect();
            self.propagate(observers);
        }
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    /// Create a derived value. Nothing is computed until the first read.
    pub fn create_derived<T, F>(&mut self, compute: F) -> Derived<T>
    where
        T: 'static,
        F: Fn(&ReactiveGraph) -> T + 'static,
    {
        let compute: ComputeFn = Rc::new(move |g| Box::new(compute(g)) as Box<dyn Any>);
        let id = self.derived.insert(DerivedNode {
            compute,
            value: RefCell::new(None),
            dirty: Cell::new(true),
            sources: RefCell::new(Sources::new()),
            observers: RefCell::new(FxHashSet::default()),
        });
        Derived {
            id,
            _marker: PhantomData,
        }
    }

    /// Read a derived value, recomputing it first if it is stale.
    pub fn get_derived<T: Clone + 'static>(&self, derived: Derived<T>) -> Option<T> {
        let node = self.derived.get(derived.id)?;
        self.track(Source::Derived(derived.id));

        if node.dirty.get() || node.value.borrow().is_none() {
            self.recompute(derived.id, node);
        }

        let value = node
            .value
            .borrow()
            .as_ref()
            .and_then(|v| v.downcast_ref::<T>())
            .cloned();
        value
    }

    /// Whether a derived value will recompute on its next read.
    pub fn is_stale<T>(&self, derived: Derived<T>) -> bool {
        self.derived
            .get(derived.id)
            .map(|node| node.dirty.get())
            .unwrap_or(false)
    }

    pub fn derived_count(&self) -> usize {
        self.derived.len()
    }

    fn recompute(&self, id: DerivedId, node: &DerivedNode) {
        let compute = node.compute.clone();
        let old = std::mem::take(&mut *node.sources.borrow_mut());
        self.unsubscribe(Observer::Derived(id), &old);

        self.tracking.borrow_mut().push(Sources::new());
        let value = compute(self);
        let sources = self.tracking.borrow_mut().pop().unwrap_or_default();

        self.subscribe(Observer::Derived(id), &sources);
        *node.sources.borrow_mut() = sources;
        *node.value.borrow_mut() = Some(value);
        node.dirty.set(false);
        tracing::trace!(?id, "derived value recomputed");
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    /// Register an effect. It runs once immediately to discover what it reads.
    pub fn create_effect<F>(&mut self, run: F) -> Effect
    where
        F: FnMut(&ReactiveGraph) + 'static,
    {
        let run: EffectFn = Rc::new(RefCell::new(run));
        let id = self.effects.insert(EffectNode {
            run,
            sources: RefCell::new(Sources::new()),
        });
        self.run_effect(id);
        Effect { id }
    }

    /// Stop an effect from running again.
    pub fn dispose_effect(&mut self, effect: Effect) {
        if let Some(node) = self.effects.remove(effect.id) {
            let sources = node.sources.into_inner();
            self.unsubscribe(Observer::Effect(effect.id), &sources);
        }
        self.pending.retain(|id| *id != effect.id);
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Group several writes so that every affected effect runs only once.
    pub fn batch<F: FnOnce(&mut ReactiveGraph)>(&mut self, f: F) {
        self.batch_depth += 1;
        f(self);
        self.batch_depth -= 1;
        if self.batch_depth == 0 {
            self.flush_effects();
        }
    }

    fn run_effect(&self, id: EffectId) {
        let Some(node) = self.effects.get(id) else {
            return;
        };
        let run = node.run.clone();
        let old = std::mem::take(&mut *node.sources.borrow_mut());
        self.unsubscribe(Observer::Effect(id), &old);

        self.tracking.borrow_mut().push(Sources::new());
        {
            let mut f = run.borrow_mut();
            (*f)(self);
        }
        let sources = self.tracking.borrow_mut().pop().unwrap_or_default();

        self.subscribe(Observer::Effect(id), &sources);
        *node.sources.borrow_mut() = sources;
    }

    fn flush_effects(&mut self) {
        // Effects only get `&ReactiveGraph`, so they cannot schedule more work.
        let queue = std::mem::take(&mut self.pending);
        for id in queue {
            self.run_effect(id);
        }
    }

    // ------------------------------------------------------------------
    // Dependency bookkeeping
    // ------------------------------------------------------------------

    fn track(&self, source: Source) {
        if let Some(frame) = self.tracking.borrow_mut().last_mut() {
            if !frame.contains(&source) {
                frame.push(source);
            }
        }
    }

    fn observers_of(&self, source: Source) -> Option<&RefCell<FxHashSet<Observer>>> {
        match source {
            Source::Signal(id) => self.signals.get(id).map(|n| &n.observers),
            Source::Derived(id) => self.derived.get(id).map(|n| &n.observers),
        }
    }

    fn subscribe(&self, observer: Observer, sources: &[Source]) {
        for source in sources {
            if let Some(observers) = self.observers_of(*source) {
                observers.borrow_mut().insert(observer);
            }
        }
    }

    fn unsubscribe(&self, observer: Observer, sources: &[Source]) {
        for source in sources {
            if let Some(observers) = self.observers_of(*source) {
                observers.borrow_mut().remove(&observer);
            }
        }
    }

    /// Mark everything downstream of `source` dirty and schedule effects.
    fn notify(&mut self, source: Source) {
        let observers = match self.observers_of(source) {
            Some(observers) => observers.borrow().iter().copied().collect(),
            None => Vec::new(),
        };
        self.propagate(observers);
    }

    fn propagate(&mut self, mut stack: Vec<Observer>) {
        let mut seen: FxHashSet<Observer> = FxHashSet::default();

        while let Some(observer) = stack.pop() {
            if !seen.insert(observer) {
                continue;
            }
            match observer {
                Observer::Derived(id) => {
                    if let Some(node) = self.derived.get(id) {
                        node.dirty.set(true);
                        stack.extend(node.observers.borrow().iter().copied());
                    }
                }
                Observer::Effect(id) => {
                    if !self.pending.contains(&id) {
                        self.pending.push(id);
                    }
                }
            }
        }

        if self.batch_depth == 0 {
            self.flush_effects();
        }
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_roundtrip() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(3i32);
        assert_eq!(graph.get(s), Some(3));
        graph.set(s, 7);
        assert_eq!(graph.get(s), Some(7));
        graph.update(s, |v| *v += 1);
        assert_eq!(graph.get(s), Some(8));
    }

    #[test]
    fn derived_is_lazy_and_recomputes_after_write() {
        let mut graph = ReactiveGraph::new();
        let runs = Rc::new(Cell::new(0));
        let s = graph.create_signal(2.0f64);

        let runs_clone = runs.clone();
        let squared = graph.create_derived(move |g| {
            runs_clone.set(runs_clone.get() + 1);
            let v = g.get(s).unwrap_or(0.0);
            v * v
        });
        assert_eq!(runs.get(), 0);

        assert_eq!(graph.get_derived(squared), Some(4.0));
        assert_eq!(graph.get_derived(squared), Some(4.0));
        assert_eq!(runs.get(), 1);

        graph.set(s, 3.0);
        assert!(graph.is_stale(squared));
        assert_eq!(graph.get_derived(squared), Some(9.0));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn derived_chains_propagate_dirtiness() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(1i32);
        let a = graph.create_derived(move |g| g.get(s).unwrap_or(0) + 1);
        let b = graph.create_derived(move |g| g.get_derived(a).unwrap_or(0) * 10);

        assert_eq!(graph.get_derived(b), Some(20));
        graph.set(s, 4);
        assert!(graph.is_stale(a));
        assert!(graph.is_stale(b));
        assert_eq!(graph.get_derived(b), Some(50));
    }

    #[test]
    fn conditional_reads_are_retracked() {
        let mut graph = ReactiveGraph::new();
        let flag = graph.create_signal(true);
        let left = graph.create_signal(1i32);
        let right = graph.create_signal(2i32);
        let pick = graph.create_derived(move |g| {
            if g.get(flag).unwrap_or(false) {
                g.get(left).unwrap_or(0)
            } else {
                g.get(right).unwrap_or(0)
            }
        });

        assert_eq!(graph.get_derived(pick), Some(1));
        graph.set(flag, false);
        assert_eq!(graph.get_derived(pick), Some(2));

        // `left` is no longer a dependency.
        graph.set(left, 100);
        assert!(!graph.is_stale(pick));
        graph.set(right, 5);
        assert_eq!(graph.get_derived(pick), Some(5));
    }

    #[test]
    fn effect_runs_on_creation_and_after_writes() {
        let mut graph = ReactiveGraph::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = graph.create_signal(0i32);

        let seen_clone = seen.clone();
        let effect = graph.create_effect(move |g| {
            seen_clone.borrow_mut().push(g.get(s).unwrap_or(-1));
        });
        graph.set(s, 1);
        graph.set(s, 2);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);

        graph.dispose_effect(effect);
        graph.set(s, 3);
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert_eq!(graph.effect_count(), 0);
    }

    #[test]
    fn batch_runs_each_effect_once() {
        let mut graph = ReactiveGraph::new();
        let runs = Rc::new(Cell::new(0));
        let x = graph.create_signal(0i32);
        let y = graph.create_signal(0i32);

        let runs_clone = runs.clone();
        let _effect = graph.create_effect(move |g| {
            let _ = g.get(x);
            let _ = g.get(y);
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        graph.batch(|g| {
            g.set(x, 1);
            g.set(y, 2);
        });
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn effect_through_derived_sees_fresh_value() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(1i32);
        let doubled = graph.create_derived(move |g| g.get(s).unwrap_or(0) * 2);
        let last = Rc::new(Cell::new(0));

        let last_clone = last.clone();
        let _effect = graph.create_effect(move |g| {
            last_clone.set(g.get_derived(doubled).unwrap_or(0));
        });
        assert_eq!(last.get(), 2);
        graph.set(s, 21);
        assert_eq!(last.get(), 42);
    }

    #[test]
    fn removed_signal_reads_none() {
        let mut graph = ReactiveGraph::new();
        let s = graph.create_signal(5u8);
        let d = graph.create_derived(move |g| g.get(s));
        assert_eq!(graph.get_derived(d), Some(Some(5)));
        graph.remove_signal(s);
        assert_eq!(graph.get(s), None);
        assert_eq!(graph.get_derived(d), Some(None));
        assert_eq!(graph.signal_count(), 0);
    }
}
