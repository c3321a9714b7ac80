//! Redraw requests
//!
//! Invalidation sources never carry data. They only mark the face dirty, the
//! paint pass reads the current state itself. Any number of invalidations
//! between two paint passes collapse into a single repaint.

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};

use crate::config::DisplayCapabilities;

/// Named invalidation sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// A new minute started
    MinuteTick,
    /// Battery level or charging state changed
    Battery,
    /// Companion link connected or disconnected
    Link,
}

impl Source {
    const fn bit(self) -> u8 {
        match self {
            Source::MinuteTick => 0b001,
            Source::Battery => 0b010,
            Source::Link => 0b100,
        }
    }
}

/// Set of invalidation sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscriptions(u8);

impl Subscriptions {
    pub const NONE: Self = Self(0);

    /// Sources a face needs on the given display. Battery and link have no
    /// visual effect on monochrome screens, so they are left out there.
    pub fn for_display(capabilities: &DisplayCapabilities) -> Self {
        let subscriptions = Self::NONE.with(Source::MinuteTick);
        if capabilities.color {
            subscriptions.with(Source::Battery).with(Source::Link)
        } else {
            subscriptions
        }
    }

    pub const fn with(self, source: Source) -> Self {
        Self(self.0 | source.bit())
    }

    pub const fn contains(&self, source: Source) -> bool {
        self.0 & source.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Maps invalidation sources onto one coalesced "needs repaint" flag
pub struct Invalidator<M: RawMutex> {
    subscriptions: AtomicU8,
    dirty: Signal<M, ()>,
}

impl<M: RawMutex> Default for Invalidator<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> Invalidator<M> {
    pub const fn new() -> Self {
        Self {
            subscriptions: AtomicU8::new(0),
            dirty: Signal::new(),
        }
    }

    /// Replace the current subscriptions
    pub fn subscribe(&self, subscriptions: Subscriptions) {
        self.subscriptions.store(subscriptions.0, Ordering::Relaxed);
        #[cfg(feature = "defmt")]
        defmt::debug!("Subscribed to {}", subscriptions);
    }

    /// Drop all subscriptions. Pending repaints stay pending.
    pub fn unsubscribe_all(&self) {
        self.subscriptions.store(0, Ordering::Relaxed);
    }

    pub fn subscriptions(&self) -> Subscriptions {
        Subscriptions(self.subscriptions.load(Ordering::Relaxed))
    }

    pub fn is_subscribed(&self, source: Source) -> bool {
        self.subscriptions().contains(source)
    }

    /// Request a repaint on behalf of `source`.
    ///
    /// Returns `false` and does nothing if nobody listens to `source`.
    pub fn invalidate(&self, source: Source) -> bool {
        if !self.is_subscribed(source) {
            return false;
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("Invalidated by {}", source);
        self.dirty.signal(());
        true
    }

    /// Request a repaint regardless of subscriptions, e.g. for the first
    /// frame after loading
    pub fn mark_dirty(&self) {
        self.dirty.signal(());
    }

    /// Whether a repaint is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty.signaled()
    }

    /// Consume a pending repaint. Returns whether there was one.
    pub fn take(&self) -> bool {
        let pending = self.dirty.signaled();
        self.dirty.reset();
        pending
    }

    /// Wait until a repaint is requested and consume it
    pub async fn wait(&self) {
        self.dirty.wait().await
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;
    use crate::config::Shape;

    #[test]
    fn color_displays_listen_to_everything() {
        let subs = Subscriptions::for_display(&DisplayCapabilities::new(Shape::Round, true));
        assert!(subs.contains(Source::MinuteTick));
        assert!(subs.contains(Source::Battery));
        assert!(subs.contains(Source::Link));
    }

    #[test]
    fn monochrome_displays_only_tick() {
        let subs =
            Subscriptions::for_display(&DisplayCapabilities::new(Shape::Rectangular, false));
        assert!(subs.contains(Source::MinuteTick));
        assert!(!subs.contains(Source::Battery));
        assert!(!subs.contains(Source::Link));
    }

    #[test]
    fn invalidations_coalesce() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        invalidator.subscribe(Subscriptions::NONE.with(Source::MinuteTick).with(Source::Battery));

        assert!(invalidator.invalidate(Source::MinuteTick));
        assert!(invalidator.invalidate(Source::Battery));
        assert!(invalidator.invalidate(Source::MinuteTick));

        assert!(invalidator.take());
        assert!(!invalidator.take());
    }

    #[test]
    fn unsubscribed_sources_are_ignored() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        invalidator.subscribe(Subscriptions::NONE.with(Source::MinuteTick));

        assert!(!invalidator.invalidate(Source::Link));
        assert!(!invalidator.is_dirty());
    }

    #[test]
    fn unsubscribe_silences_all_sources() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        invalidator.subscribe(Subscriptions::for_display(&DisplayCapabilities::new(
            Shape::Round,
            true,
        )));
        invalidator.unsubscribe_all();

        assert!(invalidator.subscriptions().is_empty());
        assert!(!invalidator.invalidate(Source::MinuteTick));
        assert!(!invalidator.invalidate(Source::Battery));
        assert!(!invalidator.take());
    }

    #[test]
    fn mark_dirty_ignores_subscriptions() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        invalidator.mark_dirty();
        assert!(invalidator.is_dirty());
        assert!(invalidator.take());
        assert!(!invalidator.is_dirty());
    }

    #[test]
    fn take_after_take_is_clean() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        assert!(!invalidator.take());
        invalidator.mark_dirty();
        invalidator.mark_dirty();
        assert!(invalidator.take());
        assert!(!invalidator.is_dirty());
        assert!(!invalidator.take());
    }

    #[test]
    fn wait_consumes_coalesced_invalidations() {
        let invalidator = Invalidator::<NoopRawMutex>::new();
        invalidator.subscribe(Subscriptions::NONE.with(Source::MinuteTick).with(Source::Link));
        invalidator.invalidate(Source::MinuteTick);
        invalidator.invalidate(Source::Link);

        block_on(invalidator.wait());

        assert!(!invalidator.is_dirty());
        assert!(!invalidator.take());
    }
}
