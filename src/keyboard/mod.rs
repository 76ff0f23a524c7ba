//! Keyboard controller: key order, grid geometry, and reshuffle timing.
//!
//! The controller owns the current key order and reshuffles it after every
//! completed key interaction, with a short deferral so the pressed key's
//! feedback is visible before the grid reorders. It renders nothing itself;
//! the presentation layer reads its key set and layout each frame.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use tracing::debug;

use crate::models::{GridLayout, KeySet, SlotId};
use crate::services::shuffle;

/// Presentation-relevant phase of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardPhase {
    /// The container has not been measured yet; nothing interactive exists.
    Measuring,
    /// Layout is known; the key set is displayed over the grid.
    Ready,
}

/// A reshuffle scheduled to fire after a fixed delay.
///
/// Holding the value is the schedule; dropping it (or replacing it) is the
/// cancel handle. The cooperative tick loop fires it once its deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledShuffle {
    due_at: Instant,
}

impl ScheduledShuffle {
    /// Schedules a shuffle `delay` from now.
    #[must_use]
    pub fn after(delay: Duration) -> Self {
        Self {
            due_at: Instant::now() + delay,
        }
    }

    /// Whether the deadline has passed at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at
    }
}

/// State machine driving the board: measurement, presses, and deferred
/// reshuffles.
pub struct KeyboardController {
    keys: KeySet,
    columns: u16,
    layout: Option<GridLayout>,
    container: Option<(u16, u16)>,
    pressed: Option<SlotId>,
    pending_shuffle: Option<ScheduledShuffle>,
    reshuffle_delay: Duration,
    rng: SmallRng,
}

impl KeyboardController {
    /// Creates a controller for one board mount.
    ///
    /// The key set is built once here and starts in a random order;
    /// reshuffles permute it but never change its symbol multiset or slot
    /// identities.
    #[must_use]
    pub fn new(columns: u16, reshuffle_delay: Duration, mut rng: SmallRng) -> Self {
        let keys = KeySet::from_slots(shuffle::shuffled(KeySet::build(columns).slots(), &mut rng));
        Self {
            keys,
            columns,
            layout: None,
            container: None,
            pressed: None,
            pending_shuffle: None,
            reshuffle_delay,
            rng,
        }
    }

    /// Current phase: `Measuring` until the first container measurement.
    #[must_use]
    pub fn phase(&self) -> KeyboardPhase {
        if self.layout.is_some() {
            KeyboardPhase::Ready
        } else {
            KeyboardPhase::Measuring
        }
    }

    /// The key set in display order.
    #[must_use]
    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// The derived grid geometry, or `None` while still measuring.
    #[must_use]
    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    /// Identity of the slot currently held down, if any.
    #[must_use]
    pub fn pressed(&self) -> Option<SlotId> {
        self.pressed
    }

    /// Whether a deferred reshuffle is waiting to fire.
    #[must_use]
    pub fn has_pending_shuffle(&self) -> bool {
        self.pending_shuffle.is_some()
    }

    /// Records a container measurement and (re)derives the grid layout.
    ///
    /// The first measurement moves the controller from `Measuring` to
    /// `Ready`; later calls recompute the layout only when the size changed.
    pub fn on_container_measured(&mut self, width: u16, height: u16) {
        if self.container == Some((width, height)) {
            return;
        }
        self.container = Some((width, height));
        self.layout = Some(GridLayout::compute(
            width,
            height,
            self.keys.len(),
            self.columns,
        ));
    }

    /// Begins a key interaction on the slot with the given identity.
    ///
    /// Returns the composed character for letter slots; blank slots give the
    /// same pressed feedback but emit nothing. Ignored while measuring or for
    /// unknown identities.
    pub fn on_key_press_start(&mut self, identity: SlotId) -> Option<char> {
        if self.layout.is_none() {
            return None;
        }
        let slot = self.keys.find(identity)?;
        self.pressed = Some(identity);
        slot.symbol.emitted()
    }

    /// Completes a key interaction and schedules the deferred reshuffle.
    ///
    /// Exactly one shuffle is scheduled per completed interaction; a release
    /// without a matching press is ignored. A release while an earlier
    /// shuffle is still pending replaces that schedule, so overlapping
    /// interactions coalesce into the latest deadline.
    pub fn on_key_press_end(&mut self, identity: SlotId) {
        if self.pressed != Some(identity) {
            return;
        }
        self.pressed = None;
        self.pending_shuffle = Some(ScheduledShuffle::after(self.reshuffle_delay));
    }

    /// Fires the pending reshuffle if its deadline has passed.
    ///
    /// Returns `true` when the key order changed. Called from the cooperative
    /// tick loop; this is the only place the key order mutates.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self
            .pending_shuffle
            .is_some_and(|scheduled| scheduled.is_due(now));
        if !due {
            return false;
        }
        self.pending_shuffle = None;
        self.keys = KeySet::from_slots(shuffle::shuffled(self.keys.slots(), &mut self.rng));
        debug!("board reshuffled");
        true
    }

    /// Cancels any pending reshuffle; used on component teardown.
    pub fn cancel_pending_shuffle(&mut self) {
        self.pending_shuffle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn controller() -> KeyboardController {
        KeyboardController::new(5, Duration::from_millis(50), SmallRng::seed_from_u64(11))
    }

    #[test]
    fn test_starts_measuring_and_ignores_presses() {
        let mut kb = controller();
        assert_eq!(kb.phase(), KeyboardPhase::Measuring);
        assert_eq!(kb.on_key_press_start(0), None);
        assert!(kb.layout().is_none());
    }

    #[test]
    fn test_measurement_moves_to_ready() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);
        assert_eq!(kb.phase(), KeyboardPhase::Ready);
        let layout = kb.layout().unwrap();
        assert!(layout.cell_count() >= kb.keys().len());
    }

    #[test]
    fn test_remeasure_same_size_is_a_no_op() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);
        let before = kb.layout();
        kb.on_container_measured(50, 18);
        assert_eq!(kb.layout(), before);
    }

    #[test]
    fn test_press_emits_letter_and_release_schedules_shuffle() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);

        let emitted = kb.on_key_press_start(0);
        assert_eq!(emitted, Some('A'));
        assert_eq!(kb.pressed(), Some(0));
        assert!(!kb.has_pending_shuffle());

        kb.on_key_press_end(0);
        assert!(kb.pressed().is_none());
        assert!(kb.has_pending_shuffle());
    }

    #[test]
    fn test_blank_press_emits_nothing_but_still_shuffles() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);

        // Identities 26..29 are the blank fillers for a 5-column board.
        assert_eq!(kb.on_key_press_start(26), None);
        kb.on_key_press_end(26);
        assert!(kb.has_pending_shuffle());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);
        kb.on_key_press_end(3);
        assert!(!kb.has_pending_shuffle());
    }

    #[test]
    fn test_tick_fires_once_after_delay() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);
        kb.on_key_press_start(0);
        kb.on_key_press_end(0);

        // Before the deadline nothing happens.
        assert!(!kb.tick(Instant::now()));
        assert!(kb.has_pending_shuffle());

        // At the deadline the shuffle fires exactly once.
        let later = Instant::now() + Duration::from_millis(60);
        assert!(kb.tick(later));
        assert!(!kb.has_pending_shuffle());
        assert!(!kb.tick(later));
    }

    #[test]
    fn test_shuffle_preserves_identities_and_multiset() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);
        let mut before: Vec<_> = kb.keys().slots().iter().map(|s| s.identity).collect();
        before.sort_unstable();

        kb.on_key_press_start(5);
        kb.on_key_press_end(5);
        kb.tick(Instant::now() + Duration::from_millis(60));

        let mut after: Vec<_> = kb.keys().slots().iter().map(|s| s.identity).collect();
        after.sort_unstable();
        assert_eq!(before, after);
        assert_eq!(kb.keys().len(), 30);
    }

    #[test]
    fn test_cancel_prevents_pending_shuffle() {
        let mut kb = controller();
        kb.on_container_measured(50, 18);
        kb.on_key_press_start(0);
        kb.on_key_press_end(0);
        kb.cancel_pending_shuffle();

        let keys_before = kb.keys().clone();
        assert!(!kb.tick(Instant::now() + Duration::from_secs(1)));
        assert_eq!(kb.keys(), &keys_before);
    }
}
