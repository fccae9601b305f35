//! Finger state machine
//!
//! Applies one decoded coordinate record to its slot and the session, and
//! decides what (if anything) gets reported.
//!
//! ```text
//!            Press                Move
//!   Idle ──────────▶ Pressed ──────────▶ Moved ◀─┐ Move
//!    ▲                  │                  │  ───┘
//!    │     Release      │     Release      │
//!    └──────────────────┴──────────────────┘
//! ```
//!
//! Release is never stored: the slot folds back to Idle in the same step.
//! Only normal, palm, wet and glove contacts take part in transitions;
//! other touch types update the slot's bookkeeping and nothing else.

use stmfts_protocol::{CoordinateEvent, TouchAction, TouchType};

use crate::diagnostics::{action_code, classify_zone, mode_code};
use crate::error::Anomaly;
use crate::report::ContactUpdate;
use crate::session::ContactSession;
use crate::slot::{FingerSlot, SlotTable};

/// Result of applying one coordinate record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Transition accepted, update to be reported
    Reported(ContactUpdate),
    /// Slot bookkeeping updated, contact type not reported
    Tracked(TouchType),
    /// Record rejected, no state changed
    Ignored(Anomaly),
}

/// Apply `event` to the slot table and session
///
/// `threshold` is the number of active contacts above which a multi-touch
/// burst starts.
pub fn apply(
    slots: &mut SlotTable,
    session: &mut ContactSession,
    event: &CoordinateEvent,
    threshold: u16,
) -> Outcome {
    let Some(slot) = slots.get_mut(event.slot) else {
        debug!("Slot {} is out of supported range", event.slot);
        return Outcome::Ignored(Anomaly::SlotOutOfRange(event.slot));
    };

    if !event.touch_type.is_reported() {
        update_sample(slot, event);
        debug!(
            "Slot {}: touch type {:?} not reported",
            slot.id,
            event.touch_type
        );
        return Outcome::Tracked(event.touch_type);
    }

    if let Err(anomaly) = check_transition(slot, session, event.action) {
        debug!("Slot {}: ignoring {:?}: {:?}", slot.id, event.action, anomaly);
        return Outcome::Ignored(anomaly);
    }

    update_sample(slot, event);

    let update = match event.action {
        TouchAction::Press => press(slot, session, threshold),
        TouchAction::Move => do_move(slot),
        // check_transition rejects None
        TouchAction::Release | TouchAction::None => release(slot, session),
    };

    if slot.touch_type != slot.prev_touch_type {
        debug!(
            "Slot {}: type {} -> {} ({})",
            slot.id,
            mode_code(slot.prev_touch_type),
            mode_code(slot.touch_type),
            action_code(event.action)
        );
    }

    Outcome::Reported(update)
}

/// Validate a transition against the slot and session state
fn check_transition(
    slot: &FingerSlot,
    session: &ContactSession,
    action: TouchAction,
) -> Result<(), Anomaly> {
    match action {
        TouchAction::Press => Ok(()),
        TouchAction::Move if session.touch_count() == 0 => Err(Anomaly::MoveWithoutTouch),
        TouchAction::Move if slot.action == TouchAction::None => Err(Anomaly::MoveAfterRelease),
        TouchAction::Move => Ok(()),
        TouchAction::Release if !slot.is_active() => Err(Anomaly::ReleaseWithoutPress),
        TouchAction::Release => Ok(()),
        TouchAction::None => Err(Anomaly::UnsupportedAction),
    }
}

/// Copy the sample into the slot and apply the per-record rules
fn update_sample(slot: &mut FingerSlot, event: &CoordinateEvent) {
    slot.prev_touch_type = slot.touch_type;
    slot.touch_type = event.touch_type;
    slot.x = event.x;
    slot.y = event.y;
    slot.major = event.major;
    slot.minor = event.minor;
    // The sensor cannot report zero pressure while in contact
    slot.z = event.z.max(1);
    slot.left_event = event.left_event;

    slot.max_energy = event.max_energy;
    if event.max_energy {
        slot.max_energy_x = event.x;
        slot.max_energy_y = event.y;
    }

    let is_palm = event.touch_type == TouchType::Palm;
    if is_palm && !slot.is_palm {
        slot.palm_count = slot.palm_count.saturating_add(1);
    }
    slot.is_palm = is_palm;

    slot.noise_level = event.noise_level;
    slot.max_strength = slot.max_strength.max(event.max_strength);
    slot.hover_id_num = slot.hover_id_num.max(event.hover_id_num);
}

fn press(slot: &mut FingerSlot, session: &mut ContactSession, threshold: u16) -> ContactUpdate {
    let new_contact = !slot.is_active();

    slot.prev_action = slot.action;
    slot.action = TouchAction::Press;
    slot.prev_x = slot.x;
    slot.prev_y = slot.y;

    if session.press(new_contact, threshold) {
        info!(
            "Multi-touch burst #{} ({} contacts)",
            session.multi_touch_burst_count(),
            session.touch_count()
        );
    }

    debug!(
        "[P] slot:{} x:{} y:{} z:{} major:{} minor:{} loc:{} tc:{} type:{} palm:{} nlvl:{} maxS:{} hid:{}",
        slot.id,
        slot.x,
        slot.y,
        slot.z,
        slot.major,
        slot.minor,
        classify_zone(slot.x, slot.y),
        session.touch_count(),
        mode_code(slot.touch_type),
        slot.palm_count,
        slot.noise_level,
        slot.max_strength,
        slot.hover_id_num
    );

    ContactUpdate::Began(slot.contact())
}

fn do_move(slot: &mut FingerSlot) -> ContactUpdate {
    slot.prev_action = slot.action;
    slot.action = TouchAction::Move;
    slot.move_count = slot.move_count.saturating_add(1);

    trace!("[M] slot:{} x:{} y:{} mc:{}", slot.id, slot.x, slot.y, slot.move_count);

    ContactUpdate::Moved(slot.contact())
}

fn release(slot: &mut FingerSlot, session: &mut ContactSession) -> ContactUpdate {
    session.release();

    let (dx, dy) = slot.travel();
    debug!(
        "[R] slot:{} loc:{} dd:{},{} mc:{} tc:{} lx:{} ly:{} mx:{} my:{} palm:{} nlvl:{} maxS:{} hid:{}",
        slot.id,
        classify_zone(slot.x, slot.y),
        dx,
        dy,
        slot.move_count,
        session.touch_count(),
        slot.x,
        slot.y,
        slot.max_energy_x,
        slot.max_energy_y,
        slot.palm_count,
        slot.noise_level,
        slot.max_strength,
        slot.hover_id_num
    );

    slot.prev_action = TouchAction::Release;
    slot.action = TouchAction::None;
    slot.move_count = 0;
    slot.palm_count = 0;
    slot.noise_level = 0;
    slot.max_strength = 0;
    slot.hover_id_num = 0;
    slot.max_energy_x = 0;
    slot.max_energy_y = 0;

    ContactUpdate::Ended(slot.id)
}
