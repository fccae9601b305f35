//! Touch engine
//!
//! Owns the slot table, session counters and staging buffer of one
//! controller, and turns a drained batch of records into input updates.

use stmfts_protocol::{Event, GestureEvent, RawRecord, StatusKind};

use crate::config::TouchConfig;
use crate::drain::StagingBuffer;
use crate::error::{Anomaly, DrainError};
use crate::machine::{self, Outcome};
use crate::session::ContactSession;
use crate::slot::SlotTable;
use crate::traits::{EventTransport, InputSink};

/// What happened to one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordOutcome {
    /// Coordinate record applied to the slot table
    Contact(Outcome),
    /// Status record interpreted
    Status(StatusKind),
    /// Gesture record, logged only
    Gesture(GestureEvent),
    /// Vendor record, logged only
    Vendor,
    /// Record could not be classified
    Dropped(Anomaly),
}

/// Counters for one drain cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainSummary {
    /// Records staged and processed
    pub records: u8,
    /// Updates delivered to the sink
    pub reported: u8,
    /// Records dropped as malformed
    pub dropped: u8,
    /// Records ignored as out of sequence
    pub anomalies: u8,
    /// Pending count reported by the controller, if clamped
    pub pending_clamped: Option<u8>,
    /// Controller reported a queue overflow
    pub queue_full: bool,
    /// Controller reported an ESD event
    pub esd_detected: bool,
    /// Controller reported it came out of reset
    pub ic_reset: bool,
}

impl DrainSummary {
    fn count(&mut self, outcome: &RecordOutcome) {
        self.records = self.records.saturating_add(1);
        match outcome {
            RecordOutcome::Contact(Outcome::Reported(_)) => {
                self.reported = self.reported.saturating_add(1);
            }
            RecordOutcome::Contact(Outcome::Ignored(anomaly)) | RecordOutcome::Dropped(anomaly) => {
                if anomaly.is_malformed() {
                    self.dropped = self.dropped.saturating_add(1);
                } else {
                    self.anomalies = self.anomalies.saturating_add(1);
                }
            }
            RecordOutcome::Status(StatusKind::QueueFull) => self.queue_full = true,
            RecordOutcome::Status(StatusKind::EsdDetected) => self.esd_detected = true,
            RecordOutcome::Status(StatusKind::IcReset) => self.ic_reset = true,
            _ => {}
        }
    }
}

/// Finger tracking engine for one controller
pub struct TouchEngine {
    config: TouchConfig,
    slots: SlotTable,
    session: ContactSession,
    staging: StagingBuffer,
}

impl TouchEngine {
    pub fn new(config: TouchConfig) -> Self {
        Self {
            config,
            slots: SlotTable::new(),
            session: ContactSession::new(),
            staging: StagingBuffer::new(),
        }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    pub fn session(&self) -> &ContactSession {
        &self.session
    }

    /// Forget all contacts and counters
    ///
    /// Used on power-on and power-off. No updates are reported for contacts
    /// that were active.
    pub fn reset(&mut self) {
        self.slots.reset();
        self.session.reset();
        self.staging.clear();
    }

    /// Drain the controller FIFO and report the resulting updates
    ///
    /// Updates are delivered in record order, followed by exactly one
    /// [`InputSink::sync`]. A transport failure aborts the cycle before any
    /// record is applied and nothing is delivered.
    pub fn drain<T, S>(
        &mut self,
        transport: &mut T,
        sink: &mut S,
    ) -> Result<DrainSummary, DrainError<T::Error>>
    where
        T: EventTransport,
        S: InputSink + ?Sized,
    {
        if let Err(err) = self.staging.fill(transport) {
            warn!("Event FIFO read failed, drain aborted");
            return Err(DrainError::Transport(err));
        }

        let mut summary = DrainSummary {
            pending_clamped: self.staging.clamped_from(),
            ..DrainSummary::default()
        };

        if let Some(reported) = summary.pending_clamped {
            warn!(
                "Pending count exceeds FIFO depth: {:?}",
                Anomaly::PendingCountClamped(reported)
            );
        }

        for index in 0..self.staging.len() {
            let Some(record) = self.staging.record(index) else {
                break;
            };
            let outcome = self.process_record(&record, sink);
            summary.count(&outcome);
        }

        sink.sync();
        self.staging.clear();

        trace!(
            "Drained {} records: {} reported, {} dropped, {} ignored",
            summary.records,
            summary.reported,
            summary.dropped,
            summary.anomalies
        );

        Ok(summary)
    }

    /// Decode and apply one record, delivering any resulting update
    ///
    /// Does not emit a sync.
    pub fn process_record<S: InputSink + ?Sized>(
        &mut self,
        record: &RawRecord,
        sink: &mut S,
    ) -> RecordOutcome {
        trace!("Record {:02x}", record);

        match Event::decode(record) {
            Event::Coordinate(event) => {
                let outcome = machine::apply(
                    &mut self.slots,
                    &mut self.session,
                    &event,
                    self.config.multi_touch_threshold,
                );
                if let Outcome::Reported(update) = outcome {
                    update.deliver(sink);
                }
                RecordOutcome::Contact(outcome)
            }
            Event::Status(status) => {
                let kind = status.kind();
                match kind {
                    StatusKind::QueueFull => warn!("Controller event queue overflowed"),
                    StatusKind::EsdDetected => warn!("ESD detected by controller"),
                    StatusKind::CoreError => warn!("Controller core error {:02x}", status.data),
                    StatusKind::IcReset => info!("Controller reset"),
                    StatusKind::WetMode => info!("Wet mode {}", status.data[0]),
                    StatusKind::NoiseMode => info!("Noise mode {}", status.data[0]),
                    StatusKind::XenosensorDetect => info!("Xenosensor detected"),
                    StatusKind::Other => debug!(
                        "Status type {:?} id {=u8:#x}",
                        status.stype,
                        status.status_id
                    ),
                }
                RecordOutcome::Status(kind)
            }
            Event::Gesture(gesture) => {
                debug!("Gesture {=u8:#x} type {=u8}", gesture.gesture_id, gesture.stype);
                RecordOutcome::Gesture(gesture)
            }
            Event::Vendor(vendor) => {
                if vendor.is_echo() {
                    trace!("Command echo {:02x}", &vendor.raw[2..8]);
                }
                RecordOutcome::Vendor
            }
            Event::Unknown(_) => {
                debug!("Dropping record of unknown class");
                RecordOutcome::Dropped(Anomaly::UnknownClass)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drain::mock::{MockError, MockTransport};
    use crate::report::{Contact, ContactEvent};
    use heapless::Vec;
    use proptest::prelude::*;
    use stmfts_protocol::{
        CoordinateEvent, StatusEvent, StatusType, TouchAction, TouchType, EVENT_SIZE,
    };

    type Events = Vec<ContactEvent, 64>;

    fn coord(slot: u8, action: TouchAction, x: u16, y: u16) -> CoordinateEvent {
        CoordinateEvent {
            slot,
            action,
            x,
            y,
            major: 6,
            minor: 5,
            z: 30,
            ..CoordinateEvent::default()
        }
    }

    /// Encode `events` as a FIFO batch with correct pending counts
    fn batch(events: &[CoordinateEvent]) -> Vec<RawRecord, 16> {
        let total = events.len();
        events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let mut event = *event;
                event.left_event = (total - i - 1) as u8;
                event.encode()
            })
            .collect()
    }

    fn contact(slot: u8, x: u16, y: u16) -> Contact {
        Contact {
            slot,
            x,
            y,
            major: 6,
            minor: 5,
            pressure: 30,
        }
    }

    #[test]
    fn test_press_move_release_in_one_drain() {
        let records = batch(&[
            coord(3, TouchAction::Press, 100, 200),
            coord(3, TouchAction::Move, 110, 205),
            coord(3, TouchAction::Release, 110, 205),
        ]);
        let mut transport = MockTransport::new(&records);
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        let summary = engine.drain(&mut transport, &mut events).unwrap();

        assert_eq!(
            events.as_slice(),
            &[
                ContactEvent::Began(contact(3, 100, 200)),
                ContactEvent::Moved(contact(3, 110, 205)),
                ContactEvent::Ended(3),
                ContactEvent::FrameSync,
            ]
        );
        assert_eq!(summary.records, 3);
        assert_eq!(summary.reported, 3);
        assert_eq!(engine.session().touch_count(), 0);
        assert_eq!(engine.slots().get(3).unwrap().move_count, 0);
    }

    #[test]
    fn test_zero_pressure_reported_as_one() {
        let mut event = coord(5, TouchAction::Press, 1500, 900);
        event.z = 0;
        let mut transport = MockTransport::new(&batch(&[event]));
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        engine.drain(&mut transport, &mut events).unwrap();

        assert!(matches!(
            events[0],
            ContactEvent::Began(c) if c.slot == 5 && c.pressure == 1
        ));
        assert_eq!(events[1], ContactEvent::FrameSync);
    }

    #[test]
    fn test_small_sink_still_ends_with_sync() {
        let presses: Vec<CoordinateEvent, 10> = (0..10)
            .map(|slot| coord(slot, TouchAction::Press, 100, 100))
            .collect();
        let mut transport = MockTransport::new(&batch(&presses));
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events: Vec<ContactEvent, 8> = Vec::new();

        let summary = engine.drain(&mut transport, &mut events).unwrap();

        assert_eq!(summary.reported, 10);
        assert_eq!(events.len(), 8);
        assert_eq!(events.last(), Some(&ContactEvent::FrameSync));
        assert_eq!(
            events.iter().filter(|e| **e == ContactEvent::FrameSync).count(),
            1
        );
    }

    #[test]
    fn test_sync_sent_for_empty_frame() {
        // single status record, nothing to report
        let status = StatusEvent {
            stype: StatusType::Information,
            sf: 0,
            status_id: 0x01,
            data: [1, 0, 0, 0, 0],
            left_event: 0,
        };
        let mut transport = MockTransport::new(&[status.encode()]);
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        engine.drain(&mut transport, &mut events).unwrap();
        assert_eq!(events.as_slice(), &[ContactEvent::FrameSync]);
    }

    #[test]
    fn test_clamped_pending_count() {
        let mut first = coord(0, TouchAction::Press, 10, 10).encode();
        first[7] = 31;
        let mut transport = MockTransport::new(&[first]);
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        let summary = engine.drain(&mut transport, &mut events).unwrap();
        assert_eq!(summary.pending_clamped, Some(31));
        assert_eq!(summary.records, 31);
        assert_eq!(transport.bulk_lengths.as_slice(), &[30 * EVENT_SIZE]);
    }

    #[test]
    fn test_transport_failure_changes_nothing() {
        let records = batch(&[
            coord(1, TouchAction::Press, 100, 100),
            coord(2, TouchAction::Press, 200, 200),
        ]);
        let mut transport = MockTransport::new(&records);
        transport.fail_bulk = true;
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        let result = engine.drain(&mut transport, &mut events);
        assert_eq!(result, Err(DrainError::Transport(MockError)));
        assert!(events.is_empty());
        assert_eq!(engine.session().touch_count(), 0);
        assert_eq!(engine.slots().active_count(), 0);
    }

    #[test]
    fn test_anomalies_counted() {
        let mut unknown = [0u8; EVENT_SIZE];
        // coordinate class with an out-of-range slot
        unknown[0] = (14 << 2) | (1 << 6);
        let records = [
            coord(0, TouchAction::Move, 10, 10).encode(),
            unknown,
            coord(0, TouchAction::Release, 10, 10).encode(),
        ];
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        let mut summary = DrainSummary::default();
        for record in &records {
            let outcome = engine.process_record(record, &mut events);
            summary.count(&outcome);
        }

        assert_eq!(summary.anomalies, 2);
        assert_eq!(summary.dropped, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_status_flags() {
        let queue_full = StatusEvent {
            stype: StatusType::Error,
            sf: 0,
            status_id: 0x01,
            data: [0; 5],
            left_event: 1,
        };
        let esd = StatusEvent {
            status_id: 0x02,
            left_event: 0,
            ..queue_full
        };
        let mut transport = MockTransport::new(&[queue_full.encode(), esd.encode()]);
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        let summary = engine.drain(&mut transport, &mut events).unwrap();
        assert!(summary.queue_full);
        assert!(summary.esd_detected);
        assert!(!summary.ic_reset);
    }

    #[test]
    fn test_gated_type_reports_nothing() {
        let mut hover = coord(4, TouchAction::Press, 500, 500);
        hover.touch_type = TouchType::Hover;
        let mut transport = MockTransport::new(&batch(&[hover]));
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();

        let summary = engine.drain(&mut transport, &mut events).unwrap();
        assert_eq!(summary.reported, 0);
        assert_eq!(events.as_slice(), &[ContactEvent::FrameSync]);
        assert_eq!(engine.slots().get(4).unwrap().touch_type, TouchType::Hover);
    }

    #[test]
    fn test_reset_forgets_contacts() {
        let mut transport = MockTransport::new(&batch(&[coord(1, TouchAction::Press, 1, 1)]));
        let mut engine = TouchEngine::new(TouchConfig::default());
        let mut events = Events::new();
        engine.drain(&mut transport, &mut events).unwrap();
        assert_eq!(engine.session().touch_count(), 1);

        engine.reset();
        assert_eq!(engine.session().touch_count(), 0);
        assert_eq!(engine.slots().active_count(), 0);
    }

    fn action_strategy() -> impl Strategy<Value = TouchAction> {
        prop_oneof![
            Just(TouchAction::None),
            Just(TouchAction::Press),
            Just(TouchAction::Move),
            Just(TouchAction::Release),
        ]
    }

    fn type_strategy() -> impl Strategy<Value = TouchType> {
        (0u8..16).prop_map(TouchType::from_bits)
    }

    proptest! {
        #[test]
        fn prop_touch_count_matches_active_slots(
            stream in prop::collection::vec(
                (0u8..16, action_strategy(), type_strategy(), any::<u16>(), any::<u16>()),
                0..200,
            )
        ) {
            let mut engine = TouchEngine::new(TouchConfig::default());
            let mut events = Vec::<ContactEvent, 4>::new();

            for (slot, action, touch_type, x, y) in stream {
                let mut event = coord(slot, action, x & 0x0FFF, y & 0x0FFF);
                event.touch_type = touch_type;
                engine.process_record(&event.encode(), &mut events);
                events.clear();

                prop_assert_eq!(
                    engine.session().touch_count() as usize,
                    engine.slots().active_count()
                );
            }
        }

        #[test]
        fn prop_random_records_never_panic(raw in any::<[u8; 16]>()) {
            let mut engine = TouchEngine::new(TouchConfig::default());
            let mut events = Events::new();
            engine.process_record(&raw, &mut events);
            prop_assert!(events.len() <= 1);
        }
    }
}
