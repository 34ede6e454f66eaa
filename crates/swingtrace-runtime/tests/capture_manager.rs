//! State machine scenarios driven directly on the owner context.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;
use swingtrace_runtime::{
    CaptureEvent, CaptureSessionManager, CaptureState, DeliverySink, Error, FeedbackSignal,
    RelayCommand, SampleStream, StreamDelivery, Transition,
};
use swingtrace_testing::doubles::{
    FailingStore, MemoryStore, RecordingFeedback, ScriptedSensor, UnavailableSensor,
};
use swingtrace_testing::events::drain;
use swingtrace_testing::fixtures;
use swingtrace_types::{Hand, MovementType, Vec3};

struct Harness {
    manager: CaptureSessionManager,
    deliveries: Receiver<StreamDelivery>,
    events: Receiver<CaptureEvent>,
    saved: Arc<std::sync::Mutex<Vec<swingtrace_types::Session>>>,
    feedback: RecordingFeedback,
}

fn scripted(readings_per_movement: usize) -> ScriptedSensor {
    ScriptedSensor::new(fixtures::constant_readings(
        readings_per_movement,
        Vec3::new(1.0, 0.0, 0.0),
        1.0 / 60.0,
    ))
}

fn harness(readings_per_movement: usize) -> Harness {
    harness_with(scripted(readings_per_movement))
}

fn harness_with(sensor: ScriptedSensor) -> Harness {
    let (tx, deliveries) = channel();
    let sink: DeliverySink = Arc::new(move |d| {
        let _ = tx.send(d);
    });
    let (tx_events, events) = channel();
    let store = MemoryStore::new();
    let saved = store.saved();
    let feedback = RecordingFeedback::new();

    let manager = CaptureSessionManager::new(
        SampleStream::new(Box::new(sensor), 2000.0),
        sink,
        Box::new(store),
    )
    .with_feedback(Box::new(feedback.clone()))
    .with_events(tx_events);

    Harness {
        manager,
        deliveries,
        events,
        saved,
        feedback,
    }
}

impl Harness {
    /// Pull `n` deliveries off the stream and hand them to the manager.
    fn pump(&mut self, n: usize) -> Vec<StreamDelivery> {
        let mut taken = Vec::new();
        for _ in 0..n {
            let d = self
                .deliveries
                .recv_timeout(Duration::from_secs(2))
                .expect("stream delivery");
            taken.push(d.clone());
            self.manager.handle_delivery(d);
        }
        taken
    }
}

#[test]
fn test_duplicate_start_session_creates_one_session() {
    let mut h = harness(0);
    assert_eq!(h.manager.start_session(), Transition::Applied);
    let first = h.manager.session().unwrap().id;

    assert_eq!(h.manager.start_session(), Transition::Ignored);
    assert_eq!(h.manager.session().unwrap().id, first);
    assert_eq!(h.manager.state(), CaptureState::SessionActive);

    let events = drain(&h.events);
    let changes = events
        .iter()
        .filter(|e| matches!(e, CaptureEvent::StateChanged { .. }))
        .count();
    assert_eq!(changes, 1);
    assert!(events.iter().any(|e| matches!(
        e,
        CaptureEvent::CommandIgnored { command: "startSession", .. }
    )));
}

#[test]
fn test_stop_movement_without_movement_is_noop() {
    let mut h = harness(0);
    assert_eq!(h.manager.stop_movement(), Transition::Ignored);
    assert_eq!(h.manager.state(), CaptureState::Idle);

    let _ = h.manager.start_session();
    assert_eq!(h.manager.stop_movement(), Transition::Ignored);
    assert_eq!(h.manager.state(), CaptureState::SessionActive);
    assert!(h.manager.session().unwrap().movements().is_empty());
}

#[test]
fn test_start_movement_requires_session() {
    let mut h = harness(3);
    let err = h
        .manager
        .start_movement(MovementType::Serve, Hand::Right)
        .unwrap_err();
    assert!(matches!(err, Error::NoActiveSession));
    assert_eq!(h.manager.state(), CaptureState::Idle);
    assert!(h.feedback.signals().is_empty());
}

#[test]
fn test_record_one_movement() {
    let mut h = harness(5);
    let _ = h.manager.start_session();
    assert_eq!(
        h.manager
            .start_movement(MovementType::Forehand, Hand::Right)
            .unwrap(),
        Transition::Applied
    );
    assert_eq!(h.manager.state(), CaptureState::MovementActive);

    h.pump(5);
    assert_eq!(h.manager.buffered_samples(), 5);
    assert_eq!(h.manager.stop_movement(), Transition::Applied);
    assert_eq!(h.manager.buffered_samples(), 0);

    let session = h.manager.session().unwrap();
    assert_eq!(session.movements().len(), 1);
    let movement = &session.movements()[0];
    assert_eq!(movement.movement_type, MovementType::Forehand);
    assert_eq!(movement.samples.len(), 5);
    assert_eq!(movement.samples[0].index, 0);
    assert_eq!(movement.samples[0].relative_timestamp, 0.0);
    assert!(movement.check_ordering().is_ok());

    assert_eq!(
        h.feedback.signals(),
        vec![FeedbackSignal::MovementStarted, FeedbackSignal::MovementStopped]
    );
}

#[test]
fn test_second_start_movement_is_ignored() {
    let mut h = harness(2);
    let _ = h.manager.start_session();
    let _ = h.manager.start_movement(MovementType::Volley, Hand::Left);
    let first = h.manager.current_movement().unwrap().id;

    assert_eq!(
        h.manager
            .start_movement(MovementType::Smash, Hand::Right)
            .unwrap(),
        Transition::Ignored
    );
    assert_eq!(h.manager.current_movement().unwrap().id, first);

    h.pump(2);
    let _ = h.manager.stop_movement();
    assert_eq!(h.manager.session().unwrap().movements().len(), 1);
}

#[test]
fn test_end_session_mid_movement_keeps_samples() {
    let mut h = harness(4);
    let _ = h.manager.start_session();
    let _ = h.manager.start_movement(MovementType::Backhand, Hand::Left);
    h.pump(4);

    assert_eq!(h.manager.end_session().unwrap(), Transition::Applied);
    assert_eq!(h.manager.state(), CaptureState::Idle);

    let saved = h.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert!(!saved[0].is_active());
    assert_eq!(saved[0].movements().len(), 1);
    assert_eq!(saved[0].movements()[0].samples.len(), 4);

    let events = drain(&h.events);
    assert!(events.contains(&CaptureEvent::StateChanged {
        from: CaptureState::MovementActive,
        to: CaptureState::Idle,
    }));
    assert!(events.iter().any(|e| matches!(
        e,
        CaptureEvent::SessionEnded { movement_count: 1, sample_count: 4, .. }
    )));
}

#[test]
fn test_end_session_when_idle_is_noop() {
    let mut h = harness(0);
    assert_eq!(h.manager.end_session().unwrap(), Transition::Ignored);
    assert!(h.saved.lock().unwrap().is_empty());
}

#[test]
fn test_persistence_failure_still_goes_idle() {
    let (tx, _rx) = channel();
    let sink: DeliverySink = Arc::new(move |d| {
        let _ = tx.send(d);
    });
    let (tx_events, events) = channel();
    let store = FailingStore::new();
    let attempts = store.attempts();
    let mut manager = CaptureSessionManager::new(
        SampleStream::new(Box::new(ScriptedSensor::new(Vec::new())), 60.0),
        sink,
        Box::new(store),
    )
    .with_events(tx_events);

    let _ = manager.start_session();
    let id = manager.session().unwrap().id;

    match manager.end_session() {
        Err(Error::PersistenceFailure { session, .. }) => {
            assert_eq!(session.id, id);
            assert!(!session.is_active());
        }
        other => panic!("expected persistence failure, got {:?}", other),
    }
    assert_eq!(manager.state(), CaptureState::Idle);
    assert_eq!(*attempts.lock().unwrap(), 1);
    assert!(drain(&events)
        .iter()
        .any(|e| matches!(e, CaptureEvent::PersistenceFailed { session_id, .. } if *session_id == id)));
}

#[test]
fn test_unavailable_sensor_leaves_session_active() {
    let (tx, _rx) = channel();
    let sink: DeliverySink = Arc::new(move |d| {
        let _ = tx.send(d);
    });
    let mut manager = CaptureSessionManager::new(
        SampleStream::new(Box::new(UnavailableSensor), 60.0),
        sink,
        Box::new(MemoryStore::new()),
    );

    let _ = manager.start_session();
    let err = manager
        .start_movement(MovementType::Lob, Hand::Right)
        .unwrap_err();
    assert!(matches!(err, Error::SensorUnavailable(_)));
    assert_eq!(manager.state(), CaptureState::SessionActive);
    assert!(manager.current_movement().is_none());
}

#[test]
fn test_one_late_reading_joins_finalized_movement() {
    let mut h = harness(3);
    let _ = h.manager.start_session();
    let _ = h.manager.start_movement(MovementType::Serve, Hand::Right);
    let seen = h.pump(3);
    let _ = h.manager.stop_movement();

    // Readings the worker pulled before the stop, delivered afterwards.
    let straggler = |n: f64| {
        let mut d = seen[2].clone();
        d.reading.reading.timestamp += n / 60.0;
        d
    };
    h.manager.handle_delivery(straggler(1.0));
    h.manager.handle_delivery(straggler(2.0));

    let movement = &h.manager.session().unwrap().movements()[0];
    assert_eq!(movement.samples.len(), 4);
    assert_eq!(movement.samples[3].index, 3);
    assert!(movement.check_ordering().is_ok());

    let events = drain(&h.events);
    assert!(events.iter().any(|e| matches!(
        e,
        CaptureEvent::MovementRecorded { sample_count: 3, .. }
    )));
    let extended: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, CaptureEvent::MovementExtended { .. }))
        .collect();
    assert_eq!(extended.len(), 1);
    assert!(matches!(
        extended[0],
        CaptureEvent::MovementExtended { sample_count: 4, movement_id, .. } if *movement_id == movement.id
    ));
}

#[test]
fn test_late_reading_after_failed_restart_continues_index() {
    let mut h = harness_with(scripted(3).with_open_limit(1));
    let _ = h.manager.start_session();
    let _ = h.manager.start_movement(MovementType::Serve, Hand::Right);
    let seen = h.pump(3);
    let _ = h.manager.stop_movement();

    let err = h
        .manager
        .start_movement(MovementType::Serve, Hand::Right)
        .unwrap_err();
    assert!(matches!(err, Error::SensorUnavailable(_)));
    assert_eq!(h.manager.state(), CaptureState::SessionActive);

    let mut late = seen[2].clone();
    late.reading.reading.timestamp += 1.0 / 60.0;
    h.manager.handle_delivery(late);

    let movement = &h.manager.session().unwrap().movements()[0];
    let indices: Vec<u64> = movement.samples.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(movement.check_ordering().is_ok());
}

#[test]
fn test_reading_from_old_stream_is_discarded_after_restart() {
    let mut h = harness(2);
    let _ = h.manager.start_session();
    let _ = h.manager.start_movement(MovementType::Forehand, Hand::Right);
    let old = h.pump(2);
    let _ = h.manager.stop_movement();

    let _ = h.manager.start_movement(MovementType::Forehand, Hand::Right);
    h.manager.handle_delivery(old[0].clone());
    assert_eq!(h.manager.buffered_samples(), 0);

    h.pump(2);
    let _ = h.manager.stop_movement();
    let movements = h.manager.session().unwrap().movements();
    assert_eq!(movements[0].samples.len(), 2);
    assert_eq!(movements[1].samples.len(), 2);
}

#[test]
fn test_late_reading_after_end_session_is_discarded() {
    let mut h = harness(2);
    let _ = h.manager.start_session();
    let _ = h.manager.start_movement(MovementType::Forehand, Hand::Right);
    let seen = h.pump(1);
    assert_eq!(h.manager.end_session().unwrap(), Transition::Applied);

    h.manager.handle_delivery(seen[0].clone());
    let saved = h.saved.lock().unwrap();
    assert_eq!(saved[0].movements()[0].samples.len(), 1);
}

#[test]
fn test_relay_stop_before_start_leaves_state() {
    let mut h = harness(0);
    let _ = h.manager.start_session();
    let before = h.manager.state();

    assert_eq!(
        h.manager.apply(RelayCommand::StopMovementRecording).unwrap(),
        Transition::Ignored
    );
    assert_eq!(h.manager.state(), before);
}

#[test]
fn test_relay_duplicate_start_movement_records_once() {
    let mut h = harness(3);
    let start = RelayCommand::StartMovementRecording {
        movement_type: MovementType::Forehand,
        hand: Hand::Right,
    };

    let _ = h.manager.apply(RelayCommand::StartSession).unwrap();
    assert_eq!(h.manager.apply(start).unwrap(), Transition::Applied);
    assert_eq!(h.manager.apply(start).unwrap(), Transition::Ignored);
    h.pump(3);
    let _ = h.manager.apply(RelayCommand::StopMovementRecording).unwrap();

    assert_eq!(h.manager.session().unwrap().movements().len(), 1);
}

#[test]
fn test_relay_start_movement_while_idle_is_reported() {
    let mut h = harness(0);
    let result = h.manager.apply(RelayCommand::StartMovementRecording {
        movement_type: MovementType::Unknown,
        hand: Hand::Left,
    });
    assert!(matches!(result, Err(Error::NoActiveSession)));
    assert!(drain(&h.events).iter().any(|e| matches!(
        e,
        CaptureEvent::CommandIgnored { command: "startMovementRecording", state: CaptureState::Idle, .. }
    )));
}
