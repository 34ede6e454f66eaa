use chrono::Utc;
use swingtrace_types::{Hand, Movement, MovementType, Session};

#[test]
fn test_session_round_trips_through_json() {
    let mut session = Session::new(Utc::now());
    let movement = Movement::new(session.id, MovementType::Volley, Hand::Left, Utc::now());
    session.append_movement(movement).unwrap();
    session.end(Utc::now());

    let json = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, session);
    assert!(!restored.is_active());
    assert_eq!(restored.movements()[0].movement_type, MovementType::Volley);
}

#[test]
fn test_active_session_omits_end_time() {
    let session = Session::new(Utc::now());
    let value = serde_json::to_value(&session).unwrap();
    assert!(value.get("ended_at").is_none());
    assert_eq!(value["movements"].as_array().unwrap().len(), 0);
}
