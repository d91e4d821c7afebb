use rs2_seq::*;

#[test]
fn test_subject_config_defaults() {
    let config = SubjectConfig::default();
    assert_eq!(config.name, None);
    assert_eq!(config.initial_queue_capacity, 16);

    let named = SubjectConfig::named("ticks");
    assert_eq!(named.name.as_deref(), Some("ticks"));
    assert_eq!(named.initial_queue_capacity, 16);
}

#[test]
fn test_subject_config_from_json() {
    let config = SubjectConfig::from_json(r#"{"name": "orders"}"#).unwrap();
    assert_eq!(config, SubjectConfig::named("orders"));

    let config = SubjectConfig::from_json(r#"{"initial_queue_capacity": 128}"#).unwrap();
    assert_eq!(config.name, None);
    assert_eq!(config.initial_queue_capacity, 128);

    assert_eq!(SubjectConfig::from_json("{}").unwrap(), SubjectConfig::default());
}

#[test]
fn test_subject_config_rejects_invalid_json() {
    let result = SubjectConfig::from_json(r#"{"initial_queue_capacity": "lots"}"#);
    assert!(matches!(result, Err(SeqError::Config(_))));

    let result = SubjectConfig::from_json("not json");
    assert!(matches!(result, Err(SeqError::Config(_))));
}

#[test]
fn test_subject_config_rejects_oversized_queue_capacity() {
    let result = SubjectConfig::from_json(r#"{"initial_queue_capacity": 18446744073709551615}"#);
    assert!(matches!(result, Err(SeqError::Config(_))));

    let at_limit = format!(r#"{{"initial_queue_capacity": {}}}"#, MAX_INITIAL_QUEUE_CAPACITY);
    let config = SubjectConfig::from_json(&at_limit).unwrap();
    assert_eq!(config.initial_queue_capacity, MAX_INITIAL_QUEUE_CAPACITY);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_subject_with_oversized_config_still_attaches() {
    let config = SubjectConfig {
        name: Some("huge".to_string()),
        initial_queue_capacity: usize::MAX,
    };
    assert!(config.validate().is_err());

    let subject = Subject::with_config(config);
    let cursor = subject.attach();
    subject.push(1u8).unwrap();
    assert_eq!(cursor.buffered(), 1);
}

#[test]
fn test_subject_config_round_trips_through_serde() {
    let config = SubjectConfig {
        name: Some("metrics".to_string()),
        initial_queue_capacity: 4,
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(SubjectConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_subject_uses_its_config() {
    let subject = Subject::<u32>::with_config(SubjectConfig::named("feed"));
    assert_eq!(subject.config().name.as_deref(), Some("feed"));
    assert_eq!(subject.stats().name.as_deref(), Some("feed"));

    let unnamed = Subject::<u32>::new();
    assert_eq!(unnamed.stats().to_string(), "Subject(subject, 0 consumers, 0 pushed)");
}

#[test]
fn test_error_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    assert_eq!(SeqError::from(io), SeqError::Io("pipe closed".to_string()));

    assert_eq!(SeqError::Disposed.to_string(), "Subject has been disposed");
    assert_eq!(SeqError::callback("oops").to_string(), "Callback failed: oops");
}
