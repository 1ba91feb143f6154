use ampora::error::AmporaError;

#[test]
fn constructors_map_to_variants() {
    assert!(matches!(
        AmporaError::config("c"),
        AmporaError::Config { .. }
    ));
    assert!(matches!(AmporaError::api("a"), AmporaError::Api { .. }));
    assert!(matches!(
        AmporaError::network("n"),
        AmporaError::Network { .. }
    ));
    assert!(matches!(
        AmporaError::stream("s"),
        AmporaError::Stream { .. }
    ));
    assert!(matches!(
        AmporaError::payment("p"),
        AmporaError::Payment { .. }
    ));
    assert!(matches!(AmporaError::io("i"), AmporaError::Io { .. }));
    assert!(matches!(AmporaError::auth("a"), AmporaError::Auth { .. }));
    assert!(matches!(
        AmporaError::timeout("t"),
        AmporaError::Timeout { .. }
    ));
    assert!(matches!(
        AmporaError::generic("g"),
        AmporaError::Generic { .. }
    ));
}

#[test]
fn display_messages_carry_context() {
    assert_eq!(
        format!("{}", AmporaError::stream("feed closed")),
        "Stream error: feed closed"
    );
    assert_eq!(
        format!("{}", AmporaError::validation("payment.currency", "bad code")),
        "Validation error: payment.currency - bad code"
    );
}

#[test]
fn io_and_serde_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: AmporaError = io.into();
    assert!(matches!(err, AmporaError::Io { .. }));

    let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: AmporaError = bad_json.into();
    assert!(matches!(err, AmporaError::Serialization { .. }));
}
