//! Integration tests for events

#[cfg(test)]
mod tests {
    use dna_errors::{Error, InstallError};
    use dna_events::*;

    #[tokio::test]
    async fn test_event_emitter_helpers() {
        let (tx, mut rx) = channel();

        tx.emit_error("test error");
        tx.emit_debug("test debug");
        tx.emit_fetch_attempt("mesh/relay.py", "http://10.0.0.1:8000");

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(event1, AppEvent::General(GeneralEvent::Error { .. })));
        assert_eq!(event1.log_level(), tracing::Level::ERROR);

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            AppEvent::General(GeneralEvent::DebugLog { .. })
        ));

        let event3 = rx.recv().await.unwrap();
        assert_eq!(event3.event_source(), EventSource::FETCH);
        assert_eq!(event3.log_level(), tracing::Level::DEBUG);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning("ignored");
    }

    #[test]
    fn test_none_emitter_is_silent() {
        let emitter: Option<EventSender> = None;
        emitter.emit_warning("nobody listens");
        assert!(emitter.event_sender().is_none());
    }

    #[tokio::test]
    async fn test_splice_failed_carries_error_code() {
        let (tx, mut rx) = channel();
        let err: Error = InstallError::UnknownPackage {
            package: "ghost".into(),
        }
        .into();

        tx.emit_splice_failed("ghost", &err);

        match rx.recv().await.unwrap() {
            AppEvent::Splice(SpliceEvent::Failed { package, failure }) => {
                assert_eq!(package, "ghost");
                assert!(failure.code.is_some());
                assert!(!failure.retryable);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_event_serialization_shape() {
        let event = AppEvent::Suite(SuiteEvent::Completed {
            succeeded: 7,
            total: 8,
        });
        let json: serde_json::Value = serde_json::from_str(&event.log_fields()).unwrap();
        assert_eq!(json["domain"], "suite");
        assert_eq!(json["event"]["type"], "completed");
        assert_eq!(json["event"]["succeeded"], 7);
        assert_eq!(event.log_target(), "dna::events::suite");
    }
}
