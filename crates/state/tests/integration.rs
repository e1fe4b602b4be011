//! Integration tests for the state store

#[cfg(test)]
mod tests {
    use dna_errors::{Error, StateError};
    use dna_events::{channel, AppEvent, StateEvent};
    use dna_state::*;
    use tempfile::tempdir;

    fn defaults() -> Vec<String> {
        vec![
            "http://local:8000".to_string(),
            "https://raw.example.com/main/packages".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let store = StateStore::new(temp.path().join("config.json"), defaults());
        let (tx, mut rx) = channel();

        let state = store.load(&tx).await;
        assert_eq!(state.endpoints, defaults());
        assert!(state.spliced.is_empty());
        assert!(state.installed_at.is_none());
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::State(StateEvent::Initialized { .. })
        ));
    }

    #[tokio::test]
    async fn test_legacy_file_is_read_and_preserved() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        tokio::fs::write(
            &path,
            r#"{
  "registry": "http://192.168.1.103:8000",
  "github": "https://raw.githubusercontent.com/ENKI-420/dna-lang-pkg-mgr/main",
  "spliced": ["z3bra_mesh", "aura", "z3bra_mesh"],
  "lambda_phi": 2.176435e-08,
  "installed_at": null,
  "updated_at": "2025-06-01T12:30:00.123456",
  "omega_version": "omega51.843"
}"#,
        )
        .await
        .unwrap();

        let store = StateStore::new(path.clone(), defaults());
        let (tx, _rx) = channel();
        let mut state = store.load(&tx).await;

        assert_eq!(
            state.endpoints,
            vec![
                "http://192.168.1.103:8000".to_string(),
                "https://raw.githubusercontent.com/ENKI-420/dna-lang-pkg-mgr/main/packages"
                    .to_string(),
            ]
        );
        assert_eq!(state.spliced, vec!["z3bra_mesh", "aura"]);
        assert!(state.installed_at.is_none());
        assert!(state.updated_at.is_some());
        assert_eq!(state.omega_version.as_deref(), Some("omega51.843"));

        store.save(&mut state, &tx).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
        assert!(raw.get("lambda_phi").is_some());
        assert!(raw.get("github").is_some());
        assert_eq!(raw["spliced"][1], "aura");

        // reloading does not fold the legacy remote twice
        let reloaded = store.load(&tx).await;
        assert_eq!(reloaded.endpoints.len(), 2);
    }

    #[tokio::test]
    async fn test_camel_case_aliases() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        tokio::fs::write(
            &path,
            r#"{"sourceEndpoints": ["/srv/a", "/srv/b"], "installedPackages": ["x"], "installedAt": "2025-01-01T00:00:00Z"}"#,
        )
        .await
        .unwrap();

        let store = StateStore::new(path, defaults());
        let state = store.read().await.unwrap().unwrap();
        assert_eq!(state.endpoints, vec!["/srv/a", "/srv/b"]);
        assert!(state.is_installed("x"));
        assert!(state.installed_at.is_some());
    }

    #[tokio::test]
    async fn test_corrupted_file_falls_back() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let store = StateStore::new(path, defaults());
        assert!(matches!(
            store.read().await,
            Err(Error::State(StateError::StateCorrupted { .. }))
        ));

        let (tx, _rx) = channel();
        let state = store.load(&tx).await;
        assert_eq!(state, store.default_state());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_stamps() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("home/.dna/config.json");
        let store = StateStore::new(path.clone(), defaults());
        let (tx, _rx) = channel();

        let mut state = store.default_state();
        state.mark_installed("mesh_relay");
        store.save(&mut state, &tx).await.unwrap();

        assert!(state.updated_at.is_some());
        let reloaded = store.read().await.unwrap().unwrap();
        assert!(reloaded.is_installed("mesh_relay"));
        assert_eq!(reloaded.updated_at, state.updated_at);
    }

    #[tokio::test]
    async fn test_save_failure_is_persist_failed() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        tokio::fs::write(&blocker, b"file").await.unwrap();

        let store = StateStore::new(blocker.join("config.json"), defaults());
        let (tx, mut rx) = channel();
        let mut state = store.default_state();

        let err = store.save(&mut state, &tx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::State(StateError::PersistFailed { .. })
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::State(StateEvent::SaveFailed { .. })
        ));
    }
}
