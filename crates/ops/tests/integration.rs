//! Integration tests for ops, driven through local-directory endpoints

#[cfg(test)]
mod tests {
    use dna_catalog::{builtin, Catalog};
    use dna_config::{Config, DnaPaths};
    use dna_errors::{Error, OpsError};
    use dna_events::channel;
    use dna_net::NetClient;
    use dna_ops::*;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Lay out every file of `catalog` under `mirror`
    async fn populate_mirror(mirror: &Path, catalog: &Catalog) {
        for spec in catalog {
            for file in &spec.files {
                let target = mirror.join(file);
                tokio::fs::create_dir_all(target.parent().unwrap())
                    .await
                    .unwrap();
                tokio::fs::write(&target, format!("# {file}\n")).await.unwrap();
            }
        }
    }

    fn context(temp: &TempDir, catalog: Catalog, endpoints: Vec<String>) -> OpsCtx {
        let (tx, _rx) = channel();
        let mut config = Config::default();
        config.mesh.endpoints = endpoints;

        OpsContextBuilder::new()
            .with_paths(DnaPaths::new(temp.path().join(".dna")))
            .with_catalog(catalog)
            .with_transport(Arc::new(NetClient::with_defaults().unwrap()))
            .with_event_sender(tx)
            .with_config(config)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_full_suite_from_local_mirror() {
        let temp = TempDir::new().unwrap();
        let mirror = temp.path().join("mirror");
        populate_mirror(&mirror, &builtin()).await;

        let ctx = context(
            &temp,
            builtin(),
            vec![
                temp.path().join("offline").display().to_string(),
                mirror.display().to_string(),
            ],
        );

        let report = install_all(&ctx, None).await;
        assert_eq!((report.succeeded, report.total), (8, 8));
        assert!(report.state_persisted);
        assert_eq!(report.version.as_deref(), Some("omega51.843"));

        let status = status(&ctx).await;
        // primary is the missing directory
        assert_eq!(status.connectivity, Connectivity::Offline);
        assert_eq!(status.installed_count, 8);
        assert_eq!(status.omega_version.as_deref(), Some("omega51.843"));
        assert!(status.installed_at.is_some());

        let listed = list_packages(&ctx).await;
        assert_eq!(listed.len(), 10);
        let installed: Vec<&str> = listed
            .iter()
            .filter(|p| p.installed)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(installed.len(), 8);
        assert!(!installed.contains(&"quantumcoin"));
    }

    #[tokio::test]
    async fn test_splice_with_dependency() {
        let temp = TempDir::new().unwrap();
        let mirror = temp.path().join("mirror");
        populate_mirror(&mirror, &builtin()).await;
        let ctx = context(&temp, builtin(), vec![mirror.display().to_string()]);

        let report = splice(&ctx, "quantumcoin").await.unwrap();
        assert!(report.success);
        assert_eq!(report.spliced_order(), vec!["z3bra_mesh", "quantumcoin"]);
        assert!(ctx.paths.lib_dir().join("quantumcoin_mining.py").exists());

        let status = status(&ctx).await;
        assert_eq!(status.connectivity, Connectivity::Online);
        assert_eq!(status.spliced, vec!["z3bra_mesh", "quantumcoin"]);

        let json = OperationResult::SpliceReport(report).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "SpliceReport");
        assert_eq!(value["data"]["package"], "quantumcoin");
    }

    #[tokio::test]
    async fn test_pinned_endpoints_leave_recorded_registry_alone() {
        let temp = TempDir::new().unwrap();
        let mirror = temp.path().join("mirror");
        populate_mirror(&mirror, &builtin()).await;
        let ctx = context(&temp, builtin(), vec![mirror.display().to_string()]);

        let state_file = ctx.paths.state_file();
        tokio::fs::create_dir_all(state_file.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(
            &state_file,
            r#"{"registry": "http://my-own-mirror:8000", "spliced": []}"#,
        )
        .await
        .unwrap();

        let report = splice(&ctx, "mesh_relay").await.unwrap();
        assert!(report.success);

        let raw = tokio::fs::read_to_string(&state_file).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["registry"], "http://my-own-mirror:8000");
        assert_eq!(value["spliced"][0], "mesh_relay");

        let status = status(&ctx).await;
        assert_eq!(status.endpoints, vec![mirror.display().to_string()]);
        assert_eq!(status.connectivity, Connectivity::Online);
    }

    #[tokio::test]
    async fn test_splice_unknown_package() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, builtin(), vec![]);

        assert!(!is_package(&ctx, "ghost"));
        let err = splice(&ctx, "ghost").await.unwrap_err();
        assert!(err.is_unknown_package());
        assert!(!ctx.paths.home().exists());
    }

    #[tokio::test]
    async fn test_missing_file_fails_splice() {
        let temp = TempDir::new().unwrap();
        let mirror = temp.path().join("mirror");
        tokio::fs::create_dir_all(&mirror).await.unwrap();
        let ctx = context(&temp, builtin(), vec![mirror.display().to_string()]);

        let report = splice(&ctx, "mesh_relay").await.unwrap();
        assert!(!report.success);
        assert!(!OperationResult::SpliceReport(report).is_success());
        assert_eq!(status(&ctx).await.installed_count, 0);
    }

    #[test]
    fn test_builder_requires_components() {
        let err = OpsContextBuilder::new().build().err().unwrap();
        assert!(matches!(
            err,
            Error::Ops(OpsError::MissingComponent { .. })
        ));
    }
}
