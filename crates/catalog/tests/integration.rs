//! Integration tests for the catalog

#[cfg(test)]
mod tests {
    use dna_catalog::*;
    use dna_errors::{Error, PackageError};
    use dna_types::PackageSpec;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.suite().len(), 8);

        let packages: Vec<PackageSpec> = catalog.iter().cloned().collect();
        let rebuilt = Catalog::new(packages, catalog.suite().to_vec()).unwrap();
        assert_eq!(rebuilt, catalog);

        for spec in &catalog {
            for dep in &spec.dependencies {
                assert!(catalog.contains(dep), "{} -> {dep}", spec.name);
            }
        }
        assert_eq!(
            catalog.get("aura_orchestrator").unwrap().dependencies,
            vec!["quantum_vqe", "aura"]
        );
        assert_eq!(catalog.names().next(), Some("z3bra_mesh"));
    }

    #[test]
    fn test_require_unknown() {
        let err = builtin().require("ghost").unwrap_err();
        assert!(err.is_unknown_package());
    }

    #[test]
    fn test_toml_catalog() {
        let catalog = Catalog::from_toml_str(
            r#"
suite = ["b"]

[[package]]
name = "a"
files = ["a.py", "org/a.dna"]
description = "first"

[[package]]
name = "b"
files = ["b.py"]
deps = ["a"]
"#,
            "inline",
        )
        .unwrap();

        assert_eq!(catalog.suite(), ["b".to_string()]);
        assert_eq!(catalog.get("b").unwrap().dependencies, vec!["a"]);
        assert_eq!(catalog.get("a").unwrap().files.len(), 2);
    }

    #[test]
    fn test_json_catalog_suite_defaults_to_all() {
        let catalog = Catalog::from_json_str(
            r#"{"packages": [
                {"name": "x", "files": ["x.py"]},
                {"name": "y", "files": [], "dependencies": ["x"]}
            ]}"#,
            "inline",
        )
        .unwrap();
        assert_eq!(catalog.suite(), ["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_rejections() {
        let glob = Catalog::new(
            vec![PackageSpec::new("organisms", ["dnalang-organisms/*.dna"], "")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            glob,
            Error::Package(PackageError::UnsupportedFileEntry { .. })
        ));

        let dup = Catalog::new(
            vec![PackageSpec::new("a", ["a.py"], ""), PackageSpec::new("a", ["b.py"], "")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(dup, Error::Package(PackageError::Duplicate { .. })));

        let suite = Catalog::new(vec![PackageSpec::new("a", ["a.py"], "")], vec!["b".into()])
            .unwrap_err();
        assert!(matches!(
            suite,
            Error::Package(PackageError::UnknownSuiteEntry { .. })
        ));

        let ghost = Catalog::new(
            vec![
                PackageSpec::new("a", ["a.py"], ""),
                PackageSpec::new("x", ["x.py"], "").with_dependencies(["a", "ghost"]),
            ],
            vec![],
        )
        .unwrap_err();
        match ghost {
            Error::Package(PackageError::UnknownDependency {
                package,
                dependency,
            }) => {
                assert_eq!(package, "x");
                assert_eq!(dependency, "ghost");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let empty = Catalog::new(vec![PackageSpec::new("", ["a.py"], "")], vec![]).unwrap_err();
        assert!(matches!(empty, Error::Package(PackageError::InvalidName { .. })));
    }

    #[tokio::test]
    async fn test_load_from_file_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"packages": [{{"name": "j", "files": ["j.py"]}}]}}"#).unwrap();
        let catalog = Catalog::load_from_file(json.path()).await.unwrap();
        assert!(catalog.contains("j"));

        let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(toml, "[[package]]\nname = \"t\"\nfiles = [\"t.py\"]\n").unwrap();
        let catalog = Catalog::load_or_builtin(Some(toml.path())).await.unwrap();
        assert!(catalog.contains("t"));

        let missing = Catalog::load_from_file(std::path::Path::new("/no/such/catalog.toml"))
            .await
            .unwrap_err();
        assert!(matches!(
            missing,
            Error::Package(PackageError::CatalogUnreadable { .. })
        ));

        assert_eq!(Catalog::load_or_builtin(None).await.unwrap(), builtin());
    }
}
