//! Integration tests for root crate

#[cfg(test)]
mod tests {
    use dna_root::*;
    use tempfile::tempdir;
    use tokio::fs;

    async fn entry_count(dir: &std::path::Path) -> usize {
        let mut entries = fs::read_dir(dir).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_write_atomic_creates_parents_and_replaces() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("lib/nested/relay.py");

        write_atomic(&target, b"first").await.unwrap();
        write_atomic(&target, b"second").await.unwrap();

        assert_eq!(fs::read(&target).await.unwrap(), b"second");
        // no temporary siblings left behind
        assert_eq!(entry_count(target.parent().unwrap()).await, 1);
    }

    #[tokio::test]
    async fn test_create_dir_all_is_idempotent() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("a/b/c");
        create_dir_all(&dir).await.unwrap();
        create_dir_all(&dir).await.unwrap();
        assert!(fs::metadata(&dir).await.unwrap().is_dir());
    }

    #[tokio::test]
    async fn test_rename_missing_source_fails() {
        let temp = tempdir().unwrap();
        let err = rename(&temp.path().join("nope"), &temp.path().join("dst"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_set_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let file = temp.path().join("run.py");
        fs::write(&file, b"print()").await.unwrap();

        set_mode(&file, EXECUTABLE_MODE).await.unwrap();
        let mode = fs::metadata(&file).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o755);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_replace_symlink_overwrites_existing_entries() {
        let temp = tempdir().unwrap();
        let first = temp.path().join("first.py");
        let second = temp.path().join("second.py");
        fs::write(&first, b"1").await.unwrap();
        fs::write(&second, b"2").await.unwrap();

        let link = temp.path().join("bin/alias");
        replace_symlink(&first, &link).await.unwrap();
        assert_eq!(fs::read_link(&link).await.unwrap(), first);

        replace_symlink(&second, &link).await.unwrap();
        assert_eq!(fs::read_link(&link).await.unwrap(), second);

        // a regular file in the way is replaced too
        let occupied = temp.path().join("bin/occupied");
        fs::write(&occupied, b"stale").await.unwrap();
        replace_symlink(&first, &occupied).await.unwrap();
        assert_eq!(fs::read_link(&occupied).await.unwrap(), first);

        // and so is a directory
        let dir_link = temp.path().join("bin/dir");
        fs::create_dir_all(dir_link.join("inner")).await.unwrap();
        replace_symlink(&second, &dir_link).await.unwrap();
        assert_eq!(fs::read_link(&dir_link).await.unwrap(), second);

        assert_eq!(entry_count(&temp.path().join("bin")).await, 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_is_created() {
        let temp = tempdir().unwrap();
        let link = temp.path().join("dangling");
        symlink(&temp.path().join("missing"), &link).await.unwrap();
        assert!(fs::symlink_metadata(&link).await.unwrap().file_type().is_symlink());
        assert!(fs::metadata(&link).await.is_err());
    }
}
