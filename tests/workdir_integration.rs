//! Integration tests for the pooled work directory lifecycle

use harness_fs::WorkdirPool;
use tempfile::TempDir;

fn subdirectory_count(root: &std::path::Path) -> usize {
    std::fs::read_dir(root)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
                .count()
        })
        .unwrap_or(0)
}

#[tokio::test]
async fn sequential_acquisitions_get_increasing_ids() {
    let temp = TempDir::new().unwrap();
    let pool = WorkdirPool::new(temp.path().join("pool"));

    let a = pool.acquire().await.unwrap();
    let b = pool.acquire().await.unwrap();
    let c = pool.acquire().await.unwrap();

    assert_eq!(a.id(), 0);
    assert_eq!(b.id(), 1);
    assert_eq!(c.id(), 2);
    assert!(a.path().is_dir());
    assert!(b.path().is_dir());
    assert!(c.path().is_dir());
    assert_ne!(a.path(), b.path());
    assert_ne!(b.path(), c.path());
}

#[tokio::test]
async fn sync_disposal_frees_lowest_id_for_reuse() {
    let temp = TempDir::new().unwrap();
    let pool = WorkdirPool::new(temp.path().join("pool"));

    let a = pool.acquire().await.unwrap();
    let _b = pool.acquire().await.unwrap();
    let _c = pool.acquire().await.unwrap();

    let a_path = a.path().to_path_buf();
    a.dispose_sync().unwrap();
    assert!(!a_path.exists());

    let d = pool.acquire().await.unwrap();
    assert_eq!(d.id(), 0);
    assert_eq!(d.path(), a_path);
}

#[tokio::test]
async fn async_disposal_of_sole_directory_empties_the_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("pool");
    let pool = WorkdirPool::new(&root);

    let workdir = pool.acquire().await.unwrap();
    std::fs::write(workdir.path().join("scratch.txt"), b"data").unwrap();

    workdir.dispose().await.unwrap();
    assert_eq!(subdirectory_count(&root), 0);
}

#[tokio::test]
async fn disposal_removes_nested_content() {
    let temp = TempDir::new().unwrap();
    let pool = WorkdirPool::new(temp.path().join("pool"));

    let workdir = pool.acquire().await.unwrap();
    let nested = workdir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("deep.txt"), b"data").unwrap();

    let path = workdir.path().to_path_buf();
    workdir.dispose().await.unwrap();
    assert!(!path.exists());
}

#[tokio::test]
async fn pools_over_different_roots_are_independent() {
    let temp = TempDir::new().unwrap();
    let first = WorkdirPool::new(temp.path().join("first"));
    let second = WorkdirPool::new(temp.path().join("second"));

    let a = first.acquire().await.unwrap();
    let b = second.acquire().await.unwrap();

    assert_eq!(a.id(), 0);
    assert_eq!(b.id(), 0);
    assert_ne!(a.path(), b.path());
}

#[tokio::test]
async fn unlistable_root_propagates_an_error() {
    let temp = TempDir::new().unwrap();
    let blocked = temp.path().join("blocked");
    std::fs::write(&blocked, b"a file where the root should be").unwrap();

    let pool = WorkdirPool::new(blocked.join("pool"));
    assert!(pool.acquire().await.is_err());
}
