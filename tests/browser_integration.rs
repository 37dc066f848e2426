mod common;

use common::{backup, docs_backup, relative_tree, sample_tree, FakeApi, Served, DOCS_TREE};
use restore_browser::api::RestoreApi;
use restore_browser::model::TreeNode;
use restore_browser::{BackupTreeBrowser, BrowserError, LoadOutcome};

fn loaded_browser() -> BackupTreeBrowser<FakeApi> {
    let api = FakeApi::new().with_backup(docs_backup(), sample_tree());
    let mut browser = BackupTreeBrowser::new(api);
    browser.list_backups().unwrap();
    browser.select_backup(&docs_backup()).unwrap();
    browser
}

#[test]
fn end_to_end_bulk_download_request() {
    let tree = TreeNode::from_json(DOCS_TREE.as_bytes()).unwrap();
    let api = FakeApi::new().with_backup(docs_backup(), tree);
    let mut browser = BackupTreeBrowser::new(api);

    let backups = browser.list_backups().unwrap().to_vec();
    assert_eq!(backups.len(), 1);

    browser.select_backup(&backups[0]).unwrap();

    let docs = browser.navigate("/docs").unwrap();
    assert_eq!(docs.path, "/docs");
    assert!(docs.is_dir);

    browser.toggle_selection("/docs/a.txt");
    let request = browser.request_bulk_download().unwrap();

    assert_eq!(
        request.url.as_str(),
        "http://nas.local:8080/api/restore/download-multiple?peer_id=1&backup=docs&source_server=srv1"
    );
    assert_eq!(request.paths, vec!["/docs/a.txt".to_string()]);

    let mut archive = Vec::new();
    browser.download_selection(&mut archive).unwrap();
    assert_eq!(
        browser.api().served(),
        vec![
            Served::Backups,
            Served::Tree("docs".into()),
            Served::Bulk(request.url.clone(), request.paths.clone()),
        ]
    );
}

#[test]
fn navigate_reaches_every_node_by_its_path() {
    let browser = loaded_browser();

    fn walk(node: &TreeNode, paths: &mut Vec<String>) {
        paths.push(node.path.clone());
        for child in node.children.values() {
            walk(child, paths);
        }
    }

    let mut paths = Vec::new();
    walk(browser.tree().unwrap(), &mut paths);
    assert_eq!(paths.len(), 9);

    let mut browser = browser;
    for path in paths {
        let node = browser.navigate(&path).unwrap();
        assert_eq!(node.path, path);
    }
}

#[test]
fn navigate_failures_leave_cursor_alone() {
    let mut browser = loaded_browser();
    browser.navigate("/photos/2024").unwrap();

    assert!(browser.navigate("/photos/1999").is_none());
    assert!(browser.navigate("/readme.md/child").is_none());
    assert!(browser.navigate("/nope/2024").is_none());
    assert_eq!(browser.current_path(), "/photos/2024");
}

#[test]
fn toggle_twice_restores_selection() {
    let mut browser = loaded_browser();
    browser.select("/readme.md");

    assert!(browser.toggle_selection("/docs/a.txt"));
    assert!(!browser.toggle_selection("/docs/a.txt"));

    assert_eq!(browser.selection().to_vec(), vec!["/readme.md".to_string()]);
}

#[test]
fn select_backup_resets_path_and_selection() {
    let api = FakeApi::new()
        .with_backup(docs_backup(), sample_tree())
        .with_backup(backup(2, "srv2", "photos"), sample_tree());
    let mut browser = BackupTreeBrowser::new(api);
    browser.select_backup(&docs_backup()).unwrap();

    browser.navigate("/photos/2024").unwrap();
    browser.toggle_selection("/photos/2024/beach.jpg");

    browser.select_backup(&backup(2, "srv2", "photos")).unwrap();
    assert_eq!(browser.current_path(), "/");
    assert!(browser.selection().is_empty());

    // Reloading the same backup clears too
    browser.navigate("/docs").unwrap();
    browser.select("/docs/a.txt");
    browser.select_backup(&backup(2, "srv2", "photos")).unwrap();
    assert_eq!(browser.current_path(), "/");
    assert!(browser.selection().is_empty());
}

#[test]
fn failed_load_surfaces_error_and_keeps_tree() {
    let api = FakeApi::new()
        .with_backup(docs_backup(), sample_tree())
        .with_broken_backup(backup(3, "srv1", "broken"));
    let mut browser = BackupTreeBrowser::new(api);
    browser.select_backup(&docs_backup()).unwrap();
    browser.navigate("/docs").unwrap();

    assert!(browser.select_backup(&backup(3, "srv1", "broken")).is_err());
    assert_eq!(browser.current_backup().unwrap().share_name, "docs");
    assert_eq!(browser.current_path(), "/docs");
}

#[test]
fn listing_puts_directories_first() {
    let mut browser = loaded_browser();
    browser.navigate("/docs").unwrap();

    let names: Vec<_> = browser.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "a.txt", "b.txt"]);
}

#[test]
fn bulk_download_keeps_insertion_order() {
    let mut browser = loaded_browser();
    assert!(matches!(
        browser.request_bulk_download(),
        Err(BrowserError::EmptySelection)
    ));

    browser.toggle_selection("/readme.md");
    browser.toggle_selection("/docs/a.txt");

    let request = browser.request_bulk_download().unwrap();
    assert_eq!(
        request.paths,
        vec!["/readme.md".to_string(), "/docs/a.txt".to_string()]
    );
}

#[test]
fn single_download_streams_file() {
    let browser = loaded_browser();

    let mut out = Vec::new();
    let written = browser.download("/docs/b.txt", &mut out).unwrap();

    assert_eq!(out, b"contents of /docs/b.txt");
    assert_eq!(written, out.len() as u64);

    let served = browser.api().served();
    let Some(Served::File(url)) = served.last() else {
        panic!("expected a file download, got {:?}", served);
    };
    assert_eq!(
        url.as_str(),
        "http://nas.local:8080/api/restore/download?peer_id=1&backup=docs&file=%2Fdocs%2Fb.txt&source_server=srv1"
    );
}

#[test]
fn downloads_need_a_backup() {
    let browser = BackupTreeBrowser::new(FakeApi::new());
    assert!(matches!(
        browser.download("/a.txt", &mut Vec::new()),
        Err(BrowserError::NoBackupSelected)
    ));
}

#[test]
fn only_latest_load_is_applied() {
    let api = FakeApi::new()
        .with_backup(docs_backup(), sample_tree())
        .with_backup(backup(2, "srv2", "photos"), TreeNode::new_dir("/"));
    let mut browser = BackupTreeBrowser::new(api);

    let first = browser.begin_load(docs_backup());
    let second = browser.begin_load(backup(2, "srv2", "photos"));

    // The later request answers first
    let photos = browser.api().load_tree(second.backup());
    assert_eq!(
        browser.finish_load(second, photos).unwrap(),
        LoadOutcome::Applied
    );

    let docs = browser.api().load_tree(first.backup());
    assert_eq!(browser.finish_load(first, docs).unwrap(), LoadOutcome::Stale);

    assert_eq!(browser.current_backup().unwrap().share_name, "photos");
    assert!(browser.resolve("/docs").is_none());
}

#[test]
fn breadcrumbs_follow_cursor() {
    let mut browser = loaded_browser();
    browser.navigate("/photos/2024").unwrap();

    let trail: Vec<_> = browser
        .breadcrumbs()
        .into_iter()
        .map(|c| (c.name, c.path))
        .collect();
    assert_eq!(
        trail,
        vec![
            ("/".to_string(), "/".to_string()),
            ("photos".to_string(), "/photos".to_string()),
            ("2024".to_string(), "/photos/2024".to_string()),
        ]
    );
}

#[test]
fn relative_node_paths_browse_and_download() {
    let api = FakeApi::new().with_backup(docs_backup(), relative_tree());
    let mut browser = BackupTreeBrowser::new(api);
    browser.list_backups().unwrap();
    browser.select_backup(&docs_backup()).unwrap();

    // Listing from the root hands back the paths as sent
    let root: Vec<_> = browser.entries().iter().map(|e| e.path.clone()).collect();
    assert_eq!(root, vec!["docs", "notes.md"]);

    // Both spellings reach the same node, and the cursor is normalized
    assert_eq!(browser.navigate("docs").unwrap().path, "docs");
    assert_eq!(browser.current_path(), "/docs");
    assert_eq!(browser.navigate("/docs/sub").unwrap().path, "docs/sub");
    assert_eq!(browser.navigate("docs/sub/b.txt").unwrap().size, 20);

    browser.navigate("/docs");
    let names: Vec<_> = browser.entries().iter().map(|e| e.path.clone()).collect();
    assert_eq!(names, vec!["docs/sub", "docs/a.txt"]);
    let crumbs: Vec<_> = browser.breadcrumbs().into_iter().map(|c| c.path).collect();
    assert_eq!(crumbs, vec!["/", "/docs"]);

    browser.select_all_visible();
    assert_eq!(
        browser.selection().to_vec(),
        vec!["docs/sub".to_string(), "docs/a.txt".to_string()]
    );
    assert!(browser.all_visible_selected());

    let single = browser.request_download("docs/a.txt").unwrap();
    assert_eq!(single.file_name, "a.txt");
    assert!(single.url.as_str().contains("file=docs%2Fa.txt"));

    let bulk = browser.request_bulk_download().unwrap();
    assert_eq!(bulk.paths, vec!["docs/sub", "docs/a.txt"]);

    assert!(browser.navigate_up());
    assert_eq!(browser.current_path(), "/");
}
