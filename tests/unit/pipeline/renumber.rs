use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "recap_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn touch(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn names(dir: &Path) -> Vec<String> {
    let mut out: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    out.sort();
    out
}

#[test]
fn extension_matching_is_case_insensitive() {
    assert_eq!(extension_of("a.JPG").as_deref(), Some("jpg"));
    assert_eq!(extension_of("b.WebP").as_deref(), Some("webp"));
    assert_eq!(extension_of("noext"), None);
}

#[test]
fn natural_order_compares_digit_runs_by_value() {
    let mut names = vec![
        "10.webp",
        "2.webp",
        "Beach.webp",
        "1.webp",
        "beach 02.webp",
        "beach 1.webp",
    ];
    names.sort_by_cached_key(|n| (natural_key(n), n.to_string()));
    assert_eq!(
        names,
        ["1.webp", "2.webp", "10.webp", "beach 1.webp", "beach 02.webp", "Beach.webp"]
    );
}

#[test]
fn existing_numbers_are_reordered_without_clobbering() {
    let dir = temp_dir("reorder");
    std::fs::create_dir_all(&dir).unwrap();
    // "10.webp" sorts after "2.webp", so it moves down to "3.webp".
    touch(&dir, "1.webp", "one");
    touch(&dir, "10.webp", "ten");
    touch(&dir, "2.webp", "two");

    let report = renumber_folder(&dir, &RenumberOptions::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(names(&dir), ["1.webp", "2.webp", "3.webp"]);
    assert_eq!(std::fs::read_to_string(dir.join("2.webp")).unwrap(), "two");
    assert_eq!(std::fs::read_to_string(dir.join("3.webp")).unwrap(), "ten");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unrelated_files_and_subdirs_are_left_alone() {
    let dir = temp_dir("unrelated");
    std::fs::create_dir_all(dir.join("nested.webp")).unwrap();
    touch(&dir, "notes.txt", "keep");
    touch(&dir, "b.webp", "b");

    let report = renumber_folder(&dir, &RenumberOptions::default()).unwrap();
    assert!(report.deleted.is_empty());
    assert_eq!(report.renamed, vec![("b.webp".to_string(), "1.webp".to_string())]);
    assert_eq!(names(&dir), ["1.webp", "nested.webp", "notes.txt"]);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_folder_is_an_error() {
    let dir = temp_dir("missing");
    let err = renumber_folder(&dir, &RenumberOptions::default()).unwrap_err();
    assert!(err.to_string().contains("read dir"));
}

#[test]
fn tree_visits_subfolders_in_order() {
    let root = temp_dir("tree");
    for phase in ["phase 2", "phase 1"] {
        std::fs::create_dir_all(root.join(phase)).unwrap();
        touch(&root.join(phase), "x.webp", phase);
    }
    touch(&root, "stray.webp", "stray");

    let reports = renumber_tree(&root, &RenumberOptions::default()).unwrap();
    let dirs: Vec<_> = reports
        .iter()
        .map(|r| r.dir.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(dirs, ["phase 1", "phase 2"]);
    assert!(root.join("stray.webp").exists());
    assert!(root.join("phase 1").join("1.webp").exists());
    std::fs::remove_dir_all(&root).unwrap();
}
