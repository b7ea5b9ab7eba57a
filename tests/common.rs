use std::{fs, path::Path};

// Writes the tree `wyag init` is expected to produce into `work_dir`.
pub fn expected_skeleton(work_dir: &Path) {
    let git_dir = work_dir.join(".git");

    for dir in &["branches", "objects", "refs/heads", "refs/tags"] {
        fs::create_dir_all(git_dir.join(dir)).unwrap();
    }

    let description_txt =
        "Unnamed repository; edit this file 'description' to name the repository.";
    fs::write(git_dir.join("description"), description_txt).unwrap();

    fs::write(git_dir.join("HEAD"), "ref: refs/heads/master").unwrap();

    let config_txt = "[core]\nrepositoryformatversion=0\nfilemode=false\nbare=false\n";
    fs::write(git_dir.join("config"), config_txt).unwrap();
}
