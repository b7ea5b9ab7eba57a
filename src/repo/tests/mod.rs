use std::fs;
use std::path::Path;


// Lay down a `.git` directory with the given config text, without going
// through `Repository::init`.
fn fake_repo(work_dir: &Path, config_txt: &str) {
    let git_dir = work_dir.join(".git");
    fs::create_dir_all(&git_dir).unwrap();
    fs::write(git_dir.join("config"), config_txt).unwrap();
}
