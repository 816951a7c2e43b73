use predicates::prelude::*;

use super::frontplate;
use frontplate::test_utils::TestVault;

/// `list` prints template names relative to the templates directory
#[test]
fn test_list_templates() {
    let vault = TestVault::new().unwrap();
    vault.add_template("daily.md", "").unwrap();
    vault.add_template("work/meeting.md", "").unwrap();
    vault.add_template("notes.txt", "").unwrap();

    frontplate(&vault)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("daily.md"))
        .stdout(predicate::str::contains("meeting.md"))
        .stdout(predicate::str::contains("notes.txt").not());
}

/// `list` on an empty directory says so
#[test]
fn test_list_empty() {
    let vault = TestVault::new().unwrap();

    frontplate(&vault)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates found"));
}

/// `resolve` infers the `.md` suffix
#[test]
fn test_resolve_prints_path() {
    let vault = TestVault::new().unwrap();
    vault.add_template("daily.md", "").unwrap();

    frontplate(&vault)
        .args(["resolve", "daily"])
        .assert()
        .success()
        .stdout(predicate::str::contains("daily.md"));
}

/// Unknown templates fail with a suggestion
#[test]
fn test_resolve_unknown_template_suggests() {
    let vault = TestVault::new().unwrap();
    vault.add_template("daily.md", "").unwrap();

    frontplate(&vault)
        .args(["resolve", "dayly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template 'dayly' not found"))
        .stderr(predicate::str::contains("Did you mean: daily.md?"));
}

/// Without `templates_dir` in the config, commands explain what to set
#[test]
fn test_missing_templates_dir_setting() {
    let vault = TestVault::new().unwrap();
    vault.write_config("date_format = \"%d.%m.%Y\"\n").unwrap();

    frontplate(&vault)
        .args(["resolve", "daily"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("templates_dir"));
}

/// A broken config file is reported with its path
#[test]
fn test_invalid_config() {
    let vault = TestVault::new().unwrap();
    vault.write_config("templates_dir = [").unwrap();

    frontplate(&vault)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}

/// `new` writes the expanded note and records the identity flags
#[test]
fn test_new_creates_note() {
    let vault = TestVault::new().unwrap();
    vault.add_template("daily.md", "# {{title}}\n\nWritten by {{author}}\n").unwrap();

    frontplate(&vault)
        .args(["new", "daily", "journal/today.md", "--title", "Today", "--tag", "journal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert_eq!(
        vault.read_file("journal/today.md").unwrap(),
        "---\nid: today\ntags:\n- journal\n---\n# Today\n\nWritten by {{author}}\n"
    );
}

/// `new` refuses to clobber an existing note unless forced
#[test]
fn test_new_refuses_to_overwrite() {
    let vault = TestVault::new().unwrap();
    vault.add_template("daily.md", "fresh\n").unwrap();
    vault.create_file("today.md", "precious\n").unwrap();

    frontplate(&vault)
        .args(["new", "daily", "today.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(vault.read_file("today.md").unwrap(), "precious\n");

    frontplate(&vault).args(["new", "daily", "today.md", "--force"]).assert().success();
    assert!(vault.read_file("today.md").unwrap().contains("fresh"));
}

/// `insert` merges frontmatter and appends the body by default
#[test]
fn test_insert_appends_and_merges() {
    let vault = TestVault::new().unwrap();
    vault.add_template("todo.md", "---\ntags: [todo]\nstatus: open\n---\n- [ ] first\n").unwrap();
    vault.create_file("trip.md", "---\ntags: [travel]\n---\n# Trip\n").unwrap();

    frontplate(&vault)
        .args(["insert", "todo", "trip.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frontmatter merged"));

    assert_eq!(
        vault.read_file("trip.md").unwrap(),
        "---\nid: trip\ntags:\n- todo\n- travel\nstatus: open\n---\n# Trip\n- [ ] first\n"
    );
}

/// `insert --line` places the body before the given 1-based line
#[test]
fn test_insert_at_line() {
    let vault = TestVault::new().unwrap();
    vault.add_template("sig.md", "-- {{who}}\n").unwrap();
    vault.write_config("templates_dir = \"templates\"\n\n[substitutions]\nwho = \"Sam\"\n").unwrap();
    vault.create_file("letter.md", "Dear Ada,\nThanks.\nBye\n").unwrap();

    frontplate(&vault)
        .args(["insert", "sig", "letter.md", "--line", "3"])
        .assert()
        .success();

    assert_eq!(vault.read_file("letter.md").unwrap(), "Dear Ada,\nThanks.\n-- Sam\nBye\n");
}

/// Unclosed template frontmatter leaves the note untouched
#[test]
fn test_insert_invalid_template_leaves_file() {
    let vault = TestVault::new().unwrap();
    vault.add_template("broken.md", "---\ntags: [x]\n").unwrap();
    vault.create_file("note.md", "keep me\n").unwrap();

    frontplate(&vault)
        .args(["insert", "broken", "note.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("closing '---'"));

    assert_eq!(vault.read_file("note.md").unwrap(), "keep me\n");
}

/// `--title` reaches the file as a heading when the template has none
#[test]
fn test_new_title_without_template_heading() {
    let vault = TestVault::new().unwrap();
    vault.add_template("plain.md", "Just text\n").unwrap();

    frontplate(&vault)
        .args(["new", "plain", "trip.md", "--title", "Trip"])
        .assert()
        .success();

    assert_eq!(vault.read_file("trip.md").unwrap(), "---\nid: trip\n---\n# Trip\nJust text\n");
}
