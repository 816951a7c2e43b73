use frontplate::core::FrontplateError;
use frontplate::markdown::{MarkdownParser, Note, NoteParser};
use frontplate::prompt::NoPrompt;
use frontplate::templating::{TemplateEngine, TemplateSettings};
use frontplate::test_utils::{ScriptedPrompt, TestVault};

/// Cloning expands every line, including frontmatter, and prompts once per unknown name
#[test]
fn test_clone_expands_and_prompts() {
    let vault = TestVault::new().unwrap();
    vault
        .add_template(
            "meeting.md",
            "---\ntopic: {{topic}}\n---\n# {{title}}\n\nTopic: {{ topic }}\nAgenda: {{agenda}}\n",
        )
        .unwrap();

    let mut source = Note::new("standup");
    source.title = Some("Standup".into());
    let destination = vault.vault_path().join("work/standup.md");
    let mut prompt = ScriptedPrompt::new([("topic", "Release")]);

    let note = vault
        .engine()
        .clone_template("meeting", &destination, &source, &mut prompt)
        .unwrap();

    assert_eq!(
        vault.read_file("work/standup.md").unwrap(),
        "---\ntopic: Release\n---\n# Standup\n\nTopic: Release\nAgenda: {{agenda}}\n"
    );
    assert_eq!(prompt.asked(), ["topic", "agenda"]);
    assert_eq!(note.id.as_deref(), Some("standup"));
    assert_eq!(note.metadata.get("topic").and_then(|v| v.as_str()), Some("Release"));
}

/// Saving the cloned note persists the transferred identity
#[test]
fn test_clone_then_save_round_trips_identity() {
    let vault = TestVault::new().unwrap();
    vault.add_template("plain.md", "Body for {{title}}\n").unwrap();

    let mut source = Note::new("custom-id");
    source.title = Some("Custom".into());
    source.add_alias("Alias");
    source.add_tag("tagged");

    let destination = vault.vault_path().join("custom.md");
    let engine = vault.engine();
    let note = engine
        .clone_template("plain", &destination, &source, &mut NoPrompt)
        .unwrap();
    note.save(&destination).unwrap();

    let reloaded = MarkdownParser.from_path(&destination).unwrap();
    assert_eq!(reloaded.id.as_deref(), Some("custom-id"));
    assert_eq!(reloaded.aliases, vec!["Alias"]);
    assert!(reloaded.tags.contains("tagged"));
    assert_eq!(reloaded.body, vec!["Body for Custom"]);
}

/// User substitutions from the configuration shadow the built-ins
#[test]
fn test_clone_uses_configured_substitutions() {
    let vault = TestVault::new().unwrap();
    vault
        .write_config(
            "templates_dir = \"templates\"\ndate_format = \"%Y\"\n\n[substitutions]\nauthor = \"Sam\"\ntitle = \"Fixed\"\n",
        )
        .unwrap();
    vault.add_template("signed.md", "{{title}} by {{author}} in {{date}}\n").unwrap();

    let config = vault.config().unwrap();
    let engine = TemplateEngine::new(&config, config.settings(), MarkdownParser);
    let destination = vault.vault_path().join("signed.md");
    engine
        .clone_template("signed", &destination, &Note::new("s"), &mut NoPrompt)
        .unwrap();

    let written = vault.read_file("signed.md").unwrap();
    let year = written.trim_end().rsplit(' ').next().unwrap();
    assert!(written.starts_with("Fixed by Sam in "));
    assert_eq!(year.len(), 4);
    assert!(year.chars().all(|c| c.is_ascii_digit()));
}

/// A missing template fails before anything is created
#[test]
fn test_clone_missing_template() {
    let vault = TestVault::new().unwrap();
    vault.add_template("daily.md", "").unwrap();

    let destination = vault.vault_path().join("new/dir/note.md");
    let err = vault
        .engine()
        .clone_template("daly", &destination, &Note::default(), &mut NoPrompt)
        .unwrap_err();

    match err {
        FrontplateError::TemplateNotFound {
            name,
            suggestions,
            ..
        } => {
            assert_eq!(name, "daly");
            assert_eq!(suggestions, vec!["daily.md"]);
        }
        other => panic!("expected TemplateNotFound, got {other:?}"),
    }
    assert!(!vault.file_exists("new"));
}

/// Without a templates directory nothing is resolved, even an existing path
#[test]
fn test_clone_without_templates_dir() {
    let vault = TestVault::new().unwrap();
    let template = vault.add_template("t.md", "x\n").unwrap();
    let engine = TemplateEngine::new(&None::<std::path::PathBuf>, TemplateSettings::default(), MarkdownParser);

    let err = engine
        .clone_template(
            template.to_str().unwrap(),
            &vault.vault_path().join("out.md"),
            &Note::default(),
            &mut NoPrompt,
        )
        .unwrap_err();
    assert!(matches!(err, FrontplateError::TemplatesDirUndefined));
}

/// A destination that is a directory cannot be written
#[test]
fn test_clone_destination_is_directory_is_write_error() {
    let vault = TestVault::new().unwrap();
    vault.add_template("daily.md", "# {{title}}\n").unwrap();
    let destination = vault.vault_path().join("journal");
    std::fs::create_dir_all(&destination).unwrap();

    let err = vault
        .engine()
        .clone_template("daily", &destination, &Note::new("d"), &mut NoPrompt)
        .unwrap_err();

    match &err {
        FrontplateError::WriteError { path, .. } => assert_eq!(path, &destination),
        other => panic!("expected WriteError, got {other:?}"),
    }
    assert!(err.to_string().contains("journal"));
    assert!(destination.is_dir());
}

/// A template that is not UTF-8 aborts mid-stream and names the template
#[test]
fn test_clone_invalid_utf8_template_is_read_error() {
    let vault = TestVault::new().unwrap();
    let template = vault.templates_dir.join("binary.md");
    std::fs::write(&template, b"first line\n\xff\xfe\n").unwrap();
    let destination = vault.vault_path().join("out.md");

    let err = vault
        .engine()
        .clone_template("binary", &destination, &Note::new("out"), &mut NoPrompt)
        .unwrap_err();

    match &err {
        FrontplateError::ReadError { path, .. } => assert_eq!(path, &template),
        other => panic!("expected ReadError, got {other:?}"),
    }
    assert!(err.to_string().contains("binary.md"));
    assert_eq!(vault.read_file("out.md").unwrap(), "first line\n");
}
