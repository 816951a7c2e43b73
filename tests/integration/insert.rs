use frontplate::buffer::{LineBuffer, MemoryBuffer};
use frontplate::core::FrontplateError;
use frontplate::markdown::{MarkdownParser, Note, NoteParser};
use frontplate::prompt::NoPrompt;
use frontplate::test_utils::{ScriptedPrompt, TestVault};

/// Buffer that records collaborator calls made after splicing.
#[derive(Default)]
struct RecordingBuffer {
    inner: MemoryBuffer,
    cursor: Option<usize>,
    refreshes: usize,
}

impl LineBuffer for RecordingBuffer {
    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn get_lines(&self, start: usize, end: usize) -> Vec<String> {
        self.inner.get_lines(start, end)
    }

    fn replace_lines(&mut self, start: usize, end: usize, new_lines: Vec<String>) {
        self.inner.replace_lines(start, end, new_lines);
    }

    fn set_cursor(&mut self, line: usize) {
        self.cursor = Some(line);
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

/// Template frontmatter is merged and the body expanded with the target's title
#[test]
fn test_insert_trip_example() {
    let vault = TestVault::new().unwrap();
    vault.add_template("greeting.md", "---\nkey: {{title}}\n---\nHello {{name}}").unwrap();

    let path = vault.create_file("trip.md", "# Trip\n").unwrap();
    let mut buffer = MemoryBuffer::load(&path).unwrap();
    let mut note = MarkdownParser.from_buffer(&buffer, Some(&path)).unwrap();
    let mut prompt = ScriptedPrompt::new([("name", "World")]);

    let insertion = vault
        .engine()
        .insert_template("greeting", &mut note, &mut buffer, 1, &mut prompt)
        .unwrap();
    buffer.save(&path).unwrap();

    assert!(insertion.frontmatter_merged);
    assert_eq!(
        vault.read_file("trip.md").unwrap(),
        "---\nid: trip\nkey: Trip\n---\n# Trip\nHello World\n"
    );
}

/// Tags merge as a set and repeated inserts do not duplicate them
#[test]
fn test_insert_twice_keeps_tags_unique() {
    let vault = TestVault::new().unwrap();
    vault.add_template("tag.md", "---\ntags: [x]\n---\n").unwrap();

    let lines = ["---", "tags: [y]", "---", "text"];
    let mut buffer = MemoryBuffer::new(lines);
    let mut note = MarkdownParser.from_buffer(&buffer, None).unwrap();
    let engine = vault.engine();

    engine.insert_template("tag", &mut note, &mut buffer, 4, &mut NoPrompt).unwrap();
    let once = buffer.lines().to_vec();
    engine.insert_template("tag", &mut note, &mut buffer, 4, &mut NoPrompt).unwrap();

    assert_eq!(buffer.lines(), once.as_slice());
    assert_eq!(buffer.lines(), ["---", "tags:", "- x", "- y", "---", "text"]);
    assert_eq!(note.tags.iter().collect::<Vec<_>>(), vec!["x", "y"]);
}

/// Inserting without frontmatter at offset 3 leaves lines 0..3 untouched
#[test]
fn test_insert_body_only_preserves_prefix() {
    let vault = TestVault::new().unwrap();
    vault.add_template("snippet.md", "- [ ] {{task}}\n").unwrap();

    let original = ["a", "b", "c", "d", "e"];
    let mut buffer = MemoryBuffer::new(original);
    let mut note = Note::new("doc");
    let mut prompt = ScriptedPrompt::new([("task", "pack")]);

    let insertion = vault
        .engine()
        .insert_template("snippet", &mut note, &mut buffer, 3, &mut prompt)
        .unwrap();

    assert!(!insertion.frontmatter_merged);
    assert_eq!(&buffer.lines()[..3], &original[..3]);
    assert_eq!(buffer.lines(), ["a", "b", "c", "- [ ] pack", "d", "e"]);
    assert!(!note.has_frontmatter);
}

/// Cursor and refresh collaborators are called once the body is in place
#[test]
fn test_insert_repositions_cursor_and_refreshes() {
    let vault = TestVault::new().unwrap();
    vault.add_template("two.md", "one\ntwo\n").unwrap();

    let mut buffer = RecordingBuffer::default();
    buffer.replace_lines(0, 0, vec!["first".into()]);
    let mut note = Note::new("doc");

    let insertion = vault
        .engine()
        .insert_template("two", &mut note, &mut buffer, 1, &mut NoPrompt)
        .unwrap();

    assert_eq!(insertion.inserted, 1..3);
    assert_eq!(buffer.cursor, Some(2));
    assert_eq!(buffer.refreshes, 1);
}

/// A template whose frontmatter never closes is rejected without touching anything
#[test]
fn test_insert_unclosed_frontmatter() {
    let vault = TestVault::new().unwrap();
    vault.add_template("broken.md", "---\ntags: [x]\n").unwrap();

    let mut buffer = MemoryBuffer::new(["keep"]);
    let mut note = Note::new("doc");
    let before = note.clone();

    let err = vault
        .engine()
        .insert_template("broken", &mut note, &mut buffer, 0, &mut NoPrompt)
        .unwrap_err();

    assert!(matches!(err, FrontplateError::InvalidFrontmatter { .. }));
    assert!(err.to_string().contains("broken.md"));
    assert_eq!(note, before);
    assert_eq!(buffer.lines(), ["keep"]);
}
