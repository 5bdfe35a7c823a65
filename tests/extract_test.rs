use indexmap::IndexMap;
use l10n_extract::error::{Error, Result};
use l10n_extract::extract::{extract, finish, prepare, replace_selection, Preset};
use l10n_extract::prompt::{DefaultsPrompter, Prompter};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Answers questions from a fixed script and records the prompts it was asked.
struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<(String, String)>>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, prompt: &str, default: &str) -> Result<String> {
        self.asked
            .borrow_mut()
            .push((prompt.to_string(), default.to_string()));
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptError("no scripted answer left".to_string()))
    }
}

const EN: &str = "{\n  \"@@locale\": \"en\",\n  \"title\": \"Title\"\n}\n";
const VI: &str = "{\n    \"@@locale\": \"vi\"\n}\n";

const CONFIG: &str = concat!(
    "outputFiles:\n",
    "  - lib/l10n/app_en.arb\n",
    "  - lib/l10n/app_vi.arb\n",
    "prefix: S.of(context)\n",
);

fn project(config: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("lib/l10n")).unwrap();
    fs::write(root.join("lib/l10n/app_en.arb"), EN).unwrap();
    fs::write(root.join("lib/l10n/app_vi.arb"), VI).unwrap();
    fs::write(root.join("extract_localization_config.yaml"), config).unwrap();
    temp_dir
}

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join(file)).unwrap()
}

fn keyed(key: &str) -> Preset {
    Preset {
        key: Some(key.to_string()),
        types: IndexMap::new(),
    }
}

#[test]
fn test_prepare_with_prompts() {
    let prompter = ScriptedPrompter::new(&["greeting", "String", "int"]);
    let extraction = prepare(
        "\"Hello ${name}, you have $count messages\"",
        &prompter,
        &Preset::default(),
    )
    .unwrap();

    assert_eq!(extraction.key, "greeting");
    assert_eq!(extraction.text, "Hello {name}, you have {count} messages");
    assert_eq!(extraction.placeholders, vec!["name", "count"]);
    assert_eq!(
        extraction.types.get("count").map(String::as_str),
        Some("int")
    );

    let asked = prompter.asked.borrow();
    assert_eq!(
        asked[0],
        (
            "Enter localization key".to_string(),
            "helloNameYouHaveCountMessages".to_string()
        )
    );
    assert_eq!(asked[1].1, "String");
    assert!(asked[2].0.contains("'count'"));
}

#[test]
fn test_prepare_asks_once_per_name() {
    let prompter = ScriptedPrompter::new(&["String", "int"]);
    let extraction = prepare("${a} and $b and ${a}", &prompter, &keyed("pair")).unwrap();

    assert_eq!(extraction.placeholders, vec!["a", "b", "a"]);
    assert_eq!(extraction.types.len(), 2);
    assert_eq!(prompter.asked.borrow().len(), 2);
    assert_eq!(extraction.reference("l10n"), "l10n.pair(a, b, a)");
}

#[test]
fn test_prepare_with_preset() {
    let mut preset = keyed("greet");
    preset
        .types
        .insert("name".to_string(), "Object".to_string());

    let prompter = ScriptedPrompter::new(&[]);
    let extraction = prepare("Hi $name", &prompter, &preset).unwrap();

    assert_eq!(
        extraction.types.get("name").map(String::as_str),
        Some("Object")
    );
    assert!(prompter.asked.borrow().is_empty());
}

#[test]
fn test_prepare_with_defaults() {
    let extraction = prepare("'Sign in as $user'", &DefaultsPrompter, &Preset::default()).unwrap();
    assert_eq!(extraction.key, "signInAsUser");
    assert_eq!(
        extraction.types.get("user").map(String::as_str),
        Some("String")
    );
}

#[test]
fn test_prepare_rejects_invalid_key() {
    let prompter = ScriptedPrompter::new(&["hello world"]);
    assert!(matches!(
        prepare("Hello", &prompter, &Preset::default()),
        Err(Error::InvalidKey { .. })
    ));

    let prompter = ScriptedPrompter::new(&[""]);
    assert!(matches!(
        prepare("Hello", &prompter, &Preset::default()),
        Err(Error::InvalidKey { .. })
    ));
}

#[test]
fn test_extract_patches_every_output_file() {
    let temp_dir = project(CONFIG);
    let root = temp_dir.path();
    let prompter = ScriptedPrompter::new(&["greet", "String"]);

    let outcome = extract(root, "'Hi ${name}!'", &prompter, &Preset::default()).unwrap();

    assert_eq!(outcome.reference, "S.of(context).greet(name)");
    assert!(outcome.report.is_complete());
    assert_eq!(outcome.report.updated.len(), 2);

    let en = read(root, "lib/l10n/app_en.arb");
    assert!(en.starts_with(concat!(
        "{\n",
        "  \"@@locale\": \"en\",\n",
        "  \"title\": \"Title\",\n",
        "  \"greet\": \"Hi {name}!\",\n"
    )));
    let vi = read(root, "lib/l10n/app_vi.arb");
    assert!(vi.contains(concat!(
        "\n    \"greet\": \"Hi {name}!\",",
        "\n    \"@greet\": {",
        "\n        \"placeholders\""
    )));

    let parsed: serde_json::Value = serde_json::from_str(&vi).unwrap();
    assert_eq!(parsed["@greet"]["placeholders"]["name"]["type"], "String");
}

#[test_log::test]
fn test_extract_skips_failing_files() {
    let config = concat!(
        "outputFiles:\n",
        "  - lib/l10n/app_en.arb\n",
        "  - lib/l10n/missing.arb\n",
        "  - lib/l10n/broken.arb\n",
        "  - lib/l10n/app_vi.arb\n",
        "prefix: l10n\n",
    );
    let temp_dir = project(config);
    let root = temp_dir.path();
    fs::write(root.join("lib/l10n/broken.arb"), "not an object").unwrap();

    let outcome = extract(root, "Save", &DefaultsPrompter, &Preset::default()).unwrap();

    assert_eq!(outcome.reference, "l10n.save");
    assert_eq!(
        outcome.report.updated,
        vec![
            root.join("lib/l10n/app_en.arb"),
            root.join("lib/l10n/app_vi.arb")
        ]
    );
    assert_eq!(outcome.report.failed.len(), 2);
    assert!(matches!(outcome.report.failed[0].1, Error::IoError(_)));
    assert!(matches!(outcome.report.failed[1].1, Error::MalformedFile));
    assert_eq!(read(root, "lib/l10n/broken.arb"), "not an object");
    assert!(read(root, "lib/l10n/app_vi.arb").contains("\"save\": \"Save\""));
}

#[test]
fn test_extract_without_config_touches_nothing() {
    let temp_dir = project(CONFIG);
    let root = temp_dir.path();
    fs::remove_file(root.join("extract_localization_config.yaml")).unwrap();
    let en_path = root.join("lib/l10n/app_en.arb");
    let modified = fs::metadata(&en_path).unwrap().modified().unwrap();

    let result = extract(root, "Save", &DefaultsPrompter, &Preset::default());

    assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    assert_eq!(read(root, "lib/l10n/app_en.arb"), EN);
    assert_eq!(read(root, "lib/l10n/app_vi.arb"), VI);
    assert_eq!(
        fs::metadata(&en_path).unwrap().modified().unwrap(),
        modified
    );
}

#[test]
fn test_extract_with_empty_type_touches_nothing() {
    let temp_dir = project(CONFIG);
    let root = temp_dir.path();
    let prompter = ScriptedPrompter::new(&["summary", "String", "  "]);

    let result = extract(root, "$user has $count items", &prompter, &Preset::default());

    match result {
        Err(Error::MissingPlaceholderType { placeholder }) => assert_eq!(placeholder, "count"),
        other => panic!("Expected MissingPlaceholderType, got {other:?}"),
    }
    assert_eq!(read(root, "lib/l10n/app_en.arb"), EN);
    assert_eq!(read(root, "lib/l10n/app_vi.arb"), VI);
}

#[test]
fn test_extract_with_broken_config_touches_nothing() {
    let temp_dir = project("outputFiles: [\nprefix");
    let root = temp_dir.path();

    let result = extract(root, "Save", &DefaultsPrompter, &Preset::default());

    assert!(matches!(result, Err(Error::ConfigParseError { .. })));
    assert_eq!(read(root, "lib/l10n/app_en.arb"), EN);
}

#[test]
fn test_replace_selection() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("main.dart");
    fs::write(&source, "Text('Hi $name'),\nText('Hi $name'),\n").unwrap();

    replace_selection(&source, "'Hi $name'", "S.current.greet(name)").unwrap();
    assert_eq!(
        fs::read_to_string(&source).unwrap(),
        "Text(S.current.greet(name)),\nText('Hi $name'),\n"
    );

    match replace_selection(&source, "'Bye'", "S.current.bye") {
        Err(Error::SelectionNotFound { .. }) => (),
        other => panic!("Expected SelectionNotFound, got {other:?}"),
    }
}

#[test]
fn test_finish_refuses_incomplete_patch() {
    let config = concat!(
        "outputFiles:\n",
        "  - lib/l10n/app_en.arb\n",
        "  - lib/l10n/missing.arb\n",
        "prefix: l10n\n",
        "generator: touch gen.marker\n",
    );
    let temp_dir = project(config);
    let root = temp_dir.path();
    let source = root.join("main.dart");
    fs::write(&source, "Text('Save'),\n").unwrap();

    let outcome = extract(root, "'Save'", &DefaultsPrompter, &Preset::default()).unwrap();
    let result = finish(root, &outcome, "'Save'", Some(&source), true);

    match result {
        Err(Error::IncompletePatch { skipped }) => {
            assert_eq!(skipped, root.join("lib/l10n/missing.arb").display().to_string())
        }
        other => panic!("Expected IncompletePatch, got {other:?}"),
    }
    assert_eq!(read(root, "main.dart"), "Text('Save'),\n");
    assert!(!root.join("gen.marker").exists());
}

#[test]
fn test_finish_without_followup_steps() {
    let temp_dir = project(CONFIG);
    let root = temp_dir.path();

    let outcome = extract(root, "Save", &DefaultsPrompter, &Preset::default()).unwrap();

    assert_eq!(finish(root, &outcome, "Save", None, true).unwrap(), None);
}

#[cfg(unix)]
#[test]
fn test_finish_runs_generator_after_substitution() {
    let temp_dir = project(&format!("{CONFIG}generator: touch gen.marker\n"));
    let root = temp_dir.path();
    let source = root.join("main.dart");
    fs::write(&source, "Text('Save'),\n").unwrap();

    let outcome = extract(root, "'Save'", &DefaultsPrompter, &Preset::default()).unwrap();
    let command = finish(root, &outcome, "'Save'", Some(&source), true).unwrap();

    assert_eq!(command.as_deref(), Some("touch gen.marker"));
    assert_eq!(read(root, "main.dart"), "Text(S.of(context).save),\n");
    assert!(root.join("gen.marker").exists());
}

#[cfg(unix)]
#[test]
fn test_finish_skip_generator() {
    let temp_dir = project(&format!("{CONFIG}generator: touch gen.marker\n"));
    let root = temp_dir.path();

    let outcome = extract(root, "Save", &DefaultsPrompter, &Preset::default()).unwrap();

    assert_eq!(finish(root, &outcome, "Save", None, false).unwrap(), None);
    assert!(!root.join("gen.marker").exists());
}

#[cfg(unix)]
#[test_log::test]
fn test_finish_runs_generator_when_substitution_fails() {
    let temp_dir = project(&format!("{CONFIG}generator: touch gen.marker\n"));
    let root = temp_dir.path();
    let source = root.join("main.dart");
    fs::write(&source, "Text('Cancel'),\n").unwrap();

    let outcome = extract(root, "'Save'", &DefaultsPrompter, &Preset::default()).unwrap();
    let result = finish(root, &outcome, "'Save'", Some(&source), true);

    assert!(matches!(result, Err(Error::SelectionNotFound { .. })));
    assert!(root.join("gen.marker").exists());
    assert_eq!(read(root, "main.dart"), "Text('Cancel'),\n");
}

#[cfg(unix)]
#[test]
fn test_finish_reports_generator_failure() {
    let temp_dir = project(&format!("{CONFIG}generator: test -e missing.file\n"));
    let root = temp_dir.path();

    let outcome = extract(root, "Save", &DefaultsPrompter, &Preset::default()).unwrap();

    match finish(root, &outcome, "Save", None, true) {
        Err(Error::GeneratorNonZeroExit { command, code }) => {
            assert_eq!(command, "test -e missing.file");
            assert_eq!(code, Some(1));
        }
        other => panic!("Expected GeneratorNonZeroExit, got {other:?}"),
    }
}
