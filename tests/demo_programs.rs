// Whole-file tests over the sample programs in demos/

use jsparse::parser::lexer::tokenize;
use jsparse::parser::parse::parse;
use jsparse::parser::profile::Profile;
use jsparse::parser::validate::{check_program, Diagnostic};
use jsparse::render::render;
use jsparse::session::analyze;
use std::fs;
use std::path::Path;

fn read_demo(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// Parse a demo under `profile`, check it renders stably, return the rendering
fn round_trip(name: &str, profile: Profile) -> String {
    let source = read_demo(name);
    let lexed = tokenize(&source, profile);
    assert!(lexed.warnings.is_empty(), "{name}: {:?}", lexed.warnings);

    let program = parse(&lexed.tokens, profile).unwrap_or_else(|e| panic!("{name}: {e}"));
    let rendered = render(&program);

    let reparsed = parse(&tokenize(&rendered, profile).tokens, profile)
        .unwrap_or_else(|e| panic!("{name} rendering does not parse: {e}\n{rendered}"));
    assert_eq!(render(&reparsed), rendered, "{name} rendering is not stable");

    rendered
}

#[test]
fn test_declarations_demo() {
    let rendered = round_trip("declarations.js", Profile::Declarations);
    assert_eq!(
        rendered,
        "var count = 0;\nlet name = \"parser\";\nconst ratio = 2.5;\nlet pending;\nconst flag = true;\nvar nothing = null;"
    );
}

#[test]
fn test_collections_demo() {
    let rendered = round_trip("collections.js", Profile::Objects);
    assert!(rendered.contains("const point = {x: 1, y: 2.0};"));
    assert!(rendered.contains("nested: {on: false}"));

    let analysis = analyze(&read_demo("collections.js"), Profile::Objects);
    assert!(matches!(
        analysis.notes.as_slice(),
        [Diagnostic::DuplicateKey { key, location }] if key == "1" && location.line == 4
    ));
}

#[test]
fn test_loops_demo() {
    let rendered = round_trip("loops.js", Profile::While);
    assert!(rendered.contains("while ((i < 10) && (total <= 100)) { "));
    assert!(rendered.contains("while ((i > 0) || ((i == 0) && (total != 0))) { i = (i - 1); }"));
}

#[test]
fn test_functions_demo() {
    let rendered = round_trip("functions.js", Profile::Functions);
    assert!(rendered.starts_with("function area(width, height) { return (width * height); }\n"));

    let source = read_demo("functions.js");
    let program = parse(&tokenize(&source, Profile::Functions).tokens, Profile::Functions).unwrap();
    let notes = check_program(&program);
    assert_eq!(notes.len(), 1);
    assert!(matches!(
        &notes[0],
        Diagnostic::DuplicateParam { function, name, .. } if function == "twice" && name == "x"
    ));
}

#[test]
fn test_every_demo_parses_under_full_profile() {
    for name in ["declarations.js", "collections.js", "loops.js", "functions.js"] {
        round_trip(name, Profile::Full);
    }
}

#[test]
fn test_loops_demo_under_arrays_profile() {
    let source = read_demo("loops.js");
    let lexed = tokenize(&source, Profile::Arrays);

    // Each '&' and '|' is skipped with a warning
    assert_eq!(lexed.warnings.len(), 6);
    assert!(parse(&lexed.tokens, Profile::Arrays).is_err());
}
