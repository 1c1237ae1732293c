//! Unit tests for the lexer public API

use parser::{Arena, Keyword, LexemeKind, Lexer, NameInterner, Punct};

fn scan_all(source: &str) -> Vec<LexemeKind> {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let mut lexer = Lexer::new(source);
    let mut kinds = Vec::new();
    loop {
        let lexeme = lexer.next(&mut arena, &mut interner);
        if lexeme.kind == LexemeKind::Eof {
            break;
        }
        kinds.push(lexeme.kind.clone());
    }
    kinds
}

#[test]
fn test_scans_declaration() {
    let kinds = scan_all("local answer = 42");
    assert_eq!(kinds.len(), 4);
    assert_eq!(kinds[0], LexemeKind::Keyword(Keyword::Local));
    assert!(matches!(&kinds[1], LexemeKind::Name { text, id } if text == "answer" && id.is_some()));
    assert_eq!(kinds[2], LexemeKind::Punct(Punct::Assign));
    assert_eq!(kinds[3], LexemeKind::Number { value: 42.0 });
}

#[test]
fn test_read_names_disabled_skips_interning() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let mut lexer = Lexer::new("answer");
    lexer.set_read_names(false);
    let lexeme = lexer.next(&mut arena, &mut interner);
    assert!(matches!(&lexeme.kind, LexemeKind::Name { id: None, .. }));
    assert!(interner.is_empty());
}

#[test]
fn test_comments_skipped_by_default() {
    let kinds = scan_all("-- note\nlocal x");
    assert_eq!(kinds[0], LexemeKind::Keyword(Keyword::Local));
}

#[test]
fn test_comments_surfaced_when_requested() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let mut lexer = Lexer::new("-- note\nlocal x");
    lexer.set_skip_comments(false);
    let lexeme = lexer.next(&mut arena, &mut interner);
    assert!(matches!(
        &lexeme.kind,
        LexemeKind::Comment { hot: false, text } if text.trim() == "note"
    ));
}

#[test]
fn test_header_hot_comment_is_recorded() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let mut lexer = Lexer::new("--!strict\nlocal x = 1\n--!late\n");
    loop {
        if lexer.next(&mut arena, &mut interner).kind == LexemeKind::Eof {
            break;
        }
    }
    let hot = lexer.take_hot_comments();
    assert_eq!(hot.len(), 2);
    assert!(hot[0].header);
    assert_eq!(hot[0].text.trim(), "strict");
    assert!(!hot[1].header);
    assert!(lexer.take_hot_comments().is_empty());
}

#[test]
fn test_attribute_marker() {
    let kinds = scan_all("@native function");
    assert!(matches!(&kinds[0], LexemeKind::Attribute { name } if name == "native"));
    assert_eq!(kinds[1], LexemeKind::Keyword(Keyword::Function));
}

#[test]
fn test_string_escapes_and_hex_numbers() {
    let kinds = scan_all("\"a\\nb\" 0x10");
    assert!(matches!(&kinds[0], LexemeKind::Str { value } if value == "a\nb"));
    assert_eq!(kinds[1], LexemeKind::Number { value: 16.0 });
}

#[test]
fn test_unterminated_string_is_broken() {
    let kinds = scan_all("\"oops");
    assert!(matches!(&kinds[0], LexemeKind::Broken { .. }));
}

#[test]
fn test_display_strings_match_diagnostic_spelling() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let mut lexer = Lexer::new(")");
    let lexeme = lexer.next(&mut arena, &mut interner).clone();
    assert_eq!(lexeme.to_display_string(), "')'");
    let eof = lexer.next(&mut arena, &mut interner).clone();
    assert_eq!(eof.to_display_string(), "<eof>");
}

#[test]
fn test_spans_use_zero_based_lines() {
    let mut arena = Arena::new();
    let mut interner = NameInterner::new(&arena);
    let mut lexer = Lexer::new("local\nx");
    lexer.next(&mut arena, &mut interner);
    let lexeme = lexer.next(&mut arena, &mut interner);
    assert_eq!(lexeme.span.begin.line, 1);
    assert_eq!(lexeme.span.begin.column, 0);
}
