//! Tests for item key parsing.

use super::{ItemKey, KeyError, parse_key};

fn key(name: &str, params: &[&str]) -> ItemKey {
    ItemKey {
        name: name.to_string(),
        params: params.iter().map(|p| p.to_string()).collect(),
    }
}

#[test]
fn test_bare_name() {
    assert_eq!(parse_key("system.uptime").unwrap(), key("system.uptime", &[]));
}

#[test]
fn test_name_charset() {
    assert_eq!(
        parse_key("my_check-2.sub").unwrap(),
        key("my_check-2.sub", &[])
    );
}

#[test]
fn test_wildcard_parameter() {
    assert_eq!(parse_key("mycheck[*]").unwrap(), key("mycheck", &["*"]));
}

#[test]
fn test_empty_brackets_yield_one_empty_parameter() {
    assert_eq!(parse_key("mycheck[]").unwrap(), key("mycheck", &[""]));
}

#[test]
fn test_multiple_unquoted_parameters() {
    assert_eq!(
        parse_key("vfs.fs.size[/,free]").unwrap(),
        key("vfs.fs.size", &["/", "free"])
    );
}

#[test]
fn test_leading_spaces_skipped_trailing_kept() {
    assert_eq!(
        parse_key("k[  a , b]").unwrap(),
        key("k", &["a ", "b"])
    );
}

#[test]
fn test_empty_parameters_between_commas() {
    assert_eq!(parse_key("k[a,,b,]").unwrap(), key("k", &["a", "", "b", ""]));
}

#[test]
fn test_quoted_parameter_with_separators() {
    assert_eq!(
        parse_key(r#"k["a,b]c", d]"#).unwrap(),
        key("k", &["a,b]c", "d"])
    );
}

#[test]
fn test_quoted_parameter_escape() {
    assert_eq!(
        parse_key(r#"k["say \"hi\"", "back\slash"]"#).unwrap(),
        key("k", &["say \"hi\"", "back\\slash"])
    );
}

#[test]
fn test_spaces_after_quoted_parameter() {
    assert_eq!(parse_key(r#"k["a"  ,"b" ]"#).unwrap(), key("k", &["a", "b"]));
}

#[test]
fn test_array_parameter_kept_raw() {
    assert_eq!(
        parse_key(r#"k[[a,"b]"],c]"#).unwrap(),
        key("k", &[r#"[a,"b]"]"#, "c"])
    );
}

#[test]
fn test_empty_expression() {
    assert_eq!(parse_key(""), Err(KeyError::MissingName));
}

#[test]
fn test_invalid_leading_character() {
    assert_eq!(
        parse_key("[*]"),
        Err(KeyError::UnexpectedCharacter {
            ch: '[',
            position: 0
        })
    );
}

#[test]
fn test_invalid_name_character() {
    assert_eq!(
        parse_key("my check"),
        Err(KeyError::UnexpectedCharacter {
            ch: ' ',
            position: 2
        })
    );
}

#[test]
fn test_missing_closing_bracket() {
    assert_eq!(parse_key("k[a,b"), Err(KeyError::UnterminatedParameters));
    assert_eq!(parse_key("k["), Err(KeyError::UnterminatedParameters));
}

#[test]
fn test_unterminated_quote() {
    assert_eq!(
        parse_key(r#"k["abc]"#),
        Err(KeyError::UnterminatedQuote { position: 2 })
    );
}

#[test]
fn test_text_after_closing_bracket() {
    assert_eq!(
        parse_key("k[a]x"),
        Err(KeyError::UnexpectedCharacter {
            ch: 'x',
            position: 4
        })
    );
}

#[test]
fn test_garbage_after_quoted_parameter() {
    assert_eq!(
        parse_key(r#"k["a"b]"#),
        Err(KeyError::UnexpectedCharacter {
            ch: 'b',
            position: 5
        })
    );
}

#[test]
fn test_nested_array_rejected() {
    assert_eq!(
        parse_key("k[[a,[b]]]"),
        Err(KeyError::NestedArray { position: 5 })
    );
}

#[test]
fn test_error_display() {
    assert_eq!(
        KeyError::UnterminatedParameters.to_string(),
        "missing ']' at the end of parameters"
    );
    assert_eq!(
        KeyError::UnexpectedCharacter {
            ch: 'x',
            position: 4
        }
        .to_string(),
        "unexpected character 'x' at position 4"
    );
}
