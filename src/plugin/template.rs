//! Positional placeholder substitution for user parameter commands.
//!
//! A flexible user parameter (`key[*]`) has a command template in which
//! `$1` .. `$9` stand for the parameters of the request.
//!
//! # Syntax
//!
//! - `$1` - `$9` - Substitutes the parameter with that 1-based index
//! - `$` followed by anything else (`$$`, `$0`, `$x`, end of string) is kept
//!   as a literal `$`; scanning resumes with the next character
//! - A placeholder whose index exceeds the number of parameters is kept
//!   verbatim
//!
//! # Safety
//!
//! Unless unsafe parameters are enabled, a substituted parameter must not
//! contain any of [`FORBIDDEN_CHARACTERS`]. Only parameters that are actually
//! substituted are checked.
//!
//! Templates are compiled once into literal and placeholder segments; a
//! request only concatenates segments.

use crate::error::ParameterError;
use std::fmt::Write;

/// Characters rejected in parameters unless unsafe parameters are enabled.
pub const FORBIDDEN_CHARACTERS: &str = "\\'\"`*?[]{}~$!&;()<>|#@\n";

/// A piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim.
    Literal(String),
    /// A `$N` placeholder, holding the 1-based index `N` (1..=9).
    Placeholder(usize),
}

/// A command template compiled into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Compile a template string.
    ///
    /// Compilation cannot fail; malformed placeholders are literal text.
    pub fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(i) = rest.find('$') {
            literal.push_str(&rest[..i]);
            match rest.as_bytes().get(i + 1) {
                Some(&digit @ b'1'..=b'9') => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(usize::from(digit - b'0')));
                    rest = &rest[i + 2..];
                }
                _ => {
                    literal.push('$');
                    rest = &rest[i + 1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// The template text as configured.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the template against request parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use userparam::plugin::Template;
    ///
    /// let template = Template::compile("echo $1 $2 $3");
    /// let command = template.render(&["a", "b"], false).unwrap();
    /// assert_eq!(command, "echo a b $3");
    /// ```
    pub fn render<S: AsRef<str>>(
        &self,
        params: &[S],
        allow_unsafe: bool,
    ) -> Result<String, ParameterError> {
        let params_len: usize = params.iter().map(|p| p.as_ref().len()).sum();
        let mut out = String::with_capacity(self.source.len() + params_len);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(index) => match params.get(index - 1) {
                    Some(param) => {
                        let param = param.as_ref();
                        if !allow_unsafe {
                            check_parameter(param)?;
                        }
                        out.push_str(param);
                    }
                    None => {
                        let _ = write!(out, "${}", index);
                    }
                },
            }
        }

        Ok(out)
    }
}

/// Reject a parameter containing a forbidden character.
///
/// The error names the first forbidden character found.
pub fn check_parameter(param: &str) -> Result<(), ParameterError> {
    match param.chars().find(|c| FORBIDDEN_CHARACTERS.contains(*c)) {
        Some(c) => Err(ParameterError::ForbiddenCharacter(c)),
        None => Ok(()),
    }
}

/// Build the command for a request.
///
/// A non-flexible template accepts no parameters and is returned unchanged.
/// A flexible template has its placeholders substituted.
pub fn substitute<S: AsRef<str>>(
    template: &str,
    flexible: bool,
    params: &[S],
    allow_unsafe: bool,
) -> Result<String, ParameterError> {
    if !flexible {
        if !params.is_empty() {
            return Err(ParameterError::ParametersNotAllowed);
        }
        return Ok(template.to_string());
    }

    Template::compile(template).render(params, allow_unsafe)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_compile_segments() {
        let template = Template::compile("echo $1-$2");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("echo ".to_string()),
                Segment::Placeholder(1),
                Segment::Literal("-".to_string()),
                Segment::Placeholder(2),
            ]
        );
        assert_eq!(template.source(), "echo $1-$2");
    }

    #[test]
    fn test_compile_keeps_invalid_placeholders_literal() {
        let template = Template::compile("a $0 $x $");
        assert_eq!(
            template.segments(),
            &[Segment::Literal("a $0 $x $".to_string())]
        );
    }

    #[test]
    fn test_compile_empty_template() {
        assert!(Template::compile("").segments().is_empty());
    }

    #[test]
    fn test_simple_substitution() {
        let result = substitute("echo $1 $2", true, &["a", "b"], false).unwrap();
        assert_eq!(result, "echo a b");
    }

    #[test]
    fn test_placeholders_in_any_order_and_repeated() {
        let result = substitute("$2$1$2", true, &["x", "y"], false).unwrap();
        assert_eq!(result, "yxy");
    }

    #[test]
    fn test_ninth_placeholder() {
        let params = ["1", "2", "3", "4", "5", "6", "7", "8", "nine"];
        let result = substitute("v=$9", true, &params, false).unwrap();
        assert_eq!(result, "v=nine");
    }

    #[test]
    fn test_two_digit_placeholder_is_single_digit_plus_text() {
        let params = ["one", "2", "3", "4", "5", "6", "7", "8", "9", "10"];
        let result = substitute("$10", true, &params, false).unwrap();
        assert_eq!(result, "one0");
    }

    #[test]
    fn test_out_of_range_placeholder_kept() {
        let result = substitute("echo $1 $3", true, &["a"], false).unwrap();
        assert_eq!(result, "echo a $3");
    }

    #[test]
    fn test_no_params_keeps_all_placeholders() {
        let result = substitute("echo $1 $2", true, &NONE, false).unwrap();
        assert_eq!(result, "echo $1 $2");
    }

    #[test]
    fn test_double_dollar_kept() {
        let result = substitute("echo $$", true, &["a"], false).unwrap();
        assert_eq!(result, "echo $$");
    }

    #[test]
    fn test_double_dollar_before_placeholder() {
        // The first `$` is literal, the second starts a placeholder.
        let result = substitute("$$1", true, &["a"], false).unwrap();
        assert_eq!(result, "$a");
    }

    #[test]
    fn test_trailing_dollar_kept() {
        let result = substitute("cost $1$", true, &["5"], false).unwrap();
        assert_eq!(result, "cost 5$");
    }

    #[test]
    fn test_dollar_zero_kept() {
        let result = substitute("$0 $1", true, &["a"], false).unwrap();
        assert_eq!(result, "$0 a");
    }

    #[test]
    fn test_empty_parameter_substitution() {
        let result = substitute("[$1]", true, &[""], false).unwrap();
        assert_eq!(result, "[]");
    }

    #[test]
    fn test_unicode_literals_preserved() {
        let result = substitute("échο $1 ✓", true, &["ü"], false).unwrap();
        assert_eq!(result, "échο ü ✓");
    }

    #[test]
    fn test_every_forbidden_character_rejected() {
        for c in FORBIDDEN_CHARACTERS.chars() {
            let param = format!("a{}b", c);
            let result = substitute("echo $1", true, &[param.as_str()], false);
            assert_eq!(
                result,
                Err(ParameterError::ForbiddenCharacter(c)),
                "character {:?} should be rejected",
                c
            );
        }
    }

    #[test]
    fn test_forbidden_character_allowed_when_unsafe() {
        for c in FORBIDDEN_CHARACTERS.chars() {
            let param = format!("a{}b", c);
            let result = substitute("echo $1", true, &[param.as_str()], true).unwrap();
            assert_eq!(result, format!("echo {}", param));
        }
    }

    #[test]
    fn test_first_forbidden_character_is_reported() {
        let err = substitute("echo $1", true, &["ok;then|pipe"], false).unwrap_err();
        assert_eq!(err, ParameterError::ForbiddenCharacter(';'));
        assert_eq!(err.to_string(), "Character \";\" is not allowed");
    }

    #[test]
    fn test_newline_reported_as_hex() {
        let err = substitute("echo $1", true, &["a\nb"], false).unwrap_err();
        assert_eq!(err.to_string(), "Character 0x0a is not allowed");
    }

    #[test]
    fn test_permitted_punctuation_passes() {
        let param = "a-b_c.d,e:f/g=h+i%j^k l\tm";
        let result = substitute("x $1", true, &[param], false).unwrap();
        assert_eq!(result, format!("x {}", param));
    }

    #[test]
    fn test_unreferenced_parameter_not_checked() {
        let result = substitute("echo $1", true, &["safe", "rm -rf /;"], false).unwrap();
        assert_eq!(result, "echo safe");
    }

    #[test]
    fn test_out_of_range_placeholder_not_checked() {
        let result = substitute("echo $2", true, &["$(reboot)"], false).unwrap();
        assert_eq!(result, "echo $2");
    }

    #[test]
    fn test_template_text_itself_is_never_checked() {
        let result = substitute("echo $1 | wc -c; true", true, &["abc"], false).unwrap();
        assert_eq!(result, "echo abc | wc -c; true");
    }

    #[test]
    fn test_not_flexible_without_params() {
        let result = substitute("echo $1", false, &NONE, false).unwrap();
        assert_eq!(result, "echo $1");
    }

    #[test]
    fn test_not_flexible_rejects_params() {
        let err = substitute("echo", false, &["a"], true).unwrap_err();
        assert_eq!(err, ParameterError::ParametersNotAllowed);
        assert_eq!(err.to_string(), "Parameters are not allowed.");
    }

    #[test]
    fn test_not_flexible_rejects_single_empty_param() {
        let err = substitute("echo", false, &[""], false).unwrap_err();
        assert_eq!(err, ParameterError::ParametersNotAllowed);
    }

    #[test]
    fn test_render_matches_substitute() {
        let template = Template::compile("a$1b$$c$2d$9$");
        let params = ["x", "y"];
        assert_eq!(
            template.render(&params, false).unwrap(),
            substitute("a$1b$$c$2d$9$", true, &params, false).unwrap()
        );
        assert_eq!(template.render(&params, false).unwrap(), "axb$$cyd$9$");
    }

    #[test]
    fn test_owned_string_params() {
        let params = vec!["a".to_string(), "b".to_string()];
        let result = Template::compile("$2$1").render(&params, false).unwrap();
        assert_eq!(result, "ba");
    }
}
