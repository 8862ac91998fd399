// src/classify/glob.rs
// =============================================================================
// Shell-style glob patterns matched against whole URL strings.
//
// A glob is translated once into an anchored regex:
//   *       -> [^/]*        (stays inside one path segment)
//   **      -> .*           (crosses segments)
//   ?       -> [^/]
//   [a-z]   -> [a-z&&[^/]]  ([!..] / [^..] negate)
//   {a,b}   -> (?:a|b)
//   !(p)    -> a named capture of [^/]*, checked afterwards to NOT match p
//   \x      -> literal x
//
// The regex crate has no lookaround, so `!(p)` cannot live inside the regex
// itself. The negated fragment is captured and tested against the compiled
// inner glob after the outer match succeeds.
// =============================================================================

use regex::Regex;

use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone)]
pub struct Glob {
    regex: Regex,
    negations: Vec<Glob>,
}

impl Glob {
    pub fn new(glob: &str) -> ConfigResult<Self> {
        let mut translator = Translator {
            glob,
            chars: glob.chars().collect(),
            pos: 0,
            negations: Vec::new(),
        };
        let body = translator.sequence(false)?;
        let regex = Regex::new(&format!("^{}$", body)).map_err(|e| invalid(glob, e.to_string()))?;

        Ok(Glob {
            regex,
            negations: translator.negations,
        })
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        if self.negations.is_empty() {
            return self.regex.is_match(candidate);
        }

        let Some(captures) = self.regex.captures(candidate) else {
            return false;
        };

        self.negations.iter().enumerate().all(|(i, negated)| {
            match captures.name(&negation_group(i)) {
                Some(fragment) => !negated.is_match(fragment.as_str()),
                // Group sat in an alternative that did not participate
                None => true,
            }
        })
    }
}

fn negation_group(index: usize) -> String {
    format!("neg{}", index)
}

fn invalid(glob: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidGlob {
        glob: glob.to_string(),
        reason: reason.into(),
    }
}

struct Translator<'a> {
    glob: &'a str,
    chars: Vec<char>,
    pos: usize,
    negations: Vec<Glob>,
}

impl Translator<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    // Translates until end of input, or until ',' / '}' inside an alternation
    fn sequence(&mut self, in_alternation: bool) -> ConfigResult<String> {
        let mut out = String::new();

        loop {
            match self.peek() {
                None if in_alternation => return Err(invalid(self.glob, "unclosed '{'")),
                None => break,
                Some(',') | Some('}') if in_alternation => break,
                Some('*') => {
                    self.bump();
                    if self.peek() == Some('*') {
                        self.bump();
                        out.push_str(".*");
                    } else {
                        out.push_str("[^/]*");
                    }
                }
                Some('?') => {
                    self.bump();
                    out.push_str("[^/]");
                }
                Some('[') => {
                    self.bump();
                    out.push_str(&self.class()?);
                }
                Some('{') => {
                    self.bump();
                    out.push_str(&self.alternation()?);
                }
                Some('!') if self.peek_next() == Some('(') => {
                    self.pos += 2;
                    out.push_str(&self.negation()?);
                }
                Some('\\') => {
                    self.bump();
                    let escaped = self
                        .bump()
                        .ok_or_else(|| invalid(self.glob, "trailing '\\'"))?;
                    out.push_str(&regex::escape(&escaped.to_string()));
                }
                Some(c) => {
                    self.bump();
                    out.push_str(&regex::escape(&c.to_string()));
                }
            }
        }

        Ok(out)
    }

    // Called after '{'
    fn alternation(&mut self) -> ConfigResult<String> {
        let mut branches = Vec::new();
        loop {
            branches.push(self.sequence(true)?);
            match self.bump() {
                Some(',') => continue,
                Some('}') => break,
                _ => return Err(invalid(self.glob, "unclosed '{'")),
            }
        }
        Ok(format!("(?:{})", branches.join("|")))
    }

    // Called after '['
    fn class(&mut self) -> ConfigResult<String> {
        let negated = matches!(self.peek(), Some('!') | Some('^'));
        if negated {
            self.bump();
        }

        let mut body = String::new();
        let mut first = true;
        loop {
            match self.bump() {
                None => return Err(invalid(self.glob, "unclosed '['")),
                Some(']') if !first => break,
                Some(c @ ('\\' | '[' | ']' | '^' | '&' | '~')) => {
                    body.push('\\');
                    body.push(c);
                }
                Some(c) => body.push(c),
            }
            first = false;
        }

        if negated {
            Ok(format!("[^/{}]", body))
        } else {
            Ok(format!("[{}&&[^/]]", body))
        }
    }

    // Called after "!("
    fn negation(&mut self) -> ConfigResult<String> {
        let mut depth = 1usize;
        let mut inner = String::new();
        loop {
            match self.bump() {
                None => return Err(invalid(self.glob, "unclosed '!('")),
                Some('(') => {
                    depth += 1;
                    inner.push('(');
                }
                Some(')') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    inner.push(')');
                }
                Some(c) => inner.push(c),
            }
        }

        let negated = Glob::new(&inner)?;
        let group = negation_group(self.negations.len());
        self.negations.push(negated);
        Ok(format!("(?P<{}>[^/]*)", group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(pattern: &str) -> Glob {
        Glob::new(pattern).unwrap()
    }

    #[test]
    fn test_star_stays_in_segment() {
        let g = glob("https://example.com/part/*");
        assert!(g.is_match("https://example.com/part/100"));
        assert!(!g.is_match("https://example.com/part/100/extra"));
        assert!(!g.is_match("https://example.com/chapter/100"));
    }

    #[test]
    fn test_double_star_crosses_segments() {
        let g = glob("https://example.com/**");
        assert!(g.is_match("https://example.com/a/b/c"));
        assert!(!g.is_match("https://other.com/a"));
    }

    #[test]
    fn test_star_dot_star_requires_dot() {
        let g = glob("https://www.revisor.mn.gov/statutes/cite/*.*");
        assert!(g.is_match("https://www.revisor.mn.gov/statutes/cite/1.01"));
        assert!(!g.is_match("https://www.revisor.mn.gov/statutes/cite/1"));
    }

    #[test]
    fn test_negated_segment() {
        let g = glob("https://www.revisor.mn.gov/statutes/cite/!(*.*)");
        assert!(g.is_match("https://www.revisor.mn.gov/statutes/cite/1"));
        assert!(g.is_match("https://www.revisor.mn.gov/statutes/cite/216B"));
        assert!(!g.is_match("https://www.revisor.mn.gov/statutes/cite/1.01"));
        assert!(!g.is_match("https://www.revisor.mn.gov/statutes/cite/1/2"));
    }

    #[test]
    fn test_dots_and_question_marks_are_literal_or_single() {
        let g = glob("https://a.test/?x");
        assert!(g.is_match("https://a.test/ax"));
        assert!(!g.is_match("https://a.test/x"));
        // '.' in the glob is literal, not regex "any char"
        assert!(!glob("https://a.test/1.0").is_match("https://a.test/100"));
    }

    #[test]
    fn test_character_classes() {
        let g = glob("https://a.test/[0-9]*");
        assert!(g.is_match("https://a.test/7abc"));
        assert!(!g.is_match("https://a.test/abc"));

        let n = glob("https://a.test/[!0-9]*");
        assert!(n.is_match("https://a.test/abc"));
        assert!(!n.is_match("https://a.test/7abc"));
    }

    #[test]
    fn test_alternation() {
        let g = glob("https://a.test/{part,chapter}/*");
        assert!(g.is_match("https://a.test/part/1"));
        assert!(g.is_match("https://a.test/chapter/1"));
        assert!(!g.is_match("https://a.test/cite/1"));
    }

    #[test]
    fn test_escape() {
        let g = glob(r"https://a.test/\*");
        assert!(g.is_match("https://a.test/*"));
        assert!(!g.is_match("https://a.test/x"));
    }

    #[test]
    fn test_malformed_globs_rejected() {
        for bad in ["https://a.test/[abc", "https://a.test/{a,b", "https://a.test/!(x", "x\\"] {
            assert!(
                matches!(Glob::new(bad), Err(ConfigError::InvalidGlob { .. })),
                "expected '{}' to be rejected",
                bad
            );
        }
    }
}
