//! The grammar text format adapter (out of the core's scope per the crate's
//! "external collaborators" boundary, but specified precisely so callers get
//! bit-compatible parsing): lines of `<weight>: <lhs> -> <rhs>`, with `->`
//! and `\u{2192}` as arrow synonyms, `#`-prefixed (or blank) lines skipped,
//! and a token classified as a non-terminal iff its first character is
//! uppercase or it begins with `@`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::BadInput;
use crate::grammar::CFG;
use crate::nonterminal::NT;
use crate::production::BodyElem;
use crate::symbol::Sym;

lazy_static! {
    static ref RULE_RE: Regex =
        Regex::new(r"^\s*(?P<weight>[0-9eE.+\-]+)\s*:\s*(?P<lhs>\S+)\s*(?:->|\x{2192})\s*(?P<rhs>.*?)\s*$")
            .unwrap();
}

fn is_nonterminal_token(tok: &str) -> bool {
    tok.starts_with('@') || tok.chars().next().map_or(false, |c| c.is_uppercase())
}

fn symbol_for(tok: &str) -> BodyElem {
    if is_nonterminal_token(tok) {
        BodyElem::Nonterminal(NT::new(tok))
    } else {
        BodyElem::Terminal(Sym::new(tok))
    }
}

/// Parses a grammar in the text format described above. `comment_prefix`
/// defaults to `"#"` in `parse`; `start` names the grammar's start
/// non-terminal (the text format carries no `%start` declaration of its
/// own, unlike a Yacc grammar, so the caller supplies it).
pub fn parse_with(text: &str, comment_prefix: &str, start: NT) -> Result<CFG, BadInput> {
    let mut cfg = CFG::with_start(start);
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(comment_prefix) {
            continue;
        }
        let caps = RULE_RE.captures(line).ok_or_else(|| BadInput {
            line: raw_line.to_string(),
            reason: "expected `<weight>: <lhs> -> <rhs>`".to_string(),
        })?;
        let weight: f64 = caps["weight"].parse().map_err(|_| BadInput {
            line: raw_line.to_string(),
            reason: format!("`{}` is not a valid weight", &caps["weight"]),
        })?;
        let lhs = &caps["lhs"];
        if !is_nonterminal_token(lhs) {
            return Err(BadInput {
                line: raw_line.to_string(),
                reason: format!("left-hand side `{}` is not a non-terminal", lhs),
            });
        }
        let head = NT::new(lhs);
        let rhs = caps["rhs"].trim();
        if rhs.is_empty() {
            return Err(BadInput {
                line: raw_line.to_string(),
                reason: "missing right-hand side".to_string(),
            });
        }
        let body: Vec<BodyElem> = if rhs == "ε" {
            vec![BodyElem::Terminal(Sym::epsilon())]
        } else {
            rhs.split_whitespace().map(symbol_for).collect()
        };

        cfg.add(weight, head, body).map_err(|e| BadInput {
            line: raw_line.to_string(),
            reason: e.0,
        })?;
    }
    Ok(cfg)
}

/// `parse_with` using the default comment prefix `"#"`.
pub fn parse(text: &str, start: NT) -> Result<CFG, BadInput> {
    parse_with(text, "#", start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_grammar() {
        let text = "\
            # a tiny grammar
            1: S -> Y Z
            0.5: Y -> Z Y
            0.5: Y -> a
            1: Z -> a
        ";
        let cfg = parse(text, NT::new("S")).unwrap();
        assert!(cfg.in_cnf());
        assert_eq!(cfg.v().len(), 3);
        assert_eq!(cfg.sigma().len(), 1);
    }

    #[test]
    fn accepts_unicode_arrow() {
        let cfg = parse("1: S → a", NT::new("S")).unwrap();
        assert_eq!(cfg.productions().count(), 1);
    }

    #[test]
    fn accepts_at_prefixed_nonterminals() {
        let cfg = parse("1: @start -> a", NT::new("@start")).unwrap();
        assert!(cfg.in_cnf());
    }

    #[test]
    fn rejects_malformed_line() {
        let err = parse("this is not a rule", NT::new("S")).unwrap_err();
        assert!(err.line.contains("this is not a rule"));
    }

    #[test]
    fn rejects_lowercase_lhs() {
        let err = parse("1: s -> a", NT::new("S")).unwrap_err();
        assert!(err.reason.contains("non-terminal"));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let cfg = parse("\n# comment\n\n1: S -> a\n", NT::new("S")).unwrap();
        assert_eq!(cfg.productions().count(), 1);
    }
}
