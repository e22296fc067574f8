//! Renders literals back into `.strings` text.

use crate::types::Literal;

/// Renders one `"key"="value";` line per literal, in the order given.
///
/// No escaping is applied: values are expected to come from a previous
/// successful parse, so they never hold an unescaped `"`.
pub fn render(literals: &[Literal]) -> String {
    let capacity = literals
        .iter()
        .map(|literal| literal.key.len() + literal.value.len() + 7)
        .sum();
    let mut output = String::with_capacity(capacity);

    for literal in literals {
        output.push_str(&literal.to_string());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::parser::parse;

    #[test]
    fn test_render_one_line_per_literal() {
        let literals = vec![Literal::new("b", "2"), Literal::new("a", "1")];
        assert_eq!(render(&literals), "\"b\"=\"2\";\n\"a\"=\"1\";\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_render_keeps_escapes_and_newlines() {
        let literals = vec![Literal::new("k", "say \\\"hi\\\"\nbye")];
        let output = render(&literals);
        assert_eq!(output, "\"k\"=\"say \\\"hi\\\"\nbye\";\n");
        assert_eq!(parse(&output).unwrap(), literals);
    }
}
