//! Post-processing of model-generated Cypher.

/// Clauses that modify the graph.
const WRITE_CLAUSES: &[&str] = &["CREATE", "MERGE", "DELETE", "DETACH", "SET", "REMOVE", "DROP"];

/// Extract the Cypher statement from a model completion.
///
/// Models often wrap the statement in a fenced block, sometimes tagged
/// `cypher`. Text outside the first fenced block is discarded; an unfenced
/// completion is used as-is.
pub fn extract_cypher(completion: &str) -> String {
    let text = completion.trim();
    let inner = match text.find("```") {
        Some(open) => {
            let rest = &text[open + 3..];
            match rest.find("```") {
                Some(close) => &rest[..close],
                None => rest,
            }
        }
        None => text,
    };

    let inner = inner.trim_start();
    let inner = inner
        .strip_prefix("cypher")
        .or_else(|| inner.strip_prefix("Cypher"))
        .unwrap_or(inner);
    inner.trim().to_string()
}

/// Whether the statement writes to the graph.
///
/// Write clauses inside string literals are ignored, except when the
/// statement calls a procedure: procedures such as `apoc.cypher.doIt` run
/// their string arguments as Cypher, so those literals are checked too.
pub fn contains_write_clause(cypher: &str) -> bool {
    let tokens = tokenize(cypher);
    if tokens.words.iter().any(|word| is_write_clause(word)) {
        return true;
    }
    let calls_procedure = tokens.words.iter().any(|w| w.eq_ignore_ascii_case("CALL"));
    tokens
        .literals
        .iter()
        .filter(|lit| calls_procedure || !lit.terminated)
        .any(|lit| contains_write_clause(&lit.text))
}

fn is_write_clause(word: &str) -> bool {
    WRITE_CLAUSES
        .iter()
        .any(|clause| word.eq_ignore_ascii_case(clause))
}

/// A string literal with its escapes resolved.
struct Literal {
    text: String,
    terminated: bool,
}

/// Bare words and string literals of a statement. Backticked names are
/// dropped.
struct Tokens<'a> {
    words: Vec<&'a str>,
    literals: Vec<Literal>,
}

fn tokenize(cypher: &str) -> Tokens<'_> {
    let mut tokens = Tokens {
        words: Vec::new(),
        literals: Vec::new(),
    };
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut literal = String::new();
    let mut start: Option<usize> = None;

    for (i, c) in cypher.char_indices() {
        if let Some(q) = quote {
            if q == '`' {
                if c == q {
                    quote = None;
                }
            } else if escaped {
                literal.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                tokens.literals.push(Literal {
                    text: std::mem::take(&mut literal),
                    terminated: true,
                });
                quote = None;
            } else {
                literal.push(c);
            }
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            tokens.words.push(&cypher[s..i]);
        }
        if matches!(c, '\'' | '"' | '`') {
            quote = Some(c);
        }
    }

    match quote {
        None => {
            if let Some(s) = start {
                tokens.words.push(&cypher[s..]);
            }
        }
        Some('`') => {}
        Some(_) => tokens.literals.push(Literal {
            text: literal,
            terminated: false,
        }),
    }
    tokens
}
