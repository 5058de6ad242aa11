use std::fmt;

/// Parsed SPDX license expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single license identifier, including any trailing `+`.
    Id(String),
    /// `license WITH exception`
    With(String, String),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    /// Rebuild the expression with every license identifier passed through `f`.
    /// Exception identifiers are left as they are.
    pub fn map_ids<F: Fn(&str) -> String>(&self, f: &F) -> Expr {
        match self {
            Expr::Id(id) => Expr::Id(f(id)),
            Expr::With(id, exception) => Expr::With(f(id), exception.clone()),
            Expr::And(terms) => Expr::And(terms.iter().map(|t| t.map_ids(f)).collect()),
            Expr::Or(terms) => Expr::Or(terms.iter().map(|t| t.map_ids(f)).collect()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Id(id) => write!(f, "{}", id),
            Expr::With(id, exception) => write!(f, "{} WITH {}", id, exception),
            Expr::Or(terms) => write_joined(f, terms, " OR ", false),
            Expr::And(terms) => write_joined(f, terms, " AND ", true),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    terms: &[Expr],
    separator: &str,
    wrap_or: bool,
) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        match term {
            Expr::Or(_) if wrap_or => write!(f, "({})", term)?,
            _ => write!(f, "{}", term)?,
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Clone)]
enum Token {
    Id(String),
    And,
    Or,
    With,
    LParen,
    RParen,
}

/// Split an expression into tokens. Operators are matched case-insensitively.
fn tokenize(expr: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '(' {
            tokens.push(Token::LParen);
            chars.next();
        } else if c == ')' {
            tokens.push(Token::RParen);
            chars.next();
        } else {
            let mut s = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '(' || c == ')' {
                    break;
                }
                s.push(c);
                chars.next();
            }
            let token = match s.to_ascii_uppercase().as_str() {
                "AND" => Token::And,
                "OR" => Token::Or,
                "WITH" => Token::With,
                _ => Token::Id(s),
            };
            tokens.push(token);
        }
    }
    tokens
}

/// Deepest parenthesis nesting accepted before an expression is rejected.
const MAX_DEPTH: usize = 64;

/// Recursive descent parser; AND binds tighter than OR. Nesting deeper than
/// [`MAX_DEPTH`] fails the parse.
///
/// ```text
/// expr     := or_expr
/// or_expr  := and_expr ( "OR" and_expr )*
/// and_expr := atom ( "AND" atom )*
/// atom     := "(" expr ")" | id ( "WITH" id )?
/// ```
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut terms = vec![self.parse_and()?];
        while matches!(self.peek(), Some(Token::Or)) {
            self.consume();
            terms.push(self.parse_and()?);
        }
        Some(collapse(terms, Expr::Or))
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut terms = vec![self.parse_atom()?];
        while matches!(self.peek(), Some(Token::And)) {
            self.consume();
            terms.push(self.parse_atom()?);
        }
        Some(collapse(terms, Expr::And))
    }

    fn parse_atom(&mut self) -> Option<Expr> {
        match self.consume()? {
            Token::LParen => {
                if self.depth >= MAX_DEPTH {
                    return None;
                }
                self.depth += 1;
                let inner = self.parse_or()?;
                self.depth -= 1;
                match self.consume()? {
                    Token::RParen => Some(inner),
                    _ => None,
                }
            }
            Token::Id(id) => {
                if matches!(self.peek(), Some(Token::With)) {
                    self.consume();
                    match self.consume()? {
                        Token::Id(exception) => Some(Expr::With(id, exception)),
                        _ => None,
                    }
                } else {
                    Some(Expr::Id(id))
                }
            }
            _ => None,
        }
    }
}

fn collapse(mut terms: Vec<Expr>, build: fn(Vec<Expr>) -> Expr) -> Expr {
    if terms.len() == 1 {
        terms.remove(0)
    } else {
        build(terms)
    }
}

/// Parse a license expression, returning `None` when it is not syntactically valid.
pub fn parse(expr: &str) -> Option<Expr> {
    let tokens = tokenize(expr);
    if tokens.is_empty() {
        return None;
    }
    let mut parser = ExprParser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let parsed = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return None;
    }
    Some(parsed)
}
