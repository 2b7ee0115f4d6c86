//! Parser for the SPARQL-Update subset
//!
//! Tokenizes and parses the patch text into `UpdateStatement`. Prefixed
//! names are expanded against the `PREFIX` declarations during parsing,
//! so the AST only ever carries expanded IRIs; an undefined prefix is a
//! parse error. `a` abbreviates `rdf:type` in every triple position it is
//! legal in.
//!
//! Positional rules are enforced here, per operation:
//! - `INSERT DATA` / `DELETE DATA` hold ground triples — no variables;
//!   blank nodes are allowed in `INSERT DATA` only
//! - `DELETE WHERE` and the `DELETE`/`INSERT` templates of a modify
//!   operation may carry variables; blank nodes are rejected in WHERE
//!   patterns and DELETE templates

use grove_graph_ir::{Datatype, LiteralValue, Term};
use grove_vocab::{rdf, xsd};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised while parsing update text
///
/// All of these abort resolution before any mutation is attempted.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text does not match the accepted grammar
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A prefixed name used a prefix with no `PREFIX` declaration
    #[error("Undefined prefix '{0}:'")]
    UndefinedPrefix(String),

    /// A variable appeared where only ground terms are legal
    #[error("Variable ?{0} is not allowed in ground data")]
    VariableInData(String),

    /// A blank node appeared in a position the subset rejects
    #[error("Blank node _:{0} is not allowed in {1}")]
    BlankNodeNotAllowed(String, &'static str),
}

type ParseResult<T> = Result<T, ParseError>;

/// One position of a triple pattern: a ground term or a variable
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermPattern {
    /// A ground term (IRI, blank node, or literal)
    Ground(Term),
    /// A named variable (`?name`)
    Var(String),
}

impl TermPattern {
    /// Check if this position is a variable
    pub fn is_var(&self) -> bool {
        matches!(self, TermPattern::Var(_))
    }
}

impl std::fmt::Display for TermPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermPattern::Ground(t) => write!(f, "{}", t),
            TermPattern::Var(v) => write!(f, "?{}", v),
        }
    }
}

/// A triple pattern: three positions, each ground or variable
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriplePattern {
    /// Subject position
    pub s: TermPattern,
    /// Predicate position
    pub p: TermPattern,
    /// Object position
    pub o: TermPattern,
}

/// One update operation
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOperation {
    /// `INSERT DATA { … }` — ground triples to add
    InsertData(Vec<TriplePattern>),
    /// `DELETE DATA { … }` — ground triples to remove
    DeleteData(Vec<TriplePattern>),
    /// `DELETE WHERE { … }` — one pattern set used for both matching
    /// and removal
    DeleteWhere(Vec<TriplePattern>),
    /// `DELETE { … } INSERT { … } WHERE { … }` — the general form;
    /// either template may be absent, the WHERE clause never is
    Modify {
        /// DELETE template (may be empty)
        delete: Vec<TriplePattern>,
        /// INSERT template (may be empty)
        insert: Vec<TriplePattern>,
        /// WHERE patterns binding the template variables
        where_patterns: Vec<TriplePattern>,
    },
}

/// A parsed update: the operations in source order
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateStatement {
    /// Operations, applied in order during resolution
    pub operations: Vec<UpdateOperation>,
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Iri(String),
    Prefixed(String, String),
    Var(String),
    Blank(String),
    StringLit(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Keyword(Keyword),
    A,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Dot,
    CaretCaret,
    LangTag(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keyword {
    Prefix,
    Insert,
    Delete,
    Data,
    Where,
}

fn keyword_from_str(word: &str) -> Option<Keyword> {
    // SPARQL keywords are case-insensitive
    match word.to_ascii_uppercase().as_str() {
        "PREFIX" => Some(Keyword::Prefix),
        "INSERT" => Some(Keyword::Insert),
        "DELETE" => Some(Keyword::Delete),
        "DATA" => Some(Keyword::Data),
        "WHERE" => Some(Keyword::Where),
        _ => None,
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn tokenize(text: &str) -> ParseResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                chars.next();
            }
            '#' => {
                // Comment to end of line
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '{' => {
                chars.next();
                tokens.push(Token::LBrace);
            }
            '}' => {
                chars.next();
                tokens.push(Token::RBrace);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semicolon);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            '^' => {
                chars.next();
                if chars.next() != Some('^') {
                    return Err(ParseError::Syntax("expected '^^'".to_string()));
                }
                tokens.push(Token::CaretCaret);
            }
            '@' => {
                chars.next();
                let mut tag = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '-' {
                        tag.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if tag.is_empty() {
                    return Err(ParseError::Syntax("empty language tag".to_string()));
                }
                tokens.push(Token::LangTag(tag));
            }
            '<' => {
                chars.next();
                let mut iri = String::new();
                loop {
                    match chars.next() {
                        Some('>') => break,
                        Some(c) if !c.is_whitespace() => iri.push(c),
                        _ => {
                            return Err(ParseError::Syntax(format!("unterminated IRI '<{}'", iri)))
                        }
                    }
                }
                tokens.push(Token::Iri(iri));
            }
            '"' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('"') => s.push('"'),
                            Some('\\') => s.push('\\'),
                            Some('n') => s.push('\n'),
                            Some('t') => s.push('\t'),
                            Some('r') => s.push('\r'),
                            other => {
                                return Err(ParseError::Syntax(format!(
                                    "bad escape '\\{}'",
                                    other.map(String::from).unwrap_or_default()
                                )))
                            }
                        },
                        Some(c) => s.push(c),
                        None => {
                            return Err(ParseError::Syntax(format!(
                                "unterminated string \"{}",
                                s
                            )))
                        }
                    }
                }
                tokens.push(Token::StringLit(s));
            }
            '?' | '$' => {
                chars.next();
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if is_name_char(c) {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if name.is_empty() {
                    return Err(ParseError::Syntax("empty variable name".to_string()));
                }
                tokens.push(Token::Var(name));
            }
            '_' => {
                chars.next();
                if chars.next() != Some(':') {
                    return Err(ParseError::Syntax("expected '_:' blank node".to_string()));
                }
                let mut label = String::new();
                while let Some(&c) = chars.peek() {
                    if is_name_char(c) {
                        label.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if label.is_empty() {
                    return Err(ParseError::Syntax("empty blank node label".to_string()));
                }
                tokens.push(Token::Blank(label));
            }
            c if c.is_ascii_digit() || c == '+' || c == '-' => {
                chars.next();
                let mut num = String::from(c);
                let mut is_decimal = false;
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        num.push(c);
                        chars.next();
                    } else if c == '.' && !is_decimal {
                        // A '.' followed by a non-digit is the statement
                        // terminator, not a decimal point
                        let mut ahead = chars.clone();
                        ahead.next();
                        if !ahead.peek().is_some_and(|d| d.is_ascii_digit()) {
                            break;
                        }
                        is_decimal = true;
                        num.push(c);
                        chars.next();
                    } else if (c == 'e' || c == 'E')
                        && num.chars().last().is_some_and(|l| l.is_ascii_digit())
                    {
                        is_decimal = true;
                        num.push(c);
                        chars.next();
                        if let Some(&sign @ ('+' | '-')) = chars.peek() {
                            num.push(sign);
                            chars.next();
                        }
                    } else {
                        break;
                    }
                }
                if is_decimal {
                    let value = num
                        .parse::<f64>()
                        .map_err(|_| ParseError::Syntax(format!("bad number '{}'", num)))?;
                    tokens.push(Token::Decimal(value));
                } else {
                    let value = num
                        .parse::<i64>()
                        .map_err(|_| ParseError::Syntax(format!("bad number '{}'", num)))?;
                    tokens.push(Token::Integer(value));
                }
            }
            c if is_name_start(c) => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if is_name_char(c) {
                        word.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if chars.peek() == Some(&':') {
                    chars.next();
                    let mut local = String::new();
                    while let Some(&c) = chars.peek() {
                        if is_name_char(c) || c == '.' {
                            local.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    // A local name never ends with '.'; trailing dots are
                    // statement terminators
                    let mut trailing = 0;
                    while local.ends_with('.') {
                        local.pop();
                        trailing += 1;
                    }
                    tokens.push(Token::Prefixed(word, local));
                    for _ in 0..trailing {
                        tokens.push(Token::Dot);
                    }
                } else if word == "a" {
                    tokens.push(Token::A);
                } else if word == "true" {
                    tokens.push(Token::Boolean(true));
                } else if word == "false" {
                    tokens.push(Token::Boolean(false));
                } else if let Some(kw) = keyword_from_str(&word) {
                    tokens.push(Token::Keyword(kw));
                } else {
                    return Err(ParseError::Syntax(format!("unexpected word '{}'", word)));
                }
            }
            ':' => {
                // Default-prefix name (":local")
                chars.next();
                let mut local = String::new();
                while let Some(&c) = chars.peek() {
                    if is_name_char(c) || c == '.' {
                        local.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let mut trailing = 0;
                while local.ends_with('.') {
                    local.pop();
                    trailing += 1;
                }
                tokens.push(Token::Prefixed(String::new(), local));
                for _ in 0..trailing {
                    tokens.push(Token::Dot);
                }
            }
            other => {
                return Err(ParseError::Syntax(format!(
                    "unexpected character '{}'",
                    other
                )))
            }
        }
    }
    Ok(tokens)
}

/// Which positions a triple block allows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockKind {
    /// Ground triples, blank subjects/objects allowed (`INSERT DATA`)
    GroundWithBlanks,
    /// Ground triples, no blanks (`DELETE DATA`)
    Ground,
    /// Variables allowed, blanks rejected (WHERE, DELETE templates)
    Pattern,
    /// Variables and blanks allowed (INSERT templates)
    Template,
}

impl BlockKind {
    fn context(&self) -> &'static str {
        match self {
            BlockKind::GroundWithBlanks => "INSERT DATA",
            BlockKind::Ground => "DELETE DATA",
            BlockKind::Pattern => "a WHERE pattern or DELETE template",
            BlockKind::Template => "an INSERT template",
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    prefixes: FxHashMap<String, String>,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, what: &str) -> ParseResult<()> {
        match self.next() {
            Some(ref t) if t == expected => Ok(()),
            other => Err(ParseError::Syntax(format!(
                "expected {}, found {:?}",
                what, other
            ))),
        }
    }

    fn expand(&self, prefix: &str, local: &str) -> ParseResult<String> {
        let ns = self
            .prefixes
            .get(prefix)
            .ok_or_else(|| ParseError::UndefinedPrefix(prefix.to_string()))?;
        Ok(format!("{}{}", ns, local))
    }

    fn parse_prefix_decl(&mut self) -> ParseResult<()> {
        // "PREFIX" already consumed
        let (prefix, local) = match self.next() {
            Some(Token::Prefixed(prefix, local)) => (prefix, local),
            other => {
                return Err(ParseError::Syntax(format!(
                    "expected 'prefix:' after PREFIX, found {:?}",
                    other
                )))
            }
        };
        if !local.is_empty() {
            return Err(ParseError::Syntax(format!(
                "expected 'prefix:' after PREFIX, found '{}:{}'",
                prefix, local
            )));
        }
        let iri = match self.next() {
            Some(Token::Iri(iri)) => iri,
            other => {
                return Err(ParseError::Syntax(format!(
                    "expected IRI after PREFIX {}:, found {:?}",
                    prefix, other
                )))
            }
        };
        self.prefixes.insert(prefix, iri);
        Ok(())
    }

    /// Parse a literal's optional `^^datatype` / `@lang` suffix
    fn finish_literal(&mut self, value: String) -> ParseResult<Term> {
        match self.peek() {
            Some(Token::CaretCaret) => {
                self.next();
                let datatype_iri = match self.next() {
                    Some(Token::Iri(iri)) => iri,
                    Some(Token::Prefixed(prefix, local)) => self.expand(&prefix, &local)?,
                    other => {
                        return Err(ParseError::Syntax(format!(
                            "expected datatype after '^^', found {:?}",
                            other
                        )))
                    }
                };
                Ok(typed_literal(&value, &datatype_iri))
            }
            Some(Token::LangTag(tag)) => {
                let tag = tag.clone();
                self.next();
                Ok(Term::lang_string(value, tag))
            }
            _ => Ok(Term::string(value)),
        }
    }

    fn parse_term(&mut self, kind: BlockKind, position: &str) -> ParseResult<TermPattern> {
        match self.next() {
            Some(Token::Iri(iri)) => Ok(TermPattern::Ground(Term::iri(iri))),
            Some(Token::Prefixed(prefix, local)) => {
                Ok(TermPattern::Ground(Term::iri(self.expand(&prefix, &local)?)))
            }
            Some(Token::Var(name)) => match kind {
                BlockKind::Ground | BlockKind::GroundWithBlanks => {
                    Err(ParseError::VariableInData(name))
                }
                _ => Ok(TermPattern::Var(name)),
            },
            Some(Token::Blank(label)) => match kind {
                BlockKind::GroundWithBlanks | BlockKind::Template => {
                    Ok(TermPattern::Ground(Term::blank(label)))
                }
                _ => Err(ParseError::BlankNodeNotAllowed(label, kind.context())),
            },
            Some(Token::StringLit(value)) => {
                Ok(TermPattern::Ground(self.finish_literal(value)?))
            }
            Some(Token::Integer(i)) => Ok(TermPattern::Ground(Term::long(i))),
            Some(Token::Decimal(d)) => Ok(TermPattern::Ground(Term::double(d))),
            Some(Token::Boolean(b)) => Ok(TermPattern::Ground(Term::boolean(b))),
            other => Err(ParseError::Syntax(format!(
                "expected {} term, found {:?}",
                position, other
            ))),
        }
    }

    fn parse_predicate(&mut self, kind: BlockKind) -> ParseResult<TermPattern> {
        if self.peek() == Some(&Token::A) {
            self.next();
            return Ok(TermPattern::Ground(Term::iri(rdf::TYPE)));
        }
        let term = self.parse_term(kind, "predicate")?;
        match &term {
            TermPattern::Var(_) => Ok(term),
            TermPattern::Ground(t) if t.is_iri() => Ok(term),
            TermPattern::Ground(t) => Err(ParseError::Syntax(format!(
                "predicate must be an IRI, found {}",
                t
            ))),
        }
    }

    /// Parse `{ subject pred obj (, obj)* (; pred obj …)* . … }`
    fn parse_triple_block(&mut self, kind: BlockKind) -> ParseResult<Vec<TriplePattern>> {
        self.expect(&Token::LBrace, "'{'")?;
        let mut triples = Vec::new();

        while self.peek() != Some(&Token::RBrace) {
            let subject = self.parse_term(kind, "subject")?;
            if matches!(&subject, TermPattern::Ground(t) if t.is_literal()) {
                return Err(ParseError::Syntax(
                    "literal is not a legal subject".to_string(),
                ));
            }
            loop {
                let predicate = self.parse_predicate(kind)?;
                loop {
                    let object = self.parse_term(kind, "object")?;
                    triples.push(TriplePattern {
                        s: subject.clone(),
                        p: predicate.clone(),
                        o: object,
                    });
                    if self.peek() == Some(&Token::Comma) {
                        self.next();
                    } else {
                        break;
                    }
                }
                if self.peek() == Some(&Token::Semicolon) {
                    self.next();
                    // A dangling ';' before '.' or '}' is tolerated
                    if matches!(self.peek(), Some(&Token::Dot) | Some(&Token::RBrace)) {
                        break;
                    }
                } else {
                    break;
                }
            }
            if self.peek() == Some(&Token::Dot) {
                self.next();
            } else if self.peek() != Some(&Token::RBrace) {
                return Err(ParseError::Syntax(format!(
                    "expected '.' or '}}' after triple, found {:?}",
                    self.peek()
                )));
            }
        }
        self.next(); // consume '}'
        Ok(triples)
    }

    fn parse_operation(&mut self, keyword: Keyword) -> ParseResult<UpdateOperation> {
        match keyword {
            Keyword::Insert => match self.peek() {
                Some(Token::Keyword(Keyword::Data)) => {
                    self.next();
                    Ok(UpdateOperation::InsertData(
                        self.parse_triple_block(BlockKind::GroundWithBlanks)?,
                    ))
                }
                _ => {
                    // INSERT { … } WHERE { … }
                    let insert = self.parse_triple_block(BlockKind::Template)?;
                    self.expect(&Token::Keyword(Keyword::Where), "WHERE")?;
                    let where_patterns = self.parse_triple_block(BlockKind::Pattern)?;
                    Ok(UpdateOperation::Modify {
                        delete: Vec::new(),
                        insert,
                        where_patterns,
                    })
                }
            },
            Keyword::Delete => match self.peek() {
                Some(Token::Keyword(Keyword::Data)) => {
                    self.next();
                    Ok(UpdateOperation::DeleteData(
                        self.parse_triple_block(BlockKind::Ground)?,
                    ))
                }
                Some(Token::Keyword(Keyword::Where)) => {
                    self.next();
                    Ok(UpdateOperation::DeleteWhere(
                        self.parse_triple_block(BlockKind::Pattern)?,
                    ))
                }
                _ => {
                    // DELETE { … } [INSERT { … }] WHERE { … }
                    let delete = self.parse_triple_block(BlockKind::Pattern)?;
                    let insert = if self.peek() == Some(&Token::Keyword(Keyword::Insert)) {
                        self.next();
                        self.parse_triple_block(BlockKind::Template)?
                    } else {
                        Vec::new()
                    };
                    self.expect(&Token::Keyword(Keyword::Where), "WHERE")?;
                    let where_patterns = self.parse_triple_block(BlockKind::Pattern)?;
                    Ok(UpdateOperation::Modify {
                        delete,
                        insert,
                        where_patterns,
                    })
                }
            },
            other => Err(ParseError::Syntax(format!(
                "expected INSERT or DELETE, found {:?}",
                other
            ))),
        }
    }
}

/// Coerce a typed literal's lexical form toward its datatype
///
/// Integer-family, double-family, and boolean datatypes get native value
/// storage; everything else keeps the lexical string under the given
/// datatype.
fn typed_literal(lexical: &str, datatype_iri: &str) -> Term {
    let datatype = Datatype::from_iri(datatype_iri);
    if xsd::is_integer_family(datatype_iri) {
        if let Ok(i) = lexical.parse::<i64>() {
            return Term::Literal {
                value: LiteralValue::Long(i),
                datatype,
                language: None,
            };
        }
    }
    match datatype_iri {
        xsd::DOUBLE | xsd::FLOAT | xsd::DECIMAL => {
            if let Ok(d) = lexical.parse::<f64>() {
                return Term::Literal {
                    value: LiteralValue::Double(d),
                    datatype,
                    language: None,
                };
            }
        }
        xsd::BOOLEAN => match lexical {
            "true" | "1" => {
                return Term::Literal {
                    value: LiteralValue::Boolean(true),
                    datatype,
                    language: None,
                }
            }
            "false" | "0" => {
                return Term::Literal {
                    value: LiteralValue::Boolean(false),
                    datatype,
                    language: None,
                }
            }
            _ => {}
        },
        _ => {}
    }
    Term::typed(lexical, datatype)
}

/// Parse update text into an `UpdateStatement`
///
/// Accepts `PREFIX` declarations followed by operations, optionally
/// separated by `;`. Fails without side effects on any syntax error or
/// undefined prefix.
pub fn parse_update(text: &str) -> ParseResult<UpdateStatement> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        prefixes: FxHashMap::default(),
    };

    let mut operations = Vec::new();
    while let Some(token) = parser.next() {
        match token {
            Token::Keyword(Keyword::Prefix) => parser.parse_prefix_decl()?,
            Token::Keyword(kw @ (Keyword::Insert | Keyword::Delete)) => {
                operations.push(parser.parse_operation(kw)?);
                // Operations may be chained with ';'
                if parser.peek() == Some(&Token::Semicolon) {
                    parser.next();
                }
            }
            other => {
                return Err(ParseError::Syntax(format!(
                    "expected PREFIX, INSERT, or DELETE, found {:?}",
                    other
                )))
            }
        }
    }

    if operations.is_empty() {
        return Err(ParseError::Syntax("no update operation found".to_string()));
    }
    Ok(UpdateStatement { operations })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> UpdateOperation {
        let statement = parse_update(text).unwrap();
        assert_eq!(statement.operations.len(), 1);
        statement.operations.into_iter().next().unwrap()
    }

    #[test]
    fn test_insert_data() {
        let op = single(
            "PREFIX dc: <http://purl.org/dc/terms/>\n\
             INSERT DATA { <http://x.org/a> dc:title \"Hello\" . }",
        );
        let UpdateOperation::InsertData(triples) = op else {
            panic!("expected InsertData");
        };
        assert_eq!(triples.len(), 1);
        assert_eq!(
            triples[0].p,
            TermPattern::Ground(Term::iri("http://purl.org/dc/terms/title"))
        );
        assert_eq!(triples[0].o, TermPattern::Ground(Term::string("Hello")));
    }

    #[test]
    fn test_delete_insert_where() {
        let op = single(
            "PREFIX dc: <http://purl.org/dc/terms/>\n\
             DELETE { <http://x.org/a> dc:title ?old }\n\
             INSERT { <http://x.org/a> dc:title \"new\" }\n\
             WHERE { <http://x.org/a> dc:title ?old }",
        );
        let UpdateOperation::Modify {
            delete,
            insert,
            where_patterns,
        } = op
        else {
            panic!("expected Modify");
        };
        assert_eq!(delete.len(), 1);
        assert_eq!(insert.len(), 1);
        assert_eq!(where_patterns.len(), 1);
        assert_eq!(delete[0].o, TermPattern::Var("old".to_string()));
    }

    #[test]
    fn test_delete_where_shorthand() {
        let op = single("DELETE WHERE { ?s ?p ?o }");
        let UpdateOperation::DeleteWhere(patterns) = op else {
            panic!("expected DeleteWhere");
        };
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].s.is_var());
        assert!(patterns[0].p.is_var());
        assert!(patterns[0].o.is_var());
    }

    #[test]
    fn test_a_is_rdf_type() {
        let op = single("INSERT DATA { <http://x.org/a> a <http://x.org/Type> }");
        let UpdateOperation::InsertData(triples) = op else {
            panic!("expected InsertData");
        };
        assert_eq!(triples[0].p, TermPattern::Ground(Term::iri(rdf::TYPE)));
    }

    #[test]
    fn test_predicate_object_lists() {
        let op = single(
            "PREFIX dc: <http://purl.org/dc/terms/>\n\
             INSERT DATA {\n\
               <http://x.org/a> dc:title \"one\", \"two\" ;\n\
                                dc:description \"three\" .\n\
             }",
        );
        let UpdateOperation::InsertData(triples) = op else {
            panic!("expected InsertData");
        };
        assert_eq!(triples.len(), 3);
        // All three share the subject
        assert!(triples
            .iter()
            .all(|t| t.s == TermPattern::Ground(Term::iri("http://x.org/a"))));
        assert_eq!(
            triples[2].p,
            TermPattern::Ground(Term::iri("http://purl.org/dc/terms/description"))
        );
    }

    #[test]
    fn test_typed_and_tagged_literals() {
        let op = single(
            "PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>\n\
             INSERT DATA {\n\
               <http://x.org/a> <http://x.org/n> \"42\"^^xsd:long .\n\
               <http://x.org/a> <http://x.org/l> \"bonjour\"@fr .\n\
               <http://x.org/a> <http://x.org/i> 7 .\n\
               <http://x.org/a> <http://x.org/d> 1.5 .\n\
               <http://x.org/a> <http://x.org/b> true .\n\
             }",
        );
        let UpdateOperation::InsertData(triples) = op else {
            panic!("expected InsertData");
        };
        assert_eq!(triples[0].o, TermPattern::Ground(Term::long(42)));
        assert_eq!(
            triples[1].o,
            TermPattern::Ground(Term::lang_string("bonjour", "fr"))
        );
        assert_eq!(triples[2].o, TermPattern::Ground(Term::long(7)));
        assert_eq!(triples[3].o, TermPattern::Ground(Term::double(1.5)));
        assert_eq!(triples[4].o, TermPattern::Ground(Term::boolean(true)));
    }

    #[test]
    fn test_blank_node_in_insert_data() {
        let op = single(
            "INSERT DATA { _:b0 <http://x.org/p> \"v\" }",
        );
        let UpdateOperation::InsertData(triples) = op else {
            panic!("expected InsertData");
        };
        assert_eq!(triples[0].s, TermPattern::Ground(Term::blank("b0")));
    }

    #[test]
    fn test_undefined_prefix_fails() {
        let err = parse_update("INSERT DATA { <http://x.org/a> dc:title \"x\" }").unwrap_err();
        assert!(matches!(err, ParseError::UndefinedPrefix(p) if p == "dc"));
    }

    #[test]
    fn test_variable_in_ground_data_fails() {
        let err = parse_update("INSERT DATA { <http://x.org/a> <http://x.org/p> ?v }").unwrap_err();
        assert!(matches!(err, ParseError::VariableInData(v) if v == "v"));
    }

    #[test]
    fn test_blank_node_in_where_fails() {
        let err = parse_update("DELETE WHERE { _:b <http://x.org/p> ?v }").unwrap_err();
        assert!(matches!(err, ParseError::BlankNodeNotAllowed(..)));
    }

    #[test]
    fn test_unparsable_text_fails() {
        assert!(parse_update("SELECT * WHERE { ?s ?p ?o }").is_err());
        assert!(parse_update("INSERT DATA { <http://x.org/a> }").is_err());
        assert!(parse_update("").is_err());
        assert!(parse_update("INSERT DATA { <http://x.org/a> <http://x.org/p> \"unterminated }").is_err());
    }

    #[test]
    fn test_chained_operations() {
        let statement = parse_update(
            "PREFIX dc: <http://purl.org/dc/terms/>\n\
             DELETE DATA { <http://x.org/a> dc:title \"a\" } ;\n\
             INSERT DATA { <http://x.org/a> dc:title \"b\" }",
        )
        .unwrap();
        assert_eq!(statement.operations.len(), 2);
        assert!(matches!(
            statement.operations[0],
            UpdateOperation::DeleteData(_)
        ));
        assert!(matches!(
            statement.operations[1],
            UpdateOperation::InsertData(_)
        ));
    }

    #[test]
    fn test_prefixed_name_does_not_swallow_statement_dot() {
        let op = single(
            "PREFIX ex: <http://x.org/>\n\
             INSERT DATA { <http://x.org/a> a ex:Type. }",
        );
        let UpdateOperation::InsertData(triples) = op else {
            panic!("expected InsertData");
        };
        assert_eq!(
            triples[0].o,
            TermPattern::Ground(Term::iri("http://x.org/Type"))
        );
    }

    #[test]
    fn test_literal_subject_rejected() {
        assert!(parse_update("INSERT DATA { \"s\" <http://x.org/p> \"o\" }").is_err());
    }

    #[test]
    fn test_literal_predicate_rejected() {
        assert!(parse_update("INSERT DATA { <http://x.org/a> \"p\" \"o\" }").is_err());
    }
}
