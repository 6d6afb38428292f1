//! Query language parsing and compilation.
//!
//! Grammar (precedence high to low):
//!
//! ```text
//! or      := and ("OR" and)*
//! and     := not (["AND"] not)*
//! not     := primary ("NOT" primary)*
//! primary := COLUMN? (WORD ["*"] | "\"" PHRASE "\"" | "(" or ")")
//! ```
//!
//! Operators are uppercase keywords. A `column:` prefix (`title`,
//! `content` or `tags`) restricts the following primary to one field;
//! unscoped terms match any searchable field.

use crate::core::error::{MemdexError, Result};
use crate::core::storage::ItemFields;
use once_cell::sync::Lazy;
use regex::Regex;
use tantivy::query::{BooleanQuery, Occur, PhraseQuery, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::tokenizer::{TextAnalyzer, TokenStream};
use tantivy::{Index, Term};

// A single-colon prefix such as `title:rust`; multi-colon words stay plain terms
static COLUMN_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+):([^:]*)$").expect("column prefix pattern is valid")
});

/// Field names accepted as column prefixes
const VALID_COLUMNS: [&str; 3] = ["title", "content", "tags"];

/// A searchable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Content,
    Tags,
}

impl Column {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            "tags" => Some(Self::Tags),
            _ => None,
        }
    }

    fn field(self, fields: &ItemFields) -> Field {
        match self {
            Self::Title => fields.title,
            Self::Content => fields.content,
            Self::Tags => fields.tags_text,
        }
    }
}

/// Parsed query expression
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    /// Bare word, optionally a prefix (`term*`)
    Term { text: String, prefix: bool },
    /// Quoted phrase
    Phrase(String),
    /// Expression restricted to one column
    Scoped(Column, Box<QueryExpr>),
    And(Vec<QueryExpr>),
    Or(Vec<QueryExpr>),
    /// Left operand minus matches of the right operand
    Not(Box<QueryExpr>, Box<QueryExpr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word { text: String, prefix: bool },
    Phrase(String),
    Column(Column),
    LParen,
    RParen,
    And,
    Or,
    Not,
}

fn invalid(message: impl Into<String>) -> MemdexError {
    MemdexError::InvalidQuery(message.into())
}

/// Suggest a valid column name for common aliases.
fn suggest_column_alias(field: &str) -> Option<&'static str> {
    match field.to_lowercase().as_str() {
        "name" | "subject" | "heading" | "header" => Some("title"),
        "body" | "text" | "note" | "description" => Some("content"),
        "tag" | "label" | "labels" | "category" => Some("tags"),
        _ => None,
    }
}

fn lex(query: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = query.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' => {
                chars.next();
                let mut phrase = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    phrase.push(c);
                }
                if !closed {
                    return Err(invalid("Unbalanced quote"));
                }
                tokens.push(Token::Phrase(phrase));
            }
            _ => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '"') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                lex_word(&query[start..end], &mut tokens)?;
            }
        }
    }

    Ok(tokens)
}

fn lex_word(word: &str, tokens: &mut Vec<Token>) -> Result<()> {
    match word {
        "AND" => {
            tokens.push(Token::And);
            return Ok(());
        }
        "OR" => {
            tokens.push(Token::Or);
            return Ok(());
        }
        "NOT" => {
            tokens.push(Token::Not);
            return Ok(());
        }
        _ => {}
    }

    let mut word = word;
    if let Some(caps) = COLUMN_PREFIX.captures(word) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());

        // URL schemes are not column prefixes
        if !matches!(name, "http" | "https" | "ftp" | "mailto") {
            let column = Column::parse(name).ok_or_else(|| {
                let hint = suggest_column_alias(name)
                    .map(|s| format!(" Did you mean '{s}:'?"))
                    .unwrap_or_default();
                invalid(format!(
                    "Unknown column '{name}'. Valid columns: {}.{hint}",
                    VALID_COLUMNS.join(", ")
                ))
            })?;
            tokens.push(Token::Column(column));
            if rest.is_empty() {
                return Ok(());
            }
            word = rest;
        }
    }

    let (text, prefix) = match word.strip_suffix('*') {
        Some(stem) => (stem, true),
        None => (word, false),
    };
    if text.is_empty() {
        return Err(invalid("A bare '*' is not a valid term"));
    }

    tokens.push(Token::Word {
        text: text.to_string(),
        prefix,
    });
    Ok(())
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_or(&mut self) -> Result<QueryExpr> {
        let mut items = vec![self.parse_and()?];
        while self.peek() == Some(&Token::Or) {
            self.next();
            items.push(self.parse_and()?);
        }
        Ok(if items.len() == 1 {
            items.remove(0)
        } else {
            QueryExpr::Or(items)
        })
    }

    fn parse_and(&mut self) -> Result<QueryExpr> {
        let mut items = vec![self.parse_not()?];
        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.next();
                    items.push(self.parse_not()?);
                }
                // Juxtaposition is an implicit AND
                Some(Token::Word { .. } | Token::Phrase(_) | Token::Column(_) | Token::LParen) => {
                    items.push(self.parse_not()?);
                }
                _ => break,
            }
        }
        Ok(if items.len() == 1 {
            items.remove(0)
        } else {
            QueryExpr::And(items)
        })
    }

    fn parse_not(&mut self) -> Result<QueryExpr> {
        let mut left = self.parse_primary()?;
        while self.peek() == Some(&Token::Not) {
            self.next();
            let right = self.parse_primary()?;
            left = QueryExpr::Not(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<QueryExpr> {
        match self.next() {
            Some(Token::Word { text, prefix }) => Ok(QueryExpr::Term { text, prefix }),
            Some(Token::Phrase(text)) => Ok(QueryExpr::Phrase(text)),
            Some(Token::Column(column)) => {
                let inner = self.parse_primary()?;
                Ok(QueryExpr::Scoped(column, Box::new(inner)))
            }
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(invalid("Unbalanced parenthesis: missing ')'")),
                }
            }
            Some(Token::Not) => Err(invalid("NOT requires a left operand")),
            Some(Token::And) => Err(invalid("AND requires a left operand")),
            Some(Token::Or) => Err(invalid("OR requires a left operand")),
            Some(Token::RParen) => Err(invalid("Unbalanced parenthesis: unexpected ')'")),
            None => Err(invalid("Query ends after an operator")),
        }
    }
}

/// Parse a query string into an expression tree
///
/// # Examples
///
/// ```
/// use memdex::core::search::{parse_query, QueryExpr};
///
/// let expr = parse_query("rust OR go").unwrap();
/// assert!(matches!(expr, QueryExpr::Or(_)));
///
/// assert!(parse_query("NOT rust").is_err());
/// assert!(parse_query("\"open phrase").is_err());
/// ```
pub fn parse_query(query: &str) -> Result<QueryExpr> {
    let tokens = lex(query)?;
    if tokens.is_empty() {
        return Err(invalid("Query cannot be empty"));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;

    match parser.peek() {
        None => Ok(expr),
        Some(Token::RParen) => Err(invalid("Unbalanced parenthesis: unexpected ')'")),
        Some(token) => Err(invalid(format!("Unexpected token {token:?}"))),
    }
}

/// Compiles query expressions into Tantivy queries over item fields
pub struct QueryBuilder<'a> {
    fields: &'a ItemFields,
    analyzer: TextAnalyzer,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(index: &Index, fields: &'a ItemFields) -> Result<Self> {
        let analyzer = index
            .tokenizer_for_field(fields.content)
            .map_err(|e| MemdexError::SearchFailed(format!("Missing tokenizer: {e}")))?;
        Ok(Self { fields, analyzer })
    }

    /// Parse and compile a query string
    pub fn build(&mut self, query: &str) -> Result<Box<dyn Query>> {
        let expr = parse_query(query)?;
        let fields = self.fields.searchable();
        self.compile(&expr, &fields)?
            .ok_or_else(|| invalid("Query contains no searchable terms"))
    }

    /// Compile one expression; `None` when it reduces to no tokens
    fn compile(&mut self, expr: &QueryExpr, fields: &[Field]) -> Result<Option<Box<dyn Query>>> {
        match expr {
            QueryExpr::Term { text, prefix } => {
                let tokens = self.tokenize(text);
                if *prefix {
                    self.prefix_query(&tokens, fields)
                } else {
                    Ok(self.phrase_query(&tokens, fields))
                }
            }
            QueryExpr::Phrase(text) => {
                let tokens = self.tokenize(text);
                Ok(self.phrase_query(&tokens, fields))
            }
            QueryExpr::Scoped(column, inner) => {
                let field = column.field(self.fields);
                self.compile(inner, &[field])
            }
            QueryExpr::And(items) => {
                let clauses = self.compile_all(items, fields)?;
                Ok(combine(clauses, Occur::Must))
            }
            QueryExpr::Or(items) => {
                let clauses = self.compile_all(items, fields)?;
                Ok(combine(clauses, Occur::Should))
            }
            QueryExpr::Not(left, right) => {
                let Some(left) = self.compile(left, fields)? else {
                    return Ok(None);
                };
                match self.compile(right, fields)? {
                    Some(right) => Ok(Some(Box::new(BooleanQuery::new(vec![
                        (Occur::Must, left),
                        (Occur::MustNot, right),
                    ])))),
                    None => Ok(Some(left)),
                }
            }
        }
    }

    fn compile_all(
        &mut self,
        items: &[QueryExpr],
        fields: &[Field],
    ) -> Result<Vec<Box<dyn Query>>> {
        let mut clauses = Vec::new();
        for item in items {
            if let Some(query) = self.compile(item, fields)? {
                clauses.push(query);
            }
        }
        Ok(clauses)
    }

    fn tokenize(&mut self, text: &str) -> Vec<String> {
        let mut stream = self.analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(stream.token().text.clone());
        }
        tokens
    }

    /// Adjacent tokens in order, on any of `fields`
    fn phrase_query(&self, tokens: &[String], fields: &[Field]) -> Option<Box<dyn Query>> {
        if tokens.is_empty() {
            return None;
        }

        let per_field = fields
            .iter()
            .map(|&field| -> Box<dyn Query> {
                if tokens.len() == 1 {
                    Box::new(TermQuery::new(
                        Term::from_field_text(field, &tokens[0]),
                        IndexRecordOption::WithFreqs,
                    ))
                } else {
                    Box::new(PhraseQuery::new(
                        tokens
                            .iter()
                            .map(|t| Term::from_field_text(field, t))
                            .collect(),
                    ))
                }
            })
            .collect();

        combine(per_field, Occur::Should)
    }

    /// Leading tokens as a phrase, last token as a prefix
    fn prefix_query(&self, tokens: &[String], fields: &[Field]) -> Result<Option<Box<dyn Query>>> {
        let Some((last, leading)) = tokens.split_last() else {
            return Ok(None);
        };

        let pattern = format!("{}.*", regex::escape(last));
        let mut per_field: Vec<Box<dyn Query>> = Vec::with_capacity(fields.len());
        for &field in fields {
            let query = RegexQuery::from_pattern(&pattern, field)
                .map_err(|e| invalid(format!("Invalid prefix '{last}*': {e}")))?;
            per_field.push(Box::new(query));
        }

        let prefix = combine(per_field, Occur::Should);
        let clauses: Vec<Box<dyn Query>> = self
            .phrase_query(leading, fields)
            .into_iter()
            .chain(prefix)
            .collect();
        Ok(combine(clauses, Occur::Must))
    }
}

/// Join clauses under one occurrence, unwrapping singletons
fn combine(mut clauses: Vec<Box<dyn Query>>, occur: Occur) -> Option<Box<dyn Query>> {
    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(Box::new(BooleanQuery::new(
            clauses.into_iter().map(|q| (occur, q)).collect(),
        ))),
    }
}
