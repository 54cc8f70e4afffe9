//! A pull-based tokenizer for SimpleLang source text.
//!
//! Unlike an eager scanner, [`Tokenizer::next_token`] produces one token per
//! call so the parser only ever holds a single token of lookahead. The
//! tokenizer never fails: characters it does not recognize come out as
//! [`TokenKind::Error`] tokens and it is up to the parser to reject them.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Number,
    Identifier,
    Int,
    If,
    Else,
    Assign,
    Plus,
    Minus,
    Equal,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Newline,
    Error,
    End,
}

impl TokenKind {
    /// Upper-case name used by token dumps and the tree printer.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Int => "INT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Equal => "EQUAL",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Error => "ERROR",
            TokenKind::End => "END",
        }
    }

    fn from_word(word: &str) -> Self {
        match word {
            "int" => TokenKind::Int,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            _ => TokenKind::Identifier,
        }
    }
}

/// 1-based line and column of a character in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// `None` for synthetic tokens such as [`TokenKind::End`].
    pub lexeme: Option<String>,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: Some(lexeme.into()),
            position,
        }
    }

    pub fn end(position: Position) -> Self {
        Self {
            kind: TokenKind::End,
            lexeme: None,
            position,
        }
    }

    pub fn text(&self) -> &str {
        self.lexeme.as_deref().unwrap_or("")
    }
}

#[derive(Debug)]
pub struct Tokenizer {
    chars: Vec<char>,
    cursor: usize,
    position: Position,
}

impl Tokenizer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            cursor: 0,
            position: Position::default(),
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor + 1).copied()
    }

    // The position stays on the last character once the input is exhausted,
    // which is where `End` gets reported.
    fn bump(&mut self) {
        match self.current() {
            Some(c) if self.cursor + 1 < self.chars.len() => {
                self.position.advance(c);
                self.cursor += 1;
            }
            _ => self.cursor = self.chars.len(),
        }
    }

    fn read_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.current().filter(|c| predicate(*c)) {
            text.push(c);
            self.bump();
        }
        text
    }

    /// Returns the next token. Once the input is exhausted every call
    /// returns an `End` token at the same position.
    pub fn next_token(&mut self) -> Token {
        while let Some(c) = self.current() {
            let start = self.position;

            if c == ' ' || c == '\t' {
                self.bump();
                continue;
            }

            if c == '\n' {
                self.bump();
                return Token::new(TokenKind::Newline, "\\n", start);
            }

            if c.is_ascii_digit() {
                let digits = self.read_while(|c| c.is_ascii_digit());
                return Token::new(TokenKind::Number, digits, start);
            }

            if is_identifier_start(c) {
                let word = self.read_while(is_identifier_char);
                return Token::new(TokenKind::from_word(&word), word, start);
            }

            if c == '=' && self.peek() == Some('=') {
                self.bump();
                self.bump();
                return Token::new(TokenKind::Equal, "==", start);
            }

            let kind = match c {
                '=' => TokenKind::Assign,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                ';' => TokenKind::Semicolon,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                _ => TokenKind::Error,
            };
            self.bump();
            return Token::new(kind, c.to_string(), start);
        }

        Token::end(self.position)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    /// Fixed-width listing, one token per line, `End` included.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let _ = writeln!(
                out,
                "{:<12} {:<10} Line:{:>2} Col:{:>2}",
                token.kind.name(),
                token.lexeme.as_deref().unwrap_or("NULL"),
                token.position.line,
                token.position.column
            );
        }
        out
    }

    pub fn error_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Error)
    }
}

/// Drains a fresh tokenizer up to and including the `End` token.
#[tracing::instrument(level = "trace", skip_all)]
pub fn tokenize(source: &str) -> TokenList {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = TokenList::default();
    loop {
        let token = tokenizer.next_token();
        let is_end = token.kind == TokenKind::End;
        tokens.tokens.push(token);
        if is_end {
            return tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn declaration_tokens_carry_positions() {
        let tokens = tokenize("int a = 42;").tokens;
        let summary = tokens
            .iter()
            .map(|t| (t.kind, t.lexeme.clone(), t.position.line, t.position.column))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                (TokenKind::Int, Some("int".to_string()), 1, 1),
                (TokenKind::Identifier, Some("a".to_string()), 1, 5),
                (TokenKind::Assign, Some("=".to_string()), 1, 7),
                (TokenKind::Number, Some("42".to_string()), 1, 9),
                (TokenKind::Semicolon, Some(";".to_string()), 1, 11),
                (TokenKind::End, None, 1, 11),
            ]
        );
    }

    #[test]
    fn keywords_are_reclassified_but_prefixes_are_not() {
        assert_eq!(
            kinds("int if else integer iffy _else x1"),
            vec![
                TokenKind::Int,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn equal_and_assign_are_distinguished() {
        assert_eq!(
            kinds("a == b = c === d"),
            vec![
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Assign,
                TokenKind::Identifier,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn newlines_are_tokens_and_reset_the_column() {
        let tokens = tokenize("a\n  b").tokens;
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text(), "\\n");
        assert_eq!(tokens[1].position, Position::new(1, 2));
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].position, Position::new(2, 3));
    }

    #[test]
    fn tabs_and_spaces_are_skipped() {
        let tokens = tokenize("\t x").tokens;
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].position, Position::new(1, 3));
    }

    #[test]
    fn unknown_characters_become_error_tokens_and_do_not_block() {
        let tokens = tokenize("a $ * b").tokens;
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].text(), "$");
        assert_eq!(tokens[2].kind, TokenKind::Error);
        assert_eq!(tokens[2].text(), "*");
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].text(), "b");
    }

    #[test]
    fn end_is_repeated_without_advancing() {
        let mut tokenizer = Tokenizer::new("x");
        assert_eq!(tokenizer.next_token().kind, TokenKind::Identifier);
        let first = tokenizer.next_token();
        let second = tokenizer.next_token();
        assert_eq!(first.kind, TokenKind::End);
        assert_eq!(first.lexeme, None);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_ends_at_origin() {
        let tokens = tokenize("").tokens;
        assert_eq!(tokens, vec![Token::end(Position::new(1, 1))]);
    }

    #[test]
    fn long_literals_are_kept_whole() {
        let name = "v".repeat(100);
        let digits = "9".repeat(80);
        let tokens = tokenize(&format!("{name} {digits}")).tokens;
        assert_eq!(tokens[0].text(), name);
        assert_eq!(tokens[1].text(), digits);
    }

    #[test]
    fn digits_then_letters_split_into_two_tokens() {
        assert_eq!(
            kinds("12ab"),
            vec![TokenKind::Number, TokenKind::Identifier, TokenKind::End]
        );
    }

    #[test]
    fn dump_lists_every_token() {
        let dump = tokenize("int a = 42;\nb = a;").dump();
        insta::assert_snapshot!(dump, @r"
        INT          int        Line: 1 Col: 1
        IDENTIFIER   a          Line: 1 Col: 5
        ASSIGN       =          Line: 1 Col: 7
        NUMBER       42         Line: 1 Col: 9
        SEMICOLON    ;          Line: 1 Col:11
        NEWLINE      \n         Line: 1 Col:12
        IDENTIFIER   b          Line: 2 Col: 1
        ASSIGN       =          Line: 2 Col: 3
        IDENTIFIER   a          Line: 2 Col: 5
        SEMICOLON    ;          Line: 2 Col: 6
        END          NULL       Line: 2 Col: 6
        ");
    }

    #[test]
    fn tokens_serialize_with_positions() {
        let token = Token::new(TokenKind::Number, "42", Position::new(1, 9));
        insta::assert_json_snapshot!(token, @r#"
        {
          "kind": "Number",
          "lexeme": "42",
          "position": {
            "line": 1,
            "column": 9
          }
        }
        "#);
    }
}
