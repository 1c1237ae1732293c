//! Lumen Lexer - tokenizes source code into lexemes

use crate::arena::{Arena, NameId};
use crate::interner::NameInterner;
use core_types::{HotComment, Position, Span};

/// Lumen keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// and keyword
    And,
    /// break keyword
    Break,
    /// do keyword
    Do,
    /// else keyword
    Else,
    /// elseif keyword
    Elseif,
    /// end keyword
    End,
    /// false keyword
    False,
    /// for keyword
    For,
    /// function keyword
    Function,
    /// if keyword
    If,
    /// in keyword
    In,
    /// local keyword
    Local,
    /// nil keyword
    Nil,
    /// not keyword
    Not,
    /// or keyword
    Or,
    /// repeat keyword
    Repeat,
    /// return keyword
    Return,
    /// then keyword
    Then,
    /// true keyword
    True,
    /// until keyword
    Until,
    /// while keyword
    While,
}

impl Keyword {
    fn from_ident(text: &str) -> Option<Keyword> {
        Some(match text {
            "and" => Keyword::And,
            "break" => Keyword::Break,
            "do" => Keyword::Do,
            "else" => Keyword::Else,
            "elseif" => Keyword::Elseif,
            "end" => Keyword::End,
            "false" => Keyword::False,
            "for" => Keyword::For,
            "function" => Keyword::Function,
            "if" => Keyword::If,
            "in" => Keyword::In,
            "local" => Keyword::Local,
            "nil" => Keyword::Nil,
            "not" => Keyword::Not,
            "or" => Keyword::Or,
            "repeat" => Keyword::Repeat,
            "return" => Keyword::Return,
            "then" => Keyword::Then,
            "true" => Keyword::True,
            "until" => Keyword::Until,
            "while" => Keyword::While,
            _ => return None,
        })
    }

    /// Source spelling of the keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::And => "and",
            Keyword::Break => "break",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Elseif => "elseif",
            Keyword::End => "end",
            Keyword::False => "false",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::In => "in",
            Keyword::Local => "local",
            Keyword::Nil => "nil",
            Keyword::Not => "not",
            Keyword::Or => "or",
            Keyword::Repeat => "repeat",
            Keyword::Return => "return",
            Keyword::Then => "then",
            Keyword::True => "true",
            Keyword::Until => "until",
            Keyword::While => "while",
        }
    }
}

/// Lumen punctuators (operators and delimiters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    /// Plus
    Plus,
    /// Minus
    Minus,
    /// Multiply
    Star,
    /// Divide
    Slash,
    /// Modulo
    Percent,
    /// Exponentiation
    Caret,
    /// Length
    Hash,
    /// Assignment
    Assign,
    /// Equality
    Eq,
    /// Inequality
    NotEq,
    /// Less than
    Lt,
    /// Less than or equal
    LtEq,
    /// Greater than
    Gt,
    /// Greater than or equal
    GtEq,
    /// Opening parenthesis
    LParen,
    /// Closing parenthesis
    RParen,
    /// Opening brace
    LBrace,
    /// Closing brace
    RBrace,
    /// Opening bracket
    LBracket,
    /// Closing bracket
    RBracket,
    /// Semicolon
    Semicolon,
    /// Colon
    Colon,
    /// Comma
    Comma,
    /// Dot
    Dot,
    /// Concatenation
    Dot2,
    /// Vararg
    Dot3,
}

impl Punct {
    /// Source spelling of the punctuator
    pub fn as_str(self) -> &'static str {
        match self {
            Punct::Plus => "+",
            Punct::Minus => "-",
            Punct::Star => "*",
            Punct::Slash => "/",
            Punct::Percent => "%",
            Punct::Caret => "^",
            Punct::Hash => "#",
            Punct::Assign => "=",
            Punct::Eq => "==",
            Punct::NotEq => "~=",
            Punct::Lt => "<",
            Punct::LtEq => "<=",
            Punct::Gt => ">",
            Punct::GtEq => ">=",
            Punct::LParen => "(",
            Punct::RParen => ")",
            Punct::LBrace => "{",
            Punct::RBrace => "}",
            Punct::LBracket => "[",
            Punct::RBracket => "]",
            Punct::Semicolon => ";",
            Punct::Colon => ":",
            Punct::Comma => ",",
            Punct::Dot => ".",
            Punct::Dot2 => "..",
            Punct::Dot3 => "...",
        }
    }
}

/// The payload of one scanned lexeme
#[derive(Debug, Clone, PartialEq)]
pub enum LexemeKind {
    /// End of input
    Eof,
    /// Identifier; `id` is present only when name reading is enabled
    Name {
        /// Raw identifier text
        text: String,
        /// Interned id, when `set_read_names(true)` (the default)
        id: Option<NameId>,
    },
    /// Number literal
    Number {
        /// Parsed value
        value: f64,
    },
    /// String literal
    Str {
        /// Unescaped contents
        value: String,
    },
    /// Keyword
    Keyword(Keyword),
    /// Punctuator
    Punct(Punct),
    /// Comment; only produced when `set_skip_comments(false)`
    Comment {
        /// True for `--!` hot comments
        hot: bool,
        /// Comment text after the introducer
        text: String,
    },
    /// `@name` attribute marker
    Attribute {
        /// Attribute name without the `@`
        name: String,
    },
    /// Malformed input the scanner could not tokenize
    Broken {
        /// What went wrong
        message: String,
    },
}

/// One scanned token with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// Token payload
    pub kind: LexemeKind,
    /// Source location
    pub span: Span,
}

impl Lexeme {
    /// Render a human-readable form of the lexeme, matching the spelling
    /// used in diagnostics
    pub fn to_display_string(&self) -> String {
        match &self.kind {
            LexemeKind::Eof => "<eof>".to_string(),
            LexemeKind::Name { text, .. } => format!("'{}'", text),
            LexemeKind::Number { value } => format!("number '{}'", value),
            LexemeKind::Str { value } => format!("string \"{}\"", value),
            LexemeKind::Keyword(keyword) => format!("'{}'", keyword.as_str()),
            LexemeKind::Punct(punct) => format!("'{}'", punct.as_str()),
            LexemeKind::Comment { hot: true, .. } => "hot comment".to_string(),
            LexemeKind::Comment { hot: false, .. } => "comment".to_string(),
            LexemeKind::Attribute { name } => format!("'@{}'", name),
            LexemeKind::Broken { message } => message.clone(),
        }
    }
}

/// Pull-based scanner over a source buffer. Owns a copy of the decoded
/// characters, so it does not borrow the source it was built from.
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    skip_comments: bool,
    read_names: bool,
    seen_token: bool,
    hot_comments: Vec<HotComment>,
    current: Lexeme,
}

impl Lexer {
    /// Create a new lexer over the given source. Comments are skipped and
    /// names are interned by default.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 0,
            column: 0,
            skip_comments: true,
            read_names: true,
            seen_token: false,
            hot_comments: Vec::new(),
            current: Lexeme {
                kind: LexemeKind::Eof,
                span: Span::at(Position::new(0, 0)),
            },
        }
    }

    /// Configure whether comments are skipped (true) or surfaced as lexemes
    /// (false). Affects subsequent [`next`](Self::next) calls only.
    pub fn set_skip_comments(&mut self, skip: bool) {
        self.skip_comments = skip;
    }

    /// Configure whether identifiers are interned into the name table.
    /// Affects subsequent [`next`](Self::next) calls only.
    pub fn set_read_names(&mut self, read: bool) {
        self.read_names = read;
    }

    /// The most recently scanned lexeme
    pub fn current(&self) -> &Lexeme {
        &self.current
    }

    /// Hot comments recorded so far, in encounter order. Draining resets
    /// the record.
    pub fn take_hot_comments(&mut self) -> Vec<HotComment> {
        std::mem::take(&mut self.hot_comments)
    }

    /// Advance by exactly one lexeme and return a view of it, valid until
    /// the next call
    pub fn next(&mut self, arena: &mut Arena, interner: &mut NameInterner) -> &Lexeme {
        loop {
            let lexeme = self.scan(arena, interner);
            if let LexemeKind::Comment { hot, ref text } = lexeme.kind {
                if hot {
                    self.hot_comments.push(HotComment {
                        header: !self.seen_token,
                        span: lexeme.span,
                        text: text.clone(),
                    });
                }
                if self.skip_comments {
                    continue;
                }
            } else if !matches!(lexeme.kind, LexemeKind::Eof) {
                self.seen_token = true;
            }
            self.current = lexeme;
            return &self.current;
        }
    }

    fn scan(&mut self, arena: &mut Arena, interner: &mut NameInterner) -> Lexeme {
        self.skip_whitespace();

        let begin = Position::new(self.line, self.column);

        if self.is_at_end() {
            return Lexeme {
                kind: LexemeKind::Eof,
                span: Span::at(begin),
            };
        }

        let ch = self.advance();
        let kind = match ch {
            '-' => {
                if self.match_char('-') {
                    self.scan_comment()
                } else {
                    LexemeKind::Punct(Punct::Minus)
                }
            }
            '+' => LexemeKind::Punct(Punct::Plus),
            '*' => LexemeKind::Punct(Punct::Star),
            '/' => LexemeKind::Punct(Punct::Slash),
            '%' => LexemeKind::Punct(Punct::Percent),
            '^' => LexemeKind::Punct(Punct::Caret),
            '#' => LexemeKind::Punct(Punct::Hash),
            '(' => LexemeKind::Punct(Punct::LParen),
            ')' => LexemeKind::Punct(Punct::RParen),
            '{' => LexemeKind::Punct(Punct::LBrace),
            '}' => LexemeKind::Punct(Punct::RBrace),
            '[' => LexemeKind::Punct(Punct::LBracket),
            ']' => LexemeKind::Punct(Punct::RBracket),
            ';' => LexemeKind::Punct(Punct::Semicolon),
            ':' => LexemeKind::Punct(Punct::Colon),
            ',' => LexemeKind::Punct(Punct::Comma),
            '=' => {
                if self.match_char('=') {
                    LexemeKind::Punct(Punct::Eq)
                } else {
                    LexemeKind::Punct(Punct::Assign)
                }
            }
            '~' => {
                if self.match_char('=') {
                    LexemeKind::Punct(Punct::NotEq)
                } else {
                    LexemeKind::Broken {
                        message: "Unexpected character '~'".to_string(),
                    }
                }
            }
            '<' => {
                if self.match_char('=') {
                    LexemeKind::Punct(Punct::LtEq)
                } else {
                    LexemeKind::Punct(Punct::Lt)
                }
            }
            '>' => {
                if self.match_char('=') {
                    LexemeKind::Punct(Punct::GtEq)
                } else {
                    LexemeKind::Punct(Punct::Gt)
                }
            }
            '.' => {
                if self.match_char('.') {
                    if self.match_char('.') {
                        LexemeKind::Punct(Punct::Dot3)
                    } else {
                        LexemeKind::Punct(Punct::Dot2)
                    }
                } else if !self.is_at_end() && self.peek().is_ascii_digit() {
                    self.scan_number('.')
                } else {
                    LexemeKind::Punct(Punct::Dot)
                }
            }
            '"' | '\'' => self.scan_string(ch),
            '@' => self.scan_attribute(),
            c if c.is_ascii_digit() => self.scan_number(c),
            c if c.is_alphabetic() || c == '_' => self.scan_name(c, arena, interner),
            c => LexemeKind::Broken {
                message: format!("Unexpected character '{}'", c),
            },
        };

        Lexeme {
            kind,
            span: Span::new(begin, Position::new(self.line, self.column)),
        }
    }

    fn scan_comment(&mut self) -> LexemeKind {
        let hot = self.match_char('!');
        let mut text = String::new();
        while !self.is_at_end() && self.peek() != '\n' {
            text.push(self.advance());
        }
        LexemeKind::Comment { hot, text }
    }

    fn scan_string(&mut self, quote: char) -> LexemeKind {
        let mut value = String::new();
        loop {
            if self.is_at_end() || self.peek() == '\n' {
                return LexemeKind::Broken {
                    message: "Unterminated string".to_string(),
                };
            }
            let ch = self.advance();
            if ch == quote {
                return LexemeKind::Str { value };
            }
            if ch == '\\' {
                if self.is_at_end() {
                    return LexemeKind::Broken {
                        message: "Unterminated string".to_string(),
                    };
                }
                let escape = self.advance();
                match escape {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '0' => value.push('\0'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    '\'' => value.push('\''),
                    other => {
                        return LexemeKind::Broken {
                            message: format!("Invalid escape sequence '\\{}'", other),
                        }
                    }
                }
            } else {
                value.push(ch);
            }
        }
    }

    fn scan_number(&mut self, first: char) -> LexemeKind {
        let mut text = String::new();
        text.push(first);

        if first == '0' && !self.is_at_end() && (self.peek() == 'x' || self.peek() == 'X') {
            self.advance();
            let mut hex = String::new();
            while !self.is_at_end() && self.peek().is_ascii_hexdigit() {
                hex.push(self.advance());
            }
            return match u64::from_str_radix(&hex, 16) {
                Ok(value) if !hex.is_empty() => LexemeKind::Number {
                    value: value as f64,
                },
                _ => LexemeKind::Broken {
                    message: "Malformed number".to_string(),
                },
            };
        }

        while !self.is_at_end() && self.peek().is_ascii_digit() {
            text.push(self.advance());
        }
        if first != '.' && !self.is_at_end() && self.peek() == '.' {
            text.push(self.advance());
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
        }
        if !self.is_at_end() && (self.peek() == 'e' || self.peek() == 'E') {
            text.push(self.advance());
            if !self.is_at_end() && (self.peek() == '+' || self.peek() == '-') {
                text.push(self.advance());
            }
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
        }

        match text.parse::<f64>() {
            Ok(value) => LexemeKind::Number { value },
            Err(_) => LexemeKind::Broken {
                message: "Malformed number".to_string(),
            },
        }
    }

    fn scan_attribute(&mut self) -> LexemeKind {
        let mut name = String::new();
        while !self.is_at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            name.push(self.advance());
        }
        if name.is_empty() {
            LexemeKind::Broken {
                message: "Expected attribute name after '@'".to_string(),
            }
        } else {
            LexemeKind::Attribute { name }
        }
    }

    fn scan_name(
        &mut self,
        first: char,
        arena: &mut Arena,
        interner: &mut NameInterner,
    ) -> LexemeKind {
        let mut text = String::new();
        text.push(first);
        while !self.is_at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            text.push(self.advance());
        }

        if let Some(keyword) = Keyword::from_ident(&text) {
            return LexemeKind::Keyword(keyword);
        }

        let id = if self.read_names {
            Some(interner.intern(arena, &text))
        } else {
            None
        };
        LexemeKind::Name { text, id }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn peek(&self) -> char {
        self.chars[self.position]
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.position];
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        ch
    }

    fn match_char(&mut self, expected: char) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }
}
