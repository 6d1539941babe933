//! Keyword recognition for SQL.
//!
//! SQL keywords are case-insensitive.

use super::token::TokenKind;

/// Looks up a keyword by name (case-insensitive).
pub fn lookup_keyword(name: &str) -> Option<TokenKind> {
    match name.to_ascii_uppercase().as_str() {
        // Statement and clause keywords
        "SELECT" => Some(TokenKind::Select),
        "DISTINCT" => Some(TokenKind::Distinct),
        "ALL" => Some(TokenKind::All),
        "FROM" => Some(TokenKind::From),
        "WHERE" => Some(TokenKind::Where),
        "GROUP" => Some(TokenKind::Group),
        "BY" => Some(TokenKind::By),
        "HAVING" => Some(TokenKind::Having),
        "ORDER" => Some(TokenKind::Order),
        "ASC" => Some(TokenKind::Asc),
        "DESC" => Some(TokenKind::Desc),
        "LIMIT" => Some(TokenKind::Limit),
        "OFFSET" => Some(TokenKind::Offset),
        "AS" => Some(TokenKind::As),

        // Joins
        "NATURAL" => Some(TokenKind::Natural),
        "LEFT" => Some(TokenKind::Left),
        "INNER" => Some(TokenKind::Inner),
        "CROSS" => Some(TokenKind::Cross),
        "OUTER" => Some(TokenKind::Outer),
        "JOIN" => Some(TokenKind::Join),
        "ON" => Some(TokenKind::On),
        "USING" => Some(TokenKind::Using),

        // Operators
        "OR" => Some(TokenKind::Or),
        "AND" => Some(TokenKind::And),
        "NOT" => Some(TokenKind::Not),
        "IS" => Some(TokenKind::Is),
        "IN" => Some(TokenKind::In),
        "LIKE" => Some(TokenKind::Like),
        "GLOB" => Some(TokenKind::Glob),
        "MATCH" => Some(TokenKind::Match),
        "REGEXP" => Some(TokenKind::Regexp),

        // Literals
        "NULL" => Some(TokenKind::Null),
        "TRUE" => Some(TokenKind::True),
        "FALSE" => Some(TokenKind::False),

        _ => None,
    }
}

/// Returns true if `name` is a reserved keyword.
pub fn is_keyword(name: &str) -> bool {
    lookup_keyword(name).is_some()
}
