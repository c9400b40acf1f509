//! Dialect specific SQL rendering.
//!
//! Statements are written once with `?` placeholders and no paging clause.
//! This module adapts them to the selected database right before execution.

use dbup_shared::{Pageable, Rdbms};

/// Largest row count MySQL accepts, used when only an offset is requested
const MYSQL_MAX_ROWS: &str = "18446744073709551615";

/// SQL rendering rules per dialect
pub trait SqlDialect {
    /// Rewrite `?` placeholders into the dialect's bind syntax
    fn render_placeholders(&self, sql: &str) -> String;

    /// Paging clause for `page`, or `None` when no paging is needed
    fn paging_clause(&self, page: Pageable) -> Option<String>;

    /// Whether a key that parses as an integer is bound as one
    ///
    /// PostgreSQL has no implicit cast between an integer column and a text
    /// parameter.
    fn binds_integer_keys(&self) -> bool;

    /// Statement ready to execute: placeholders rendered, paging applied
    fn render(&self, sql: &str, page: Pageable) -> String {
        let sql = self.render_placeholders(sql);
        match self.paging_clause(page) {
            Some(clause) => format!("{} {}", sql.trim_end(), clause),
            None => sql,
        }
    }
}

impl SqlDialect for Rdbms {
    fn render_placeholders(&self, sql: &str) -> String {
        if !self.uses_numbered_placeholders() {
            return sql.to_string();
        }

        let mut rendered = String::with_capacity(sql.len() + 8);
        let mut index = 0;
        let mut in_literal = false;
        for c in sql.chars() {
            match c {
                '\'' => {
                    in_literal = !in_literal;
                    rendered.push(c);
                }
                '?' if !in_literal => {
                    index += 1;
                    rendered.push('$');
                    rendered.push_str(&index.to_string());
                }
                _ => rendered.push(c),
            }
        }
        rendered
    }

    fn binds_integer_keys(&self) -> bool {
        matches!(self, Rdbms::PostgreSql)
    }

    fn paging_clause(&self, page: Pageable) -> Option<String> {
        let offset = page.offset();
        match (*self, page.max) {
            (_, None) if offset == 0 => None,
            (Rdbms::MySql | Rdbms::MariaDb, Some(max)) if offset == 0 => Some(format!("LIMIT {}", max)),
            (Rdbms::MySql | Rdbms::MariaDb, Some(max)) => Some(format!("LIMIT {}, {}", offset, max)),
            (Rdbms::MySql | Rdbms::MariaDb, None) => Some(format!("LIMIT {}, {}", offset, MYSQL_MAX_ROWS)),
            (Rdbms::PostgreSql | Rdbms::Sqlite, Some(max)) if offset == 0 => Some(format!("LIMIT {}", max)),
            (Rdbms::PostgreSql | Rdbms::Sqlite, Some(max)) => {
                Some(format!("LIMIT {} OFFSET {}", max, offset))
            }
            (Rdbms::PostgreSql, None) => Some(format!("OFFSET {}", offset)),
            (Rdbms::Sqlite, None) => Some(format!("LIMIT -1 OFFSET {}", offset)),
        }
    }
}
