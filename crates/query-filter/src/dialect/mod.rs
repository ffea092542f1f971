//! Target dialects and their default operator sets.

use crate::{
    error::{FilterError, Result},
    format::{FormatProvider, LinqFormat, MySqlFormat, PostgresFormat, SqlServerFormat},
    transform::RuleTransformerRegistry,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub mod linq;
pub mod mysql;
pub mod postgres;
pub mod sql_server;

mod sql;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[serde(alias = "sqlserver", alias = "mssql")]
    SqlServer,
    #[serde(rename = "mysql", alias = "mariadb")]
    MySql,
    #[serde(alias = "pg", alias = "postgresql")]
    Postgres,
    #[serde(alias = "expression")]
    Linq,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::SqlServer,
        Dialect::MySql,
        Dialect::Postgres,
        Dialect::Linq,
    ];

    pub fn format_provider(&self) -> &'static dyn FormatProvider {
        match self {
            Dialect::SqlServer => &SqlServerFormat,
            Dialect::MySql => &MySqlFormat,
            Dialect::Postgres => &PostgresFormat,
            Dialect::Linq => &LinqFormat,
        }
    }

    /// A fresh registry seeded with all 21 default operators.
    pub fn default_transformers(&self) -> Result<RuleTransformerRegistry> {
        match self {
            Dialect::SqlServer => sql_server::default_transformers(),
            Dialect::MySql => mysql::default_transformers(),
            Dialect::Postgres => postgres::default_transformers(),
            Dialect::Linq => linq::default_transformers(),
        }
    }

    pub fn name(&self) -> String {
        self.format_provider().name()
    }
}

impl FromStr for Dialect {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlserver" | "mssql" | "sql_server" => Ok(Dialect::SqlServer),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "pg" | "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "linq" | "expression" => Ok(Dialect::Linq),
            _ => Err(FilterError::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
