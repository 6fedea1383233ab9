// Data access layer: the collaborator the menu loop delegates to for
// persistence and aggregate queries. `SqliteCountryDao` is the only
// backend; the trait exists so the loop never names the storage engine.

use crate::error::DaoError;
use crate::model::Country;
use log::debug;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;

/// CRUD and aggregate queries over the country table.
pub trait CountryDao {
    fn fetch_all(&self) -> Result<Vec<Country>, DaoError>;
    fn fetch_by_code(&self, code: &str) -> Result<Option<Country>, DaoError>;
    fn add(&self, country: &Country) -> Result<(), DaoError>;
    fn update(&self, country: &Country) -> Result<(), DaoError>;
    fn delete(&self, country: &Country) -> Result<(), DaoError>;
    fn count(&self) -> Result<usize, DaoError>;

    /// Whether the initial data set has already been loaded into this store.
    fn is_seeded(&self) -> Result<bool, DaoError>;
    fn mark_seeded(&self) -> Result<(), DaoError>;

    /// Pearson correlation between internet usage and adult literacy over
    /// the rows where both are known. `None` when it cannot be computed.
    fn correlation_coefficient(&self) -> Result<Option<f64>, DaoError>;

    fn max_internet_users(&self) -> Result<Option<Country>, DaoError>;
    fn min_internet_users(&self) -> Result<Option<Country>, DaoError>;
    fn max_adult_literacy(&self) -> Result<Option<Country>, DaoError>;
    fn min_adult_literacy(&self) -> Result<Option<Country>, DaoError>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS country (
    code                TEXT PRIMARY KEY NOT NULL,
    name                TEXT NOT NULL,
    internet_users      REAL,
    adult_literacy_rate REAL
)";

// `PRAGMA user_version` value once the store has been seeded.
const SEEDED_VERSION: i64 = 1;

const COLUMNS: &str = "code, name, internet_users, adult_literacy_rate";

#[derive(Clone, Copy)]
enum Metric {
    InternetUsers,
    AdultLiteracy,
}

impl Metric {
    fn column(self) -> &'static str {
        match self {
            Metric::InternetUsers => "internet_users",
            Metric::AdultLiteracy => "adult_literacy_rate",
        }
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Max,
    Min,
}

/// SQLite-backed collaborator. Holds one connection for the whole session.
#[derive(Debug)]
pub struct SqliteCountryDao {
    conn: Connection,
}

impl SqliteCountryDao {
    /// Open (creating if needed) a database file and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self, DaoError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Transient database, used for `:memory:` sessions and tests.
    pub fn open_in_memory() -> Result<Self, DaoError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, DaoError> {
        conn.execute(SCHEMA, [])?;
        Ok(SqliteCountryDao { conn })
    }

    fn extreme(&self, metric: Metric, extreme: Extreme) -> Result<Option<Country>, DaoError> {
        let order = match extreme {
            Extreme::Max => "DESC",
            Extreme::Min => "ASC",
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM country WHERE {col} IS NOT NULL \
             ORDER BY {col} {order}, code ASC LIMIT 1",
            col = metric.column(),
        );
        let country = self.conn.query_row(&sql, [], row_to_country).optional()?;
        Ok(country)
    }
}

fn row_to_country(row: &Row<'_>) -> rusqlite::Result<Country> {
    Ok(Country {
        code: row.get(0)?,
        name: row.get(1)?,
        internet_users: row.get(2)?,
        adult_literacy_rate: row.get(3)?,
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

/// Sample Pearson correlation coefficient of paired observations.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

impl CountryDao for SqliteCountryDao {
    fn fetch_all(&self) -> Result<Vec<Country>, DaoError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM country ORDER BY code"))?;
        let rows = stmt.query_map([], row_to_country)?;
        let countries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(countries)
    }

    fn fetch_by_code(&self, code: &str) -> Result<Option<Country>, DaoError> {
        let country = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM country WHERE code = ?1"),
                params![code],
                row_to_country,
            )
            .optional()?;
        Ok(country)
    }

    fn add(&self, country: &Country) -> Result<(), DaoError> {
        debug!("inserting country {}", country.code);
        self.conn
            .execute(
                "INSERT INTO country (code, name, internet_users, adult_literacy_rate) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    country.code,
                    country.name,
                    country.internet_users,
                    country.adult_literacy_rate
                ],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    DaoError::Duplicate(country.code.clone())
                } else {
                    DaoError::Sqlite(e)
                }
            })?;
        Ok(())
    }

    fn update(&self, country: &Country) -> Result<(), DaoError> {
        debug!("updating country {}", country.code);
        let changed = self.conn.execute(
            "UPDATE country SET name = ?2, internet_users = ?3, adult_literacy_rate = ?4 \
             WHERE code = ?1",
            params![
                country.code,
                country.name,
                country.internet_users,
                country.adult_literacy_rate
            ],
        )?;
        if changed == 0 {
            return Err(DaoError::NotFound(country.code.clone()));
        }
        Ok(())
    }

    fn delete(&self, country: &Country) -> Result<(), DaoError> {
        debug!("deleting country {}", country.code);
        let changed = self
            .conn
            .execute("DELETE FROM country WHERE code = ?1", params![country.code])?;
        if changed == 0 {
            return Err(DaoError::NotFound(country.code.clone()));
        }
        Ok(())
    }

    fn count(&self) -> Result<usize, DaoError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM country", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn is_seeded(&self) -> Result<bool, DaoError> {
        let version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version >= SEEDED_VERSION)
    }

    fn mark_seeded(&self) -> Result<(), DaoError> {
        self.conn
            .execute_batch(&format!("PRAGMA user_version = {SEEDED_VERSION}"))?;
        Ok(())
    }

    fn correlation_coefficient(&self) -> Result<Option<f64>, DaoError> {
        let mut stmt = self.conn.prepare(
            "SELECT internet_users, adult_literacy_rate FROM country \
             WHERE internet_users IS NOT NULL AND adult_literacy_rate IS NOT NULL",
        )?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pearson(&pairs))
    }

    fn max_internet_users(&self) -> Result<Option<Country>, DaoError> {
        self.extreme(Metric::InternetUsers, Extreme::Max)
    }

    fn min_internet_users(&self) -> Result<Option<Country>, DaoError> {
        self.extreme(Metric::InternetUsers, Extreme::Min)
    }

    fn max_adult_literacy(&self) -> Result<Option<Country>, DaoError> {
        self.extreme(Metric::AdultLiteracy, Extreme::Max)
    }

    fn min_adult_literacy(&self) -> Result<Option<Country>, DaoError> {
        self.extreme(Metric::AdultLiteracy, Extreme::Min)
    }
}
