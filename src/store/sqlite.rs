//! SQLite-backed ledger store
//!
//! Reads the ledger database produced by the import pipeline:
//!
//! - `RESUMEN_MENSUAL(mes, subcategoria, importe)`: one row per month and
//!   subcategory, `mes` formatted `YYYY-MM`
//! - `categoria(id, txt)` and `subcategoria(id, categoria, txt)`
//!
//! Every value is bound as a parameter. Scalar queries must come back as
//! exactly one row of the expected width; anything else aborts the report
//! with `AmbiguousStoreResult`.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags, Row};
use std::path::Path;
use tracing::{debug, info};

use super::memory::LedgerSnapshot;
use super::{
    BucketTotals, CountScope, FlowTotals, MonthBounds, MonthlyQuery, MonthlyStore, RangeTotals,
    SubcategoryFilter,
};
use crate::error::{ReportError, ReportResult};
use crate::models::{Amount, Category, CategoryId, Subcategory, SubcategoryId, YearMonth};
use crate::reports::granularity::Granularity;

/// Tables of a ledger database
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categoria (
    id INTEGER PRIMARY KEY,
    txt TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS subcategoria (
    id INTEGER PRIMARY KEY,
    categoria INTEGER NOT NULL REFERENCES categoria(id),
    txt TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS RESUMEN_MENSUAL (
    mes TEXT NOT NULL,
    subcategoria INTEGER NOT NULL REFERENCES subcategoria(id),
    importe REAL NOT NULL,
    PRIMARY KEY (mes, subcategoria)
);
"#;

const FLOW_COLUMNS: &str = "-SUM(CASE WHEN importe < 0 THEN importe ELSE 0 END), \
     SUM(CASE WHEN importe > 0 THEN importe ELSE 0 END)";

/// A `MonthlyStore` over a SQLite connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing ledger database without write access
    pub fn open_read_only(path: &Path) -> ReportResult<Self> {
        if !path.exists() {
            return Err(ReportError::NotFound {
                entity_type: "Ledger database",
                identifier: path.display().to_string(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        info!(path = %path.display(), "opened ledger database");
        Ok(Self { conn })
    }

    /// Wrap an already-open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Write a snapshot into a new (or empty) ledger database at `path`
    pub fn create(path: &Path, snapshot: &LedgerSnapshot) -> ReportResult<()> {
        let mut conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        let tx = conn.transaction()?;
        for category in &snapshot.categories {
            tx.execute(
                "INSERT INTO categoria (id, txt) VALUES (?1, ?2)",
                rusqlite::params![category.id.as_i64(), category.label],
            )?;
        }
        for sub in &snapshot.subcategories {
            tx.execute(
                "INSERT INTO subcategoria (id, categoria, txt) VALUES (?1, ?2, ?3)",
                rusqlite::params![sub.id.as_i64(), sub.category_id.as_i64(), sub.label],
            )?;
        }
        for record in &snapshot.records {
            tx.execute(
                "INSERT INTO RESUMEN_MENSUAL (mes, subcategoria, importe) VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    record.month.ledger_key(),
                    record.subcategory_id.as_i64(),
                    record.amount.value()
                ],
            )?;
        }
        tx.commit()?;

        info!(
            path = %path.display(),
            records = snapshot.records.len(),
            "wrote ledger database"
        );
        Ok(())
    }

    fn single_row<T, F>(
        &self,
        name: &'static str,
        sql: &str,
        params: &[Value],
        width: usize,
        map: F,
    ) -> ReportResult<T>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut rows = self.rows(name, sql, params, width, map)?;
        if rows.len() != 1 {
            return Err(ReportError::ambiguous(
                name,
                format!("expected 1 row, got {}", rows.len()),
            ));
        }
        rows.pop()
            .ok_or_else(|| ReportError::ambiguous(name, "expected 1 row, got 0"))
    }

    fn rows<T, F>(
        &self,
        name: &'static str,
        sql: &str,
        params: &[Value],
        width: usize,
        map: F,
    ) -> ReportResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(query = name, params = params.len(), "store query");

        let mut stmt = self.conn.prepare(sql)?;
        if stmt.column_count() != width {
            return Err(ReportError::ambiguous(
                name,
                format!("expected {} columns, got {}", width, stmt.column_count()),
            ));
        }

        let rows = stmt
            .query_map(params_from_iter(params.iter()), map)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// `WHERE` clause and parameters of a filtered ledger query
fn filter_clause(query: &MonthlyQuery) -> (String, Vec<Value>) {
    let mut params = vec![Value::Text(query.start_key()), Value::Text(query.end_key())];

    let subcategories = match &query.filter {
        SubcategoryFilter::One(id) => {
            params.push(Value::Integer(id.as_i64()));
            "subcategoria = ?3".to_string()
        }
        SubcategoryFilter::Many(ids) => {
            let mut placeholders = Vec::with_capacity(ids.len());
            for id in ids {
                params.push(Value::Integer(id.as_i64()));
                placeholders.push(format!("?{}", params.len()));
            }
            format!("subcategoria IN ({})", placeholders.join(", "))
        }
    };

    (
        format!("mes >= ?1 AND mes <= ?2 AND {}", subcategories),
        params,
    )
}

/// Bucket key expression over the `mes` column
fn bucket_expression(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Month => "mes",
        Granularity::Quarter => {
            "substr(mes, 1, 4) || '-T' || ((CAST(substr(mes, 6, 2) AS INTEGER) - 1) / 3 + 1)"
        }
        Granularity::FourMonth => {
            "substr(mes, 1, 4) || '-C' || ((CAST(substr(mes, 6, 2) AS INTEGER) - 1) / 4 + 1)"
        }
        Granularity::Semester => {
            "substr(mes, 1, 4) || '-S' || ((CAST(substr(mes, 6, 2) AS INTEGER) - 1) / 6 + 1)"
        }
        Granularity::Year => "substr(mes, 1, 4)",
    }
}

fn amount(value: Option<f64>) -> Option<Amount> {
    value.map(Amount::new)
}

fn ledger_month(raw: &str) -> ReportResult<YearMonth> {
    YearMonth::parse(raw)
        .map_err(|e| ReportError::Store(format!("malformed month in ledger: {}", e)))
}

impl MonthlyStore for SqliteStore {
    fn range_totals(&self, query: &MonthlyQuery) -> ReportResult<RangeTotals> {
        let (clause, params) = filter_clause(query);
        let sql = format!(
            "SELECT MIN(importe), MAX(importe), SUM(importe), COUNT(*) \
             FROM RESUMEN_MENSUAL WHERE {}",
            clause
        );

        self.single_row("range totals", &sql, &params, 4, |row| {
            Ok(RangeTotals {
                min: amount(row.get(0)?),
                max: amount(row.get(1)?),
                sum: amount(row.get(2)?),
                count: row.get::<_, i64>(3)? as u64,
            })
        })
    }

    fn flow_totals(&self, query: &MonthlyQuery) -> ReportResult<FlowTotals> {
        let (clause, params) = filter_clause(query);
        let sql = format!(
            "SELECT {} FROM RESUMEN_MENSUAL WHERE {}",
            FLOW_COLUMNS, clause
        );

        self.single_row("flow totals", &sql, &params, 2, |row| {
            Ok(FlowTotals {
                expenses: amount(row.get(0)?).unwrap_or_default(),
                income: amount(row.get(1)?).unwrap_or_default(),
            })
        })
    }

    fn bucket_totals(
        &self,
        query: &MonthlyQuery,
        granularity: Granularity,
    ) -> ReportResult<Vec<BucketTotals>> {
        let (clause, params) = filter_clause(query);
        let sql = format!(
            "SELECT {} AS bucket, {} FROM RESUMEN_MENSUAL WHERE {} \
             GROUP BY bucket ORDER BY bucket",
            bucket_expression(granularity),
            FLOW_COLUMNS,
            clause
        );

        self.rows("bucket totals", &sql, &params, 3, |row| {
            Ok(BucketTotals {
                label: row.get(0)?,
                expenses: amount(row.get(1)?).unwrap_or_default(),
                income: amount(row.get(2)?).unwrap_or_default(),
            })
        })
    }

    fn categories(&self) -> ReportResult<Vec<Category>> {
        self.rows(
            "categories",
            "SELECT id, txt FROM categoria ORDER BY id",
            &[],
            2,
            |row| Ok(Category::new(CategoryId::new(row.get(0)?), row.get::<_, String>(1)?)),
        )
    }

    fn subcategories(&self, category: CategoryId) -> ReportResult<Vec<Subcategory>> {
        self.rows(
            "subcategories",
            "SELECT id, categoria, txt FROM subcategoria WHERE categoria = ?1 ORDER BY id",
            &[Value::Integer(category.as_i64())],
            3,
            |row| {
                Ok(Subcategory::new(
                    SubcategoryId::new(row.get(0)?),
                    CategoryId::new(row.get(1)?),
                    row.get::<_, String>(2)?,
                ))
            },
        )
    }

    fn find_subcategory(&self, label: &str) -> ReportResult<Option<SubcategoryId>> {
        let ids = self.rows(
            "subcategory lookup",
            "SELECT id FROM subcategoria WHERE txt = ?1",
            &[Value::Text(label.to_string())],
            1,
            |row| Ok(SubcategoryId::new(row.get(0)?)),
        )?;

        match ids.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(ReportError::ambiguous(
                "subcategory lookup",
                format!("{} subcategories labelled '{}'", ids.len(), label),
            )),
        }
    }

    fn count(&self, scope: CountScope) -> ReportResult<u64> {
        let (sql, id) = match scope {
            CountScope::Category(id) => (
                "SELECT COUNT(*) FROM RESUMEN_MENSUAL m \
                 JOIN subcategoria s ON m.subcategoria = s.id \
                 WHERE s.categoria = ?1",
                id.as_i64(),
            ),
            CountScope::Subcategory(id) => (
                "SELECT COUNT(*) FROM RESUMEN_MENSUAL WHERE subcategoria = ?1",
                id.as_i64(),
            ),
        };

        let count = self.single_row("record count", sql, &[Value::Integer(id)], 1, |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(count as u64)
    }

    fn month_bounds(&self, excluding: Option<SubcategoryId>) -> ReportResult<Option<MonthBounds>> {
        let (sql, params) = match excluding {
            Some(id) => (
                "SELECT MIN(mes), MAX(mes) FROM RESUMEN_MENSUAL WHERE subcategoria != ?1",
                vec![Value::Integer(id.as_i64())],
            ),
            None => ("SELECT MIN(mes), MAX(mes) FROM RESUMEN_MENSUAL", Vec::new()),
        };

        let (first, last) = self.single_row("month bounds", sql, &params, 2, |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
            ))
        })?;

        match (first, last) {
            (Some(first), Some(last)) => Ok(Some(MonthBounds {
                first: ledger_month(&first)?,
                last: ledger_month(&last)?,
            })),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySelection, DateRange};
    use crate::store::memory::tests::sample_store;
    use tempfile::TempDir;

    fn sample_db() -> (TempDir, SqliteStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.sqlite");
        SqliteStore::create(&path, sample_store().snapshot()).unwrap();
        let store = SqliteStore::open_read_only(&path).unwrap();
        (temp_dir, store)
    }

    fn query(start: &str, end: &str, ids: &[i64]) -> MonthlyQuery {
        let selection: CategorySelection = ids.iter().copied().map(SubcategoryId::new).collect();
        MonthlyQuery::for_selection(DateRange::parse(start, end).unwrap(), &selection).unwrap()
    }

    #[test]
    fn test_filter_clause_single_uses_equality() {
        let (clause, params) = filter_clause(&query("2023-01", "2023-02", &[10]));
        assert_eq!(clause, "mes >= ?1 AND mes <= ?2 AND subcategoria = ?3");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_filter_clause_many_uses_membership() {
        let (clause, params) = filter_clause(&query("2023-01", "2023-02", &[11, 10, 20]));
        assert_eq!(
            clause,
            "mes >= ?1 AND mes <= ?2 AND subcategoria IN (?3, ?4, ?5)"
        );
        assert_eq!(params[2], Value::Integer(10));
        assert_eq!(params[4], Value::Integer(20));
    }

    #[test]
    fn test_matches_memory_store() {
        let (_temp_dir, sqlite) = sample_db();
        let memory = sample_store();

        let q = query("2023-01", "2023-04", &[10, 11, 20]);
        assert_eq!(
            sqlite.range_totals(&q).unwrap(),
            memory.range_totals(&q).unwrap()
        );
        assert_eq!(sqlite.flow_totals(&q).unwrap(), memory.flow_totals(&q).unwrap());

        for granularity in [
            Granularity::Month,
            Granularity::Quarter,
            Granularity::FourMonth,
            Granularity::Semester,
            Granularity::Year,
        ] {
            assert_eq!(
                sqlite.bucket_totals(&q, granularity).unwrap(),
                memory.bucket_totals(&q, granularity).unwrap(),
                "{granularity}"
            );
        }
    }

    #[test]
    fn test_empty_filter_result() {
        let (_temp_dir, store) = sample_db();
        let totals = store.range_totals(&query("2021-01", "2021-12", &[10])).unwrap();
        assert_eq!(totals, RangeTotals::default());
        let flow = store.flow_totals(&query("2021-01", "2021-12", &[10])).unwrap();
        assert_eq!(flow, FlowTotals::default());
    }

    #[test]
    fn test_metadata_queries() {
        let (_temp_dir, store) = sample_db();
        assert_eq!(store.categories().unwrap().len(), 3);
        assert_eq!(store.subcategories(CategoryId::new(1)).unwrap().len(), 2);
        assert_eq!(
            store.find_subcategory("Saldo inicial").unwrap(),
            Some(SubcategoryId::new(99))
        );
        assert_eq!(store.count(CountScope::Category(CategoryId::new(2))).unwrap(), 3);

        let bounds = store.month_bounds(Some(SubcategoryId::new(99))).unwrap().unwrap();
        assert_eq!(bounds.first.to_string(), "2023-01");
        assert_eq!(bounds.last.to_string(), "2023-04");
    }

    #[test]
    fn test_unexpected_row_count_is_ambiguous() {
        let (_temp_dir, store) = sample_db();
        let err = store
            .single_row(
                "probe",
                "SELECT id FROM categoria WHERE id > ?1",
                &[Value::Integer(-100)],
                1,
                |row| row.get::<_, i64>(0),
            )
            .unwrap_err();
        assert!(err.is_ambiguous());
    }

    #[test]
    fn test_unexpected_width_is_ambiguous() {
        let (_temp_dir, store) = sample_db();
        let err = store
            .single_row("probe", "SELECT id, txt FROM categoria", &[], 1, |row| {
                row.get::<_, i64>(0)
            })
            .unwrap_err();
        assert!(err.is_ambiguous());
    }

    #[test]
    fn test_missing_database_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = SqliteStore::open_read_only(&temp_dir.path().join("missing.sqlite"))
            .err()
            .unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_in_memory_connection() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        let store = SqliteStore::from_connection(conn);
        assert_eq!(store.month_bounds(None).unwrap(), None);
    }
}
