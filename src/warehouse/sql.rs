use anyhow::Result;
use log::{debug, info};
use serde_json::Value;

use crate::error::{MapError, MapResult};
use crate::fetch::UNKNOWN_NAME;
use crate::record::PointRecord;
use crate::warehouse::{rows_to_records, ReadRow, Warehouse};

/// Buffer distance, in meters, materialized next to each point.
pub const STORED_BUFFER_METERS: u32 = 50;

/// Fully qualified table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    database: String,
    schema: String,
    table: String,
}

impl TableRef {
    /// Identifiers are restricted to letters, digits, `_` and `$` since they are spliced into SQL.
    pub fn new(database: &str, schema: &str, table: &str) -> MapResult<Self> {
        for ident in [database, schema, table] {
            let valid = !ident.is_empty()
                && !ident.starts_with(|c: char| c.is_ascii_digit())
                && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
            if !valid {
                return Err(MapError::config(format!("invalid SQL identifier: {ident:?}")));
            }
        }
        Ok(Self { database: database.into(), schema: schema.into(), table: table.into() })
    }

    pub fn qualified(&self) -> String { format!("{}.{}.{}", self.database, self.schema, self.table) }
}

/// Raw staging table and materialized points table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseTables {
    pub raw: TableRef,
    pub points: TableRef,
}

impl WarehouseTables {
    pub fn new(database: &str, schema: &str) -> MapResult<Self> {
        Ok(Self {
            raw: TableRef::new(database, schema, "TB_APT_RAW")?,
            points: TableRef::new(database, schema, "TB_APT")?,
        })
    }
}

/// SQL text with positional `?` parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    fn new(sql: String) -> Self { Self { sql, params: Vec::new() } }

    fn bind(mut self, param: String) -> Self {
        self.params.push(param);
        self
    }

    /// SQL with parameters substituted as quoted literals, for logs and dry runs.
    pub fn inline(&self) -> String {
        let mut params = self.params.iter();
        let mut out = String::with_capacity(self.sql.len());
        for c in self.sql.chars() {
            if c == '?' {
                if let Some(p) = params.next() {
                    out.push('\'');
                    out.push_str(&p.replace('\'', "''"));
                    out.push('\'');
                    continue;
                }
            }
            out.push(c);
        }
        out
    }

    pub fn truncate(table: &TableRef) -> Self {
        Self::new(format!("TRUNCATE TABLE IF EXISTS {}", table.qualified()))
    }

    pub fn insert_raw(table: &TableRef, payload: &Value) -> Self {
        Self::new(format!("INSERT INTO {} (RAW_JSON) SELECT PARSE_JSON(?)", table.qualified()))
            .bind(payload.to_string())
    }

    /// Flatten staged elements into the points table.
    pub fn refresh_points(tables: &WarehouseTables) -> Self {
        let lat = "COALESCE(e.value:lat, e.value:center:lat)::FLOAT";
        let lon = "COALESCE(e.value:lon, e.value:center:lon)::FLOAT";
        let geo = format!("TO_GEOGRAPHY(ST_MAKEPOINT({lon}, {lat}))");
        Self::new(format!(
            "INSERT OVERWRITE INTO {points} (ID, NAME, LATITUDE, LONGITUDE, \"tags\", GEO, BUFFER) \
             SELECT e.value:id::NUMBER, COALESCE(e.value:tags:name::STRING, ?), {lat}, {lon}, e.value:tags, \
             {geo}, ST_BUFFER({geo}, {STORED_BUFFER_METERS}) \
             FROM {raw} r, LATERAL FLATTEN(input => r.RAW_JSON:elements) e \
             WHERE e.value:id IS NOT NULL AND {lat} IS NOT NULL AND {lon} IS NOT NULL",
            points = tables.points.qualified(),
            raw = tables.raw.qualified(),
        ))
        .bind(UNKNOWN_NAME.to_string())
    }

    pub fn select_points(table: &TableRef) -> Self {
        Self::new(format!(
            "SELECT NAME, LATITUDE, LONGITUDE, \"tags\" FROM {} \
             WHERE LATITUDE IS NOT NULL AND LONGITUDE IS NOT NULL",
            table.qualified()
        ))
    }
}

/// A live warehouse connection. Implementations own connection reuse.
pub trait SqlExecutor {
    /// Run a statement; returns the affected row count.
    fn execute(&mut self, statement: &Statement) -> Result<u64>;

    /// Run a `NAME, LATITUDE, LONGITUDE, tags` query.
    fn query(&mut self, statement: &Statement) -> Result<Vec<ReadRow>>;
}

/// [`Warehouse`] over an injected SQL connection.
#[derive(Debug)]
pub struct SqlWarehouse<E> {
    executor: E,
    tables: WarehouseTables,
}

impl<E: SqlExecutor> SqlWarehouse<E> {
    pub fn new(executor: E, tables: WarehouseTables) -> Self { Self { executor, tables } }

    #[inline] pub fn tables(&self) -> &WarehouseTables { &self.tables }

    #[inline] pub fn executor(&self) -> &E { &self.executor }

    fn execute(&mut self, statement: Statement) -> Result<u64> {
        debug!("[sql] {}", statement.sql);
        self.executor.execute(&statement)
    }
}

impl<E: SqlExecutor> Warehouse for SqlWarehouse<E> {
    fn truncate_raw(&mut self) -> Result<()> {
        self.execute(Statement::truncate(&self.tables.raw))?;
        Ok(())
    }

    fn insert_raw(&mut self, payload: &Value) -> Result<()> {
        self.execute(Statement::insert_raw(&self.tables.raw, payload))?;
        info!("[sql] staged raw document into {}", self.tables.raw.qualified());
        Ok(())
    }

    fn refresh(&mut self) -> Result<usize> {
        let rows = self.execute(Statement::refresh_points(&self.tables))?;
        Ok(usize::try_from(rows)?)
    }

    fn select_points(&mut self) -> Result<Vec<PointRecord>> {
        let statement = Statement::select_points(&self.tables.points);
        debug!("[sql] {}", statement.sql);
        let rows = self.executor.query(&statement)?;
        Ok(rows_to_records(rows))
    }
}
