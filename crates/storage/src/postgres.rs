//! Chart storage using PostgreSQL.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgConnection, PgPool};
use tracing::{debug, info, instrument, warn};

use charts_common::{Chart, ChartsError, ChartsResult, IcaoCode};

use crate::row::{ChartParams, ChartRow};
use crate::store::{ChartStore, UpsertOutcome};

/// Connection settings for [`PgChartStore`].
#[derive(Debug, Clone)]
pub struct PgStoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

/// Database connection pool and chart operations.
pub struct PgChartStore {
    pool: PgPool,
}

fn db_error(context: &str) -> impl Fn(sqlx::Error) -> ChartsError + '_ {
    move |e| ChartsError::DatabaseError(format!("{} failed: {}", context, e))
}

impl PgChartStore {
    /// Open a bounded connection pool.
    pub async fn connect(config: &PgStoreConfig) -> ChartsResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(db_error("Connection"))?;

        info!(
            max_connections = config.max_connections,
            "Connected to chart database"
        );

        Ok(Self { pool })
    }
}

#[async_trait]
impl ChartStore for PgChartStore {
    async fn initialize(&self) -> ChartsResult<()> {
        // Split SQL statements and execute them individually
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(db_error("Schema bootstrap"))?;
            }
        }

        Ok(())
    }

    #[instrument(skip(self, chart), fields(filename = %chart.filename, icao_code = %chart.icao_code))]
    async fn upsert(&self, chart: &Chart) -> ChartsResult<UpsertOutcome> {
        let params = ChartParams::from(chart);
        let mut tx = self.pool.begin().await.map_err(db_error("Begin"))?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM charts WHERE filename = $1")
            .bind(&params.filename)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Count"))?;

        let outcome = match count {
            0 => {
                insert_chart(&mut *tx, &params)
                    .await
                    .map_err(db_error("Insert"))?;
                UpsertOutcome::Inserted
            }
            1 => {
                update_chart(&mut *tx, &params)
                    .await
                    .map_err(db_error("Update"))?;
                UpsertOutcome::Updated
            }
            n => {
                warn!(duplicates = n, "Duplicate filenames in chart table, re-inserting");
                sqlx::query("DELETE FROM charts WHERE filename = $1")
                    .bind(&params.filename)
                    .execute(&mut *tx)
                    .await
                    .map_err(db_error("Delete duplicates"))?;
                insert_chart(&mut *tx, &params)
                    .await
                    .map_err(db_error("Insert"))?;
                UpsertOutcome::Reinserted { removed: n as u64 }
            }
        };

        tx.commit().await.map_err(db_error("Commit"))?;
        debug!(?outcome, "Chart upserted");

        Ok(outcome)
    }

    async fn delete_all_for_code(&self, icao_code: &IcaoCode) -> ChartsResult<u64> {
        let mut tx = self.pool.begin().await.map_err(db_error("Begin"))?;

        let result = sqlx::query("DELETE FROM charts WHERE icao_code = $1")
            .bind(icao_code.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Delete"))?;

        tx.commit().await.map_err(db_error("Commit"))?;

        Ok(result.rows_affected())
    }

    async fn list_by_code(&self, icao_code: &IcaoCode) -> ChartsResult<Vec<Chart>> {
        let rows = sqlx::query_as::<_, ChartRow>(
            "SELECT title, type, filename, filetype, source, icao_code, \
             subtype, runways, sids, stars FROM charts \
             WHERE icao_code = $1 ORDER BY filename",
        )
        .bind(icao_code.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Query"))?;

        if rows.is_empty() {
            return Err(ChartsError::NoChartsForAirport(icao_code.to_string()));
        }

        rows.into_iter().map(ChartRow::into_chart).collect()
    }

    async fn list_known_codes(&self) -> ChartsResult<BTreeSet<IcaoCode>> {
        let rows = sqlx::query_scalar::<_, String>("SELECT DISTINCT icao_code FROM charts")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Query"))?;

        // Rows written before codes were normalized may not parse; skip them.
        Ok(rows
            .iter()
            .filter_map(|code| IcaoCode::parse(code).ok())
            .collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Chart database pool closed");
    }
}

async fn insert_chart(conn: &mut PgConnection, params: &ChartParams) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO charts (
            title, type, filename, filetype, source,
            icao_code, subtype, runways, sids, stars
        ) VALUES (
            $1, $2, $3, $4, $5,
            $6, $7, $8, $9, $10
        )
        "#,
    )
    .bind(&params.title)
    .bind(&params.chart_type)
    .bind(&params.filename)
    .bind(&params.filetype)
    .bind(Json(&params.source))
    .bind(&params.icao_code)
    .bind(&params.subtype)
    .bind(&params.runways)
    .bind(&params.sids)
    .bind(&params.stars)
    .execute(conn)
    .await?;

    Ok(())
}

async fn update_chart(conn: &mut PgConnection, params: &ChartParams) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE charts SET
            title = $1, type = $2, filetype = $4, source = $5,
            icao_code = $6, subtype = $7, runways = $8, sids = $9, stars = $10
        WHERE filename = $3
        "#,
    )
    .bind(&params.title)
    .bind(&params.chart_type)
    .bind(&params.filename)
    .bind(&params.filetype)
    .bind(Json(&params.source))
    .bind(&params.icao_code)
    .bind(&params.subtype)
    .bind(&params.runways)
    .bind(&params.sids)
    .bind(&params.stars)
    .execute(conn)
    .await?;

    Ok(())
}

/// Database schema SQL.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS charts (
    title TEXT NOT NULL,
    type TEXT NOT NULL,
    filename TEXT NOT NULL UNIQUE,
    filetype TEXT NOT NULL,
    source JSONB NOT NULL,
    icao_code TEXT NOT NULL,
    subtype TEXT,
    runways TEXT[],
    sids TEXT[],
    stars TEXT[]
);

CREATE INDEX IF NOT EXISTS idx_charts_icao_code ON charts(icao_code);
"#;
