//! Repository for compliance records and their comments.
//!
//! Records are written by the detection pipeline; this service only reads
//! them, moves them between statuses and attaches comments.

use chrono::{DateTime, Utc};
use domain::models::{Comment, ComplianceRecord};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::entities::{CommentEntity, ComplianceRecordEntity};
use crate::metrics::QueryTimer;

/// Repository for compliance record operations.
#[derive(Clone)]
pub struct ComplianceRecordRepository {
    pool: PgPool,
}

impl ComplianceRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records of a team with `from <= recorded_at < to`, newest first.
    ///
    /// At most `max_records` rows are returned; when the window holds more,
    /// the oldest are left out. Comments are not loaded.
    pub async fn list_in_window(
        &self,
        team_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        max_records: i64,
    ) -> Result<Vec<ComplianceRecord>, sqlx::Error> {
        let timer = QueryTimer::new("list_compliance_records");
        let result = sqlx::query_as::<_, ComplianceRecordEntity>(
            r#"
            SELECT id, team_id, worker_id, filter_id, recorded_at, severity,
                   status_id, compliances
            FROM compliance_records
            WHERE team_id = $1
              AND recorded_at >= $2
              AND recorded_at < $3
            ORDER BY recorded_at DESC, id DESC
            LIMIT $4
            "#,
        )
        .bind(team_id)
        .bind(from)
        .bind(to)
        .bind(max_records.saturating_add(1))
        .fetch_all(&self.pool)
        .await;
        timer.record();

        let mut rows = result?;
        if truncate_to_cap(&mut rows, max_records) {
            tracing::warn!(
                team_id,
                max_records,
                "Record cap reached, older records in the window were skipped"
            );
        }
        Ok(rows.into_iter().map(ComplianceRecord::from).collect())
    }

    /// Finds a record only if it belongs to the team, with its comments.
    pub async fn find_in_team(
        &self,
        team_id: i64,
        record_id: i64,
    ) -> Result<Option<ComplianceRecord>, sqlx::Error> {
        let timer = QueryTimer::new("find_compliance_record");
        let result = sqlx::query_as::<_, ComplianceRecordEntity>(
            r#"
            SELECT id, team_id, worker_id, filter_id, recorded_at, severity,
                   status_id, compliances
            FROM compliance_records
            WHERE team_id = $1 AND id = $2
            "#,
        )
        .bind(team_id)
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        let Some(entity) = result? else {
            return Ok(None);
        };
        let mut records = vec![ComplianceRecord::from(entity)];
        self.attach_comments(&mut records).await?;
        Ok(records.pop())
    }

    /// Comments of the given records in one query, oldest comment first.
    pub async fn comments_by_record(
        &self,
        record_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Comment>>, sqlx::Error> {
        let mut by_record: HashMap<i64, Vec<Comment>> = HashMap::new();
        if record_ids.is_empty() {
            return Ok(by_record);
        }

        let timer = QueryTimer::new("list_compliance_comments");
        let result = sqlx::query_as::<_, CommentEntity>(
            r#"
            SELECT id, record_id, author, body, created_at
            FROM compliance_comments
            WHERE record_id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(record_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        for entity in result? {
            by_record
                .entry(entity.record_id)
                .or_default()
                .push(entity.into());
        }
        Ok(by_record)
    }

    /// Loads comments for `records`.
    pub async fn attach_comments(
        &self,
        records: &mut [ComplianceRecord],
    ) -> Result<(), sqlx::Error> {
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        let mut by_record = self.comments_by_record(&ids).await?;
        for record in records.iter_mut() {
            if let Some(comments) = by_record.remove(&record.id) {
                record.comments = comments;
            }
        }
        Ok(())
    }

    /// Moves a record to another status. Returns `false` if the record is not in the team.
    pub async fn update_status(
        &self,
        team_id: i64,
        record_id: i64,
        status_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("update_compliance_record_status");
        let result = sqlx::query(
            r#"
            UPDATE compliance_records
            SET status_id = $3
            WHERE team_id = $1 AND id = $2
            "#,
        )
        .bind(team_id)
        .bind(record_id)
        .bind(status_id)
        .execute(&self.pool)
        .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }

    /// Adds a comment to a record. The caller checks team ownership first.
    pub async fn add_comment(
        &self,
        record_id: i64,
        author: &str,
        text: &str,
    ) -> Result<CommentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_compliance_comment");
        let result = sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO compliance_comments (record_id, author, body)
            VALUES ($1, $2, $3)
            RETURNING id, record_id, author, body, created_at
            "#,
        )
        .bind(record_id)
        .bind(author)
        .bind(text)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

/// Cuts `rows` down to `cap`; true when anything was dropped.
///
/// Callers fetch one row past the cap so overflow is distinguishable from a
/// window holding exactly `cap` rows.
fn truncate_to_cap<T>(rows: &mut Vec<T>, cap: i64) -> bool {
    let cap = usize::try_from(cap).unwrap_or(0);
    if rows.len() > cap {
        rows.truncate(cap);
        true
    } else {
        false
    }
}
