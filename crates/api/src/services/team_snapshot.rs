//! Team configuration loaded once per request.
//!
//! Active PPE items, filter placement and statuses are read together and
//! threaded into the domain computations explicitly.

use domain::models::{ActivePpeItems, ComplianceStatus, FilterDirectory, FilterInfo, StatusCatalog};
use domain::services::ExtractionContext;
use persistence::repositories::{ComplianceStatusRepository, FilterRepository, TeamRepository};
use sqlx::PgPool;
use tracing::warn;

/// Maps configured item names to known items, warning about the rest.
pub fn resolve_active_items(team_id: i64, names: &[String]) -> ActivePpeItems {
    let (active, unknown) = ActivePpeItems::from_display_names(names);
    if !unknown.is_empty() {
        warn!(team_id, unknown = ?unknown, "Ignoring unknown PPE item names");
    }
    active
}

#[derive(Debug, Clone, Default)]
pub struct TeamSnapshot {
    pub active: ActivePpeItems,
    pub filters: FilterDirectory,
    pub statuses: StatusCatalog,
}

impl TeamSnapshot {
    /// Loads only the active items; enough for aggregation and trends.
    pub async fn load_active_items(
        pool: &PgPool,
        team_id: i64,
    ) -> Result<ActivePpeItems, sqlx::Error> {
        let names = TeamRepository::new(pool.clone())
            .find_active_ppe_item_names(team_id)
            .await?;
        Ok(resolve_active_items(team_id, &names))
    }

    /// Loads everything alert extraction needs.
    pub async fn load(pool: &PgPool, team_id: i64) -> Result<Self, sqlx::Error> {
        let team_repo = TeamRepository::new(pool.clone());
        let filter_repo = FilterRepository::new(pool.clone());
        let status_repo = ComplianceStatusRepository::new(pool.clone());

        let (names, filters, statuses) = tokio::try_join!(
            team_repo.find_active_ppe_item_names(team_id),
            filter_repo.list_for_team(team_id),
            status_repo.list_for_team(team_id),
        )?;

        Ok(Self {
            active: resolve_active_items(team_id, &names),
            filters: FilterDirectory::new(filters.into_iter().map(FilterInfo::from)),
            statuses: StatusCatalog::new(
                statuses.into_iter().map(ComplianceStatus::from).collect(),
            ),
        })
    }

    pub fn extraction(&self) -> ExtractionContext<'_> {
        ExtractionContext {
            active: &self.active,
            filters: &self.filters,
            statuses: &self.statuses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::PpeItem;

    #[test]
    fn test_resolve_active_items_skips_unknown_names() {
        let names = vec![
            "Hard Hat".to_string(),
            "Jetpack".to_string(),
            "vest".to_string(),
        ];
        let active = resolve_active_items(1, &names);
        assert_eq!(active.len(), 2);
        assert!(active.contains(PpeItem::HardHat));
        assert!(active.contains(PpeItem::Vest));
    }

    #[test]
    fn test_resolve_active_items_empty() {
        assert!(resolve_active_items(1, &[]).is_empty());
    }

    #[test]
    fn test_default_snapshot_extracts_nothing() {
        let snapshot = TeamSnapshot::default();
        let ctx = snapshot.extraction();
        assert!(ctx.active.is_empty());
        assert!(ctx.filters.is_empty());
        assert!(ctx.statuses.is_empty());
    }
}
