//! Filter placement row, joined across the site topology tables.

use sqlx::FromRow;

/// One filter with the zone and location it belongs to.
#[derive(Debug, Clone, FromRow)]
pub struct FilterInfoEntity {
    pub filter_id: i64,
    pub zone_id: i64,
    pub zone_name: String,
    pub location_id: i64,
    pub location_name: String,
}

impl From<FilterInfoEntity> for domain::models::FilterInfo {
    fn from(entity: FilterInfoEntity) -> Self {
        Self {
            filter_id: entity.filter_id,
            zone_id: entity.zone_id,
            zone_name: entity.zone_name,
            location_id: entity.location_id,
            location_name: entity.location_name,
        }
    }
}
