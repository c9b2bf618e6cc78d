//! API response models for dashboard statistics.

use serde::Serialize;
use utoipa::ToSchema;

/// Zero-padded counters for the dashboard header tiles.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_alerts_today: String,
    pub total_registered_faces: String,
}

impl DashboardStats {
    pub fn new(alerts_today: i64, registered_faces: i64) -> Self {
        Self {
            total_alerts_today: format!("{alerts_today:02}"),
            total_registered_faces: format!("{registered_faces:02}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        let stats = DashboardStats::new(3, 7);
        assert_eq!(stats.total_alerts_today, "03");
        assert_eq!(stats.total_registered_faces, "07");

        let stats = DashboardStats::new(120, 0);
        assert_eq!(stats.total_alerts_today, "120");
        assert_eq!(stats.total_registered_faces, "00");
    }
}
