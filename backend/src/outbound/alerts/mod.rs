//! Alert notifier adapters.
//!
//! Delivery to a real paging channel is out of scope; the tracing notifier
//! records the hand-off as a structured event so operators can follow it.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{AlertNotifier, AlertNotifierError};
use crate::domain::resource::ResourceAlert;

/// Notifier that emits each accepted alert as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertNotifier;

#[async_trait]
impl AlertNotifier for TracingAlertNotifier {
    async fn notify(&self, alert: &ResourceAlert) -> Result<(), AlertNotifierError> {
        info!(
            target: "horizon::alerts",
            resource_id = %alert.resource_id,
            resource_name = %alert.resource_name,
            latitude = alert.location.latitude,
            longitude = alert.location.longitude,
            "emergency alert handed off"
        );
        Ok(())
    }
}
