//! Driven port handing resource alerts to the delivery collaborator.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::resource::ResourceAlert;

define_port_error! {
    /// Errors raised while handing over an alert.
    pub enum AlertNotifierError {
        /// The collaborator refused or could not accept the alert.
        Delivery { message: String } =>
            "alert hand-off failed: {message}",
    }
}

/// Port for notifying a resource that help is needed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Accept `alert` for delivery. Success does not imply delivery.
    async fn notify(&self, alert: &ResourceAlert) -> Result<(), AlertNotifierError>;
}
