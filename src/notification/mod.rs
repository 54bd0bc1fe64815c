//! # Notification Routes
//!
//! User subscriptions to notification channels. Subscriptions have no
//! workflow actions, only the standard CRUD surface.

use baasic_core::resource_routes;

resource_routes! {
    /// Routes for per-user notification subscriptions.
    pub struct SubscriptionRoutes => "notifications/subscriptions/users" {
        key: "id",
        filters: ["channels", "userIds", "moduleNames", "startDate", "endDate"],
        actions: {}
    }
}
