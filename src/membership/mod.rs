//! # Membership Routes
//!
//! Application users are keyed by `userName` rather than `id`.

use baasic_core::resource_routes;

resource_routes! {
    /// Routes for application users.
    pub struct UserRoutes => "users" {
        key: "userName",
        filters: [],
        actions: {
            approve => (Put, "approve", "approve"),
            disapprove => (Put, "disapprove", "disapprove"),
            lock => (Put, "lock", "lock"),
            unlock => (Put, "unlock", "unlock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baasic_core::{BaseRoute, ModelMapper};
    use serde_json::json;

    #[test]
    fn test_users_are_keyed_by_user_name() {
        let users = UserRoutes::new(ModelMapper::default()).unwrap();

        assert_eq!(users.get("ann", None).uri, "users/ann/");
        assert_eq!(users.lock(json!({"userName": "ann"})).uri, "users/ann/lock");
        assert_eq!(users.remove(json!("bob")).uri, "users/bob");
    }
}
