//! Typed path parameters produced by the route table.

use serde::Deserialize;

/// `/users/{user_id}` and the collection routes nested under a user.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserPath {
    pub user_id: String,
}

/// `/users/{user_id}/{resource}/{resource_id}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserResourcePath {
    pub user_id: String,
    pub resource_id: String,
}
