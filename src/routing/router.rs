//! Route table.
//!
//! # Responsibilities
//! - Map method + path template to a handler
//! - Register the flat user resource and the four user-scoped resources
//!
//! # Design Decisions
//! - Full paths are registered directly; no nesting
//! - Collection paths (and the namespace root) also answer with a trailing
//!   slash; item paths do not
//! - Every user-scoped resource has the same five operations

use axum::{
    handler::Handler,
    routing::{get, post, MethodRouter},
    Router,
};

use crate::handlers::{budget_templates, categories, health, notifications, transactions, users};
use crate::http::server::AppState;

/// Versioned API namespace.
pub const API_PREFIX: &str = "/api/v1";

/// Handlers for one resource nested under a user.
struct UserScoped<C, L, G, U, D> {
    segment: &'static str,
    create: C,
    list: L,
    get: G,
    update: U,
    delete: D,
}

impl<C, L, G, U, D> UserScoped<C, L, G, U, D> {
    /// Register `/users/{user_id}/{segment}` and `/users/{user_id}/{segment}/{resource_id}`.
    fn register<TC, TL, TG, TU, TD>(self, router: Router<AppState>) -> Router<AppState>
    where
        C: Handler<TC, AppState>,
        L: Handler<TL, AppState>,
        G: Handler<TG, AppState>,
        U: Handler<TU, AppState>,
        D: Handler<TD, AppState>,
        TC: 'static,
        TL: 'static,
        TG: 'static,
        TU: 'static,
        TD: 'static,
    {
        let collection = format!("{API_PREFIX}/users/{{user_id}}/{}", self.segment);
        let item = format!("{collection}/{{resource_id}}");

        let router = with_trailing_slash(router, &collection, post(self.create).get(self.list));
        router.route(&item, get(self.get).put(self.update).delete(self.delete))
    }
}

/// Register `path` both as given and with a trailing slash.
fn with_trailing_slash(
    router: Router<AppState>,
    path: &str,
    methods: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, methods.clone())
        .route(&format!("{path}/"), methods)
}

/// Build every route under [`API_PREFIX`], including the health check.
pub fn api_routes() -> Router<AppState> {
    let router = Router::new().route(&format!("{API_PREFIX}/health"), get(health::health));
    let router = with_trailing_slash(router, API_PREFIX, get(health::welcome));
    let router = with_trailing_slash(
        router,
        &format!("{API_PREFIX}/users"),
        post(users::create_user),
    );

    let router = router
        .route(
            &format!("{API_PREFIX}/users/{{user_id}}"),
            get(users::get_user_by_id)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let router = UserScoped {
        segment: "categories",
        create: categories::create_category,
        list: categories::list_categories_by_user_id,
        get: categories::get_category_by_id,
        update: categories::update_category,
        delete: categories::delete_category,
    }
    .register(router);

    let router = UserScoped {
        segment: "transactions",
        create: transactions::create_transaction,
        list: transactions::list_transactions_by_user_id,
        get: transactions::get_transaction_by_id,
        update: transactions::update_transaction,
        delete: transactions::delete_transaction,
    }
    .register(router);

    let router = UserScoped {
        segment: "notifications",
        create: notifications::create_notification,
        list: notifications::list_notifications_by_user_id,
        get: notifications::get_notification_by_id,
        update: notifications::update_notification,
        delete: notifications::delete_notification,
    }
    .register(router);

    UserScoped {
        segment: "budget-templates",
        create: budget_templates::create_budget_template,
        list: budget_templates::list_budget_templates_by_user_id,
        get: budget_templates::get_budget_template_by_id,
        update: budget_templates::update_budget_template,
        delete: budget_templates::delete_budget_template,
    }
    .register(router)
}
