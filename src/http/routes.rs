//! Fixed REST surface of the gateway.
//!
//! Paths keep the casing existing clients already call; it differs between
//! entities and must not be normalised.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::http::handlers;
use crate::http::server::AppState;
use crate::rpc::proto::{Branch, Customer, Seller, Shop, SystemUser};
use crate::rpc::Entity;

/// The five paths of one entity. Paths with an id use the `{id}` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRoutes {
    /// OpenAPI tag grouping the operations.
    pub tag: &'static str,
    pub create: &'static str,
    pub list: &'static str,
    pub get_by_id: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

pub const CUSTOMER: EntityRoutes = EntityRoutes {
    tag: "customer",
    create: "/createCustomer",
    list: "/getlistcustomer",
    get_by_id: "/getbyidcustomer/{id}",
    update: "/updateCustomer/{id}",
    delete: "/deleteCustomer/{id}",
};

pub const SYSTEM_USER: EntityRoutes = EntityRoutes {
    tag: "system user",
    create: "/CreateUser",
    list: "/GetListUser",
    get_by_id: "/GetByIdUser/{id}",
    update: "/UpdateUser/{id}",
    delete: "/DeleteUser/{id}",
};

pub const SELLER: EntityRoutes = EntityRoutes {
    tag: "seller",
    create: "/CreateSeller",
    list: "/GetListSeller",
    get_by_id: "/GetByIdSeller/{id}",
    update: "/UpdateSeller/{id}",
    delete: "/DeleteSeller/{id}",
};

pub const BRANCH: EntityRoutes = EntityRoutes {
    tag: "branch",
    create: "/createBranch",
    list: "/GetListBranch",
    get_by_id: "/getbyidbranch/{id}",
    update: "/updateBranch/{id}",
    delete: "/deleteBranch/{id}",
};

pub const SHOP: EntityRoutes = EntityRoutes {
    tag: "shop",
    create: "/CreateShop",
    list: "/GetListShop",
    get_by_id: "/GetByIdShop/{id}",
    update: "/UpdateShop/{id}",
    delete: "/DeleteShop/{id}",
};

/// Binds the five generic handlers for `E` to its paths.
pub fn entity_router<E: Entity>(routes: &EntityRoutes) -> Router<AppState> {
    Router::new()
        .route(routes.create, post(handlers::create::<E>))
        .route(routes.list, get(handlers::list::<E>))
        .route(routes.get_by_id, get(handlers::get_by_id::<E>))
        .route(routes.update, put(handlers::update::<E>))
        .route(routes.delete, delete(handlers::delete::<E>))
}

/// Every entity route of the gateway.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(entity_router::<Customer>(&CUSTOMER))
        .merge(entity_router::<SystemUser>(&SYSTEM_USER))
        .merge(entity_router::<Seller>(&SELLER))
        .merge(entity_router::<Branch>(&BRANCH))
        .merge(entity_router::<Shop>(&SHOP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_paths_are_unique() {
        let mut seen = HashSet::new();
        for routes in [CUSTOMER, SYSTEM_USER, SELLER, BRANCH, SHOP] {
            for path in [
                routes.create,
                routes.list,
                routes.get_by_id,
                routes.update,
                routes.delete,
            ] {
                assert!(seen.insert(path), "duplicate path {path}");
            }
        }
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn test_id_paths_carry_placeholder() {
        for routes in [CUSTOMER, SYSTEM_USER, SELLER, BRANCH, SHOP] {
            for path in [routes.get_by_id, routes.update, routes.delete] {
                assert!(path.ends_with("/{id}"), "{path}");
            }
        }
    }
}
