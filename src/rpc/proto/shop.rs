//! `user_service.ShopService` messages.
//!
//! Shops carry no contact fields, so create and update skip validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rpc::client::GrpcClient;
use crate::rpc::entity::{AssignId, Entity, EntityService};
use crate::validation::Contact;

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Shop {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub branch_id: String,
    #[prost(string, tag = "4")]
    pub address: String,
    #[prost(string, tag = "5")]
    pub created_at: String,
    #[prost(string, tag = "6")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateShop {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub branch_id: String,
    #[prost(string, tag = "3")]
    pub address: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateShop {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub branch_id: String,
    #[prost(string, tag = "4")]
    pub address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ShopPrimaryKey {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetListShopRequest {
    #[prost(string, tag = "1")]
    pub search: String,
    #[prost(uint64, tag = "2")]
    pub page: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetListShopResponse {
    #[prost(uint64, tag = "1")]
    pub count: u64,
    #[prost(message, repeated, tag = "2")]
    pub shops: Vec<Shop>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
pub struct ShopEmpty {}

impl Contact for CreateShop {}

impl Contact for UpdateShop {}

impl AssignId for UpdateShop {
    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for Shop {
    const SERVICE: &'static str = "user_service.ShopService";
    const NAME: &'static str = "shop";

    type Create = CreateShop;
    type Update = UpdateShop;
    type PrimaryKey = ShopPrimaryKey;
    type ListRequest = GetListShopRequest;
    type ListResponse = GetListShopResponse;
    type Empty = ShopEmpty;

    fn primary_key(id: String) -> ShopPrimaryKey {
        ShopPrimaryKey { id }
    }

    fn list_request(search: String, page: u64, limit: u64) -> GetListShopRequest {
        GetListShopRequest {
            search,
            page,
            limit,
        }
    }

    fn service(client: &GrpcClient) -> &dyn EntityService<Self> {
        client.shop_service()
    }
}
