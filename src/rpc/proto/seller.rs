//! `user_service.SellerService` messages.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rpc::client::GrpcClient;
use crate::rpc::entity::{AssignId, Entity, EntityService};
use crate::validation::Contact;

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Seller {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub phone: String,
    #[prost(string, tag = "4")]
    pub email: String,
    #[prost(string, tag = "5")]
    pub shop_id: String,
    #[prost(string, tag = "6")]
    pub created_at: String,
    #[prost(string, tag = "7")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateSeller {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub phone: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub shop_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateSeller {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub phone: String,
    #[prost(string, tag = "4")]
    pub email: String,
    #[prost(string, tag = "5")]
    pub shop_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SellerPrimaryKey {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetListSellerRequest {
    #[prost(string, tag = "1")]
    pub search: String,
    #[prost(uint64, tag = "2")]
    pub page: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetListSellerResponse {
    #[prost(uint64, tag = "1")]
    pub count: u64,
    #[prost(message, repeated, tag = "2")]
    pub sellers: Vec<Seller>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
pub struct SellerEmpty {}

impl Contact for CreateSeller {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl Contact for UpdateSeller {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl AssignId for UpdateSeller {
    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for Seller {
    const SERVICE: &'static str = "user_service.SellerService";
    const NAME: &'static str = "seller";

    type Create = CreateSeller;
    type Update = UpdateSeller;
    type PrimaryKey = SellerPrimaryKey;
    type ListRequest = GetListSellerRequest;
    type ListResponse = GetListSellerResponse;
    type Empty = SellerEmpty;

    fn primary_key(id: String) -> SellerPrimaryKey {
        SellerPrimaryKey { id }
    }

    fn list_request(search: String, page: u64, limit: u64) -> GetListSellerRequest {
        GetListSellerRequest {
            search,
            page,
            limit,
        }
    }

    fn service(client: &GrpcClient) -> &dyn EntityService<Self> {
        client.seller_service()
    }
}
