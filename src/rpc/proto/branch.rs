//! `user_service.BranchService` messages.
//!
//! Branches carry a phone number but no email.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rpc::client::GrpcClient;
use crate::rpc::entity::{AssignId, Entity, EntityService};
use crate::validation::Contact;

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Branch {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub address: String,
    #[prost(string, tag = "4")]
    pub phone: String,
    #[prost(string, tag = "5")]
    pub created_at: String,
    #[prost(string, tag = "6")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateBranch {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub address: String,
    #[prost(string, tag = "3")]
    pub phone: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateBranch {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub address: String,
    #[prost(string, tag = "4")]
    pub phone: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BranchPrimaryKey {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetListBranchRequest {
    #[prost(string, tag = "1")]
    pub search: String,
    #[prost(uint64, tag = "2")]
    pub page: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetListBranchResponse {
    #[prost(uint64, tag = "1")]
    pub count: u64,
    #[prost(message, repeated, tag = "2")]
    pub branches: Vec<Branch>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
pub struct BranchEmpty {}

impl Contact for CreateBranch {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }
}

impl Contact for UpdateBranch {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }
}

impl AssignId for UpdateBranch {
    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for Branch {
    const SERVICE: &'static str = "user_service.BranchService";
    const NAME: &'static str = "branch";

    type Create = CreateBranch;
    type Update = UpdateBranch;
    type PrimaryKey = BranchPrimaryKey;
    type ListRequest = GetListBranchRequest;
    type ListResponse = GetListBranchResponse;
    type Empty = BranchEmpty;

    fn primary_key(id: String) -> BranchPrimaryKey {
        BranchPrimaryKey { id }
    }

    fn list_request(search: String, page: u64, limit: u64) -> GetListBranchRequest {
        GetListBranchRequest {
            search,
            page,
            limit,
        }
    }

    fn service(client: &GrpcClient) -> &dyn EntityService<Self> {
        client.branch_service()
    }
}
