//! `user_service.UsService` messages (system users).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rpc::client::GrpcClient;
use crate::rpc::entity::{AssignId, Entity, EntityService};
use crate::validation::Contact;

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SystemUser {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub login: String,
    #[prost(string, tag = "4")]
    pub phone: String,
    #[prost(string, tag = "5")]
    pub email: String,
    #[prost(string, tag = "6")]
    pub created_at: String,
    #[prost(string, tag = "7")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateSystemUser {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub login: String,
    #[prost(string, tag = "3")]
    pub phone: String,
    #[prost(string, tag = "4")]
    pub email: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateSystemUser {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub login: String,
    #[prost(string, tag = "4")]
    pub phone: String,
    #[prost(string, tag = "5")]
    pub email: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SystemUserPrimaryKey {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetListSystemUserRequest {
    #[prost(string, tag = "1")]
    pub search: String,
    #[prost(uint64, tag = "2")]
    pub page: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetListSystemUserResponse {
    #[prost(uint64, tag = "1")]
    pub count: u64,
    #[prost(message, repeated, tag = "2")]
    pub users: Vec<SystemUser>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
pub struct SystemUserEmpty {}

impl Contact for CreateSystemUser {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl Contact for UpdateSystemUser {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl AssignId for UpdateSystemUser {
    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for SystemUser {
    const SERVICE: &'static str = "user_service.UsService";
    const NAME: &'static str = "system user";

    type Create = CreateSystemUser;
    type Update = UpdateSystemUser;
    type PrimaryKey = SystemUserPrimaryKey;
    type ListRequest = GetListSystemUserRequest;
    type ListResponse = GetListSystemUserResponse;
    type Empty = SystemUserEmpty;

    fn primary_key(id: String) -> SystemUserPrimaryKey {
        SystemUserPrimaryKey { id }
    }

    fn list_request(search: String, page: u64, limit: u64) -> GetListSystemUserRequest {
        GetListSystemUserRequest {
            search,
            page,
            limit,
        }
    }

    fn service(client: &GrpcClient) -> &dyn EntityService<Self> {
        client.system_user_service()
    }
}
