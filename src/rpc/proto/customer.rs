//! `user_service.CustomerService` messages.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rpc::client::GrpcClient;
use crate::rpc::entity::{AssignId, Entity, EntityService};
use crate::validation::Contact;

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Customer {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub phone: String,
    #[prost(string, tag = "4")]
    pub email: String,
    #[prost(string, tag = "5")]
    pub address: String,
    #[prost(string, tag = "6")]
    pub created_at: String,
    #[prost(string, tag = "7")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateCustomer {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub phone: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub address: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateCustomer {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub phone: String,
    #[prost(string, tag = "4")]
    pub email: String,
    #[prost(string, tag = "5")]
    pub address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomerPrimaryKey {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetListCustomerRequest {
    #[prost(string, tag = "1")]
    pub search: String,
    #[prost(uint64, tag = "2")]
    pub page: u64,
    #[prost(uint64, tag = "3")]
    pub limit: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct GetListCustomerResponse {
    #[prost(uint64, tag = "1")]
    pub count: u64,
    #[prost(message, repeated, tag = "2")]
    pub customers: Vec<Customer>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize, ToSchema)]
pub struct CustomerEmpty {}

impl Contact for CreateCustomer {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl Contact for UpdateCustomer {
    fn phone(&self) -> Option<&str> {
        Some(&self.phone)
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl AssignId for UpdateCustomer {
    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for Customer {
    const SERVICE: &'static str = "user_service.CustomerService";
    const NAME: &'static str = "customer";

    type Create = CreateCustomer;
    type Update = UpdateCustomer;
    type PrimaryKey = CustomerPrimaryKey;
    type ListRequest = GetListCustomerRequest;
    type ListResponse = GetListCustomerResponse;
    type Empty = CustomerEmpty;

    fn primary_key(id: String) -> CustomerPrimaryKey {
        CustomerPrimaryKey { id }
    }

    fn list_request(search: String, page: u64, limit: u64) -> GetListCustomerRequest {
        GetListCustomerRequest {
            search,
            page,
            limit,
        }
    }

    fn service(client: &GrpcClient) -> &dyn EntityService<Self> {
        client.customer_service()
    }
}
