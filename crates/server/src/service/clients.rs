//! Client operations.

use shopapi_core::{
    AddClientRequest, AddClientResponse, DeleteClientRequest, DeleteClientResponse,
    GetClientsByNameRequest, GetClientsByNameResponse, GetClientsRequest, GetClientsResponse,
    PatchClientAddressRequest, PatchClientAddressResponse,
};

use super::{Service, payload_key};
use crate::cache::{Cache, cache_key};
use crate::service::Storage;

impl<C: Cache, S: Storage> Service<C, S> {
    pub async fn add_client(&self, req: &AddClientRequest) -> Option<AddClientResponse> {
        let (key, avoid_cache) = payload_key("AddClient", &[], &req.client, req.avoid_cache);
        let result = self
            .exec_with_cache(&key, avoid_cache, || self.storage.add_client(req))
            .await;
        Self::conclude("AddClient", result)
    }

    pub async fn delete_client(&self, req: &DeleteClientRequest) -> Option<DeleteClientResponse> {
        let key = cache_key("DeleteClient", &[&req.uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.delete_client(req))
            .await;
        Self::conclude("DeleteClient", result)
    }

    pub async fn get_clients(&self, req: &GetClientsRequest) -> Option<GetClientsResponse> {
        let key = cache_key(
            "GetClients",
            &[&req.limit.to_string(), &req.offset.to_string()],
        );
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.get_clients(req))
            .await;
        Self::conclude("GetClients", result)
    }

    pub async fn get_clients_by_name(
        &self,
        req: &GetClientsByNameRequest,
    ) -> Option<GetClientsByNameResponse> {
        // Free-text parameters are hashed so separators inside them cannot collide
        let (key, avoid_cache) = payload_key(
            "GetClientsByName",
            &[],
            &(&req.name, &req.surname),
            req.avoid_cache,
        );
        let result = self
            .exec_with_cache(&key, avoid_cache, || self.storage.get_clients_by_name(req))
            .await;
        Self::conclude("GetClientsByName", result)
    }

    pub async fn patch_client_address(
        &self,
        req: &PatchClientAddressRequest,
    ) -> Option<PatchClientAddressResponse> {
        let (key, avoid_cache) = payload_key(
            "PatchClientAddress",
            &[&req.uid.to_string()],
            &req.address,
            req.avoid_cache,
        );
        let result = self
            .exec_with_cache(&key, avoid_cache, || self.storage.patch_client_address(req))
            .await;
        Self::conclude("PatchClientAddress", result)
    }
}
