//! Supplier operations.

use shopapi_core::{
    AddSupplierRequest, AddSupplierResponse, DeleteSupplierRequest, DeleteSupplierResponse,
    GetSupplierRequest, GetSupplierResponse, GetSuppliersRequest, GetSuppliersResponse,
    UpdateSupplierAddressRequest, UpdateSupplierAddressResponse,
};

use super::{Service, payload_key};
use crate::cache::{Cache, cache_key};
use crate::service::Storage;

impl<C: Cache, S: Storage> Service<C, S> {
    pub async fn add_supplier(&self, req: &AddSupplierRequest) -> Option<AddSupplierResponse> {
        let (key, avoid_cache) = payload_key(
            "AddSupplier",
            &[&req.supplier.uid.to_string()],
            &req.supplier,
            req.avoid_cache,
        );
        let result = self
            .exec_with_cache(&key, avoid_cache, || self.storage.add_supplier(req))
            .await;
        Self::conclude("AddSupplier", result)
    }

    pub async fn update_supplier_address(
        &self,
        req: &UpdateSupplierAddressRequest,
    ) -> Option<UpdateSupplierAddressResponse> {
        let (key, avoid_cache) = payload_key(
            "UpdateSupplierAddress",
            &[&req.uid.to_string()],
            &req.address,
            req.avoid_cache,
        );
        let result = self
            .exec_with_cache(&key, avoid_cache, || {
                self.storage.update_supplier_address(req)
            })
            .await;
        Self::conclude("UpdateSupplierAddress", result)
    }

    pub async fn delete_supplier(
        &self,
        req: &DeleteSupplierRequest,
    ) -> Option<DeleteSupplierResponse> {
        let key = cache_key("DeleteSupplier", &[&req.uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.delete_supplier(req))
            .await;
        Self::conclude("DeleteSupplier", result)
    }

    pub async fn get_suppliers(&self, req: &GetSuppliersRequest) -> Option<GetSuppliersResponse> {
        let key = cache_key(
            "GetSuppliers",
            &[&req.limit.to_string(), &req.offset.to_string()],
        );
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.get_suppliers(req))
            .await;
        Self::conclude("GetSuppliers", result)
    }

    pub async fn get_supplier(&self, req: &GetSupplierRequest) -> Option<GetSupplierResponse> {
        let key = cache_key("GetSupplier", &[&req.uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.get_supplier(req))
            .await;
        Self::conclude("GetSupplier", result)
    }
}
