//! Storage contracts consumed by the service.
//!
//! Every method returns `Ok` with a domain status for expected outcomes
//! (missing row, conflicting UID, short stock) and `Err` only for
//! infrastructure failures.

use std::future::Future;

use shopapi_core::{
    AddClientRequest, AddClientResponse, AddImageRequest, AddImageResponse, AddProductRequest,
    AddProductResponse, AddSupplierRequest, AddSupplierResponse, DecreaseProductsRequest,
    DecreaseProductsResponse, DeleteClientRequest, DeleteClientResponse, DeleteImageRequest,
    DeleteImageResponse, DeleteProductRequest, DeleteProductResponse, DeleteSupplierRequest,
    DeleteSupplierResponse, GetClientsByNameRequest, GetClientsByNameResponse, GetClientsRequest,
    GetClientsResponse, GetImageRequest, GetImageResponse, GetProductImageRequest,
    GetProductImageResponse, GetProductRequest, GetProductResponse, GetProductsRequest,
    GetProductsResponse, GetSupplierRequest, GetSupplierResponse, GetSuppliersRequest,
    GetSuppliersResponse, PatchClientAddressRequest, PatchClientAddressResponse,
    UpdateImageRequest, UpdateImageResponse, UpdateSupplierAddressRequest,
    UpdateSupplierAddressResponse,
};

use crate::db::RepositoryError;

pub trait ClientStorage: Send + Sync {
    fn add_client(
        &self,
        req: &AddClientRequest,
    ) -> impl Future<Output = Result<AddClientResponse, RepositoryError>> + Send;

    fn delete_client(
        &self,
        req: &DeleteClientRequest,
    ) -> impl Future<Output = Result<DeleteClientResponse, RepositoryError>> + Send;

    fn get_clients(
        &self,
        req: &GetClientsRequest,
    ) -> impl Future<Output = Result<GetClientsResponse, RepositoryError>> + Send;

    fn get_clients_by_name(
        &self,
        req: &GetClientsByNameRequest,
    ) -> impl Future<Output = Result<GetClientsByNameResponse, RepositoryError>> + Send;

    fn patch_client_address(
        &self,
        req: &PatchClientAddressRequest,
    ) -> impl Future<Output = Result<PatchClientAddressResponse, RepositoryError>> + Send;
}

pub trait SupplierStorage: Send + Sync {
    fn add_supplier(
        &self,
        req: &AddSupplierRequest,
    ) -> impl Future<Output = Result<AddSupplierResponse, RepositoryError>> + Send;

    fn update_supplier_address(
        &self,
        req: &UpdateSupplierAddressRequest,
    ) -> impl Future<Output = Result<UpdateSupplierAddressResponse, RepositoryError>> + Send;

    fn delete_supplier(
        &self,
        req: &DeleteSupplierRequest,
    ) -> impl Future<Output = Result<DeleteSupplierResponse, RepositoryError>> + Send;

    fn get_suppliers(
        &self,
        req: &GetSuppliersRequest,
    ) -> impl Future<Output = Result<GetSuppliersResponse, RepositoryError>> + Send;

    fn get_supplier(
        &self,
        req: &GetSupplierRequest,
    ) -> impl Future<Output = Result<GetSupplierResponse, RepositoryError>> + Send;
}

pub trait ProductStorage: Send + Sync {
    fn add_product(
        &self,
        req: &AddProductRequest,
    ) -> impl Future<Output = Result<AddProductResponse, RepositoryError>> + Send;

    fn decrease_products(
        &self,
        req: &DecreaseProductsRequest,
    ) -> impl Future<Output = Result<DecreaseProductsResponse, RepositoryError>> + Send;

    fn get_product(
        &self,
        req: &GetProductRequest,
    ) -> impl Future<Output = Result<GetProductResponse, RepositoryError>> + Send;

    fn get_products(
        &self,
        req: &GetProductsRequest,
    ) -> impl Future<Output = Result<GetProductsResponse, RepositoryError>> + Send;

    fn delete_product(
        &self,
        req: &DeleteProductRequest,
    ) -> impl Future<Output = Result<DeleteProductResponse, RepositoryError>> + Send;
}

pub trait ImageStorage: Send + Sync {
    fn add_image(
        &self,
        req: &AddImageRequest,
    ) -> impl Future<Output = Result<AddImageResponse, RepositoryError>> + Send;

    fn update_image(
        &self,
        req: &UpdateImageRequest,
    ) -> impl Future<Output = Result<UpdateImageResponse, RepositoryError>> + Send;

    fn delete_image(
        &self,
        req: &DeleteImageRequest,
    ) -> impl Future<Output = Result<DeleteImageResponse, RepositoryError>> + Send;

    fn get_product_image(
        &self,
        req: &GetProductImageRequest,
    ) -> impl Future<Output = Result<GetProductImageResponse, RepositoryError>> + Send;

    fn get_image(
        &self,
        req: &GetImageRequest,
    ) -> impl Future<Output = Result<GetImageResponse, RepositoryError>> + Send;
}

/// Everything the service needs from storage.
pub trait Storage: ClientStorage + SupplierStorage + ProductStorage + ImageStorage {}

impl<T> Storage for T where T: ClientStorage + SupplierStorage + ProductStorage + ImageStorage {}
