//! Product operations.

use shopapi_core::{
    AddProductRequest, AddProductResponse, DecreaseProductsRequest, DecreaseProductsResponse,
    DeleteProductRequest, DeleteProductResponse, GetProductRequest, GetProductResponse,
    GetProductsRequest, GetProductsResponse,
};

use super::{Service, payload_key};
use crate::cache::{Cache, cache_key};
use crate::service::Storage;

impl<C: Cache, S: Storage> Service<C, S> {
    pub async fn add_product(&self, req: &AddProductRequest) -> Option<AddProductResponse> {
        let (key, avoid_cache) = payload_key(
            "AddProduct",
            &[&req.product.uid.to_string()],
            &req.product,
            req.avoid_cache,
        );
        let result = self
            .exec_with_cache(&key, avoid_cache, || self.storage.add_product(req))
            .await;
        Self::conclude("AddProduct", result)
    }

    /// Always reaches storage; a cached decrement would skip the write.
    pub async fn decrease_products(
        &self,
        req: &DecreaseProductsRequest,
    ) -> Option<DecreaseProductsResponse> {
        let result = self.storage.decrease_products(req).await;
        Self::conclude("DecreaseProducts", result)
    }

    pub async fn get_product(&self, req: &GetProductRequest) -> Option<GetProductResponse> {
        let key = cache_key("GetProduct", &[&req.uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.get_product(req))
            .await;
        Self::conclude("GetProduct", result)
    }

    pub async fn get_products(&self, req: &GetProductsRequest) -> Option<GetProductsResponse> {
        let key = cache_key(
            "GetProducts",
            &[&req.limit.to_string(), &req.offset.to_string()],
        );
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.get_products(req))
            .await;
        Self::conclude("GetProducts", result)
    }

    pub async fn delete_product(&self, req: &DeleteProductRequest) -> Option<DeleteProductResponse> {
        let key = cache_key("DeleteProduct", &[&req.uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.delete_product(req))
            .await;
        Self::conclude("DeleteProduct", result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::Ordering;

    use shopapi_core::{ProductUid, Status};

    use super::*;
    use crate::service::fakes::{FakeCache, FakeStorage};

    fn decrease(amount: u32) -> DecreaseProductsRequest {
        DecreaseProductsRequest {
            uid: ProductUid::generate(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_decrease_bypasses_cache() {
        let svc = Service::new(FakeCache::default(), FakeStorage::default());
        let req = decrease(5);

        assert_eq!(svc.decrease_products(&req).await.unwrap().left, Some(15));
        assert_eq!(svc.decrease_products(&req).await.unwrap().left, Some(10));

        assert_eq!(svc.storage.calls.load(Ordering::SeqCst), 2);
        assert_eq!(svc.cache.reads.load(Ordering::SeqCst), 0);
        assert_eq!(svc.cache.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_decrease_not_enough() {
        let svc = Service::new(FakeCache::default(), FakeStorage::default());

        let resp = svc.decrease_products(&decrease(25)).await.unwrap();
        assert_eq!(resp.status, Some(Status::NotEnoughStock));
        assert_eq!(resp.left, Some(20));
    }

    #[tokio::test]
    async fn test_decrease_storage_failure() {
        let svc = Service::new(FakeCache::default(), FakeStorage::default());
        svc.storage.fail.store(true, Ordering::SeqCst);

        assert!(svc.decrease_products(&decrease(1)).await.is_none());
    }
}
