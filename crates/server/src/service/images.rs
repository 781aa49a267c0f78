//! Image operations.
//!
//! Upload keys hash the raw bytes rather than their JSON encoding.

use shopapi_core::{
    AddImageRequest, AddImageResponse, DeleteImageRequest, DeleteImageResponse, GetImageRequest,
    GetImageResponse, GetProductImageRequest, GetProductImageResponse, UpdateImageRequest,
    UpdateImageResponse,
};

use super::Service;
use crate::cache::{Cache, bytes_hash, cache_key};
use crate::service::Storage;

impl<C: Cache, S: Storage> Service<C, S> {
    pub async fn add_image(&self, req: &AddImageRequest) -> Option<AddImageResponse> {
        let key = cache_key(
            "AddImage",
            &[&req.uid.to_string(), &bytes_hash(&req.image)],
        );
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.add_image(req))
            .await;
        Self::conclude("AddImage", result)
    }

    pub async fn update_image(&self, req: &UpdateImageRequest) -> Option<UpdateImageResponse> {
        let key = cache_key(
            "UpdateImage",
            &[&req.uid.to_string(), &bytes_hash(&req.image)],
        );
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.update_image(req))
            .await;
        Self::conclude("UpdateImage", result)
    }

    pub async fn delete_image(&self, req: &DeleteImageRequest) -> Option<DeleteImageResponse> {
        let key = cache_key("DeleteImage", &[&req.uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.delete_image(req))
            .await;
        Self::conclude("DeleteImage", result)
    }

    pub async fn get_product_image(
        &self,
        req: &GetProductImageRequest,
    ) -> Option<GetProductImageResponse> {
        let key = cache_key("GetProductImage", &[&req.product_uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.get_product_image(req))
            .await;
        Self::conclude("GetProductImage", result)
    }

    pub async fn get_image(&self, req: &GetImageRequest) -> Option<GetImageResponse> {
        let key = cache_key("GetImage", &[&req.uid.to_string()]);
        let result = self
            .exec_with_cache(&key, req.avoid_cache, || self.storage.get_image(req))
            .await;
        Self::conclude("GetImage", result)
    }
}
