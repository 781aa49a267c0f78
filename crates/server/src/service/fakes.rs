//! In-memory fakes for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use shopapi_core::{
    AddClientRequest, AddClientResponse, AddImageRequest, AddImageResponse, AddProductRequest,
    AddProductResponse, AddSupplierRequest, AddSupplierResponse, DecreaseProductsRequest,
    DecreaseProductsResponse, DeleteClientRequest, DeleteClientResponse, DeleteImageRequest,
    DeleteImageResponse, DeleteProductRequest, DeleteProductResponse, DeleteSupplierRequest,
    DeleteSupplierResponse, GetClientsByNameRequest, GetClientsByNameResponse, GetClientsRequest,
    GetClientsResponse, GetImageRequest, GetImageResponse, GetProductImageRequest,
    GetProductImageResponse, GetProductRequest, GetProductResponse, GetProductsRequest,
    GetProductsResponse, GetSupplierRequest, GetSupplierResponse, GetSuppliersRequest,
    GetSuppliersResponse, ImageUid, PatchClientAddressRequest, PatchClientAddressResponse, Status,
    UpdateImageRequest, UpdateImageResponse, UpdateSupplierAddressRequest,
    UpdateSupplierAddressResponse,
};

use super::storage::{ClientStorage, ImageStorage, ProductStorage, SupplierStorage};
use crate::cache::{Cache, CacheError};
use crate::db::RepositoryError;

/// Collects formatted log lines emitted while installed.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's events here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[allow(clippy::unwrap_used)]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    #[allow(clippy::unwrap_used)]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Map-backed cache with call counters and failure switches.
#[derive(Debug, Default)]
pub struct FakeCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FakeCache {
    #[allow(clippy::unwrap_used)]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

fn injected() -> CacheError {
    CacheError::Timeout(std::time::Duration::from_millis(200))
}

impl Cache for FakeCache {
    #[allow(clippy::unwrap_used)]
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected());
        }
        let bytes = self.entries.lock().unwrap().get(key).cloned();
        Ok(bytes.map(|b| serde_json::from_slice(&b)).transpose()?)
    }

    #[allow(clippy::unwrap_used)]
    async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected());
        }
        let bytes = serde_json::to_vec(value)?;
        self.entries.lock().unwrap().insert(key.to_owned(), bytes);
        Ok(())
    }
}

/// Storage answering with canned responses.
///
/// Counts every call; `fail` turns every call into an infrastructure error.
/// Product stock is a single shared counter.
#[derive(Debug)]
pub struct FakeStorage {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
    pub stock: AtomicI64,
}

impl Default for FakeStorage {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            stock: AtomicI64::new(20),
        }
    }
}

impl FakeStorage {
    fn enter(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::DataCorruption("injected failure".into()));
        }
        Ok(())
    }
}

impl ClientStorage for FakeStorage {
    async fn add_client(&self, req: &AddClientRequest) -> Result<AddClientResponse, RepositoryError> {
        self.enter()?;
        Ok(AddClientResponse::created(req.client.uid.or_generate()))
    }

    async fn delete_client(
        &self,
        _req: &DeleteClientRequest,
    ) -> Result<DeleteClientResponse, RepositoryError> {
        self.enter()?;
        Ok(DeleteClientResponse::with_status(Status::Success))
    }

    async fn get_clients(
        &self,
        _req: &GetClientsRequest,
    ) -> Result<GetClientsResponse, RepositoryError> {
        self.enter()?;
        Ok(GetClientsResponse::default())
    }

    async fn get_clients_by_name(
        &self,
        _req: &GetClientsByNameRequest,
    ) -> Result<GetClientsByNameResponse, RepositoryError> {
        self.enter()?;
        Ok(GetClientsByNameResponse::default())
    }

    async fn patch_client_address(
        &self,
        _req: &PatchClientAddressRequest,
    ) -> Result<PatchClientAddressResponse, RepositoryError> {
        self.enter()?;
        Ok(PatchClientAddressResponse::with_status(Status::NotFound))
    }
}

impl SupplierStorage for FakeStorage {
    async fn add_supplier(
        &self,
        req: &AddSupplierRequest,
    ) -> Result<AddSupplierResponse, RepositoryError> {
        self.enter()?;
        Ok(AddSupplierResponse::created(req.supplier.uid.or_generate()))
    }

    async fn update_supplier_address(
        &self,
        _req: &UpdateSupplierAddressRequest,
    ) -> Result<UpdateSupplierAddressResponse, RepositoryError> {
        self.enter()?;
        Ok(UpdateSupplierAddressResponse::with_status(Status::Success))
    }

    async fn delete_supplier(
        &self,
        _req: &DeleteSupplierRequest,
    ) -> Result<DeleteSupplierResponse, RepositoryError> {
        self.enter()?;
        Ok(DeleteSupplierResponse::with_status(Status::Success))
    }

    async fn get_suppliers(
        &self,
        _req: &GetSuppliersRequest,
    ) -> Result<GetSuppliersResponse, RepositoryError> {
        self.enter()?;
        Ok(GetSuppliersResponse::default())
    }

    async fn get_supplier(
        &self,
        _req: &GetSupplierRequest,
    ) -> Result<GetSupplierResponse, RepositoryError> {
        self.enter()?;
        Ok(GetSupplierResponse::with_status(Status::NotFound))
    }
}

impl ProductStorage for FakeStorage {
    async fn add_product(
        &self,
        req: &AddProductRequest,
    ) -> Result<AddProductResponse, RepositoryError> {
        self.enter()?;
        Ok(AddProductResponse::created(req.product.uid.or_generate()))
    }

    async fn decrease_products(
        &self,
        req: &DecreaseProductsRequest,
    ) -> Result<DecreaseProductsResponse, RepositoryError> {
        self.enter()?;
        let amount = i64::from(req.amount);
        let stock = self.stock.load(Ordering::SeqCst);
        if stock < amount {
            return Ok(DecreaseProductsResponse::not_enough(stock));
        }
        let left = stock - amount;
        self.stock.store(left, Ordering::SeqCst);
        Ok(DecreaseProductsResponse::left(left))
    }

    async fn get_product(
        &self,
        _req: &GetProductRequest,
    ) -> Result<GetProductResponse, RepositoryError> {
        self.enter()?;
        Ok(GetProductResponse::with_status(Status::NotFound))
    }

    async fn get_products(
        &self,
        _req: &GetProductsRequest,
    ) -> Result<GetProductsResponse, RepositoryError> {
        self.enter()?;
        Ok(GetProductsResponse::default())
    }

    async fn delete_product(
        &self,
        _req: &DeleteProductRequest,
    ) -> Result<DeleteProductResponse, RepositoryError> {
        self.enter()?;
        Ok(DeleteProductResponse::with_status(Status::Success))
    }
}

impl ImageStorage for FakeStorage {
    async fn add_image(&self, req: &AddImageRequest) -> Result<AddImageResponse, RepositoryError> {
        self.enter()?;
        Ok(AddImageResponse::created(req.uid.or_generate()))
    }

    async fn update_image(
        &self,
        _req: &UpdateImageRequest,
    ) -> Result<UpdateImageResponse, RepositoryError> {
        self.enter()?;
        Ok(UpdateImageResponse::with_status(Status::Success))
    }

    async fn delete_image(
        &self,
        _req: &DeleteImageRequest,
    ) -> Result<DeleteImageResponse, RepositoryError> {
        self.enter()?;
        Ok(DeleteImageResponse::with_status(Status::Success))
    }

    async fn get_product_image(
        &self,
        _req: &GetProductImageRequest,
    ) -> Result<GetProductImageResponse, RepositoryError> {
        self.enter()?;
        Ok(GetProductImageResponse::found(
            ImageUid::generate(),
            vec![0x89, b'P', b'N', b'G'],
        ))
    }

    async fn get_image(&self, req: &GetImageRequest) -> Result<GetImageResponse, RepositoryError> {
        self.enter()?;
        Ok(GetImageResponse::found(req.uid, vec![0xFF, 0xD8, 0xFF]))
    }
}
