pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ListParams;
use crate::models::performance::requests::PerformancePayload;
use crate::storage::Storage;

pub struct PerformanceService {
    storage: Arc<dyn Storage>,
}

impl PerformanceService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn list_performance(&self, params: ListParams) -> ActixResult<HttpResponse> {
        list::list_performance(self, params).await
    }

    pub async fn create_performance(
        &self,
        request: &HttpRequest,
        payload: PerformancePayload,
    ) -> ActixResult<HttpResponse> {
        create::create_performance(self, request, payload).await
    }

    pub async fn get_performance(&self, record_id: i64) -> ActixResult<HttpResponse> {
        get::get_performance(self, record_id).await
    }

    pub async fn update_performance(
        &self,
        record_id: i64,
        payload: PerformancePayload,
        partial: bool,
    ) -> ActixResult<HttpResponse> {
        update::update_performance(self, record_id, payload, partial).await
    }

    pub async fn delete_performance(&self, record_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_performance(self, record_id).await
    }

    // 总平均分与按科目平均分
    pub async fn get_summary(&self) -> ActixResult<HttpResponse> {
        summary::get_summary(self).await
    }
}
