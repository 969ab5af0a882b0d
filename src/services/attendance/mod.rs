pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ListParams;
use crate::models::attendance::requests::AttendancePayload;
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Arc<dyn Storage>,
}

impl AttendanceService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn list_attendance(&self, params: ListParams) -> ActixResult<HttpResponse> {
        list::list_attendance(self, params).await
    }

    // 记录者取自当前登录用户
    pub async fn create_attendance(
        &self,
        request: &HttpRequest,
        payload: AttendancePayload,
    ) -> ActixResult<HttpResponse> {
        create::create_attendance(self, request, payload).await
    }

    pub async fn get_attendance(&self, record_id: i64) -> ActixResult<HttpResponse> {
        get::get_attendance(self, record_id).await
    }

    pub async fn update_attendance(
        &self,
        record_id: i64,
        payload: AttendancePayload,
        partial: bool,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, record_id, payload, partial).await
    }

    pub async fn delete_attendance(&self, record_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, record_id).await
    }

    pub async fn get_summary(&self) -> ActixResult<HttpResponse> {
        summary::get_summary(self).await
    }
}
