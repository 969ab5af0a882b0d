pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ListParams;
use crate::models::students::requests::StudentPayload;
use crate::storage::Storage;

pub struct StudentService {
    storage: Arc<dyn Storage>,
}

impl StudentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 学生列表（搜索 + 排序 + 分页）
    pub async fn list_students(&self, params: ListParams) -> ActixResult<HttpResponse> {
        list::list_students(self, params).await
    }

    pub async fn create_student(&self, payload: StudentPayload) -> ActixResult<HttpResponse> {
        create::create_student(self, payload).await
    }

    pub async fn get_student(&self, student_id: i64) -> ActixResult<HttpResponse> {
        get::get_student(self, student_id).await
    }

    // PUT 为整体替换，PATCH 为部分更新
    pub async fn update_student(
        &self,
        student_id: i64,
        payload: StudentPayload,
        partial: bool,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, student_id, payload, partial).await
    }

    pub async fn delete_student(&self, student_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_student(self, student_id).await
    }
}
