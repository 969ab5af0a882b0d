pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::ListParams;
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use crate::storage::Storage;

pub struct UserService {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { storage, cache }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn cache(&self) -> &Arc<dyn ObjectCache> {
        &self.cache
    }

    // 获取用户列表
    pub async fn list_users(&self, params: ListParams) -> ActixResult<HttpResponse> {
        list::list_users(self, params).await
    }

    // 创建用户
    pub async fn create_user(&self, user_data: CreateUserRequest) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id).await
    }

    // 更新用户信息（含权限与启用状态）
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data).await
    }
}
