use std::collections::{BTreeSet, HashMap};

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, TrackerError};
use crate::models::{
    ListParams, PaginationInfo,
    users::{
        entities::{User, UserSummary},
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::UserListResponse,
    },
};
use crate::utils::icontains;
use crate::utils::sql::{parse_ordering, search_terms};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

const ORDERING_FIELDS: &[&str] = &["id", "username", "date_joined"];

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            is_staff: Set(req.is_staff),
            is_active: Set(true),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            date_joined: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Failed to create user: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        params: ListParams,
    ) -> Result<UserListResponse> {
        let (page, size) = params.pagination.normalized();

        let mut select = Users::find();

        for term in search_terms(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(icontains((Users, Column::Username), &term))
                    .add(icontains((Users, Column::Email), &term))
                    .add(icontains((Users, Column::FirstName), &term))
                    .add(icontains((Users, Column::LastName), &term)),
            );
        }

        for (field, direction) in parse_ordering(params.ordering.as_deref(), ORDERING_FIELDS) {
            let column = match field {
                "username" => Column::Username,
                "date_joined" => Column::DateJoined,
                _ => Column::Id,
            };
            select = select.order_by(column, direction.into());
        }
        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrackerError::database_operation(format!("Failed to count users: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TrackerError::database_operation(format!("Failed to count pages: {e}")))?;
        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Failed to list users: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to update last login: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(Some(first_name));
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(Some(last_name));
        }
        if let Some(is_staff) = update.is_staff {
            model.is_staff = Set(is_staff);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        // 没有任何字段变化时 update 会报错，直接返回原值
        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| TrackerError::database_operation(format!("Failed to update user: {e}")))?;
        }

        self.get_user_by_id_impl(id).await
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| TrackerError::database_operation(format!("Failed to count users: {e}")))
    }

    /// 批量查询记录者摘要（id → 用户名）
    pub(super) async fn load_user_summaries<I>(&self, ids: I) -> Result<HashMap<i64, UserSummary>>
    where
        I: IntoIterator<Item = i64>,
    {
        let ids: BTreeSet<i64> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, String)> = Users::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Username)
            .filter(Column::Id.is_in(ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to load recorders: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .map(|(id, username)| (id, UserSummary { id, username }))
            .collect())
    }
}
