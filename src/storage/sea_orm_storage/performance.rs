use super::SeaOrmStorage;
use crate::entity::performance::{ActiveModel, Column, Entity as PerformanceRecords, Relation};
use crate::entity::students;
use crate::errors::{Result, TrackerError};
use crate::models::{
    ListParams, PaginationInfo,
    performance::{
        entities::Performance,
        requests::{NewPerformance, PerformanceChanges},
        responses::{PerformanceListResponse, PerformanceSummary},
    },
};
use crate::utils::icontains;
use crate::utils::sql::{parse_ordering, search_terms};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

const ORDERING_FIELDS: &[&str] = &["date_recorded", "score"];

impl SeaOrmStorage {
    async fn attach_performance_recorders(
        &self,
        models: Vec<crate::entity::performance::Model>,
    ) -> Result<Vec<Performance>> {
        let recorders = self
            .load_user_summaries(models.iter().filter_map(|m| m.recorded_by))
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let recorder = m.recorded_by.and_then(|id| recorders.get(&id).cloned());
                m.into_performance(recorder)
            })
            .collect())
    }

    async fn find_performance_model(
        &self,
        id: i64,
    ) -> Result<Option<crate::entity::performance::Model>> {
        PerformanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to query performance: {e}"))
            })
    }

    /// 创建成绩记录，未提供日期时使用当天（UTC）
    pub async fn create_performance_impl(
        &self,
        record: NewPerformance,
        recorded_by: i64,
    ) -> Result<Performance> {
        let model = ActiveModel {
            student_id: Set(record.student_id),
            subject: Set(record.subject),
            score: Set(record.score),
            date_recorded: Set(record
                .date_recorded
                .unwrap_or_else(|| chrono::Utc::now().date_naive())),
            recorded_by: Set(Some(recorded_by)),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to create performance: {e}"))
        })?;

        let mut records = self.attach_performance_recorders(vec![result]).await?;
        records
            .pop()
            .ok_or_else(|| TrackerError::database_operation("Inserted performance not returned"))
    }

    pub async fn get_performance_by_id_impl(&self, id: i64) -> Result<Option<Performance>> {
        match self.find_performance_model(id).await? {
            Some(model) => Ok(self.attach_performance_recorders(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出成绩记录
    ///
    /// 搜索：学生姓名、科目；排序：记录日期、分数
    pub async fn list_performance_with_pagination_impl(
        &self,
        params: ListParams,
    ) -> Result<PerformanceListResponse> {
        let (page, size) = params.pagination.normalized();

        let mut select = PerformanceRecords::find();

        let terms = search_terms(params.search.as_deref());
        if !terms.is_empty() {
            select = select.join(JoinType::InnerJoin, Relation::Student.def());
            for term in terms {
                select = select.filter(
                    Condition::any()
                        .add(icontains((students::Entity, students::Column::Name), &term))
                        .add(icontains((PerformanceRecords, Column::Subject), &term)),
                );
            }
        }

        for (field, direction) in parse_ordering(params.ordering.as_deref(), ORDERING_FIELDS) {
            let column = match field {
                "date_recorded" => Column::DateRecorded,
                _ => Column::Score,
            };
            select = select.order_by(column, direction.into());
        }
        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to count performance: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to count pages: {e}"))
        })?;
        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to list performance: {e}"))
        })?;

        Ok(PerformanceListResponse {
            items: self.attach_performance_recorders(models).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新成绩记录，recorded_by 保持不变
    pub async fn update_performance_impl(
        &self,
        id: i64,
        changes: PerformanceChanges,
    ) -> Result<Option<Performance>> {
        let Some(existing) = self.find_performance_model(id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();
        if let Some(student_id) = changes.student_id {
            model.student_id = Set(student_id);
        }
        if let Some(subject) = changes.subject {
            model.subject = Set(subject);
        }
        if let Some(score) = changes.score {
            model.score = Set(score);
        }
        if let Some(date_recorded) = changes.date_recorded {
            model.date_recorded = Set(date_recorded);
        }

        let saved = if model.is_changed() {
            model.update(&self.db).await.map_err(|e| {
                TrackerError::database_operation(format!("Failed to update performance: {e}"))
            })?
        } else {
            existing
        };

        Ok(self.attach_performance_recorders(vec![saved]).await?.pop())
    }

    pub async fn delete_performance_impl(&self, id: i64) -> Result<bool> {
        let result = PerformanceRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to delete performance: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 全表成绩汇总，平均分与计数由数据库聚合
    pub async fn get_performance_summary_impl(&self) -> Result<PerformanceSummary> {
        let (overall, total): (Option<f64>, i64) = PerformanceRecords::find()
            .select_only()
            .column_as(Expr::expr(Func::avg(Expr::col(Column::Score))), "overall_average")
            .column_as(Expr::expr(Func::count(Expr::col(Column::Id))), "total_records")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to aggregate scores: {e}"))
            })?
            .unwrap_or((None, 0));

        let subjects: Vec<(String, Option<f64>)> = PerformanceRecords::find()
            .select_only()
            .column(Column::Subject)
            .column_as(Expr::expr(Func::avg(Expr::col(Column::Score))), "average")
            .group_by(Column::Subject)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!(
                    "Failed to aggregate scores by subject: {e}"
                ))
            })?;

        Ok(PerformanceSummary::from_aggregates(overall, total, subjects))
    }
}
