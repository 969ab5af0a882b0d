use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceRecords, Relation};
use crate::entity::students;
use crate::errors::{Result, TrackerError};
use crate::models::{
    ListParams, PaginationInfo,
    attendance::{
        entities::{Attendance, AttendanceStatus},
        requests::{AttendanceChanges, NewAttendance},
        responses::{AttendanceListResponse, AttendanceSummary},
    },
};
use crate::utils::icontains;
use crate::utils::sql::{parse_ordering, search_terms};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

const ORDERING_FIELDS: &[&str] = &["date", "status"];

impl SeaOrmStorage {
    /// 批量填充 recorded_by 后转换为业务模型
    async fn attach_attendance_recorders(
        &self,
        models: Vec<crate::entity::attendance::Model>,
    ) -> Result<Vec<Attendance>> {
        let recorders = self
            .load_user_summaries(models.iter().filter_map(|m| m.recorded_by))
            .await?;

        models
            .into_iter()
            .map(|m| {
                let recorder = m.recorded_by.and_then(|id| recorders.get(&id).cloned());
                m.into_attendance(recorder)
            })
            .collect()
    }

    async fn find_attendance_model(
        &self,
        id: i64,
    ) -> Result<Option<crate::entity::attendance::Model>> {
        AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to query attendance: {e}"))
            })
    }

    pub async fn create_attendance_impl(
        &self,
        record: NewAttendance,
        recorded_by: i64,
    ) -> Result<Attendance> {
        let model = ActiveModel {
            student_id: Set(record.student_id),
            date: Set(record.date),
            status: Set(record.status.to_string()),
            recorded_by: Set(Some(recorded_by)),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to create attendance: {e}"))
        })?;

        let mut records = self.attach_attendance_recorders(vec![result]).await?;
        records
            .pop()
            .ok_or_else(|| TrackerError::database_operation("Inserted attendance not returned"))
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        match self.find_attendance_model(id).await? {
            Some(model) => Ok(self.attach_attendance_recorders(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出考勤记录
    ///
    /// 搜索：学生姓名、状态；排序：日期、状态
    pub async fn list_attendance_with_pagination_impl(
        &self,
        params: ListParams,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = params.pagination.normalized();

        let mut select = AttendanceRecords::find();

        let terms = search_terms(params.search.as_deref());
        if !terms.is_empty() {
            select = select.join(JoinType::InnerJoin, Relation::Student.def());
            for term in terms {
                select = select.filter(
                    Condition::any()
                        .add(icontains((students::Entity, students::Column::Name), &term))
                        .add(icontains((AttendanceRecords, Column::Status), &term)),
                );
            }
        }

        for (field, direction) in parse_ordering(params.ordering.as_deref(), ORDERING_FIELDS) {
            let column = match field {
                "date" => Column::Date,
                _ => Column::Status,
            };
            select = select.order_by(column, direction.into());
        }
        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to count attendance: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to count pages: {e}"))
        })?;
        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to list attendance: {e}"))
        })?;

        Ok(AttendanceListResponse {
            items: self.attach_attendance_recorders(models).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新考勤记录，recorded_by 保持不变
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        changes: AttendanceChanges,
    ) -> Result<Option<Attendance>> {
        let Some(existing) = self.find_attendance_model(id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();
        if let Some(student_id) = changes.student_id {
            model.student_id = Set(student_id);
        }
        if let Some(date) = changes.date {
            model.date = Set(date);
        }
        if let Some(status) = changes.status {
            model.status = Set(status.to_string());
        }

        let saved = if model.is_changed() {
            model.update(&self.db).await.map_err(|e| {
                TrackerError::database_operation(format!("Failed to update attendance: {e}"))
            })?
        } else {
            existing
        };

        Ok(self.attach_attendance_recorders(vec![saved]).await?.pop())
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to delete attendance: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 全表考勤汇总（多次独立计数，不在同一事务内）
    pub async fn get_attendance_summary_impl(&self) -> Result<AttendanceSummary> {
        let total = AttendanceRecords::find()
            .count(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to count attendance: {e}"))
            })?;

        let mut counts = [0u64; 3];
        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
        ];
        for (slot, status) in counts.iter_mut().zip(statuses) {
            *slot = AttendanceRecords::find()
                .filter(Column::Status.eq(status.as_str()))
                .count(&self.db)
                .await
                .map_err(|e| {
                    TrackerError::database_operation(format!(
                        "Failed to count {status} attendance: {e}"
                    ))
                })?;
        }

        let [present, absent, late] = counts;
        Ok(AttendanceSummary::from_counts(total, present, absent, late))
    }
}
