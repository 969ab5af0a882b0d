use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, TrackerError};
use crate::models::{
    ListParams, PaginationInfo,
    students::{
        entities::Student,
        requests::{NewStudent, StudentChanges},
        responses::StudentListResponse,
    },
};
use crate::utils::icontains;
use crate::utils::sql::{parse_ordering, search_terms};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

const ORDERING_FIELDS: &[&str] = &["name", "enrollment_date", "class_name"];

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, student: NewStudent) -> Result<Student> {
        let model = ActiveModel {
            name: Set(student.name),
            class_name: Set(student.class_name),
            admission_number: Set(student.admission_number),
            enrollment_date: Set(student.enrollment_date),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to create student: {e}"))
        })?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id).one(&self.db).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to query student: {e}"))
        })?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn student_exists_impl(&self, id: i64) -> Result<bool> {
        let count = Students::find()
            .filter(Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| {
                TrackerError::database_operation(format!("Failed to query student: {e}"))
            })?;

        Ok(count > 0)
    }

    /// 分页列出学生
    ///
    /// 搜索：姓名、班级、学号；排序：姓名、入学日期、班级
    pub async fn list_students_with_pagination_impl(
        &self,
        params: ListParams,
    ) -> Result<StudentListResponse> {
        let (page, size) = params.pagination.normalized();

        let mut select = Students::find();

        for term in search_terms(params.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(icontains((Students, Column::Name), &term))
                    .add(icontains((Students, Column::ClassName), &term))
                    .add(icontains((Students, Column::AdmissionNumber), &term)),
            );
        }

        for (field, direction) in parse_ordering(params.ordering.as_deref(), ORDERING_FIELDS) {
            let column = match field {
                "name" => Column::Name,
                "enrollment_date" => Column::EnrollmentDate,
                _ => Column::ClassName,
            };
            select = select.order_by(column, direction.into());
        }
        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to count students: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to count pages: {e}"))
        })?;
        let students = paginator.fetch_page(page - 1).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to list students: {e}"))
        })?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        changes: StudentChanges,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id).one(&self.db).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to query student: {e}"))
        })?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();
        if let Some(name) = changes.name {
            model.name = Set(name);
        }
        if let Some(class_name) = changes.class_name {
            model.class_name = Set(class_name);
        }
        if let Some(admission_number) = changes.admission_number {
            model.admission_number = Set(admission_number);
        }
        if let Some(enrollment_date) = changes.enrollment_date {
            model.enrollment_date = Set(enrollment_date);
        }

        if !model.is_changed() {
            return Ok(Some(existing.into_student()));
        }

        let updated = model.update(&self.db).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to update student: {e}"))
        })?;

        Ok(Some(updated.into_student()))
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id).exec(&self.db).await.map_err(|e| {
            TrackerError::database_operation(format!("Failed to delete student: {e}"))
        })?;

        Ok(result.rows_affected > 0)
    }
}
