//! 预导入模块，方便使用

pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as AttendanceRecords, Model as AttendanceModel,
};
pub use super::performance::{
    ActiveModel as PerformanceActiveModel, Entity as PerformanceRecords,
    Model as PerformanceModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
