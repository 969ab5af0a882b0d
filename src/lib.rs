//! School Tracker - 学生档案、考勤与成绩记录后端服务
//!
//! 基于 Actix Web 与 SeaORM 构建的 REST API。教师账号（is_staff）可写，
//! 其他登录用户只读。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），缓存认证用户
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、读写权限与限流中间件
//! - `models`: 数据模型与请求校验
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
