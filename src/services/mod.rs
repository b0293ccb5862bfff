//! Business logic services

pub mod judge_service;

pub use judge_service::JudgeService;
