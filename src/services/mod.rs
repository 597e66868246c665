pub mod calendar_service;
pub mod report_service;
