// Service layer - chart assembly on top of the workbook loader
pub mod chart_service;

pub use chart_service::{ChartData, ChartQuery, ChartService};
