pub mod client;
pub mod dto;
pub mod token;

pub use client::{Ga4Client, ReportClient};
pub use dto::{CellValue, DateRange, Dimension, Header, Metric, Row, RunReportRequest, RunReportResponse};
pub use token::{ServiceAccountKey, TokenProvider};
