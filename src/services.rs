pub mod complaint_service;
pub mod user_service;

pub use complaint_service::{
    ComplaintService, ComplaintStatistics, ComplaintSubmission, WeekdayTrend,
};
pub use user_service::UserService;
