//! Report module - value formatting, report rendering and delivery trait.

pub mod formatters;
mod report_model;
mod report_traits;
mod summary;

pub use formatters::{format_change, format_money, format_percent, format_share_delta};
pub use report_model::{Report, ReportKind, ReportMeta, ReportRow};
pub use report_traits::NotifierTrait;
pub use summary::{
    render_delta_report, render_failure_notice, render_no_data_notice, render_stale_feed_notice,
    render_summary,
};
