mod chart;
mod report;

pub use chart::render_chart;
pub use report::{
    PlanRow, drift_summary, empty_plan_reason, plan_rows, render_json, render_table,
};
