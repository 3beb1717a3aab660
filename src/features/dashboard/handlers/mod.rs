pub mod dashboard_handler;

pub use dashboard_handler::{
    __path_get_chart, __path_get_dashboard, __path_get_summary, get_chart, get_dashboard,
    get_summary,
};
