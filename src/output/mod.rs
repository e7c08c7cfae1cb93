mod balance;
mod format;
mod prices;
mod recommend;
mod report;
mod usage;

pub(crate) use balance::print_balance;
pub(crate) use prices::{output_prices_json, print_price_tables};
pub(crate) use recommend::{
    output_alternatives_json, output_category_json, output_overall_json, print_alternatives,
    print_by_category, print_overall, print_recommend_header,
};
pub(crate) use report::{ReportView, output_report_json, print_report};
pub(crate) use usage::{output_usage_json, print_usage_table};
