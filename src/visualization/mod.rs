mod tables;

pub use tables::{
    format_equation_table, format_reconciliation_table, format_utilization_report,
    print_equation_table, print_reconciliation_table, print_utilization_report,
};
