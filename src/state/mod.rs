mod persistence;

pub use persistence::{load_records, load_report, save_report, write_grocery_csv};
