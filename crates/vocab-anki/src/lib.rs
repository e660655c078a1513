mod export;

pub use export::{ExportError, UTF8_BOM, export_csv, render_csv};
