// Input side of the pipeline: loading raw series and cleaning them.
pub mod csv_parser;
pub mod market_data;
pub mod sanitizer;

pub use csv_parser::OhlcCsvParser;
pub use market_data::{CsvFileSource, MarketDataSource};
pub use sanitizer::SeriesSanitizer;
