pub mod scrape;
pub mod sort;
