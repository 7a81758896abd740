pub mod category_flow;
pub mod crawl_ctx;

pub use category_flow::{CategoryFlow, CategoryOutcome};
pub use crawl_ctx::{CategoryTarget, CrawlCtx};
