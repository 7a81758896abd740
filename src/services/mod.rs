pub mod date_reconstructor;
pub mod pagination_probe;
pub mod portal_urls;
pub mod record_extractor;
pub mod report_writer;
pub mod session_auth;

pub use pagination_probe::PaginationProbe;
pub use record_extractor::{ExtractedPage, RecordExtractor};
pub use report_writer::ReportWriter;
pub use session_auth::SessionAuthenticator;
