pub mod account;
pub mod assignment;
pub mod category;
pub mod grade;
pub mod loaders;
pub mod report;

pub use account::{Credential, Session};
pub use assignment::AssignmentRecord;
pub use category::Category;
pub use grade::Grade;
pub use loaders::load_credentials;
pub use report::{AccountReport, GradeResult};
