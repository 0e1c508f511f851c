pub mod category;
pub mod entry;
pub mod types;

pub use category::Category;
pub use entry::{Entry, Table, FOLDER_FIELD};
pub use types::ClassificationDecision;
