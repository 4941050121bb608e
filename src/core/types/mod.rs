mod column;
mod error;
mod record;

pub use column::Column;
pub use error::{Error, Result};
pub use record::Record;
