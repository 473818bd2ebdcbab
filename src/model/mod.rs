mod album;
mod comment;
mod page;
mod photo;
mod size;

pub use album::*;
pub use comment::*;
pub use page::*;
pub use photo::*;
pub use size::*;
