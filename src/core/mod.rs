pub mod question;
pub mod question_type;
pub mod response;
pub mod value;

pub use question::{Question, QuestionDefaults, QuestionId};
pub use question_type::{QuestionType, QuestionTypeError};
pub use response::{Response, ResponseKey};
pub use value::Value;
