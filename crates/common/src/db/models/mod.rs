//! SeaORM entity models
//!
//! Database entities for QuickPoll

mod question;
mod choice;

pub use question::{
    Entity as QuestionEntity,
    Model as Question,
    ActiveModel as QuestionActiveModel,
    Column as QuestionColumn,
};

pub use choice::{
    Entity as ChoiceEntity,
    Model as Choice,
    ActiveModel as ChoiceActiveModel,
    Column as ChoiceColumn,
};
